//! Check the checksums of a compiled font.

use std::path::Path;

use anyhow::{Context, Result};
use glyphpress_font_builder::verify_checksums;
use read_fonts::FontRef;

use crate::io::FontFile;

pub fn verify(path: &Path) -> Result<()> {
    let data = FontFile::new(path).read()?;
    verify_checksums(&data).with_context(|| format!("Checksum mismatch in {}", path.display()))?;

    let font = FontRef::new(&data).context("Failed to parse font")?;
    for record in font.table_directory.table_records() {
        println!(
            "{}\t{:#010x}\t{}\t{}",
            record.tag(),
            record.checksum(),
            record.offset(),
            record.length()
        );
    }
    println!("{}: checksums ok", path.display());
    Ok(())
}
