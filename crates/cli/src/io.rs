//! Archive input and font output.

use std::{
    fs::{File, create_dir_all, metadata, read, write},
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::glob;
use glyphpress_compiler::ArchiveEntry;
use glyphpress_core::config::GLYPH_NAME_PREFIX;
use log::debug;
use zip::ZipArchive;

/// Largest accepted upload, compressed or not
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 50 * 1024 * 1024;

/// A font file handle for I/O operations.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read font data from the file.
    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }

    /// Write font data to the file, creating its directory if needed.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.ensure_parent_dir()?;
        write(&self.path, data)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

/// Read glyph entries from a zip archive or a directory of glyph files.
///
/// Archives larger than `max_bytes` are rejected before anything is
/// extracted; the same limit applies to the total extracted size.
pub fn read_entries(input: &Path, max_bytes: u64) -> Result<Vec<ArchiveEntry>> {
    if input.is_dir() {
        read_directory(input, max_bytes)
    } else {
        read_zip(input, max_bytes)
    }
}

fn read_zip(path: &Path, max_bytes: u64) -> Result<Vec<ArchiveEntry>> {
    let size = metadata(path)
        .with_context(|| format!("Failed to read archive: {}", path.display()))?
        .len();
    if size > max_bytes {
        bail!("Archive {} is {size} bytes, limit is {max_bytes}", path.display());
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(file).context("Failed to open zip archive")?;

    let mut entries = Vec::with_capacity(archive.len());
    let mut extracted = 0u64;
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .with_context(|| format!("Failed to read entry {index} of {}", path.display()))?;
        if file.is_dir() {
            continue;
        }

        // Count decompressed bytes, not declared sizes.
        let name = file.name().to_string();
        let remaining = max_bytes - extracted;
        let mut data = Vec::new();
        (&mut file)
            .take(remaining + 1)
            .read_to_end(&mut data)
            .with_context(|| format!("Failed to extract {name}"))?;
        extracted += data.len() as u64;
        if extracted > max_bytes {
            bail!("Archive {} expands past {max_bytes} bytes", path.display());
        }
        entries.push(ArchiveEntry::new(name, data));
    }
    debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

fn read_directory(dir: &Path, max_bytes: u64) -> Result<Vec<ArchiveEntry>> {
    let mut total = 0u64;
    let mut entries = Vec::new();
    for path in glob_glyphs(dir)? {
        let data = read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        total += data.len() as u64;
        if total > max_bytes {
            bail!("Glyph files in {} exceed {max_bytes} bytes", dir.display());
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        entries.push(ArchiveEntry::new(name, data));
    }
    debug!("Read {} glyph files from {}", entries.len(), dir.display());
    Ok(entries)
}

/// Find glyph files in a directory, sorted by path.
pub fn glob_glyphs(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(format!("{GLYPH_NAME_PREFIX}*.*"));
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    Ok(glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;
    use zip::{ZipWriter, write::SimpleFileOptions};

    use super::*;

    fn write_zip(dir: &TempDir, files: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.path().join("glyphs.zip");
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.add_directory("glyphs/", SimpleFileOptions::default()).unwrap();
        for (name, data) in files {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
        path
    }

    #[test]
    fn test_read_zip() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, &[("glyphs/glyph_65.svg", b"<svg/>"), ("notes.txt", b"hi")]);

        let entries = read_entries(&path, DEFAULT_MAX_ARCHIVE_BYTES).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["glyphs/glyph_65.svg", "notes.txt"]);
        assert_eq!(entries[0].data, b"<svg/>");
    }

    #[test]
    fn test_oversized_zip_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, &[("glyph_65.svg", &[b' '; 4096])]);
        let err = read_entries(&path, 64).unwrap_err();
        assert!(err.to_string().contains("limit is 64"), "{err}");
    }

    #[test]
    fn test_expanded_size_is_limited() {
        let dir = TempDir::new().unwrap();
        let zeros = vec![0u8; 64 * 1024];
        let path = write_zip(&dir, &[("glyph_65.svg", &zeros)]);
        let limit = 4096;
        assert!(metadata(&path).unwrap().len() < limit);

        let err = read_entries(&path, limit).unwrap_err();
        assert!(err.to_string().contains("expands past"), "{err}");
    }

    #[test]
    fn test_understated_entry_size_is_limited() {
        let dir = TempDir::new().unwrap();
        let zeros = vec![0u8; 64 * 1024];
        let path = write_zip(&dir, &[("glyph_65.svg", &zeros)]);
        let limit = 4096;

        // Rewrite the entry's uncompressed size to 10 bytes in both headers.
        let mut bytes = read(&path).unwrap();
        let mut patched = 0;
        for (signature, offset) in [([0x50, 0x4b, 0x03, 0x04], 22), ([0x50, 0x4b, 0x01, 0x02], 24)] {
            let mut start = 0;
            while let Some(pos) = bytes[start..].windows(4).position(|w| w == signature) {
                let at = start + pos + offset;
                bytes[at..at + 4].copy_from_slice(&10u32.to_le_bytes());
                patched += 1;
                start += pos + 4;
            }
        }
        assert!(patched >= 2);
        write(&path, &bytes).unwrap();

        assert!(read_entries(&path, limit).is_err());
    }

    #[test]
    fn test_read_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path().join("glyph_97.svg"), b"a").unwrap();
        write(dir.path().join("glyph_65.svg"), b"A").unwrap();
        write(dir.path().join("readme.md"), b"skip").unwrap();

        let entries = read_entries(dir.path(), DEFAULT_MAX_ARCHIVE_BYTES).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["glyph_65.svg", "glyph_97.svg"]);

        assert!(read_entries(dir.path(), 1).is_err());
    }

    #[test]
    fn test_font_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let font = FontFile::new(dir.path().join("out/nested/font.ttf"));
        font.write([1u8, 2, 3]).unwrap();
        assert_eq!(font.read().unwrap(), vec![1, 2, 3]);
    }
}
