//! Compile a glyph archive into a font.

use std::{io::Write, path::PathBuf, time::Instant};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use glyphpress_compiler::{BuildReport, CompileOptions, Compiler};
use glyphpress_core::config::{
    DEFAULT_FAMILY_NAME, DEFAULT_OUTLINE_TOLERANCE, DEFAULT_SIDE_BEARING_FRACTION,
    DEFAULT_UNITS_PER_EM,
};
use log::info;

use crate::io::{DEFAULT_MAX_ARCHIVE_BYTES, FontFile, read_entries};

#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    /// Zip archive or directory of glyph_<code point>.<ext> files
    pub input: PathBuf,

    /// Output font path (defaults to generated_font.ttf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_UNITS_PER_EM)]
    pub units_per_em: u16,

    /// Curve approximation tolerance in font units
    #[arg(long, default_value_t = DEFAULT_OUTLINE_TOLERANCE)]
    pub tolerance: f64,

    /// Side-bearing margin as a fraction of the em
    #[arg(long, default_value_t = DEFAULT_SIDE_BEARING_FRACTION)]
    pub side_bearing: f64,

    #[arg(long, default_value = DEFAULT_FAMILY_NAME)]
    pub family: String,

    /// Import threads (defaults to one per CPU core)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    #[arg(long, default_value_t = DEFAULT_MAX_ARCHIVE_BYTES)]
    pub max_archive_bytes: u64,

    /// Control code points to accept anyway, e.g. 9,10
    #[arg(long, value_delimiter = ',')]
    pub allow_control: Vec<u32>,

    /// Fixed generation time as Unix seconds, for reproducible output
    #[arg(long, env = "SOURCE_DATE_EPOCH")]
    pub timestamp: Option<i64>,
}

impl BuildArgs {
    fn options(&self) -> Result<CompileOptions> {
        let mut options = CompileOptions::new()
            .units_per_em(self.units_per_em)
            .outline_tolerance(self.tolerance)
            .side_bearing_fraction(self.side_bearing)
            .family_name(&self.family)
            .allow_control_code_points(self.allow_control.iter().copied());
        if let Some(jobs) = self.jobs {
            options = options.max_workers(jobs);
        }
        if let Some(secs) = self.timestamp {
            let timestamp: DateTime<Utc> = DateTime::from_timestamp(secs, 0)
                .with_context(|| format!("Timestamp out of range: {secs}"))?;
            options = options.timestamp(timestamp);
        }
        Ok(options)
    }
}

pub fn build(args: &BuildArgs) -> Result<()> {
    let start = Instant::now();
    let entries = read_entries(&args.input, args.max_archive_bytes)?;
    info!("Read {} entries from {}", entries.len(), args.input.display());

    let (artifact, report) = Compiler::new(args.options()?).compile(entries);

    let stdout = std::io::stdout();
    write_report(&report, &mut stdout.lock()).context("Failed to write report")?;

    let Some(artifact) = artifact else {
        match &report.fatal {
            Some(failure) => bail!("Build failed: {failure}"),
            None => bail!("Build failed"),
        }
    };

    let output = FontFile::new(
        args.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(artifact.suggested_filename())),
    );
    output.write(artifact.bytes())?;
    println!(
        "Wrote {} ({} glyphs, {} bytes) in {:.2}s",
        output.path().display(),
        artifact.glyph_count(),
        artifact.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// One line per issue, then the overall status.
pub fn write_report(report: &BuildReport, out: &mut impl Write) -> std::io::Result<()> {
    for issue in &report.issues {
        writeln!(out, "{issue}")?;
    }
    writeln!(out, "{}", report.status())
}
