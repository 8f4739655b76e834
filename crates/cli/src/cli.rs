//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{BuildArgs, build, verify};

#[derive(Parser)]
#[command(name = "glyphpress")]
#[command(about = "Compile archives of glyph outlines into TrueType fonts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a glyph archive into a font
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Check the table and whole-font checksums of a font
    Verify { font: PathBuf },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => build(&args)?,
            Commands::Verify { font } => verify(&font)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from([
            "glyphpress",
            "build",
            "glyphs.zip",
            "-o",
            "out.ttf",
            "--allow-control",
            "9,10",
            "--jobs",
            "2",
        ])
        .unwrap();
        let Commands::Build { args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.input, PathBuf::from("glyphs.zip"));
        assert_eq!(args.output, Some(PathBuf::from("out.ttf")));
        assert_eq!(args.allow_control, vec![9, 10]);
        assert_eq!(args.jobs, Some(2));
        assert_eq!(args.units_per_em, 1000);
    }
}
