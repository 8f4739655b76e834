use glyphpress_core::OptionsError;
use thiserror::Error;

/// Conditions that stop a build without producing a font
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildFailure {
    #[error("archive contains no usable glyph sources ({entries} entries, {rejected} rejected)")]
    EmptyArchive { entries: usize, rejected: usize },

    #[error("font too large: {0}")]
    ArtifactTooLarge(String),

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("build cancelled")]
    Cancelled,

    #[error("font assembly failed: {0}")]
    Assembly(String),
}
