use std::result;

use read_fonts::ReadError;
use write_fonts::{BuilderError, error, tables::cmap::CmapConflict, types::Tag};

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("{count} glyphs exceed the limit of {max}")]
    TooManyGlyphs { count: usize, max: usize },

    #[error("{bytes} bytes of {what} exceed the 32-bit offset range")]
    DataTooLarge { what: &'static str, bytes: usize },

    #[error("failed to write table: {0}")]
    Write(#[from] error::Error),

    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("failed to read assembled font: {0}")]
    Read(#[from] ReadError),

    #[error("cmap: {0}")]
    Cmap(#[from] CmapConflict),
}

impl AssembleError {
    /// `true` when the glyph set cannot fit in a single font file.
    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::TooManyGlyphs { .. } | Self::DataTooLarge { .. })
    }
}

/// A checksum that does not match the bytes it covers
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("no {0} table")]
    MissingTable(Tag),

    #[error("{0} table extends past the end of the file")]
    Truncated(Tag),

    #[error("{tag} checksum is {actual:#010X}, directory says {expected:#010X}")]
    Table { tag: Tag, expected: u32, actual: u32 },

    #[error("checkSumAdjustment is {actual:#010X}, expected {expected:#010X}")]
    Adjustment { expected: u32, actual: u32 },
}

pub type Result<T> = result::Result<T, AssembleError>;
