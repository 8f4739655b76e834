use std::result;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("archive contains no usable glyph sources ({entries} entries, {rejected} rejected)")]
    EmptyArchive { entries: usize, rejected: usize },
}

pub type Result<T> = result::Result<T, ValidationError>;
