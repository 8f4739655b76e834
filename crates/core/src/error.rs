use std::result;

use thiserror::Error;

/// Invalid build configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("unitsPerEm must be within {min}..={max}, got {actual}")]
    UnitsPerEm { min: u16, max: u16, actual: u16 },

    #[error("outline tolerance must be a positive number of font units, got {0}")]
    Tolerance(f64),

    #[error("side bearing fraction must be within 0.0..=1.0, got {0}")]
    SideBearing(f64),

    #[error("family name must not be empty")]
    EmptyFamilyName,

    #[error("worker count must be at least 1")]
    NoWorkers,
}

pub type Result<T> = result::Result<T, OptionsError>;
