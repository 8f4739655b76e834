use std::{result, str::Utf8Error};

use glyphpress_core::SourceFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{0} sources are not supported")]
    UnsupportedFormat(SourceFormat),

    #[error("source is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    #[error("invalid SVG document: {0}")]
    Document(#[from] roxmltree::Error),

    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),

    #[error("SVG root has no usable viewBox or width/height")]
    MissingViewBox,

    #[error("invalid {element} geometry: {message}")]
    Geometry { element: String, message: String },

    #[error("invalid transform: {0}")]
    Transform(String),

    #[error("coordinate {0} is outside the font unit range")]
    CoordinateOverflow(f64),

    #[error("advance width {0} is outside the font unit range")]
    AdvanceOverflow(f64),
}

pub type Result<T> = result::Result<T, ImportError>;
