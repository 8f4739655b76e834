//! Outline import
//!
//! [`import_glyph`] turns one [`GlyphSource`](glyphpress_core::GlyphSource)
//! into a [`NormalizedGlyph`](glyphpress_core::NormalizedGlyph): SVG shapes are
//! mapped into the em square, cubic curves become quadratic splines, points are
//! rounded to integer font units, and winding is normalized to the TrueType
//! convention. Imports share no state, so any number can run concurrently.

mod contour;
mod error;
mod importer;
mod svg;

pub use error::{ImportError, Result};
pub use importer::{ImportWarning, ImportedGlyph, import_glyph};
