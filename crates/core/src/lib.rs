//! glyphpress core - domain types and build configuration shared by every stage
//! of the glyph-archive-to-font pipeline.

pub mod config;
mod error;
mod options;
mod types;

pub use error::{OptionsError, Result};
pub use options::CompileOptions;
pub use types::{Codepoint, GlyphSource, NormalizedGlyph, SourceFormat};
