//! Font Table Builder
//!
//! Turns a set of [`NormalizedGlyph`](glyphpress_core::NormalizedGlyph)s into
//! a static TrueType font: `.notdef` at glyph 0, the remaining glyphs in
//! ascending code point order, and every table a font needs to install.

mod artifact;
mod assemble;
mod checksum;
mod error;
mod glyph_order;
mod notdef;
mod tables;
mod verify;

pub use artifact::{FontArtifact, TableRecord};
pub use assemble::assemble;
pub use checksum::{CHECKSUM_MAGIC, table_checksum};
pub use error::{AssembleError, ChecksumError, Result};
pub use verify::verify_checksums;
