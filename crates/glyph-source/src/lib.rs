//! Glyph source validation
//!
//! Turns the unordered entries of an uploaded archive into a [`GlyphSourceSet`]
//! keyed by code point. Malformed names are skipped, bad code points and
//! duplicates are reported as [`SourceIssue`]s, and only an archive with no
//! usable entry at all fails.

mod entry;
mod error;
mod validator;

pub use entry::{ArchiveEntry, EntryName, parse_entry_name};
pub use error::{Result, ValidationError};
pub use validator::{GlyphSourceSet, SourceIssue, SourceIssueKind, Validation, Validator};
