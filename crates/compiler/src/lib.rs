//! Font Compiler
//!
//! Runs the whole pipeline for one archive: validation, parallel outline
//! import, and table assembly. Per-glyph problems end up in the
//! [`BuildReport`]; only problems that make a font impossible stop the build.
//!
//! ```no_run
//! use glyphpress_compiler::{ArchiveEntry, CompileOptions, Compiler};
//!
//! let entries = vec![ArchiveEntry::new("glyph_65.svg", std::fs::read("A.svg").unwrap())];
//! let (artifact, report) = Compiler::new(CompileOptions::default()).compile(entries);
//! println!("{}", report.status());
//! if let Some(font) = artifact {
//!     std::fs::write(font.suggested_filename(), font.bytes()).unwrap();
//! }
//! ```

mod cancel;
mod compiler;
mod error;
mod report;

pub use cancel::CancelToken;
pub use compiler::Compiler;
pub use error::BuildFailure;
pub use glyphpress_core::CompileOptions;
pub use glyphpress_font_builder::{FontArtifact, TableRecord};
pub use glyphpress_glyph_source::ArchiveEntry;
pub use report::{BuildIssue, BuildReport, BuildStatus, FailureReason};
