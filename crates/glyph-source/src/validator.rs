//! Entry validation and de-duplication

use std::{
    fmt,
    fmt::{Display, Formatter},
};

use glyphpress_core::{
    Codepoint, CompileOptions, GlyphSource,
    config::{FIRST_PRINTABLE_CODE_POINT, MAX_CODE_POINT},
};
use indexmap::{IndexMap, map::Entry};
use log::{debug, info, warn};

use crate::{
    ArchiveEntry, EntryName, Result, ValidationError, parse_entry_name,
};

/// Why an entry was left out of the source set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceIssueKind {
    /// Digits do not name an acceptable Unicode scalar value
    InvalidCodePoint,
    /// Another entry already claimed the code point
    DuplicateCodePoint { kept: String },
}

impl Display for SourceIssueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCodePoint => f.write_str("invalid code point"),
            Self::DuplicateCodePoint { kept } => write!(f, "duplicate code point (kept {kept})"),
        }
    }
}

/// A rejected entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    pub entry_name: String,
    /// Parsed code point value, if the digits fit in a `u32`
    pub code_point: Option<u32>,
    pub kind: SourceIssueKind,
}

/// Code point → source mapping, in first-encountered order
#[derive(Debug, Clone)]
pub struct GlyphSourceSet {
    sources: IndexMap<Codepoint, GlyphSource>,
}

impl GlyphSourceSet {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Always `false`; a set holds at least one source.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources in first-encountered order
    pub fn into_sources(self) -> Vec<GlyphSource> {
        self.sources.into_values().collect()
    }
}

/// Result of validating an archive
#[derive(Debug)]
pub struct Validation {
    pub sources: Result<GlyphSourceSet>,
    pub issues: Vec<SourceIssue>,
}

/// Validates archive entries against the naming convention
pub struct Validator<'a> {
    options: &'a CompileOptions,
}

impl<'a> Validator<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self { options }
    }

    /// Validate entries in archive order.
    pub fn validate(&self, entries: impl IntoIterator<Item = ArchiveEntry>) -> Validation {
        let mut sources: IndexMap<Codepoint, GlyphSource> = IndexMap::new();
        let mut issues = Vec::new();
        let mut total = 0usize;
        let mut skipped = 0usize;

        for entry in entries {
            total += 1;
            let ArchiveEntry { name, data } = entry;

            let (digits, format) = match parse_entry_name(&name) {
                EntryName::Glyph { digits, format } => (digits, format),
                EntryName::Other => {
                    debug!("Skipping {name}: not a glyph source");
                    skipped += 1;
                    continue;
                }
            };

            let raw = digits.parse::<u32>().ok();
            let Some(cp) = raw.and_then(|value| self.accept_code_point(value)) else {
                warn!("Rejecting {name}: invalid code point {digits}");
                issues.push(SourceIssue {
                    entry_name: name,
                    code_point: raw,
                    kind: SourceIssueKind::InvalidCodePoint,
                });
                continue;
            };

            match sources.entry(cp) {
                Entry::Vacant(slot) => {
                    slot.insert(GlyphSource::new(cp, name, data, format));
                }
                Entry::Occupied(slot) => {
                    let kept = slot.get().entry_name().to_string();
                    warn!("Rejecting {name}: {cp} already provided by {kept}");
                    issues.push(SourceIssue {
                        entry_name: name,
                        code_point: Some(cp.to_u32()),
                        kind: SourceIssueKind::DuplicateCodePoint { kept },
                    });
                }
            }
        }

        info!(
            "Validated {total} entries: {} glyph sources, {} rejected, {skipped} skipped",
            sources.len(),
            issues.len()
        );

        let sources = if sources.is_empty() {
            Err(ValidationError::EmptyArchive { entries: total, rejected: issues.len() })
        } else {
            Ok(GlyphSourceSet { sources })
        };

        Validation { sources, issues }
    }

    fn accept_code_point(&self, value: u32) -> Option<Codepoint> {
        if value > MAX_CODE_POINT {
            return None;
        }
        if value < FIRST_PRINTABLE_CODE_POINT && !self.options.allows_control(value) {
            return None;
        }
        Codepoint::new(value)
    }
}

#[cfg(test)]
mod tests {
    use glyphpress_core::SourceFormat;

    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn names(set: GlyphSourceSet) -> Vec<String> {
        set.into_sources().iter().map(|s| s.entry_name().to_string()).collect()
    }

    fn entries(names: &[&str]) -> Vec<ArchiveEntry> {
        names.iter().map(|n| ArchiveEntry::new(*n, n.as_bytes().to_vec())).collect()
    }

    #[test]
    fn test_valid_entries() {
        init_logger();
        let options = CompileOptions::default();
        let validation =
            Validator::new(&options).validate(entries(&["glyph_97.svg", "glyph_65.png"]));
        let set = validation.sources.unwrap();
        assert!(validation.issues.is_empty());
        assert_eq!(set.len(), 2);
        let sources = set.into_sources();
        let found: Vec<_> = sources.iter().map(|s| (s.code_point(), s.format())).collect();
        assert_eq!(
            found,
            vec![
                (Codepoint::from('a'), SourceFormat::VectorOutline),
                (Codepoint::from('A'), SourceFormat::RasterTrace),
            ]
        );
    }

    #[test]
    fn test_other_files_are_skipped_silently() {
        let options = CompileOptions::default();
        let validation = Validator::new(&options)
            .validate(entries(&["notes.txt", "glyph_65.svg", "glyphs/", "glyph_x.svg"]));
        assert_eq!(validation.sources.unwrap().len(), 1);
        assert!(validation.issues.is_empty());
    }

    #[test]
    fn test_invalid_code_points_are_reported() {
        init_logger();
        let options = CompileOptions::default();
        let validation = Validator::new(&options).validate(entries(&[
            "glyph_1114112.svg",
            "glyph_55296.svg",
            "glyph_10.svg",
            "glyph_99999999999999999999.svg",
            "glyph_66.svg",
        ]));
        assert_eq!(validation.sources.unwrap().len(), 1);
        let rejected: Vec<_> =
            validation.issues.iter().map(|i| (i.code_point, i.kind.clone())).collect();
        assert_eq!(
            rejected,
            vec![
                (Some(0x110000), SourceIssueKind::InvalidCodePoint),
                (Some(0xD800), SourceIssueKind::InvalidCodePoint),
                (Some(10), SourceIssueKind::InvalidCodePoint),
                (None, SourceIssueKind::InvalidCodePoint),
            ]
        );
    }

    #[test]
    fn test_whitelisted_control_code_point() {
        let options = CompileOptions::new().allow_control_code_points([0x09]);
        let validation =
            Validator::new(&options).validate(entries(&["glyph_9.svg", "glyph_10.svg"]));
        let sources = validation.sources.unwrap().into_sources();
        assert_eq!(sources[0].code_point(), Codepoint::new(9).unwrap());
        assert_eq!(validation.issues.len(), 1);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let options = CompileOptions::default();
        let validation = Validator::new(&options).validate(entries(&[
            "glyph_65.svg",
            "glyph_065.svg",
            "glyph_65.png",
        ]));
        assert_eq!(names(validation.sources.unwrap()), vec!["glyph_65.svg"]);
        assert_eq!(validation.issues.len(), 2);
        for issue in &validation.issues {
            assert_eq!(issue.code_point, Some(65));
            assert_eq!(
                issue.kind,
                SourceIssueKind::DuplicateCodePoint { kept: "glyph_65.svg".to_string() }
            );
        }
    }

    #[test]
    fn test_empty_archive() {
        let options = CompileOptions::default();
        let validation = Validator::new(&options).validate(entries(&["readme.md", "font.ttf"]));
        assert_eq!(
            validation.sources.unwrap_err(),
            ValidationError::EmptyArchive { entries: 2, rejected: 0 }
        );

        let validation = Validator::new(&options).validate(Vec::new());
        assert!(matches!(validation.sources, Err(ValidationError::EmptyArchive { .. })));
    }

    #[test]
    fn test_only_invalid_entries_is_empty_archive() {
        let options = CompileOptions::default();
        let validation = Validator::new(&options).validate(entries(&["glyph_5.svg"]));
        assert_eq!(
            validation.sources.unwrap_err(),
            ValidationError::EmptyArchive { entries: 1, rejected: 1 }
        );
        assert_eq!(validation.issues.len(), 1);
    }
}
