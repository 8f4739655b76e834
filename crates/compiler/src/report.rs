//! Build outcome reporting

use std::{
    collections::{BTreeMap, BTreeSet, btree_map::Entry},
    fmt,
    fmt::{Display, Formatter},
};

use glyphpress_core::{Codepoint, SourceFormat};
use glyphpress_glyph_source::{SourceIssue, SourceIssueKind};
use glyphpress_outline_import::ImportError;

use crate::BuildFailure;

/// Why a glyph source did not make it into the font unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    InvalidCodePoint,
    /// Another entry for the same code point was kept
    DuplicateCodePoint { kept: String },
    UnsupportedFormat(SourceFormat),
    MalformedOutline(String),
    /// Imported as a blank glyph; the code point is still mapped
    DegenerateOutline,
}

impl FailureReason {
    /// `false` for reasons that leave the glyph in the font
    pub fn drops_glyph(&self) -> bool {
        !matches!(self, Self::DegenerateOutline)
    }

    fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateCodePoint { .. })
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCodePoint => f.write_str("invalid code point"),
            Self::DuplicateCodePoint { kept } => write!(f, "duplicate code point (kept {kept})"),
            Self::UnsupportedFormat(format) => write!(f, "unsupported format: {format}"),
            Self::MalformedOutline(message) => write!(f, "malformed outline: {message}"),
            Self::DegenerateOutline => f.write_str("degenerate outline (kept blank)"),
        }
    }
}

impl From<SourceIssueKind> for FailureReason {
    fn from(kind: SourceIssueKind) -> Self {
        match kind {
            SourceIssueKind::InvalidCodePoint => Self::InvalidCodePoint,
            SourceIssueKind::DuplicateCodePoint { kept } => Self::DuplicateCodePoint { kept },
        }
    }
}

impl From<&ImportError> for FailureReason {
    fn from(err: &ImportError) -> Self {
        match err {
            ImportError::UnsupportedFormat(format) => Self::UnsupportedFormat(*format),
            other => Self::MalformedOutline(other.to_string()),
        }
    }
}

/// One entry that was rejected or imported with a warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIssue {
    pub entry_name: String,
    /// Numeric value from the entry name, when it had one
    pub code_point: Option<u32>,
    pub reason: FailureReason,
}

impl From<SourceIssue> for BuildIssue {
    fn from(issue: SourceIssue) -> Self {
        Self {
            entry_name: issue.entry_name,
            code_point: issue.code_point,
            reason: issue.kind.into(),
        }
    }
}

impl Display for BuildIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.code_point {
            Some(cp) => write!(f, "U+{cp:04X}\t{}\t{}", self.entry_name, self.reason),
            None => write!(f, "-\t{}\t{}", self.entry_name, self.reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// Every glyph source was compiled cleanly
    Success,
    /// A font was produced but some entries were rejected or blanked
    Partial,
    /// No font was produced
    Failure,
}

impl Display for BuildStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failure => "failure",
        })
    }
}

/// Everything a caller needs to explain a build to the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Code points mapped to an outline in the produced font
    pub succeeded: BTreeSet<Codepoint>,
    /// Rejected and blanked entries, validation issues first, each group in
    /// archive order
    pub issues: Vec<BuildIssue>,
    /// Set when the build produced no font
    pub fatal: Option<BuildFailure>,
}

impl BuildReport {
    /// Code points that are absent from the font, with the first reason seen
    /// for each. Duplicates of a code point that did compile are not listed,
    /// and the kept entry's own failure outranks a duplicate notice.
    pub fn failed_code_points(&self) -> BTreeMap<u32, FailureReason> {
        let mut failed = BTreeMap::new();
        for issue in self.issues.iter().filter(|issue| issue.reason.drops_glyph()) {
            let Some(cp) = issue.code_point else { continue };
            if Codepoint::new(cp).is_some_and(|cp| self.succeeded.contains(&cp)) {
                continue;
            }
            match failed.entry(cp) {
                Entry::Vacant(entry) => {
                    entry.insert(issue.reason.clone());
                }
                Entry::Occupied(mut entry) => {
                    if entry.get().is_duplicate() && !issue.reason.is_duplicate() {
                        entry.insert(issue.reason.clone());
                    }
                }
            }
        }
        failed
    }

    /// Issues for entries that were left out of the font
    pub fn rejected(&self) -> impl Iterator<Item = &BuildIssue> {
        self.issues.iter().filter(|issue| issue.reason.drops_glyph())
    }

    pub fn status(&self) -> BuildStatus {
        if self.fatal.is_some() {
            BuildStatus::Failure
        } else if self.issues.is_empty() {
            BuildStatus::Success
        } else {
            BuildStatus::Partial
        }
    }

    pub(crate) fn push(&mut self, entry_name: &str, code_point: Codepoint, reason: FailureReason) {
        self.issues.push(BuildIssue {
            entry_name: entry_name.to_string(),
            code_point: Some(code_point.to_u32()),
            reason,
        });
    }

    /// Mark the build as failed; nothing was compiled into a font.
    pub(crate) fn fail(mut self, failure: BuildFailure) -> Self {
        self.succeeded.clear();
        self.fatal = Some(failure);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(name: &str, cp: Option<u32>, reason: FailureReason) -> BuildIssue {
        BuildIssue { entry_name: name.to_string(), code_point: cp, reason }
    }

    #[test]
    fn test_status() {
        let mut report = BuildReport::default();
        report.succeeded.insert(Codepoint::from('A'));
        assert_eq!(report.status(), BuildStatus::Success);

        report.issues.push(issue("glyph_66.svg", Some(66), FailureReason::DegenerateOutline));
        assert_eq!(report.status(), BuildStatus::Partial);

        let report = report.fail(BuildFailure::Cancelled);
        assert_eq!(report.status(), BuildStatus::Failure);
        assert!(report.succeeded.is_empty());
    }

    #[test]
    fn test_failed_code_points() {
        let mut report = BuildReport::default();
        report.succeeded.insert(Codepoint::from('A'));
        report.succeeded.insert(Codepoint::from('C'));
        report.issues = vec![
            issue(
                "glyph_065.svg",
                Some(65),
                FailureReason::DuplicateCodePoint { kept: "glyph_65.svg".to_string() },
            ),
            issue("glyph_x1.svg", None, FailureReason::InvalidCodePoint),
            issue("glyph_55296.svg", Some(0xD800), FailureReason::InvalidCodePoint),
            issue("glyph_66.svg", Some(66), FailureReason::MalformedOutline("bad".to_string())),
            issue("glyph_67.svg", Some(67), FailureReason::DegenerateOutline),
        ];

        let failed = report.failed_code_points();
        assert_eq!(failed.keys().copied().collect::<Vec<_>>(), vec![66, 0xD800]);
        assert_eq!(failed[&66], FailureReason::MalformedOutline("bad".to_string()));
        assert_eq!(report.rejected().count(), 4);
    }

    #[test]
    fn test_kept_entry_failure_outranks_duplicate() {
        let mut report = BuildReport::default();
        report.issues = vec![
            issue(
                "glyph_65.svg",
                Some(65),
                FailureReason::DuplicateCodePoint { kept: "glyph_65.png".to_string() },
            ),
            issue("glyph_65.png", Some(65), FailureReason::UnsupportedFormat(SourceFormat::RasterTrace)),
        ];
        let failed = report.failed_code_points();
        assert_eq!(failed[&65], FailureReason::UnsupportedFormat(SourceFormat::RasterTrace));
    }

    #[test]
    fn test_issue_display() {
        let line = issue("glyph_233.png", Some(233), FailureReason::UnsupportedFormat(SourceFormat::RasterTrace));
        assert!(line.to_string().starts_with("U+00E9\tglyph_233.png\tunsupported format"));
        let line = issue("glyph_.svg", None, FailureReason::InvalidCodePoint);
        assert_eq!(line.to_string(), "-\tglyph_.svg\tinvalid code point");
    }
}
