//! Archive entries and the `glyph_<digits>.<ext>` naming convention

use glyphpress_core::{
    SourceFormat,
    config::GLYPH_NAME_PREFIX,
};

/// A decoded archive member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), data: data.into() }
    }
}

impl<N: Into<String>, D: Into<Vec<u8>>> From<(N, D)> for ArchiveEntry {
    fn from((name, data): (N, D)) -> Self {
        Self::new(name, data)
    }
}

/// Classification of an entry name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryName<'a> {
    /// Follows the naming convention; `digits` is the raw decimal text
    Glyph { digits: &'a str, format: SourceFormat },
    /// Anything else (other files, folders, unsupported extensions)
    Other,
}

/// Classify an archive entry name.
///
/// Only the last path component is inspected so entries stored inside
/// folders are still recognized.
pub fn parse_entry_name(name: &str) -> EntryName<'_> {
    if name.ends_with('/') || name.ends_with('\\') {
        return EntryName::Other;
    }
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return EntryName::Other;
    };
    let Some(format) = SourceFormat::from_extension(ext) else {
        return EntryName::Other;
    };
    let Some(digits) = stem.strip_prefix(GLYPH_NAME_PREFIX) else {
        return EntryName::Other;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return EntryName::Other;
    }

    EntryName::Glyph { digits, format }
}
