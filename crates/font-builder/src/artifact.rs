//! The assembled font and its manifest

use chrono::{DateTime, Utc};
use glyphpress_core::config::{CONTENT_TYPE, SUGGESTED_FILENAME};
use read_fonts::FontRef;
use write_fonts::types::Tag;

use crate::Result;

/// One entry of the sfnt table directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

/// A finished font file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontArtifact {
    bytes: Vec<u8>,
    table_directory: Vec<TableRecord>,
    glyph_count: u16,
    units_per_em: u16,
    generation_timestamp: DateTime<Utc>,
}

impl FontArtifact {
    /// Wrap finished font bytes, reading the manifest back from them.
    pub(crate) fn from_bytes(
        bytes: Vec<u8>,
        glyph_count: u16,
        units_per_em: u16,
        generation_timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        let table_directory = FontRef::new(&bytes)?
            .table_directory
            .table_records()
            .iter()
            .map(|record| TableRecord {
                tag: record.tag(),
                checksum: record.checksum(),
                offset: record.offset(),
                length: record.length(),
            })
            .collect();
        Ok(Self { bytes, table_directory, glyph_count, units_per_em, generation_timestamp })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Table records, sorted by tag
    pub fn table_directory(&self) -> &[TableRecord] {
        &self.table_directory
    }

    pub fn table(&self, tag: Tag) -> Option<&TableRecord> {
        self.table_directory.iter().find(|record| record.tag == tag)
    }

    /// Number of glyphs, `.notdef` included
    pub fn glyph_count(&self) -> u16 {
        self.glyph_count
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn generation_timestamp(&self) -> DateTime<Utc> {
        self.generation_timestamp
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    pub fn suggested_filename(&self) -> &'static str {
        SUGGESTED_FILENAME
    }
}
