//! name table

use glyphpress_core::config::DEFAULT_SUBFAMILY_NAME;
use write_fonts::{
    tables::name::{Name, NameRecord},
    types::NameId,
};

/// `(platform, encoding, language)` for every string: Unicode BMP, then
/// Windows Unicode BMP / US English.
const PLATFORMS: [(u16, u16, u16); 2] = [(0, 3, 0), (3, 1, 0x409)];

const VERSION: &str = "Version 1.000";

/// PostScript names are limited to 63 printable ASCII characters.
const MAX_POSTSCRIPT_NAME: usize = 63;

/// Naming strings by name ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FontNames {
    pub family: String,
    pub subfamily: String,
    pub full_name: String,
    pub postscript_name: String,
}

impl FontNames {
    pub fn new(family: &str) -> Self {
        let family = family.trim().to_string();
        let subfamily = DEFAULT_SUBFAMILY_NAME.to_string();
        let full_name = format!("{family} {subfamily}");
        let postscript_name = postscript_name(&family, &subfamily);
        Self { family, subfamily, full_name, postscript_name }
    }

    fn entries(&self) -> [(u16, String); 6] {
        [
            (1, self.family.clone()),
            (2, self.subfamily.clone()),
            (3, format!("{VERSION};NONE;{}", self.postscript_name)),
            (4, self.full_name.clone()),
            (5, VERSION.to_string()),
            (6, self.postscript_name.clone()),
        ]
    }
}

/// `{family}-{style}` with spaces and PostScript delimiters removed
fn postscript_name(family: &str, style: &str) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_ascii_graphic() && !"[](){}<>/%".contains(*c))
            .collect()
    };
    let family = match clean(family) {
        f if f.is_empty() => "Untitled".to_string(),
        f => f,
    };
    let mut name = format!("{family}-{}", clean(style));
    name.truncate(MAX_POSTSCRIPT_NAME);
    name
}

pub(crate) fn build_name(names: &FontNames) -> Name {
    let mut records = Vec::new();
    for (platform, encoding, language) in PLATFORMS {
        for (id, string) in names.entries() {
            records.push(NameRecord::new(platform, encoding, language, NameId::new(id), string.into()));
        }
    }
    Name::new(records)
}
