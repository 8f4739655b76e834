//! cmap table

use write_fonts::{
    tables::cmap::{Cmap, Cmap12, CmapSubtable, EncodingRecord, PlatformId},
    types::GlyphId,
};

use crate::{Result, glyph_order::GlyphOrder};

/// Unicode full repertoire encoding on the Windows platform
const WINDOWS_UCS4: u16 = 10;

/// Build the character map.
///
/// BMP code points get format 4 subtables under (0,3) and (3,1); format 12
/// subtables under (0,4) and (3,10) are added when any code point lies
/// beyond the BMP. A font mapping nothing keeps an empty format 12 table.
pub(crate) fn build_cmap(order: &GlyphOrder) -> Result<Cmap> {
    let mappings: Vec<(char, GlyphId)> = order
        .mapped()
        .map(|(cp, gid)| (cp.to_char(), GlyphId::new(gid)))
        .collect();
    if mappings.is_empty() {
        let empty = Cmap12 { language: 0, groups: Vec::new() };
        return Ok(Cmap::new(vec![EncodingRecord::new(
            PlatformId::Windows,
            WINDOWS_UCS4,
            CmapSubtable::Format12(empty),
        )]));
    }
    Ok(Cmap::from_mappings(mappings)?)
}

#[cfg(test)]
mod tests {
    use glyphpress_core::{Codepoint, CompileOptions, NormalizedGlyph};

    use super::*;

    fn order(code_points: &[u32]) -> GlyphOrder {
        let glyphs: Vec<NormalizedGlyph> = code_points
            .iter()
            .map(|&cp| NormalizedGlyph::empty(Codepoint::new(cp).unwrap(), 500))
            .collect();
        GlyphOrder::new(&glyphs, &CompileOptions::default()).unwrap()
    }

    fn records(cmap: &Cmap) -> Vec<(u16, u16, u16)> {
        cmap.encoding_records
            .iter()
            .map(|record| {
                let format = match &*record.subtable {
                    CmapSubtable::Format4(_) => 4,
                    CmapSubtable::Format12(_) => 12,
                    _ => 0,
                };
                (record.platform_id as u16, record.encoding_id, format)
            })
            .collect()
    }

    #[test]
    fn test_bmp_only_uses_format_4() {
        let cmap = build_cmap(&order(&[0x41, 0x42, 0x61])).unwrap();
        assert_eq!(records(&cmap), vec![(0, 3, 4), (3, 1, 4)]);
    }

    #[test]
    fn test_supplementary_adds_format_12() {
        let cmap = build_cmap(&order(&[0x41, 0x1F600])).unwrap();
        assert_eq!(records(&cmap), vec![(0, 3, 4), (0, 4, 12), (3, 1, 4), (3, 10, 12)]);
    }

    #[test]
    fn test_empty_mapping() {
        let cmap = build_cmap(&order(&[])).unwrap();
        assert_eq!(records(&cmap), vec![(3, 10, 12)]);
    }
}
