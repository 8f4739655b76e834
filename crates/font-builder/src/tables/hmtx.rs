//! hmtx table

use write_fonts::tables::hmtx::{Hmtx, LongMetric};

use crate::glyph_order::GlyphOrder;

/// One long metric per glyph; the side bearing of a blank glyph is zero.
pub(crate) fn build_hmtx(order: &GlyphOrder) -> Hmtx {
    let h_metrics = order
        .iter()
        .map(|glyph| LongMetric {
            advance: glyph.advance,
            side_bearing: if glyph.is_empty() { 0 } else { glyph.bbox.x_min },
        })
        .collect();
    Hmtx { h_metrics, left_side_bearings: Vec::new() }
}
