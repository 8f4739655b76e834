//! maxp table

use write_fonts::tables::maxp::Maxp;

use crate::glyph_order::GlyphOrder;

/// Build a version 1.0 `maxp` for unhinted simple glyphs.
pub(crate) fn build_maxp(order: &GlyphOrder) -> Maxp {
    let max_points = order.iter().map(|g| g.point_count()).max().unwrap_or(0);
    let max_contours = order.iter().map(|g| g.contours.len()).max().unwrap_or(0);

    Maxp {
        num_glyphs: order.num_glyphs(),
        max_points: Some(u16::try_from(max_points).unwrap_or(u16::MAX)),
        max_contours: Some(u16::try_from(max_contours).unwrap_or(u16::MAX)),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    }
}
