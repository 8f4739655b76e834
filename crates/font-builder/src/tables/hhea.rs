//! hhea table

use write_fonts::{
    tables::hhea::Hhea,
    types::{FWord, UfWord},
};

use crate::glyph_order::GlyphOrder;

/// Horizontal extremes over all glyphs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HorizontalExtents {
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
}

impl HorizontalExtents {
    /// Side bearings and extents only consider glyphs with outlines.
    pub fn measure(order: &GlyphOrder) -> Self {
        let advance_width_max = order.iter().map(|g| g.advance).max().unwrap_or(0);
        let mut outlined = order.outlined().peekable();
        if outlined.peek().is_none() {
            return Self { advance_width_max, ..Self::default() };
        }

        let (mut min_lsb, mut min_rsb, mut max_extent) = (i32::MAX, i32::MAX, i32::MIN);
        for glyph in outlined {
            let x_min = i32::from(glyph.bbox.x_min);
            let x_max = i32::from(glyph.bbox.x_max);
            min_lsb = min_lsb.min(x_min);
            min_rsb = min_rsb.min(i32::from(glyph.advance) - x_max);
            max_extent = max_extent.max(x_max);
        }

        Self {
            advance_width_max,
            min_left_side_bearing: saturate(min_lsb),
            min_right_side_bearing: saturate(min_rsb),
            x_max_extent: saturate(max_extent),
        }
    }
}

fn saturate(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Build `hhea` with one long metric per glyph.
pub(crate) fn build_hhea(order: &GlyphOrder, ascent: i16, descent: i16) -> Hhea {
    let extents = HorizontalExtents::measure(order);
    Hhea {
        ascender: FWord::new(ascent),
        descender: FWord::new(-descent),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(extents.advance_width_max),
        min_left_side_bearing: FWord::new(extents.min_left_side_bearing),
        min_right_side_bearing: FWord::new(extents.min_right_side_bearing),
        x_max_extent: FWord::new(extents.x_max_extent),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: order.num_glyphs(),
    }
}

#[cfg(test)]
mod tests {
    use glyphpress_core::{Codepoint, CompileOptions, NormalizedGlyph};

    use super::*;

    #[test]
    fn test_extents_skip_blank_glyphs() {
        let space = NormalizedGlyph::empty(Codepoint::from(' '), 900);
        let order = GlyphOrder::new(&[space], &CompileOptions::default()).unwrap();
        let extents = HorizontalExtents::measure(&order);
        // Only `.notdef` has an outline: box 50..450 in a 500 advance.
        assert_eq!(
            extents,
            HorizontalExtents {
                advance_width_max: 900,
                min_left_side_bearing: 50,
                min_right_side_bearing: 50,
                x_max_extent: 450,
            }
        );
    }
}
