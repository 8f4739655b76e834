//! OS/2 table

use glyphpress_core::Codepoint;
use write_fonts::{
    tables::os2::{Os2, SelectionFlags},
    types::Tag,
};

use crate::glyph_order::GlyphOrder;

const WEIGHT_REGULAR: u16 = 400;
const WIDTH_MEDIUM: u16 = 5;

/// `ulUnicodeRange` bits for the Latin blocks, as `(bit, first, last)`
const UNICODE_RANGES: &[(u32, u32, u32)] = &[
    (0, 0x0000, 0x007F),
    (1, 0x0080, 0x00FF),
    (2, 0x0100, 0x017F),
    (3, 0x0180, 0x024F),
];

/// Bit 57: any code point beyond the BMP
const NON_PLANE_0_BIT: u32 = 57;

/// Code page bit 0: Latin 1
const CODE_PAGE_LATIN_1: u32 = 1;

/// Vertical metrics shared with `hhea`
#[derive(Debug, Clone, Copy)]
pub(crate) struct VerticalMetrics {
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
}

/// Build a version 4 `OS/2` table.
pub(crate) fn build_os2(order: &GlyphOrder, metrics: VerticalMetrics) -> Os2 {
    let em = |fraction: f64| (f64::from(metrics.units_per_em) * fraction).round() as i16;
    let code_points: Vec<u32> = order.iter().filter_map(|g| g.code_point).map(u32::from).collect();
    let bbox = order.font_bbox();
    let [range_1, range_2, range_3, range_4] = unicode_ranges(&code_points);

    Os2 {
        x_avg_char_width: average_advance(order),
        us_weight_class: WEIGHT_REGULAR,
        us_width_class: WIDTH_MEDIUM,
        fs_type: 0,
        y_subscript_x_size: em(0.65),
        y_subscript_y_size: em(0.6),
        y_subscript_x_offset: 0,
        y_subscript_y_offset: em(0.075),
        y_superscript_x_size: em(0.65),
        y_superscript_y_size: em(0.6),
        y_superscript_x_offset: 0,
        y_superscript_y_offset: em(0.35),
        y_strikeout_size: em(0.05),
        y_strikeout_position: em(0.3),
        s_family_class: 0,
        panose_10: [0; 10],
        ul_unicode_range_1: range_1,
        ul_unicode_range_2: range_2,
        ul_unicode_range_3: range_3,
        ul_unicode_range_4: range_4,
        ach_vend_id: Tag::new(b"NONE"),
        fs_selection: SelectionFlags::REGULAR,
        us_first_char_index: code_points.first().map_or(0, |&cp| bmp_index(cp)),
        us_last_char_index: code_points.last().map_or(0, |&cp| bmp_index(cp)),
        s_typo_ascender: metrics.ascent,
        s_typo_descender: -metrics.descent,
        s_typo_line_gap: 0,
        us_win_ascent: metrics.ascent.max(bbox.y_max).max(0) as u16,
        us_win_descent: metrics.descent.max(bbox.y_min.saturating_neg()).max(0) as u16,
        ul_code_page_range_1: Some(if code_points.iter().any(|&cp| cp <= 0xFF) {
            CODE_PAGE_LATIN_1
        } else {
            0
        }),
        ul_code_page_range_2: Some(0),
        sx_height: Some(glyph_top(order, 'x')),
        s_cap_height: Some(glyph_top(order, 'H')),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    }
}

/// Mean advance over glyphs with a non-zero advance
fn average_advance(order: &GlyphOrder) -> i16 {
    let advances: Vec<u32> =
        order.iter().map(|g| u32::from(g.advance)).filter(|&a| a > 0).collect();
    if advances.is_empty() {
        return 0;
    }
    let mean = advances.iter().sum::<u32>() as f64 / advances.len() as f64;
    mean.round().min(f64::from(i16::MAX)) as i16
}

fn bmp_index(cp: u32) -> u16 {
    u16::try_from(cp).unwrap_or(u16::MAX)
}

fn unicode_ranges(code_points: &[u32]) -> [u32; 4] {
    let mut ranges = [0u32; 4];
    let mut set = |bit: u32| ranges[(bit / 32) as usize] |= 1 << (bit % 32);
    for &(bit, first, last) in UNICODE_RANGES {
        if code_points.iter().any(|cp| (first..=last).contains(cp)) {
            set(bit);
        }
    }
    if code_points.iter().any(|&cp| cp > 0xFFFF) {
        set(NON_PLANE_0_BIT);
    }
    ranges
}

/// Top of the outline drawn for `ch`, or zero when absent
fn glyph_top(order: &GlyphOrder, ch: char) -> i16 {
    let cp = Codepoint::from(ch);
    order
        .iter()
        .find(|g| g.code_point == Some(cp) && !g.is_empty())
        .map_or(0, |g| g.bbox.y_max)
}
