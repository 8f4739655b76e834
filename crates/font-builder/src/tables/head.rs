//! head table

use chrono::{DateTime, Utc};
use write_fonts::{
    tables::head::{Flags, Head, MacStyle},
    types::{Fixed, LongDateTime},
};

use crate::glyph_order::GlyphOrder;

/// Baseline at y=0, left side bearing at x=0, integer ppem.
const HEAD_FLAGS: u16 = 0b1011;

const LOWEST_REC_PPEM: u16 = 8;

/// Seconds from 1904-01-01 to 1970-01-01
const MAC_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Build `head` with a zero checksum adjustment; the adjustment is written
/// once the whole file exists.
pub(crate) fn build_head(
    order: &GlyphOrder,
    units_per_em: u16,
    timestamp: DateTime<Utc>,
    index_to_loc_format: i16,
) -> Head {
    let bbox = order.font_bbox();
    let date = to_long_date_time(timestamp);
    Head::new(
        Fixed::from_f64(1.0),
        0,
        Flags::from_bits_truncate(HEAD_FLAGS),
        units_per_em,
        date,
        date,
        bbox.x_min,
        bbox.y_min,
        bbox.x_max,
        bbox.y_max,
        MacStyle::empty(),
        LOWEST_REC_PPEM,
        index_to_loc_format,
    )
}

/// Seconds since 1904-01-01T00:00:00Z
pub(crate) fn to_long_date_time(timestamp: DateTime<Utc>) -> LongDateTime {
    LongDateTime::new(timestamp.timestamp() + MAC_EPOCH_OFFSET)
}
