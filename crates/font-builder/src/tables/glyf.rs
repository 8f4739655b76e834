//! glyf and loca tables

use write_fonts::tables::{
    glyf::{GlyfLocaBuilder, Glyf},
    loca::{Loca, LocaFormat},
};

use crate::{Result, glyph_order::GlyphOrder};

/// Encode every glyph in glyph id order.
pub(crate) fn build_glyf_loca(order: &GlyphOrder) -> Result<(Glyf, Loca, LocaFormat)> {
    let mut builder = GlyfLocaBuilder::new();
    for glyph in order.iter() {
        builder.add_glyph(&glyph.to_glyf())?;
    }
    Ok(builder.build())
}

/// `head.indexToLocFormat` value for a loca format
pub(crate) fn index_to_loc_format(format: LocaFormat) -> i16 {
    match format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    }
}
