use chrono::Utc;
use glyphpress_core::{CompileOptions, NormalizedGlyph};
use log::{debug, info};
use write_fonts::{FontBuilder, dump_table, types::Tag};

use crate::{
    AssembleError, FontArtifact, Result,
    glyph_order::GlyphOrder,
    tables::{
        cmap::build_cmap,
        glyf::{build_glyf_loca, index_to_loc_format},
        head::build_head,
        hhea::build_hhea,
        hmtx::build_hmtx,
        maxp::build_maxp,
        name::{FontNames, build_name},
        os2::{VerticalMetrics, build_os2},
        post::build_post,
    },
};

const GLYF: Tag = Tag::new(b"glyf");

/// Assemble a complete TrueType font from normalized glyphs.
///
/// Options are expected to have been validated. An empty slice still yields
/// a valid font holding only `.notdef`. If two glyphs share a code point the
/// first one is used.
pub fn assemble(glyphs: &[NormalizedGlyph], options: &CompileOptions) -> Result<FontArtifact> {
    let order = GlyphOrder::new(glyphs, options)?;
    let timestamp = options.timestamp.unwrap_or_else(Utc::now);
    let (ascent, descent) = (options.ascent(), options.descent());

    let (glyf, loca, loca_format) = build_glyf_loca(&order)?;
    let glyf = dump_table(&glyf)?;
    if u32::try_from(glyf.len()).is_err() {
        return Err(AssembleError::DataTooLarge { what: "glyph data", bytes: glyf.len() });
    }
    debug!("glyf: {} bytes, {:?} loca", glyf.len(), loca_format);

    let head = build_head(&order, options.units_per_em, timestamp, index_to_loc_format(loca_format));
    let hhea = build_hhea(&order, ascent, descent);
    let hmtx = build_hmtx(&order);
    let maxp = build_maxp(&order);
    let cmap = build_cmap(&order)?;
    let name = build_name(&FontNames::new(&options.family_name));
    let os2 = build_os2(&order, VerticalMetrics { units_per_em: options.units_per_em, ascent, descent });
    let post = build_post(&order, options.units_per_em);

    let mut builder = FontBuilder::new();
    builder.add_table(&head)?;
    builder.add_table(&hhea)?;
    builder.add_table(&hmtx)?;
    builder.add_table(&maxp)?;
    builder.add_table(&cmap)?;
    builder.add_table(&loca)?;
    builder.add_table(&name)?;
    builder.add_table(&os2)?;
    builder.add_table(&post)?;
    builder.add_raw(GLYF, glyf);

    let bytes = builder.build();
    if u32::try_from(bytes.len()).is_err() {
        return Err(AssembleError::DataTooLarge { what: "font data", bytes: bytes.len() });
    }

    info!("Assembled {} glyphs into {} bytes", order.len(), bytes.len());
    FontArtifact::from_bytes(bytes, order.num_glyphs(), options.units_per_em, timestamp)
}
