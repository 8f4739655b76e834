//! post table

use write_fonts::{tables::post::Post, types::FWord};

use crate::glyph_order::GlyphOrder;

/// Build a version 2.0 `post` carrying the glyph names.
pub(crate) fn build_post(order: &GlyphOrder, units_per_em: u16) -> Post {
    let names: Vec<&str> = order.iter().map(|g| g.name.as_str()).collect();
    let em = f64::from(units_per_em);

    let mut post = Post::new_v2(names);
    post.underline_position = FWord::new(-(em * 0.1).round() as i16);
    post.underline_thickness = FWord::new((em * 0.05).round() as i16);
    post.is_fixed_pitch = 0;
    post
}
