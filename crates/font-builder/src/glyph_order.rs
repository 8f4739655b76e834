//! Final glyph order: `.notdef` first, then ascending code points

use glyphpress_core::{Codepoint, CompileOptions, NormalizedGlyph};
use log::warn;
use write_fonts::tables::glyf::{Bbox, Contour, Glyph, SimpleGlyph};

use crate::{AssembleError, Result, notdef::notdef_glyph};

/// Glyph ids are 16-bit.
pub(crate) const MAX_GLYPHS: usize = u16::MAX as usize;

pub(crate) const NOTDEF: &str = ".notdef";

/// One glyph in its final position
#[derive(Debug, Clone)]
pub(crate) struct OrderedGlyph {
    pub name: String,
    pub code_point: Option<Codepoint>,
    pub contours: Vec<Contour>,
    pub bbox: Bbox,
    pub advance: u16,
}

impl OrderedGlyph {
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// `glyf` representation; blank glyphs have no data at all.
    pub fn to_glyf(&self) -> Glyph {
        if self.is_empty() {
            Glyph::Empty
        } else {
            Glyph::Simple(SimpleGlyph {
                bbox: self.bbox,
                contours: self.contours.clone(),
                instructions: Vec::new(),
            })
        }
    }
}

/// Glyphs indexed by glyph id
#[derive(Debug)]
pub(crate) struct GlyphOrder {
    glyphs: Vec<OrderedGlyph>,
}

impl GlyphOrder {
    pub fn new(glyphs: &[NormalizedGlyph], options: &CompileOptions) -> Result<Self> {
        let mut sorted: Vec<&NormalizedGlyph> = glyphs.iter().collect();
        // Stable, so the first of two equal code points stays first.
        sorted.sort_by_key(|g| g.code_point);
        sorted.dedup_by(|later, earlier| {
            let duplicate = later.code_point == earlier.code_point;
            if duplicate {
                warn!("Ignoring second glyph for {}", later.code_point);
            }
            duplicate
        });

        let count = sorted.len() + 1;
        if count > MAX_GLYPHS {
            return Err(AssembleError::TooManyGlyphs { count, max: MAX_GLYPHS });
        }

        let mut ordered = Vec::with_capacity(count);
        ordered.push(notdef_glyph(options.units_per_em));
        ordered.extend(sorted.into_iter().map(|glyph| OrderedGlyph {
            name: glyph.code_point.glyph_name(),
            code_point: Some(glyph.code_point),
            contours: glyph.contours.clone(),
            bbox: glyph.bbox,
            advance: glyph.advance_width,
        }));

        Ok(Self { glyphs: ordered })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of glyphs as stored in `maxp` and friends.
    pub fn num_glyphs(&self) -> u16 {
        // Bounded by MAX_GLYPHS in `new`.
        self.glyphs.len() as u16
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderedGlyph> {
        self.glyphs.iter()
    }

    /// Glyphs with outlines
    pub fn outlined(&self) -> impl Iterator<Item = &OrderedGlyph> {
        self.glyphs.iter().filter(|g| !g.is_empty())
    }

    /// `(code point, glyph id)` pairs in ascending order
    pub fn mapped(&self) -> impl Iterator<Item = (Codepoint, u32)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .filter_map(|(gid, g)| Some((g.code_point?, gid as u32)))
    }

    /// Union of all outlined glyph boxes (all zero if nothing is outlined)
    pub fn font_bbox(&self) -> Bbox {
        self.outlined()
            .map(|g| g.bbox)
            .reduce(|a, b| Bbox {
                x_min: a.x_min.min(b.x_min),
                y_min: a.y_min.min(b.y_min),
                x_max: a.x_max.max(b.x_max),
                y_max: a.y_max.max(b.y_max),
            })
            .unwrap_or_default()
    }
}
