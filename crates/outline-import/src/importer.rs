use std::str;

use glyphpress_core::{CompileOptions, GlyphSource, NormalizedGlyph, SourceFormat};
use kurbo::Affine;
use log::{debug, warn};

use crate::{
    ImportError, Result,
    contour::{self, Winding},
    svg::{self, FillRule, ViewBox},
};

/// Non-fatal problems found while importing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportWarning {
    /// The outline encloses no area; the glyph was kept blank
    DegenerateOutline,
}

#[derive(Debug, Clone)]
pub struct ImportedGlyph {
    pub glyph: NormalizedGlyph,
    pub warnings: Vec<ImportWarning>,
}

/// Import one glyph source into font units.
///
/// The viewBox height is mapped onto the em with its bottom edge on the
/// descender line. Without an explicit `horiz-adv-x` the outline is centered
/// between equal side bearings.
pub fn import_glyph(source: &GlyphSource, options: &CompileOptions) -> Result<ImportedGlyph> {
    if source.format() != SourceFormat::VectorOutline {
        return Err(ImportError::UnsupportedFormat(source.format()));
    }

    let text = str::from_utf8(source.data())?;
    let outline = svg::parse_svg(text)?;
    let em = em_transform(outline.view_box, options);

    let mut contours = Vec::new();
    for filled in outline.paths {
        let mut path = filled.path;
        path.apply_affine(em);
        let converted = contour::to_contours(std::slice::from_ref(&path), options.outline_tolerance)?;
        match filled.rule {
            FillRule::EvenOdd => contours.extend(contour::orient_even_odd(converted)),
            FillRule::NonZero => contours.extend(converted),
        }
    }

    let scale = f64::from(options.units_per_em) / outline.view_box.height;
    let explicit_advance = outline.advance.map(|adv| to_advance(adv * scale)).transpose()?;
    let margin = options.side_bearing_margin();

    let (glyph, warnings) = match contour::normalize_winding(contours) {
        Winding::Degenerate => {
            warn!("{}: outline encloses no area, keeping a blank glyph", source.entry_name());
            let advance = explicit_advance.unwrap_or(margin);
            (
                NormalizedGlyph::empty(source.code_point(), advance),
                vec![ImportWarning::DegenerateOutline],
            )
        }
        Winding::Normalized(contours) => {
            let glyph = match explicit_advance {
                Some(advance) => NormalizedGlyph::new(source.code_point(), contours, advance),
                None => {
                    let placed = NormalizedGlyph::new(source.code_point(), contours, 0);
                    let lsb = i32::from(margin / 2);
                    let dx = lsb - i32::from(placed.bbox.x_min);
                    let width = i32::from(placed.bbox.x_max) - i32::from(placed.bbox.x_min);
                    let advance = to_advance(f64::from(width + i32::from(margin)))?;
                    let contours = contour::shift_x(placed.contours, dx)?;
                    NormalizedGlyph::new(source.code_point(), contours, advance)
                }
            };
            (glyph, Vec::new())
        }
    };

    debug!(
        "{}: {} contours, {} points, advance {}",
        source.entry_name(),
        glyph.contours.len(),
        glyph.point_count(),
        glyph.advance_width
    );
    Ok(ImportedGlyph { glyph, warnings })
}

/// Map viewBox coordinates (y down) onto font units (y up).
fn em_transform(view_box: ViewBox, options: &CompileOptions) -> Affine {
    let scale = f64::from(options.units_per_em) / view_box.height;
    let descent = f64::from(options.descent());
    Affine::new([
        scale,
        0.0,
        0.0,
        -scale,
        -view_box.min_x * scale,
        (view_box.min_y + view_box.height) * scale - descent,
    ])
}

fn to_advance(value: f64) -> Result<u16> {
    let rounded = value.round();
    if (0.0..=f64::from(u16::MAX)).contains(&rounded) {
        Ok(rounded as u16)
    } else {
        Err(ImportError::AdvanceOverflow(value))
    }
}
