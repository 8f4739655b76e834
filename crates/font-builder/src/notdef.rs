//! The `.notdef` glyph

use read_fonts::tables::glyf::CurvePoint;
use write_fonts::tables::glyf::{Bbox, Contour};

use crate::glyph_order::{NOTDEF, OrderedGlyph};

/// Advance width of `.notdef` as a fraction of the em
const ADVANCE_FRACTION: f64 = 0.5;
/// Box height as a fraction of the em
const HEIGHT_FRACTION: f64 = 0.7;
/// Side bearing and stroke width as a fraction of the em
const STROKE_FRACTION: f64 = 0.05;

/// A hollow box: a clockwise outer rectangle with a counter-clockwise counter.
pub(crate) fn notdef_glyph(units_per_em: u16) -> OrderedGlyph {
    let em = f64::from(units_per_em);
    let advance = (em * ADVANCE_FRACTION).round() as u16;
    let stroke = ((em * STROKE_FRACTION).round() as i16).max(1);
    let height = (em * HEIGHT_FRACTION).round() as i16;

    let (x0, x1) = (stroke, advance as i16 - stroke);
    let (y0, y1) = (0, height);
    let outer = rectangle(x0, y0, x1, y1, true);
    let inner = rectangle(x0 + stroke, y0 + stroke, x1 - stroke, y1 - stroke, false);
    OrderedGlyph {
        name: NOTDEF.to_string(),
        code_point: None,
        contours: vec![outer, inner],
        bbox: Bbox { x_min: x0, y_min: y0, x_max: x1, y_max: y1 },
        advance,
    }
}

fn rectangle(x0: i16, y0: i16, x1: i16, y1: i16, clockwise: bool) -> Contour {
    let corners = if clockwise {
        [(x0, y0), (x0, y1), (x1, y1), (x1, y0)]
    } else {
        [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
    };
    corners
        .into_iter()
        .map(|(x, y)| CurvePoint::new(x, y, true))
        .collect::<Vec<_>>()
        .into()
}
