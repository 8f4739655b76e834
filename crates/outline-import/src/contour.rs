//! Quadratic contour conversion and winding normalization

use kurbo::{BezPath, CubicBez, PathEl, Point};
use log::trace;
use read_fonts::tables::glyf::CurvePoint;
use write_fonts::tables::glyf::{Contour, SimpleGlyph};

use crate::{ImportError, Result};

/// Convert font-unit paths into TrueType contours.
///
/// Cubic segments are approximated by quadratic splines within
/// `tolerance / 2`, leaving the other half of the budget to integer rounding.
/// Subpaths that are not drawable (no move, or a single point) are skipped.
pub(crate) fn to_contours(paths: &[BezPath], tolerance: f64) -> Result<Vec<Contour>> {
    let mut contours = Vec::new();
    for path in paths {
        for subpath in split_subpaths(path) {
            let quadratic = to_quadratic(&subpath, tolerance / 2.0);
            check_range(&quadratic)?;
            match SimpleGlyph::from_bezpath(&quadratic) {
                Ok(glyph) => contours.extend(glyph.contours),
                Err(err) => trace!("Skipping subpath: {err:?}"),
            }
        }
    }
    Ok(contours)
}

/// Split a path at each `MoveTo`; elements before the first move are dropped.
fn split_subpaths(path: &BezPath) -> Vec<BezPath> {
    let mut subpaths: Vec<BezPath> = Vec::new();
    for el in path.elements() {
        match el {
            PathEl::MoveTo(_) => subpaths.push(BezPath::from_vec(vec![*el])),
            _ => {
                if let Some(current) = subpaths.last_mut() {
                    current.push(*el);
                }
            }
        }
    }
    subpaths
}

fn to_quadratic(path: &BezPath, accuracy: f64) -> BezPath {
    let mut out = BezPath::new();
    let mut start = Point::ORIGIN;
    let mut current = Point::ORIGIN;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.move_to(p);
                start = p;
                current = p;
            }
            PathEl::LineTo(p) => {
                out.line_to(p);
                current = p;
            }
            PathEl::QuadTo(p1, p2) => {
                out.quad_to(p1, p2);
                current = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                for (_, _, quad) in CubicBez::new(current, p1, p2, p3).to_quads(accuracy) {
                    out.quad_to(quad.p1, quad.p2);
                }
                current = p3;
            }
            PathEl::ClosePath => {
                out.close_path();
                current = start;
            }
        }
    }
    out
}

fn check_range(path: &BezPath) -> Result<()> {
    let range = f64::from(i16::MIN) - 0.5..f64::from(i16::MAX) + 0.5;
    let bbox = path.control_box();
    match [bbox.x0, bbox.y0, bbox.x1, bbox.y1].into_iter().find(|v| !range.contains(v)) {
        Some(value) => Err(ImportError::CoordinateOverflow(value)),
        None => Ok(()),
    }
}

/// Twice the signed area of the control polygon (positive = counter-clockwise
/// with y pointing up).
pub(crate) fn signed_area2(contour: &Contour) -> i64 {
    let points: Vec<&CurvePoint> = contour.iter().collect();
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y)
        })
        .sum()
}

/// Outcome of winding normalization
#[derive(Debug)]
pub(crate) enum Winding {
    /// Contours with outer boundaries clockwise
    Normalized(Vec<Contour>),
    /// Nothing drawable survived
    Degenerate,
}

/// Drop contours that enclose nothing and orient the rest so the glyph's
/// net winding is clockwise, the TrueType convention for filled area.
pub(crate) fn normalize_winding(contours: Vec<Contour>) -> Winding {
    let mut kept = Vec::with_capacity(contours.len());
    let mut net = 0i64;
    for contour in contours {
        let area = signed_area2(&contour);
        if contour.len() < 3 || area == 0 {
            trace!("Dropping contour with {} points and zero area", contour.len());
            continue;
        }
        net += area;
        kept.push(contour);
    }

    if kept.is_empty() || net == 0 {
        return Winding::Degenerate;
    }
    if net > 0 {
        kept = kept.into_iter().map(reverse).collect();
    }
    Winding::Normalized(kept)
}

/// Orient contours of an even-odd filled path for nonzero rendering.
///
/// A contour nested inside an odd number of others bounds a hole and is made
/// counter-clockwise; the rest are made clockwise.
pub(crate) fn orient_even_odd(contours: Vec<Contour>) -> Vec<Contour> {
    let depths: Vec<usize> = contours
        .iter()
        .enumerate()
        .map(|(i, contour)| {
            let Some(first) = contour.iter().next() else {
                return 0;
            };
            contours
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && encloses(other, first.x, first.y))
                .count()
        })
        .collect();

    contours
        .into_iter()
        .zip(depths)
        .map(|(contour, depth)| {
            let area = signed_area2(&contour);
            let flip = if depth % 2 == 0 { area > 0 } else { area < 0 };
            if flip { reverse(contour) } else { contour }
        })
        .collect()
}

/// Crossing-number test against the contour's control polygon
fn encloses(contour: &Contour, x: i16, y: i16) -> bool {
    let points: Vec<&CurvePoint> = contour.iter().collect();
    let (x, y) = (f64::from(x), f64::from(y));
    let n = points.len();
    let mut inside = false;
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        let (ax, ay, bx, by) = (f64::from(a.x), f64::from(a.y), f64::from(b.x), f64::from(b.y));
        if (ay > y) != (by > y) && x < ax + (y - ay) * (bx - ax) / (by - ay) {
            inside = !inside;
        }
    }
    inside
}

fn reverse(contour: Contour) -> Contour {
    let mut points: Vec<CurvePoint> = contour.into();
    points.reverse();
    points.into()
}

/// Translate every point horizontally.
pub(crate) fn shift_x(contours: Vec<Contour>, dx: i32) -> Result<Vec<Contour>> {
    contours
        .into_iter()
        .map(|contour| {
            let points: Vec<CurvePoint> = contour.into();
            points
                .into_iter()
                .map(|p| {
                    let x = i32::from(p.x) + dx;
                    let x = i16::try_from(x).map_err(|_| ImportError::CoordinateOverflow(f64::from(x)))?;
                    Ok(CurvePoint::new(x, p.y, p.on_curve))
                })
                .collect::<Result<Vec<_>>>()
                .map(Contour::from)
        })
        .collect()
}
