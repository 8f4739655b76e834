//! SVG document parsing
//!
//! Collects the filled geometry of a document as kurbo paths in viewBox
//! coordinates. Only the subset of SVG that tracers and outline editors emit
//! is understood: basic shapes, groups, and `transform` attributes.

use kurbo::{Affine, BezPath, Circle, Ellipse, Point, Rect, RoundedRect, Shape};
use log::debug;
use roxmltree::{Document, Node, ParsingOptions};

use crate::{ImportError, Result};

/// Accuracy used when basic shapes are expanded into Béziers, in source units
const SHAPE_ACCURACY: f64 = 0.01;

/// Elements whose subtrees never paint directly
const NON_RENDERING: &[&str] = &[
    "defs", "clipPath", "mask", "symbol", "pattern", "marker", "linearGradient",
    "radialGradient", "title", "desc", "metadata", "style", "script",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// How overlapping subpaths of one element combine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// One painted shape element
#[derive(Debug)]
pub(crate) struct FilledPath {
    /// Geometry with element transforms applied
    pub path: BezPath,
    pub rule: FillRule,
}

/// Filled geometry of one SVG document
#[derive(Debug)]
pub(crate) struct SvgOutline {
    pub view_box: ViewBox,
    /// `horiz-adv-x` on the root element, in viewBox units
    pub advance: Option<f64>,
    pub paths: Vec<FilledPath>,
}

pub(crate) fn parse_svg(text: &str) -> Result<SvgOutline> {
    let options = ParsingOptions { allow_dtd: true, ..ParsingOptions::default() };
    let doc = Document::parse_with_options(text, options)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(ImportError::NotSvg(root.tag_name().name().to_string()));
    }

    let view_box = root
        .attribute("viewBox")
        .and_then(parse_view_box)
        .or_else(|| {
            let width = root.attribute("width").and_then(parse_length)?;
            let height = root.attribute("height").and_then(parse_length)?;
            (width > 0.0 && height > 0.0)
                .then_some(ViewBox { min_x: 0.0, min_y: 0.0, width, height })
        })
        .ok_or(ImportError::MissingViewBox)?;

    let advance = root.attribute("horiz-adv-x").and_then(parse_number);

    let mut paths = Vec::new();
    let root_transform = element_transform(root)?;
    collect_children(root, root_transform, Paint::from_node(root, Paint::default()), &mut paths)?;
    debug!("Collected {} filled paths", paths.len());

    Ok(SvgOutline { view_box, advance, paths })
}

/// Inherited fill state of the current element
#[derive(Clone, Copy)]
struct Paint {
    filled: bool,
    rule: FillRule,
}

impl Default for Paint {
    fn default() -> Self {
        Self { filled: true, rule: FillRule::NonZero }
    }
}

impl Paint {
    fn from_node(node: Node, inherited: Paint) -> Self {
        let property = |name| style_property(node, name).or_else(|| node.attribute(name));
        let filled = match property("fill").map(str::trim) {
            Some("none") => false,
            Some(_) => true,
            None => inherited.filled,
        };
        let rule = match property("fill-rule").map(str::trim) {
            Some("evenodd") => FillRule::EvenOdd,
            Some("nonzero") => FillRule::NonZero,
            _ => inherited.rule,
        };
        Self { filled, rule }
    }
}

fn collect_children(
    parent: Node,
    transform: Affine,
    paint: Paint,
    out: &mut Vec<FilledPath>,
) -> Result<()> {
    for node in parent.children().filter(Node::is_element) {
        let name = node.tag_name().name();
        if NON_RENDERING.contains(&name) || is_hidden(node) {
            continue;
        }

        let transform = transform * element_transform(node)?;
        let paint = Paint::from_node(node, paint);

        if let Some(mut path) = shape_path(node)? {
            if paint.filled {
                path.apply_affine(transform);
                out.push(FilledPath { path, rule: paint.rule });
            }
            continue;
        }

        collect_children(node, transform, paint, out)?;
    }
    Ok(())
}

fn is_hidden(node: Node) -> bool {
    let display = style_property(node, "display").or_else(|| node.attribute("display"));
    let visibility = style_property(node, "visibility").or_else(|| node.attribute("visibility"));
    display.is_some_and(|v| v.trim() == "none")
        || visibility.is_some_and(|v| matches!(v.trim(), "hidden" | "collapse"))
}

fn style_property<'a>(node: Node<'a, '_>, property: &str) -> Option<&'a str> {
    node.attribute("style")?
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(name, _)| name.trim() == property)
        .map(|(_, value)| value)
}

fn element_transform(node: Node) -> Result<Affine> {
    match node.attribute("transform") {
        Some(value) => parse_transform(value),
        None => Ok(Affine::IDENTITY),
    }
}

/// Geometry of a basic shape element, or `None` for containers and
/// unknown elements.
fn shape_path(node: Node) -> Result<Option<BezPath>> {
    let name = node.tag_name().name();
    let number = |attr: &str| node.attribute(attr).and_then(parse_length).unwrap_or(0.0);
    let geometry_error = |message: String| ImportError::Geometry {
        element: name.to_string(),
        message,
    };

    let path = match name {
        "path" => {
            let Some(d) = node.attribute("d") else {
                return Ok(Some(BezPath::new()));
            };
            BezPath::from_svg(d).map_err(|e| geometry_error(e.to_string()))?
        }
        "polygon" | "polyline" => {
            let points = parse_numbers(node.attribute("points").unwrap_or_default())
                .ok_or_else(|| geometry_error("bad number in points".to_string()))?;
            let mut path = BezPath::new();
            for (i, pair) in points.chunks_exact(2).enumerate() {
                let p = Point::new(pair[0], pair[1]);
                if i == 0 { path.move_to(p) } else { path.line_to(p) }
            }
            path.close_path();
            path
        }
        "rect" => {
            let (x, y) = (number("x"), number("y"));
            let (width, height) = (number("width"), number("height"));
            if width <= 0.0 || height <= 0.0 {
                return Ok(Some(BezPath::new()));
            }
            let rect = Rect::new(x, y, x + width, y + height);
            let radius = node
                .attribute("rx")
                .or_else(|| node.attribute("ry"))
                .and_then(parse_length)
                .unwrap_or(0.0)
                .min(width / 2.0)
                .min(height / 2.0);
            if radius > 0.0 {
                RoundedRect::from_rect(rect, radius).to_path(SHAPE_ACCURACY)
            } else {
                rect.to_path(SHAPE_ACCURACY)
            }
        }
        "circle" => {
            let r = number("r");
            if r <= 0.0 {
                return Ok(Some(BezPath::new()));
            }
            Circle::new((number("cx"), number("cy")), r).to_path(SHAPE_ACCURACY)
        }
        "ellipse" => {
            let (rx, ry) = (number("rx"), number("ry"));
            if rx <= 0.0 || ry <= 0.0 {
                return Ok(Some(BezPath::new()));
            }
            Ellipse::new((number("cx"), number("cy")), (rx, ry), 0.0).to_path(SHAPE_ACCURACY)
        }
        _ => return Ok(None),
    };
    Ok(Some(path))
}

pub(crate) fn parse_view_box(value: &str) -> Option<ViewBox> {
    let nums = parse_numbers(value)?;
    let [min_x, min_y, width, height] = nums[..] else {
        return None;
    };
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    Some(ViewBox { min_x, min_y, width, height })
}

/// Parse a length in user units. Absolute units are accepted and their
/// suffix ignored, since only the ratio to the viewBox matters; percentages
/// have no meaning without a viewport.
pub(crate) fn parse_length(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.ends_with('%') {
        return None;
    }
    let end = trimmed
        .char_indices()
        .take_while(|(_, ch)| matches!(ch, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
        .last()
        .map(|(idx, ch)| idx + ch.len_utf8())?;
    let unit = trimmed[end..].trim();
    if !matches!(unit, "" | "px" | "pt" | "pc" | "mm" | "cm" | "in") {
        return None;
    }
    parse_number(&trimmed[..end])
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Comma/whitespace separated numbers; `None` if any item is not a number.
fn parse_numbers(value: &str) -> Option<Vec<f64>> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_number)
        .collect()
}

/// Parse an SVG `transform` list into a single affine.
pub(crate) fn parse_transform(value: &str) -> Result<Affine> {
    let mut result = Affine::IDENTITY;
    let mut rest = value.trim();

    while !rest.is_empty() {
        let (name, tail) = rest
            .split_once('(')
            .ok_or_else(|| ImportError::Transform(value.to_string()))?;
        let (args, tail) = tail
            .split_once(')')
            .ok_or_else(|| ImportError::Transform(value.to_string()))?;
        let args = parse_numbers(args).ok_or_else(|| ImportError::Transform(value.to_string()))?;

        let transform = match (name.trim(), args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Affine::new([a, b, c, d, e, f]),
            ("translate", &[tx]) => Affine::translate((tx, 0.0)),
            ("translate", &[tx, ty]) => Affine::translate((tx, ty)),
            ("scale", &[s]) => Affine::scale(s),
            ("scale", &[sx, sy]) => Affine::scale_non_uniform(sx, sy),
            ("rotate", &[angle]) => Affine::rotate(angle.to_radians()),
            ("rotate", &[angle, cx, cy]) => {
                Affine::translate((cx, cy))
                    * Affine::rotate(angle.to_radians())
                    * Affine::translate((-cx, -cy))
            }
            ("skewX", &[angle]) => Affine::new([1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0]),
            ("skewY", &[angle]) => Affine::new([1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0]),
            _ => return Err(ImportError::Transform(value.to_string())),
        };
        result *= transform;
        rest = tail.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    }

    Ok(result)
}
