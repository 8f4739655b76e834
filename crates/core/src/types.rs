//! Domain types shared across the pipeline
//!
//! A [`GlyphSource`] is what the validator hands to the importer, and a
//! [`NormalizedGlyph`] is what the importer hands to the table builder.

use std::{
    fmt,
    fmt::{Display, Formatter},
};

use write_fonts::tables::glyf::{Bbox, Contour};

use crate::config::{MAX_CODE_POINT, RASTER_EXTENSIONS, VECTOR_EXTENSIONS};

/// A Unicode code point
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codepoint(u32);

impl Codepoint {
    /// Create a code point, returning `None` if the value is not a Unicode
    /// scalar value (above U+10FFFF or a surrogate).
    pub fn new(cp: u32) -> Option<Self> {
        (cp <= MAX_CODE_POINT && char::from_u32(cp).is_some()).then_some(Self(cp))
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    pub fn to_char(self) -> char {
        // Construction guarantees a scalar value.
        char::from_u32(self.0).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Production glyph name (`uniXXXX` in the BMP, `uXXXXX` above it).
    pub fn glyph_name(self) -> String {
        if self.0 <= 0xFFFF {
            format!("uni{:04X}", self.0)
        } else {
            format!("u{:05X}", self.0)
        }
    }
}

impl From<char> for Codepoint {
    fn from(ch: char) -> Self {
        Self(ch as u32)
    }
}

impl From<Codepoint> for u32 {
    fn from(cp: Codepoint) -> Self {
        cp.0
    }
}

impl Display for Codepoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

/// How a glyph source describes its shape
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Vector outline document (SVG)
    VectorOutline,
    /// Pixel image that would need tracing
    RasterTrace,
}

impl SourceFormat {
    /// Classify a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if VECTOR_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::VectorOutline)
        } else if RASTER_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::RasterTrace)
        } else {
            None
        }
    }
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::VectorOutline => f.write_str("vector outline"),
            Self::RasterTrace => f.write_str("raster image"),
        }
    }
}

/// One validated archive entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSource {
    code_point: Codepoint,
    entry_name: String,
    data: Vec<u8>,
    format: SourceFormat,
}

impl GlyphSource {
    pub fn new(
        code_point: Codepoint,
        entry_name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        format: SourceFormat,
    ) -> Self {
        Self { code_point, entry_name: entry_name.into(), data: data.into(), format }
    }

    pub fn code_point(&self) -> Codepoint {
        self.code_point
    }

    /// Archive entry name the source was read from
    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

/// A glyph outline in font units, ready for table assembly
///
/// Contours are closed TrueType contours (quadratic, on/off-curve points).
/// An empty contour list is a valid, blank glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedGlyph {
    pub code_point: Codepoint,
    pub contours: Vec<Contour>,
    pub advance_width: u16,
    pub bbox: Bbox,
}

impl NormalizedGlyph {
    /// Build a glyph, computing the bounding box from the contours.
    pub fn new(code_point: Codepoint, contours: Vec<Contour>, advance_width: u16) -> Self {
        let bbox = contours_bbox(&contours);
        Self { code_point, contours, advance_width, bbox }
    }

    /// A blank glyph that only advances the pen.
    pub fn empty(code_point: Codepoint, advance_width: u16) -> Self {
        Self::new(code_point, Vec::new(), advance_width)
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Left side bearing as stored in `hmtx` (equal to `x_min`).
    pub fn left_side_bearing(&self) -> i16 {
        self.bbox.x_min
    }

    /// Right side bearing (`advance - x_max`); zero for blank glyphs.
    pub fn right_side_bearing(&self) -> i32 {
        if self.is_empty() { 0 } else { i32::from(self.advance_width) - i32::from(self.bbox.x_max) }
    }
}

fn contours_bbox(contours: &[Contour]) -> Bbox {
    let mut points = contours.iter().flat_map(Contour::iter);
    let Some(first) = points.next() else {
        return Bbox::default();
    };
    points.fold(
        Bbox { x_min: first.x, y_min: first.y, x_max: first.x, y_max: first.y },
        |bbox, p| Bbox {
            x_min: bbox.x_min.min(p.x),
            y_min: bbox.y_min.min(p.y),
            x_max: bbox.x_max.max(p.x),
            y_max: bbox.y_max.max(p.y),
        },
    )
}

#[cfg(test)]
mod tests {
    use read_fonts::tables::glyf::CurvePoint;

    use super::*;

    #[test]
    fn test_codepoint() {
        let cp = Codepoint::new(0x0041).unwrap();
        assert_eq!(cp.to_char(), 'A');
        assert_eq!(format!("{}", cp), "U+0041");
        assert_eq!(cp.glyph_name(), "uni0041");
        assert_eq!(Codepoint::new(0x1F600).unwrap().glyph_name(), "u1F600");
    }

    #[test]
    fn test_codepoint_rejects_non_scalar() {
        assert!(Codepoint::new(0x110000).is_none());
        assert!(Codepoint::new(0xD800).is_none());
        assert!(Codepoint::new(0x10FFFF).is_some());
    }

    #[test]
    fn test_source_format_from_extension() {
        assert_eq!(SourceFormat::from_extension("SVG"), Some(SourceFormat::VectorOutline));
        assert_eq!(SourceFormat::from_extension("png"), Some(SourceFormat::RasterTrace));
        assert_eq!(SourceFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_normalized_glyph_bbox() {
        let contour: Contour = vec![
            CurvePoint::new(50, -10, true),
            CurvePoint::new(50, 700, true),
            CurvePoint::new(300, 720, false),
            CurvePoint::new(450, 0, true),
        ]
        .into();
        let glyph = NormalizedGlyph::new(Codepoint::from('A'), vec![contour], 550);
        assert_eq!(glyph.bbox, Bbox { x_min: 50, y_min: -10, x_max: 450, y_max: 720 });
        assert_eq!(glyph.point_count(), 4);
        assert_eq!(glyph.left_side_bearing(), 50);
        assert_eq!(glyph.right_side_bearing(), 100);
    }

    #[test]
    fn test_empty_glyph() {
        let glyph = NormalizedGlyph::empty(Codepoint::from(' '), 250);
        assert!(glyph.is_empty());
        assert_eq!(glyph.bbox, Bbox::default());
        assert_eq!(glyph.right_side_bearing(), 0);
    }
}
