//! Configuration constants for glyphpress builds.

/// Default em size of the generated font.
pub const DEFAULT_UNITS_PER_EM: u16 = 1000;

/// Smallest units-per-em value the `head` table allows.
pub const MIN_UNITS_PER_EM: u16 = 16;

/// Largest units-per-em value the `head` table allows.
pub const MAX_UNITS_PER_EM: u16 = 16384;

/// Maximum distance, in font units, between a source curve and its quadratic
/// approximation (rounding included).
pub const DEFAULT_OUTLINE_TOLERANCE: f64 = 1.0;

/// Fraction of the em added to the outline width when a glyph carries no
/// explicit advance.
pub const DEFAULT_SIDE_BEARING_FRACTION: f64 = 0.1;

/// Fraction of the em below the baseline. Matches FontForge's 800/200 split.
pub const DESCENT_FRACTION: f64 = 0.2;

/// Family name written into the `name` table.
pub const DEFAULT_FAMILY_NAME: &str = "Handwriting";

/// Style name written into the `name` table.
pub const DEFAULT_SUBFAMILY_NAME: &str = "Regular";

/// Code points below this value are control characters.
pub const FIRST_PRINTABLE_CODE_POINT: u32 = 0x20;

/// Highest Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// File name suggested to clients downloading an artifact.
pub const SUGGESTED_FILENAME: &str = "generated_font.ttf";

/// Media type of the produced artifact.
pub const CONTENT_TYPE: &str = "font/ttf";

/// File name prefix every glyph source entry must carry.
pub const GLYPH_NAME_PREFIX: &str = "glyph_";

/// Extensions of vector outline sources.
pub const VECTOR_EXTENSIONS: &[&str] = &["svg"];

/// Extensions of raster sources (recognized, but not importable).
pub const RASTER_EXTENSIONS: &[&str] = &["png", "bmp", "jpg", "jpeg", "pbm", "pgm"];
