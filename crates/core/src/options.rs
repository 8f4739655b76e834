//! Options for a font build

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{
    OptionsError, Result,
    config::{
        DEFAULT_FAMILY_NAME, DEFAULT_OUTLINE_TOLERANCE, DEFAULT_SIDE_BEARING_FRACTION,
        DEFAULT_UNITS_PER_EM, DESCENT_FRACTION, MAX_UNITS_PER_EM, MIN_UNITS_PER_EM,
    },
};

/// Options for compiling glyph sources into a font
///
/// Every stage reads its settings from here; nothing is process-global.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Size of the em square in font units
    pub units_per_em: u16,

    /// Maximum deviation, in font units, allowed when converting curves
    pub outline_tolerance: f64,

    /// Side-bearing margin as a fraction of the em
    pub side_bearing_fraction: f64,

    /// Family name written into the `name` table
    pub family_name: String,

    /// Upper bound on import threads (`None` = one per CPU core)
    pub max_workers: Option<usize>,

    /// Control code points (below U+0020) that are accepted anyway
    pub allowed_control_code_points: BTreeSet<u32>,

    /// Fixed generation timestamp for reproducible output (`None` = now)
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            units_per_em: DEFAULT_UNITS_PER_EM,
            outline_tolerance: DEFAULT_OUTLINE_TOLERANCE,
            side_bearing_fraction: DEFAULT_SIDE_BEARING_FRACTION,
            family_name: DEFAULT_FAMILY_NAME.to_string(),
            max_workers: None,
            allowed_control_code_points: BTreeSet::new(),
            timestamp: None,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    pub fn outline_tolerance(mut self, tolerance: f64) -> Self {
        self.outline_tolerance = tolerance;
        self
    }

    pub fn side_bearing_fraction(mut self, fraction: f64) -> Self {
        self.side_bearing_fraction = fraction;
        self
    }

    pub fn family_name(mut self, name: impl Into<String>) -> Self {
        self.family_name = name.into();
        self
    }

    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Accept control code points (accepts any iterable of values)
    pub fn allow_control_code_points(mut self, code_points: impl IntoIterator<Item = u32>) -> Self {
        self.allowed_control_code_points.extend(code_points);
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Check every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_UNITS_PER_EM..=MAX_UNITS_PER_EM).contains(&self.units_per_em) {
            return Err(OptionsError::UnitsPerEm {
                min: MIN_UNITS_PER_EM,
                max: MAX_UNITS_PER_EM,
                actual: self.units_per_em,
            });
        }
        if !(self.outline_tolerance.is_finite() && self.outline_tolerance > 0.0) {
            return Err(OptionsError::Tolerance(self.outline_tolerance));
        }
        if !(0.0..=1.0).contains(&self.side_bearing_fraction) {
            return Err(OptionsError::SideBearing(self.side_bearing_fraction));
        }
        if self.family_name.trim().is_empty() {
            return Err(OptionsError::EmptyFamilyName);
        }
        if self.max_workers == Some(0) {
            return Err(OptionsError::NoWorkers);
        }
        Ok(())
    }

    /// Check if a control code point was whitelisted
    pub fn allows_control(&self, cp: u32) -> bool {
        self.allowed_control_code_points.contains(&cp)
    }

    /// Distance from the baseline to the bottom of the em, in font units
    pub fn descent(&self) -> i16 {
        (f64::from(self.units_per_em) * DESCENT_FRACTION).round() as i16
    }

    /// Distance from the baseline to the top of the em, in font units
    pub fn ascent(&self) -> i16 {
        (i32::from(self.units_per_em) - i32::from(self.descent())) as i16
    }

    /// Total side-bearing margin for glyphs without an explicit advance
    pub fn side_bearing_margin(&self) -> u16 {
        (f64::from(self.units_per_em) * self.side_bearing_fraction).round() as u16
    }
}
