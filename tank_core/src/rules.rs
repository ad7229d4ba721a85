//! # Design Rules
//!
//! Engine configuration: rounding increments, course height, the standard
//! plate table, and sanity bounds. The original tool kept these as
//! module-level defaults shared across requests; here they travel explicitly
//! with every calculation so the engine stays side-effect-free and each call
//! is independently reproducible.
//!
//! ## Example
//!
//! ```rust
//! use tank_core::rules::DesignRules;
//!
//! let mut rules = DesignRules::default();
//! rules.diameter_increment_m = 0.5; // round diameters to half-meter plate modules
//! assert!(rules.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Meters, Millimeters};

/// Standard plate thicknesses (mm) per API 650 Appendix A.
pub const STANDARD_PLATE_THICKNESSES_MM: [f64; 14] = [
    5.0, 6.0, 8.0, 10.0, 12.0, 16.0, 19.0, 22.0, 25.0, 28.0, 32.0, 38.0, 44.0, 50.0,
];

/// Minimum nominal shell thickness by diameter class, API 650 Table 5.6.1.1.
/// Pairs of (diameter upper bound in m, minimum nominal thickness in mm);
/// the last entry covers everything at or above 60 m.
const MIN_NOMINAL_BY_DIAMETER: [(f64, f64); 4] =
    [(15.0, 5.0), (36.0, 6.0), (60.0, 8.0), (f64::INFINITY, 10.0)];

/// Configuration for a design calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "diameter_increment_m": 0.1,
///   "height_increment_m": 0.1,
///   "course_height_m": 2.0,
///   "plate_thicknesses_mm": [5.0, 6.0, 8.0, 10.0, 12.0, 16.0, 19.0, 22.0, 25.0],
///   "freeboard_margin": 0.0,
///   "diameter_bounds_m": [1.0, 100.0],
///   "height_bounds_m": [1.0, 100.0],
///   "fill_fraction_band": [0.5, 0.95],
///   "strict": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRules {
    /// Diameter rounding increment (m); diameters round up to a multiple
    pub diameter_increment_m: f64,

    /// Height rounding increment (m); heights round up to a multiple
    pub height_increment_m: f64,

    /// Nominal shell course height (m); standard practice is 1.8 to 2.4 m
    pub course_height_m: f64,

    /// Ordered table of available plate thicknesses (mm), ascending
    pub plate_thicknesses_mm: Vec<f64>,

    /// Extra volume margin applied on top of the working volume (0.0 = none).
    /// Always explicit; fill fraction freeboard is handled separately.
    pub freeboard_margin: f64,

    /// Plausible diameter band (m) for sanity checks
    pub diameter_bounds_m: (f64, f64),

    /// Plausible height band (m) for sanity checks
    pub height_bounds_m: (f64, f64),

    /// Fill fractions outside this band draw a warning
    pub fill_fraction_band: (f64, f64),

    /// When set, sanity warnings become hard errors
    pub strict: bool,
}

impl Default for DesignRules {
    fn default() -> Self {
        DesignRules {
            diameter_increment_m: 0.1,
            height_increment_m: 0.1,
            course_height_m: 2.0,
            plate_thicknesses_mm: STANDARD_PLATE_THICKNESSES_MM.to_vec(),
            freeboard_margin: 0.0,
            diameter_bounds_m: (1.0, 100.0),
            height_bounds_m: (1.0, 100.0),
            fill_fraction_band: (0.5, 0.95),
            strict: false,
        }
    }
}

impl DesignRules {
    /// Validate the rule set itself.
    pub fn validate(&self) -> CalcResult<()> {
        if self.diameter_increment_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_increment_m",
                self.diameter_increment_m.to_string(),
                "Rounding increment must be positive",
            ));
        }
        if self.height_increment_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "height_increment_m",
                self.height_increment_m.to_string(),
                "Rounding increment must be positive",
            ));
        }
        if self.course_height_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "course_height_m",
                self.course_height_m.to_string(),
                "Course height must be positive",
            ));
        }
        if self.freeboard_margin < 0.0 {
            return Err(CalcError::invalid_input(
                "freeboard_margin",
                self.freeboard_margin.to_string(),
                "Margin cannot be negative",
            ));
        }
        if self.plate_thicknesses_mm.is_empty() {
            return Err(CalcError::invalid_input(
                "plate_thicknesses_mm",
                "[]",
                "Plate table cannot be empty",
            ));
        }
        let ascending = self
            .plate_thicknesses_mm
            .windows(2)
            .all(|pair| pair[0] < pair[1]);
        if !ascending || self.plate_thicknesses_mm[0] <= 0.0 {
            return Err(CalcError::invalid_input(
                "plate_thicknesses_mm",
                format!("{:?}", self.plate_thicknesses_mm),
                "Plate table must be positive and strictly ascending",
            ));
        }
        Ok(())
    }

    /// Round a required thickness up to the next available plate.
    ///
    /// A requirement beyond the table is a coverage gap that must be
    /// escalated to the caller, never clamped to the largest plate.
    pub fn round_to_standard_plate(&self, required: Millimeters) -> CalcResult<Millimeters> {
        for &plate in &self.plate_thicknesses_mm {
            if plate >= required.0 {
                return Ok(Millimeters(plate));
            }
        }
        let max_available = *self
            .plate_thicknesses_mm
            .last()
            .unwrap_or(&0.0);
        Err(CalcError::table_coverage(required.0, max_available))
    }

    /// Minimum nominal shell thickness for a tank of the given diameter,
    /// per API 650 Table 5.6.1.1. Applies as a floor regardless of what the
    /// one-foot formula yields.
    pub fn min_nominal_thickness(&self, diameter: Meters) -> Millimeters {
        for &(max_d, min_t) in &MIN_NOMINAL_BY_DIAMETER {
            if diameter.0 < max_d {
                return Millimeters(min_t);
            }
        }
        // Unreachable: the table's last bound is infinite
        Millimeters(MIN_NOMINAL_BY_DIAMETER[3].1)
    }

    /// Round a length up to the next multiple of `increment_m`.
    ///
    /// The small tolerance keeps values already sitting on an increment from
    /// being bumped a full step by floating-point noise.
    pub fn round_up(value: Meters, increment_m: f64) -> Meters {
        let steps = (value.0 / increment_m - 1e-9).ceil();
        Meters(steps * increment_m)
    }
}
