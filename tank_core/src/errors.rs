//! # Error Types
//!
//! Structured error types for tank_core. Each variant carries enough context
//! for a caller (web form, CLI, or another program) to report exactly which
//! input was wrong and why, without parsing message strings.
//!
//! ## Example
//!
//! ```rust
//! use tank_core::errors::{CalcError, CalcResult};
//!
//! fn validate_density(density_kg_m3: f64) -> CalcResult<()> {
//!     if density_kg_m3 <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "density_kg_m3",
//!             density_kg_m3.to_string(),
//!             "Density must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for tank_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design calculations.
///
/// Validation errors name the offending field so callers can highlight it;
/// nothing is ever silently clamped into range.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its engineering domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The standard plate table has no entry large enough for the governing
    /// thickness. Fatal to the computation; never defaulted to an arbitrary
    /// plate.
    #[error("No standard plate covers {required_mm:.2} mm (table maximum {max_available_mm:.1} mm)")]
    TableCoverage {
        required_mm: f64,
        max_available_mm: f64,
    },

    /// Chemical not found in the property database
    #[error("Chemical not found: {chemical_id}")]
    ChemicalNotFound { chemical_id: String },

    /// A calculation's internal cross-check failed, or a sanity finding was
    /// escalated under strict rules
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a TableCoverage error
    pub fn table_coverage(required_mm: f64, max_available_mm: f64) -> Self {
        CalcError::TableCoverage {
            required_mm,
            max_available_mm,
        }
    }

    /// Create a ChemicalNotFound error
    pub fn chemical_not_found(chemical_id: impl Into<String>) -> Self {
        CalcError::ChemicalNotFound {
            chemical_id: chemical_id.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::TableCoverage { .. } => "TABLE_COVERAGE",
            CalcError::ChemicalNotFound { .. } => "CHEMICAL_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

/// Non-fatal finding from the cross-validation pass.
///
/// Warnings ride along inside a `DesignResult` for the caller to display;
/// they never block computation unless `DesignRules::strict` is set, in
/// which case assembly converts them into `CalculationFailed` errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "details")]
pub enum SanityWarning {
    /// Diameter falls outside the plausible engineering band
    DiameterOutOfRange { diameter_m: f64, min_m: f64, max_m: f64 },

    /// Height falls outside the plausible engineering band
    HeightOutOfRange { height_m: f64, min_m: f64, max_m: f64 },

    /// Fill fraction is unusually low or high for atmospheric storage
    UnusualFillFraction { fill_fraction: f64, low: f64, high: f64 },

    /// Rounding moved the final H/D away from the requested target
    AspectRatioDrift { target: f64, actual: f64 },
}

impl std::fmt::Display for SanityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SanityWarning::DiameterOutOfRange { diameter_m, min_m, max_m } => write!(
                f,
                "Diameter {diameter_m:.1} m outside plausible range [{min_m}, {max_m}] m"
            ),
            SanityWarning::HeightOutOfRange { height_m, min_m, max_m } => write!(
                f,
                "Height {height_m:.1} m outside plausible range [{min_m}, {max_m}] m"
            ),
            SanityWarning::UnusualFillFraction { fill_fraction, low, high } => write!(
                f,
                "Fill fraction {fill_fraction:.2} outside the usual band [{low}, {high}]"
            ),
            SanityWarning::AspectRatioDrift { target, actual } => write!(
                f,
                "Final H/D {actual:.2} drifted from target {target:.2} after rounding"
            ),
        }
    }
}
