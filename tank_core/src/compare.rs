//! # Case Comparison
//!
//! Pure field-by-field diff between two `DesignResult` values, for showing
//! how a recalculation moved the design. The web tool kept comparison state
//! in the server session; here it is an explicit function over two explicit
//! results, with no hidden state.
//!
//! ## Example
//!
//! ```rust
//! use tank_core::calculations::tank_design::{calculate, DesignInput};
//! use tank_core::compare::CaseComparison;
//! use tank_core::rules::DesignRules;
//!
//! let rules = DesignRules::default();
//! let base = calculate(&DesignInput::new(50.0, 10.0), &rules).unwrap();
//! let bigger = calculate(&DesignInput::new(50.0, 14.0), &rules).unwrap();
//!
//! let diff = CaseComparison::between(&base, &bigger);
//! let volume = diff.field("total_volume_m3").unwrap();
//! assert!(volume.percent_change > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::tank_design::DesignResult;

/// Change in one numeric output between two design cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta {
    /// Field name (stable identifiers, e.g. "diameter_m")
    pub field: String,

    /// Value in the base case
    pub base: f64,

    /// Value in the other case
    pub other: f64,

    /// Percentage change from base to other; 0 when the base is 0
    pub percent_change: f64,
}

impl FieldDelta {
    fn new(field: &str, base: f64, other: f64) -> Self {
        let percent_change = if base == 0.0 {
            0.0
        } else {
            (other - base) / base * 100.0
        };
        FieldDelta {
            field: field.to_string(),
            base,
            other,
            percent_change,
        }
    }
}

/// Field-by-field comparison of two design results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseComparison {
    /// Label of the base case
    pub base_label: String,

    /// Label of the other case
    pub other_label: String,

    /// Deltas over the key numeric outputs
    pub deltas: Vec<FieldDelta>,
}

impl CaseComparison {
    /// Compare two design results.
    pub fn between(base: &DesignResult, other: &DesignResult) -> Self {
        let deltas = vec![
            FieldDelta::new(
                "total_volume_m3",
                base.storage.total_volume.0,
                other.storage.total_volume.0,
            ),
            FieldDelta::new(
                "per_tank_volume_m3",
                base.storage.per_tank_volume.0,
                other.storage.per_tank_volume.0,
            ),
            FieldDelta::new(
                "diameter_m",
                base.dimensions.diameter.0,
                other.dimensions.diameter.0,
            ),
            FieldDelta::new(
                "height_m",
                base.dimensions.height.0,
                other.dimensions.height.0,
            ),
            FieldDelta::new(
                "actual_volume_m3",
                base.dimensions.actual_volume.0,
                other.dimensions.actual_volume.0,
            ),
            FieldDelta::new(
                "shell_thickness_mm",
                base.governing_thickness().0,
                other.governing_thickness().0,
            ),
            FieldDelta::new(
                "bottom_thickness_mm",
                base.bottom_thickness.0,
                other.bottom_thickness.0,
            ),
            FieldDelta::new(
                "roof_thickness_mm",
                base.roof_thickness.0,
                other.roof_thickness.0,
            ),
            FieldDelta::new("bund_volume_m3", base.bund_volume.0, other.bund_volume.0),
            FieldDelta::new(
                "num_tanks",
                base.num_tanks as f64,
                other.num_tanks as f64,
            ),
        ];

        CaseComparison {
            base_label: base.label.clone(),
            other_label: other.label.clone(),
            deltas,
        }
    }

    /// Look up a delta by field name.
    pub fn field(&self, name: &str) -> Option<&FieldDelta> {
        self.deltas.iter().find(|delta| delta.field == name)
    }

    /// Largest absolute percentage change across all fields.
    pub fn max_change(&self) -> Option<&FieldDelta> {
        self.deltas.iter().max_by(|a, b| {
            a.percent_change
                .abs()
                .total_cmp(&b.percent_change.abs())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::tank_design::{calculate, DesignInput};
    use crate::rules::DesignRules;

    #[test]
    fn test_identical_cases_show_no_change() {
        let rules = DesignRules::default();
        let result = calculate(&DesignInput::new(50.0, 10.0), &rules).unwrap();
        let diff = CaseComparison::between(&result, &result);
        for delta in &diff.deltas {
            assert_eq!(delta.percent_change, 0.0, "{}", delta.field);
        }
    }

    #[test]
    fn test_longer_holding_period_grows_volume() {
        let rules = DesignRules::default();
        let base = calculate(&DesignInput::new(50.0, 10.0), &rules).unwrap();
        let other = calculate(&DesignInput::new(50.0, 20.0), &rules).unwrap();

        let diff = CaseComparison::between(&base, &other);
        let volume = diff.field("total_volume_m3").unwrap();
        assert!((volume.percent_change - 100.0).abs() < 1e-6);
        assert!(diff.field("diameter_m").unwrap().percent_change > 0.0);
    }

    #[test]
    fn test_max_change() {
        let rules = DesignRules::default();
        let base = calculate(&DesignInput::new(50.0, 10.0), &rules).unwrap();
        let other = calculate(&DesignInput::new(50.0, 20.0), &rules).unwrap();

        let diff = CaseComparison::between(&base, &other);
        let max = diff.max_change().unwrap();
        // Volumes double; no other field moves faster
        assert!((max.percent_change - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_comparison_serialization() {
        let rules = DesignRules::default();
        let result = calculate(&DesignInput::new(50.0, 10.0), &rules).unwrap();
        let diff = CaseComparison::between(&result, &result);
        let json = serde_json::to_string(&diff).unwrap();
        let roundtrip: CaseComparison = serde_json::from_str(&json).unwrap();
        assert_eq!(diff, roundtrip);
    }
}
