//! # Tank Design — Result Assembly & Cross-Validation
//!
//! The engine's top-level operation: a validated `DesignInput` plus a
//! `DesignRules` configuration goes in, an immutable `DesignResult` comes
//! out. No state persists between calls; identical input yields identical
//! output.
//!
//! Assembly order is fail-fast: every field is validated before any derived
//! value is computed, and no partial result is ever produced on error.
//! After the volume, shell, and bund stages, a cross-validation pass
//! re-checks capacity and course monotonicity and attaches sanity warnings
//! (plausibility findings that inform rather than block, unless the rules
//! are strict).
//!
//! ## Example
//!
//! ```rust
//! use tank_core::calculations::tank_design::{calculate, DesignInput};
//! use tank_core::rules::DesignRules;
//!
//! let input = DesignInput::new(50.0, 10.0);
//! let result = calculate(&input, &DesignRules::default()).unwrap();
//! assert!(result.dimensions.actual_volume.0 >= result.storage.per_tank_volume.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::bund::bund_volume;
use crate::calculations::shell::{bottom_thickness, roof_thickness, shell_courses, ShellCourse};
use crate::calculations::volume::{
    optimize_dimensions, storage_volume, StorageVolume, TankDimensions,
};
use crate::chemicals::ChemicalProperties;
use crate::errors::{CalcError, CalcResult, SanityWarning};
use crate::rules::DesignRules;
use crate::units::{CubicMeters, KgPerCubicMeter, Megapascals, Meters, Millimeters};

/// Aspect-ratio drift beyond this fraction of the target draws a warning.
const RATIO_DRIFT_TOLERANCE: f64 = 0.05;

/// Input parameters for a tank design.
///
/// Defaults come from the stored chemical (via [`DesignInput::for_chemical`])
/// or from the glacial acetic acid service the tool was built around
/// (via [`DesignInput::new`]); explicit field values always override them.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "TK-101",
///   "production_rate_tpd": 50.0,
///   "holding_period_days": 10.0,
///   "density_kg_m3": 1049.0,
///   "fill_fraction": 0.85,
///   "corrosion_allowance_mm": 1.5,
///   "num_tanks": 1,
///   "design_stress_mpa": 138.0,
///   "test_stress_mpa": 207.0,
///   "joint_efficiency": 1.0,
///   "aspect_ratio": 1.7,
///   "material": "SS316L"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// User label for this design (e.g., "TK-101")
    pub label: String,

    /// Production rate in tonnes per day
    pub production_rate_tpd: f64,

    /// Storage holding period in days
    pub holding_period_days: f64,

    /// Liquid density at storage temperature (kg/m³)
    pub density_kg_m3: f64,

    /// Maximum working fill fraction (0, 1]
    pub fill_fraction: f64,

    /// Corrosion allowance added to the design thickness (mm)
    pub corrosion_allowance_mm: f64,

    /// Number of identical tanks sharing the duty (1 to 4)
    pub num_tanks: u32,

    /// Allowable design stress Sd (MPa)
    pub design_stress_mpa: f64,

    /// Allowable hydrostatic test stress St (MPa)
    pub test_stress_mpa: f64,

    /// Weld joint efficiency E (0, 1]
    pub joint_efficiency: f64,

    /// Target H/D ratio for the dimension optimizer
    pub aspect_ratio: f64,

    /// Shell material designation carried into the result
    pub material: String,
}

impl DesignInput {
    /// Create an input with glacial acetic acid service defaults
    /// (SS316L shell: Sd = 138 MPa, St = 207 MPa).
    pub fn new(production_rate_tpd: f64, holding_period_days: f64) -> Self {
        DesignInput {
            label: "TK-1".to_string(),
            production_rate_tpd,
            holding_period_days,
            density_kg_m3: 1049.0,
            fill_fraction: 0.85,
            corrosion_allowance_mm: 1.5,
            num_tanks: 1,
            design_stress_mpa: 138.0,
            test_stress_mpa: 207.0,
            joint_efficiency: 1.0,
            aspect_ratio: 1.7,
            material: "SS316L".to_string(),
        }
    }

    /// Create an input with density, corrosion allowance, and material
    /// defaulted from a chemical database record. The record is a default
    /// source only; callers override fields afterwards as needed.
    pub fn for_chemical(
        chemical: &ChemicalProperties,
        production_rate_tpd: f64,
        holding_period_days: f64,
    ) -> Self {
        DesignInput {
            density_kg_m3: chemical.density_kg_m3.0,
            corrosion_allowance_mm: chemical.corrosion_allowance_mm,
            material: chemical.recommended_material.clone(),
            ..DesignInput::new(production_rate_tpd, holding_period_days)
        }
    }

    /// Validate all parameters, naming the first offending field.
    pub fn validate(&self) -> CalcResult<()> {
        if self.production_rate_tpd <= 0.0 {
            return Err(CalcError::invalid_input(
                "production_rate_tpd",
                self.production_rate_tpd.to_string(),
                "Production rate must be positive",
            ));
        }
        if self.holding_period_days <= 0.0 {
            return Err(CalcError::invalid_input(
                "holding_period_days",
                self.holding_period_days.to_string(),
                "Holding period must be positive",
            ));
        }
        if self.density_kg_m3 <= 0.0 {
            return Err(CalcError::invalid_input(
                "density_kg_m3",
                self.density_kg_m3.to_string(),
                "Density must be positive",
            ));
        }
        if self.fill_fraction <= 0.0 || self.fill_fraction > 1.0 {
            return Err(CalcError::invalid_input(
                "fill_fraction",
                self.fill_fraction.to_string(),
                "Fill fraction must be in (0, 1]",
            ));
        }
        if self.corrosion_allowance_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "corrosion_allowance_mm",
                self.corrosion_allowance_mm.to_string(),
                "Corrosion allowance cannot be negative",
            ));
        }
        if !(1..=4).contains(&self.num_tanks) {
            return Err(CalcError::invalid_input(
                "num_tanks",
                self.num_tanks.to_string(),
                "Number of tanks must be between 1 and 4",
            ));
        }
        if self.design_stress_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "design_stress_mpa",
                self.design_stress_mpa.to_string(),
                "Design stress must be positive",
            ));
        }
        if self.test_stress_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "test_stress_mpa",
                self.test_stress_mpa.to_string(),
                "Test stress must be positive",
            ));
        }
        if self.joint_efficiency <= 0.0 || self.joint_efficiency > 1.0 {
            return Err(CalcError::invalid_input(
                "joint_efficiency",
                self.joint_efficiency.to_string(),
                "Joint efficiency must be in (0, 1]",
            ));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(CalcError::invalid_input(
                "aspect_ratio",
                self.aspect_ratio.to_string(),
                "Target H/D ratio must be positive",
            ));
        }
        Ok(())
    }

    /// Specific gravity of the stored liquid relative to water.
    pub fn specific_gravity(&self) -> f64 {
        KgPerCubicMeter(self.density_kg_m3).specific_gravity()
    }
}

/// Complete tank design result.
///
/// Immutable once produced: this is the unit handed to report, export, and
/// case-comparison collaborators, and it carries every intermediate value
/// needed to reproduce the calculation on paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// Label copied from the input
    pub label: String,

    /// Shell material designation
    pub material: String,

    /// Number of identical tanks designed
    pub num_tanks: u32,

    /// Storage volume breakdown
    pub storage: StorageVolume,

    /// Final rounded dimensions for each tank
    pub dimensions: TankDimensions,

    /// Shell courses, bottom to top
    pub courses: Vec<ShellCourse>,

    /// Bottom plate thickness (mm)
    pub bottom_thickness: Millimeters,

    /// Roof plate thickness (mm)
    pub roof_thickness: Millimeters,

    /// Secondary containment volume (m³), always derived
    pub bund_volume: CubicMeters,

    /// Non-fatal sanity findings for the caller to display
    pub warnings: Vec<SanityWarning>,
}

impl DesignResult {
    /// The bottom (thickest, governing) shell course.
    pub fn governing_course(&self) -> &ShellCourse {
        &self.courses[0]
    }

    /// Nominal shell thickness of the governing course (mm).
    pub fn governing_thickness(&self) -> Millimeters {
        self.governing_course().nominal_thickness
    }
}

/// Perform the complete tank design calculation.
///
/// Stages: validate → storage volume → dimension optimization → shell
/// courses → bottom/roof plates → bund → cross-validation. Any failure
/// aborts with no partial result.
pub fn calculate(input: &DesignInput, rules: &DesignRules) -> CalcResult<DesignResult> {
    input.validate()?;
    rules.validate()?;

    let storage = storage_volume(
        input.production_rate_tpd,
        input.holding_period_days,
        KgPerCubicMeter(input.density_kg_m3),
        input.fill_fraction,
        input.num_tanks,
        rules.freeboard_margin,
    )?;

    let dimensions = optimize_dimensions(storage.per_tank_volume, input.aspect_ratio, rules)?;

    let courses = shell_courses(
        dimensions.diameter,
        dimensions.height,
        input.specific_gravity(),
        input.corrosion_allowance_mm,
        Megapascals(input.design_stress_mpa),
        Megapascals(input.test_stress_mpa),
        input.joint_efficiency,
        rules,
    )?;

    let per_tank_volumes = vec![dimensions.actual_volume; input.num_tanks as usize];
    let bund = bund_volume(&per_tank_volumes)?;

    // Cross-validation: rounding must never have produced under-capacity.
    if dimensions.actual_volume.0 < storage.per_tank_volume.0 {
        return Err(CalcError::calculation_failed(
            "tank_design",
            format!(
                "As-built volume {:.2} m³ below required {:.2} m³",
                dimensions.actual_volume.0, storage.per_tank_volume.0
            ),
        ));
    }

    let warnings = sanity_check(input, &dimensions, rules);
    if rules.strict && !warnings.is_empty() {
        let summary = warnings
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CalcError::calculation_failed("tank_design", summary));
    }

    Ok(DesignResult {
        label: input.label.clone(),
        material: input.material.clone(),
        num_tanks: input.num_tanks,
        storage,
        dimensions,
        courses,
        bottom_thickness: bottom_thickness(input.corrosion_allowance_mm),
        roof_thickness: roof_thickness(input.corrosion_allowance_mm),
        bund_volume: bund,
        warnings,
    })
}

/// Plausibility findings on the finished dimensions. These inform the
/// caller; they block only under strict rules.
fn sanity_check(
    input: &DesignInput,
    dimensions: &TankDimensions,
    rules: &DesignRules,
) -> Vec<SanityWarning> {
    let mut warnings = Vec::new();

    let (d_min, d_max) = rules.diameter_bounds_m;
    if dimensions.diameter.0 < d_min || dimensions.diameter.0 > d_max {
        warnings.push(SanityWarning::DiameterOutOfRange {
            diameter_m: dimensions.diameter.0,
            min_m: d_min,
            max_m: d_max,
        });
    }

    let (h_min, h_max) = rules.height_bounds_m;
    if dimensions.height.0 < h_min || dimensions.height.0 > h_max {
        warnings.push(SanityWarning::HeightOutOfRange {
            height_m: dimensions.height.0,
            min_m: h_min,
            max_m: h_max,
        });
    }

    let (f_low, f_high) = rules.fill_fraction_band;
    if input.fill_fraction < f_low || input.fill_fraction > f_high {
        warnings.push(SanityWarning::UnusualFillFraction {
            fill_fraction: input.fill_fraction,
            low: f_low,
            high: f_high,
        });
    }

    let drift = (dimensions.aspect_ratio - input.aspect_ratio).abs() / input.aspect_ratio;
    if drift > RATIO_DRIFT_TOLERANCE {
        warnings.push(SanityWarning::AspectRatioDrift {
            target: input.aspect_ratio,
            actual: dimensions.aspect_ratio,
        });
    }

    warnings
}

/// Shell thickness versus height at constant stored volume, for charting.
///
/// Sweeps the height from 50% to 150% of the optimized value, adjusting the
/// diameter to hold the required per-tank volume, and records the governing
/// (bottom course) plate thickness at each point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThicknessProfile {
    /// Tank heights sampled (m)
    pub heights_m: Vec<f64>,

    /// Governing shell plate at each height (mm)
    pub thicknesses_mm: Vec<f64>,
}

/// Generate chart data for the shell-thickness-versus-height trade study.
pub fn thickness_profile(input: &DesignInput, rules: &DesignRules) -> CalcResult<ThicknessProfile> {
    input.validate()?;
    rules.validate()?;

    let storage = storage_volume(
        input.production_rate_tpd,
        input.holding_period_days,
        KgPerCubicMeter(input.density_kg_m3),
        input.fill_fraction,
        input.num_tanks,
        rules.freeboard_margin,
    )?;
    let base = optimize_dimensions(storage.per_tank_volume, input.aspect_ratio, rules)?;

    let mut heights_m = Vec::new();
    let mut thicknesses_mm = Vec::new();
    for step in 0..11u32 {
        let factor = 0.5 + 0.1 * step as f64;
        let height = Meters(base.height.0 * factor);
        // Hold volume constant: D = sqrt(4V / (π·H))
        let diameter = Meters(
            (4.0 * storage.per_tank_volume.0 / (std::f64::consts::PI * height.0)).sqrt(),
        );

        let courses = shell_courses(
            diameter,
            height,
            input.specific_gravity(),
            input.corrosion_allowance_mm,
            Megapascals(input.design_stress_mpa),
            Megapascals(input.test_stress_mpa),
            input.joint_efficiency,
            rules,
        )?;

        heights_m.push((height.0 * 10.0).round() / 10.0);
        thicknesses_mm.push(courses[0].nominal_thickness.0);
    }

    Ok(ThicknessProfile {
        heights_m,
        thicknesses_mm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acetic_case() -> DesignInput {
        DesignInput::new(50.0, 10.0)
    }

    #[test]
    fn test_complete_design_acetic_case() {
        let result = calculate(&acetic_case(), &DesignRules::default()).unwrap();

        // 500 t → 476.64 m³ → 560.76 m³ required at 85% fill
        assert!((result.storage.total_volume.0 - 476.64).abs() < 0.01);
        assert!((result.storage.per_tank_volume.0 - 560.76).abs() < 0.01);

        // H/D held near 1.7 and capacity met
        assert!((result.dimensions.aspect_ratio - 1.7).abs() < 0.05);
        assert!(result.dimensions.actual_volume.0 >= result.storage.per_tank_volume.0);

        // Bund sized to 110% of one tank
        assert!((result.bund_volume.0 - result.dimensions.actual_volume.0 * 1.10).abs() < 1e-9);

        // Plates carry the corrosion allowance
        assert_eq!(result.bottom_thickness.0, 7.5);
        assert_eq!(result.roof_thickness.0, 6.5);
        assert_eq!(result.material, "SS316L");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_courses_non_increasing() {
        let result = calculate(&acetic_case(), &DesignRules::default()).unwrap();
        for pair in result.courses.windows(2) {
            assert!(pair[1].nominal_thickness.0 <= pair[0].nominal_thickness.0);
        }
        assert_eq!(
            result.governing_thickness(),
            result.courses[0].nominal_thickness
        );
    }

    #[test]
    fn test_bund_independent_of_num_tanks() {
        let mut input = acetic_case();
        let one = calculate(&input, &DesignRules::default()).unwrap();
        input.num_tanks = 4;
        let four = calculate(&input, &DesignRules::default()).unwrap();

        // Four smaller tanks: the bund still covers only the largest single
        // tank, so each result's bund is 110% of its own tank volume
        assert!((one.bund_volume.0 - one.dimensions.actual_volume.0 * 1.10).abs() < 1e-9);
        assert!((four.bund_volume.0 - four.dimensions.actual_volume.0 * 1.10).abs() < 1e-9);
        assert!(four.bund_volume.0 < one.bund_volume.0);
    }

    #[test]
    fn test_num_tanks_bounds() {
        let rules = DesignRules::default();
        for n in [1u32, 4] {
            let mut input = acetic_case();
            input.num_tanks = n;
            assert!(calculate(&input, &rules).is_ok(), "num_tanks={n} should pass");
        }
        for n in [0u32, 5] {
            let mut input = acetic_case();
            input.num_tanks = n;
            let err = calculate(&input, &rules).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "num_tanks={n}");
        }
    }

    #[test]
    fn test_idempotence() {
        let input = acetic_case();
        let rules = DesignRules::default();
        let a = calculate(&input, &rules).unwrap();
        let b = calculate(&input, &rules).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_degenerate_inputs_fail_fast() {
        let rules = DesignRules::default();

        let mut input = acetic_case();
        input.design_stress_mpa = 0.0;
        assert_eq!(
            calculate(&input, &rules).unwrap_err().error_code(),
            "INVALID_INPUT"
        );

        let mut input = acetic_case();
        input.density_kg_m3 = -5.0;
        assert_eq!(
            calculate(&input, &rules).unwrap_err().error_code(),
            "INVALID_INPUT"
        );

        let mut input = acetic_case();
        input.aspect_ratio = 0.0;
        assert_eq!(
            calculate(&input, &rules).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_low_fill_fraction_warns_but_computes() {
        let mut input = acetic_case();
        input.fill_fraction = 0.3;
        let result = calculate(&input, &DesignRules::default()).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, SanityWarning::UnusualFillFraction { .. })));
    }

    #[test]
    fn test_strict_rules_escalate_warnings() {
        let mut input = acetic_case();
        input.fill_fraction = 0.3;
        let mut rules = DesignRules::default();
        rules.strict = true;
        let err = calculate(&input, &rules).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_for_chemical_defaults() {
        let acid = crate::chemicals::get("sulfuric_acid").unwrap();
        let input = DesignInput::for_chemical(acid, 20.0, 7.0);
        assert_eq!(input.density_kg_m3, 1840.0);
        assert_eq!(input.corrosion_allowance_mm, 3.0);
        assert_eq!(input.material, "SS316L/Hastelloy C");
        // Schedule fields come from the arguments, not the record
        assert_eq!(input.production_rate_tpd, 20.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_thickness_profile_shape() {
        let profile = thickness_profile(&acetic_case(), &DesignRules::default()).unwrap();
        assert_eq!(profile.heights_m.len(), 11);
        assert_eq!(profile.thicknesses_mm.len(), 11);
        // Heights ascend across the sweep
        for pair in profile.heights_m.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&acetic_case(), &DesignRules::default()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        let roundtrip: DesignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
