//! # Shell Thickness — API 650 One-Foot Method
//!
//! Computes the required plate thickness for each shell course using the SI
//! form of the API 650 One-Foot Method (5.6.3.2). The design head for a
//! course is measured one foot (0.3 m) above the course's bottom edge, so
//! thickness falls off course by course going up the shell.
//!
//! Per course:
//!
//! - design:  td = 4.9 · D · (H − h_b − 0.3) · G / (Sd · E) + CA
//! - test:    tt = 4.9 · D · (H − h_b − 0.3) / (St · E)
//!
//! where h_b is the course bottom elevation, G the specific gravity (test
//! condition uses water, G = 1, and no corrosion allowance). The governing
//! value is max(td, tt), floored by the API 650 minimum nominal thickness
//! for the diameter class, then rounded up in the standard plate table.
//!
//! ## Example
//!
//! ```rust
//! use tank_core::calculations::shell::shell_courses;
//! use tank_core::rules::DesignRules;
//! use tank_core::units::{Megapascals, Meters};
//!
//! let rules = DesignRules::default();
//! let courses = shell_courses(
//!     Meters(7.5),
//!     Meters(12.7),
//!     1.049,
//!     1.5,
//!     Megapascals(138.0),
//!     Megapascals(207.0),
//!     1.0,
//!     &rules,
//! )
//! .unwrap();
//! assert_eq!(courses.len(), 7);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rules::DesignRules;
use crate::units::{Megapascals, Meters, Millimeters, ONE_FOOT_M};

/// One horizontal ring of shell plate, bottom-up.
///
/// Carries both the raw calculated thickness and the standard plate actually
/// specified, so a report can show the full derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellCourse {
    /// Course number, 1 at the bottom
    pub course: u32,

    /// Elevation of the course bottom above the tank floor (m)
    pub bottom_elevation: Meters,

    /// Height of this ring (m); the top course may be a remainder
    pub height: Meters,

    /// Liquid head above the course bottom at design level (m)
    pub liquid_head: Meters,

    /// Design condition thickness td, corroded (mm)
    pub design_thickness: Millimeters,

    /// Hydrostatic test condition thickness tt (mm)
    pub test_thickness: Millimeters,

    /// Governing required thickness before plate rounding (mm)
    pub required_thickness: Millimeters,

    /// Standard plate thickness specified for this course (mm)
    pub nominal_thickness: Millimeters,
}

/// Calculate the shell course stack for a tank.
///
/// Courses are laid out bottom-up at the configured nominal course height;
/// the topmost course takes whatever height remains and uses the same head
/// formula with its actual bottom elevation.
///
/// # Errors
///
/// * `InvalidInput` for non-positive diameter, height, gravity, or stress,
///   or a joint efficiency outside (0, 1]
/// * `TableCoverage` when no standard plate covers the governing thickness
/// * `CalculationFailed` if the rounded stack is not non-increasing
///   bottom-to-top (cannot happen with a monotone plate table; kept as a
///   cross-check)
#[allow(clippy::too_many_arguments)]
pub fn shell_courses(
    diameter: Meters,
    liquid_height: Meters,
    specific_gravity: f64,
    corrosion_allowance_mm: f64,
    design_stress: Megapascals,
    test_stress: Megapascals,
    joint_efficiency: f64,
    rules: &DesignRules,
) -> CalcResult<Vec<ShellCourse>> {
    if diameter.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "diameter",
            diameter.0.to_string(),
            "Diameter must be positive",
        ));
    }
    if liquid_height.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "height",
            liquid_height.0.to_string(),
            "Liquid height must be positive",
        ));
    }
    if specific_gravity <= 0.0 {
        return Err(CalcError::invalid_input(
            "specific_gravity",
            specific_gravity.to_string(),
            "Specific gravity must be positive",
        ));
    }
    if corrosion_allowance_mm < 0.0 {
        return Err(CalcError::invalid_input(
            "corrosion_allowance_mm",
            corrosion_allowance_mm.to_string(),
            "Corrosion allowance cannot be negative",
        ));
    }
    if design_stress.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "design_stress_mpa",
            design_stress.0.to_string(),
            "Design stress must be positive",
        ));
    }
    if test_stress.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "test_stress_mpa",
            test_stress.0.to_string(),
            "Test stress must be positive",
        ));
    }
    if joint_efficiency <= 0.0 || joint_efficiency > 1.0 {
        return Err(CalcError::invalid_input(
            "joint_efficiency",
            joint_efficiency.to_string(),
            "Joint efficiency must be in (0, 1]",
        ));
    }
    rules.validate()?;

    let min_nominal = rules.min_nominal_thickness(diameter);
    let course_count = (liquid_height.0 / rules.course_height_m).ceil() as u32;

    let mut courses = Vec::with_capacity(course_count as usize);
    for i in 0..course_count {
        let bottom_elevation = Meters(i as f64 * rules.course_height_m);
        let height = Meters(
            (liquid_height.0 - bottom_elevation.0).min(rules.course_height_m),
        );
        let liquid_head = liquid_height - bottom_elevation;

        // One-foot convention: head measured 0.3 m above the course bottom.
        // A short top course can sit entirely within the top foot.
        let head_term = (liquid_head.0 - ONE_FOOT_M).max(0.0);

        let td = Millimeters(
            4.9 * diameter.0 * head_term * specific_gravity
                / (design_stress.0 * joint_efficiency)
                + corrosion_allowance_mm,
        );
        let tt = Millimeters(
            4.9 * diameter.0 * head_term / (test_stress.0 * joint_efficiency),
        );

        let governing = td.0.max(tt.0).max(min_nominal.0);
        let nominal = rules.round_to_standard_plate(Millimeters(governing))?;

        courses.push(ShellCourse {
            course: i + 1,
            bottom_elevation,
            height,
            liquid_head,
            design_thickness: td,
            test_thickness: tt,
            required_thickness: Millimeters(governing),
            nominal_thickness: nominal,
        });
    }

    // Hydrostatic head decreases with elevation, so the rounded stack must
    // be non-increasing bottom-to-top.
    let monotone = courses
        .windows(2)
        .all(|pair| pair[1].nominal_thickness.0 <= pair[0].nominal_thickness.0);
    if !monotone {
        return Err(CalcError::calculation_failed(
            "shell_courses",
            "Course thicknesses increase with elevation after rounding",
        ));
    }

    Ok(courses)
}

/// Bottom plate thickness: API 650 minimum of 6 mm plus corrosion allowance.
pub fn bottom_thickness(corrosion_allowance_mm: f64) -> Millimeters {
    Millimeters(6.0 + corrosion_allowance_mm)
}

/// Roof plate thickness for an atmospheric tank: API 650 minimum of 5 mm
/// plus corrosion allowance.
pub fn roof_thickness(corrosion_allowance_mm: f64) -> Millimeters {
    Millimeters(5.0 + corrosion_allowance_mm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_stack(diameter: f64, height: f64) -> Vec<ShellCourse> {
        shell_courses(
            Meters(diameter),
            Meters(height),
            1.049,
            1.5,
            Megapascals(138.0),
            Megapascals(207.0),
            1.0,
            &DesignRules::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_hand_calculated_bottom_course() {
        // D = 10 m, single 2 m course of liquid, G = 1.049, CA = 1.5 mm,
        // Sd = 138 MPa: td = 4.9·10·(2−0.3)·1.049/138 + 1.5 ≈ 2.133 mm
        let courses = default_stack(10.0, 2.0);
        assert_eq!(courses.len(), 1);

        let bottom = &courses[0];
        assert!((bottom.design_thickness.0 - 2.133).abs() < 0.005);
        // tt = 4.9·10·1.7/207 ≈ 0.402 mm
        assert!((bottom.test_thickness.0 - 0.402).abs() < 0.005);
        // Design governs over test but the 5 mm diameter-class floor wins
        assert_eq!(bottom.required_thickness.0, 5.0);
        assert_eq!(bottom.nominal_thickness.0, 5.0);
    }

    #[test]
    fn test_course_layout_with_remainder() {
        let courses = default_stack(7.5, 12.7);
        assert_eq!(courses.len(), 7);

        // Six full courses, then a 0.7 m remainder on top
        for course in &courses[..6] {
            assert!((course.height.0 - 2.0).abs() < 1e-9);
        }
        let top = courses.last().unwrap();
        assert!((top.height.0 - 0.7).abs() < 1e-9);
        assert!((top.bottom_elevation.0 - 12.0).abs() < 1e-9);
        assert!((top.liquid_head.0 - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_thickness_non_increasing() {
        // Tall, wide tank so the formula (not the floor) governs low courses
        let courses = default_stack(40.0, 20.0);
        for pair in courses.windows(2) {
            assert!(pair[1].nominal_thickness.0 <= pair[0].nominal_thickness.0);
        }
        // Bottom course of a 40 m tank must exceed the 8 mm class floor
        assert!(courses[0].nominal_thickness.0 > 8.0);
    }

    #[test]
    fn test_min_nominal_floor_applies() {
        // Small tank: every course formula value is tiny, floor governs
        let courses = default_stack(8.0, 6.0);
        for course in &courses {
            assert_eq!(course.nominal_thickness.0, 5.0);
        }
    }

    #[test]
    fn test_short_top_course_within_top_foot() {
        // 4.2 m of liquid: top course head is 0.2 m, inside the one-foot
        // offset, so its formula thickness is CA only and the floor governs
        let courses = default_stack(10.0, 4.2);
        let top = courses.last().unwrap();
        assert!((top.design_thickness.0 - 1.5).abs() < 1e-9);
        assert_eq!(top.nominal_thickness.0, 5.0);
    }

    #[test]
    fn test_joint_efficiency_increases_thickness() {
        let full = default_stack(40.0, 20.0);
        let derated = shell_courses(
            Meters(40.0),
            Meters(20.0),
            1.049,
            1.5,
            Megapascals(138.0),
            Megapascals(207.0),
            0.85,
            &DesignRules::default(),
        )
        .unwrap();
        assert!(derated[0].design_thickness.0 > full[0].design_thickness.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let rules = DesignRules::default();
        let cases: [(f64, f64, f64, f64, f64); 5] = [
            (0.0, 10.0, 138.0, 207.0, 1.0),  // zero diameter
            (10.0, 0.0, 138.0, 207.0, 1.0),  // zero height
            (10.0, 10.0, 0.0, 207.0, 1.0),   // zero design stress
            (10.0, 10.0, 138.0, 0.0, 1.0),   // zero test stress
            (10.0, 10.0, 138.0, 207.0, 1.2), // efficiency above 1
        ];
        for (d, h, sd, st, e) in cases {
            let result = shell_courses(
                Meters(d),
                Meters(h),
                1.049,
                1.5,
                Megapascals(sd),
                Megapascals(st),
                e,
                &rules,
            );
            assert_eq!(result.unwrap_err().error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_table_coverage_gap_surfaces() {
        // Truncated plate table cannot cover a large tank's bottom course
        let mut rules = DesignRules::default();
        rules.plate_thicknesses_mm = vec![5.0, 6.0, 8.0];
        let err = shell_courses(
            Meters(60.0),
            Meters(22.0),
            1.049,
            1.5,
            Megapascals(138.0),
            Megapascals(207.0),
            1.0,
            &rules,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "TABLE_COVERAGE");
    }

    #[test]
    fn test_bottom_and_roof_plates() {
        assert_eq!(bottom_thickness(1.5).0, 7.5);
        assert_eq!(roof_thickness(1.5).0, 6.5);
        assert_eq!(bottom_thickness(0.0).0, 6.0);
    }
}
