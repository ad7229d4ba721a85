//! # Storage Volume & Dimension Optimizer
//!
//! Converts a production schedule into required storage volume, then solves
//! for tank diameter and height under a target H/D aspect ratio.
//!
//! Rounding policy: the diameter rounds *up* to the configured increment and
//! the height is then recomputed from the rounded diameter (and itself
//! rounded up), so the as-built volume always meets or exceeds the required
//! volume. Rounding never produces an under-capacity tank.
//!
//! ## Example
//!
//! ```rust
//! use tank_core::calculations::volume::{optimize_dimensions, storage_volume};
//! use tank_core::rules::DesignRules;
//! use tank_core::units::KgPerCubicMeter;
//!
//! let rules = DesignRules::default();
//! let storage = storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 1, 0.0).unwrap();
//! let dims = optimize_dimensions(storage.per_tank_volume, 1.7, &rules).unwrap();
//! assert!(dims.actual_volume.0 >= storage.per_tank_volume.0);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rules::DesignRules;
use crate::units::{CubicMeters, KgPerCubicMeter, Meters, Tonnes};

/// Storage volume breakdown for a production schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageVolume {
    /// Total mass held over the storage period (t)
    pub total_mass: Tonnes,

    /// Liquid volume of that mass at storage density (m³)
    pub total_volume: CubicMeters,

    /// Geometric volume after freeboard margin and fill fraction (m³)
    pub geometric_volume: CubicMeters,

    /// Required nominal volume per tank (m³)
    pub per_tank_volume: CubicMeters,
}

/// Final tank dimensions after rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankDimensions {
    /// Inside diameter (m), rounded up to the configured increment
    pub diameter: Meters,

    /// Shell height (m), recomputed from the rounded diameter
    pub height: Meters,

    /// As-built cylinder volume from the rounded dimensions (m³)
    pub actual_volume: CubicMeters,

    /// Final H/D after rounding
    pub aspect_ratio: f64,
}

/// Cylinder volume V = π/4 · D² · H.
pub fn cylinder_volume(diameter: Meters, height: Meters) -> CubicMeters {
    CubicMeters(PI / 4.0 * diameter.0 * diameter.0 * height.0)
}

/// Compute the required storage volumes for a production schedule.
///
/// total_volume = rate × period × 1000 / density (tonnes → kg), then the
/// geometric volume divides out the fill fraction and applies the explicit
/// freeboard margin before splitting across tanks.
pub fn storage_volume(
    production_rate_tpd: f64,
    holding_period_days: f64,
    density: KgPerCubicMeter,
    fill_fraction: f64,
    num_tanks: u32,
    freeboard_margin: f64,
) -> CalcResult<StorageVolume> {
    if production_rate_tpd <= 0.0 {
        return Err(CalcError::invalid_input(
            "production_rate_tpd",
            production_rate_tpd.to_string(),
            "Production rate must be positive",
        ));
    }
    if holding_period_days <= 0.0 {
        return Err(CalcError::invalid_input(
            "holding_period_days",
            holding_period_days.to_string(),
            "Holding period must be positive",
        ));
    }
    if density.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "density_kg_m3",
            density.0.to_string(),
            "Density must be positive",
        ));
    }
    if fill_fraction <= 0.0 || fill_fraction > 1.0 {
        return Err(CalcError::invalid_input(
            "fill_fraction",
            fill_fraction.to_string(),
            "Fill fraction must be in (0, 1]",
        ));
    }
    if num_tanks == 0 {
        return Err(CalcError::invalid_input(
            "num_tanks",
            num_tanks.to_string(),
            "At least one tank is required",
        ));
    }
    if freeboard_margin < 0.0 {
        return Err(CalcError::invalid_input(
            "freeboard_margin",
            freeboard_margin.to_string(),
            "Margin cannot be negative",
        ));
    }

    let total_mass = Tonnes(production_rate_tpd * holding_period_days);
    let total_volume = CubicMeters(total_mass.0 * 1000.0 / density.0);
    let geometric_volume = CubicMeters(total_volume.0 * (1.0 + freeboard_margin) / fill_fraction);
    let per_tank_volume = geometric_volume / num_tanks as f64;

    Ok(StorageVolume {
        total_mass,
        total_volume,
        geometric_volume,
        per_tank_volume,
    })
}

/// Solve for diameter and height under the target H/D ratio.
///
/// With H = ratio · D the cylinder equation gives
/// D = (4V / (π · ratio))^(1/3). The diameter then rounds up to the
/// configured increment and the height is recomputed from the *rounded*
/// diameter so the stored volume never drops below the requirement.
pub fn optimize_dimensions(
    per_tank_volume: CubicMeters,
    aspect_ratio: f64,
    rules: &DesignRules,
) -> CalcResult<TankDimensions> {
    if per_tank_volume.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "per_tank_volume",
            per_tank_volume.0.to_string(),
            "Per-tank volume must be positive",
        ));
    }
    if aspect_ratio <= 0.0 {
        return Err(CalcError::invalid_input(
            "aspect_ratio",
            aspect_ratio.to_string(),
            "Target H/D ratio must be positive",
        ));
    }
    rules.validate()?;

    let ideal_diameter = (4.0 * per_tank_volume.0 / (PI * aspect_ratio)).powf(1.0 / 3.0);
    let diameter = DesignRules::round_up(Meters(ideal_diameter), rules.diameter_increment_m);

    // Height comes from the rounded diameter, not the ideal one, so the
    // capacity check holds against the dimensions actually built.
    let exact_height = 4.0 * per_tank_volume.0 / (PI * diameter.0 * diameter.0);
    let height = DesignRules::round_up(Meters(exact_height), rules.height_increment_m);

    let actual_volume = cylinder_volume(diameter, height);

    Ok(TankDimensions {
        diameter,
        height,
        actual_volume,
        aspect_ratio: height.0 / diameter.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_volume_acetic_acid_case() {
        // 50 TPD for 10 days at 1049 kg/m³, single tank, 85% fill
        let storage =
            storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 1, 0.0).unwrap();
        assert_eq!(storage.total_mass.0, 500.0);
        assert!((storage.total_volume.0 - 476.64).abs() < 0.01);
        assert!((storage.per_tank_volume.0 - 560.76).abs() < 0.01);
    }

    #[test]
    fn test_storage_volume_splits_across_tanks() {
        let one = storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 1, 0.0).unwrap();
        let four = storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 4, 0.0).unwrap();
        assert!((four.per_tank_volume.0 - one.per_tank_volume.0 / 4.0).abs() < 1e-9);
        assert_eq!(four.geometric_volume, one.geometric_volume);
    }

    #[test]
    fn test_explicit_margin() {
        let plain = storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 1, 0.0).unwrap();
        let margined =
            storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 1, 0.1).unwrap();
        assert!((margined.per_tank_volume.0 - plain.per_tank_volume.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_denominators() {
        assert!(storage_volume(50.0, 10.0, KgPerCubicMeter(0.0), 0.85, 1, 0.0).is_err());
        assert!(storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.0, 1, 0.0).is_err());
        assert!(storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 1.2, 1, 0.0).is_err());
        assert!(storage_volume(50.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 0, 0.0).is_err());
        assert!(storage_volume(-1.0, 10.0, KgPerCubicMeter(1049.0), 0.85, 1, 0.0).is_err());
    }

    #[test]
    fn test_optimize_dimensions_meets_ratio_and_capacity() {
        let rules = DesignRules::default();
        let required = CubicMeters(560.76);
        let dims = optimize_dimensions(required, 1.7, &rules).unwrap();

        // D = (4·560.76 / (π·1.7))^(1/3) ≈ 7.489 → 7.5 m
        assert!((dims.diameter.0 - 7.5).abs() < 1e-9);
        // Capacity never drops below the requirement
        assert!(dims.actual_volume.0 >= required.0);
        // Ratio held within rounding tolerance
        assert!((dims.aspect_ratio - 1.7).abs() < 0.05);
    }

    #[test]
    fn test_rounding_never_undersizes() {
        let rules = DesignRules::default();
        for volume in [1.0, 37.3, 120.0, 560.76, 4800.0] {
            let dims = optimize_dimensions(CubicMeters(volume), 1.7, &rules).unwrap();
            assert!(
                dims.actual_volume.0 >= volume,
                "undersized at {volume} m³: {:?}",
                dims
            );
        }
    }

    #[test]
    fn test_invalid_ratio() {
        let rules = DesignRules::default();
        let err = optimize_dimensions(CubicMeters(100.0), 0.0, &rules).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_coarser_increment() {
        let mut rules = DesignRules::default();
        rules.diameter_increment_m = 0.5;
        let dims = optimize_dimensions(CubicMeters(560.76), 1.7, &rules).unwrap();
        assert!((dims.diameter.0 / 0.5).fract().abs() < 1e-9);
        assert!(dims.actual_volume.0 >= 560.76);
    }
}
