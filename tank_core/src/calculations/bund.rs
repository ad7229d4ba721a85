//! # Bund Sizing
//!
//! Secondary containment volume per standard practice: 110% of the single
//! largest tank in the bunded area. Only the largest tank governs — a farm
//! of four identical tanks needs the same bund as one of them, because a
//! failure releases one tank's contents, not the sum.

use crate::errors::{CalcError, CalcResult};
use crate::units::CubicMeters;

/// Containment factor over the largest tank volume.
pub const BUND_FACTOR: f64 = 1.10;

/// Required bund volume for a set of tanks.
///
/// Fails with `InvalidInput` when the list is empty; a bund for zero tanks
/// is a caller mistake, not a zero-volume answer.
pub fn bund_volume(per_tank_volumes: &[CubicMeters]) -> CalcResult<CubicMeters> {
    let largest = per_tank_volumes
        .iter()
        .map(|v| v.0)
        .fold(f64::NEG_INFINITY, f64::max);

    if per_tank_volumes.is_empty() || largest <= 0.0 {
        return Err(CalcError::invalid_input(
            "per_tank_volumes",
            format!("{:?}", per_tank_volumes.iter().map(|v| v.0).collect::<Vec<_>>()),
            "At least one tank with positive volume is required",
        ));
    }

    Ok(CubicMeters(largest * BUND_FACTOR))
}
