//! # Chemical Property Database
//!
//! Default design properties for the chemicals this tool is typically used
//! with. Chemical selection carries no calculation logic of its own — every
//! entry is just a record of differing default values (density, corrosion
//! allowance, recommended shell material), so the database is a plain lookup
//! table rather than a family of per-chemical types.
//!
//! The database supplies *defaults only*. Explicit values on a `DesignInput`
//! always win; the engine never reads this table behind the caller's back.
//!
//! ## Example
//!
//! ```rust
//! use tank_core::chemicals;
//!
//! let acid = chemicals::get("acetic_acid").unwrap();
//! assert_eq!(acid.density_kg_m3.0, 1049.0);
//! assert_eq!(acid.recommended_material, "SS316L");
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::KgPerCubicMeter;

/// Corrosivity rating toward common tank materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corrosivity {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Corrosivity {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Corrosivity::Low => "Low",
            Corrosivity::Moderate => "Moderate",
            Corrosivity::High => "High",
            Corrosivity::VeryHigh => "Very High",
        }
    }
}

/// Design-relevant properties of a stored chemical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalProperties {
    /// Display name (e.g., "Acetic Acid (Glacial)")
    pub name: String,

    /// Chemical formula
    pub formula: String,

    /// Liquid density at storage temperature
    pub density_kg_m3: KgPerCubicMeter,

    /// Normal boiling point (°C), for vapor-handling review
    pub boiling_point_c: f64,

    /// Corrosivity toward common tank materials
    pub corrosivity: Corrosivity,

    /// Recommended shell material designation
    pub recommended_material: String,

    /// Default corrosion allowance (mm)
    pub corrosion_allowance_mm: f64,

    /// Chemical category for grouping in selection UIs
    pub category: String,
}

fn chemical(
    name: &str,
    formula: &str,
    density: f64,
    boiling_point_c: f64,
    corrosivity: Corrosivity,
    material: &str,
    corrosion_allowance_mm: f64,
    category: &str,
) -> ChemicalProperties {
    ChemicalProperties {
        name: name.to_string(),
        formula: formula.to_string(),
        density_kg_m3: KgPerCubicMeter(density),
        boiling_point_c,
        corrosivity,
        recommended_material: material.to_string(),
        corrosion_allowance_mm,
        category: category.to_string(),
    }
}

static DATABASE: Lazy<HashMap<&'static str, ChemicalProperties>> = Lazy::new(|| {
    let mut db = HashMap::new();
    db.insert(
        "acetic_acid",
        chemical(
            "Acetic Acid (Glacial)",
            "CH3COOH",
            1049.0,
            118.1,
            Corrosivity::High,
            "SS316L",
            1.5,
            "Organic Acid",
        ),
    );
    db.insert(
        "ethyl_acetate",
        chemical(
            "Ethyl Acetate",
            "C4H8O2",
            902.0,
            77.1,
            Corrosivity::Low,
            "SS304/SS316",
            0.5,
            "Ester",
        ),
    );
    db.insert(
        "ethanol",
        chemical(
            "Ethanol (95%)",
            "C2H5OH",
            810.0,
            78.4,
            Corrosivity::Low,
            "SS304/SS316",
            0.5,
            "Alcohol",
        ),
    );
    db.insert(
        "water",
        chemical(
            "Water (Process)",
            "H2O",
            1000.0,
            100.0,
            Corrosivity::Low,
            "Carbon Steel",
            1.5,
            "Inorganic",
        ),
    );
    db.insert(
        "sulfuric_acid",
        chemical(
            "Sulfuric Acid (98%)",
            "H2SO4",
            1840.0,
            337.0,
            Corrosivity::VeryHigh,
            "SS316L/Hastelloy C",
            3.0,
            "Inorganic Acid",
        ),
    );
    db
});

/// Look up a chemical by its identifier.
///
/// Returns `ChemicalNotFound` for unknown identifiers rather than `None`,
/// so web callers get a structured error to display.
pub fn get(chemical_id: &str) -> CalcResult<&'static ChemicalProperties> {
    DATABASE
        .get(chemical_id)
        .ok_or_else(|| CalcError::chemical_not_found(chemical_id))
}

/// All chemicals in the database, keyed by identifier.
pub fn all() -> &'static HashMap<&'static str, ChemicalProperties> {
    &DATABASE
}

/// (id, display name) pairs for dropdown selection, sorted by id.
pub fn list() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<_> = DATABASE
        .iter()
        .map(|(id, props)| (*id, props.name.as_str()))
        .collect();
    entries.sort_by_key(|(id, _)| *id);
    entries
}

/// Chemicals filtered by category.
pub fn by_category(category: &str) -> Vec<(&'static str, &'static ChemicalProperties)> {
    DATABASE
        .iter()
        .filter(|(_, props)| props.category == category)
        .map(|(id, props)| (*id, props))
        .collect()
}

/// Case-insensitive search across name, formula, and category.
pub fn search(query: &str) -> Vec<(&'static str, &'static ChemicalProperties)> {
    let query = query.to_lowercase();
    DATABASE
        .iter()
        .filter(|(_, props)| {
            props.name.to_lowercase().contains(&query)
                || props.formula.to_lowercase().contains(&query)
                || props.category.to_lowercase().contains(&query)
        })
        .map(|(id, props)| (*id, props))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_acetic_acid() {
        let acid = get("acetic_acid").unwrap();
        assert_eq!(acid.formula, "CH3COOH");
        assert_eq!(acid.density_kg_m3.0, 1049.0);
        assert_eq!(acid.corrosion_allowance_mm, 1.5);
        assert_eq!(acid.corrosivity, Corrosivity::High);
    }

    #[test]
    fn test_unknown_chemical() {
        let err = get("benzene").unwrap_err();
        assert_eq!(err.error_code(), "CHEMICAL_NOT_FOUND");
    }

    #[test]
    fn test_list_is_sorted() {
        let entries = list();
        assert_eq!(entries.len(), 5);
        let ids: Vec<_> = entries.iter().map(|(id, _)| *id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_search_by_formula() {
        let hits = search("h2so4");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "sulfuric_acid");
    }

    #[test]
    fn test_by_category() {
        let esters = by_category("Ester");
        assert_eq!(esters.len(), 1);
        assert_eq!(esters[0].0, "ethyl_acetate");
    }

    #[test]
    fn test_properties_serialization() {
        let acid = get("acetic_acid").unwrap();
        let json = serde_json::to_string(acid).unwrap();
        let roundtrip: ChemicalProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(*acid, roundtrip);
    }
}
