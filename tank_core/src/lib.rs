//! # tank_core - Storage Tank Design Calculation Engine
//!
//! `tank_core` sizes atmospheric storage tanks to API 650: it converts a
//! production schedule and chemical properties into tank dimensions,
//! shell-course thicknesses (One-Foot Method), and bund volume. All inputs
//! and outputs are JSON-serializable so the engine drops behind any front
//! end (web form, CLI, export writers) without adaptation.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from input to result; identical input
//!   yields identical output, with no shared mutable state
//! - **Explicit configuration**: Rounding increments, plate tables, and
//!   margins travel in a [`rules::DesignRules`] value, never in globals
//! - **Fail fast**: All validation happens before any derived value is
//!   computed; no partial results
//! - **JSON-First**: All types implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use tank_core::calculations::tank_design::{calculate, DesignInput};
//! use tank_core::rules::DesignRules;
//!
//! // 50 tonnes/day of acetic acid, held for 10 days
//! let input = DesignInput::new(50.0, 10.0);
//! let result = calculate(&input, &DesignRules::default()).unwrap();
//!
//! println!(
//!     "{} tank(s), {:.1} m dia x {:.1} m, bottom course {} mm",
//!     result.num_tanks,
//!     result.dimensions.diameter.0,
//!     result.dimensions.height.0,
//!     result.governing_thickness().0,
//! );
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Volume, shell, bund, and assembly stages
//! - [`chemicals`] - Chemical property database (default values only)
//! - [`rules`] - Engine configuration: increments, plate table, bounds
//! - [`compare`] - Field-by-field diff of two design results
//! - [`caselog`] - Explicit container for recorded design cases
//! - [`units`] - Type-safe SI unit wrappers
//! - [`errors`] - Structured error types and sanity warnings

pub mod calculations;
pub mod caselog;
pub mod chemicals;
pub mod compare;
pub mod errors;
pub mod rules;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::tank_design::{calculate, DesignInput, DesignResult};
pub use errors::{CalcError, CalcResult, SanityWarning};
pub use rules::DesignRules;
