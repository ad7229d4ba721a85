//! # Design Calculations
//!
//! The calculation stages of the engine, each a pure function:
//!
//! - [`volume`] - Storage volume and diameter/height optimization
//! - [`shell`] - Shell course thickness, API 650 One-Foot Method
//! - [`bund`] - Secondary containment sizing
//! - [`tank_design`] - Result assembly and cross-validation
//!
//! The top-level entry point is [`tank_design::calculate`], which runs the
//! stages in order and returns a complete [`tank_design::DesignResult`].
//! The stage functions are public so callers can run trade studies on a
//! single stage (the CLI's thickness-versus-height chart does this).

pub mod bund;
pub mod shell;
pub mod tank_design;
pub mod volume;

// Re-export commonly used types
pub use shell::ShellCourse;
pub use tank_design::{calculate, DesignInput, DesignResult};
pub use volume::{StorageVolume, TankDimensions};
