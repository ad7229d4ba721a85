//! # Design Case Log
//!
//! Container for successive design cases so alternatives can be compared
//! side by side. The engine itself stays stateless; the log is an explicit
//! value the caller owns, passes around, and serializes — never hidden
//! session state.
//!
//! ## Structure
//!
//! ```text
//! CaseLog
//! ├── meta: CaseLogMetadata (version, engineer, job info, timestamps)
//! └── cases: HashMap<Uuid, DesignCase> (input + result pairs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tank_core::calculations::tank_design::{calculate, DesignInput};
//! use tank_core::caselog::CaseLog;
//! use tank_core::rules::DesignRules;
//!
//! let mut log = CaseLog::new("Jane Engineer", "26-014", "Process Plant Ltd");
//!
//! let input = DesignInput::new(50.0, 10.0);
//! let result = calculate(&input, &DesignRules::default()).unwrap();
//! let id = log.add_case("Base case", input, result);
//! assert!(log.get_case(&id).is_some());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::tank_design::{DesignInput, DesignResult};
use crate::compare::CaseComparison;

/// Current schema version for serialized case logs
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One stored design case: the input that produced a result, kept together
/// so any case can be reproduced or re-run later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignCase {
    /// User label for the case (e.g., "Base case", "Two-tank option")
    pub label: String,

    /// When the case was recorded
    pub created: DateTime<Utc>,

    /// The validated input
    pub input: DesignInput,

    /// The immutable result
    pub result: DesignResult,
}

/// Metadata stored alongside the cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseLogMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the log was created
    pub created: DateTime<Utc>,

    /// When the log was last modified
    pub modified: DateTime<Utc>,
}

/// Root container for design cases, keyed by UUID for stable references
/// when cases are relabeled or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseLog {
    /// Log metadata
    pub meta: CaseLogMetadata,

    /// All recorded cases
    pub cases: HashMap<Uuid, DesignCase>,
}

impl CaseLog {
    /// Create a new empty case log.
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        CaseLog {
            meta: CaseLogMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            cases: HashMap::new(),
        }
    }

    /// Record a design case. Returns the UUID assigned to it.
    pub fn add_case(
        &mut self,
        label: impl Into<String>,
        input: DesignInput,
        result: DesignResult,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.cases.insert(
            id,
            DesignCase {
                label: label.into(),
                created: Utc::now(),
                input,
                result,
            },
        );
        self.touch();
        id
    }

    /// Get a case by UUID.
    pub fn get_case(&self, id: &Uuid) -> Option<&DesignCase> {
        self.cases.get(id)
    }

    /// Remove a case by UUID. Returns the removed case if it existed.
    pub fn remove_case(&mut self, id: &Uuid) -> Option<DesignCase> {
        let case = self.cases.remove(id);
        if case.is_some() {
            self.touch();
        }
        case
    }

    /// Number of recorded cases.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Compare two recorded cases field by field.
    pub fn compare(&self, base: &Uuid, other: &Uuid) -> Option<CaseComparison> {
        let base = self.get_case(base)?;
        let other = self.get_case(other)?;
        Some(CaseComparison::between(&base.result, &other.result))
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for CaseLog {
    fn default() -> Self {
        CaseLog::new("", "", "")
    }
}
