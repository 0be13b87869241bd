//! Wire document exchanged with the solver and persistence.
//!
//! # Format
//!
//! ```json
//! {
//!   "slot_assignments": {
//!     "1,9":  [{"employeeId": "A", "roleId": "R", "viaSwap": false}],
//!     "1,10": [{"employeeId": "B", "roleId": "R", "viaSwap": true,
//!               "swappedFromEmployeeId": "C"}]
//!   }
//! }
//! ```
//!
//! Keys are `"<day>,<hour>"` with no padding. Record fields are written in
//! camelCase; snake_case names are accepted on input. Loading tolerates bad input:
//! malformed keys, slots outside business hours, and duplicate employees in
//! a slot are skipped and reported, the rest of the grid loads normally.
//! Fields of the document other than `slot_assignments` are preserved
//! verbatim so the host can round-trip solver metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::models::{AssignmentGrid, AssignmentRecord, TimeSlotKey};

/// The schedule object crossing the persistence boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    /// `"<day>,<hour>"` → records.
    #[serde(default)]
    pub slot_assignments: BTreeMap<String, Vec<AssignmentRecord>>,
    /// Other top-level fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of loading a document into a grid.
#[derive(Debug)]
pub struct LoadReport {
    /// Grid built from the well-formed part of the document.
    pub grid: AssignmentGrid,
    /// Keys or records that were skipped, with the reason.
    pub skipped: Vec<GridError>,
}

impl LoadReport {
    /// Whether everything in the document loaded.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl ScheduleDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes a grid. Every occupied slot becomes one key.
    pub fn from_grid(grid: &AssignmentGrid) -> Self {
        let slot_assignments = grid
            .iter()
            .map(|(key, records)| (key.to_string(), records.to_vec()))
            .collect();
        Self {
            slot_assignments,
            extra: serde_json::Map::new(),
        }
    }

    /// Builds a grid, skipping (and reporting) anything that violates the
    /// grid's invariants.
    pub fn load(&self, config: &GridConfig) -> LoadReport {
        let mut grid = AssignmentGrid::new();
        let mut skipped = Vec::new();

        for (raw_key, records) in &self.slot_assignments {
            let key = match raw_key.parse::<TimeSlotKey>() {
                Ok(k) => k,
                Err(e) => {
                    warn!(key = %raw_key, "skipping malformed slot key");
                    skipped.push(e);
                    continue;
                }
            };
            if !config.contains_hour(key.hour) {
                warn!(key = %raw_key, "skipping slot outside business hours");
                let hour = f64::from(key.hour);
                skipped.push(config.out_of_hours(hour, hour + 1.0));
                continue;
            }
            for record in records {
                if let Err(e) = grid.insert(key, record.clone()) {
                    warn!(
                        key = %raw_key,
                        employee = %record.employee_id,
                        "skipping duplicate record"
                    );
                    skipped.push(e);
                }
            }
        }

        LoadReport { grid, skipped }
    }
}
