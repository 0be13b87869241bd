//! Sub-hour display precision on top of the hour-granular grid.
//!
//! The grid stores whole hours. A resize to 09:15-13:30 occupies hours
//! 9..14 in the grid and keeps the exact bounds here, keyed by employee and
//! day. The two tiers must agree on which hours are covered:
//! `floor(start)..ceil(end)` equals the employee's occupied hours that day.
//! [`PreciseOverrides::reconcile`] restores that after every edit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::AssignmentGrid;

/// Exact bounds of one employee's shift on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreciseShiftOverride {
    /// Fractional start hour.
    pub start: f64,
    /// Fractional end hour (exclusive).
    pub end: f64,
    /// Role the override was recorded for.
    pub role_id: String,
}

impl PreciseShiftOverride {
    /// Creates an override.
    pub fn new(start: f64, end: f64, role_id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            role_id: role_id.into(),
        }
    }

    /// Whole-hour range implied by the override: `[floor(start), ceil(end))`.
    pub fn hour_range(&self) -> (u8, u8) {
        (self.start.floor() as u8, self.end.ceil() as u8)
    }
}

/// Overrides keyed by `(employee_id, day)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreciseOverrides {
    entries: HashMap<(String, u8), PreciseShiftOverride>,
}

impl PreciseOverrides {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the override for an employee/day.
    pub fn get(&self, employee_id: &str, day: u8) -> Option<&PreciseShiftOverride> {
        self.entries.get(&(employee_id.to_string(), day))
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(employee_id, day, override)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8, &PreciseShiftOverride)> {
        self.entries
            .iter()
            .map(|((employee_id, day), o)| (employee_id.as_str(), *day, o))
    }

    /// Whether every override agrees with the grid on covered hours.
    pub fn is_consistent_with(&self, grid: &AssignmentGrid) -> bool {
        self.iter().all(|(employee_id, day, o)| {
            let (lo, hi) = o.hour_range();
            grid.hours_for(employee_id, day) == (lo..hi).collect::<Vec<_>>()
        })
    }

    pub(crate) fn remove(&mut self, employee_id: &str, day: u8) -> Option<PreciseShiftOverride> {
        self.entries.remove(&(employee_id.to_string(), day))
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-derives the employee/day override from the grid after an edit.
    ///
    /// `fresh` carries bounds written by the edit itself and wins over the
    /// existing override. Each edge keeps its fractional value only while
    /// the hour it falls in is still the first (or last) occupied hour; an
    /// edge that moved falls back to the whole hour. Non-contiguous or empty
    /// occupancy drops the override.
    pub(crate) fn reconcile(
        &mut self,
        grid: &AssignmentGrid,
        employee_id: &str,
        day: u8,
        role_id: &str,
        fresh: Option<(f64, f64)>,
    ) {
        let existing = self.remove(employee_id, day);
        if fresh.is_none() && existing.is_none() {
            return;
        }

        let hours = grid.hours_for(employee_id, day);
        let (first, last) = match (hours.first(), hours.last()) {
            (Some(&f), Some(&l)) if usize::from(l - f) + 1 == hours.len() => (f, l + 1),
            _ => return,
        };

        let starts = [fresh.map(|f| f.0), existing.as_ref().map(|o| o.start)];
        let ends = [fresh.map(|f| f.1), existing.as_ref().map(|o| o.end)];
        let start = starts
            .into_iter()
            .flatten()
            .find(|s| s.floor() == f64::from(first))
            .unwrap_or(f64::from(first));
        let end = ends
            .into_iter()
            .flatten()
            .find(|e| e.ceil() == f64::from(last))
            .unwrap_or(f64::from(last));

        let role_id = match (fresh, existing) {
            (None, Some(o)) => o.role_id,
            _ => role_id.to_string(),
        };
        self.entries.insert(
            (employee_id.to_string(), day),
            PreciseShiftOverride::new(start, end, role_id),
        );
    }
}
