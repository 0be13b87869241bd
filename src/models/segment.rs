//! Shift segment: a contiguous run of hours derived from the grid.
//!
//! Segments are recomputed on every render and never stored. Storage
//! bounds (`start_hour`, `end_hour`) are whole hours; the display bounds
//! default to the same values and are refined by
//! [`apply_overrides`](crate::engine::apply_overrides) when a precise
//! override exists.

use serde::{Deserialize, Serialize};

/// A maximal run of hours worked by one employee on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSegment {
    /// Employee working the run.
    pub employee_id: String,
    /// Roles worked, in order of first appearance. Holds exactly one role
    /// when reconstructed per role.
    pub roles: Vec<String>,
    /// Day of week.
    pub day: u8,
    /// First hour (inclusive).
    pub start_hour: u8,
    /// Last hour (exclusive).
    pub end_hour: u8,
    /// Display start; fractional when a precise override applies.
    pub start: f64,
    /// Display end; fractional when a precise override applies.
    pub end: f64,
    /// Whether any hour of the run came from a swap.
    pub via_swap: bool,
    /// Giver of the first swapped hour in the run.
    pub swapped_from_employee_id: Option<String>,
}

impl ShiftSegment {
    /// Creates a single-role segment over `[start_hour, end_hour)`.
    pub fn new(
        employee_id: impl Into<String>,
        role_id: impl Into<String>,
        day: u8,
        start_hour: u8,
        end_hour: u8,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            roles: vec![role_id.into()],
            day,
            start_hour,
            end_hour,
            start: f64::from(start_hour),
            end: f64::from(end_hour),
            via_swap: false,
            swapped_from_employee_id: None,
        }
    }

    /// Primary role (first worked).
    pub fn role_id(&self) -> &str {
        self.roles.first().map(String::as_str).unwrap_or("")
    }

    /// Whether the run spans more than one role.
    pub fn is_mixed_role(&self) -> bool {
        self.roles.len() > 1
    }

    /// Stored length in whole hours.
    #[inline]
    pub fn hour_count(&self) -> u8 {
        self.end_hour - self.start_hour
    }

    /// Display length in hours.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the display bounds differ from the stored whole hours.
    pub fn is_precise(&self) -> bool {
        self.start != f64::from(self.start_hour) || self.end != f64::from(self.end_hour)
    }

    /// Whether the stored run covers `hour`.
    #[inline]
    pub fn covers_hour(&self, hour: u8) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}
