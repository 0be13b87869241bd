//! Error taxonomy for roster editing and loading.
//!
//! Every mutation error is raised during validation, before the grid is
//! written. A rejected edit leaves the roster exactly as it was.

use thiserror::Error;

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised by the grid, its mutator, and the persistence boundary.
#[derive(Error, Debug)]
pub enum GridError {
    /// Requested range leaves the business-hour window.
    #[error("shift {start}-{end} would extend outside business hours {open}-{close}")]
    OutOfBusinessHours {
        start: f64,
        end: f64,
        open: u8,
        close: u8,
    },

    /// End is at or before start.
    #[error("shift end {end} must be after start {start}")]
    InvertedRange { start: f64, end: f64 },

    /// Snapped duration is below the minimum shift length.
    #[error("shift of {minutes} minutes is shorter than the {min_minutes}-minute minimum")]
    ShiftTooShort { minutes: u32, min_minutes: u32 },

    /// Employee already holds a record in the slot.
    #[error("employee '{employee_id}' is already assigned on day {day} at {hour}:00")]
    EmployeeAlreadyAssigned {
        employee_id: String,
        day: u8,
        hour: u8,
    },

    /// Swap giver does not work an hour of the transferred range.
    #[error("employee '{employee_id}' is not assigned on day {day} at {hour}:00")]
    EmployeeNotAssigned {
        employee_id: String,
        day: u8,
        hour: u8,
    },

    /// Inbound slot key does not parse as `"<day>,<hour>"`.
    #[error("malformed slot key '{0}'")]
    MalformedSlotKey(String),

    /// Day index outside the week.
    #[error("day {0} is outside the week (0-6)")]
    InvalidDay(u8),

    /// Configuration rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure reported by the external schedule solver.
    #[error("solver failed: {0}")]
    Solver(String),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing error.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl GridError {
    /// Whether this error came from rejecting an edit (as opposed to I/O or
    /// configuration). Renderers show these to the user and keep the prior
    /// render state.
    pub fn is_edit_rejection(&self) -> bool {
        matches!(
            self,
            GridError::OutOfBusinessHours { .. }
                | GridError::InvertedRange { .. }
                | GridError::ShiftTooShort { .. }
                | GridError::EmployeeAlreadyAssigned { .. }
                | GridError::EmployeeNotAssigned { .. }
                | GridError::InvalidDay(_)
        )
    }
}
