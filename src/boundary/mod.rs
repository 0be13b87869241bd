//! Persistence and solver boundary.
//!
//! The only place slot keys exist as strings. Inside the crate the grid is
//! keyed by [`TimeSlotKey`](crate::models::TimeSlotKey).

mod document;
mod solver;

pub use document::{LoadReport, ScheduleDocument};
pub use solver::{ScheduleSolver, SolveRequest};
