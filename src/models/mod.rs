//! Roster domain models.
//!
//! The assignment grid is the single source of truth. Segments and precise
//! overrides are derived from it; the context is host-supplied lookup data.
//!
//! | Type | Role |
//! |------|------|
//! | [`TimeSlotKey`] | One hour of one day |
//! | [`AssignmentRecord`] | Employee + role in a slot, with swap provenance |
//! | [`AssignmentGrid`] | Sparse slot → records store |
//! | [`ShiftSegment`] | Contiguous run reconstructed from the grid |
//! | [`PreciseShiftOverride`] | Sub-hour bounds for one employee/day |
//! | [`RosterContext`] | Employee and role lookup |

mod context;
mod grid;
mod precise;
mod record;
mod segment;
mod slot;

pub use context::{Employee, Role, RosterContext};
pub use grid::AssignmentGrid;
pub use precise::{PreciseOverrides, PreciseShiftOverride};
pub use record::AssignmentRecord;
pub use segment::ShiftSegment;
pub use slot::{TimeSlotKey, DAYS_PER_WEEK};
