//! Weekly staff roster engine.
//!
//! Stores who works when as a sparse hour-granular grid, reconstructs
//! continuous shifts from it, lays overlapping shifts out into
//! non-colliding columns, and edits the grid through a single mutator that
//! keeps its invariants under sub-hour interactive dragging.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlotKey`, `AssignmentRecord`,
//!   `AssignmentGrid`, `ShiftSegment`, `PreciseShiftOverride`, `RosterContext`
//! - **`engine`**: Segment reconstruction, overlap layout, coverage gaps
//! - **`editing`**: `GridMutator` (create, move, resize, delete, swap) and drag previews
//! - **`boundary`**: Wire document and solver seam
//! - **`view`**: Renderer adapter and roster KPIs
//! - **`validation`**: Reference and consistency checks
//!
//! # Architecture
//!
//! The grid is the only source of truth; everything else is derived on
//! demand. Persistence, rendering, and solving live outside this crate and
//! talk to it through [`ScheduleDocument`](boundary::ScheduleDocument),
//! [`RosterView`](view::RosterView), and
//! [`ScheduleSolver`](boundary::ScheduleSolver).
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1 (Interval Partitioning)
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

pub mod boundary;
pub mod config;
pub mod editing;
pub mod engine;
pub mod error;
pub mod models;
pub mod roster;
pub mod validation;
pub mod view;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use models::RosterContext;
pub use roster::Roster;
