//! Read-side adapters for renderers and reporting.

mod adapter;
mod kpi;

pub use adapter::{DayBlocks, GapBlock, RosterView, ShiftBlock, TableRow};
pub use kpi::RosterKpi;
