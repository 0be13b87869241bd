//! Pure derivation from the grid: reconstruction and layout.
//!
//! Nothing here writes to the grid or keeps state between calls. Renderers
//! call these on every frame, including during drag previews.
//!
//! # Pipeline
//!
//! ```text
//! AssignmentGrid ──reconstruct──▶ ShiftSegment[] ──apply_overrides──▶ display bounds
//!                                       │
//!                 coverage_gaps ──▶ CoverageGap[]
//!                                       │
//!                                       ▼
//!                                  layout ──▶ DayLayout
//! ```

mod gaps;
mod layout;
mod reconstruct;

pub use gaps::{coverage_gaps, CoverageGap};
pub use layout::{
    layout, max_overlap, overlaps, DayLayout, Interval, IntervalClass, LayoutAssignment, Span,
};
pub use reconstruct::{
    apply_overrides, display_segments, reconstruct, ReconstructScope, RoleMode,
};
