//! Editing: the grid mutator and drag previews.
//!
//! [`GridMutator`] is the only code path that writes to an
//! [`AssignmentGrid`](crate::models::AssignmentGrid). [`DragPreview`]
//! computes hypothetical edits for interactive gestures and hands the final
//! one to the mutator.

mod mutator;
mod preview;

pub use mutator::{GridMutator, ShiftRef, SwapTransfer};
pub use preview::{DragGesture, DragPreview, PreviewLayout, Proposal};
