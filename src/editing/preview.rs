//! Drag previews: hypothetical edits that never touch the grid.
//!
//! A gesture starts a [`DragPreview`], feeds it pointer positions with
//! [`update`](DragPreview::update) on every mouse move, and asks it for the
//! hypothetical day layout to draw. Only [`commit`](DragPreview::commit)
//! calls the mutator, exactly once. Dropping a preview cancels the gesture;
//! there is nothing to roll back.

use crate::config::GridConfig;
use crate::engine::{layout, overlaps, DayLayout, Span};
use crate::error::{GridError, Result};
use crate::models::ShiftSegment;

use super::mutator::{check_day, check_range, check_resize, GridMutator, ShiftRef};

/// What the pointer is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum DragGesture {
    /// Painting a new shift from `anchor` to the pointer.
    Create {
        employee_id: String,
        role_id: String,
        anchor: f64,
    },
    /// Dragging a whole shift; `grab_offset` is pointer minus shift start.
    Move { shift: ShiftRef, grab_offset: f64 },
    /// Dragging a shift's start edge.
    ResizeStart { shift: ShiftRef },
    /// Dragging a shift's end edge.
    ResizeEnd { shift: ShiftRef },
}

/// Bounds the gesture would commit, with the validation outcome.
#[derive(Debug)]
pub struct Proposal {
    /// Target day.
    pub day: u8,
    /// Snapped start.
    pub start: f64,
    /// Snapped end.
    pub end: f64,
    /// Why the mutator would reject this, if it would.
    pub rejection: Option<GridError>,
}

impl Proposal {
    /// Whether committing would succeed.
    pub fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }

    /// The proposal as a layout interval.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Layout of a day with the proposal placed among the other shifts.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    /// Other shifts of the day followed by the proposal (last).
    pub spans: Vec<Span>,
    /// Placement parallel to `spans`.
    pub layout: DayLayout,
}

impl PreviewLayout {
    /// Index of the proposal in `spans`.
    pub fn proposal_index(&self) -> usize {
        self.spans.len().saturating_sub(1)
    }
}

/// An in-progress drag gesture.
#[derive(Debug)]
pub struct DragPreview {
    config: GridConfig,
    gesture: DragGesture,
    proposal: Option<Proposal>,
}

impl DragPreview {
    /// Starts painting a new shift at `anchor` on `day`.
    pub fn create(
        config: &GridConfig,
        employee_id: impl Into<String>,
        role_id: impl Into<String>,
        day: u8,
        anchor: f64,
    ) -> Self {
        let mut preview = Self::start(
            config,
            DragGesture::Create {
                employee_id: employee_id.into(),
                role_id: role_id.into(),
                anchor,
            },
        );
        preview.update(day, anchor);
        preview
    }

    /// Starts dragging `shift`, grabbed at `grab_hour`.
    pub fn move_shift(config: &GridConfig, shift: ShiftRef, grab_hour: f64) -> Self {
        let grab_offset = grab_hour - shift.start;
        Self::start(config, DragGesture::Move { shift, grab_offset })
    }

    /// Starts dragging the start edge of `shift`.
    pub fn resize_start(config: &GridConfig, shift: ShiftRef) -> Self {
        Self::start(config, DragGesture::ResizeStart { shift })
    }

    /// Starts dragging the end edge of `shift`.
    pub fn resize_end(config: &GridConfig, shift: ShiftRef) -> Self {
        Self::start(config, DragGesture::ResizeEnd { shift })
    }

    fn start(config: &GridConfig, gesture: DragGesture) -> Self {
        Self {
            config: config.clone(),
            gesture,
            proposal: None,
        }
    }

    /// The gesture in progress.
    pub fn gesture(&self) -> &DragGesture {
        &self.gesture
    }

    /// Latest proposal, if the pointer has moved since the gesture began.
    pub fn proposal(&self) -> Option<&Proposal> {
        self.proposal.as_ref()
    }

    /// Recomputes the proposal for a pointer at `hour` over `day`.
    ///
    /// Resize gestures stay on the shift's own day regardless of `day`.
    pub fn update(&mut self, day: u8, hour: f64) -> &Proposal {
        let c = &self.config;
        let (day, start, end, check) = match &self.gesture {
            DragGesture::Create { anchor, .. } => {
                let (a, b) = (c.snap(*anchor), c.snap(hour));
                let (start, end) = (a.min(b), a.max(b));
                (day, start, end, check_range(c, start, end))
            }
            DragGesture::Move { shift, grab_offset } => {
                let start = c.snap(hour - grab_offset);
                let end = start + shift.duration();
                (day, start, end, check_range(c, start, end))
            }
            DragGesture::ResizeStart { shift } => {
                let start = c.snap(hour);
                let end = c.snap(shift.end);
                (shift.day, start, end, check_resize(c, start, end))
            }
            DragGesture::ResizeEnd { shift } => {
                let start = c.snap(shift.start);
                let end = c.snap(hour);
                (shift.day, start, end, check_resize(c, start, end))
            }
        };
        let rejection = check_day(day).and(check).err();

        self.proposal.insert(Proposal {
            day,
            start,
            end,
            rejection,
        })
    }

    /// Lays out `day_segments` with the dragged shift at its proposed place.
    ///
    /// `day_segments` are the reconstructed segments of the proposal's day;
    /// the shift being dragged (same employee, same day, overlapping the
    /// original bounds) is left out and replaced by the proposal. Returns
    /// `None` before the first update.
    pub fn layout_with(&self, day_segments: &[ShiftSegment]) -> Option<PreviewLayout> {
        let proposal = self.proposal.as_ref()?;
        let dragged = match &self.gesture {
            DragGesture::Create { .. } => None,
            DragGesture::Move { shift, .. }
            | DragGesture::ResizeStart { shift }
            | DragGesture::ResizeEnd { shift } => Some(shift),
        };

        let mut spans: Vec<Span> = day_segments
            .iter()
            .filter(|seg| proposal.day == seg.day)
            .filter(|seg| match dragged {
                Some(s) => {
                    !(seg.employee_id == s.employee_id
                        && seg.day == s.day
                        && overlaps(*seg, &Span::new(s.start, s.end)))
                }
                None => true,
            })
            .map(Span::of)
            .collect();
        spans.push(proposal.span());

        let layout = layout(&spans);
        Some(PreviewLayout { spans, layout })
    }

    /// Commits the gesture through the mutator.
    ///
    /// Returns `Ok(false)` if the pointer never moved (nothing to commit),
    /// the mutator's error if the proposal is invalid, and `Ok(true)` once
    /// the single mutation has been applied.
    pub fn commit(self, editor: &mut GridMutator<'_>) -> Result<bool> {
        let Some(proposal) = self.proposal else {
            return Ok(false);
        };
        if let Some(err) = proposal.rejection {
            return Err(err);
        }

        match &self.gesture {
            DragGesture::Create {
                employee_id,
                role_id,
                ..
            } => editor.create(employee_id, role_id, proposal.day, proposal.start, proposal.end)?,
            DragGesture::Move { shift, .. } => {
                editor.move_shift(shift, proposal.day, proposal.start)?
            }
            DragGesture::ResizeStart { shift } | DragGesture::ResizeEnd { shift } => {
                editor.resize(shift, proposal.start, proposal.end)?
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{reconstruct, ReconstructScope, RoleMode};
    use crate::{GridConfig, Roster};

    fn roster() -> Roster {
        let mut r = Roster::new(GridConfig::default()).unwrap();
        r.editor().create("A", "R", 1, 9.0, 13.0).unwrap();
        r.editor().create("B", "R", 1, 12.0, 15.0).unwrap();
        r
    }

    fn day_segments(r: &Roster, day: u8) -> Vec<ShiftSegment> {
        reconstruct(r.grid(), r.config(), &ReconstructScope::day(day), RoleMode::Merged)
    }

    #[test]
    fn test_move_preview_does_not_touch_grid() {
        let r = roster();
        let before = r.grid().clone();
        let shift = ShiftRef::new("A", "R", 1, 9.0, 13.0);
        let mut p = DragPreview::move_shift(r.config(), shift, 10.0);

        for hour in [10.3, 11.1, 12.6, 13.0] {
            p.update(1, hour);
        }
        let proposal = p.proposal().unwrap();
        assert_eq!((proposal.start, proposal.end), (12.0, 16.0));
        assert!(proposal.is_valid());
        assert_eq!(r.grid(), &before);
    }

    #[test]
    fn test_preview_layout_replaces_dragged_shift() {
        let r = roster();
        let mut p = DragPreview::move_shift(r.config(), ShiftRef::new("A", "R", 1, 9.0, 13.0), 9.0);
        p.update(1, 15.0);

        let preview = p.layout_with(&day_segments(&r, 1)).unwrap();
        assert_eq!(preview.spans.len(), 2);
        assert_eq!(preview.proposal_index(), 1);
        // B (12-15) only touches the proposal (15-19).
        assert_eq!(preview.layout.total_columns, 1);
        assert!(!p.proposal().unwrap().is_valid());
    }

    #[test]
    fn test_preview_layout_shows_collision() {
        let r = roster();
        let mut p = DragPreview::move_shift(r.config(), ShiftRef::new("A", "R", 1, 9.0, 13.0), 9.0);
        p.update(1, 11.0);
        let preview = p.layout_with(&day_segments(&r, 1)).unwrap();
        assert_eq!(preview.layout.total_columns, 2);
        // The proposal (11-15) starts before B (12-15) and keeps column 0.
        assert_eq!(preview.layout.get(preview.proposal_index()).unwrap().column, 0);
        assert_eq!(preview.layout.get(0).unwrap().column, 1);
    }

    #[test]
    fn test_commit_move_applies_once() {
        let mut r = roster();
        let mut p = DragPreview::move_shift(r.config(), ShiftRef::new("A", "R", 1, 9.0, 13.0), 9.0);
        p.update(2, 10.0);
        assert!(p.commit(&mut r.editor()).unwrap());
        assert_eq!(r.grid().hours_for("A", 2), vec![10, 11, 12, 13]);
        assert!(r.grid().hours_for("A", 1).is_empty());
    }

    #[test]
    fn test_commit_invalid_returns_error_without_writes() {
        let mut r = roster();
        let before = r.grid().clone();
        let mut p = DragPreview::resize_end(r.config(), ShiftRef::new("A", "R", 1, 9.0, 13.0));
        p.update(1, 18.0);
        let err = p.commit(&mut r.editor()).unwrap_err();
        assert!(matches!(err, GridError::OutOfBusinessHours { .. }));
        assert_eq!(r.grid(), &before);
    }

    #[test]
    fn test_create_preview_accepts_backwards_drag() {
        let mut r = roster();
        let mut p = DragPreview::create(r.config(), "C", "R", 3, 14.0);
        assert!(!p.proposal().unwrap().is_valid());
        p.update(3, 10.9);
        let proposal = p.proposal().unwrap();
        assert_eq!((proposal.start, proposal.end), (11.0, 14.0));
        assert!(p.commit(&mut r.editor()).unwrap());
        assert_eq!(r.grid().hours_for("C", 3), vec![11, 12, 13]);
    }

    #[test]
    fn test_resize_start_preview_snaps() {
        let mut r = roster();
        let mut p = DragPreview::resize_start(r.config(), ShiftRef::new("B", "R", 1, 12.0, 15.0));
        p.update(4, 10.4);
        let proposal = p.proposal().unwrap();
        assert_eq!(proposal.day, 1);
        assert_eq!((proposal.start, proposal.end), (10.5, 15.0));
        assert!(p.commit(&mut r.editor()).unwrap());
        let o = r.overrides().get("B", 1).unwrap();
        assert_eq!((o.start, o.end), (10.5, 15.0));
    }

    #[test]
    fn test_cancel_is_drop() {
        let r = roster();
        let before = r.grid().clone();
        {
            let mut p = DragPreview::create(r.config(), "C", "R", 1, 9.0);
            p.update(1, 12.0);
        }
        assert_eq!(r.grid(), &before);
    }

    #[test]
    fn test_commit_without_update_is_noop() {
        let mut r = roster();
        let p = DragPreview::resize_end(r.config(), ShiftRef::new("A", "R", 1, 9.0, 13.0));
        assert!(!p.commit(&mut r.editor()).unwrap());
    }
}
