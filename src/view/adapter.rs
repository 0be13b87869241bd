//! Renderer-facing adapter shared by the timeline, grid, and table views.
//!
//! Each view asks for segments and layouts here and only does its own
//! pixel/percentage placement. Admin and employee views differ in what they
//! may call on [`Roster`](crate::Roster) (the employee view never gets an
//! editor), not in how shifts are derived.

use serde::Serialize;

use crate::config::GridConfig;
use crate::engine::{
    coverage_gaps, display_segments, layout, CoverageGap, DayLayout, LayoutAssignment,
    ReconstructScope, RoleMode, Span,
};
use crate::models::{AssignmentGrid, PreciseOverrides, RosterContext, ShiftSegment, DAYS_PER_WEEK};

/// A shift ready to draw: segment, placement, and display labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftBlock {
    /// Derived segment with display bounds.
    pub segment: ShiftSegment,
    /// Column placement within the day.
    pub layout: LayoutAssignment,
    /// Employee display name.
    pub employee_name: String,
    /// Role display names, parallel to `segment.roles`.
    pub role_names: Vec<String>,
    /// Color of the primary role.
    pub color: Option<String>,
    /// Display name of the swap giver, for swap-derived shifts.
    pub swapped_from_name: Option<String>,
}

/// An unstaffed run ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapBlock {
    /// The gap.
    pub gap: CoverageGap,
    /// Column placement (gaps are placed after all shifts).
    pub layout: LayoutAssignment,
}

/// Everything a day column/row needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBlocks {
    /// Day of week.
    pub day: u8,
    /// Shifts, in reconstruction order.
    pub shifts: Vec<ShiftBlock>,
    /// Coverage gaps, in hour order.
    pub gaps: Vec<GapBlock>,
    /// Columns used by the day (at least 1).
    pub total_columns: usize,
}

/// One employee's row in the tabular view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Employee ID.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Segments per day (index = day).
    pub days: Vec<Vec<ShiftSegment>>,
    /// Scheduled hours across the week (display precision).
    pub total_hours: f64,
}

/// Read-only view of a roster under a lookup context.
#[derive(Debug, Clone, Copy)]
pub struct RosterView<'a> {
    grid: &'a AssignmentGrid,
    overrides: &'a PreciseOverrides,
    config: &'a GridConfig,
    context: &'a RosterContext,
}

impl<'a> RosterView<'a> {
    pub(crate) fn new(
        grid: &'a AssignmentGrid,
        overrides: &'a PreciseOverrides,
        config: &'a GridConfig,
        context: &'a RosterContext,
    ) -> Self {
        Self {
            grid,
            overrides,
            config,
            context,
        }
    }

    /// Segments in scope, with precise display bounds applied.
    pub fn segments(&self, scope: &ReconstructScope, mode: RoleMode) -> Vec<ShiftSegment> {
        display_segments(self.grid, self.overrides, self.config, scope, mode)
    }

    /// Column layout for one day's segments.
    pub fn layout(&self, day_segments: &[ShiftSegment]) -> DayLayout {
        layout(day_segments)
    }

    /// Shifts and coverage gaps of one day, laid out together.
    pub fn day_blocks(&self, day: u8, mode: RoleMode) -> DayBlocks {
        let segments = self.segments(&ReconstructScope::day(day), mode);
        let gaps = if day < DAYS_PER_WEEK {
            coverage_gaps(self.grid, self.config, day)
        } else {
            Vec::new()
        };

        let spans: Vec<Span> = segments
            .iter()
            .map(Span::of)
            .chain(gaps.iter().map(Span::of))
            .collect();
        let placed = layout(&spans);
        let (shift_cols, gap_cols) = placed.assignments.split_at(segments.len());

        let shifts = segments
            .into_iter()
            .zip(shift_cols)
            .map(|(segment, &layout)| self.block(segment, layout))
            .collect();
        let gaps = gaps
            .into_iter()
            .zip(gap_cols)
            .map(|(gap, &layout)| GapBlock { gap, layout })
            .collect();

        DayBlocks {
            day,
            shifts,
            gaps,
            total_columns: placed.total_columns,
        }
    }

    /// Read-only week of one employee, with swap annotations.
    pub fn employee_week(&self, employee_id: &str) -> Vec<ShiftBlock> {
        self.segments(&ReconstructScope::employee(employee_id), RoleMode::Merged)
            .into_iter()
            .map(|segment| {
                self.block(
                    segment,
                    LayoutAssignment {
                        column: 0,
                        total_columns: 1,
                    },
                )
            })
            .collect()
    }

    /// Employee × day table. Context employees come first in registration
    /// order, then employees found only in the grid.
    pub fn week_table(&self, mode: RoleMode) -> Vec<TableRow> {
        let mut ids: Vec<&str> = self.context.employees().map(|e| e.id.as_str()).collect();
        for id in self.grid.employees() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        ids.into_iter()
            .map(|id| {
                let mut days = vec![Vec::new(); usize::from(DAYS_PER_WEEK)];
                for seg in self.segments(&ReconstructScope::employee(id), mode) {
                    days[usize::from(seg.day)].push(seg);
                }
                let total_hours: f64 = days.iter().flatten().map(ShiftSegment::duration).sum();
                TableRow {
                    employee_id: id.to_string(),
                    employee_name: self.context.employee_name(id).to_string(),
                    days,
                    total_hours,
                }
            })
            .collect()
    }

    fn block(&self, segment: ShiftSegment, layout: LayoutAssignment) -> ShiftBlock {
        let ctx = self.context;
        ShiftBlock {
            employee_name: ctx.employee_name(&segment.employee_id).to_string(),
            role_names: segment
                .roles
                .iter()
                .map(|r| ctx.role_name(r).to_string())
                .collect(),
            color: ctx.role(segment.role_id()).and_then(|r| r.color.clone()),
            swapped_from_name: segment
                .swapped_from_employee_id
                .as_deref()
                .map(|id| ctx.employee_name(id).to_string()),
            segment,
            layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{ShiftRef, SwapTransfer};
    use crate::models::{Employee, Role};
    use crate::Roster;

    fn context() -> RosterContext {
        RosterContext::new()
            .with_employee(Employee::new("A", "Alice"))
            .with_employee(Employee::new("B", "Bob"))
            .with_employee(Employee::new("Z", "Zoe"))
            .with_role(Role::new("R", "Register").with_color("#3366ff"))
            .with_role(Role::new("K", "Kitchen"))
    }

    #[test]
    fn test_day_blocks_shifts_and_gaps() {
        let mut roster = Roster::new(GridConfig::default()).unwrap();
        roster.editor().create("A", "R", 2, 9.0, 12.0).unwrap();
        roster.editor().create("B", "K", 2, 10.0, 13.0).unwrap();

        let ctx = context();
        let blocks = roster.view(&ctx).day_blocks(2, RoleMode::Merged);

        assert_eq!(blocks.shifts.len(), 2);
        assert_eq!(blocks.shifts[0].employee_name, "Alice");
        assert_eq!(blocks.shifts[0].role_names, vec!["Register"]);
        assert_eq!(blocks.shifts[0].color.as_deref(), Some("#3366ff"));
        assert_eq!(blocks.shifts[0].layout.column, 0);
        assert_eq!(blocks.shifts[1].layout.column, 1);

        // One gap, 13-17, fits back into column 0.
        assert_eq!(blocks.gaps.len(), 1);
        assert_eq!(blocks.gaps[0].gap.start_hour, 13);
        assert_eq!(blocks.gaps[0].layout.column, 0);
        assert_eq!(blocks.total_columns, 2);
    }

    #[test]
    fn test_day_blocks_empty_day() {
        let roster = Roster::new(GridConfig::default()).unwrap();
        let ctx = context();
        let blocks = roster.view(&ctx).day_blocks(0, RoleMode::Merged);
        assert!(blocks.shifts.is_empty());
        assert_eq!(blocks.gaps.len(), 1);
        assert_eq!(blocks.total_columns, 1);
    }

    #[test]
    fn test_segments_use_precise_bounds() {
        let mut roster = Roster::new(GridConfig::default()).unwrap();
        roster.editor().create("A", "R", 1, 9.5, 12.25).unwrap();
        let ctx = context();
        let segs = roster
            .view(&ctx)
            .segments(&ReconstructScope::all(), RoleMode::Merged);
        assert_eq!(segs.len(), 1);
        assert_eq!((segs[0].start, segs[0].end), (9.5, 12.25));
        assert_eq!((segs[0].start_hour, segs[0].end_hour), (9, 13));
    }

    #[test]
    fn test_employee_week_shows_swap_giver() {
        let mut roster = Roster::new(GridConfig::default()).unwrap();
        roster.editor().create("A", "R", 4, 9.0, 13.0).unwrap();
        let shift = ShiftRef::new("A", "R", 4, 9.0, 13.0);
        roster
            .editor()
            .apply_swap(&SwapTransfer::of_shift(&shift, "B"))
            .unwrap();

        let ctx = context();
        let week = roster.view(&ctx).employee_week("B");
        assert_eq!(week.len(), 1);
        assert!(week[0].segment.via_swap);
        assert_eq!(week[0].swapped_from_name.as_deref(), Some("Alice"));
        assert!(roster.view(&ctx).employee_week("A").is_empty());
    }

    #[test]
    fn test_week_table_rows() {
        let mut roster = Roster::new(GridConfig::default()).unwrap();
        roster.editor().create("B", "R", 0, 9.0, 11.0).unwrap();
        roster.editor().create("B", "R", 3, 14.0, 16.5).unwrap();
        roster.editor().create("X", "K", 1, 9.0, 10.0).unwrap();

        let ctx = context();
        let rows = roster.view(&ctx).week_table(RoleMode::Merged);
        let ids: Vec<_> = rows.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "Z", "X"]);

        let bob = &rows[1];
        assert_eq!(bob.days[0].len(), 1);
        assert_eq!(bob.days[3].len(), 1);
        assert!((bob.total_hours - 4.5).abs() < 1e-9);

        // Unknown employees fall back to their ID.
        assert_eq!(rows[3].employee_name, "X");
        assert_eq!(rows[0].total_hours, 0.0);
    }
}
