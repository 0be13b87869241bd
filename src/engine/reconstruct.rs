//! Segment reconstruction: grid → contiguous shift runs.
//!
//! # Algorithm
//!
//! For each day in scope, walk business hours in ascending order and
//! collect, per employee, the hours they appear in (employees ordered by
//! first appearance). Each employee's hour list is then scanned once:
//! whenever the next hour is not `previous + 1` the current run closes at
//! `previous + 1` and a new one opens. In [`RoleMode::PerRole`] a role
//! change also closes the run.
//!
//! Swap provenance is merged lossily: a run is `via_swap` if any hour in it
//! is, and takes `swapped_from_employee_id` from the first such hour.
//!
//! # Complexity
//! O(hours × records-per-hour) per day.

use std::collections::HashMap;

use crate::config::GridConfig;
use crate::models::{
    AssignmentGrid, AssignmentRecord, PreciseOverrides, ShiftSegment, TimeSlotKey, DAYS_PER_WEEK,
};

/// How role changes inside a contiguous run are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleMode {
    /// One segment per contiguous run; `roles` lists every role worked.
    /// Used by layout-space views.
    #[default]
    Merged,
    /// One segment per contiguous run of a single role. Used by per-role
    /// tooltips and tables.
    PerRole,
}

/// Which part of the grid to reconstruct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconstructScope {
    /// Restrict to one day; `None` = whole week.
    pub day: Option<u8>,
    /// Restrict to one employee; `None` = everyone.
    pub employee_id: Option<String>,
}

impl ReconstructScope {
    /// Everyone, whole week.
    pub fn all() -> Self {
        Self::default()
    }

    /// Everyone on one day.
    pub fn day(day: u8) -> Self {
        Self {
            day: Some(day),
            employee_id: None,
        }
    }

    /// One employee, whole week.
    pub fn employee(employee_id: impl Into<String>) -> Self {
        Self {
            day: None,
            employee_id: Some(employee_id.into()),
        }
    }

    /// Narrows to a day.
    pub fn on_day(mut self, day: u8) -> Self {
        self.day = Some(day);
        self
    }

    fn days(&self) -> std::ops::Range<u8> {
        match self.day {
            Some(d) if d < DAYS_PER_WEEK => d..d + 1,
            Some(_) => 0..0,
            None => 0..DAYS_PER_WEEK,
        }
    }

    fn admits(&self, employee_id: &str) -> bool {
        self.employee_id.as_deref().map_or(true, |e| e == employee_id)
    }
}

/// Reconstructs shift segments for `scope`.
///
/// Output order: day ascending; within a day, employees by first appearance;
/// within an employee, runs by start hour. Display bounds equal the whole
/// hours; see [`apply_overrides`] for sub-hour precision.
///
/// # Example
///
/// ```
/// use u_roster::{GridConfig, Roster};
/// use u_roster::engine::{reconstruct, ReconstructScope, RoleMode};
///
/// let mut roster = Roster::new(GridConfig::default()).unwrap();
/// roster.editor().create("A", "R", 1, 9.0, 13.0).unwrap();
///
/// let scope = ReconstructScope::day(1);
/// let segs = reconstruct(roster.grid(), roster.config(), &scope, RoleMode::Merged);
/// assert_eq!(segs.len(), 1);
/// assert_eq!((segs[0].start_hour, segs[0].end_hour), (9, 13));
/// ```
pub fn reconstruct(
    grid: &AssignmentGrid,
    config: &GridConfig,
    scope: &ReconstructScope,
    mode: RoleMode,
) -> Vec<ShiftSegment> {
    let mut segments = Vec::new();

    for day in scope.days() {
        let mut order: Vec<&str> = Vec::new();
        let mut hours_by_employee: HashMap<&str, Vec<(u8, &AssignmentRecord)>> = HashMap::new();

        for hour in config.hours() {
            for record in grid.get(TimeSlotKey::new(day, hour)) {
                if !scope.admits(&record.employee_id) {
                    continue;
                }
                let entry = hours_by_employee
                    .entry(record.employee_id.as_str())
                    .or_insert_with(|| {
                        order.push(record.employee_id.as_str());
                        Vec::new()
                    });
                entry.push((hour, record));
            }
        }

        for employee_id in order {
            if let Some(hours) = hours_by_employee.get(employee_id) {
                collect_runs(day, hours, mode, &mut segments);
            }
        }
    }

    segments
}

/// Scans one employee's ascending hours into maximal runs.
fn collect_runs(
    day: u8,
    hours: &[(u8, &AssignmentRecord)],
    mode: RoleMode,
    out: &mut Vec<ShiftSegment>,
) {
    let mut current: Option<ShiftSegment> = None;

    for &(hour, record) in hours {
        if let Some(seg) = current.as_mut() {
            let contiguous = hour == seg.end_hour;
            let same_role = mode == RoleMode::Merged || seg.role_id() == record.role_id;
            if contiguous && same_role {
                seg.end_hour = hour + 1;
                seg.end = f64::from(seg.end_hour);
                if !seg.roles.contains(&record.role_id) {
                    seg.roles.push(record.role_id.clone());
                }
                merge_provenance(seg, record);
                continue;
            }
        }
        if let Some(done) = current.take() {
            out.push(done);
        }
        let mut seg = ShiftSegment::new(&record.employee_id, &record.role_id, day, hour, hour + 1);
        merge_provenance(&mut seg, record);
        current = Some(seg);
    }

    if let Some(done) = current {
        out.push(done);
    }
}

fn merge_provenance(seg: &mut ShiftSegment, record: &AssignmentRecord) {
    if record.via_swap && !seg.via_swap {
        seg.via_swap = true;
        seg.swapped_from_employee_id = record.swapped_from_employee_id.clone();
    }
}

/// Applies precise overrides to reconstructed segments.
///
/// The segment starting at `floor(override.start)` takes the fractional
/// start; the segment ending at `ceil(override.end)` takes the fractional
/// end. With [`RoleMode::PerRole`] these may be different segments.
pub fn apply_overrides(segments: &mut [ShiftSegment], overrides: &PreciseOverrides) {
    for seg in segments.iter_mut() {
        let Some(o) = overrides.get(&seg.employee_id, seg.day) else {
            continue;
        };
        let (lo, hi) = o.hour_range();
        if seg.start_hour == lo {
            seg.start = o.start;
        }
        if seg.end_hour == hi {
            seg.end = o.end;
        }
    }
}

/// Reconstructs `scope` and applies precise display bounds in one step.
pub fn display_segments(
    grid: &AssignmentGrid,
    overrides: &PreciseOverrides,
    config: &GridConfig,
    scope: &ReconstructScope,
    mode: RoleMode,
) -> Vec<ShiftSegment> {
    let mut segments = reconstruct(grid, config, scope, mode);
    apply_overrides(&mut segments, overrides);
    segments
}
