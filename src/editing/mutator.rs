//! Grid mutator: the only writer of the assignment grid.
//!
//! # Operations
//!
//! | Operation | Writes |
//! |-----------|--------|
//! | [`create`](GridMutator::create) | `[floor(start), ceil(end))`, skipping hours the employee already holds |
//! | [`move_shift`](GridMutator::move_shift) | clears the source day, writes the same duration at the destination |
//! | [`resize`](GridMutator::resize) | clears the day, writes the snapped range, records precise bounds |
//! | [`delete`](GridMutator::delete) | removes the employee from the hours in range |
//! | [`apply_swap`](GridMutator::apply_swap) | `delete` for the giver, then `create` for the taker |
//!
//! Every operation validates first and writes second: a rejected call
//! leaves the grid and the precise overrides untouched.
//!
//! Move and resize scan the whole business-hour range of the affected day
//! instead of trusting the caller's old bounds, which may be stale after an
//! earlier edit. When the scanned hours differ from the caller's range a
//! warning is logged so the stale caller can be found.

use tracing::{debug, warn};

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::models::{
    AssignmentGrid, AssignmentRecord, PreciseOverrides, ShiftSegment, TimeSlotKey, DAYS_PER_WEEK,
};

/// Identifies an existing shift as the caller last rendered it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRef {
    /// Employee working the shift.
    pub employee_id: String,
    /// Role the shift is (re)written with.
    pub role_id: String,
    /// Day of week.
    pub day: u8,
    /// Start as displayed (may be fractional).
    pub start: f64,
    /// End as displayed (may be fractional).
    pub end: f64,
}

impl ShiftRef {
    /// Creates a reference.
    pub fn new(
        employee_id: impl Into<String>,
        role_id: impl Into<String>,
        day: u8,
        start: f64,
        end: f64,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            role_id: role_id.into(),
            day,
            start,
            end,
        }
    }

    /// Duration in hours.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl From<&ShiftSegment> for ShiftRef {
    fn from(seg: &ShiftSegment) -> Self {
        Self::new(&seg.employee_id, seg.role_id(), seg.day, seg.start, seg.end)
    }
}

/// Hand-over of a shift range from one employee to another.
///
/// This is the grid-side effect of an accepted swap or counter-offer; the
/// negotiation itself happens elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapTransfer {
    /// Employee giving the hours away.
    pub from_employee_id: String,
    /// Employee taking the hours.
    pub to_employee_id: String,
    /// Role the taker works.
    pub role_id: String,
    /// Day of week.
    pub day: u8,
    /// Start hour.
    pub start: f64,
    /// End hour.
    pub end: f64,
}

impl SwapTransfer {
    /// Transfers `shift` to `to_employee_id`, keeping its role and bounds.
    pub fn of_shift(shift: &ShiftRef, to_employee_id: impl Into<String>) -> Self {
        Self {
            from_employee_id: shift.employee_id.clone(),
            to_employee_id: to_employee_id.into(),
            role_id: shift.role_id.clone(),
            day: shift.day,
            start: shift.start,
            end: shift.end,
        }
    }
}

pub(crate) fn check_day(day: u8) -> Result<()> {
    if day >= DAYS_PER_WEEK {
        return Err(GridError::InvalidDay(day));
    }
    Ok(())
}

/// Business-hours and ordering checks shared by create, move and previews.
pub(crate) fn check_range(config: &GridConfig, start: f64, end: f64) -> Result<()> {
    if !config.contains_range(start, end) {
        return Err(config.out_of_hours(start, end));
    }
    if end <= start {
        return Err(GridError::InvertedRange { start, end });
    }
    Ok(())
}

/// Minimum-length and business-hours checks for resizes.
pub(crate) fn check_resize(config: &GridConfig, start: f64, end: f64) -> Result<()> {
    let minutes = ((end - start) * 60.0).round();
    if minutes < f64::from(config.min_shift_minutes) {
        return Err(GridError::ShiftTooShort {
            minutes: minutes.max(0.0) as u32,
            min_minutes: config.min_shift_minutes,
        });
    }
    if !config.contains_range(start, end) {
        return Err(config.out_of_hours(start, end));
    }
    Ok(())
}

/// Whole hours touched by `[start, end)`.
#[inline]
pub(crate) fn hour_span(start: f64, end: f64) -> (u8, u8) {
    (start.floor() as u8, end.ceil() as u8)
}

#[inline]
fn is_fractional(start: f64, end: f64) -> bool {
    start.fract() != 0.0 || end.fract() != 0.0
}

/// Exclusive write access to a roster's grid and precise overrides.
///
/// Obtained from [`Roster::editor`](crate::Roster::editor).
#[derive(Debug)]
pub struct GridMutator<'a> {
    grid: &'a mut AssignmentGrid,
    overrides: &'a mut PreciseOverrides,
    config: &'a GridConfig,
}

impl<'a> GridMutator<'a> {
    pub(crate) fn new(
        grid: &'a mut AssignmentGrid,
        overrides: &'a mut PreciseOverrides,
        config: &'a GridConfig,
    ) -> Self {
        Self {
            grid,
            overrides,
            config,
        }
    }

    /// Read access to the grid being edited.
    pub fn grid(&self) -> &AssignmentGrid {
        &*self.grid
    }

    /// Assigns `employee_id` to `role_id` over `[start, end)` on `day`.
    ///
    /// Validates and writes `[floor(start), ceil(end))` from the bounds as
    /// given. Hours the employee already holds are left alone, so retrying is
    /// harmless. Fractional bounds are snapped and kept as a precise override
    /// where they still fall inside the first or last written hour.
    ///
    /// # Errors
    /// `InvalidDay`, `OutOfBusinessHours`, `InvertedRange`.
    pub fn create(
        &mut self,
        employee_id: &str,
        role_id: &str,
        day: u8,
        start: f64,
        end: f64,
    ) -> Result<()> {
        self.create_record(AssignmentRecord::new(employee_id, role_id), day, start, end)
    }

    fn create_record(
        &mut self,
        record: AssignmentRecord,
        day: u8,
        start: f64,
        end: f64,
    ) -> Result<()> {
        check_day(day)?;
        check_range(self.config, start, end)?;

        let written = self.write_range(&record, day, start, end)?;
        let fresh = self.precise_bounds(start, end);
        self.overrides
            .reconcile(self.grid, &record.employee_id, day, &record.role_id, fresh);

        debug!(
            employee = %record.employee_id,
            role = %record.role_id,
            day,
            start,
            end,
            written,
            "created shift"
        );
        Ok(())
    }

    /// Moves a shift to `to_day`, starting at `to_start`, keeping its length.
    ///
    /// The destination is `[floor(to_start), ceil(to_start + duration))` of
    /// the bounds as given; only the precise override is snapped.
    ///
    /// All of the employee's hours on the source day are cleared, not just
    /// `shift`'s range. Swap provenance of the cleared hours carries over.
    ///
    /// # Errors
    /// `InvalidDay`, `InvertedRange` (empty source), `OutOfBusinessHours`
    /// (destination); nothing is written on error.
    pub fn move_shift(&mut self, shift: &ShiftRef, to_day: u8, to_start: f64) -> Result<()> {
        check_day(shift.day)?;
        check_day(to_day)?;
        let duration = shift.duration();
        if duration <= 0.0 {
            return Err(GridError::InvertedRange {
                start: shift.start,
                end: shift.end,
            });
        }
        let to_end = to_start + duration;
        check_range(self.config, to_start, to_end)?;

        let removed = self.clear_day(&shift.employee_id, shift.day);
        self.warn_on_drift("move", shift, &removed);
        self.overrides.remove(&shift.employee_id, shift.day);

        let record = carried_record(shift, &removed);
        let written = self.write_range(&record, to_day, to_start, to_end)?;
        let fresh = self.precise_bounds(to_start, to_end);
        self.overrides
            .reconcile(self.grid, &shift.employee_id, to_day, &shift.role_id, fresh);

        debug!(
            employee = %shift.employee_id,
            from_day = shift.day,
            to_day,
            to_start,
            to_end,
            written,
            "moved shift"
        );
        Ok(())
    }

    /// Resizes a shift to `[new_start, new_end)` with sub-hour precision.
    ///
    /// Both bounds snap to the configured increment. The grid receives
    /// `[floor, ceil)` of the snapped range; the exact bounds are recorded as
    /// the employee's precise override for the day. All of the employee's
    /// hours on the day are cleared first.
    ///
    /// # Errors
    /// `InvalidDay`, `ShiftTooShort`, `OutOfBusinessHours`; nothing is
    /// written on error.
    pub fn resize(&mut self, shift: &ShiftRef, new_start: f64, new_end: f64) -> Result<()> {
        check_day(shift.day)?;
        let (start, end) = (self.config.snap(new_start), self.config.snap(new_end));
        check_resize(self.config, start, end)?;

        let removed = self.clear_day(&shift.employee_id, shift.day);
        self.warn_on_drift("resize", shift, &removed);
        self.overrides.remove(&shift.employee_id, shift.day);

        let record = carried_record(shift, &removed);
        let written = self.write_range(&record, shift.day, start, end)?;
        self.overrides.reconcile(
            self.grid,
            &shift.employee_id,
            shift.day,
            &shift.role_id,
            Some((start, end)),
        );

        debug!(
            employee = %shift.employee_id,
            day = shift.day,
            start,
            end,
            written,
            "resized shift"
        );
        Ok(())
    }

    /// Removes `employee_id` from every hour of `[floor(start), ceil(end))`
    /// on `day`. Returns the number of records removed.
    ///
    /// # Errors
    /// `InvalidDay`, `InvertedRange`.
    pub fn delete(&mut self, employee_id: &str, day: u8, start: f64, end: f64) -> Result<usize> {
        check_day(day)?;
        if end <= start {
            return Err(GridError::InvertedRange { start, end });
        }
        let (lo, hi) = hour_span(start, end);

        let mut removed = 0;
        for hour in self.config.hours().filter(|h| (lo..hi).contains(h)) {
            if self.grid.remove(TimeSlotKey::new(day, hour), employee_id).is_some() {
                removed += 1;
            }
        }
        self.overrides.reconcile(self.grid, employee_id, day, "", None);

        debug!(employee = %employee_id, day, start, end, removed, "deleted shift");
        Ok(removed)
    }

    /// Applies an accepted swap: the giver loses the range, the taker gains
    /// it with swap provenance.
    ///
    /// # Errors
    /// `InvalidDay`, `OutOfBusinessHours`, `InvertedRange`,
    /// `EmployeeNotAssigned` when the giver misses an hour of the range, or
    /// `EmployeeAlreadyAssigned` when the taker already works one.
    /// Validation covers both halves before either is written.
    pub fn apply_swap(&mut self, transfer: &SwapTransfer) -> Result<()> {
        check_day(transfer.day)?;
        let (start, end) = (transfer.start, transfer.end);
        check_range(self.config, start, end)?;

        let (lo, hi) = hour_span(start, end);
        for hour in lo..hi {
            let key = TimeSlotKey::new(transfer.day, hour);
            if !self.grid.contains(key, &transfer.from_employee_id) {
                return Err(GridError::EmployeeNotAssigned {
                    employee_id: transfer.from_employee_id.clone(),
                    day: transfer.day,
                    hour,
                });
            }
            if self.grid.contains(key, &transfer.to_employee_id) {
                return Err(GridError::EmployeeAlreadyAssigned {
                    employee_id: transfer.to_employee_id.clone(),
                    day: transfer.day,
                    hour,
                });
            }
        }

        self.delete(&transfer.from_employee_id, transfer.day, start, end)?;
        let record = AssignmentRecord::new(&transfer.to_employee_id, &transfer.role_id)
            .with_swap_from(&transfer.from_employee_id);
        self.create_record(record, transfer.day, start, end)
    }

    /// Clears every assignment and override.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.overrides.clear();
        debug!("reset roster");
    }

    /// Replaces the whole grid (e.g., with a freshly solved schedule).
    /// Precise overrides belong to the old grid and are dropped.
    pub fn replace(&mut self, grid: AssignmentGrid) {
        *self.grid = grid;
        self.overrides.clear();
        debug!(slots = self.grid.slot_count(), "replaced grid");
    }

    /// Snapped display bounds for a fractional range, if any. An edge whose
    /// snapped value left the written hour falls back to the whole hour in
    /// reconcile.
    fn precise_bounds(&self, start: f64, end: f64) -> Option<(f64, f64)> {
        let (start, end) = (self.config.snap(start), self.config.snap(end));
        is_fractional(start, end).then_some((start, end))
    }

    /// Writes `record` into each hour of the range the employee does not
    /// already hold. Returns the number of records written.
    fn write_range(
        &mut self,
        record: &AssignmentRecord,
        day: u8,
        start: f64,
        end: f64,
    ) -> Result<usize> {
        let (lo, hi) = hour_span(start, end);
        let mut written = 0;
        for hour in lo..hi {
            let key = TimeSlotKey::new(day, hour);
            if self.grid.contains(key, &record.employee_id) {
                continue;
            }
            self.grid.insert(key, record.clone())?;
            written += 1;
        }
        Ok(written)
    }

    /// Removes the employee from every business hour of `day`.
    fn clear_day(&mut self, employee_id: &str, day: u8) -> Vec<(u8, AssignmentRecord)> {
        let mut removed = Vec::new();
        for hour in self.config.hours() {
            if let Some(r) = self.grid.remove(TimeSlotKey::new(day, hour), employee_id) {
                removed.push((hour, r));
            }
        }
        removed
    }

    fn warn_on_drift(&self, op: &str, shift: &ShiftRef, removed: &[(u8, AssignmentRecord)]) {
        if let Some(drift) = bounds_drift(shift, removed) {
            warn!(
                op,
                employee = %shift.employee_id,
                day = shift.day,
                expected = ?drift.expected,
                actual = ?drift.actual,
                "caller-supplied shift bounds differ from grid"
            );
        }
    }
}

/// Hours a caller expected to clear versus hours actually cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BoundsDrift {
    expected: Vec<u8>,
    actual: Vec<u8>,
}

/// `Some` when the full-day scan removed hours other than the shift's
/// `[floor(start), ceil(end))`.
fn bounds_drift(shift: &ShiftRef, removed: &[(u8, AssignmentRecord)]) -> Option<BoundsDrift> {
    let (lo, hi) = hour_span(shift.start, shift.end);
    let expected: Vec<u8> = (lo..hi).collect();
    let actual: Vec<u8> = removed.iter().map(|(h, _)| *h).collect();
    (actual != expected).then_some(BoundsDrift { expected, actual })
}

/// Record to write for a moved/resized shift, keeping swap provenance.
fn carried_record(shift: &ShiftRef, removed: &[(u8, AssignmentRecord)]) -> AssignmentRecord {
    let record = AssignmentRecord::new(&shift.employee_id, &shift.role_id);
    match removed.iter().find(|(_, r)| r.via_swap) {
        Some((_, swapped)) => record.with_provenance_of(swapped),
        None => record,
    }
}
