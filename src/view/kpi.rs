//! Roster summary metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Hours by employee | Sum of displayed segment durations |
//! | Hours by role | Same, split per role |
//! | Swap hours | Hours held through an accepted swap |
//! | Covered hours | Business-hour slots with at least one assignee |
//! | Coverage rate | Covered / (7 × business hours per day) |
//! | Peak staffing | Largest assignee count in one slot |
//!
//! Durations use precise bounds where an override exists, so a 9:30-12:00
//! shift counts 2.5 hours.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::GridConfig;
use crate::engine::{display_segments, ReconstructScope, RoleMode};
use crate::models::{AssignmentGrid, PreciseOverrides, TimeSlotKey, DAYS_PER_WEEK};

/// Roster performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterKpi {
    /// Total scheduled hours.
    pub total_hours: f64,
    /// Scheduled hours per employee.
    pub hours_by_employee: HashMap<String, f64>,
    /// Scheduled hours per role.
    pub hours_by_role: HashMap<String, f64>,
    /// Hours held through accepted swaps.
    pub swap_hours: f64,
    /// Business-hour slots with at least one assignee.
    pub covered_slots: usize,
    /// Business-hour slots with nobody assigned.
    pub uncovered_slots: usize,
    /// Fraction of business-hour slots covered (0.0..1.0).
    pub coverage_rate: f64,
    /// Largest number of assignees in a single slot.
    pub peak_staffing: usize,
}

impl RosterKpi {
    /// Computes metrics for a grid and its precise overrides.
    pub fn calculate(
        grid: &AssignmentGrid,
        overrides: &PreciseOverrides,
        config: &GridConfig,
    ) -> Self {
        let segments = display_segments(
            grid,
            overrides,
            config,
            &ReconstructScope::all(),
            RoleMode::PerRole,
        );

        let mut hours_by_employee: HashMap<String, f64> = HashMap::new();
        let mut hours_by_role: HashMap<String, f64> = HashMap::new();
        let mut total_hours = 0.0;
        let mut swap_hours = 0.0;

        for seg in &segments {
            let hours = seg.duration();
            total_hours += hours;
            *hours_by_employee.entry(seg.employee_id.clone()).or_default() += hours;
            *hours_by_role.entry(seg.role_id().to_string()).or_default() += hours;
            if seg.via_swap {
                swap_hours += hours;
            }
        }

        let mut covered_slots = 0;
        let mut peak_staffing = 0;
        for day in 0..DAYS_PER_WEEK {
            for hour in config.hours() {
                let staffed = grid.get(TimeSlotKey::new(day, hour)).len();
                if staffed > 0 {
                    covered_slots += 1;
                }
                peak_staffing = peak_staffing.max(staffed);
            }
        }

        let total_slots = usize::from(DAYS_PER_WEEK) * config.hours_per_day();
        let coverage_rate = if total_slots == 0 {
            0.0
        } else {
            covered_slots as f64 / total_slots as f64
        };

        Self {
            total_hours,
            hours_by_employee,
            hours_by_role,
            swap_hours,
            covered_slots,
            uncovered_slots: total_slots - covered_slots,
            coverage_rate,
            peak_staffing,
        }
    }

    /// Hours scheduled for one employee (0 if absent).
    pub fn hours_for(&self, employee_id: &str) -> f64 {
        self.hours_by_employee.get(employee_id).copied().unwrap_or(0.0)
    }

    /// Whether coverage reaches `min_coverage` and nobody exceeds
    /// `max_hours_per_employee`.
    pub fn meets_thresholds(&self, min_coverage: f64, max_hours_per_employee: f64) -> bool {
        self.coverage_rate >= min_coverage
            && self
                .hours_by_employee
                .values()
                .all(|&h| h <= max_hours_per_employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{ShiftRef, SwapTransfer};
    use crate::Roster;

    #[test]
    fn test_kpi_empty_roster() {
        let roster = Roster::new(GridConfig::default()).unwrap();
        let kpi = roster.kpi();
        assert_eq!(kpi.total_hours, 0.0);
        assert_eq!(kpi.covered_slots, 0);
        assert_eq!(kpi.uncovered_slots, 56);
        assert_eq!(kpi.coverage_rate, 0.0);
        assert_eq!(kpi.peak_staffing, 0);
    }

    #[test]
    fn test_kpi_hours_and_coverage() {
        let mut roster = Roster::new(GridConfig::default()).unwrap();
        roster.editor().create("A", "R", 0, 9.0, 13.0).unwrap();
        roster.editor().create("B", "K", 0, 11.0, 13.0).unwrap();
        roster.editor().create("A", "K", 1, 9.5, 12.0).unwrap();

        let kpi = roster.kpi();
        assert!((kpi.total_hours - 8.5).abs() < 1e-9);
        assert!((kpi.hours_for("A") - 6.5).abs() < 1e-9);
        assert!((kpi.hours_for("B") - 2.0).abs() < 1e-9);
        assert_eq!(kpi.hours_for("nobody"), 0.0);
        assert!((kpi.hours_by_role["K"] - 4.5).abs() < 1e-9);

        // Day 0: 9..13 (4 slots). Day 1: 9..12 (3 slots).
        assert_eq!(kpi.covered_slots, 7);
        assert_eq!(kpi.uncovered_slots, 49);
        assert_eq!(kpi.peak_staffing, 2);
        assert!(kpi.meets_thresholds(0.1, 8.0));
        assert!(!kpi.meets_thresholds(0.5, 8.0));
        assert!(!kpi.meets_thresholds(0.1, 6.0));
    }

    #[test]
    fn test_kpi_swap_hours() {
        let mut roster = Roster::new(GridConfig::default()).unwrap();
        roster.editor().create("A", "R", 2, 9.0, 12.0).unwrap();
        let shift = ShiftRef::new("A", "R", 2, 10.0, 12.0);
        roster
            .editor()
            .apply_swap(&SwapTransfer::of_shift(&shift, "B"))
            .unwrap();

        let kpi = roster.kpi();
        assert!((kpi.swap_hours - 2.0).abs() < 1e-9);
        assert!((kpi.hours_for("A") - 1.0).abs() < 1e-9);
    }
}
