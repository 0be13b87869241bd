//! Coverage gaps: business hours nobody is assigned to.

use serde::{Deserialize, Serialize};

use super::layout::{Interval, IntervalClass};
use crate::config::GridConfig;
use crate::models::{AssignmentGrid, TimeSlotKey};

/// A maximal run of unstaffed business hours on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    /// Day of week.
    pub day: u8,
    /// First unstaffed hour (inclusive).
    pub start_hour: u8,
    /// End of the run (exclusive).
    pub end_hour: u8,
}

impl CoverageGap {
    /// Length in hours.
    pub fn hours(&self) -> u8 {
        self.end_hour - self.start_hour
    }
}

impl Interval for CoverageGap {
    fn start(&self) -> f64 {
        f64::from(self.start_hour)
    }

    fn end(&self) -> f64 {
        f64::from(self.end_hour)
    }

    fn class(&self) -> IntervalClass {
        IntervalClass::CoverageGap
    }
}

/// Finds unstaffed runs of business hours on `day`, in hour order.
pub fn coverage_gaps(grid: &AssignmentGrid, config: &GridConfig, day: u8) -> Vec<CoverageGap> {
    let mut gaps: Vec<CoverageGap> = Vec::new();
    for hour in config.hours() {
        if !grid.get(TimeSlotKey::new(day, hour)).is_empty() {
            continue;
        }
        match gaps.last_mut() {
            Some(g) if g.end_hour == hour => g.end_hour = hour + 1,
            _ => gaps.push(CoverageGap {
                day,
                start_hour: hour,
                end_hour: hour + 1,
            }),
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssignmentRecord;

    #[test]
    fn test_empty_day_is_one_gap() {
        let g = AssignmentGrid::new();
        let gaps = coverage_gaps(&g, &GridConfig::default(), 3);
        assert_eq!(
            gaps,
            vec![CoverageGap {
                day: 3,
                start_hour: 9,
                end_hour: 17
            }]
        );
        assert_eq!(gaps[0].hours(), 8);
    }

    #[test]
    fn test_gaps_around_shift() {
        let mut g = AssignmentGrid::new();
        for h in 11..14 {
            g.insert(TimeSlotKey::new(0, h), AssignmentRecord::new("A", "R"))
                .unwrap();
        }
        let gaps = coverage_gaps(&g, &GridConfig::default(), 0);
        let bounds: Vec<_> = gaps.iter().map(|g| (g.start_hour, g.end_hour)).collect();
        assert_eq!(bounds, vec![(9, 11), (14, 17)]);
        assert!(gaps.iter().all(|g| g.class() == IntervalClass::CoverageGap));
    }

    #[test]
    fn test_fully_staffed_day() {
        let mut g = AssignmentGrid::new();
        for h in 9..17 {
            g.insert(TimeSlotKey::new(0, h), AssignmentRecord::new("A", "R"))
                .unwrap();
        }
        assert!(coverage_gaps(&g, &GridConfig::default(), 0).is_empty());
    }
}
