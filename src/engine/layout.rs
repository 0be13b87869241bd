//! Overlap layout: greedy interval partitioning into columns.
//!
//! # Algorithm
//!
//! 1. Order intervals by class (shifts before coverage gaps), then by start.
//!    The sort is stable, so equal keys keep input order.
//! 2. Keep a list of columns, each holding the intervals already placed.
//! 3. Place each interval in the first column where it overlaps no member
//!    (half-open: `a.start < b.end && a.end > b.start`); open a new column
//!    if none fits.
//! 4. Every interval reports `total_columns = max(1, columns)`.
//!
//! First-fit by start order never uses more columns than the maximum number
//! of simultaneously active intervals within one class. Gaps are placed
//! after all shifts so they never take a shift's column.
//!
//! # Complexity
//! O(n²) worst case; days rarely exceed a handful of overlapping shifts.
//!
//! # Reference
//! Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1 (Interval Partitioning)

use serde::{Deserialize, Serialize};

use crate::models::ShiftSegment;

/// Interval class; lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntervalClass {
    /// An employee's shift.
    Shift,
    /// An hour range with nobody assigned.
    CoverageGap,
}

/// Something occupying `[start, end)` on a day's timeline.
pub trait Interval {
    /// Start (fractional hours, inclusive).
    fn start(&self) -> f64;

    /// End (fractional hours, exclusive).
    fn end(&self) -> f64;

    /// Placement class.
    fn class(&self) -> IntervalClass {
        IntervalClass::Shift
    }
}

impl Interval for ShiftSegment {
    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }
}

/// A bare interval, used for hypothetical placements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Start (inclusive).
    pub start: f64,
    /// End (exclusive).
    pub end: f64,
    /// Placement class.
    pub class: IntervalClass,
}

impl Span {
    /// Creates a shift-class span.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            class: IntervalClass::Shift,
        }
    }

    /// Copies the bounds and class of any interval.
    pub fn of<I: Interval + ?Sized>(item: &I) -> Self {
        Self {
            start: item.start(),
            end: item.end(),
            class: item.class(),
        }
    }
}

impl Interval for Span {
    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }

    fn class(&self) -> IntervalClass {
        self.class
    }
}

/// Column placement of one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAssignment {
    /// Column (or row) index, 0-based.
    pub column: usize,
    /// Columns in the day; renderers divide space by this.
    pub total_columns: usize,
}

/// Layout of one day: assignments parallel to the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLayout {
    /// `assignments[i]` places `items[i]`.
    pub assignments: Vec<LayoutAssignment>,
    /// Column count, at least 1 even for an empty day.
    pub total_columns: usize,
}

impl DayLayout {
    /// Placement of the i-th input interval.
    pub fn get(&self, index: usize) -> Option<LayoutAssignment> {
        self.assignments.get(index).copied()
    }
}

/// Whether two half-open intervals overlap. Touching is not overlap.
#[inline]
pub fn overlaps<A: Interval + ?Sized, B: Interval + ?Sized>(a: &A, b: &B) -> bool {
    a.start() < b.end() && a.end() > b.start()
}

/// Lays out intervals sharing a timeline into non-colliding columns.
///
/// # Example
///
/// ```
/// use u_roster::engine::{layout, Span};
///
/// let day = layout(&[Span::new(9.0, 12.0), Span::new(10.0, 13.0), Span::new(12.0, 14.0)]);
/// let cols: Vec<_> = day.assignments.iter().map(|a| a.column).collect();
/// assert_eq!(cols, vec![0, 1, 0]);
/// assert_eq!(day.total_columns, 2);
/// ```
pub fn layout<I: Interval>(items: &[I]) -> DayLayout {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[a]
            .class()
            .cmp(&items[b].class())
            .then(items[a].start().total_cmp(&items[b].start()))
    });

    let mut columns: Vec<Vec<usize>> = Vec::new();
    let mut column_of = vec![0usize; items.len()];

    for idx in order {
        let item = &items[idx];
        let slot = columns
            .iter()
            .position(|members| members.iter().all(|&m| !overlaps(item, &items[m])));
        let column = match slot {
            Some(c) => c,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };
        columns[column].push(idx);
        column_of[idx] = column;
    }

    let total_columns = columns.len().max(1);
    DayLayout {
        assignments: column_of
            .into_iter()
            .map(|column| LayoutAssignment {
                column,
                total_columns,
            })
            .collect(),
        total_columns,
    }
}

/// Maximum number of intervals active at the same instant.
pub fn max_overlap<I: Interval>(items: &[I]) -> usize {
    // Ends sort before starts at the same instant: touching is not overlap.
    let mut events: Vec<(f64, i32)> = items
        .iter()
        .filter(|i| i.end() > i.start())
        .flat_map(|i| [(i.start(), 1), (i.end(), -1)])
        .collect();
    events.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut active = 0i32;
    let mut peak = 0i32;
    for (_, delta) in events {
        active += delta;
        peak = peak.max(active);
    }
    peak as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn gap(start: f64, end: f64) -> Span {
        Span {
            start,
            end,
            class: IntervalClass::CoverageGap,
        }
    }

    #[test]
    fn test_two_overlapping_shifts() {
        let b = ShiftSegment::new("B", "R", 0, 9, 12);
        let c = ShiftSegment::new("C", "R", 0, 10, 13);
        let day = layout(&[b, c]);
        assert_eq!(
            day.assignments,
            vec![
                LayoutAssignment { column: 0, total_columns: 2 },
                LayoutAssignment { column: 1, total_columns: 2 },
            ]
        );
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let day = layout(&[Span::new(9.0, 12.0), Span::new(12.0, 15.0)]);
        assert_eq!(day.total_columns, 1);
        assert!(day.assignments.iter().all(|a| a.column == 0));
    }

    #[test]
    fn test_empty_day_has_one_column() {
        let day = layout::<Span>(&[]);
        assert!(day.assignments.is_empty());
        assert_eq!(day.total_columns, 1);
    }

    #[test]
    fn test_input_order_irrelevant_to_columns_by_start() {
        let day = layout(&[Span::new(10.0, 13.0), Span::new(9.0, 12.0)]);
        assert_eq!(day.get(0).unwrap().column, 1);
        assert_eq!(day.get(1).unwrap().column, 0);
    }

    #[test]
    fn test_gaps_placed_after_shifts() {
        // The gap starts first but must not take column 0 from the shift.
        let items = [gap(9.0, 11.0), Span::new(10.0, 12.0)];
        let day = layout(&items);
        assert_eq!(day.get(1).unwrap().column, 0);
        assert_eq!(day.get(0).unwrap().column, 1);
    }

    #[test]
    fn test_fractional_bounds() {
        let day = layout(&[Span::new(9.0, 10.25), Span::new(10.25, 11.0), Span::new(10.0, 10.5)]);
        let cols: Vec<_> = day.assignments.iter().map(|a| a.column).collect();
        assert_eq!(cols, vec![0, 0, 1]);
    }

    #[test]
    fn test_max_overlap() {
        assert_eq!(max_overlap::<Span>(&[]), 0);
        assert_eq!(max_overlap(&[Span::new(9.0, 12.0), Span::new(12.0, 13.0)]), 1);
        assert_eq!(
            max_overlap(&[Span::new(9.0, 12.0), Span::new(10.0, 13.0), Span::new(11.0, 11.5)]),
            3
        );
    }

    #[test]
    fn test_random_layouts_collision_free_and_minimal() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let n = rng.random_range(0..12);
            let items: Vec<Span> = (0..n)
                .map(|_| {
                    let start = f64::from(rng.random_range(0..32u32)) * 0.25 + 9.0;
                    let len = f64::from(rng.random_range(1..16u32)) * 0.25;
                    Span::new(start, start + len)
                })
                .collect();

            let day = layout(&items);
            assert_eq!(day.assignments.len(), items.len());
            for i in 0..items.len() {
                for j in (i + 1)..items.len() {
                    if day.assignments[i].column == day.assignments[j].column {
                        assert!(!overlaps(&items[i], &items[j]), "collision in {items:?}");
                    }
                }
            }
            assert!(day.total_columns <= max_overlap(&items).max(1));
            assert!(day.assignments.iter().all(|a| a.total_columns == day.total_columns));
        }
    }
}
