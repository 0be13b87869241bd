//! Assignment grid: the canonical sparse store.
//!
//! Maps each occupied [`TimeSlotKey`] to the records working that hour.
//! An absent key means the hour is unassigned; the grid never keeps an
//! empty record list. Everything else in the crate (segments, layouts,
//! precise overrides) is derived from this store.
//!
//! Writes are crate-private: only [`GridMutator`](crate::editing::GridMutator)
//! and the document loader construct or edit a grid, so the
//! one-record-per-employee-per-slot rule is enforced in one place.

use std::collections::BTreeMap;

use super::{AssignmentRecord, TimeSlotKey};
use crate::error::{GridError, Result};

/// Sparse `(day, hour) -> records` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentGrid {
    slots: BTreeMap<TimeSlotKey, Vec<AssignmentRecord>>,
}

impl AssignmentGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of records across all slots.
    pub fn record_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Records in a slot (empty if unassigned).
    pub fn get(&self, key: TimeSlotKey) -> &[AssignmentRecord] {
        self.slots.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All occupied slots in day-major, hour-minor order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeSlotKey, &[AssignmentRecord])> {
        self.slots.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Occupied slots of one day in hour order.
    pub fn day_slots(&self, day: u8) -> impl Iterator<Item = (TimeSlotKey, &[AssignmentRecord])> {
        let lo = TimeSlotKey::new(day, 0);
        let hi = TimeSlotKey::new(day.saturating_add(1), 0);
        self.slots.range(lo..hi).map(|(k, v)| (*k, v.as_slice()))
    }

    /// The employee's record in a slot, if any.
    pub fn record_for(&self, key: TimeSlotKey, employee_id: &str) -> Option<&AssignmentRecord> {
        self.get(key).iter().find(|r| r.employee_id == employee_id)
    }

    /// Whether the employee holds a record in the slot.
    #[inline]
    pub fn contains(&self, key: TimeSlotKey, employee_id: &str) -> bool {
        self.record_for(key, employee_id).is_some()
    }

    /// Hours (ascending) in which the employee works on `day`.
    pub fn hours_for(&self, employee_id: &str, day: u8) -> Vec<u8> {
        self.day_slots(day)
            .filter(|(_, records)| records.iter().any(|r| r.employee_id == employee_id))
            .map(|(key, _)| key.hour)
            .collect()
    }

    /// Employee IDs in order of first appearance (day-major, hour-minor).
    pub fn employees(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for records in self.slots.values() {
            for r in records {
                if !seen.contains(&r.employee_id.as_str()) {
                    seen.push(&r.employee_id);
                }
            }
        }
        seen
    }

    /// Adds a record to a slot.
    ///
    /// Fails with `EmployeeAlreadyAssigned` if the employee already holds a
    /// record there; the grid is unchanged in that case.
    pub(crate) fn insert(&mut self, key: TimeSlotKey, record: AssignmentRecord) -> Result<()> {
        let records = self.slots.entry(key).or_default();
        if records.iter().any(|r| r.employee_id == record.employee_id) {
            return Err(GridError::EmployeeAlreadyAssigned {
                employee_id: record.employee_id,
                day: key.day,
                hour: key.hour,
            });
        }
        records.push(record);
        Ok(())
    }

    /// Removes the employee from a slot, dropping the key if it empties.
    pub(crate) fn remove(
        &mut self,
        key: TimeSlotKey,
        employee_id: &str,
    ) -> Option<AssignmentRecord> {
        let records = self.slots.get_mut(&key)?;
        let idx = records.iter().position(|r| r.employee_id == employee_id)?;
        let removed = records.remove(idx);
        if records.is_empty() {
            self.slots.remove(&key);
        }
        Some(removed)
    }

    /// Removes every slot.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(day: u8, hour: u8) -> TimeSlotKey {
        TimeSlotKey::new(day, hour)
    }

    #[test]
    fn test_empty_grid() {
        let g = AssignmentGrid::new();
        assert!(g.is_empty());
        assert!(g.get(key(0, 9)).is_empty());
        assert_eq!(g.record_count(), 0);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut g = AssignmentGrid::new();
        g.insert(key(1, 9), AssignmentRecord::new("A", "R")).unwrap();
        g.insert(key(1, 9), AssignmentRecord::new("B", "R")).unwrap();
        g.insert(key(1, 10), AssignmentRecord::new("A", "R")).unwrap();

        assert_eq!(g.slot_count(), 2);
        assert_eq!(g.record_count(), 3);
        assert!(g.contains(key(1, 9), "B"));
        assert!(!g.contains(key(1, 10), "B"));
        assert_eq!(g.hours_for("A", 1), vec![9, 10]);
        assert!(g.hours_for("A", 2).is_empty());
    }

    #[test]
    fn test_duplicate_employee_rejected() {
        let mut g = AssignmentGrid::new();
        g.insert(key(0, 9), AssignmentRecord::new("A", "R1")).unwrap();
        let before = g.clone();

        let err = g.insert(key(0, 9), AssignmentRecord::new("A", "R2")).unwrap_err();
        assert!(matches!(
            err,
            GridError::EmployeeAlreadyAssigned { day: 0, hour: 9, .. }
        ));
        assert_eq!(g, before);
    }

    #[test]
    fn test_remove_drops_empty_key() {
        let mut g = AssignmentGrid::new();
        g.insert(key(0, 9), AssignmentRecord::new("A", "R")).unwrap();
        g.insert(key(0, 9), AssignmentRecord::new("B", "R")).unwrap();

        assert!(g.remove(key(0, 9), "A").is_some());
        assert_eq!(g.get(key(0, 9)).len(), 1);
        assert!(g.remove(key(0, 9), "B").is_some());
        assert!(g.is_empty());
        assert!(g.remove(key(0, 9), "B").is_none());
    }

    #[test]
    fn test_day_slots_bounded_to_day() {
        let mut g = AssignmentGrid::new();
        g.insert(key(0, 16), AssignmentRecord::new("A", "R")).unwrap();
        g.insert(key(1, 9), AssignmentRecord::new("A", "R")).unwrap();
        g.insert(key(6, 9), AssignmentRecord::new("A", "R")).unwrap();

        let day1: Vec<_> = g.day_slots(1).map(|(k, _)| k).collect();
        assert_eq!(day1, vec![key(1, 9)]);
        assert_eq!(g.day_slots(6).count(), 1);
    }

    #[test]
    fn test_employees_first_appearance() {
        let mut g = AssignmentGrid::new();
        g.insert(key(0, 10), AssignmentRecord::new("B", "R")).unwrap();
        g.insert(key(0, 9), AssignmentRecord::new("C", "R")).unwrap();
        g.insert(key(0, 10), AssignmentRecord::new("A", "R")).unwrap();
        assert_eq!(g.employees(), vec!["C", "B", "A"]);
    }
}
