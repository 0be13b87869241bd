//! Integrity checks for rosters and inbound schedule documents.
//!
//! Detects:
//! - Employee or role IDs unknown to the lookup context
//! - Slots outside business hours
//! - Precise overrides that disagree with the grid on covered hours
//! - For raw documents: malformed keys, empty slots, and employees listed
//!   twice in one slot
//!
//! The mutator already prevents most of these for a live roster. They
//! still arise when a roster is checked against a narrower config or a
//! newer context, and routinely in documents produced by other systems.

use std::collections::HashSet;

use crate::boundary::ScheduleDocument;
use crate::config::GridConfig;
use crate::models::{AssignmentGrid, AssignmentRecord, PreciseOverrides, RosterContext, TimeSlotKey};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A record references an employee the context does not know.
    UnknownEmployee,
    /// A record references a role the context does not know.
    UnknownRole,
    /// A slot lies outside business hours.
    OutsideBusinessHours,
    /// An employee appears twice in one slot.
    DuplicateEmployeeInSlot,
    /// A slot key is present with no records.
    EmptySlot,
    /// A slot key does not parse.
    MalformedSlotKey,
    /// A precise override covers different hours than the grid.
    OverrideDrift,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster's grid and overrides against a config and context.
///
/// Checks:
/// 1. Every occupied slot lies within business hours
/// 2. Every record's employee and role exist in the context
/// 3. Every precise override covers exactly the employee's occupied hours
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(
    grid: &AssignmentGrid,
    overrides: &PreciseOverrides,
    config: &GridConfig,
    context: &RosterContext,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (key, records) in grid.iter() {
        check_slot(key, records, config, context, &mut errors);
    }

    for (employee_id, day, o) in overrides.iter() {
        let (lo, hi) = o.hour_range();
        let occupied = grid.hours_for(employee_id, day);
        if occupied != (lo..hi).collect::<Vec<_>>() {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverrideDrift,
                format!(
                    "Override {}-{} for '{}' on day {} disagrees with grid hours {:?}",
                    o.start, o.end, employee_id, day, occupied
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates a raw document before loading.
///
/// Reports everything [`ScheduleDocument::load`] would skip, plus context
/// reference errors, without building a grid.
pub fn validate_document(
    document: &ScheduleDocument,
    config: &GridConfig,
    context: &RosterContext,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (raw_key, records) in &document.slot_assignments {
        let Ok(key) = raw_key.parse::<TimeSlotKey>() else {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedSlotKey,
                format!("Malformed slot key '{raw_key}'"),
            ));
            continue;
        };

        if records.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySlot,
                format!("Slot {key} has no records"),
            ));
        }

        let mut seen = HashSet::new();
        for r in records {
            if !seen.insert(r.employee_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateEmployeeInSlot,
                    format!("Employee '{}' listed twice in slot {key}", r.employee_id),
                ));
            }
        }

        check_slot(key, records, config, context, &mut errors);
    }

    finish(errors)
}

fn check_slot(
    key: TimeSlotKey,
    records: &[AssignmentRecord],
    config: &GridConfig,
    context: &RosterContext,
    errors: &mut Vec<ValidationError>,
) {
    if !config.contains_hour(key.hour) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutsideBusinessHours,
            format!(
                "Slot {key} is outside business hours {}-{}",
                config.start_hour, config.end_hour
            ),
        ));
    }

    for r in records {
        if context.employee(&r.employee_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEmployee,
                format!("Slot {key} references unknown employee '{}'", r.employee_id),
            ));
        }
        if context.role(&r.role_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRole,
                format!("Slot {key} references unknown role '{}'", r.role_id),
            ));
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
