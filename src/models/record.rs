//! Assignment record: one employee working one role in one slot.

use serde::{Deserialize, Serialize};

/// An employee assigned to a slot.
///
/// A slot may hold several records (shared coverage), but never two for the
/// same employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    /// Assigned employee.
    #[serde(alias = "employee_id")]
    pub employee_id: String,
    /// Role worked during the slot.
    #[serde(alias = "role_id")]
    pub role_id: String,
    /// Whether the hour was obtained through an accepted swap.
    #[serde(default, alias = "via_swap")]
    pub via_swap: bool,
    /// Employee who gave the hour away, when `via_swap` is set.
    #[serde(
        default,
        alias = "swapped_from_employee_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub swapped_from_employee_id: Option<String>,
}

impl AssignmentRecord {
    /// Creates a plain (non-swap) record.
    pub fn new(employee_id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            role_id: role_id.into(),
            via_swap: false,
            swapped_from_employee_id: None,
        }
    }

    /// Marks the record as received from `from_employee_id` via swap.
    pub fn with_swap_from(mut self, from_employee_id: impl Into<String>) -> Self {
        self.via_swap = true;
        self.swapped_from_employee_id = Some(from_employee_id.into());
        self
    }

    /// Copies the swap provenance of `other` onto this record.
    pub(crate) fn with_provenance_of(mut self, other: &AssignmentRecord) -> Self {
        self.via_swap = other.via_swap;
        self.swapped_from_employee_id = other.swapped_from_employee_id.clone();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_builder() {
        let r = AssignmentRecord::new("E2", "cashier").with_swap_from("E1");
        assert!(r.via_swap);
        assert_eq!(r.swapped_from_employee_id.as_deref(), Some("E1"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let r: AssignmentRecord = serde_json::from_str(
            r#"{"employeeId":"E1","roleId":"R1","viaSwap":true,"swappedFromEmployeeId":"E9"}"#,
        )
        .unwrap();
        assert_eq!(r.employee_id, "E1");
        assert_eq!(r.role_id, "R1");
        assert!(r.via_swap);
        assert_eq!(r.swapped_from_employee_id.as_deref(), Some("E9"));
    }

    #[test]
    fn test_deserialize_snake_case_alias() {
        let r: AssignmentRecord =
            serde_json::from_str(r#"{"employee_id":"E1","role_id":"R1","via_swap":true}"#).unwrap();
        assert_eq!(r.employee_id, "E1");
        assert_eq!(r.role_id, "R1");
        assert!(r.via_swap);
        assert!(r.swapped_from_employee_id.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&AssignmentRecord::new("E1", "R1")).unwrap();
        assert_eq!(json, r#"{"employeeId":"E1","roleId":"R1","viaSwap":false}"#);

        let swapped = AssignmentRecord::new("E2", "R1").with_swap_from("E1");
        let json = serde_json::to_string(&swapped).unwrap();
        assert_eq!(
            json,
            r#"{"employeeId":"E2","roleId":"R1","viaSwap":true,"swappedFromEmployeeId":"E1"}"#
        );
    }
}
