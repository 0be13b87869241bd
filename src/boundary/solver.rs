//! Request/response seam to the external schedule solver.
//!
//! The solver decides who should work; this crate only stores, derives
//! from, and edits what it returns. The response is an opaque
//! [`ScheduleDocument`] that replaces the current grid wholesale.

use serde::{Deserialize, Serialize};

use super::ScheduleDocument;
use crate::config::GridConfig;
use crate::error::Result;

/// Input handed to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Business hours and precision the result must fit.
    pub config: GridConfig,
    /// Employees available for assignment.
    pub employee_ids: Vec<String>,
    /// Roles to staff.
    pub role_ids: Vec<String>,
    /// Which alternative to return when exploring multiple solutions
    /// (0 = best).
    #[serde(default)]
    pub alternative: usize,
    /// Current assignment, for solvers that repair rather than regenerate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<ScheduleDocument>,
}

impl SolveRequest {
    /// Creates a request for the best solution.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            employee_ids: Vec::new(),
            role_ids: Vec::new(),
            alternative: 0,
            current: None,
        }
    }

    /// Sets the available employees.
    pub fn with_employees(mut self, employee_ids: Vec<String>) -> Self {
        self.employee_ids = employee_ids;
        self
    }

    /// Sets the roles to staff.
    pub fn with_roles(mut self, role_ids: Vec<String>) -> Self {
        self.role_ids = role_ids;
        self
    }

    /// Asks for the n-th alternative solution.
    pub fn with_alternative(mut self, alternative: usize) -> Self {
        self.alternative = alternative;
        self
    }

    /// Attaches the current assignment.
    pub fn with_current(mut self, current: ScheduleDocument) -> Self {
        self.current = Some(current);
        self
    }
}

/// An external schedule generator.
///
/// Implementations wrap whatever transport reaches the solver and map its
/// failures to [`GridError::Solver`](crate::GridError::Solver).
pub trait ScheduleSolver {
    /// Produces a schedule for the request.
    fn solve(&self, request: &SolveRequest) -> Result<ScheduleDocument>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let r = SolveRequest::new(GridConfig::default())
            .with_employees(vec!["A".into(), "B".into()])
            .with_roles(vec!["R".into()])
            .with_alternative(2);
        assert_eq!(r.employee_ids.len(), 2);
        assert_eq!(r.alternative, 2);
        assert!(r.current.is_none());
    }

    #[test]
    fn test_request_serializes_without_current() {
        let json = serde_json::to_value(SolveRequest::new(GridConfig::default())).unwrap();
        assert!(json.get("current").is_none());
        assert_eq!(json["config"]["start_hour"], 9);
    }
}
