//! Read-only lookup context for employees and roles.
//!
//! Built by the host whenever its employee or role set changes and passed
//! by reference into validation and views. Nothing in the crate caches it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A role an employee can work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color (e.g., `"#3b82f6"`).
    pub color: Option<String>,
}

impl Employee {
    /// Creates an employee.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Role {
    /// Creates a role without a color.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Employee and role lookup tables.
#[derive(Debug, Clone, Default)]
pub struct RosterContext {
    employees: HashMap<String, Employee>,
    roles: HashMap<String, Role>,
    employee_order: Vec<String>,
}

impl RosterContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee. A repeated ID replaces the earlier entry.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        if !self.employees.contains_key(&employee.id) {
            self.employee_order.push(employee.id.clone());
        }
        self.employees.insert(employee.id.clone(), employee);
        self
    }

    /// Adds a role. A repeated ID replaces the earlier entry.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role.id.clone(), role);
        self
    }

    /// Looks up an employee.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    /// Looks up a role.
    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }

    /// Employee display name, falling back to the ID for unknown employees.
    pub fn employee_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.employee(id).map(|e| e.name.as_str()).unwrap_or(id)
    }

    /// Role display name, falling back to the ID for unknown roles.
    pub fn role_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.role(id).map(|r| r.name.as_str()).unwrap_or(id)
    }

    /// Employees in registration order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employee_order
            .iter()
            .filter_map(|id| self.employees.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let ctx = RosterContext::new()
            .with_employee(Employee::new("E1", "Ada"))
            .with_role(Role::new("R1", "Cashier").with_color("#f00"));

        assert_eq!(ctx.employee_name("E1"), "Ada");
        assert_eq!(ctx.employee_name("E9"), "E9");
        assert_eq!(ctx.role_name("R1"), "Cashier");
        assert_eq!(ctx.role("R1").and_then(|r| r.color.as_deref()), Some("#f00"));
    }

    #[test]
    fn test_registration_order_and_replace() {
        let ctx = RosterContext::new()
            .with_employee(Employee::new("E2", "Bo"))
            .with_employee(Employee::new("E1", "Ada"))
            .with_employee(Employee::new("E2", "Bob"));

        let names: Vec<_> = ctx.employees().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Ada"]);
    }
}
