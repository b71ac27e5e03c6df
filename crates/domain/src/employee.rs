//! Employee directory records as seen by the access engine.

use scopegate_core::{AppError, AppResult, DepartmentId, EmployeeId, OrganizationId};
use serde::{Deserialize, Serialize};

/// Validated, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Requires exactly one `@`, a non-empty local part and a dotted domain.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(format!(
                "email address '{value}' must contain '@'"
            )));
        };

        if local.is_empty() || domain.contains('@') {
            return Err(AppError::Validation(format!(
                "email address '{value}' is malformed"
            )));
        }

        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(AppError::Validation(format!(
                "email domain of '{value}' must contain a '.'"
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Employee node of an organization's reporting hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    organization_id: OrganizationId,
    email: EmailAddress,
    department_id: Option<DepartmentId>,
    reports_to: Option<EmployeeId>,
}

impl Employee {
    /// Creates an employee without department or manager.
    pub fn new(
        id: EmployeeId,
        organization_id: OrganizationId,
        email: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            organization_id,
            email: EmailAddress::new(email)?,
            department_id: None,
            reports_to: None,
        })
    }

    /// Returns the employee with a department assigned.
    #[must_use]
    pub fn with_department(mut self, department_id: Option<DepartmentId>) -> Self {
        self.department_id = department_id;
        self
    }

    /// Returns the employee with a manager assigned.
    #[must_use]
    pub fn with_manager(mut self, reports_to: Option<EmployeeId>) -> Self {
        self.reports_to = reports_to;
        self
    }

    /// Returns the employee identifier.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the department, if any.
    #[must_use]
    pub fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    /// Returns the direct manager, if any.
    #[must_use]
    pub fn reports_to(&self) -> Option<EmployeeId> {
        self.reports_to
    }

    /// Replaces the direct manager.
    pub fn set_reports_to(&mut self, reports_to: Option<EmployeeId>) {
        self.reports_to = reports_to;
    }
}

#[cfg(test)]
mod tests {
    use scopegate_core::{EmployeeId, OrganizationId};

    use super::{EmailAddress, Employee};

    #[test]
    fn email_is_normalized() {
        let email = EmailAddress::new("  Ada@Example.COM ");
        assert!(matches!(email, Ok(ref email) if email.as_str() == "ada@example.com"));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for value in ["", "ada", "@example.com", "ada@example", "ada@@example.com", "ada@.com"] {
            assert!(EmailAddress::new(value).is_err(), "accepted '{value}'");
        }
    }

    #[test]
    fn manager_can_be_replaced() {
        let manager = EmployeeId::new();
        let mut employee = Employee::new(EmployeeId::new(), OrganizationId::new(), "a@b.io")
            .unwrap_or_else(|_| unreachable!())
            .with_manager(Some(manager));
        assert_eq!(employee.reports_to(), Some(manager));

        employee.set_reports_to(None);
        assert_eq!(employee.reports_to(), None);
    }
}
