//! Shared primitives for all Rust crates in scopegate.

#![forbid(unsafe_code)]

/// Actor identity shared across services.
pub mod auth;
mod ids;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::ActorIdentity;
pub use ids::{DepartmentId, EmployeeId, GroupId, OrganizationId};

/// Result type used across scopegate crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string with surrounding whitespace removed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Permission code is malformed or not declared by the catalog.
    #[error("unknown permission code: {0}")]
    UnknownPermissionCode(String),

    /// Referenced permission group does not exist.
    #[error("group not found: {0}")]
    GroupNotFound(String),

    /// Group name already used inside the organization.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// Reporting-line change would make the hierarchy cyclic.
    #[error("cycle detected: {0}")]
    CycleDetected(String),

    /// Referenced employee does not exist.
    #[error("employee not found: {0}")]
    EmployeeNotFound(String),

    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller could not be identified.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is identified but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns a stable machine-readable code for the error category.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownPermissionCode(_) => "unknown_permission_code",
            Self::GroupNotFound(_) => "group_not_found",
            Self::DuplicateName(_) => "duplicate_name",
            Self::CycleDetected(_) => "cycle_detected",
            Self::EmployeeNotFound(_) => "employee_not_found",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, EmployeeId, NonEmptyString, OrganizationId};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_trims_value() {
        let value = NonEmptyString::new("  Payroll  ");
        assert!(matches!(value, Ok(ref value) if value.as_str() == "Payroll"));
    }

    #[test]
    fn organization_id_formats_as_uuid() {
        let organization_id = OrganizationId::new();
        assert_eq!(organization_id.to_string().len(), 36);
    }

    #[test]
    fn employee_id_parses_round_trip_and_rejects_garbage() {
        let employee_id = EmployeeId::new();
        let parsed = employee_id.to_string().parse::<EmployeeId>();
        assert!(matches!(parsed, Ok(value) if value == employee_id));

        let invalid = "not-a-uuid".parse::<EmployeeId>();
        assert!(matches!(invalid, Err(AppError::Validation(_))));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            AppError::CycleDetected("a".to_owned()).code(),
            "cycle_detected"
        );
        assert_eq!(
            AppError::UnknownPermissionCode("x".to_owned()).code(),
            "unknown_permission_code"
        );
    }
}
