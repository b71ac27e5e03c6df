use serde::{Deserialize, Serialize};

use crate::{EmployeeId, OrganizationId};

/// Employee acting on the access engine for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    employee_id: EmployeeId,
    organization_id: OrganizationId,
    email: String,
}

impl ActorIdentity {
    /// Creates an actor identity from a resolved employee record.
    #[must_use]
    pub fn new(
        employee_id: EmployeeId,
        organization_id: OrganizationId,
        email: impl Into<String>,
    ) -> Self {
        Self {
            employee_id,
            organization_id,
            email: email.into(),
        }
    }

    /// Returns the acting employee.
    #[must_use]
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the organization the actor belongs to.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the actor email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the audit subject recorded for mutations by this actor.
    #[must_use]
    pub fn subject(&self) -> String {
        self.employee_id.to_string()
    }
}
