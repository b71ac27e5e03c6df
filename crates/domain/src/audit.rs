use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by access administration use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when system groups are provisioned for an organization.
    OrganizationProvisioned,
    /// Emitted when a permission group is created.
    PermissionGroupCreated,
    /// Emitted when a group's name or description changes.
    PermissionGroupUpdated,
    /// Emitted when a group's permission set is replaced.
    PermissionGroupPermissionsReplaced,
    /// Emitted when a permission group is deleted.
    PermissionGroupDeleted,
    /// Emitted when an employee's group memberships are replaced.
    EmployeeGroupsReplaced,
    /// Emitted when an employee's resource matrix is replaced.
    ResourceMatrixReplaced,
    /// Emitted when a reporting line changes.
    ReportingLineChanged,
    /// Emitted when an employee record is created or updated.
    EmployeeUpserted,
    /// Emitted when an employee record is removed.
    EmployeeRemoved,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrganizationProvisioned => "access.organization.provisioned",
            Self::PermissionGroupCreated => "access.group.created",
            Self::PermissionGroupUpdated => "access.group.updated",
            Self::PermissionGroupPermissionsReplaced => "access.group.permissions_replaced",
            Self::PermissionGroupDeleted => "access.group.deleted",
            Self::EmployeeGroupsReplaced => "access.employee.groups_replaced",
            Self::ResourceMatrixReplaced => "access.employee.matrix_replaced",
            Self::ReportingLineChanged => "access.employee.manager_changed",
            Self::EmployeeUpserted => "access.employee.upserted",
            Self::EmployeeRemoved => "access.employee.removed",
        }
    }
}
