use std::collections::BTreeSet;

use async_trait::async_trait;
use scopegate_core::{AppResult, EmployeeId, GroupId, OrganizationId};
use scopegate_domain::{Employee, PermissionGroup, ResourceMatrixEntry};

/// Full persisted access state loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessStateSnapshot {
    /// Known organizations.
    pub organizations: Vec<OrganizationId>,
    /// Employees with their reporting lines.
    pub employees: Vec<Employee>,
    /// Permission groups with their codes.
    pub groups: Vec<PermissionGroup>,
    /// Employee to group memberships.
    pub memberships: Vec<(EmployeeId, GroupId)>,
    /// Stored matrix rows per employee.
    pub matrices: Vec<(EmployeeId, ResourceMatrixEntry)>,
}

/// Durable storage behind the in-memory stores.
///
/// Every write completes before the matching in-memory change is published.
#[async_trait]
pub trait AccessStateRepository: Send + Sync {
    /// Loads the complete access state.
    async fn load_snapshot(&self) -> AppResult<AccessStateSnapshot>;

    /// Records an organization partition.
    async fn save_organization(&self, organization_id: OrganizationId) -> AppResult<()>;

    /// Inserts or updates an employee, including its reporting line.
    async fn save_employee(&self, employee: &Employee) -> AppResult<()>;

    /// Deletes an employee together with its memberships and matrix.
    async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<()>;

    /// Updates only the reporting line of an employee.
    async fn save_reporting_line(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<()>;

    /// Inserts or updates a group including its permission set.
    async fn save_group(&self, group: &PermissionGroup) -> AppResult<()>;

    /// Deletes a group together with its memberships.
    async fn delete_group(&self, group_id: GroupId) -> AppResult<()>;

    /// Replaces the full membership set of an employee.
    async fn replace_employee_groups(
        &self,
        employee_id: EmployeeId,
        group_ids: &BTreeSet<GroupId>,
    ) -> AppResult<()>;

    /// Replaces the full matrix of an employee.
    async fn replace_resource_matrix(
        &self,
        employee_id: EmployeeId,
        entries: &[ResourceMatrixEntry],
    ) -> AppResult<()>;
}
