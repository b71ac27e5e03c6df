use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use scopegate_application::{AccessStateRepository, AccessStateSnapshot};
use scopegate_core::{AppError, AppResult, EmployeeId, GroupId, OrganizationId};
use scopegate_domain::{Employee, PermissionGroup, ResourceMatrixEntry};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoredState {
    organizations: BTreeSet<OrganizationId>,
    employees: HashMap<EmployeeId, Employee>,
    groups: HashMap<GroupId, PermissionGroup>,
    memberships: BTreeMap<EmployeeId, BTreeSet<GroupId>>,
    matrices: BTreeMap<EmployeeId, Vec<ResourceMatrixEntry>>,
}

/// In-memory access state used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryAccessStateRepository {
    state: RwLock<StoredState>,
}

impl InMemoryAccessStateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessStateRepository for InMemoryAccessStateRepository {
    async fn load_snapshot(&self) -> AppResult<AccessStateSnapshot> {
        let state = self.state.read().await;

        let mut employees: Vec<Employee> = state.employees.values().cloned().collect();
        employees.sort_by_key(Employee::id);
        let mut groups: Vec<PermissionGroup> = state.groups.values().cloned().collect();
        groups.sort_by_key(PermissionGroup::id);

        Ok(AccessStateSnapshot {
            organizations: state.organizations.iter().copied().collect(),
            employees,
            groups,
            memberships: state
                .memberships
                .iter()
                .flat_map(|(employee_id, group_ids)| {
                    group_ids.iter().map(|group_id| (*employee_id, *group_id))
                })
                .collect(),
            matrices: state
                .matrices
                .iter()
                .flat_map(|(employee_id, entries)| {
                    entries.iter().map(|entry| (*employee_id, entry.clone()))
                })
                .collect(),
        })
    }

    async fn save_organization(&self, organization_id: OrganizationId) -> AppResult<()> {
        self.state.write().await.organizations.insert(organization_id);
        Ok(())
    }

    async fn save_employee(&self, employee: &Employee) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.organizations.contains(&employee.organization_id()) {
            return Err(AppError::NotFound(format!(
                "organization '{}' does not exist",
                employee.organization_id()
            )));
        }

        state.employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.employees.remove(&employee_id).is_none() {
            return Err(AppError::EmployeeNotFound(format!(
                "employee '{employee_id}' does not exist"
            )));
        }

        state.memberships.remove(&employee_id);
        state.matrices.remove(&employee_id);
        Ok(())
    }

    async fn save_reporting_line(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        let employee = state.employees.get_mut(&employee_id).ok_or_else(|| {
            AppError::EmployeeNotFound(format!("employee '{employee_id}' does not exist"))
        })?;

        employee.set_reports_to(manager_id);
        Ok(())
    }

    async fn save_group(&self, group: &PermissionGroup) -> AppResult<()> {
        self.state
            .write()
            .await
            .groups
            .insert(group.id(), group.clone());
        Ok(())
    }

    async fn delete_group(&self, group_id: GroupId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.groups.remove(&group_id).is_none() {
            return Err(AppError::GroupNotFound(format!(
                "group '{group_id}' does not exist"
            )));
        }

        for group_ids in state.memberships.values_mut() {
            group_ids.remove(&group_id);
        }
        state.memberships.retain(|_, group_ids| !group_ids.is_empty());
        Ok(())
    }

    async fn replace_employee_groups(
        &self,
        employee_id: EmployeeId,
        group_ids: &BTreeSet<GroupId>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.employees.contains_key(&employee_id) {
            return Err(AppError::EmployeeNotFound(format!(
                "employee '{employee_id}' does not exist"
            )));
        }
        if group_ids.is_empty() {
            state.memberships.remove(&employee_id);
        } else {
            state.memberships.insert(employee_id, group_ids.clone());
        }
        Ok(())
    }

    async fn replace_resource_matrix(
        &self,
        employee_id: EmployeeId,
        entries: &[ResourceMatrixEntry],
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.employees.contains_key(&employee_id) {
            return Err(AppError::EmployeeNotFound(format!(
                "employee '{employee_id}' does not exist"
            )));
        }
        if entries.is_empty() {
            state.matrices.remove(&employee_id);
        } else {
            state.matrices.insert(employee_id, entries.to_vec());
        }
        Ok(())
    }
}
