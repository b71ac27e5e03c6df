//! Facade wiring the stores into the access engine contract.

mod directory;
mod groups;
mod permissions;


use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use scopegate_core::{
    AppError, AppResult, DepartmentId, EmployeeId, GroupId, OrganizationId,
};
use scopegate_domain::{
    Employee, PermissionAction, PermissionCatalog, PermissionCode, PermissionGroup,
    PermissionScope, ResourceMatrixEntry, SystemGroupTemplate,
};
use tracing::info;

use crate::concurrency::VersionClock;
use crate::{
    AccessStateRepository, AuthorizationService, DeletedGroup, EffectivePermissionEngine,
    GroupStore, HierarchyStore, MatrixStore, MembershipChange, ReportingLineChange, ScopeResolver,
};

/// Groups and effective codes of one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionOverview {
    /// Employee described by the overview.
    pub employee_id: EmployeeId,
    /// Assigned groups ordered by name.
    pub groups: Vec<PermissionGroup>,
    /// Sorted effective codes.
    pub effective_permissions: Vec<PermissionCode>,
}

/// One employee node of an organization chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgChartNode {
    /// Employee identifier.
    pub employee_id: EmployeeId,
    /// Employee email.
    pub email: String,
    /// Department, if any.
    pub department_id: Option<DepartmentId>,
    /// Direct manager, if any.
    pub reports_to: Option<EmployeeId>,
    /// Number of direct reports.
    pub direct_report_count: usize,
}

/// Reporting structure of one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgChart {
    /// Organization described by the chart.
    pub organization_id: OrganizationId,
    /// Hierarchy version the chart was read from.
    pub version: u64,
    /// Employees without a manager.
    pub root_employee_ids: Vec<EmployeeId>,
    /// Every employee in depth-first order.
    pub nodes: Vec<OrgChartNode>,
}

/// The access engine: hierarchy, groups, matrices and authorization queries.
#[derive(Clone)]
pub struct AccessEngine {
    catalog: Arc<PermissionCatalog>,
    repository: Arc<dyn AccessStateRepository>,
    hierarchy: Arc<HierarchyStore>,
    groups: Arc<GroupStore>,
    matrices: Arc<MatrixStore>,
    permissions: Arc<EffectivePermissionEngine>,
    authorization: AuthorizationService,
}

impl AccessEngine {
    /// Creates an empty engine backed by the given repository.
    #[must_use]
    pub fn new(catalog: PermissionCatalog, repository: Arc<dyn AccessStateRepository>) -> Self {
        let catalog = Arc::new(catalog);
        let clock = Arc::new(VersionClock::new());
        let hierarchy = Arc::new(HierarchyStore::new(repository.clone(), clock.clone()));
        let groups = Arc::new(GroupStore::new(
            catalog.clone(),
            repository.clone(),
            clock.clone(),
        ));
        let matrices = Arc::new(MatrixStore::new(catalog.clone(), repository.clone(), clock));
        let permissions = Arc::new(EffectivePermissionEngine::new(
            groups.clone(),
            matrices.clone(),
        ));
        let authorization = AuthorizationService::new(hierarchy.clone(), permissions.clone());

        Self {
            catalog,
            repository,
            hierarchy,
            groups,
            matrices,
            permissions,
            authorization,
        }
    }

    /// Loads the persisted state into memory.
    ///
    /// Rejects cyclic reporting lines, undeclared codes and references that
    /// cross organizations.
    pub async fn hydrate(&self) -> AppResult<()> {
        let snapshot = self.repository.load_snapshot().await?;
        let employee_count = snapshot.employees.len();
        let group_count = snapshot.groups.len();

        self.hierarchy
            .hydrate(&snapshot.organizations, snapshot.employees)?;

        for group in &snapshot.groups {
            if !self.hierarchy.contains_organization(group.organization_id()) {
                return Err(AppError::Validation(format!(
                    "group '{}' references unknown organization '{}'",
                    group.id(),
                    group.organization_id()
                )));
            }
        }
        let group_organizations: BTreeMap<GroupId, OrganizationId> = snapshot
            .groups
            .iter()
            .map(|group| (group.id(), group.organization_id()))
            .collect();
        for (employee_id, group_id) in &snapshot.memberships {
            let employee_organization = self.require_organization_of(*employee_id)?;
            if group_organizations
                .get(group_id)
                .is_some_and(|organization_id| *organization_id != employee_organization)
            {
                return Err(AppError::Validation(format!(
                    "employee '{employee_id}' is a member of group '{group_id}' from another organization"
                )));
            }
        }
        self.groups.hydrate(snapshot.groups, snapshot.memberships)?;

        for (employee_id, _) in &snapshot.matrices {
            self.require_organization_of(*employee_id)?;
        }
        self.matrices.hydrate(snapshot.matrices)?;

        info!(
            organizations = snapshot.organizations.len(),
            employees = employee_count,
            groups = group_count,
            "access state hydrated"
        );
        Ok(())
    }

    /// Returns the permission catalog.
    #[must_use]
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Returns the authorization query service.
    #[must_use]
    pub fn authorization(&self) -> &AuthorizationService {
        &self.authorization
    }

    /// Returns the scope resolver.
    #[must_use]
    pub fn scope_resolver(&self) -> &ScopeResolver {
        self.authorization.scope_resolver()
    }

    /// Creates the organization partition and its system groups if missing.
    ///
    /// Returns the groups created by this call.
    pub async fn provision_organization(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<PermissionGroup>> {
        self.hierarchy.register_organization(organization_id).await?;

        let mut created = Vec::new();
        for template in SystemGroupTemplate::all() {
            if self
                .groups
                .find_by_name(organization_id, template.name())
                .is_some()
            {
                continue;
            }

            let group = PermissionGroup::new(
                GroupId::new(),
                organization_id,
                template.name(),
                template.description(),
            )?
            .with_permissions(template.permissions(&self.catalog))
            .with_system_flag(true);
            created.push(self.groups.insert_group(group).await?);
        }

        info!(
            organization_id = %organization_id,
            created_groups = created.len(),
            "organization provisioned"
        );
        Ok(created)
    }

    fn require_employee(&self, employee_id: EmployeeId) -> AppResult<Employee> {
        self.hierarchy.employee(employee_id).ok_or_else(|| {
            AppError::EmployeeNotFound(format!("employee '{employee_id}' does not exist"))
        })
    }

    fn require_organization_of(&self, employee_id: EmployeeId) -> AppResult<OrganizationId> {
        self.hierarchy.organization_of(employee_id).ok_or_else(|| {
            AppError::EmployeeNotFound(format!("employee '{employee_id}' does not exist"))
        })
    }

    fn require_organization(&self, organization_id: OrganizationId) -> AppResult<()> {
        if self.hierarchy.contains_organization(organization_id) {
            return Ok(());
        }

        Err(AppError::NotFound(format!(
            "organization '{organization_id}' is not provisioned"
        )))
    }
}
