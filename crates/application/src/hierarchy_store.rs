//! Per-organization reporting hierarchy with copy-on-write snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use scopegate_core::{AppError, AppResult, EmployeeId, OrganizationId};
use scopegate_domain::{Employee, HierarchyIndex, ScopeRelation};
use tracing::info;

use crate::AccessStateRepository;
use crate::concurrency::{KeyedLocks, VersionClock};


/// Immutable view of one organization's employees and descendant index.
#[derive(Debug, Clone)]
pub struct HierarchySnapshot {
    organization_id: OrganizationId,
    version: u64,
    employees: HashMap<EmployeeId, Employee>,
    index: HierarchyIndex,
}

impl HierarchySnapshot {
    fn build(
        organization_id: OrganizationId,
        version: u64,
        employees: HashMap<EmployeeId, Employee>,
    ) -> AppResult<Self> {
        let index = HierarchyIndex::build(
            employees
                .values()
                .map(|employee| (employee.id(), employee.reports_to())),
        )?;

        Ok(Self {
            organization_id,
            version,
            employees,
            index,
        })
    }

    /// Returns the organization this snapshot belongs to.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the version assigned when the snapshot was published.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns one employee.
    #[must_use]
    pub fn employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&employee_id)
    }

    /// Returns all employees in unspecified order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Returns the descendant index.
    #[must_use]
    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    /// Returns the number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns whether the organization has no employees yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Classifies how `actor` relates to `target` inside this organization.
    #[must_use]
    pub fn relation(&self, actor: EmployeeId, target: EmployeeId) -> ScopeRelation {
        let (Some(actor_record), Some(target_record)) =
            (self.employees.get(&actor), self.employees.get(&target))
        else {
            return ScopeRelation::none();
        };

        let is_own = actor == target;
        ScopeRelation {
            is_own,
            is_team: !is_own && self.index.is_descendant(actor, target),
            is_department: actor_record.department_id().is_some()
                && actor_record.department_id() == target_record.department_id(),
            is_organization: true,
        }
    }
}

/// Outcome of a reporting-line change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingLineChange {
    /// Employee whose manager changed.
    pub employee_id: EmployeeId,
    /// Manager before the change.
    pub previous_manager: Option<EmployeeId>,
    /// Manager after the change.
    pub current_manager: Option<EmployeeId>,
    /// Hierarchy version visible after the change.
    pub version: u64,
}

/// Reporting forest of every organization.
///
/// Readers clone the current `Arc<HierarchySnapshot>` and never wait on
/// writers; writers serialize per organization and publish a rebuilt snapshot.
pub struct HierarchyStore {
    repository: Arc<dyn AccessStateRepository>,
    clock: Arc<VersionClock>,
    organizations: DashMap<OrganizationId, Arc<HierarchySnapshot>>,
    employee_organizations: DashMap<EmployeeId, OrganizationId>,
    organization_writers: KeyedLocks<OrganizationId>,
    employee_writers: KeyedLocks<EmployeeId>,
}

impl HierarchyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(repository: Arc<dyn AccessStateRepository>, clock: Arc<VersionClock>) -> Self {
        Self {
            repository,
            clock,
            organizations: DashMap::new(),
            employee_organizations: DashMap::new(),
            organization_writers: KeyedLocks::default(),
            employee_writers: KeyedLocks::default(),
        }
    }

    /// Returns the current snapshot of an organization.
    #[must_use]
    pub fn snapshot(&self, organization_id: OrganizationId) -> Option<Arc<HierarchySnapshot>> {
        self.organizations
            .get(&organization_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the current snapshot of the employee's organization.
    #[must_use]
    pub fn snapshot_for(&self, employee_id: EmployeeId) -> Option<Arc<HierarchySnapshot>> {
        self.organization_of(employee_id)
            .and_then(|organization_id| self.snapshot(organization_id))
    }

    /// Returns the organization an employee belongs to.
    #[must_use]
    pub fn organization_of(&self, employee_id: EmployeeId) -> Option<OrganizationId> {
        self.employee_organizations
            .get(&employee_id)
            .map(|entry| *entry.value())
    }

    /// Returns whether the organization partition exists.
    #[must_use]
    pub fn contains_organization(&self, organization_id: OrganizationId) -> bool {
        self.organizations.contains_key(&organization_id)
    }

    /// Returns one employee record.
    #[must_use]
    pub fn employee(&self, employee_id: EmployeeId) -> Option<Employee> {
        self.snapshot_for(employee_id)
            .and_then(|snapshot| snapshot.employee(employee_id).cloned())
    }

    /// Returns the direct manager of an employee.
    #[must_use]
    pub fn get_manager(&self, employee_id: EmployeeId) -> Option<EmployeeId> {
        self.snapshot_for(employee_id)
            .and_then(|snapshot| snapshot.index().manager_of(employee_id))
    }

    /// Returns the direct reports of an employee.
    #[must_use]
    pub fn direct_reports(&self, employee_id: EmployeeId) -> Vec<EmployeeId> {
        self.snapshot_for(employee_id)
            .map(|snapshot| snapshot.index().direct_reports(employee_id).to_vec())
            .unwrap_or_default()
    }

    /// Returns whether `candidate` is strictly below `ancestor`.
    #[must_use]
    pub fn is_descendant(&self, ancestor: EmployeeId, candidate: EmployeeId) -> bool {
        self.snapshot_for(ancestor)
            .is_some_and(|snapshot| snapshot.index().is_descendant(ancestor, candidate))
    }

    /// Returns whether both employees have the same, present, department.
    #[must_use]
    pub fn same_department(&self, first: EmployeeId, second: EmployeeId) -> bool {
        self.snapshot_for(first)
            .is_some_and(|snapshot| snapshot.relation(first, second).is_department)
    }

    /// Returns whether both employees belong to the same organization.
    #[must_use]
    pub fn same_organization(&self, first: EmployeeId, second: EmployeeId) -> bool {
        match (self.organization_of(first), self.organization_of(second)) {
            (Some(first), Some(second)) => first == second,
            _ => false,
        }
    }

    /// Creates an empty partition. Returns `false` when it already existed.
    pub async fn register_organization(&self, organization_id: OrganizationId) -> AppResult<bool> {
        let _writer = self.organization_writers.lock(organization_id).await;
        if self.contains_organization(organization_id) {
            return Ok(false);
        }

        self.repository.save_organization(organization_id).await?;
        let snapshot =
            HierarchySnapshot::build(organization_id, self.clock.next(), HashMap::new())?;
        self.organizations.insert(organization_id, Arc::new(snapshot));

        info!(organization_id = %organization_id, "organization partition registered");
        Ok(true)
    }

    /// Replaces the manager of an employee; `None` makes the employee a root.
    pub async fn set_manager(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<ReportingLineChange> {
        let organization_id = self.organization_of(employee_id).ok_or_else(|| {
            AppError::EmployeeNotFound(format!("employee '{employee_id}' does not exist"))
        })?;
        let _writer = self.organization_writers.lock(organization_id).await;
        let current = self.require_snapshot(organization_id)?;

        let previous_manager = current
            .employee(employee_id)
            .ok_or_else(|| {
                AppError::EmployeeNotFound(format!("employee '{employee_id}' does not exist"))
            })?
            .reports_to();
        self.check_manager(&current, employee_id, manager_id)?;

        if previous_manager == manager_id {
            return Ok(ReportingLineChange {
                employee_id,
                previous_manager,
                current_manager: manager_id,
                version: current.version(),
            });
        }

        let mut employees = current.employees.clone();
        if let Some(employee) = employees.get_mut(&employee_id) {
            employee.set_reports_to(manager_id);
        }
        let next = HierarchySnapshot::build(organization_id, self.clock.next(), employees)?;

        self.repository
            .save_reporting_line(employee_id, manager_id)
            .await?;
        let version = next.version();
        self.organizations.insert(organization_id, Arc::new(next));

        info!(
            organization_id = %organization_id,
            employee_id = %employee_id,
            version,
            "reporting line changed"
        );

        Ok(ReportingLineChange {
            employee_id,
            previous_manager,
            current_manager: manager_id,
            version,
        })
    }

    /// Creates or updates an employee record. Returns the previous record.
    pub async fn upsert_employee(&self, employee: Employee) -> AppResult<Option<Employee>> {
        let employee_id = employee.id();
        let organization_id = employee.organization_id();
        let _employee_writer = self.employee_writers.lock(employee_id).await;

        if let Some(existing) = self.organization_of(employee_id)
            && existing != organization_id
        {
            return Err(AppError::Validation(format!(
                "employee '{employee_id}' belongs to organization '{existing}' and cannot move"
            )));
        }

        let _writer = self.organization_writers.lock(organization_id).await;
        let current = self.require_snapshot(organization_id)?;
        self.check_manager(&current, employee_id, employee.reports_to())?;

        let mut employees = current.employees.clone();
        let previous = employees.insert(employee_id, employee.clone());
        let next = HierarchySnapshot::build(organization_id, self.clock.next(), employees)?;

        self.repository.save_employee(&employee).await?;
        self.organizations.insert(organization_id, Arc::new(next));
        self.employee_organizations
            .insert(employee_id, organization_id);

        info!(
            organization_id = %organization_id,
            employee_id = %employee_id,
            created = previous.is_none(),
            "employee upserted"
        );
        Ok(previous)
    }

    /// Removes an employee without direct reports.
    pub async fn remove_employee(&self, employee_id: EmployeeId) -> AppResult<Employee> {
        let employee_writer = self.employee_writers.lock(employee_id).await;
        let organization_id = self.organization_of(employee_id).ok_or_else(|| {
            AppError::EmployeeNotFound(format!("employee '{employee_id}' does not exist"))
        })?;
        let writer = self.organization_writers.lock(organization_id).await;
        let current = self.require_snapshot(organization_id)?;

        let Some(removed) = current.employee(employee_id).cloned() else {
            return Err(AppError::EmployeeNotFound(format!(
                "employee '{employee_id}' does not exist"
            )));
        };

        let direct_reports = current.index().direct_reports(employee_id).len();
        if direct_reports > 0 {
            return Err(AppError::Conflict(format!(
                "employee '{employee_id}' still has {direct_reports} direct report(s)"
            )));
        }

        let mut employees = current.employees.clone();
        employees.remove(&employee_id);
        let next = HierarchySnapshot::build(organization_id, self.clock.next(), employees)?;

        self.repository.delete_employee(employee_id).await?;
        self.organizations.insert(organization_id, Arc::new(next));
        self.employee_organizations.remove(&employee_id);
        drop(writer);
        drop(employee_writer);
        self.employee_writers.forget(&employee_id);

        info!(
            organization_id = %organization_id,
            employee_id = %employee_id,
            "employee removed"
        );
        Ok(removed)
    }

    /// Replaces all in-memory state with persisted records.
    pub(crate) fn hydrate(
        &self,
        organizations: &[OrganizationId],
        employees: Vec<Employee>,
    ) -> AppResult<()> {
        let mut partitions: HashMap<OrganizationId, HashMap<EmployeeId, Employee>> = organizations
            .iter()
            .map(|organization_id| (*organization_id, HashMap::new()))
            .collect();

        for employee in employees {
            let employee_id = employee.id();
            let partition = partitions.entry(employee.organization_id()).or_default();
            if partition.insert(employee_id, employee).is_some() {
                return Err(AppError::Validation(format!(
                    "employee '{employee_id}' appears twice in the stored state"
                )));
            }
        }

        let mut snapshots = Vec::with_capacity(partitions.len());
        for (organization_id, employees) in partitions {
            snapshots.push(HierarchySnapshot::build(
                organization_id,
                self.clock.next(),
                employees,
            )?);
        }

        self.organizations.clear();
        self.employee_organizations.clear();
        for snapshot in snapshots {
            let organization_id = snapshot.organization_id();
            for employee_id in snapshot.employees.keys() {
                self.employee_organizations
                    .insert(*employee_id, organization_id);
            }
            self.organizations.insert(organization_id, Arc::new(snapshot));
        }

        Ok(())
    }

    fn require_snapshot(&self, organization_id: OrganizationId) -> AppResult<Arc<HierarchySnapshot>> {
        self.snapshot(organization_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "organization '{organization_id}' is not provisioned"
            ))
        })
    }

    fn check_manager(
        &self,
        snapshot: &HierarchySnapshot,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<()> {
        let Some(manager_id) = manager_id else {
            return Ok(());
        };

        if manager_id == employee_id {
            return Err(AppError::CycleDetected(format!(
                "employee '{employee_id}' cannot report to themselves"
            )));
        }

        if snapshot.employee(manager_id).is_none() {
            return Err(match self.organization_of(manager_id) {
                Some(other) => AppError::Validation(format!(
                    "manager '{manager_id}' belongs to organization '{other}'"
                )),
                None => {
                    AppError::EmployeeNotFound(format!("manager '{manager_id}' does not exist"))
                }
            });
        }

        if snapshot.index().would_create_cycle(employee_id, Some(manager_id)) {
            return Err(AppError::CycleDetected(format!(
                "employee '{employee_id}' cannot report to '{manager_id}'"
            )));
        }

        Ok(())
    }
}
