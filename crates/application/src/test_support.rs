use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use scopegate_core::{AppError, AppResult, DepartmentId, EmployeeId, GroupId, OrganizationId};
use scopegate_domain::{Employee, PermissionCatalog, PermissionGroup, ResourceMatrixEntry};
use tokio::sync::Mutex;

use crate::{AccessEngine, AccessStateRepository, AccessStateSnapshot, AuditEvent, AuditRepository};

#[derive(Default)]
pub(crate) struct FakeAccessStateRepository {
    pub(crate) state: Mutex<AccessStateSnapshot>,
    pub(crate) fail_writes: AtomicBool,
    pub(crate) writes: AtomicUsize,
}

impl FakeAccessStateRepository {
    pub(crate) fn failing(&self, value: bool) {
        self.fail_writes.store(value, Ordering::SeqCst);
    }

    fn begin_write(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("storage unavailable".to_owned()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl AccessStateRepository for FakeAccessStateRepository {
    async fn load_snapshot(&self) -> AppResult<AccessStateSnapshot> {
        Ok(self.state.lock().await.clone())
    }

    async fn save_organization(&self, organization_id: OrganizationId) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        if !state.organizations.contains(&organization_id) {
            state.organizations.push(organization_id);
        }
        Ok(())
    }

    async fn save_employee(&self, employee: &Employee) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        state.employees.retain(|existing| existing.id() != employee.id());
        state.employees.push(employee.clone());
        Ok(())
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        state.employees.retain(|existing| existing.id() != employee_id);
        state.memberships.retain(|(member, _)| *member != employee_id);
        state.matrices.retain(|(owner, _)| *owner != employee_id);
        Ok(())
    }

    async fn save_reporting_line(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        for employee in state.employees.iter_mut() {
            if employee.id() == employee_id {
                employee.set_reports_to(manager_id);
            }
        }
        Ok(())
    }

    async fn save_group(&self, group: &PermissionGroup) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        state.groups.retain(|existing| existing.id() != group.id());
        state.groups.push(group.clone());
        Ok(())
    }

    async fn delete_group(&self, group_id: GroupId) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        state.groups.retain(|existing| existing.id() != group_id);
        state.memberships.retain(|(_, group)| *group != group_id);
        Ok(())
    }

    async fn replace_employee_groups(
        &self,
        employee_id: EmployeeId,
        group_ids: &BTreeSet<GroupId>,
    ) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        state.memberships.retain(|(member, _)| *member != employee_id);
        state
            .memberships
            .extend(group_ids.iter().map(|group_id| (employee_id, *group_id)));
        Ok(())
    }

    async fn replace_resource_matrix(
        &self,
        employee_id: EmployeeId,
        entries: &[ResourceMatrixEntry],
    ) -> AppResult<()> {
        self.begin_write()?;
        let mut state = self.state.lock().await;
        state.matrices.retain(|(owner, _)| *owner != employee_id);
        state
            .matrices
            .extend(entries.iter().map(|entry| (employee_id, entry.clone())));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

pub(crate) fn engine_with_repository() -> (AccessEngine, Arc<FakeAccessStateRepository>) {
    let repository = Arc::new(FakeAccessStateRepository::default());
    let engine = AccessEngine::new(PermissionCatalog::system_default(), repository.clone());
    (engine, repository)
}

pub(crate) fn employee(
    organization_id: OrganizationId,
    email: &str,
    manager: Option<EmployeeId>,
    department: Option<DepartmentId>,
) -> Employee {
    Employee::new(EmployeeId::new(), organization_id, email)
        .unwrap_or_else(|_| unreachable!())
        .with_manager(manager)
        .with_department(department)
}

/// CEO, two leads and one engineer per lead; leads share a department.
pub(crate) struct SampleOrganization {
    pub(crate) organization_id: OrganizationId,
    pub(crate) ceo: EmployeeId,
    pub(crate) lead_a: EmployeeId,
    pub(crate) lead_b: EmployeeId,
    pub(crate) engineer_a: EmployeeId,
    pub(crate) engineer_b: EmployeeId,
    pub(crate) engineering: DepartmentId,
}

pub(crate) async fn sample_organization(engine: &AccessEngine) -> SampleOrganization {
    let organization_id = OrganizationId::new();
    let engineering = DepartmentId::new();
    engine
        .provision_organization(organization_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    let ceo = employee(organization_id, "ceo@acme.io", None, None);
    let lead_a = employee(organization_id, "lead.a@acme.io", Some(ceo.id()), Some(engineering));
    let lead_b = employee(organization_id, "lead.b@acme.io", Some(ceo.id()), Some(engineering));
    let engineer_a = employee(organization_id, "eng.a@acme.io", Some(lead_a.id()), None);
    let engineer_b = employee(organization_id, "eng.b@acme.io", Some(lead_b.id()), None);

    let sample = SampleOrganization {
        organization_id,
        ceo: ceo.id(),
        lead_a: lead_a.id(),
        lead_b: lead_b.id(),
        engineer_a: engineer_a.id(),
        engineer_b: engineer_b.id(),
        engineering,
    };

    for record in [ceo, lead_a, lead_b, engineer_a, engineer_b] {
        engine
            .upsert_employee(record)
            .await
            .unwrap_or_else(|_| unreachable!());
    }

    sample
}
