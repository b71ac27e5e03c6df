use super::*;

const EMPLOYEE_RESOURCE: &str = "employees";
const EMPLOYEE_AUDIT_TYPE: &str = "employee";

impl AccessAdminService {
    /// Returns the reporting structure of the actor's organization.
    pub fn org_chart(&self, actor: &ActorIdentity) -> AppResult<OrgChart> {
        self.engine.org_chart(actor.organization_id())
    }

    /// Creates or updates an employee of the actor's organization.
    pub async fn upsert_employee(
        &self,
        actor: &ActorIdentity,
        employee: Employee,
    ) -> AppResult<Employee> {
        if employee.organization_id() != actor.organization_id() {
            warn!(actor = %actor.employee_id(), target = %employee.id(), "cross-organization upsert denied");
            return Err(AppError::Forbidden(format!(
                "employee '{}' is outside the actor's organization",
                employee.id()
            )));
        }

        let exists = self.engine.employee(employee.id()).is_ok();
        if exists {
            self.require_can_act(actor, EMPLOYEE_RESOURCE, PermissionAction::Edit, employee.id())?;
        } else {
            self.require_code(actor, EMPLOYEE_RESOURCE, PermissionAction::Create)?;
        }

        let previous = self.engine.upsert_employee(employee.clone()).await?;

        let detail = match previous {
            Some(_) => format!("updated employee '{}'", employee.email().as_str()),
            None => format!("created employee '{}'", employee.email().as_str()),
        };
        self.audit(
            actor,
            AuditAction::EmployeeUpserted,
            EMPLOYEE_AUDIT_TYPE,
            employee.id().to_string(),
            Some(detail),
        )
        .await?;

        Ok(employee)
    }

    /// Removes an employee without direct reports.
    pub async fn remove_employee(&self, actor: &ActorIdentity, target: EmployeeId) -> AppResult<()> {
        self.require_other_employee(actor, target)?;
        self.require_colleague(actor, target)?;
        self.require_can_act(actor, EMPLOYEE_RESOURCE, PermissionAction::Delete, target)?;

        let removed = self.engine.remove_employee(target).await?;

        self.audit(
            actor,
            AuditAction::EmployeeRemoved,
            EMPLOYEE_AUDIT_TYPE,
            target.to_string(),
            Some(format!("removed employee '{}'", removed.email().as_str())),
        )
        .await
    }

    /// Moves an employee under a new manager, or makes them a root.
    pub async fn set_manager(
        &self,
        actor: &ActorIdentity,
        target: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<()> {
        self.require_colleague(actor, target)?;
        self.require_can_act(actor, EMPLOYEE_RESOURCE, PermissionAction::Edit, target)?;

        let change = self.engine.set_manager(target, manager_id).await?;
        if change.previous_manager == change.current_manager {
            return Ok(());
        }

        let describe = |manager: Option<EmployeeId>| {
            manager.map_or_else(|| "none".to_owned(), |manager_id| manager_id.to_string())
        };
        self.audit(
            actor,
            AuditAction::ReportingLineChanged,
            EMPLOYEE_AUDIT_TYPE,
            target.to_string(),
            Some(format!(
                "manager changed from {} to {}",
                describe(change.previous_manager),
                describe(change.current_manager)
            )),
        )
        .await
    }

    /// Replaces the group memberships of another employee.
    pub async fn set_employee_groups(
        &self,
        actor: &ActorIdentity,
        target: EmployeeId,
        group_ids: Vec<GroupId>,
    ) -> AppResult<Vec<PermissionGroup>> {
        self.require_code(actor, "permission-groups", PermissionAction::Assign)?;
        self.require_other_employee(actor, target)?;
        self.require_colleague(actor, target)?;

        let current: BTreeSet<GroupId> = self
            .engine
            .employee_groups(target)?
            .iter()
            .map(PermissionGroup::id)
            .collect();
        let mut granted = BTreeSet::new();
        for group_id in group_ids.iter().filter(|group_id| !current.contains(*group_id)) {
            let group = self.require_organization_group(actor, *group_id)?;
            granted.extend(group.permissions().iter().cloned());
        }
        self.require_held_codes(actor, &granted)?;

        let change = self.engine.set_employee_groups(target, group_ids).await?;

        let names = |ids: Vec<&GroupId>| {
            ids.into_iter()
                .map(|group_id| {
                    self.engine
                        .get_group(*group_id)
                        .map_or_else(|_| group_id.to_string(), |group| group.name().to_owned())
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        self.audit(
            actor,
            AuditAction::EmployeeGroupsReplaced,
            EMPLOYEE_AUDIT_TYPE,
            target.to_string(),
            Some(format!(
                "added [{}]; removed [{}]",
                names(change.added().collect()),
                names(change.removed().collect())
            )),
        )
        .await?;

        self.engine.employee_groups(target)
    }
}
