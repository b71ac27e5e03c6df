use super::*;

impl AccessAdminService {
    fn require_permission_reader(&self, actor: &ActorIdentity, target: EmployeeId) -> AppResult<()> {
        if actor.employee_id() == target {
            return Ok(());
        }

        self.require_colleague(actor, target)?;
        self.require_code(actor, "permissions", PermissionAction::View)
    }

    /// Returns the target's effective codes.
    pub fn effective_permissions(
        &self,
        actor: &ActorIdentity,
        target: EmployeeId,
    ) -> AppResult<Vec<PermissionCode>> {
        self.require_permission_reader(actor, target)?;
        self.engine.employee(target)?;
        Ok(self.engine.effective_permissions(target))
    }

    /// Returns the target's groups and effective codes.
    pub fn permission_overview(
        &self,
        actor: &ActorIdentity,
        target: EmployeeId,
    ) -> AppResult<PermissionOverview> {
        self.require_permission_reader(actor, target)?;
        self.engine.permission_overview(target)
    }

    /// Returns the target's stored matrix.
    pub fn matrix(&self, actor: &ActorIdentity, target: EmployeeId) -> AppResult<Vec<ResourceMatrixEntry>> {
        self.require_permission_reader(actor, target)?;
        self.engine.matrix(target)
    }

    /// Returns the target's effective permissions projected into matrix rows.
    pub fn matrix_view(
        &self,
        actor: &ActorIdentity,
        target: EmployeeId,
    ) -> AppResult<Vec<ResourceMatrixEntry>> {
        self.require_permission_reader(actor, target)?;
        self.engine.matrix_view(target)
    }

    /// Replaces another employee's matrix.
    pub async fn set_matrix(
        &self,
        actor: &ActorIdentity,
        target: EmployeeId,
        entries: Vec<ResourceMatrixEntry>,
    ) -> AppResult<Vec<ResourceMatrixEntry>> {
        self.require_code(actor, "permissions", PermissionAction::Grant)?;
        self.require_other_employee(actor, target)?;
        self.require_colleague(actor, target)?;

        let current = self.matrix_codes(&self.engine.matrix(target)?)?;
        let requested = self.matrix_codes(&entries)?;
        self.require_held_codes(actor, requested.difference(&current))?;

        let stored = self.engine.set_matrix(target, entries).await?;

        let resources: Vec<&str> = stored.iter().map(|entry| entry.resource.as_str()).collect();
        self.audit(
            actor,
            AuditAction::ResourceMatrixReplaced,
            "employee",
            target.to_string(),
            Some(format!("matrix covers [{}]", resources.join(", "))),
        )
        .await?;

        Ok(stored)
    }

    /// Answers an authorization question for the actor itself.
    #[must_use]
    pub fn can_act(
        &self,
        actor: &ActorIdentity,
        resource: &str,
        action: PermissionAction,
        target: EmployeeId,
    ) -> bool {
        self.engine
            .can_act(actor.employee_id(), resource, action, target)
    }

    /// Lists every employee the actor may act on.
    #[must_use]
    pub fn accessible_employees(
        &self,
        actor: &ActorIdentity,
        resource: &str,
        action: PermissionAction,
    ) -> Vec<EmployeeId> {
        self.engine
            .accessible_employees(actor.employee_id(), resource, action)
    }
}
