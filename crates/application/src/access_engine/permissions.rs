use super::*;

impl AccessEngine {
    /// Returns the employee's effective codes in canonical order.
    ///
    /// Unknown employees get an empty list.
    #[must_use]
    pub fn effective_permissions(&self, employee_id: EmployeeId) -> Vec<PermissionCode> {
        self.permissions
            .effective_permissions(employee_id)
            .iter()
            .cloned()
            .collect()
    }

    /// Returns whether `actor` may perform `action` on `resource` owned by `target`.
    #[must_use]
    pub fn can_act(
        &self,
        actor: EmployeeId,
        resource: &str,
        action: PermissionAction,
        target: EmployeeId,
    ) -> bool {
        self.authorization.can_act(actor, resource, action, target)
    }

    /// Returns the widest scope at which the actor holds `resource:action`.
    #[must_use]
    pub fn highest_scope(
        &self,
        actor: EmployeeId,
        resource: &str,
        action: PermissionAction,
    ) -> Option<PermissionScope> {
        self.authorization.highest_scope(actor, resource, action)
    }

    /// Returns every employee the actor may act on.
    #[must_use]
    pub fn accessible_employees(
        &self,
        actor: EmployeeId,
        resource: &str,
        action: PermissionAction,
    ) -> Vec<EmployeeId> {
        self.authorization
            .accessible_employees(actor, resource, action)
    }

    /// Replaces the employee's matrix.
    pub async fn set_matrix(
        &self,
        employee_id: EmployeeId,
        entries: Vec<ResourceMatrixEntry>,
    ) -> AppResult<Vec<ResourceMatrixEntry>> {
        self.require_employee(employee_id)?;
        let stored = self
            .matrices
            .replace_matrix(employee_id, entries, || {
                self.require_employee(employee_id).map(|_| ())
            })
            .await?;
        Ok(stored.into_values().collect())
    }

    /// Returns the stored matrix rows.
    pub fn matrix(&self, employee_id: EmployeeId) -> AppResult<Vec<ResourceMatrixEntry>> {
        self.require_employee(employee_id)?;
        Ok(self.matrices.get_matrix(employee_id).into_values().collect())
    }

    /// Projects effective permissions into matrix rows for every catalog resource.
    pub fn matrix_view(&self, employee_id: EmployeeId) -> AppResult<Vec<ResourceMatrixEntry>> {
        self.require_employee(employee_id)?;
        let permissions = self.permissions.effective_permissions(employee_id);

        Ok(self
            .catalog
            .resources()
            .map(|resource| ResourceMatrixEntry::project(resource, &permissions))
            .collect())
    }

    /// Returns assigned groups and effective codes of an employee.
    pub fn permission_overview(&self, employee_id: EmployeeId) -> AppResult<PermissionOverview> {
        self.require_employee(employee_id)?;

        Ok(PermissionOverview {
            employee_id,
            groups: self.employee_groups(employee_id)?,
            effective_permissions: self.effective_permissions(employee_id),
        })
    }
}
