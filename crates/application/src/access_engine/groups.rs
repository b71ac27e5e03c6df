use super::*;

impl AccessEngine {
    /// Creates an empty custom group in a provisioned organization.
    pub async fn create_group(
        &self,
        organization_id: OrganizationId,
        name: &str,
        description: &str,
    ) -> AppResult<PermissionGroup> {
        self.require_organization(organization_id)?;
        self.groups
            .create_group(organization_id, name, description)
            .await
    }

    /// Renames a group.
    pub async fn update_group_details(
        &self,
        group_id: GroupId,
        name: &str,
        description: &str,
    ) -> AppResult<PermissionGroup> {
        self.groups
            .update_group_details(group_id, name, description)
            .await
    }

    /// Replaces a group's codes; every code must be declared by the catalog.
    pub async fn set_group_permissions<S>(
        &self,
        group_id: GroupId,
        codes: &[S],
    ) -> AppResult<PermissionGroup>
    where
        S: AsRef<str>,
    {
        let permissions = codes
            .iter()
            .map(|code| self.catalog.parse(code.as_ref()))
            .collect::<AppResult<BTreeSet<_>>>()?;

        self.groups.set_group_permissions(group_id, permissions).await
    }

    /// Deletes a group; former members lose its codes.
    pub async fn delete_group(&self, group_id: GroupId) -> AppResult<DeletedGroup> {
        self.groups.delete_group(group_id).await
    }

    /// Replaces the employee's memberships; duplicate ids collapse.
    pub async fn set_employee_groups(
        &self,
        employee_id: EmployeeId,
        group_ids: impl IntoIterator<Item = GroupId>,
    ) -> AppResult<MembershipChange> {
        self.require_organization_of(employee_id)?;
        self.groups
            .replace_memberships(employee_id, group_ids.into_iter().collect(), || {
                self.require_organization_of(employee_id)
            })
            .await
    }

    /// Returns an organization's groups ordered by name.
    #[must_use]
    pub fn list_groups(&self, organization_id: OrganizationId) -> Vec<PermissionGroup> {
        self.groups.list_groups(organization_id)
    }

    /// Returns one group.
    pub fn get_group(&self, group_id: GroupId) -> AppResult<PermissionGroup> {
        self.groups
            .get_group(group_id)
            .ok_or_else(|| AppError::GroupNotFound(format!("group '{group_id}' does not exist")))
    }

    /// Returns a group's codes in canonical order.
    pub fn group_permissions(&self, group_id: GroupId) -> AppResult<Vec<PermissionCode>> {
        Ok(self
            .groups
            .group_permissions(group_id)?
            .into_iter()
            .collect())
    }

    /// Returns a group's members ordered by id.
    pub fn group_members(&self, group_id: GroupId) -> AppResult<Vec<EmployeeId>> {
        Ok(self.groups.group_members(group_id)?.into_iter().collect())
    }

    /// Returns the employee's groups ordered by name.
    pub fn employee_groups(&self, employee_id: EmployeeId) -> AppResult<Vec<PermissionGroup>> {
        self.require_employee(employee_id)?;
        let mut groups: Vec<PermissionGroup> = self
            .groups
            .employee_groups(employee_id)
            .into_iter()
            .filter_map(|group_id| self.groups.get_group(group_id))
            .collect();
        groups.sort_by_key(PermissionGroup::name_key);
        Ok(groups)
    }
}
