use super::*;

const GROUP_RESOURCE: &str = "permission-groups";
const GROUP_AUDIT_TYPE: &str = "permission_group";

impl AccessAdminService {
    /// Lists groups of the actor's organization.
    pub fn list_groups(&self, actor: &ActorIdentity) -> AppResult<Vec<PermissionGroup>> {
        self.require_code(actor, GROUP_RESOURCE, PermissionAction::View)?;
        Ok(self.engine.list_groups(actor.organization_id()))
    }

    /// Returns one group of the actor's organization.
    pub fn get_group(&self, actor: &ActorIdentity, group_id: GroupId) -> AppResult<PermissionGroup> {
        self.require_code(actor, GROUP_RESOURCE, PermissionAction::View)?;
        self.require_organization_group(actor, group_id)
    }

    /// Returns the members of one group.
    pub fn group_members(&self, actor: &ActorIdentity, group_id: GroupId) -> AppResult<Vec<EmployeeId>> {
        self.require_code(actor, GROUP_RESOURCE, PermissionAction::View)?;
        self.require_organization_group(actor, group_id)?;
        self.engine.group_members(group_id)
    }

    /// Creates a custom group.
    pub async fn create_group(
        &self,
        actor: &ActorIdentity,
        name: &str,
        description: &str,
    ) -> AppResult<PermissionGroup> {
        self.require_code(actor, GROUP_RESOURCE, PermissionAction::Create)?;

        let group = self
            .engine
            .create_group(actor.organization_id(), name, description)
            .await?;

        self.audit(
            actor,
            AuditAction::PermissionGroupCreated,
            GROUP_AUDIT_TYPE,
            group.id().to_string(),
            Some(format!("created group '{}'", group.name())),
        )
        .await?;

        Ok(group)
    }

    /// Renames a custom group.
    pub async fn update_group_details(
        &self,
        actor: &ActorIdentity,
        group_id: GroupId,
        name: &str,
        description: &str,
    ) -> AppResult<PermissionGroup> {
        self.require_code(actor, GROUP_RESOURCE, PermissionAction::Edit)?;
        let current = self.require_organization_group(actor, group_id)?;
        if current.is_system() {
            return Err(AppError::Conflict(format!(
                "system group '{}' cannot be renamed",
                current.name()
            )));
        }
        self.require_non_member(actor, group_id)?;

        let group = self
            .engine
            .update_group_details(group_id, name, description)
            .await?;

        self.audit(
            actor,
            AuditAction::PermissionGroupUpdated,
            GROUP_AUDIT_TYPE,
            group_id.to_string(),
            Some(format!(
                "renamed group '{}' to '{}'",
                current.name(),
                group.name()
            )),
        )
        .await?;

        Ok(group)
    }

    /// Replaces a group's permission codes.
    pub async fn set_group_permissions<S>(
        &self,
        actor: &ActorIdentity,
        group_id: GroupId,
        codes: &[S],
    ) -> AppResult<PermissionGroup>
    where
        S: AsRef<str>,
    {
        self.require_code(actor, GROUP_RESOURCE, PermissionAction::Edit)?;
        let current = self.require_organization_group(actor, group_id)?;
        self.require_non_member(actor, group_id)?;

        let requested = codes
            .iter()
            .map(|code| self.engine.catalog().parse(code.as_ref()))
            .collect::<AppResult<BTreeSet<_>>>()?;
        self.require_held_codes(actor, requested.difference(current.permissions()))?;

        let group = self.engine.set_group_permissions(group_id, codes).await?;

        self.audit(
            actor,
            AuditAction::PermissionGroupPermissionsReplaced,
            GROUP_AUDIT_TYPE,
            group_id.to_string(),
            Some(format!(
                "group '{}' now grants {} permissions",
                group.name(),
                group.permissions().len()
            )),
        )
        .await?;

        Ok(group)
    }

    /// Deletes a custom group.
    pub async fn delete_group(&self, actor: &ActorIdentity, group_id: GroupId) -> AppResult<()> {
        self.require_code(actor, GROUP_RESOURCE, PermissionAction::Delete)?;
        let current = self.require_organization_group(actor, group_id)?;
        if current.is_system() {
            return Err(AppError::Conflict(format!(
                "system group '{}' cannot be deleted",
                current.name()
            )));
        }

        let deleted = self.engine.delete_group(group_id).await?;

        self.audit(
            actor,
            AuditAction::PermissionGroupDeleted,
            GROUP_AUDIT_TYPE,
            group_id.to_string(),
            Some(format!(
                "deleted group '{}' with {} members",
                deleted.group.name(),
                deleted.former_members.len()
            )),
        )
        .await
    }
}
