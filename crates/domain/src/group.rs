//! Named permission groups.

mod system_templates;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use scopegate_core::{AppResult, GroupId, NonEmptyString, OrganizationId};
use serde::{Deserialize, Serialize};

use crate::PermissionCode;

pub use system_templates::SystemGroupTemplate;

/// Named, organization-scoped set of permission codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    id: GroupId,
    organization_id: OrganizationId,
    name: NonEmptyString,
    description: String,
    permissions: BTreeSet<PermissionCode>,
    is_system: bool,
    created_at: DateTime<Utc>,
}

impl PermissionGroup {
    /// Creates an empty custom group.
    pub fn new(
        id: GroupId,
        organization_id: OrganizationId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            organization_id,
            name: NonEmptyString::new(name)?,
            description: description.into().trim().to_owned(),
            permissions: BTreeSet::new(),
            is_system: false,
            created_at: Utc::now(),
        })
    }

    /// Returns the group with the given permission set.
    #[must_use]
    pub fn with_permissions(mut self, permissions: BTreeSet<PermissionCode>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Returns the group flagged as provisioned by the system.
    #[must_use]
    pub fn with_system_flag(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    /// Returns the group with a stored creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the group identifier.
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the key used for per-organization name uniqueness.
    #[must_use]
    pub fn name_key(&self) -> String {
        group_name_key(self.name.as_str())
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the granted codes.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<PermissionCode> {
        &self.permissions
    }

    /// Returns whether the group was provisioned by the system.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns when the group was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces name and description.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<()> {
        self.name = NonEmptyString::new(name)?;
        self.description = description.into().trim().to_owned();
        Ok(())
    }

    /// Replaces the whole permission set.
    pub fn replace_permissions(&mut self, permissions: BTreeSet<PermissionCode>) {
        self.permissions = permissions;
    }
}

/// Normalizes a group name for case-insensitive uniqueness checks.
#[must_use]
pub fn group_name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use scopegate_core::{GroupId, OrganizationId};

    use super::{PermissionGroup, group_name_key};

    #[test]
    fn blank_names_are_rejected() {
        let group = PermissionGroup::new(GroupId::new(), OrganizationId::new(), "  ", "");
        assert!(group.is_err());
    }

    #[test]
    fn name_key_ignores_case_and_padding() {
        let group = PermissionGroup::new(GroupId::new(), OrganizationId::new(), " Payroll Admins ", "x")
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(group.name(), "Payroll Admins");
        assert_eq!(group.name_key(), group_name_key("PAYROLL admins"));
    }

    #[test]
    fn rename_replaces_name_and_description() {
        let mut group = PermissionGroup::new(GroupId::new(), OrganizationId::new(), "Old", "first")
            .unwrap_or_else(|_| unreachable!());
        assert!(group.rename("New", " second ").is_ok());
        assert_eq!(group.name(), "New");
        assert_eq!(group.description(), "second");
        assert!(group.rename("", "third").is_err());
        assert_eq!(group.name(), "New");
    }
}
