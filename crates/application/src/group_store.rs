//! Permission groups and employee memberships.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use scopegate_core::{AppError, AppResult, EmployeeId, GroupId, OrganizationId};
use scopegate_domain::{PermissionCatalog, PermissionCode, PermissionGroup, group_name_key};
use tokio::sync::RwLock;
use tracing::info;

use crate::AccessStateRepository;
use crate::concurrency::{KeyedLocks, VersionClock};


/// Membership sets before and after a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipChange {
    /// Groups held before the write.
    pub previous: BTreeSet<GroupId>,
    /// Groups held after the write.
    pub current: BTreeSet<GroupId>,
}

impl MembershipChange {
    /// Returns groups gained by the write.
    pub fn added(&self) -> impl Iterator<Item = &GroupId> {
        self.current.difference(&self.previous)
    }

    /// Returns groups lost by the write.
    pub fn removed(&self) -> impl Iterator<Item = &GroupId> {
        self.previous.difference(&self.current)
    }
}

/// A deleted group and the employees that lost it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedGroup {
    /// Group as it was before deletion.
    pub group: PermissionGroup,
    /// Former members.
    pub former_members: BTreeSet<EmployeeId>,
}

/// Stores group definitions and memberships with per-employee membership versions.
///
/// Definition writes (create, rename, permission replacement, delete) take the
/// definitions gate exclusively; membership replacements share it and are
/// serialized per employee.
pub struct GroupStore {
    catalog: Arc<PermissionCatalog>,
    repository: Arc<dyn AccessStateRepository>,
    clock: Arc<VersionClock>,
    groups: DashMap<GroupId, PermissionGroup>,
    memberships: DashMap<EmployeeId, BTreeSet<GroupId>>,
    members: DashMap<GroupId, BTreeSet<EmployeeId>>,
    versions: DashMap<EmployeeId, u64>,
    definitions: RwLock<()>,
    employee_writers: KeyedLocks<EmployeeId>,
}

impl GroupStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(
        catalog: Arc<PermissionCatalog>,
        repository: Arc<dyn AccessStateRepository>,
        clock: Arc<VersionClock>,
    ) -> Self {
        Self {
            catalog,
            repository,
            clock,
            groups: DashMap::new(),
            memberships: DashMap::new(),
            members: DashMap::new(),
            versions: DashMap::new(),
            definitions: RwLock::new(()),
            employee_writers: KeyedLocks::default(),
        }
    }

    /// Creates an empty custom group.
    pub async fn create_group(
        &self,
        organization_id: OrganizationId,
        name: &str,
        description: &str,
    ) -> AppResult<PermissionGroup> {
        let group = PermissionGroup::new(GroupId::new(), organization_id, name, description)?;
        self.insert_group(group).await
    }

    /// Inserts a fully built group after validating its codes and name.
    pub async fn insert_group(&self, group: PermissionGroup) -> AppResult<PermissionGroup> {
        for code in group.permissions() {
            self.catalog.validate(code)?;
        }

        let _definitions = self.definitions.write().await;
        if self.groups.contains_key(&group.id()) {
            return Err(AppError::Conflict(format!(
                "group '{}' already exists",
                group.id()
            )));
        }
        self.ensure_unique_name(group.organization_id(), group.name(), None)?;

        self.repository.save_group(&group).await?;
        self.groups.insert(group.id(), group.clone());

        info!(
            organization_id = %group.organization_id(),
            group_id = %group.id(),
            name = group.name(),
            "permission group created"
        );
        Ok(group)
    }

    /// Renames a group and replaces its description.
    pub async fn update_group_details(
        &self,
        group_id: GroupId,
        name: &str,
        description: &str,
    ) -> AppResult<PermissionGroup> {
        let _definitions = self.definitions.write().await;
        let mut group = self.require_group(group_id)?;
        group.rename(name, description)?;
        self.ensure_unique_name(group.organization_id(), group.name(), Some(group_id))?;

        self.repository.save_group(&group).await?;
        self.groups.insert(group_id, group.clone());

        info!(group_id = %group_id, name = group.name(), "permission group renamed");
        Ok(group)
    }

    /// Replaces the permission set of a group.
    pub async fn set_group_permissions(
        &self,
        group_id: GroupId,
        permissions: BTreeSet<PermissionCode>,
    ) -> AppResult<PermissionGroup> {
        for code in &permissions {
            self.catalog.validate(code)?;
        }

        let _definitions = self.definitions.write().await;
        let mut group = self.require_group(group_id)?;
        group.replace_permissions(permissions);

        self.repository.save_group(&group).await?;
        self.groups.insert(group_id, group.clone());

        let members = self.members_of(group_id);
        for employee_id in &members {
            self.bump(*employee_id);
        }

        info!(
            group_id = %group_id,
            permissions = group.permissions().len(),
            affected_members = members.len(),
            "permission group permissions replaced"
        );
        Ok(group)
    }

    /// Deletes a group and removes it from every member.
    pub async fn delete_group(&self, group_id: GroupId) -> AppResult<DeletedGroup> {
        let _definitions = self.definitions.write().await;
        let group = self.require_group(group_id)?;

        self.repository.delete_group(group_id).await?;
        self.groups.remove(&group_id);
        let former_members = self
            .members
            .remove(&group_id)
            .map(|(_, members)| members)
            .unwrap_or_default();
        for employee_id in &former_members {
            if let Some(mut groups) = self.memberships.get_mut(employee_id) {
                groups.remove(&group_id);
            }
            self.bump(*employee_id);
        }

        info!(
            group_id = %group_id,
            affected_members = former_members.len(),
            "permission group deleted"
        );
        Ok(DeletedGroup {
            group,
            former_members,
        })
    }

    /// Replaces the employee's memberships with exactly `group_ids`.
    ///
    /// Every group must exist in `organization_id`.
    pub async fn set_employee_groups(
        &self,
        organization_id: OrganizationId,
        employee_id: EmployeeId,
        group_ids: BTreeSet<GroupId>,
    ) -> AppResult<MembershipChange> {
        self.replace_memberships(employee_id, group_ids, || Ok(organization_id))
            .await
    }

    /// Replaces memberships, resolving the employee's organization under its writer lock.
    ///
    /// An error from `organization_of` aborts the write, so a removed employee
    /// never regains memberships.
    pub async fn replace_memberships<F>(
        &self,
        employee_id: EmployeeId,
        group_ids: BTreeSet<GroupId>,
        organization_of: F,
    ) -> AppResult<MembershipChange>
    where
        F: FnOnce() -> AppResult<OrganizationId>,
    {
        let _definitions = self.definitions.read().await;
        let _employee_writer = self.employee_writers.lock(employee_id).await;
        let organization_id = organization_of()?;

        for group_id in &group_ids {
            let belongs = self
                .groups
                .get(group_id)
                .is_some_and(|group| group.organization_id() == organization_id);
            if !belongs {
                return Err(AppError::GroupNotFound(format!(
                    "group '{group_id}' does not exist"
                )));
            }
        }

        let previous = self.employee_groups(employee_id);
        self.repository
            .replace_employee_groups(employee_id, &group_ids)
            .await?;

        self.memberships.insert(employee_id, group_ids.clone());
        for removed in previous.difference(&group_ids) {
            if let Some(mut members) = self.members.get_mut(removed) {
                members.remove(&employee_id);
            }
        }
        for added in group_ids.difference(&previous) {
            self.members.entry(*added).or_default().insert(employee_id);
        }
        self.bump(employee_id);

        info!(
            employee_id = %employee_id,
            groups = group_ids.len(),
            "employee memberships replaced"
        );
        Ok(MembershipChange {
            previous,
            current: group_ids,
        })
    }

    /// Returns one group.
    #[must_use]
    pub fn get_group(&self, group_id: GroupId) -> Option<PermissionGroup> {
        self.groups.get(&group_id).map(|group| group.clone())
    }

    /// Returns the codes of a group.
    pub fn group_permissions(&self, group_id: GroupId) -> AppResult<BTreeSet<PermissionCode>> {
        Ok(self.require_group(group_id)?.permissions().clone())
    }

    /// Returns the members of a group.
    pub fn group_members(&self, group_id: GroupId) -> AppResult<BTreeSet<EmployeeId>> {
        self.require_group(group_id)?;
        Ok(self.members_of(group_id))
    }

    /// Returns an organization's groups ordered by name.
    #[must_use]
    pub fn list_groups(&self, organization_id: OrganizationId) -> Vec<PermissionGroup> {
        let mut groups: Vec<PermissionGroup> = self
            .groups
            .iter()
            .filter(|group| group.organization_id() == organization_id)
            .map(|group| group.clone())
            .collect();
        groups.sort_by_key(PermissionGroup::name_key);
        groups
    }

    /// Finds a group by case-insensitive name.
    #[must_use]
    pub fn find_by_name(&self, organization_id: OrganizationId, name: &str) -> Option<PermissionGroup> {
        let key = group_name_key(name);
        self.groups
            .iter()
            .find(|group| group.organization_id() == organization_id && group.name_key() == key)
            .map(|group| group.clone())
    }

    /// Returns the employee's groups; unknown employees have none.
    #[must_use]
    pub fn employee_groups(&self, employee_id: EmployeeId) -> BTreeSet<GroupId> {
        self.memberships
            .get(&employee_id)
            .map(|groups| groups.clone())
            .unwrap_or_default()
    }

    /// Returns the membership version of an employee.
    #[must_use]
    pub fn version(&self, employee_id: EmployeeId) -> u64 {
        self.versions
            .get(&employee_id)
            .map(|version| *version)
            .unwrap_or_default()
    }

    /// Returns the version followed by the union of the employee's group codes.
    ///
    /// The version is read first so a concurrent write can only make the
    /// codes newer than the version, never older.
    #[must_use]
    pub fn codes_for(&self, employee_id: EmployeeId) -> (u64, BTreeSet<PermissionCode>) {
        let version = self.version(employee_id);
        let mut codes = BTreeSet::new();
        for group_id in self.employee_groups(employee_id) {
            if let Some(group) = self.groups.get(&group_id) {
                codes.extend(group.permissions().iter().cloned());
            }
        }
        (version, codes)
    }

    /// Drops memberships, version and writer lock of a removed employee.
    pub(crate) async fn forget_employee(&self, employee_id: EmployeeId) {
        let definitions = self.definitions.read().await;
        let employee_writer = self.employee_writers.lock(employee_id).await;
        if let Some((_, groups)) = self.memberships.remove(&employee_id) {
            for group_id in groups {
                if let Some(mut members) = self.members.get_mut(&group_id) {
                    members.remove(&employee_id);
                }
            }
        }
        self.versions.remove(&employee_id);

        drop(employee_writer);
        drop(definitions);
        self.employee_writers.forget(&employee_id);
    }

    /// Replaces all in-memory state with persisted records.
    pub(crate) fn hydrate(
        &self,
        groups: Vec<PermissionGroup>,
        memberships: Vec<(EmployeeId, GroupId)>,
    ) -> AppResult<()> {
        self.groups.clear();
        self.memberships.clear();
        self.members.clear();
        self.versions.clear();

        for group in groups {
            for code in group.permissions() {
                self.catalog.validate(code)?;
            }
            self.ensure_unique_name(group.organization_id(), group.name(), None)?;
            self.groups.insert(group.id(), group);
        }

        for (employee_id, group_id) in memberships {
            if !self.groups.contains_key(&group_id) {
                return Err(AppError::GroupNotFound(format!(
                    "membership of '{employee_id}' references unknown group '{group_id}'"
                )));
            }
            self.memberships
                .entry(employee_id)
                .or_default()
                .insert(group_id);
            self.members.entry(group_id).or_default().insert(employee_id);
        }

        for entry in self.memberships.iter() {
            self.versions.insert(*entry.key(), self.clock.next());
        }

        Ok(())
    }

    fn require_group(&self, group_id: GroupId) -> AppResult<PermissionGroup> {
        self.get_group(group_id)
            .ok_or_else(|| AppError::GroupNotFound(format!("group '{group_id}' does not exist")))
    }

    fn members_of(&self, group_id: GroupId) -> BTreeSet<EmployeeId> {
        self.members
            .get(&group_id)
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    fn ensure_unique_name(
        &self,
        organization_id: OrganizationId,
        name: &str,
        except: Option<GroupId>,
    ) -> AppResult<()> {
        let key = group_name_key(name);
        let taken = self.groups.iter().any(|group| {
            group.organization_id() == organization_id
                && Some(group.id()) != except
                && group.name_key() == key
        });

        if taken {
            return Err(AppError::DuplicateName(format!(
                "a group named '{name}' already exists in organization '{organization_id}'"
            )));
        }

        Ok(())
    }

    fn bump(&self, employee_id: EmployeeId) {
        self.versions.insert(employee_id, self.clock.next());
    }
}
