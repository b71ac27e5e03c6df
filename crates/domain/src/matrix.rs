//! Per-employee resource matrix: six booleans per resource.

use std::collections::BTreeSet;

use scopegate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::permission::validate_resource_name;
use crate::{PermissionAction, PermissionCatalog, PermissionCode, PermissionScope};

/// Actions implied at organization scope when `edit_org` is granted.
pub const ORGANIZATION_EDIT_COMPANIONS: [PermissionAction; 2] =
    [PermissionAction::Create, PermissionAction::Delete];

/// Direct per-resource grant for one employee.
///
/// A missing entry is equivalent to all flags being false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMatrixEntry {
    /// Resource the flags apply to.
    pub resource: String,
    /// View own records.
    #[serde(default)]
    pub view_own: bool,
    /// Edit own records.
    #[serde(default)]
    pub edit_own: bool,
    /// View team records.
    #[serde(default)]
    pub view_team: bool,
    /// Edit team records.
    #[serde(default)]
    pub edit_team: bool,
    /// View organization records.
    #[serde(default)]
    pub view_org: bool,
    /// Edit organization records.
    #[serde(default)]
    pub edit_org: bool,
}

impl ResourceMatrixEntry {
    /// Creates an entry with every flag cleared.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Returns the entry with edit flags forcing the matching view flags.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.view_own |= self.edit_own;
        self.view_team |= self.edit_team;
        self.view_org |= self.edit_org;
        self
    }

    /// Returns whether no flag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.view_own
            || self.edit_own
            || self.view_team
            || self.edit_team
            || self.view_org
            || self.edit_org)
    }

    /// Returns the view/edit codes named directly by the set flags.
    pub fn primary_codes(&self) -> AppResult<Vec<PermissionCode>> {
        validate_resource_name(self.resource.as_str())?;

        let flags = [
            (self.view_own, PermissionAction::View, PermissionScope::Own),
            (self.edit_own, PermissionAction::Edit, PermissionScope::Own),
            (self.view_team, PermissionAction::View, PermissionScope::Team),
            (self.edit_team, PermissionAction::Edit, PermissionScope::Team),
            (self.view_org, PermissionAction::View, PermissionScope::Organization),
            (self.edit_org, PermissionAction::Edit, PermissionScope::Organization),
        ];

        flags
            .into_iter()
            .filter(|(granted, _, _)| *granted)
            .map(|(_, action, scope)| PermissionCode::new(self.resource.clone(), action, scope))
            .collect()
    }

    /// Checks that the resource is registered and every primary code is declared.
    pub fn validate(&self, catalog: &PermissionCatalog) -> AppResult<()> {
        let codes = self.primary_codes()?;
        if !catalog.is_registered_resource(self.resource.as_str()) {
            return Err(AppError::UnknownPermissionCode(format!(
                "resource '{}' is not registered",
                self.resource
            )));
        }

        for code in &codes {
            catalog.validate(code)?;
        }

        Ok(())
    }

    /// Returns the codes this entry contributes to the effective set.
    ///
    /// `edit_org` also contributes the create/delete organization codes the catalog declares.
    pub fn synthesized_codes(&self, catalog: &PermissionCatalog) -> AppResult<BTreeSet<PermissionCode>> {
        let mut codes: BTreeSet<PermissionCode> = self.primary_codes()?.into_iter().collect();

        if self.edit_org {
            for action in ORGANIZATION_EDIT_COMPANIONS {
                let companion =
                    PermissionCode::new(self.resource.clone(), action, PermissionScope::Organization)?;
                if catalog.contains(&companion) {
                    codes.insert(companion);
                }
            }
        }

        Ok(codes)
    }

    /// Projects an effective permission set back into matrix flags for one resource.
    #[must_use]
    pub fn project(resource: &str, permissions: &BTreeSet<PermissionCode>) -> Self {
        let holds = |action: PermissionAction, scope: PermissionScope| {
            permissions.iter().any(|code| {
                code.resource() == resource && code.action() == action && code.scope() == scope
            })
        };
        let organization_companion = ORGANIZATION_EDIT_COMPANIONS
            .iter()
            .any(|action| holds(*action, PermissionScope::Organization));

        Self {
            resource: resource.to_owned(),
            view_own: holds(PermissionAction::View, PermissionScope::Own),
            edit_own: holds(PermissionAction::Edit, PermissionScope::Own) || organization_companion,
            view_team: holds(PermissionAction::View, PermissionScope::Team),
            edit_team: holds(PermissionAction::Edit, PermissionScope::Team),
            view_org: holds(PermissionAction::View, PermissionScope::Organization),
            edit_org: holds(PermissionAction::Edit, PermissionScope::Organization)
                || organization_companion,
        }
    }
}
