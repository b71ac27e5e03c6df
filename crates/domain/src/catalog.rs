//! The permission catalog: every code the engine recognizes.

mod system_defaults;

use std::collections::BTreeMap;

use scopegate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{PermissionAction, PermissionCode, PermissionScope};

/// A declared permission code with its human description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    code: PermissionCode,
    description: String,
}

impl CatalogEntry {
    /// Returns the declared code.
    #[must_use]
    pub fn code(&self) -> &PermissionCode {
        &self.code
    }

    /// Returns the description shown to administrators.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Append-only registry of recognized resources and their declared action/scope pairs.
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    resources: BTreeMap<String, BTreeMap<(PermissionAction, PermissionScope), CatalogEntry>>,
}

impl PermissionCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the catalog shipped with the engine.
    #[must_use]
    pub fn system_default() -> Self {
        let mut catalog = Self::new();
        for (resource, action, scope, description) in system_defaults::SYSTEM_PERMISSIONS {
            if let Ok(code) = PermissionCode::new(*resource, *action, *scope) {
                catalog.register(code, *description);
            }
        }

        catalog
    }

    /// Declares a code. Returns `false` when the code was already declared.
    pub fn register(&mut self, code: PermissionCode, description: impl Into<String>) -> bool {
        let declared = self.resources.entry(code.resource().to_owned()).or_default();
        let key = (code.action(), code.scope());
        if declared.contains_key(&key) {
            return false;
        }

        declared.insert(
            key,
            CatalogEntry {
                code,
                description: description.into(),
            },
        );
        true
    }

    /// Returns whether the resource has at least one declared code.
    #[must_use]
    pub fn is_registered_resource(&self, resource: &str) -> bool {
        self.resources.contains_key(resource)
    }

    /// Returns whether the code is declared.
    #[must_use]
    pub fn contains(&self, code: &PermissionCode) -> bool {
        self.resources
            .get(code.resource())
            .is_some_and(|declared| declared.contains_key(&(code.action(), code.scope())))
    }

    /// Fails with `UnknownPermissionCode` unless the code is declared.
    pub fn validate(&self, code: &PermissionCode) -> AppResult<()> {
        let Some(declared) = self.resources.get(code.resource()) else {
            return Err(AppError::UnknownPermissionCode(format!(
                "resource '{}' is not registered",
                code.resource()
            )));
        };

        if !declared.contains_key(&(code.action(), code.scope())) {
            return Err(AppError::UnknownPermissionCode(format!(
                "'{code}' is not declared for resource '{}'",
                code.resource()
            )));
        }

        Ok(())
    }

    /// Parses and validates a code in one step.
    pub fn parse(&self, value: &str) -> AppResult<PermissionCode> {
        let code = value.parse::<PermissionCode>()?;
        self.validate(&code)?;
        Ok(code)
    }

    /// Returns every declared entry ordered by resource, action and scope.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.resources.values().flat_map(|declared| declared.values())
    }

    /// Returns every declared code with the given scope.
    pub fn codes_with_scope(&self, scope: PermissionScope) -> impl Iterator<Item = &PermissionCode> {
        self.entries()
            .map(CatalogEntry::code)
            .filter(move |code| code.scope() == scope)
    }

    /// Returns the registered resource names in order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Returns the number of declared codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.values().map(BTreeMap::len).sum()
    }

    /// Returns whether nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use scopegate_core::AppError;

    use super::PermissionCatalog;
    use crate::{PermissionAction, PermissionCode, PermissionScope};

    fn code(value: &str) -> PermissionCode {
        value.parse().unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn register_is_append_only_and_idempotent() {
        let mut catalog = PermissionCatalog::new();
        assert!(catalog.register(code("employees:view:own"), "View own profile"));
        assert!(!catalog.register(code("employees:view:own"), "Something else"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.entries().next().map(|entry| entry.description()),
            Some("View own profile")
        );
    }

    #[test]
    fn validate_distinguishes_unknown_resource_and_undeclared_pair() {
        let mut catalog = PermissionCatalog::new();
        catalog.register(code("employees:view:own"), "View own profile");

        assert!(catalog.validate(&code("employees:view:own")).is_ok());
        assert!(matches!(
            catalog.validate(&code("employees:edit:own")),
            Err(AppError::UnknownPermissionCode(message)) if message.contains("not declared")
        ));
        assert!(matches!(
            catalog.validate(&code("payroll:view:own")),
            Err(AppError::UnknownPermissionCode(message)) if message.contains("not registered")
        ));
    }

    #[test]
    fn system_default_declares_admin_codes() {
        let catalog = PermissionCatalog::system_default();
        for value in [
            "permission-groups:assign:organization",
            "permission-groups:create:organization",
            "permission-groups:edit:organization",
            "permission-groups:delete:organization",
            "permissions:grant:organization",
            "permissions:view:organization",
            "employees:edit:team",
            "users:reset-password:organization",
        ] {
            assert!(catalog.contains(&code(value)), "missing {value}");
        }
        assert!(catalog.is_registered_resource("leaves"));
        assert!(!catalog.is_registered_resource("spaceships"));
    }

    #[test]
    fn codes_with_scope_filters_by_scope() {
        let catalog = PermissionCatalog::system_default();
        let organization_codes: Vec<_> = catalog
            .codes_with_scope(PermissionScope::Organization)
            .collect();

        assert!(!organization_codes.is_empty());
        assert!(
            organization_codes
                .iter()
                .all(|code| code.scope() == PermissionScope::Organization)
        );
        assert!(organization_codes.iter().any(|code| {
            code.resource() == "payroll" && code.action() == PermissionAction::Run
        }));
    }

    #[test]
    fn parse_rejects_undeclared_code() {
        let catalog = PermissionCatalog::system_default();
        assert!(catalog.parse("payroll:run:organization").is_ok());
        assert!(matches!(
            catalog.parse("payroll:run:own"),
            Err(AppError::UnknownPermissionCode(_))
        ));
    }
}
