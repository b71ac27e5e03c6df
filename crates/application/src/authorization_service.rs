//! Scope-aware authorization queries.

use std::collections::BTreeSet;
use std::sync::Arc;

use scopegate_core::{AppError, AppResult, EmployeeId};
use scopegate_domain::{PermissionAction, PermissionCode, PermissionScope};
use tracing::debug;

use crate::{EffectivePermissionEngine, HierarchyStore, ScopeResolver};


/// Answers "may this actor perform this action on this target" questions.
#[derive(Clone)]
pub struct AuthorizationService {
    hierarchy: Arc<HierarchyStore>,
    resolver: ScopeResolver,
    permissions: Arc<EffectivePermissionEngine>,
}

impl AuthorizationService {
    /// Creates the service from the hierarchy and permission engine.
    #[must_use]
    pub fn new(hierarchy: Arc<HierarchyStore>, permissions: Arc<EffectivePermissionEngine>) -> Self {
        Self {
            resolver: ScopeResolver::new(Arc::clone(&hierarchy)),
            hierarchy,
            permissions,
        }
    }

    /// Returns whether `actor` holds `resource:action:s` for some scope `s` the target satisfies.
    ///
    /// Unknown employees, unknown resources and cross-organization pairs yield `false`.
    #[must_use]
    pub fn can_act(
        &self,
        actor: EmployeeId,
        resource: &str,
        action: PermissionAction,
        target: EmployeeId,
    ) -> bool {
        let relation = self.resolver.resolve(actor, target);
        if !relation.any() {
            return false;
        }

        let Ok(base) = PermissionCode::new(resource, action, PermissionScope::Own) else {
            return false;
        };
        let permissions = self.permissions.effective_permissions(actor);

        let allowed = PermissionScope::all().iter().any(|scope| {
            relation.satisfies(*scope) && permissions.contains(&base.with_scope(*scope))
        });

        debug!(
            actor = %actor,
            target = %target,
            resource,
            action = action.as_str(),
            allowed,
            "authorization decision"
        );
        allowed
    }

    /// Fails with `Forbidden` unless `can_act` holds.
    pub fn require(
        &self,
        actor: EmployeeId,
        resource: &str,
        action: PermissionAction,
        target: EmployeeId,
    ) -> AppResult<()> {
        if self.can_act(actor, resource, action, target) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "employee '{actor}' may not {} {resource} of employee '{target}'",
            action.as_str()
        )))
    }

    /// Returns whether the employee holds the exact code.
    #[must_use]
    pub fn has_permission(&self, employee_id: EmployeeId, code: &PermissionCode) -> bool {
        self.permissions.has_permission(employee_id, code)
    }

    /// Returns the widest scope at which the actor holds `resource:action`.
    #[must_use]
    pub fn highest_scope(
        &self,
        actor: EmployeeId,
        resource: &str,
        action: PermissionAction,
    ) -> Option<PermissionScope> {
        let base = PermissionCode::new(resource, action, PermissionScope::Own).ok()?;
        let permissions = self.permissions.effective_permissions(actor);

        PermissionScope::all()
            .iter()
            .rev()
            .copied()
            .find(|scope| permissions.contains(&base.with_scope(*scope)))
    }

    /// Returns every employee the actor may act on, ordered by id.
    ///
    /// Evaluated against a single hierarchy snapshot.
    #[must_use]
    pub fn accessible_employees(
        &self,
        actor: EmployeeId,
        resource: &str,
        action: PermissionAction,
    ) -> Vec<EmployeeId> {
        let Some(snapshot) = self.hierarchy.snapshot_for(actor) else {
            return Vec::new();
        };
        let Some(actor_record) = snapshot.employee(actor) else {
            return Vec::new();
        };
        let Ok(base) = PermissionCode::new(resource, action, PermissionScope::Own) else {
            return Vec::new();
        };
        let permissions = self.permissions.effective_permissions(actor);
        let holds = |scope: PermissionScope| permissions.contains(&base.with_scope(scope));

        if holds(PermissionScope::Organization) {
            let mut everyone: Vec<EmployeeId> =
                snapshot.employees().map(|employee| employee.id()).collect();
            everyone.sort();
            return everyone;
        }

        let mut accessible = BTreeSet::new();
        if holds(PermissionScope::Own) {
            accessible.insert(actor);
        }
        if holds(PermissionScope::Team) {
            accessible.extend(snapshot.index().descendants(actor).iter().copied());
        }
        if holds(PermissionScope::Department)
            && let Some(department_id) = actor_record.department_id()
        {
            accessible.extend(
                snapshot
                    .employees()
                    .filter(|employee| employee.department_id() == Some(department_id))
                    .map(|employee| employee.id()),
            );
        }

        accessible.into_iter().collect()
    }

    /// Returns the resolver used for scope classification.
    #[must_use]
    pub fn scope_resolver(&self) -> &ScopeResolver {
        &self.resolver
    }
}
