//! Guarded administration surface over the access engine.

use std::collections::BTreeSet;
use std::sync::Arc;

use scopegate_core::{ActorIdentity, AppError, AppResult, EmployeeId, GroupId, OrganizationId};
use scopegate_domain::{
    AuditAction, Employee, PermissionAction, PermissionCode, PermissionGroup, PermissionScope,
    ResourceMatrixEntry,
};
use tracing::{info, warn};

use crate::{AccessEngine, AuditEvent, AuditRepository, OrgChart, PermissionOverview};

mod employees;
mod groups;
mod permissions;

#[cfg(test)]
mod tests;

const SYSTEM_SUBJECT: &str = "system";

/// Applies privilege-escalation guards and audits every admin mutation.
#[derive(Clone)]
pub struct AccessAdminService {
    engine: AccessEngine,
    audit_repository: Arc<dyn AuditRepository>,
}

impl AccessAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(engine: AccessEngine, audit_repository: Arc<dyn AuditRepository>) -> Self {
        Self {
            engine,
            audit_repository,
        }
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &AccessEngine {
        &self.engine
    }

    /// Provisions an organization on behalf of the platform itself.
    pub async fn provision_organization(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<PermissionGroup>> {
        let created = self.engine.provision_organization(organization_id).await?;
        if !created.is_empty() {
            self.audit_repository
                .append_event(AuditEvent {
                    organization_id,
                    subject: SYSTEM_SUBJECT.to_owned(),
                    action: AuditAction::OrganizationProvisioned,
                    resource_type: "organization".to_owned(),
                    resource_id: organization_id.to_string(),
                    detail: Some(format!("created {} system groups", created.len())),
                })
                .await?;
        }

        Ok(created)
    }

    fn require_code(&self, actor: &ActorIdentity, resource: &str, action: PermissionAction) -> AppResult<()> {
        let code = PermissionCode::new(resource, action, PermissionScope::Organization)?;
        if self
            .engine
            .authorization()
            .has_permission(actor.employee_id(), &code)
        {
            return Ok(());
        }

        warn!(actor = %actor.employee_id(), required = %code, "admin action denied");
        Err(AppError::Forbidden(format!(
            "employee '{}' is missing permission '{code}'",
            actor.employee_id()
        )))
    }

    fn require_can_act(
        &self,
        actor: &ActorIdentity,
        resource: &str,
        action: PermissionAction,
        target: EmployeeId,
    ) -> AppResult<()> {
        let decision = self
            .engine
            .authorization()
            .require(actor.employee_id(), resource, action, target);
        if decision.is_err() {
            warn!(
                actor = %actor.employee_id(),
                target = %target,
                resource,
                action = action.as_str(),
                "admin action denied"
            );
        }
        decision
    }

    fn require_other_employee(&self, actor: &ActorIdentity, target: EmployeeId) -> AppResult<()> {
        if actor.employee_id() != target {
            return Ok(());
        }

        warn!(actor = %actor.employee_id(), "self-grant denied");
        Err(AppError::Forbidden(
            "employees may not change their own permissions".to_owned(),
        ))
    }

    fn require_non_member(&self, actor: &ActorIdentity, group_id: GroupId) -> AppResult<()> {
        if !self.engine.group_members(group_id)?.contains(&actor.employee_id()) {
            return Ok(());
        }

        warn!(actor = %actor.employee_id(), group_id = %group_id, "self-grant denied");
        Err(AppError::Forbidden(
            "employees may not change groups they belong to".to_owned(),
        ))
    }

    /// Fails unless the actor holds every granted code, directly or at organization scope.
    fn require_held_codes<'a>(
        &self,
        actor: &ActorIdentity,
        granted: impl IntoIterator<Item = &'a PermissionCode>,
    ) -> AppResult<()> {
        let authorization = self.engine.authorization();
        let holds = |code: &PermissionCode| {
            authorization.has_permission(actor.employee_id(), code)
                || authorization.has_permission(
                    actor.employee_id(),
                    &code.with_scope(PermissionScope::Organization),
                )
        };

        let missing: Vec<String> = granted
            .into_iter()
            .filter(|code| !holds(*code))
            .map(ToString::to_string)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        warn!(actor = %actor.employee_id(), missing = ?missing, "grant beyond held permissions denied");
        Err(AppError::Forbidden(format!(
            "employee '{}' cannot grant permissions it does not hold: {}",
            actor.employee_id(),
            missing.join(", ")
        )))
    }

    fn matrix_codes(&self, entries: &[ResourceMatrixEntry]) -> AppResult<BTreeSet<PermissionCode>> {
        let catalog = self.engine.catalog();
        let mut codes = BTreeSet::new();
        for entry in entries {
            let entry = entry.clone().normalized();
            entry.validate(catalog)?;
            codes.extend(entry.synthesized_codes(catalog)?);
        }

        Ok(codes)
    }

    fn require_colleague(&self, actor: &ActorIdentity, target: EmployeeId) -> AppResult<Employee> {
        let employee = self.engine.employee(target)?;
        if employee.organization_id() == actor.organization_id() {
            return Ok(employee);
        }

        warn!(actor = %actor.employee_id(), target = %target, "cross-organization access denied");
        Err(AppError::Forbidden(format!(
            "employee '{target}' is outside the actor's organization"
        )))
    }

    fn require_organization_group(
        &self,
        actor: &ActorIdentity,
        group_id: GroupId,
    ) -> AppResult<PermissionGroup> {
        let group = self.engine.get_group(group_id)?;
        if group.organization_id() != actor.organization_id() {
            return Err(AppError::GroupNotFound(format!(
                "group '{group_id}' does not exist"
            )));
        }

        Ok(group)
    }

    async fn audit(
        &self,
        actor: &ActorIdentity,
        action: AuditAction,
        resource_type: &str,
        resource_id: String,
        detail: Option<String>,
    ) -> AppResult<()> {
        info!(
            actor = %actor.employee_id(),
            organization_id = %actor.organization_id(),
            action = action.as_str(),
            resource_id = %resource_id,
            "admin mutation applied"
        );

        self.audit_repository
            .append_event(AuditEvent {
                organization_id: actor.organization_id(),
                subject: actor.subject(),
                action,
                resource_type: resource_type.to_owned(),
                resource_id,
                detail,
            })
            .await
    }
}
