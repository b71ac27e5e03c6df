use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scopegate_application::{AccessStateRepository, AccessStateSnapshot};
use scopegate_core::{AppError, AppResult, DepartmentId, EmployeeId, GroupId, OrganizationId};
use scopegate_domain::{Employee, PermissionGroup, ResourceMatrixEntry};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

mod employees;
mod groups;
mod snapshot;

#[cfg(test)]
mod tests;

/// PostgreSQL-backed durable access state.
#[derive(Clone)]
pub struct PostgresAccessStateRepository {
    pool: PgPool,
}

impl PostgresAccessStateRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|error| AppError::Internal(format!("failed to begin transaction: {error}")))
    }
}

async fn commit(transaction: Transaction<'static, Postgres>) -> AppResult<()> {
    transaction
        .commit()
        .await
        .map_err(|error| AppError::Internal(format!("failed to commit transaction: {error}")))
}

#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: Uuid,
    organization_id: Uuid,
    email: String,
    department_id: Option<Uuid>,
    reports_to_employee_id: Option<Uuid>,
}

#[derive(Debug, FromRow)]
struct GroupRow {
    id: Uuid,
    organization_id: Uuid,
    name: String,
    description: String,
    is_system: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct GroupPermissionRow {
    group_id: Uuid,
    permission_code: String,
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    employee_id: Uuid,
    group_id: Uuid,
}

#[derive(Debug, FromRow)]
struct MatrixRow {
    employee_id: Uuid,
    resource: String,
    view_own: bool,
    edit_own: bool,
    view_team: bool,
    edit_team: bool,
    view_org: bool,
    edit_org: bool,
}

#[async_trait]
impl AccessStateRepository for PostgresAccessStateRepository {
    async fn load_snapshot(&self) -> AppResult<AccessStateSnapshot> {
        self.load_snapshot_impl().await
    }

    async fn save_organization(&self, organization_id: OrganizationId) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO organizations (id)
            VALUES ($1)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(organization_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save organization '{organization_id}': {error}"
            ))
        })?;

        Ok(())
    }

    async fn save_employee(&self, employee: &Employee) -> AppResult<()> {
        self.save_employee_impl(employee).await
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<()> {
        self.delete_employee_impl(employee_id).await
    }

    async fn save_reporting_line(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<()> {
        self.save_reporting_line_impl(employee_id, manager_id).await
    }

    async fn save_group(&self, group: &PermissionGroup) -> AppResult<()> {
        self.save_group_impl(group).await
    }

    async fn delete_group(&self, group_id: GroupId) -> AppResult<()> {
        self.delete_group_impl(group_id).await
    }

    async fn replace_employee_groups(
        &self,
        employee_id: EmployeeId,
        group_ids: &BTreeSet<GroupId>,
    ) -> AppResult<()> {
        self.replace_employee_groups_impl(employee_id, group_ids).await
    }

    async fn replace_resource_matrix(
        &self,
        employee_id: EmployeeId,
        entries: &[ResourceMatrixEntry],
    ) -> AppResult<()> {
        self.replace_resource_matrix_impl(employee_id, entries).await
    }
}
