use async_trait::async_trait;
use chrono::Utc;
use scopegate_application::{AuditEvent, AuditRepository};
use scopegate_core::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;

/// PostgreSQL-backed append-only audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let action = event.action.as_str();
        debug!(organization_id = %event.organization_id, action, "appending audit event");

        sqlx::query(
            r#"
            INSERT INTO audit_events (
                organization_id,
                subject,
                action,
                resource_type,
                resource_id,
                detail,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.organization_id.as_uuid())
        .bind(event.subject)
        .bind(action)
        .bind(event.resource_type)
        .bind(event.resource_id)
        .bind(event.detail)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to append audit event '{action}': {error}"))
        })?;

        Ok(())
    }
}
