use std::sync::Arc;

use scopegate_application::{AccessAdminService, AccessEngine, AccessStateRepository, AuditRepository};
use scopegate_core::AppError;
use scopegate_domain::PermissionCatalog;
use scopegate_infrastructure::{
    InMemoryAccessStateRepository, InMemoryAuditRepository, PostgresAccessStateRepository,
    PostgresAuditRepository,
};
use sqlx::PgPool;
use tracing::info;

use crate::state::AppState;

/// Wires the engine over Postgres when a pool is given, otherwise in memory.
pub async fn build_app_state(pool: Option<PgPool>) -> Result<AppState, AppError> {
    let (state_repository, audit_repository): (
        Arc<dyn AccessStateRepository>,
        Arc<dyn AuditRepository>,
    ) = match pool {
        Some(pool) => (
            Arc::new(PostgresAccessStateRepository::new(pool.clone())),
            Arc::new(PostgresAuditRepository::new(pool)),
        ),
        None => {
            info!("DATABASE_URL not set, access state is kept in memory");
            (
                Arc::new(InMemoryAccessStateRepository::new()),
                Arc::new(InMemoryAuditRepository::new()),
            )
        }
    };

    let engine = AccessEngine::new(PermissionCatalog::system_default(), state_repository);
    engine.hydrate().await?;

    Ok(AppState {
        access_admin_service: AccessAdminService::new(engine, audit_repository),
    })
}
