use std::collections::BTreeSet;
use std::sync::Arc;

use scopegate_application::{AccessEngine, AccessStateRepository};
use scopegate_core::{DepartmentId, EmployeeId, OrganizationId};
use scopegate_domain::{Employee, PermissionAction, PermissionCatalog, ResourceMatrixEntry};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresAccessStateRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres access state tests: {error}");
    }

    Some(pool)
}

fn employee(organization_id: OrganizationId, email: &str, manager: Option<EmployeeId>) -> Employee {
    Employee::new(EmployeeId::new(), organization_id, email)
        .unwrap_or_else(|_| unreachable!())
        .with_manager(manager)
}

#[tokio::test]
async fn engine_state_survives_restart() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = Arc::new(PostgresAccessStateRepository::new(pool.clone()));
    let engine = AccessEngine::new(PermissionCatalog::system_default(), repository.clone());
    let organization_id = OrganizationId::new();
    assert!(engine.provision_organization(organization_id).await.is_ok());

    let manager = employee(organization_id, "manager@acme.io", None)
        .with_department(Some(DepartmentId::new()));
    let report = employee(organization_id, "report@acme.io", Some(manager.id()));
    let (manager_id, report_id) = (manager.id(), report.id());
    assert!(engine.upsert_employee(manager).await.is_ok());
    assert!(engine.upsert_employee(report).await.is_ok());

    let group = engine
        .create_group(organization_id, "Approvers", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        engine
            .set_group_permissions(group.id(), &["leaves:approve:team"])
            .await
            .is_ok()
    );
    assert!(engine.set_employee_groups(manager_id, [group.id()]).await.is_ok());
    assert!(
        engine
            .set_matrix(
                report_id,
                vec![ResourceMatrixEntry {
                    edit_own: true,
                    ..ResourceMatrixEntry::new("employees")
                }],
            )
            .await
            .is_ok()
    );

    let restored = AccessEngine::new(PermissionCatalog::system_default(), repository.clone());
    assert!(restored.hydrate().await.is_ok());

    assert!(restored.can_act(manager_id, "leaves", PermissionAction::Approve, report_id));
    assert_eq!(
        restored.effective_permissions(report_id),
        engine.effective_permissions(report_id)
    );
    assert_eq!(restored.list_groups(organization_id).len(), 4);
    assert_eq!(
        restored.get_manager(report_id).unwrap_or_else(|_| unreachable!()),
        Some(manager_id)
    );
}

#[tokio::test]
async fn deleting_employee_cascades_grants() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAccessStateRepository::new(pool.clone());
    let organization_id = OrganizationId::new();
    assert!(repository.save_organization(organization_id).await.is_ok());
    let record = employee(organization_id, "leaver@acme.io", None);
    assert!(repository.save_employee(&record).await.is_ok());
    assert!(
        repository
            .replace_resource_matrix(
                record.id(),
                &[ResourceMatrixEntry {
                    view_own: true,
                    ..ResourceMatrixEntry::new("payroll")
                }],
            )
            .await
            .is_ok()
    );
    assert!(
        repository
            .replace_employee_groups(record.id(), &BTreeSet::new())
            .await
            .is_ok()
    );

    assert!(repository.delete_employee(record.id()).await.is_ok());

    let snapshot = repository
        .load_snapshot()
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(snapshot.employees.iter().all(|employee| employee.id() != record.id()));
    assert!(snapshot.matrices.iter().all(|(owner, _)| *owner != record.id()));
    assert!(repository.delete_employee(record.id()).await.is_err());
}
