use std::collections::BTreeSet;
use std::sync::Arc;

use scopegate_core::{EmployeeId, OrganizationId};
use scopegate_domain::{PermissionCatalog, PermissionCode, ResourceMatrixEntry};

use super::EffectivePermissionEngine;
use crate::concurrency::VersionClock;
use crate::test_support::FakeAccessStateRepository;
use crate::{GroupStore, MatrixStore};

struct Fixture {
    groups: Arc<GroupStore>,
    matrices: Arc<MatrixStore>,
    engine: EffectivePermissionEngine,
}

fn fixture() -> Fixture {
    let catalog = Arc::new(PermissionCatalog::system_default());
    let repository = Arc::new(FakeAccessStateRepository::default());
    let clock = Arc::new(VersionClock::new());
    let groups = Arc::new(GroupStore::new(
        catalog.clone(),
        repository.clone(),
        clock.clone(),
    ));
    let matrices = Arc::new(MatrixStore::new(catalog, repository, clock));
    let engine = EffectivePermissionEngine::new(groups.clone(), matrices.clone());
    Fixture {
        groups,
        matrices,
        engine,
    }
}

fn code(value: &str) -> PermissionCode {
    value.parse().unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn unknown_employee_has_empty_set() {
    let fixture = fixture();
    assert!(fixture.engine.effective_permissions(EmployeeId::new()).is_empty());
}

#[tokio::test]
async fn union_of_groups_and_matrix() {
    let fixture = fixture();
    let organization_id = OrganizationId::new();
    let employee_id = EmployeeId::new();
    let group = fixture
        .groups
        .create_group(organization_id, "Leave", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        fixture
            .groups
            .set_group_permissions(group.id(), BTreeSet::from([code("leaves:approve:team")]))
            .await
            .is_ok()
    );
    assert!(
        fixture
            .groups
            .set_employee_groups(organization_id, employee_id, BTreeSet::from([group.id()]))
            .await
            .is_ok()
    );
    assert!(
        fixture
            .matrices
            .set_matrix(
                employee_id,
                vec![ResourceMatrixEntry {
                    edit_own: true,
                    ..ResourceMatrixEntry::new("employees")
                }],
            )
            .await
            .is_ok()
    );

    let permissions = fixture.engine.effective_permissions(employee_id);
    let expected = BTreeSet::from([
        code("leaves:approve:team"),
        code("employees:view:own"),
        code("employees:edit:own"),
    ]);
    assert_eq!(*permissions, expected);
}

#[tokio::test]
async fn cached_set_is_reused_until_a_source_changes() {
    let fixture = fixture();
    let employee_id = EmployeeId::new();
    assert!(
        fixture
            .matrices
            .set_matrix(
                employee_id,
                vec![ResourceMatrixEntry {
                    view_own: true,
                    ..ResourceMatrixEntry::new("payroll")
                }],
            )
            .await
            .is_ok()
    );

    let first = fixture.engine.effective_permissions(employee_id);
    let second = fixture.engine.effective_permissions(employee_id);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fixture.engine.cached_entries(), 1);

    assert!(
        fixture
            .matrices
            .set_matrix(
                employee_id,
                vec![ResourceMatrixEntry {
                    view_team: true,
                    ..ResourceMatrixEntry::new("payroll")
                }],
            )
            .await
            .is_ok()
    );

    let third = fixture.engine.effective_permissions(employee_id);
    assert!(!Arc::ptr_eq(&first, &third));
    assert!(third.contains(&code("payroll:view:team")));
    assert!(!third.contains(&code("payroll:view:own")));
}

#[tokio::test]
async fn group_permission_change_reaches_every_member() {
    let fixture = fixture();
    let organization_id = OrganizationId::new();
    let members = [EmployeeId::new(), EmployeeId::new()];
    let group = fixture
        .groups
        .create_group(organization_id, "Shared", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    for member in members {
        assert!(
            fixture
                .groups
                .set_employee_groups(organization_id, member, BTreeSet::from([group.id()]))
                .await
                .is_ok()
        );
        assert!(fixture.engine.effective_permissions(member).is_empty());
    }

    assert!(
        fixture
            .groups
            .set_group_permissions(group.id(), BTreeSet::from([code("documents:view:own")]))
            .await
            .is_ok()
    );

    for member in members {
        assert!(
            fixture
                .engine
                .has_permission(member, &code("documents:view:own"))
        );
    }

    assert!(fixture.groups.delete_group(group.id()).await.is_ok());
    for member in members {
        assert!(fixture.engine.effective_permissions(member).is_empty());
    }
}

#[tokio::test]
async fn concurrent_readers_observe_completed_write() {
    let fixture = Arc::new(fixture());
    let employee_id = EmployeeId::new();

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let fixture = Arc::clone(&fixture);
            tokio::spawn(async move {
                for _ in 0..100 {
                    let _ = fixture.engine.effective_permissions(employee_id);
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    assert!(
        fixture
            .matrices
            .set_matrix(
                employee_id,
                vec![ResourceMatrixEntry {
                    view_org: true,
                    ..ResourceMatrixEntry::new("employees")
                }],
            )
            .await
            .is_ok()
    );
    assert!(
        fixture
            .engine
            .has_permission(employee_id, &code("employees:view:organization"))
    );

    for reader in readers {
        assert!(reader.await.is_ok());
    }
    assert!(
        fixture
            .engine
            .has_permission(employee_id, &code("employees:view:organization"))
    );
}

#[tokio::test]
async fn employees_without_grants_are_not_cached() {
    let fixture = fixture();

    for _ in 0..3 {
        assert!(fixture.engine.effective_permissions(EmployeeId::new()).is_empty());
    }

    assert_eq!(fixture.engine.cached_entries(), 0);
}

#[tokio::test]
async fn forgotten_employees_leave_no_cached_set() {
    let fixture = fixture();
    let organization_id = OrganizationId::new();
    let employee_id = EmployeeId::new();
    let group = fixture
        .groups
        .create_group(organization_id, "Readers", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        fixture
            .groups
            .set_group_permissions(group.id(), BTreeSet::from([code("documents:view:own")]))
            .await
            .is_ok()
    );
    assert!(
        fixture
            .groups
            .set_employee_groups(organization_id, employee_id, BTreeSet::from([group.id()]))
            .await
            .is_ok()
    );
    assert!(
        fixture
            .matrices
            .set_matrix(
                employee_id,
                vec![ResourceMatrixEntry {
                    view_own: true,
                    ..ResourceMatrixEntry::new("payroll")
                }],
            )
            .await
            .is_ok()
    );
    assert_eq!(fixture.engine.effective_permissions(employee_id).len(), 2);
    assert_eq!(fixture.engine.cached_entries(), 1);

    fixture.groups.forget_employee(employee_id).await;
    fixture.matrices.forget_employee(employee_id).await;

    assert_eq!(fixture.groups.version(employee_id), 0);
    assert_eq!(fixture.matrices.version(employee_id), 0);
    assert!(fixture.engine.effective_permissions(employee_id).is_empty());
    assert_eq!(fixture.engine.cached_entries(), 0);
}
