use std::sync::Arc;

use scopegate_core::{ActorIdentity, AppError, EmployeeId, OrganizationId};
use scopegate_domain::{
    AuditAction, PermissionAction, ResourceMatrixEntry, SystemGroupTemplate,
};

use super::AccessAdminService;
use crate::test_support::{
    FakeAuditRepository, SampleOrganization, employee, engine_with_repository, sample_organization,
};

struct Fixture {
    service: AccessAdminService,
    audit: Arc<FakeAuditRepository>,
    sample: SampleOrganization,
    admin: ActorIdentity,
    hr: ActorIdentity,
    engineer: ActorIdentity,
}

fn actor(sample: &SampleOrganization, employee_id: EmployeeId) -> ActorIdentity {
    ActorIdentity::new(employee_id, sample.organization_id, "actor@acme.io")
}

async fn fixture() -> Fixture {
    let (engine, _) = engine_with_repository();
    let sample = sample_organization(&engine).await;
    let audit = Arc::new(FakeAuditRepository::default());
    let service = AccessAdminService::new(engine.clone(), audit.clone());

    let system_group = |template: SystemGroupTemplate| {
        engine
            .list_groups(sample.organization_id)
            .into_iter()
            .find(|group| group.name() == template.name())
            .map(|group| group.id())
            .unwrap_or_else(|| unreachable!())
    };
    let admin_group = system_group(SystemGroupTemplate::OrgAdminFull);
    let hr_group = system_group(SystemGroupTemplate::OrgHr);
    assert!(engine.set_employee_groups(sample.ceo, [admin_group]).await.is_ok());
    assert!(engine.set_employee_groups(sample.lead_a, [hr_group]).await.is_ok());

    Fixture {
        admin: actor(&sample, sample.ceo),
        hr: actor(&sample, sample.lead_a),
        engineer: actor(&sample, sample.engineer_a),
        service,
        audit,
        sample,
    }
}

#[tokio::test]
async fn admin_creates_and_assigns_groups_with_audit() {
    let fixture = fixture().await;
    let group = fixture
        .service
        .create_group(&fixture.admin, "Payroll clerks", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        fixture
            .service
            .set_group_permissions(&fixture.admin, group.id(), &["payroll:view:team"])
            .await
            .is_ok()
    );

    let groups = fixture
        .service
        .set_employee_groups(&fixture.admin, fixture.sample.lead_b, vec![group.id()])
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(groups.len(), 1);
    assert!(fixture.service.can_act(
        &actor(&fixture.sample, fixture.sample.lead_b),
        "payroll",
        PermissionAction::View,
        fixture.sample.engineer_b,
    ));

    let events = fixture.audit.events.lock().await;
    let actions: Vec<AuditAction> = events.iter().map(|event| event.action).collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::PermissionGroupCreated,
            AuditAction::PermissionGroupPermissionsReplaced,
            AuditAction::EmployeeGroupsReplaced,
        ]
    );
    let membership = &events[2];
    assert_eq!(membership.subject, fixture.sample.ceo.to_string());
    assert_eq!(
        membership.detail.as_deref(),
        Some("added [Payroll clerks]; removed []")
    );
}

#[tokio::test]
async fn actors_without_grants_are_forbidden() {
    let fixture = fixture().await;

    let created = fixture
        .service
        .create_group(&fixture.engineer, "Shadow admins", "")
        .await;
    assert!(matches!(created, Err(AppError::Forbidden(_))));

    let matrix = fixture
        .service
        .set_matrix(
            &fixture.hr,
            fixture.sample.engineer_b,
            vec![ResourceMatrixEntry {
                view_org: true,
                ..ResourceMatrixEntry::new("payroll")
            }],
        )
        .await;
    assert!(matches!(matrix, Err(AppError::Forbidden(_))));
    assert!(fixture.audit.events.lock().await.is_empty());
}

#[tokio::test]
async fn admins_cannot_change_their_own_grants() {
    let fixture = fixture().await;

    let groups = fixture
        .service
        .set_employee_groups(&fixture.admin, fixture.sample.ceo, Vec::new())
        .await;
    assert!(matches!(groups, Err(AppError::Forbidden(_))));

    let matrix = fixture
        .service
        .set_matrix(&fixture.admin, fixture.sample.ceo, Vec::new())
        .await;
    assert!(matches!(matrix, Err(AppError::Forbidden(_))));
    assert!(!fixture.service.engine().effective_permissions(fixture.sample.ceo).is_empty());
}

#[tokio::test]
async fn group_members_cannot_rewrite_their_own_group() {
    let fixture = fixture().await;
    let editors = fixture
        .service
        .create_group(&fixture.admin, "Group editors", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        fixture
            .service
            .set_group_permissions(
                &fixture.admin,
                editors.id(),
                &["permission-groups:edit:organization"],
            )
            .await
            .is_ok()
    );
    assert!(
        fixture
            .service
            .set_employee_groups(&fixture.admin, fixture.sample.lead_b, vec![editors.id()])
            .await
            .is_ok()
    );
    let editor = actor(&fixture.sample, fixture.sample.lead_b);

    let rewritten = fixture
        .service
        .set_group_permissions(
            &editor,
            editors.id(),
            &[
                "permission-groups:edit:organization",
                "permissions:grant:organization",
                "payroll:run:organization",
                "employees:delete:organization",
            ],
        )
        .await;
    assert!(matches!(rewritten, Err(AppError::Forbidden(_))));

    let renamed = fixture
        .service
        .update_group_details(&editor, editors.id(), "Admins", "")
        .await;
    assert!(matches!(renamed, Err(AppError::Forbidden(_))));

    assert_eq!(
        fixture
            .service
            .engine()
            .effective_permissions(fixture.sample.lead_b)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec!["permission-groups:edit:organization"]
    );
    assert!(!fixture.service.can_act(
        &editor,
        "employees",
        PermissionAction::Delete,
        fixture.sample.ceo,
    ));
}

#[tokio::test]
async fn grants_are_limited_to_held_permissions() {
    let fixture = fixture().await;
    let engine = fixture.service.engine();
    let delegates = engine
        .create_group(fixture.sample.organization_id, "Delegates", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        engine
            .set_group_permissions(
                delegates.id(),
                &[
                    "permission-groups:edit:organization",
                    "permission-groups:assign:organization",
                    "permissions:grant:organization",
                ],
            )
            .await
            .is_ok()
    );
    let hr_groups: Vec<_> = engine
        .employee_groups(fixture.sample.lead_a)
        .unwrap_or_else(|_| unreachable!())
        .iter()
        .map(|group| group.id())
        .chain([delegates.id()])
        .collect();
    assert!(engine.set_employee_groups(fixture.sample.lead_a, hr_groups).await.is_ok());

    let target = fixture
        .service
        .create_group(&fixture.admin, "Payroll runners", "")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(matches!(
        fixture
            .service
            .set_group_permissions(&fixture.hr, target.id(), &["payroll:run:organization"])
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(
        fixture
            .service
            .set_group_permissions(&fixture.hr, target.id(), &["employees:view:department"])
            .await
            .is_ok()
    );

    let admin_group = engine
        .list_groups(fixture.sample.organization_id)
        .into_iter()
        .find(|group| group.name() == SystemGroupTemplate::OrgAdminFull.name())
        .unwrap_or_else(|| unreachable!());
    assert!(matches!(
        fixture
            .service
            .set_employee_groups(&fixture.hr, fixture.sample.engineer_b, vec![admin_group.id()])
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(
        fixture
            .service
            .set_employee_groups(&fixture.hr, fixture.sample.engineer_b, vec![target.id()])
            .await
            .is_ok()
    );

    assert!(matches!(
        fixture
            .service
            .set_matrix(
                &fixture.hr,
                fixture.sample.engineer_b,
                vec![ResourceMatrixEntry {
                    edit_org: true,
                    ..ResourceMatrixEntry::new("employees")
                }],
            )
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(
        fixture
            .service
            .set_matrix(
                &fixture.hr,
                fixture.sample.engineer_b,
                vec![ResourceMatrixEntry {
                    edit_own: true,
                    ..ResourceMatrixEntry::new("employees")
                }],
            )
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn admins_can_hand_out_every_system_group() {
    let fixture = fixture().await;
    let system_groups: Vec<_> = fixture
        .service
        .list_groups(&fixture.admin)
        .unwrap_or_else(|_| unreachable!())
        .into_iter()
        .filter(|group| group.is_system())
        .map(|group| group.id())
        .collect();
    assert_eq!(system_groups.len(), 3);

    let assigned = fixture
        .service
        .set_employee_groups(&fixture.admin, fixture.sample.engineer_b, system_groups)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(assigned.len(), 3);
}

#[tokio::test]
async fn targets_must_share_the_actor_organization() {
    let fixture = fixture().await;
    let other = sample_organization(fixture.service.engine()).await;

    let result = fixture
        .service
        .set_matrix(&fixture.admin, other.engineer_a, Vec::new())
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let foreign_group = fixture
        .service
        .engine()
        .list_groups(other.organization_id)
        .into_iter()
        .next()
        .unwrap_or_else(|| unreachable!());
    assert!(matches!(
        fixture.service.get_group(&fixture.admin, foreign_group.id()),
        Err(AppError::GroupNotFound(_))
    ));
}

#[tokio::test]
async fn system_groups_cannot_be_renamed_or_deleted() {
    let fixture = fixture().await;
    let basic = fixture
        .service
        .list_groups(&fixture.admin)
        .unwrap_or_else(|_| unreachable!())
        .into_iter()
        .find(|group| group.is_system())
        .unwrap_or_else(|| unreachable!());

    assert!(matches!(
        fixture
            .service
            .update_group_details(&fixture.admin, basic.id(), "Renamed", "")
            .await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        fixture.service.delete_group(&fixture.admin, basic.id()).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn permission_reads_are_guarded_for_others() {
    let fixture = fixture().await;

    assert!(
        fixture
            .service
            .effective_permissions(&fixture.engineer, fixture.sample.engineer_a)
            .is_ok()
    );
    assert!(matches!(
        fixture
            .service
            .effective_permissions(&fixture.engineer, fixture.sample.ceo),
        Err(AppError::Forbidden(_))
    ));
    let overview = fixture
        .service
        .permission_overview(&fixture.admin, fixture.sample.lead_a)
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(overview.groups.len(), 1);
}

#[tokio::test]
async fn manager_changes_follow_employee_edit_scope() {
    let fixture = fixture().await;

    assert!(matches!(
        fixture
            .service
            .set_manager(&fixture.hr, fixture.sample.engineer_b, Some(fixture.sample.lead_a))
            .await,
        Err(AppError::Forbidden(_))
    ));

    assert!(
        fixture
            .service
            .set_manager(&fixture.admin, fixture.sample.engineer_b, Some(fixture.sample.lead_a))
            .await
            .is_ok()
    );
    let events = fixture.audit.events.lock().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::ReportingLineChanged);
}

#[tokio::test]
async fn employee_directory_changes_are_guarded() {
    let fixture = fixture().await;
    let newcomer = employee(
        fixture.sample.organization_id,
        "new@acme.io",
        Some(fixture.sample.lead_b),
        None,
    );

    assert!(matches!(
        fixture
            .service
            .upsert_employee(&fixture.engineer, newcomer.clone())
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(
        fixture
            .service
            .upsert_employee(&fixture.admin, newcomer.clone())
            .await
            .is_ok()
    );

    let stranger = employee(OrganizationId::new(), "x@elsewhere.io", None, None);
    assert!(matches!(
        fixture.service.upsert_employee(&fixture.admin, stranger).await,
        Err(AppError::Forbidden(_))
    ));

    assert!(matches!(
        fixture
            .service
            .remove_employee(&fixture.admin, fixture.sample.ceo)
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(
        fixture
            .service
            .remove_employee(&fixture.admin, newcomer.id())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn provisioning_is_audited_once() {
    let (engine, _) = engine_with_repository();
    let audit = Arc::new(FakeAuditRepository::default());
    let service = AccessAdminService::new(engine, audit.clone());
    let organization_id = OrganizationId::new();

    assert!(service.provision_organization(organization_id).await.is_ok());
    assert!(service.provision_organization(organization_id).await.is_ok());

    let events = audit.events.lock().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::OrganizationProvisioned);
}
