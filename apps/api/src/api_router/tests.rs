use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use scopegate_core::{EmployeeId, OrganizationId};
use scopegate_domain::{Employee, SystemGroupTemplate};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::build_router;
use crate::api_services::build_app_state;
use crate::middleware::ACTOR_HEADER;

struct TestApp {
    router: Router,
    admin: EmployeeId,
    engineer: EmployeeId,
}

async fn test_app() -> TestApp {
    let state = build_app_state(None)
        .await
        .unwrap_or_else(|_| unreachable!());
    let service = state.access_admin_service.clone();
    let engine = service.engine();

    let organization_id = OrganizationId::new();
    assert!(service.provision_organization(organization_id).await.is_ok());

    let admin = EmployeeId::new();
    let engineer = EmployeeId::new();
    let admin_record = Employee::new(admin, organization_id, "admin@acme.io")
        .unwrap_or_else(|_| unreachable!());
    let engineer_record = Employee::new(engineer, organization_id, "engineer@acme.io")
        .unwrap_or_else(|_| unreachable!())
        .with_manager(Some(admin));
    assert!(engine.upsert_employee(admin_record).await.is_ok());
    assert!(engine.upsert_employee(engineer_record).await.is_ok());

    let system_group = |template: SystemGroupTemplate| {
        engine
            .list_groups(organization_id)
            .into_iter()
            .find(|group| group.name() == template.name())
            .map(|group| group.id())
            .unwrap_or_else(|| unreachable!())
    };
    let admin_group = system_group(SystemGroupTemplate::OrgAdminFull);
    let basic_group = system_group(SystemGroupTemplate::EmployeeBasic);
    assert!(engine.set_employee_groups(admin, [admin_group]).await.is_ok());
    assert!(engine.set_employee_groups(engineer, [basic_group]).await.is_ok());

    TestApp {
        router: build_router(state, "http://localhost:3000").unwrap_or_else(|_| unreachable!()),
        admin,
        engineer,
    }
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    actor: Option<EmployeeId>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap_or_else(|_| unreachable!());

    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|_| unreachable!());
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|_| unreachable!());
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| unreachable!())
    };

    (status, payload)
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;

    let (status, payload) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_a_known_actor() {
    let app = test_app().await;

    let (missing, payload) = send(&app, Method::GET, "/api/org-chart", None, None).await;
    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(payload["code"], "unauthorized");

    let (unknown, _) = send(
        &app,
        Method::GET,
        "/api/org-chart",
        Some(EmployeeId::new()),
        None,
    )
    .await;
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);

    let (known, chart) = send(&app, Method::GET, "/api/org-chart", Some(app.engineer), None).await;
    assert_eq!(known, StatusCode::OK);
    assert_eq!(chart["root_employee_ids"], json!([app.admin.to_string()]));
}

#[tokio::test]
async fn authorize_answers_for_the_actor() {
    let app = test_app().await;

    let uri = |target: EmployeeId| {
        format!("/api/authorize?resource=employees&action=edit&target={target}")
    };

    let (status, admin_answer) =
        send(&app, Method::GET, uri(app.engineer).as_str(), Some(app.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin_answer["allowed"], true);

    let (_, own_answer) =
        send(&app, Method::GET, uri(app.engineer).as_str(), Some(app.engineer), None).await;
    assert_eq!(own_answer["allowed"], true);

    let (_, manager_answer) =
        send(&app, Method::GET, uri(app.admin).as_str(), Some(app.engineer), None).await;
    assert_eq!(manager_answer["allowed"], false);
}

#[tokio::test]
async fn unknown_actions_are_rejected() {
    let app = test_app().await;
    let uri = format!(
        "/api/authorize?resource=employees&action=fly&target={}",
        app.engineer
    );

    let (status, payload) = send(&app, Method::GET, uri.as_str(), Some(app.admin), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["code"], "unknown_permission_code");
}

#[tokio::test]
async fn missing_admin_permission_is_forbidden() {
    let app = test_app().await;

    let (status, payload) = send(
        &app,
        Method::POST,
        "/api/permission-groups",
        Some(app.engineer),
        Some(json!({ "name": "Payroll clerks" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(payload["code"], "forbidden");
}

#[tokio::test]
async fn group_lifecycle_validates_codes() {
    let app = test_app().await;

    let (created, group) = send(
        &app,
        Method::POST,
        "/api/permission-groups",
        Some(app.admin),
        Some(json!({ "name": "Payroll clerks" })),
    )
    .await;
    assert_eq!(created, StatusCode::CREATED);
    let group_id = group["group_id"].as_str().unwrap_or_default().to_owned();
    let permissions_uri = format!("/api/permission-groups/{group_id}/permissions");

    let (rejected, payload) = send(
        &app,
        Method::PUT,
        permissions_uri.as_str(),
        Some(app.admin),
        Some(json!({ "permissions": ["payroll:fly:own"] })),
    )
    .await;
    assert_eq!(rejected, StatusCode::BAD_REQUEST);
    assert_eq!(payload["code"], "unknown_permission_code");

    let (updated, group) = send(
        &app,
        Method::PUT,
        permissions_uri.as_str(),
        Some(app.admin),
        Some(json!({ "permissions": ["payroll:view:own"] })),
    )
    .await;
    assert_eq!(updated, StatusCode::OK);
    assert_eq!(group["permissions"], json!(["payroll:view:own"]));

    let (duplicate, payload) = send(
        &app,
        Method::POST,
        "/api/permission-groups",
        Some(app.admin),
        Some(json!({ "name": "payroll CLERKS" })),
    )
    .await;
    assert_eq!(duplicate, StatusCode::CONFLICT);
    assert_eq!(payload["code"], "duplicate_name");

    let (deleted, _) = send(
        &app,
        Method::DELETE,
        format!("/api/permission-groups/{group_id}").as_str(),
        Some(app.admin),
        None,
    )
    .await;
    assert_eq!(deleted, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn reporting_cycles_are_conflicts() {
    let app = test_app().await;

    let (status, payload) = send(
        &app,
        Method::PUT,
        format!("/api/employees/{}/manager", app.admin).as_str(),
        Some(app.admin),
        Some(json!({ "manager_id": app.engineer.to_string() })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(payload["code"], "cycle_detected");
}

#[tokio::test]
async fn employees_read_their_own_effective_permissions() {
    let app = test_app().await;

    let (status, payload) = send(
        &app,
        Method::GET,
        format!("/api/employees/{}/effective-permissions", app.engineer).as_str(),
        Some(app.engineer),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let permissions = payload["permissions"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert_eq!(permissions.len(), 10);
    assert!(permissions.contains(&json!("employees:edit:own")));
}
