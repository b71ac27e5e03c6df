use axum::Json;
use axum::extract::{Extension, Query, State};
use scopegate_core::{ActorIdentity, EmployeeId};
use scopegate_domain::PermissionAction;

use crate::dto::{
    AccessibleEmployeesQuery, AccessibleEmployeesResponse, AuthorizeQuery, AuthorizeResponse,
    CatalogEntryResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::parse_id;

pub async fn authorize_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Query(query): Query<AuthorizeQuery>,
) -> ApiResult<Json<AuthorizeResponse>> {
    let action: PermissionAction = query.action.trim().parse()?;
    let target: EmployeeId = parse_id(query.target.as_str())?;

    let allowed =
        state
            .access_admin_service
            .can_act(&actor, query.resource.as_str(), action, target);

    Ok(Json(AuthorizeResponse {
        allowed,
        resource: query.resource,
        action: action.as_str().to_owned(),
        target: target.to_string(),
    }))
}

pub async fn accessible_employees_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Query(query): Query<AccessibleEmployeesQuery>,
) -> ApiResult<Json<AccessibleEmployeesResponse>> {
    let action: PermissionAction = query.action.trim().parse()?;
    let employee_ids = state
        .access_admin_service
        .accessible_employees(&actor, query.resource.as_str(), action)
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(Json(AccessibleEmployeesResponse {
        resource: query.resource,
        action: action.as_str().to_owned(),
        employee_ids,
    }))
}

pub async fn catalog_handler(State(state): State<AppState>) -> Json<Vec<CatalogEntryResponse>> {
    Json(
        state
            .access_admin_service
            .engine()
            .catalog()
            .entries()
            .map(CatalogEntryResponse::from)
            .collect(),
    )
}
