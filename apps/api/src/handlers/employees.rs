use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use scopegate_core::{ActorIdentity, AppError, EmployeeId, GroupId};
use scopegate_domain::{Employee, ResourceMatrixEntry};

use crate::dto::{
    EffectivePermissionsResponse, EmployeeResponse, OrgChartResponse, PermissionGroupResponse,
    PermissionOverviewResponse, ResourceMatrixEntryDto, SetEmployeeGroupsRequest,
    SetManagerRequest, SetMatrixRequest, UpsertEmployeeRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{parse_id, parse_optional_id};

fn matrix_response(entries: Vec<ResourceMatrixEntry>) -> Json<Vec<ResourceMatrixEntryDto>> {
    Json(
        entries
            .into_iter()
            .map(ResourceMatrixEntryDto::from)
            .collect(),
    )
}

pub async fn effective_permissions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let permissions = state
        .access_admin_service
        .effective_permissions(&actor, employee_id)?;

    Ok(Json(EffectivePermissionsResponse::new(
        employee_id,
        permissions,
    )))
}

pub async fn permission_overview_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<PermissionOverviewResponse>> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let overview = state
        .access_admin_service
        .permission_overview(&actor, employee_id)?;

    Ok(Json(PermissionOverviewResponse::from(overview)))
}

pub async fn matrix_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<Vec<ResourceMatrixEntryDto>>> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let entries = state.access_admin_service.matrix(&actor, employee_id)?;

    Ok(matrix_response(entries))
}

pub async fn effective_matrix_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<Vec<ResourceMatrixEntryDto>>> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let entries = state
        .access_admin_service
        .matrix_view(&actor, employee_id)?;

    Ok(matrix_response(entries))
}

pub async fn set_matrix_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
    Json(payload): Json<SetMatrixRequest>,
) -> ApiResult<Json<Vec<ResourceMatrixEntryDto>>> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let entries = payload
        .entries
        .into_iter()
        .map(ResourceMatrixEntry::from)
        .collect();

    let stored = state
        .access_admin_service
        .set_matrix(&actor, employee_id, entries)
        .await?;

    Ok(matrix_response(stored))
}

pub async fn set_employee_groups_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
    Json(payload): Json<SetEmployeeGroupsRequest>,
) -> ApiResult<Json<Vec<PermissionGroupResponse>>> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let group_ids = payload
        .group_ids
        .iter()
        .map(|value| parse_id::<GroupId>(value.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let groups = state
        .access_admin_service
        .set_employee_groups(&actor, employee_id, group_ids)
        .await?
        .into_iter()
        .map(PermissionGroupResponse::from)
        .collect();

    Ok(Json(groups))
}

pub async fn set_manager_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
    Json(payload): Json<SetManagerRequest>,
) -> ApiResult<StatusCode> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let manager_id = parse_optional_id(payload.manager_id.as_deref())?;

    state
        .access_admin_service
        .set_manager(&actor, employee_id, manager_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn upsert_employee_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
    Json(payload): Json<UpsertEmployeeRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    let employee = Employee::new(employee_id, actor.organization_id(), payload.email)?
        .with_department(parse_optional_id(payload.department_id.as_deref())?)
        .with_manager(parse_optional_id(payload.reports_to.as_deref())?);

    let stored = state
        .access_admin_service
        .upsert_employee(&actor, employee)
        .await?;

    Ok(Json(EmployeeResponse::from(stored)))
}

pub async fn remove_employee_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(employee_id): Path<String>,
) -> ApiResult<StatusCode> {
    let employee_id: EmployeeId = parse_id(employee_id.as_str())?;
    state
        .access_admin_service
        .remove_employee(&actor, employee_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn org_chart_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<OrgChartResponse>> {
    let chart = state.access_admin_service.org_chart(&actor)?;
    Ok(Json(OrgChartResponse::from(chart)))
}

pub async fn current_actor_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = state
        .access_admin_service
        .engine()
        .employee(actor.employee_id())
        .map_err(|_| AppError::Unauthorized("actor no longer exists".to_owned()))?;

    Ok(Json(EmployeeResponse::from(employee)))
}
