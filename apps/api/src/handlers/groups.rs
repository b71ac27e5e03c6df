use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use scopegate_core::{ActorIdentity, GroupId};

use crate::dto::{
    CreatePermissionGroupRequest, PermissionGroupResponse, SetGroupPermissionsRequest,
    UpdatePermissionGroupRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::parse_id;

pub async fn list_groups_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Vec<PermissionGroupResponse>>> {
    let groups = state
        .access_admin_service
        .list_groups(&actor)?
        .into_iter()
        .map(PermissionGroupResponse::from)
        .collect();

    Ok(Json(groups))
}

pub async fn create_group_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<CreatePermissionGroupRequest>,
) -> ApiResult<(StatusCode, Json<PermissionGroupResponse>)> {
    let group = state
        .access_admin_service
        .create_group(&actor, payload.name.as_str(), payload.description.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(PermissionGroupResponse::from(group))))
}

pub async fn get_group_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(group_id): Path<String>,
) -> ApiResult<Json<PermissionGroupResponse>> {
    let group_id: GroupId = parse_id(group_id.as_str())?;
    let group = state.access_admin_service.get_group(&actor, group_id)?;

    Ok(Json(PermissionGroupResponse::from(group)))
}

pub async fn update_group_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(group_id): Path<String>,
    Json(payload): Json<UpdatePermissionGroupRequest>,
) -> ApiResult<Json<PermissionGroupResponse>> {
    let group_id: GroupId = parse_id(group_id.as_str())?;
    let group = state
        .access_admin_service
        .update_group_details(
            &actor,
            group_id,
            payload.name.as_str(),
            payload.description.as_str(),
        )
        .await?;

    Ok(Json(PermissionGroupResponse::from(group)))
}

pub async fn delete_group_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(group_id): Path<String>,
) -> ApiResult<StatusCode> {
    let group_id: GroupId = parse_id(group_id.as_str())?;
    state
        .access_admin_service
        .delete_group(&actor, group_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_group_permissions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(group_id): Path<String>,
    Json(payload): Json<SetGroupPermissionsRequest>,
) -> ApiResult<Json<PermissionGroupResponse>> {
    let group_id: GroupId = parse_id(group_id.as_str())?;
    let group = state
        .access_admin_service
        .set_group_permissions(&actor, group_id, &payload.permissions)
        .await?;

    Ok(Json(PermissionGroupResponse::from(group)))
}

pub async fn group_members_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(group_id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    let group_id: GroupId = parse_id(group_id.as_str())?;
    let members = state
        .access_admin_service
        .group_members(&actor, group_id)?
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(Json(members))
}
