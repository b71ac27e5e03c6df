use scopegate_domain::PermissionGroup;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for custom group creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-permission-group-request.ts"
)]
pub struct CreatePermissionGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Incoming payload for group renames.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-permission-group-request.ts"
)]
pub struct UpdatePermissionGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Incoming payload replacing a group's codes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-group-permissions-request.ts"
)]
pub struct SetGroupPermissionsRequest {
    pub permissions: Vec<String>,
}

/// API representation of a permission group.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-group-response.ts"
)]
pub struct PermissionGroupResponse {
    pub group_id: String,
    pub organization_id: String,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub permissions: Vec<String>,
    pub created_at: String,
}

impl From<PermissionGroup> for PermissionGroupResponse {
    fn from(value: PermissionGroup) -> Self {
        Self {
            group_id: value.id().to_string(),
            organization_id: value.organization_id().to_string(),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
            is_system: value.is_system(),
            permissions: value.permissions().iter().map(ToString::to_string).collect(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}
