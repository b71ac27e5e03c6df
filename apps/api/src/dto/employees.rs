use scopegate_application::{OrgChart, OrgChartNode, PermissionOverview};
use scopegate_domain::{Employee, PermissionCode, ResourceMatrixEntry};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::groups::PermissionGroupResponse;

/// Incoming payload for employee directory sync.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upsert-employee-request.ts"
)]
pub struct UpsertEmployeeRequest {
    pub email: String,
    pub department_id: Option<String>,
    pub reports_to: Option<String>,
}

/// Incoming payload for reporting line changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-manager-request.ts"
)]
pub struct SetManagerRequest {
    pub manager_id: Option<String>,
}

/// Incoming payload replacing an employee's groups.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-employee-groups-request.ts"
)]
pub struct SetEmployeeGroupsRequest {
    pub group_ids: Vec<String>,
}

/// One matrix row on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-matrix-entry.ts"
)]
pub struct ResourceMatrixEntryDto {
    pub resource: String,
    #[serde(default)]
    pub view_own: bool,
    #[serde(default)]
    pub edit_own: bool,
    #[serde(default)]
    pub view_team: bool,
    #[serde(default)]
    pub edit_team: bool,
    #[serde(default)]
    pub view_org: bool,
    #[serde(default)]
    pub edit_org: bool,
}

impl From<ResourceMatrixEntry> for ResourceMatrixEntryDto {
    fn from(value: ResourceMatrixEntry) -> Self {
        Self {
            resource: value.resource,
            view_own: value.view_own,
            edit_own: value.edit_own,
            view_team: value.view_team,
            edit_team: value.edit_team,
            view_org: value.view_org,
            edit_org: value.edit_org,
        }
    }
}

impl From<ResourceMatrixEntryDto> for ResourceMatrixEntry {
    fn from(value: ResourceMatrixEntryDto) -> Self {
        Self {
            resource: value.resource,
            view_own: value.view_own,
            edit_own: value.edit_own,
            view_team: value.view_team,
            edit_team: value.edit_team,
            view_org: value.view_org,
            edit_org: value.edit_org,
        }
    }
}

/// Incoming payload replacing an employee's matrix.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-matrix-request.ts"
)]
pub struct SetMatrixRequest {
    pub entries: Vec<ResourceMatrixEntryDto>,
}

/// API representation of an employee.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-response.ts"
)]
pub struct EmployeeResponse {
    pub employee_id: String,
    pub organization_id: String,
    pub email: String,
    pub department_id: Option<String>,
    pub reports_to: Option<String>,
}

impl From<Employee> for EmployeeResponse {
    fn from(value: Employee) -> Self {
        Self {
            employee_id: value.id().to_string(),
            organization_id: value.organization_id().to_string(),
            email: value.email().as_str().to_owned(),
            department_id: value.department_id().map(|id| id.to_string()),
            reports_to: value.reports_to().map(|id| id.to_string()),
        }
    }
}

/// Sorted effective codes of an employee.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permissions-response.ts"
)]
pub struct EffectivePermissionsResponse {
    pub employee_id: String,
    pub permissions: Vec<String>,
}

impl EffectivePermissionsResponse {
    pub fn new(employee_id: impl ToString, permissions: Vec<PermissionCode>) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            permissions: permissions.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Groups and effective codes of an employee.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-overview-response.ts"
)]
pub struct PermissionOverviewResponse {
    pub employee_id: String,
    pub groups: Vec<PermissionGroupResponse>,
    pub effective_permissions: Vec<String>,
}

impl From<PermissionOverview> for PermissionOverviewResponse {
    fn from(value: PermissionOverview) -> Self {
        Self {
            employee_id: value.employee_id.to_string(),
            groups: value
                .groups
                .into_iter()
                .map(PermissionGroupResponse::from)
                .collect(),
            effective_permissions: value
                .effective_permissions
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// One org chart node.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/org-chart-node-response.ts"
)]
pub struct OrgChartNodeResponse {
    pub employee_id: String,
    pub email: String,
    pub department_id: Option<String>,
    pub reports_to: Option<String>,
    pub direct_report_count: usize,
}

impl From<OrgChartNode> for OrgChartNodeResponse {
    fn from(value: OrgChartNode) -> Self {
        Self {
            employee_id: value.employee_id.to_string(),
            email: value.email,
            department_id: value.department_id.map(|id| id.to_string()),
            reports_to: value.reports_to.map(|id| id.to_string()),
            direct_report_count: value.direct_report_count,
        }
    }
}

/// Reporting structure of the actor's organization.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/org-chart-response.ts"
)]
pub struct OrgChartResponse {
    pub organization_id: String,
    #[ts(type = "number")]
    pub version: u64,
    pub root_employee_ids: Vec<String>,
    pub nodes: Vec<OrgChartNodeResponse>,
}

impl From<OrgChart> for OrgChartResponse {
    fn from(value: OrgChart) -> Self {
        Self {
            organization_id: value.organization_id.to_string(),
            version: value.version,
            root_employee_ids: value
                .root_employee_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
            nodes: value
                .nodes
                .into_iter()
                .map(OrgChartNodeResponse::from)
                .collect(),
        }
    }
}
