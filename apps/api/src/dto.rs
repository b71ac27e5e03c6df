mod authorization;
mod common;
mod employees;
mod groups;

pub use authorization::{
    AccessibleEmployeesQuery, AccessibleEmployeesResponse, AuthorizeQuery, AuthorizeResponse,
    CatalogEntryResponse,
};
pub use common::HealthResponse;
pub use employees::{
    EffectivePermissionsResponse, EmployeeResponse, OrgChartResponse, PermissionOverviewResponse,
    ResourceMatrixEntryDto, SetEmployeeGroupsRequest, SetManagerRequest, SetMatrixRequest,
    UpsertEmployeeRequest,
};
pub use groups::{
    CreatePermissionGroupRequest, PermissionGroupResponse, SetGroupPermissionsRequest,
    UpdatePermissionGroupRequest,
};
