use scopegate_domain::CatalogEntry;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string of a single authorization question.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/authorize-query.ts"
)]
pub struct AuthorizeQuery {
    pub resource: String,
    pub action: String,
    pub target: String,
}

/// Answer to an authorization question.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/authorize-response.ts"
)]
pub struct AuthorizeResponse {
    pub allowed: bool,
    pub resource: String,
    pub action: String,
    pub target: String,
}

/// Query string for accessible-employee listings.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/accessible-employees-query.ts"
)]
pub struct AccessibleEmployeesQuery {
    pub resource: String,
    pub action: String,
}

/// Employees the actor may act on.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/accessible-employees-response.ts"
)]
pub struct AccessibleEmployeesResponse {
    pub resource: String,
    pub action: String,
    pub employee_ids: Vec<String>,
}

/// API representation of a declared permission code.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/catalog-entry-response.ts"
)]
pub struct CatalogEntryResponse {
    pub code: String,
    pub resource: String,
    pub action: String,
    pub scope: String,
    pub description: String,
}

impl From<&CatalogEntry> for CatalogEntryResponse {
    fn from(value: &CatalogEntry) -> Self {
        let code = value.code();
        Self {
            code: code.to_string(),
            resource: code.resource().to_owned(),
            action: code.action().as_str().to_owned(),
            scope: code.scope().as_str().to_owned(),
            description: value.description().to_owned(),
        }
    }
}
