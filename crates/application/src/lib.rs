//! Application services and ports.

#![forbid(unsafe_code)]

mod access_admin_service;
mod access_engine;
mod access_ports;
mod authorization_service;
mod concurrency;
mod effective_permission_engine;
mod group_store;
mod hierarchy_store;
mod matrix_store;
mod scope_resolver;

#[cfg(test)]
mod test_support;

pub use access_admin_service::AccessAdminService;
pub use access_engine::{AccessEngine, OrgChart, OrgChartNode, PermissionOverview};
pub use access_ports::{AccessStateRepository, AccessStateSnapshot, AuditEvent, AuditRepository};
pub use authorization_service::AuthorizationService;
pub use concurrency::VersionClock;
pub use effective_permission_engine::EffectivePermissionEngine;
pub use group_store::{DeletedGroup, GroupStore, MembershipChange};
pub use hierarchy_store::{HierarchySnapshot, HierarchyStore, ReportingLineChange};
pub use matrix_store::MatrixStore;
pub use scope_resolver::ScopeResolver;
