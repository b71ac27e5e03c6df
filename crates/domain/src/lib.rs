//! Domain entities and invariants of the scope-aware access engine.

#![forbid(unsafe_code)]

mod audit;
mod catalog;
mod employee;
mod group;
mod hierarchy;
mod matrix;
mod permission;
mod scope;

pub use audit::AuditAction;
pub use catalog::{CatalogEntry, PermissionCatalog};
pub use employee::{EmailAddress, Employee};
pub use group::{PermissionGroup, SystemGroupTemplate, group_name_key};
pub use hierarchy::HierarchyIndex;
pub use matrix::{ORGANIZATION_EDIT_COMPANIONS, ResourceMatrixEntry};
pub use permission::{PermissionAction, PermissionCode, PermissionScope, validate_resource_name};
pub use scope::ScopeRelation;
