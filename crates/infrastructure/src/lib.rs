//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_state_repository;
mod in_memory_audit_repository;
mod postgres_access_state_repository;
mod postgres_audit_repository;

pub use in_memory_access_state_repository::InMemoryAccessStateRepository;
pub use in_memory_audit_repository::{InMemoryAuditRepository, RecordedAuditEvent};
pub use postgres_access_state_repository::PostgresAccessStateRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
