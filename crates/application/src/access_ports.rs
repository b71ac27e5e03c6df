mod audit;
mod state;

pub use audit::{AuditEvent, AuditRepository};
pub use state::{AccessStateRepository, AccessStateSnapshot};
