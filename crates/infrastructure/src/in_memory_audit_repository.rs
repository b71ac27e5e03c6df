use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scopegate_application::{AuditEvent, AuditRepository};
use scopegate_core::{AppResult, OrganizationId};
use tokio::sync::RwLock;

/// Audit event with the time it was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAuditEvent {
    /// Appended event.
    pub event: AuditEvent,
    /// Append timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// In-memory append-only audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<RecordedAuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events of one organization, newest first.
    pub async fn recent_events(
        &self,
        organization_id: OrganizationId,
        limit: usize,
    ) -> Vec<RecordedAuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .rev()
            .filter(|recorded| recorded.event.organization_id == organization_id)
            .take(limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.write().await.push(RecordedAuditEvent {
            event,
            recorded_at: Utc::now(),
        });
        Ok(())
    }
}
