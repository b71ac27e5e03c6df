use std::sync::Arc;

use scopegate_core::EmployeeId;
use scopegate_domain::ScopeRelation;

use crate::HierarchyStore;

/// Classifies actor/target pairs from one consistent hierarchy snapshot.
#[derive(Clone)]
pub struct ScopeResolver {
    hierarchy: Arc<HierarchyStore>,
}

impl ScopeResolver {
    /// Creates a resolver over the hierarchy store.
    #[must_use]
    pub fn new(hierarchy: Arc<HierarchyStore>) -> Self {
        Self { hierarchy }
    }

    /// Returns the relation; unknown or cross-organization pairs relate by nothing.
    #[must_use]
    pub fn resolve(&self, actor: EmployeeId, target: EmployeeId) -> ScopeRelation {
        self.hierarchy
            .snapshot_for(actor)
            .map(|snapshot| snapshot.relation(actor, target))
            .unwrap_or_else(ScopeRelation::none)
    }
}
