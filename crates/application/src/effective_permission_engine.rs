//! Effective permission sets with a version-keyed cache.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use scopegate_core::EmployeeId;
use scopegate_domain::PermissionCode;
use tracing::debug;

use crate::{GroupStore, MatrixStore};

#[derive(Debug, Clone)]
struct CachedPermissions {
    group_version: u64,
    matrix_version: u64,
    permissions: Arc<BTreeSet<PermissionCode>>,
}

/// Computes the union of group-derived and matrix-derived codes per employee.
///
/// A cached set is served only while both source versions are unchanged, so
/// any completed write is visible to the next read without explicit flushing.
pub struct EffectivePermissionEngine {
    groups: Arc<GroupStore>,
    matrices: Arc<MatrixStore>,
    cache: DashMap<EmployeeId, CachedPermissions>,
}

impl EffectivePermissionEngine {
    /// Creates an engine over the two permission sources.
    #[must_use]
    pub fn new(groups: Arc<GroupStore>, matrices: Arc<MatrixStore>) -> Self {
        Self {
            groups,
            matrices,
            cache: DashMap::new(),
        }
    }

    /// Returns the employee's effective codes; unknown employees get an empty set.
    #[must_use]
    pub fn effective_permissions(&self, employee_id: EmployeeId) -> Arc<BTreeSet<PermissionCode>> {
        let group_version = self.groups.version(employee_id);
        let matrix_version = self.matrices.version(employee_id);

        // Unknown and removed employees have no grants and are not cached.
        if group_version == 0 && matrix_version == 0 {
            self.cache.remove(&employee_id);
            return Arc::new(BTreeSet::new());
        }

        if let Some(cached) = self.cache.get(&employee_id)
            && cached.group_version == group_version
            && cached.matrix_version == matrix_version
        {
            debug!(employee_id = %employee_id, "effective permission cache hit");
            return Arc::clone(&cached.permissions);
        }

        // Each source reads its version before its data, so the computed set is
        // never older than the versions it is cached under.
        let (group_version, mut permissions) = self.groups.codes_for(employee_id);
        let (matrix_version, matrix_codes) = self.matrices.codes_for(employee_id);
        permissions.extend(matrix_codes);
        let permissions = Arc::new(permissions);

        debug!(
            employee_id = %employee_id,
            group_version,
            matrix_version,
            permissions = permissions.len(),
            "effective permission cache miss"
        );

        self.cache
            .entry(employee_id)
            .and_modify(|cached| {
                // A slower reader must not replace a set computed at newer versions.
                if group_version >= cached.group_version
                    && matrix_version >= cached.matrix_version
                {
                    *cached = CachedPermissions {
                        group_version,
                        matrix_version,
                        permissions: Arc::clone(&permissions),
                    };
                }
            })
            .or_insert_with(|| CachedPermissions {
                group_version,
                matrix_version,
                permissions: Arc::clone(&permissions),
            });

        permissions
    }

    /// Returns whether the employee holds the exact code.
    #[must_use]
    pub fn has_permission(&self, employee_id: EmployeeId, code: &PermissionCode) -> bool {
        self.effective_permissions(employee_id).contains(code)
    }

    /// Drops the cached set of one employee.
    pub fn evict(&self, employee_id: EmployeeId) {
        self.cache.remove(&employee_id);
    }

    /// Returns the number of cached employees.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests;
