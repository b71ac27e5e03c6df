//! Direct per-employee resource matrices.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use dashmap::DashMap;
use scopegate_core::{AppError, AppResult, EmployeeId};
use scopegate_domain::{PermissionCatalog, PermissionCode, ResourceMatrixEntry};
use tracing::{info, warn};

use crate::AccessStateRepository;
use crate::concurrency::{KeyedLocks, VersionClock};

/// Stores each employee's matrix keyed by resource, with a per-employee version.
pub struct MatrixStore {
    catalog: Arc<PermissionCatalog>,
    repository: Arc<dyn AccessStateRepository>,
    clock: Arc<VersionClock>,
    matrices: DashMap<EmployeeId, BTreeMap<String, ResourceMatrixEntry>>,
    versions: DashMap<EmployeeId, u64>,
    employee_writers: KeyedLocks<EmployeeId>,
}

impl MatrixStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(
        catalog: Arc<PermissionCatalog>,
        repository: Arc<dyn AccessStateRepository>,
        clock: Arc<VersionClock>,
    ) -> Self {
        Self {
            catalog,
            repository,
            clock,
            matrices: DashMap::new(),
            versions: DashMap::new(),
            employee_writers: KeyedLocks::default(),
        }
    }

    /// Returns the stored matrix; resources without an entry are all-false.
    #[must_use]
    pub fn get_matrix(&self, employee_id: EmployeeId) -> BTreeMap<String, ResourceMatrixEntry> {
        self.matrices
            .get(&employee_id)
            .map(|matrix| matrix.clone())
            .unwrap_or_default()
    }

    /// Returns one row, all-false when absent.
    #[must_use]
    pub fn entry(&self, employee_id: EmployeeId, resource: &str) -> ResourceMatrixEntry {
        self.matrices
            .get(&employee_id)
            .and_then(|matrix| matrix.get(resource).cloned())
            .unwrap_or_else(|| ResourceMatrixEntry::new(resource))
    }

    /// Replaces the whole matrix after normalizing and validating every row.
    pub async fn set_matrix(
        &self,
        employee_id: EmployeeId,
        entries: Vec<ResourceMatrixEntry>,
    ) -> AppResult<BTreeMap<String, ResourceMatrixEntry>> {
        self.replace_matrix(employee_id, entries, || Ok(())).await
    }

    /// Replaces the matrix once `ensure_present` passes under the employee's writer lock.
    pub async fn replace_matrix<F>(
        &self,
        employee_id: EmployeeId,
        entries: Vec<ResourceMatrixEntry>,
        ensure_present: F,
    ) -> AppResult<BTreeMap<String, ResourceMatrixEntry>>
    where
        F: FnOnce() -> AppResult<()>,
    {
        let matrix = self.normalize(entries)?;

        let _employee_writer = self.employee_writers.lock(employee_id).await;
        ensure_present()?;
        let rows: Vec<ResourceMatrixEntry> = matrix.values().cloned().collect();
        self.repository
            .replace_resource_matrix(employee_id, &rows)
            .await?;

        if matrix.is_empty() {
            self.matrices.remove(&employee_id);
        } else {
            self.matrices.insert(employee_id, matrix.clone());
        }
        self.bump(employee_id);

        info!(employee_id = %employee_id, resources = matrix.len(), "resource matrix replaced");
        Ok(matrix)
    }

    /// Returns the matrix version of an employee.
    #[must_use]
    pub fn version(&self, employee_id: EmployeeId) -> u64 {
        self.versions
            .get(&employee_id)
            .map(|version| *version)
            .unwrap_or_default()
    }

    /// Returns the version followed by the codes synthesized from the matrix.
    #[must_use]
    pub fn codes_for(&self, employee_id: EmployeeId) -> (u64, BTreeSet<PermissionCode>) {
        let version = self.version(employee_id);
        let mut codes = BTreeSet::new();
        for entry in self.get_matrix(employee_id).values() {
            match entry.synthesized_codes(&self.catalog) {
                Ok(synthesized) => codes.extend(synthesized),
                Err(error) => {
                    warn!(employee_id = %employee_id, resource = %entry.resource, %error, "skipping invalid matrix row");
                }
            }
        }
        (version, codes)
    }

    /// Drops matrix, version and writer lock of a removed employee.
    pub(crate) async fn forget_employee(&self, employee_id: EmployeeId) {
        let employee_writer = self.employee_writers.lock(employee_id).await;
        self.matrices.remove(&employee_id);
        self.versions.remove(&employee_id);
        drop(employee_writer);
        self.employee_writers.forget(&employee_id);
    }

    /// Replaces all in-memory state with persisted rows.
    pub(crate) fn hydrate(&self, rows: Vec<(EmployeeId, ResourceMatrixEntry)>) -> AppResult<()> {
        let mut grouped: BTreeMap<EmployeeId, Vec<ResourceMatrixEntry>> = BTreeMap::new();
        for (employee_id, entry) in rows {
            grouped.entry(employee_id).or_default().push(entry);
        }

        let mut matrices = Vec::with_capacity(grouped.len());
        for (employee_id, entries) in grouped {
            matrices.push((employee_id, self.normalize(entries)?));
        }

        self.matrices.clear();
        self.versions.clear();
        for (employee_id, matrix) in matrices {
            if !matrix.is_empty() {
                self.matrices.insert(employee_id, matrix);
            }
            self.bump(employee_id);
        }

        Ok(())
    }

    fn normalize(
        &self,
        entries: Vec<ResourceMatrixEntry>,
    ) -> AppResult<BTreeMap<String, ResourceMatrixEntry>> {
        let mut matrix = BTreeMap::new();
        for entry in entries {
            let entry = entry.normalized();
            entry.validate(&self.catalog)?;

            let resource = entry.resource.clone();
            if matrix.contains_key(&resource) {
                return Err(AppError::Validation(format!(
                    "resource '{resource}' appears more than once in the matrix"
                )));
            }
            matrix.insert(resource, entry);
        }

        // All-false rows are indistinguishable from missing ones.
        matrix.retain(|_, entry| !entry.is_empty());
        Ok(matrix)
    }

    fn bump(&self, employee_id: EmployeeId) {
        self.versions.insert(employee_id, self.clock.next());
    }
}
