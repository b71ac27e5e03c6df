//! Reporting-hierarchy index with O(1) ancestor checks.
//!
//! Nodes are numbered by a depth-first Euler tour: every employee gets an
//! `enter` position and an exclusive `exit` bound covering its subtree, so
//! `c` is a strict descendant of `a` exactly when `a.enter < c.enter < a.exit`.

use std::collections::{BTreeMap, HashMap};

use scopegate_core::{AppError, AppResult, EmployeeId};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TourPosition {
    enter: usize,
    exit: usize,
    depth: usize,
}

/// Immutable descendant index over one organization's reporting forest.
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    positions: HashMap<EmployeeId, TourPosition>,
    managers: HashMap<EmployeeId, EmployeeId>,
    children: HashMap<EmployeeId, Vec<EmployeeId>>,
    tour: Vec<EmployeeId>,
    roots: Vec<EmployeeId>,
}

impl HierarchyIndex {
    /// Builds the index from `(employee, manager)` edges.
    ///
    /// Fails with `EmployeeNotFound` when a manager is not part of the edge
    /// set and with `CycleDetected` when the graph is not a forest.
    pub fn build(edges: impl IntoIterator<Item = (EmployeeId, Option<EmployeeId>)>) -> AppResult<Self> {
        let edges: BTreeMap<EmployeeId, Option<EmployeeId>> = edges.into_iter().collect();

        let mut managers = HashMap::new();
        let mut children: HashMap<EmployeeId, Vec<EmployeeId>> = HashMap::new();
        let mut roots = Vec::new();

        for (&employee_id, &manager_id) in &edges {
            match manager_id {
                None => roots.push(employee_id),
                Some(manager_id) if manager_id == employee_id => {
                    return Err(AppError::CycleDetected(format!(
                        "employee '{employee_id}' cannot report to themselves"
                    )));
                }
                Some(manager_id) => {
                    if !edges.contains_key(&manager_id) {
                        return Err(AppError::EmployeeNotFound(format!(
                            "manager '{manager_id}' of employee '{employee_id}' does not exist"
                        )));
                    }
                    managers.insert(employee_id, manager_id);
                    children.entry(manager_id).or_default().push(employee_id);
                }
            }
        }

        let mut positions = HashMap::with_capacity(edges.len());
        let mut tour = Vec::with_capacity(edges.len());

        // Iterative DFS; each frame is (node, next child index).
        let mut stack: Vec<(EmployeeId, usize)> = Vec::new();
        for &root in &roots {
            positions.insert(
                root,
                TourPosition {
                    enter: tour.len(),
                    exit: 0,
                    depth: 0,
                },
            );
            tour.push(root);
            stack.push((root, 0));

            while let Some((node, next_child)) = stack.last_mut() {
                let node = *node;
                let child = children
                    .get(&node)
                    .and_then(|node_children| node_children.get(*next_child))
                    .copied();

                match child {
                    Some(child) => {
                        *next_child += 1;
                        let depth = stack.len();
                        positions.insert(
                            child,
                            TourPosition {
                                enter: tour.len(),
                                exit: 0,
                                depth,
                            },
                        );
                        tour.push(child);
                        stack.push((child, 0));
                    }
                    None => {
                        let exit = tour.len();
                        if let Some(position) = positions.get_mut(&node) {
                            position.exit = exit;
                        }
                        stack.pop();
                    }
                }
            }
        }

        if tour.len() != edges.len() {
            let unreachable = edges
                .keys()
                .find(|employee_id| !positions.contains_key(*employee_id))
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(AppError::CycleDetected(format!(
                "reporting line of employee '{unreachable}' forms a cycle"
            )));
        }

        Ok(Self {
            positions,
            managers,
            children,
            tour,
            roots,
        })
    }

    /// Returns whether `candidate` is a strict descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant(&self, ancestor: EmployeeId, candidate: EmployeeId) -> bool {
        match (self.positions.get(&ancestor), self.positions.get(&candidate)) {
            (Some(ancestor), Some(candidate)) => {
                ancestor.enter < candidate.enter && candidate.enter < ancestor.exit
            }
            _ => false,
        }
    }

    /// Returns whether giving `employee` the manager `new_manager` would close a cycle.
    #[must_use]
    pub fn would_create_cycle(&self, employee: EmployeeId, new_manager: Option<EmployeeId>) -> bool {
        new_manager.is_some_and(|manager| manager == employee || self.is_descendant(employee, manager))
    }

    /// Returns every strict descendant of `ancestor` in tour order.
    #[must_use]
    pub fn descendants(&self, ancestor: EmployeeId) -> &[EmployeeId] {
        self.positions
            .get(&ancestor)
            .and_then(|position| self.tour.get(position.enter + 1..position.exit))
            .unwrap_or(&[])
    }

    /// Returns the direct reports of `manager`.
    #[must_use]
    pub fn direct_reports(&self, manager: EmployeeId) -> &[EmployeeId] {
        self.children.get(&manager).map_or(&[], Vec::as_slice)
    }

    /// Returns the direct manager of `employee`.
    #[must_use]
    pub fn manager_of(&self, employee: EmployeeId) -> Option<EmployeeId> {
        self.managers.get(&employee).copied()
    }

    /// Returns the distance from `employee` to its root.
    #[must_use]
    pub fn depth(&self, employee: EmployeeId) -> Option<usize> {
        self.positions.get(&employee).map(|position| position.depth)
    }

    /// Returns employees without a manager.
    #[must_use]
    pub fn roots(&self) -> &[EmployeeId] {
        self.roots.as_slice()
    }

    /// Returns whether the employee is indexed.
    #[must_use]
    pub fn contains(&self, employee: EmployeeId) -> bool {
        self.positions.contains_key(&employee)
    }

    /// Returns the number of indexed employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tour.len()
    }

    /// Returns whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }
}
