use serde::{Deserialize, Serialize};

use crate::PermissionScope;

/// Structural relationship between an actor and a target employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeRelation {
    /// Actor and target are the same employee.
    pub is_own: bool,
    /// Target is a strict descendant of the actor.
    pub is_team: bool,
    /// Both have the same, present, department.
    pub is_department: bool,
    /// Both belong to the same organization.
    pub is_organization: bool,
}

impl ScopeRelation {
    /// Relation of two unrelated or unknown employees.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns whether the relation satisfies the given scope.
    #[must_use]
    pub fn satisfies(&self, scope: PermissionScope) -> bool {
        match scope {
            PermissionScope::Own => self.is_own,
            PermissionScope::Team => self.is_team,
            PermissionScope::Department => self.is_department,
            PermissionScope::Organization => self.is_organization,
        }
    }

    /// Returns whether any scope is satisfied.
    #[must_use]
    pub fn any(&self) -> bool {
        self.is_own || self.is_team || self.is_department || self.is_organization
    }
}

#[cfg(test)]
mod tests {
    use super::ScopeRelation;
    use crate::PermissionScope;

    #[test]
    fn none_satisfies_nothing() {
        let relation = ScopeRelation::none();
        assert!(!relation.any());
        assert!(
            PermissionScope::all()
                .iter()
                .all(|scope| !relation.satisfies(*scope))
        );
    }

    #[test]
    fn flags_map_to_scopes() {
        let relation = ScopeRelation {
            is_team: true,
            is_organization: true,
            ..ScopeRelation::none()
        };
        assert!(relation.satisfies(PermissionScope::Team));
        assert!(relation.satisfies(PermissionScope::Organization));
        assert!(!relation.satisfies(PermissionScope::Own));
        assert!(!relation.satisfies(PermissionScope::Department));
    }
}
