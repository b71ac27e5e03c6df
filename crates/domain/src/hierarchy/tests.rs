use proptest::prelude::*;
use scopegate_core::{AppError, EmployeeId};

use super::HierarchyIndex;

fn forest(parents: &[(bool, prop::sample::Index)]) -> Vec<(EmployeeId, Option<EmployeeId>)> {
    let ids: Vec<EmployeeId> = (0..parents.len()).map(|_| EmployeeId::new()).collect();
    parents
        .iter()
        .enumerate()
        .map(|(position, (is_root, parent))| {
            let manager = if position == 0 || *is_root {
                None
            } else {
                Some(ids[parent.index(position)])
            };
            (ids[position], manager)
        })
        .collect()
}

fn is_descendant_by_walking(
    edges: &[(EmployeeId, Option<EmployeeId>)],
    ancestor: EmployeeId,
    candidate: EmployeeId,
) -> bool {
    let manager_of = |employee: EmployeeId| {
        edges
            .iter()
            .find(|(id, _)| *id == employee)
            .and_then(|(_, manager)| *manager)
    };

    let mut current = manager_of(candidate);
    while let Some(manager) = current {
        if manager == ancestor {
            return true;
        }
        current = manager_of(manager);
    }
    false
}

fn parents_strategy() -> impl Strategy<Value = Vec<(bool, prop::sample::Index)>> {
    prop::collection::vec((prop::bool::weighted(0.15), any::<prop::sample::Index>()), 1..40)
}

proptest! {
    #[test]
    fn descendant_checks_match_chain_walk(parents in parents_strategy()) {
        let edges = forest(&parents);
        let index = HierarchyIndex::build(edges.clone());
        prop_assert!(index.is_ok());
        let index = index.unwrap_or_default();

        for (ancestor, _) in &edges {
            for (candidate, _) in &edges {
                prop_assert_eq!(
                    index.is_descendant(*ancestor, *candidate),
                    is_descendant_by_walking(&edges, *ancestor, *candidate)
                );
            }
        }
    }

    #[test]
    fn descendants_slice_matches_predicate(parents in parents_strategy()) {
        let edges = forest(&parents);
        let index = HierarchyIndex::build(edges.clone()).unwrap_or_default();

        for (ancestor, _) in &edges {
            let expected = edges
                .iter()
                .filter(|(candidate, _)| index.is_descendant(*ancestor, *candidate))
                .count();
            prop_assert_eq!(index.descendants(*ancestor).len(), expected);
        }
        prop_assert_eq!(index.len(), edges.len());
    }

    #[test]
    fn reparenting_under_a_descendant_is_rejected(
        parents in parents_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let edges = forest(&parents);
        let index = HierarchyIndex::build(edges.clone()).unwrap_or_default();
        let (employee, _) = edges[pick.index(edges.len())];

        prop_assert!(index.would_create_cycle(employee, Some(employee)));

        if let Some(&descendant) = index.descendants(employee).first() {
            prop_assert!(index.would_create_cycle(employee, Some(descendant)));

            let rewired: Vec<_> = edges
                .iter()
                .map(|(id, manager)| {
                    if *id == employee { (*id, Some(descendant)) } else { (*id, *manager) }
                })
                .collect();
            prop_assert!(matches!(
                HierarchyIndex::build(rewired),
                Err(AppError::CycleDetected(_))
            ));
        }
    }
}

#[test]
fn strict_descendant_excludes_self_and_ancestors() {
    let ceo = EmployeeId::new();
    let lead = EmployeeId::new();
    let engineer = EmployeeId::new();
    let index = HierarchyIndex::build([(ceo, None), (lead, Some(ceo)), (engineer, Some(lead))])
        .unwrap_or_else(|_| unreachable!());

    assert!(index.is_descendant(ceo, engineer));
    assert!(index.is_descendant(lead, engineer));
    assert!(!index.is_descendant(engineer, engineer));
    assert!(!index.is_descendant(engineer, ceo));
    assert_eq!(index.roots(), &[ceo]);
    assert_eq!(index.direct_reports(ceo), &[lead]);
    assert_eq!(index.manager_of(engineer), Some(lead));
    assert_eq!(index.depth(engineer), Some(2));
}

#[test]
fn unknown_employees_are_never_descendants() {
    let root = EmployeeId::new();
    let index = HierarchyIndex::build([(root, None)]).unwrap_or_else(|_| unreachable!());

    assert!(!index.is_descendant(root, EmployeeId::new()));
    assert!(!index.is_descendant(EmployeeId::new(), root));
    assert!(index.descendants(EmployeeId::new()).is_empty());
}

#[test]
fn two_node_cycle_is_detected() {
    let first = EmployeeId::new();
    let second = EmployeeId::new();
    let result = HierarchyIndex::build([(first, Some(second)), (second, Some(first))]);

    assert!(matches!(result, Err(AppError::CycleDetected(_))));
}

#[test]
fn self_report_is_a_cycle() {
    let employee = EmployeeId::new();
    let result = HierarchyIndex::build([(employee, Some(employee))]);

    assert!(matches!(result, Err(AppError::CycleDetected(_))));
}

#[test]
fn missing_manager_is_reported() {
    let result = HierarchyIndex::build([(EmployeeId::new(), Some(EmployeeId::new()))]);

    assert!(matches!(result, Err(AppError::EmployeeNotFound(_))));
}

#[test]
fn deep_chain_builds_without_recursion() {
    let ids: Vec<EmployeeId> = (0..50_000).map(|_| EmployeeId::new()).collect();
    let edges = ids
        .iter()
        .enumerate()
        .map(|(position, id)| (*id, position.checked_sub(1).map(|parent| ids[parent])));
    let index = HierarchyIndex::build(edges).unwrap_or_else(|_| unreachable!());

    assert!(index.is_descendant(ids[0], ids[49_999]));
    assert_eq!(index.descendants(ids[0]).len(), 49_999);
    assert_eq!(index.depth(ids[49_999]), Some(49_999));
}
