//! Phase ordering over the dependency DAG

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::types::MigrationPhase;

/// Execution order as indices into `phases`.
///
/// Kahn's algorithm; among ready phases the lowest priority runs first, then
/// declaration order. Phases that can never become ready (unknown
/// dependency, cycle) are appended last in the same tie-break order so the
/// executor can report their unmet dependency.
pub fn order_phases(phases: &[MigrationPhase]) -> Vec<usize> {
    let index: HashMap<&str, usize> = phases
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();

    let mut pending = vec![0usize; phases.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); phases.len()];
    let mut blocked = vec![false; phases.len()];

    for (i, phase) in phases.iter().enumerate() {
        for dep in &phase.dependencies {
            match index.get(dep.as_str()) {
                Some(&d) if d != i => {
                    pending[i] += 1;
                    dependents[d].push(i);
                }
                _ => blocked[i] = true,
            }
        }
    }

    let key = |i: usize| Reverse((phases[i].priority, i));
    let mut ready: BinaryHeap<Reverse<(u32, usize)>> = (0..phases.len())
        .filter(|&i| pending[i] == 0 && !blocked[i])
        .map(key)
        .collect();

    let mut order = Vec::with_capacity(phases.len());
    let mut placed = vec![false; phases.len()];

    while let Some(Reverse((_, i))) = ready.pop() {
        order.push(i);
        placed[i] = true;
        for &next in &dependents[i] {
            pending[next] -= 1;
            if pending[next] == 0 && !blocked[next] {
                ready.push(key(next));
            }
        }
    }

    let mut rest: Vec<usize> = (0..phases.len()).filter(|&i| !placed[i]).collect();
    rest.sort_by_key(|&i| (phases[i].priority, i));
    order.extend(rest);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(phases: &[MigrationPhase]) -> Vec<&str> {
        order_phases(phases)
            .into_iter()
            .map(|i| phases[i].id.as_str())
            .collect()
    }

    #[test]
    fn test_dependency_runs_first() {
        let phases = vec![
            MigrationPhase::new("B", "second").depends_on("A"),
            MigrationPhase::new("A", "first"),
        ];
        assert_eq!(ids(&phases), vec!["A", "B"]);
    }

    #[test]
    fn test_priority_breaks_ties() {
        let phases = vec![
            MigrationPhase::new("late", "").priority(5),
            MigrationPhase::new("early", "").priority(1),
            MigrationPhase::new("also-early", "").priority(1),
        ];
        assert_eq!(ids(&phases), vec!["early", "also-early", "late"]);
    }

    #[test]
    fn test_priority_never_overrides_dependencies() {
        let phases = vec![
            MigrationPhase::new("setup", "").priority(9),
            MigrationPhase::new("use", "").priority(0).depends_on("setup"),
        ];
        assert_eq!(ids(&phases), vec!["setup", "use"]);
    }

    #[test]
    fn test_unresolvable_phases_go_last() {
        let phases = vec![
            MigrationPhase::new("orphan", "").depends_on("missing"),
            MigrationPhase::new("x", "").depends_on("y"),
            MigrationPhase::new("y", "").depends_on("x"),
            MigrationPhase::new("ok", "").priority(3),
        ];
        assert_eq!(ids(&phases), vec!["ok", "orphan", "x", "y"]);
    }

    #[test]
    fn test_dependents_of_blocked_phase_are_blocked() {
        let phases = vec![
            MigrationPhase::new("a", "").depends_on("ghost"),
            MigrationPhase::new("b", "").depends_on("a"),
        ];
        assert_eq!(ids(&phases), vec!["a", "b"]);
    }
}
