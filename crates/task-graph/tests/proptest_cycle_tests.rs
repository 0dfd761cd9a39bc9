//! Property-based tests for cycle detection invariants.
//!
//! These tests verify the behavioral contracts of dependency analysis:
//! - Acyclic graphs are reported clean and cyclic graphs are not
//! - Every reported cycle is a closed walk over declared dependencies
//! - Dangling references never change detection results
//! - Detection is deterministic for a given construction order

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use tasklens_graph::{DependencyGraph, Error, TaskNode};

// =============================================================================
// Test Task Type
// =============================================================================

/// Simple task type for property testing.
#[derive(Clone, Debug)]
struct PropTask {
    deps: Vec<String>,
}

impl TaskNode for PropTask {
    fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.deps.iter().map(String::as_str)
    }
}

impl PropTask {
    fn new(deps: Vec<String>) -> Self {
        Self { deps }
    }
}

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Generate a valid task identifier (lowercase alphanumeric with underscores).
fn task_id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}".prop_map(String::from)
}

/// Generate a DAG (directed acyclic graph) with a specified number of tasks.
///
/// The strategy ensures no cycles by only allowing dependencies on tasks
/// with lower indices (tasks added earlier in the sequence).
fn dag_strategy(
    min_tasks: usize,
    max_tasks: usize,
) -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    (min_tasks..=max_tasks).prop_flat_map(|task_count| {
        proptest::collection::vec(task_id_strategy(), task_count).prop_flat_map(move |ids| {
            // Suffix with the position to make the generated identifiers unique
            let unique_ids: Vec<String> = ids
                .into_iter()
                .enumerate()
                .map(|(i, id)| format!("{id}_{i}"))
                .collect();

            // Each task may only depend on tasks at lower positions, capped
            // at three deps so graphs stay small
            let dep_strategies: Vec<_> = (0..task_count)
                .map(|i| {
                    if i == 0 {
                        Just(vec![]).boxed()
                    } else {
                        let earlier_ids: Vec<String> = unique_ids[..i].to_vec();
                        proptest::collection::vec(
                            proptest::sample::select(earlier_ids),
                            0..=i.min(3),
                        )
                        .prop_map(|deps| {
                            deps.into_iter()
                                .collect::<HashSet<_>>()
                                .into_iter()
                                .collect()
                        })
                        .boxed()
                    }
                })
                .collect();

            let ids_clone = unique_ids.clone();
            dep_strategies
                .into_iter()
                .collect::<Vec<_>>()
                .prop_map(move |all_deps| {
                    ids_clone
                        .iter()
                        .cloned()
                        .zip(all_deps)
                        .collect::<Vec<_>>()
                })
        })
    })
}

/// Generate a graph that definitely contains a cycle.
fn cyclic_graph_strategy() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    // Generate a chain of tasks and close it into a ring
    (3..=6_usize).prop_flat_map(|task_count| {
        proptest::collection::vec(task_id_strategy(), task_count).prop_map(move |ids| {
            let unique_ids: Vec<String> = ids
                .into_iter()
                .enumerate()
                .map(|(i, id)| format!("{id}_{i}"))
                .collect();

            let mut tasks: Vec<(String, Vec<String>)> = Vec::new();
            for i in 0..task_count {
                let deps = if i == 0 {
                    // First task depends on last (closes the ring)
                    vec![unique_ids[task_count - 1].clone()]
                } else {
                    // Each task depends on the previous
                    vec![unique_ids[i - 1].clone()]
                };
                tasks.push((unique_ids[i].clone(), deps));
            }

            tasks
        })
    })
}

/// Generate either an acyclic or a cyclic graph.
fn any_graph_strategy() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop_oneof![dag_strategy(1, 12).boxed(), cyclic_graph_strategy().boxed()]
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a `DependencyGraph` from a list of (id, dependencies) pairs.
fn build_graph(tasks: &[(String, Vec<String>)]) -> Result<DependencyGraph<PropTask>, Error> {
    DependencyGraph::from_tasks(
        tasks
            .iter()
            .map(|(id, deps)| (id.clone(), PropTask::new(deps.clone()))),
    )
}

/// Append a dependency on a task identifier that can never exist. Generated
/// identifiers never contain a hyphen, so the reference stays dangling.
fn inject_dangling(tasks: &[(String, Vec<String>)], picks: &[bool]) -> Vec<(String, Vec<String>)> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, (id, deps))| {
            let mut deps = deps.clone();
            if picks.get(i).copied().unwrap_or(false) {
                deps.push(format!("missing-{i}"));
            }
            (id.clone(), deps)
        })
        .collect()
}

// =============================================================================
// Property Tests: Detection Accuracy
// =============================================================================

proptest! {
    /// Contract: Acyclic graphs are correctly identified as having no cycles.
    #[test]
    fn cycle_detection_identifies_dags(
        tasks in dag_strategy(1, 15)
    ) {
        let graph = build_graph(&tasks).expect("Graph should build successfully");

        prop_assert!(!graph.has_cycle(), "DAG should be identified as acyclic");
        prop_assert!(graph.cycles().is_empty(), "DAG should produce no cycles");
        prop_assert!(graph.validate().is_valid, "DAG should validate cleanly");
    }

    /// Contract: Cyclic graphs are correctly identified as having cycles.
    #[test]
    fn cycle_detection_identifies_cycles(
        tasks in cyclic_graph_strategy()
    ) {
        let graph = build_graph(&tasks).expect("Graph should build successfully");

        prop_assert!(graph.has_cycle(), "Ring should be identified as cyclic");
        prop_assert!(!graph.cycles().is_empty(), "Ring should produce a cycle");
        prop_assert!(!graph.validate().is_valid, "Ring should fail validation");
    }

    /// Contract: The boolean check agrees with enumeration on every graph.
    #[test]
    fn boolean_check_agrees_with_enumeration(
        tasks in any_graph_strategy()
    ) {
        let graph = build_graph(&tasks).expect("Graph should build successfully");

        prop_assert_eq!(
            graph.has_cycle(),
            !graph.cycles().is_empty(),
            "has_cycle and cycles must agree"
        );
    }
}

// =============================================================================
// Property Tests: Cycle Structure
// =============================================================================

proptest! {
    /// Contract: Every reported cycle is a closed walk over declared
    /// dependencies, and every member is a known task.
    #[test]
    fn reported_cycles_are_closed_walks(
        tasks in any_graph_strategy()
    ) {
        let graph = build_graph(&tasks).expect("Graph should build successfully");

        let declared: HashMap<String, HashSet<String>> = tasks
            .iter()
            .map(|(id, deps)| (id.clone(), deps.iter().cloned().collect()))
            .collect();

        for cycle in graph.cycles() {
            prop_assert!(!cycle.path.is_empty(), "Cycle path should be nonempty");

            for (i, member) in cycle.path.iter().enumerate() {
                prop_assert!(
                    graph.contains_task(member),
                    "Cycle member '{}' should be a known task",
                    member
                );

                let next = &cycle.path[(i + 1) % cycle.path.len()];
                let deps = declared.get(member);
                prop_assert!(
                    deps.is_some_and(|d| d.contains(next)),
                    "Cycle member '{}' should declare a dependency on '{}'",
                    member,
                    next
                );
            }
        }
    }

    /// Contract: A task depending on itself is reported as a one-task cycle.
    #[test]
    fn self_loop_reported_as_single_member_cycle(id in task_id_strategy()) {
        let tasks = vec![(id.clone(), vec![id.clone()])];
        let graph = build_graph(&tasks).expect("Graph should build successfully");

        let cycles = graph.cycles();
        prop_assert_eq!(cycles.len(), 1);
        prop_assert!(cycles[0].is_self_loop());
        prop_assert_eq!(cycles[0].path.clone(), vec![id]);
    }
}

// =============================================================================
// Property Tests: Dangling References
// =============================================================================

proptest! {
    /// Contract: Dependencies on unknown tasks are recorded but never change
    /// detection results.
    #[test]
    fn dangling_injection_preserves_cycles(
        tasks in any_graph_strategy(),
        picks in proptest::collection::vec(any::<bool>(), 0..16)
    ) {
        let plain = build_graph(&tasks).expect("Graph should build successfully");
        let noisy = build_graph(&inject_dangling(&tasks, &picks))
            .expect("Graph should build successfully");

        prop_assert_eq!(plain.has_cycle(), noisy.has_cycle());
        prop_assert_eq!(plain.cycles(), noisy.cycles());

        let injected = picks.iter().take(tasks.len()).filter(|p| **p).count();
        prop_assert_eq!(noisy.dangling_dependencies().len(), injected);
    }
}

// =============================================================================
// Property Tests: Construction
// =============================================================================

proptest! {
    /// Contract: Empty graph operations succeed.
    #[test]
    fn empty_graph_operations_succeed(_seed in 0..100_u32) {
        let graph: DependencyGraph<PropTask> = DependencyGraph::new();

        prop_assert!(!graph.has_cycle(), "Empty graph has no cycles");
        prop_assert!(graph.cycles().is_empty(), "Empty graph enumerates nothing");
        prop_assert!(graph.validate().is_valid, "Empty graph validates cleanly");
    }

    /// Contract: Graph task count matches input.
    #[test]
    fn task_count_matches_input(tasks in dag_strategy(1, 20)) {
        let graph = build_graph(&tasks).expect("Graph should build");
        prop_assert_eq!(
            graph.task_count(),
            tasks.len(),
            "Task count should match number of unique tasks added"
        );
    }

    /// Contract: Duplicate task identifiers are rejected at construction.
    #[test]
    fn duplicate_ids_rejected(id in task_id_strategy()) {
        let tasks = vec![
            (id.clone(), vec![]),
            (id.clone(), vec![]),
        ];

        let result = build_graph(&tasks);
        prop_assert_eq!(result.err(), Some(Error::DuplicateTask { id }));
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

proptest! {
    /// Contract: Detection is deterministic for the same construction order.
    #[test]
    fn cycle_detection_is_deterministic(tasks in any_graph_strategy()) {
        let graph1 = build_graph(&tasks).expect("Graph 1 should build");
        let graph2 = build_graph(&tasks).expect("Graph 2 should build");

        prop_assert_eq!(graph1.has_cycle(), graph2.has_cycle());
        prop_assert_eq!(graph1.cycles(), graph2.cycles());

        // Repeated calls on one graph also agree; no state is carried over.
        prop_assert_eq!(graph1.cycles(), graph1.cycles());
    }
}
