//! Depth-first backtracking search with pluggable variable selection and
//! inference.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    heuristics::variable::{MinimumRemainingValues, SelectFirst, VariableSelection},
    inference::{InferencePolicy, NoInference, PropagateAssignments},
    stats::SearchStats,
    store::ConstraintStore,
    value::{Value, VariableKey},
};

/// A handle for abandoning a running search from outside.
///
/// The search engine polls the token at each variable-selection step; once
/// cancelled, the search unwinds and reports no solution, with
/// [`SearchStats::cancelled`] set so callers can tell the outcome apart from
/// genuine exhaustion.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The backtracking search engine.
///
/// Explores the assignment space depth-first: select an unassigned variable,
/// try each of its live values in turn, check each candidate against the
/// already-assigned variables, run the inference policy, and recurse. The
/// first complete assignment found is returned; a branch that exhausts its
/// candidates fails after undoing every speculative domain mutation, so
/// sibling branches always observe the domains they started from.
#[derive(Debug)]
pub struct BacktrackingSearch<K: VariableKey, V: Value> {
    selection: Box<dyn VariableSelection<K, V>>,
    inference: Box<dyn InferencePolicy<K, V>>,
    cancellation: Option<CancellationToken>,
}

impl<K: VariableKey, V: Value> BacktrackingSearch<K, V> {
    pub fn new(
        selection: Box<dyn VariableSelection<K, V>>,
        inference: Box<dyn InferencePolicy<K, V>>,
    ) -> Self {
        Self {
            selection,
            inference,
            cancellation: None,
        }
    }

    /// Plain chronological backtracking: first unassigned variable, no
    /// propagation between assignments.
    pub fn chronological() -> Self {
        Self::new(Box::new(SelectFirst), Box::new(NoInference))
    }

    /// The reference configuration: minimum-remaining-values selection with
    /// full arc-consistency inference after each assignment.
    pub fn mrv_with_propagation() -> Self {
        Self::new(Box::new(MinimumRemainingValues), Box::new(PropagateAssignments))
    }

    /// Installs a cancellation token polled at each selection step.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Searches for a complete, constraint-satisfying assignment.
    ///
    /// Returns `None` when the problem has no solution (or the search was
    /// cancelled; see [`SearchStats::cancelled`]). On failure the store's
    /// domains are exactly as they were on entry; on success they are left
    /// in their final pruned state.
    pub fn solve(&self, store: &mut ConstraintStore<K, V>) -> (Option<Assignment<K, V>>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut assignment = Assignment::new();
        let found = self.backtrack(store, &mut assignment, &mut stats);
        if found {
            debug!(
                nodes = stats.nodes_visited,
                backtracks = stats.backtracks,
                "search found a complete assignment"
            );
            (Some(assignment), stats)
        } else {
            (None, stats)
        }
    }

    fn backtrack(
        &self,
        store: &mut ConstraintStore<K, V>,
        assignment: &mut Assignment<K, V>,
        stats: &mut SearchStats,
    ) -> bool {
        stats.nodes_visited += 1;

        if assignment.len() == store.variable_count() {
            return true;
        }

        if let Some(token) = &self.cancellation {
            if token.is_cancelled() {
                stats.cancelled = true;
                return false;
            }
        }

        let Some(variable) = self.selection.select(store, assignment) else {
            return false;
        };

        // The domain mutates during the loop, so iterate over a snapshot of
        // the candidates taken up front.
        let candidates: Vec<V> = store.domain_of(&variable).iter().cloned().collect();
        for value in candidates {
            if !is_consistent(store, &variable, &value, assignment) {
                continue;
            }

            assignment.push(variable.clone(), value.clone());
            if let Some(record) = self.inference.infer(store, &variable, &value, stats) {
                if self.backtrack(store, assignment, stats) {
                    return true;
                }
                record.undo(store);
            }
            assignment.pop();
        }

        stats.backtracks += 1;
        false
    }
}

/// Whether assigning `value` to `variable` conflicts with any variable
/// already in the assignment.
///
/// A lookahead-free local check: it consults only the constraint relation,
/// never the live domains.
fn is_consistent<K: VariableKey, V: Value>(
    store: &ConstraintStore<K, V>,
    variable: &K,
    value: &V,
    assignment: &Assignment<K, V>,
) -> bool {
    assignment.iter().all(|(assigned, assigned_value)| {
        store.is_compatible(variable, value, assigned, assigned_value)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::solver::store::all_different;

    fn inequality_store(
        variables: Vec<&'static str>,
        domains: im::HashMap<&'static str, im::HashSet<i32>>,
        edges: &[(&'static str, &'static str)],
    ) -> ConstraintStore<&'static str, i32> {
        ConstraintStore::new(variables, domains, edges).unwrap()
    }

    fn assert_sound(store: &ConstraintStore<&'static str, i32>, assignment: &Assignment<&'static str, i32>) {
        let keys: Vec<_> = store.constraint_keys().cloned().collect();
        for (a, b) in keys {
            let value_a = assignment.get(&a).unwrap();
            let value_b = assignment.get(&b).unwrap();
            assert!(store.is_compatible(&a, value_a, &b, value_b));
        }
    }

    #[test]
    fn two_variables_one_inequality() {
        for search in [
            BacktrackingSearch::chronological(),
            BacktrackingSearch::mrv_with_propagation(),
        ] {
            let domains = im::hashmap! {
                "a" => im::hashset! {1, 2},
                "b" => im::hashset! {1, 2},
            };
            let mut store = inequality_store(vec!["a", "b"], domains, &[("a", "b")]);

            let (solution, stats) = search.solve(&mut store);
            let assignment = solution.unwrap();
            assert_eq!(assignment.len(), 2);
            assert_ne!(assignment.get(&"a"), assignment.get(&"b"));
            assert_sound(&store, &assignment);
            assert!(stats.nodes_visited > 0);
        }
    }

    #[test]
    fn pigeonhole_three_into_two_has_no_solution() {
        for search in [
            BacktrackingSearch::chronological(),
            BacktrackingSearch::mrv_with_propagation(),
        ] {
            let domains = im::hashmap! {
                "a" => im::hashset! {1, 2},
                "b" => im::hashset! {1, 2},
                "c" => im::hashset! {1, 2},
            };
            let variables = vec!["a", "b", "c"];
            let edges = all_different(&variables);
            let mut store = inequality_store(variables, domains, &edges);
            let before = store.domains().clone();

            let (solution, stats) = search.solve(&mut store);
            assert!(solution.is_none());
            assert!(stats.backtracks > 0);
            // A fully unwound failure leaves the domains untouched.
            assert_eq!(store.domains(), &before);
        }
    }

    #[test]
    fn zero_variables_succeed_immediately() {
        let mut store: ConstraintStore<&str, i32> =
            ConstraintStore::new(vec![], im::HashMap::new(), &[]).unwrap();

        let (solution, stats) = BacktrackingSearch::mrv_with_propagation().solve(&mut store);
        let assignment = solution.unwrap();
        assert!(assignment.is_empty());
        assert_eq!(stats.nodes_visited, 1);
    }

    #[test]
    fn empty_initial_domain_fails() {
        let domains = im::hashmap! {
            "a" => im::HashSet::<i32>::new(),
            "b" => im::hashset! {1},
        };
        let mut store = inequality_store(vec!["a", "b"], domains, &[("a", "b")]);

        assert!(!store.clone().arc_consistency());
        let (solution, _stats) = BacktrackingSearch::chronological().solve(&mut store);
        assert!(solution.is_none());
    }

    #[test]
    fn default_store_entry_point_uses_the_reference_configuration() {
        let domains = im::hashmap! {
            "a" => im::hashset! {1, 2},
            "b" => im::hashset! {1},
        };
        let mut store = inequality_store(vec!["a", "b"], domains, &[("a", "b")]);

        let assignment = store.backtracking_search().unwrap();
        assert_eq!(assignment.get(&"a"), Some(&2));
        assert_eq!(assignment.get(&"b"), Some(&1));
    }

    #[test]
    fn cancelled_search_reports_via_stats() {
        let domains = im::hashmap! {
            "a" => im::hashset! {1, 2},
            "b" => im::hashset! {1, 2},
        };
        let mut store = inequality_store(vec!["a", "b"], domains, &[("a", "b")]);

        let token = CancellationToken::new();
        token.cancel();
        let search = BacktrackingSearch::chronological().with_cancellation(token);

        let (solution, stats) = search.solve(&mut store);
        assert!(solution.is_none());
        assert!(stats.cancelled);
    }

    // Brute-force satisfiability of an inequality CSP, for cross-checking
    // the solver on randomized small instances.
    fn brute_force_satisfiable(
        variables: &[u32],
        domains: &im::HashMap<u32, im::HashSet<u8>>,
        edges: &[(u32, u32)],
    ) -> bool {
        fn extend(
            variables: &[u32],
            domains: &im::HashMap<u32, im::HashSet<u8>>,
            edges: &[(u32, u32)],
            chosen: &mut Vec<(u32, u8)>,
        ) -> bool {
            let Some(variable) = variables.get(chosen.len()).copied() else {
                return true;
            };
            for value in domains.get(&variable).unwrap() {
                let ok = edges.iter().all(|(a, b)| {
                    let other = if *a == variable {
                        Some(b)
                    } else if *b == variable {
                        Some(a)
                    } else {
                        None
                    };
                    match other.and_then(|o| chosen.iter().find(|(v, _)| v == o)) {
                        Some((_, other_value)) => other_value != value,
                        None => true,
                    }
                });
                if ok {
                    chosen.push((variable, *value));
                    if extend(variables, domains, edges, chosen) {
                        return true;
                    }
                    chosen.pop();
                }
            }
            false
        }
        extend(variables, domains, edges, &mut Vec::new())
    }

    proptest! {
        // Randomized small CSPs: the solver agrees with brute force on
        // satisfiability, returns only sound assignments, and restores the
        // domains exactly whenever it fails.
        #[test]
        fn search_matches_brute_force_on_small_csps(
            raw_domains in prop::collection::vec(
                prop::collection::btree_set(0u8..4, 0..=4usize),
                4,
            ),
            edge_mask in prop::collection::vec(any::<bool>(), 6),
        ) {
            let variables: Vec<u32> = (0..4).collect();
            let mut domains = im::HashMap::new();
            for (variable, values) in variables.iter().zip(&raw_domains) {
                domains.insert(*variable, values.iter().copied().collect::<im::HashSet<u8>>());
            }

            let all_edges = all_different(&variables);
            let edges: Vec<(u32, u32)> = all_edges
                .into_iter()
                .zip(&edge_mask)
                .filter(|(_, keep)| **keep)
                .map(|(edge, _)| edge)
                .collect();

            let mut store = ConstraintStore::new(variables.clone(), domains.clone(), &edges).unwrap();
            let before = store.domains().clone();
            let expected = brute_force_satisfiable(&variables, &domains, &edges);

            let (solution, _stats) = BacktrackingSearch::mrv_with_propagation().solve(&mut store);
            prop_assert_eq!(solution.is_some(), expected);

            match solution {
                Some(assignment) => {
                    prop_assert_eq!(assignment.len(), variables.len());
                    for (a, b) in &edges {
                        prop_assert_ne!(assignment.get(a).unwrap(), assignment.get(b).unwrap());
                    }
                    // Returned values come from the original domains.
                    for (variable, value) in assignment.iter() {
                        prop_assert!(domains.get(variable).unwrap().contains(value));
                    }
                }
                None => {
                    // Restore exactness: failure leaves no trace.
                    prop_assert_eq!(store.domains(), &before);
                }
            }
        }

        #[test]
        fn chronological_search_agrees_with_the_reference_configuration(
            raw_domains in prop::collection::vec(
                prop::collection::btree_set(0u8..3, 0..=3usize),
                3,
            ),
        ) {
            let variables: Vec<u32> = (0..3).collect();
            let mut domains = im::HashMap::new();
            for (variable, values) in variables.iter().zip(&raw_domains) {
                domains.insert(*variable, values.iter().copied().collect::<im::HashSet<u8>>());
            }
            let edges = all_different(&variables);

            let mut chronological_store =
                ConstraintStore::new(variables.clone(), domains.clone(), &edges).unwrap();
            let mut reference_store = ConstraintStore::new(variables, domains, &edges).unwrap();

            let (chronological, _) =
                BacktrackingSearch::chronological().solve(&mut chronological_store);
            let (reference, _) =
                BacktrackingSearch::mrv_with_propagation().solve(&mut reference_store);

            prop_assert_eq!(chronological.is_some(), reference.is_some());
        }
    }
}
