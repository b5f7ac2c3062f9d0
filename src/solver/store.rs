use im::{HashMap, HashSet};

use crate::{
    error::{Error, Result},
    solver::{
        assignment::Assignment,
        propagation,
        search::BacktrackingSearch,
        stats::SearchStats,
        value::{Value, VariableKey},
    },
};

/// The authoritative state of a constraint satisfaction problem: variables,
/// their live domains, and a compatibility relation per constrained pair.
///
/// Both the propagation engine and the search engine read and mutate the same
/// store; the store's [`snapshot_domains`]/[`restore_domains`] pair is what
/// lets the search engine undo speculative inference exactly. Domains are
/// persistent [`im::HashSet`]s, so a snapshot is a structurally shared O(1)
/// clone rather than a deep copy.
///
/// Constraints are built once at construction time and never change. Each
/// edge `(a, b)` owns the set of *compatible* value pairs under the ordered
/// key `(a, b)`; lookups consult both key orders because only the declared
/// direction is stored.
///
/// [`snapshot_domains`]: ConstraintStore::snapshot_domains
/// [`restore_domains`]: ConstraintStore::restore_domains
#[derive(Debug, Clone)]
pub struct ConstraintStore<K: VariableKey, V: Value> {
    variables: Vec<K>,
    domains: HashMap<K, HashSet<V>>,
    constraints: HashMap<(K, K), HashSet<(V, V)>>,
}

/// A saved copy of every live domain, taken before speculative mutation.
///
/// Cheap to take and to hold: the underlying persistent maps share structure
/// with the live domains until either side diverges.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSnapshot<K: VariableKey, V: Value>(HashMap<K, HashSet<V>>);

impl<K: VariableKey, V: Value> DomainSnapshot<K, V> {
    /// The saved domain table.
    pub fn domains(&self) -> &HashMap<K, HashSet<V>> {
        &self.0
    }
}

impl<K: VariableKey, V: Value> ConstraintStore<K, V> {
    /// Builds a store from a problem definition.
    ///
    /// Each edge `(a, b)` is an inequality constraint: its compatible-pairs
    /// set contains every `(x, y)` with `x` in `a`'s initial domain, `y` in
    /// `b`'s initial domain and `x != y`, inserted in both orderings under
    /// the key `(a, b)`.
    ///
    /// Fails if an edge references an undeclared variable, or if a declared
    /// variable has no domain entry.
    pub fn new(
        variables: Vec<K>,
        domains: HashMap<K, HashSet<V>>,
        edges: &[(K, K)],
    ) -> Result<Self> {
        for variable in &variables {
            if !domains.contains_key(variable) {
                return Err(Error::MissingDomain {
                    variable: format!("{variable:?}"),
                });
            }
        }

        let declared: std::collections::HashSet<&K> = variables.iter().collect();
        let mut constraints = HashMap::new();
        for (a, b) in edges {
            for endpoint in [a, b] {
                if !declared.contains(endpoint) {
                    return Err(Error::UnknownVariable {
                        variable: format!("{endpoint:?}"),
                    });
                }
            }

            let domain_a = domains.get(a).expect("endpoints checked above");
            let domain_b = domains.get(b).expect("endpoints checked above");
            let mut pairs = HashSet::new();
            for x in domain_a.iter() {
                for y in domain_b.iter() {
                    if x != y {
                        pairs.insert((x.clone(), y.clone()));
                        pairs.insert((y.clone(), x.clone()));
                    }
                }
            }
            constraints.insert((a.clone(), b.clone()), pairs);
        }

        Ok(Self {
            variables,
            domains,
            constraints,
        })
    }

    /// The variables in declaration order.
    pub fn variables(&self) -> &[K] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// The full live domain table.
    pub fn domains(&self) -> &HashMap<K, HashSet<V>> {
        &self.domains
    }

    /// The live domain of `variable`.
    ///
    /// # Panics
    ///
    /// Panics if `variable` was not declared at construction time.
    pub fn domain_of(&self, variable: &K) -> &HashSet<V> {
        self.domains
            .get(variable)
            .expect("every declared variable has a domain")
    }

    /// Replaces the live domain of `variable`.
    pub fn set_domain(&mut self, variable: &K, domain: HashSet<V>) {
        self.domains.insert(variable.clone(), domain);
    }

    /// Saves the current domain table for later restoration.
    pub fn snapshot_domains(&self) -> DomainSnapshot<K, V> {
        DomainSnapshot(self.domains.clone())
    }

    /// Restores the domain table saved by [`snapshot_domains`].
    ///
    /// [`snapshot_domains`]: ConstraintStore::snapshot_domains
    pub fn restore_domains(&mut self, snapshot: DomainSnapshot<K, V>) {
        self.domains = snapshot.0;
    }

    /// The ordered keys present in the constraint table, one per declared
    /// edge.
    pub fn constraint_keys(&self) -> impl Iterator<Item = &(K, K)> {
        self.constraints.keys()
    }

    /// Looks up the constraint between `a` and `b`, trying the key `(a, b)`
    /// first and then `(b, a)`.
    ///
    /// The boolean is `true` when the match was under `(a, b)`, i.e. the
    /// stored pairs are oriented `a`-value-first.
    pub fn constraint_between(&self, a: &K, b: &K) -> Option<(&HashSet<(V, V)>, bool)> {
        if let Some(pairs) = self.constraints.get(&(a.clone(), b.clone())) {
            return Some((pairs, true));
        }
        self.constraints
            .get(&(b.clone(), a.clone()))
            .map(|pairs| (pairs, false))
    }

    /// Whether assigning `value_a` to `a` and `value_b` to `b` is allowed.
    ///
    /// Checks the constraint under the key `(a, b)` first, then `(b, a)`
    /// with the value pair reversed. Returns `true` when no constraint links
    /// the two variables. This check consults only the constraint relation,
    /// never the live domains.
    pub fn is_compatible(&self, a: &K, value_a: &V, b: &K, value_b: &V) -> bool {
        match self.constraint_between(a, b) {
            Some((pairs, true)) => pairs.contains(&(value_a.clone(), value_b.clone())),
            Some((pairs, false)) => pairs.contains(&(value_b.clone(), value_a.clone())),
            None => true,
        }
    }

    /// Prunes every live domain to arc consistency.
    ///
    /// Returns `false` if some domain empties, i.e. the current domain state
    /// admits no solution. Domains are left in their reduced state either
    /// way; callers that need the original domains back must snapshot first.
    pub fn arc_consistency(&mut self) -> bool {
        let mut stats = SearchStats::default();
        propagation::enforce(self, &mut stats)
    }

    /// Searches for a complete, constraint-satisfying assignment using the
    /// reference configuration: minimum-remaining-values variable selection
    /// with full arc-consistency inference after every tentative assignment.
    ///
    /// Returns `None` when no solution exists. See [`BacktrackingSearch`]
    /// for other configurations and for search statistics.
    pub fn backtracking_search(&mut self) -> Option<Assignment<K, V>> {
        let (solution, _stats) = BacktrackingSearch::mrv_with_propagation().solve(self);
        solution
    }
}

/// Expands a group of mutually distinct variables into the edge list of all
/// unordered pairs among them, in declaration order.
///
/// This is the building block for row/column/box style groups in grid
/// puzzles: `all_different(&[a, b, c])` yields `(a, b)`, `(a, c)`, `(b, c)`.
pub fn all_different<K: VariableKey>(variables: &[K]) -> Vec<(K, K)> {
    let mut edges = Vec::new();
    for i in 0..variables.len() {
        for j in (i + 1)..variables.len() {
            edges.push((variables[i].clone(), variables[j].clone()));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    fn two_variable_store() -> ConstraintStore<&'static str, i32> {
        let domains = im::hashmap! {
            "a" => im::hashset! {1, 2},
            "b" => im::hashset! {1, 2},
        };
        ConstraintStore::new(vec!["a", "b"], domains, &[("a", "b")]).unwrap()
    }

    #[test]
    fn build_rejects_edge_with_unknown_variable() {
        let domains = im::hashmap! { "a" => im::hashset! {1} };
        let result = ConstraintStore::new(vec!["a"], domains, &[("a", "ghost")]);
        assert!(matches!(result, Err(Error::UnknownVariable { .. })));
    }

    #[test]
    fn build_rejects_variable_without_domain() {
        let domains = im::hashmap! { "a" => im::hashset! {1} };
        let result = ConstraintStore::new(vec!["a", "b"], domains, &[]);
        assert!(matches!(result, Err(Error::MissingDomain { .. })));
    }

    #[test]
    fn inequality_pairs_contain_both_orderings_and_no_equal_pair() {
        let store = two_variable_store();
        let (pairs, forward) = store.constraint_between(&"a", &"b").unwrap();
        assert!(forward);
        let expected = im::hashset! {(1, 2), (2, 1)};
        assert_eq!(pairs, &expected);
    }

    #[test]
    fn is_compatible_resolves_the_reversed_key() {
        let store = two_variable_store();
        // Only the (a, b) key exists; queries through (b, a) must still work.
        assert!(store.is_compatible(&"b", &1, &"a", &2));
        assert!(!store.is_compatible(&"b", &1, &"a", &1));
    }

    #[test]
    fn unconstrained_pairs_are_always_compatible() {
        let domains = im::hashmap! {
            "a" => im::hashset! {1},
            "b" => im::hashset! {1},
        };
        let store = ConstraintStore::new(vec!["a", "b"], domains, &[]).unwrap();
        assert!(store.is_compatible(&"a", &1, &"b", &1));
        assert!(store.constraint_between(&"a", &"b").is_none());
    }

    #[test]
    fn snapshot_restores_domains_exactly() {
        let mut store = two_variable_store();
        let snapshot = store.snapshot_domains();

        store.set_domain(&"a", im::hashset! {2});
        store.set_domain(&"b", im::hashset! {});
        assert_eq!(store.domain_of(&"a").len(), 1);

        store.restore_domains(snapshot);
        assert_eq!(store.domain_of(&"a"), &im::hashset! {1, 2});
        assert_eq!(store.domain_of(&"b"), &im::hashset! {1, 2});
    }

    #[test]
    fn all_different_yields_each_unordered_pair_once() {
        let edges = all_different(&["a", "b", "c"]);
        assert_eq!(edges, vec![("a", "b"), ("a", "c"), ("b", "c")]);

        let vars: Vec<u32> = (0..6).collect();
        assert_eq!(all_different(&vars).len(), 15); // C(6, 2)
    }

    #[test]
    fn all_different_of_singleton_or_empty_is_empty() {
        assert!(all_different(&["a"]).is_empty());
        assert!(all_different::<&str>(&[]).is_empty());
    }
}
