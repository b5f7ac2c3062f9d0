//! Pluggable inference performed after each tentative assignment.
//!
//! The search engine calls its [`InferencePolicy`] once per consistent
//! candidate value. A policy either reports failure, leaving the store's
//! domains exactly as it found them, or returns an [`InferenceRecord`] of
//! every value it removed so the caller can undo the pruning additively on
//! backtrack.

use im::{HashMap, HashSet};

use crate::solver::{
    propagation,
    stats::SearchStats,
    store::{ConstraintStore, DomainSnapshot},
    value::{Value, VariableKey},
};

/// The per-variable set of values an inference step removed from the live
/// domains.
///
/// Undoing the record adds the removed values back, which restores the
/// pre-inference domains exactly: propagation only ever removes values, so
/// the old domain is precisely the live domain united with the removals.
#[derive(Debug, Clone)]
pub struct InferenceRecord<K: VariableKey, V: Value> {
    removed: HashMap<K, HashSet<V>>,
}

impl<K: VariableKey, V: Value> InferenceRecord<K, V> {
    pub fn new() -> Self {
        Self {
            removed: HashMap::new(),
        }
    }

    /// The removals implied by going from `before` to the store's current
    /// domains.
    pub fn diff(before: &DomainSnapshot<K, V>, store: &ConstraintStore<K, V>) -> Self {
        let mut removed = HashMap::new();
        for (variable, old_domain) in before.domains() {
            let gone = old_domain
                .clone()
                .relative_complement(store.domain_of(variable).clone());
            if !gone.is_empty() {
                removed.insert(variable.clone(), gone);
            }
        }
        Self { removed }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    /// The values removed from `variable`'s domain, if any.
    pub fn removed_from(&self, variable: &K) -> Option<&HashSet<V>> {
        self.removed.get(variable)
    }

    /// Adds every recorded removal back to the live domains.
    pub fn undo(&self, store: &mut ConstraintStore<K, V>) {
        for (variable, values) in &self.removed {
            let restored = store.domain_of(variable).clone().union(values.clone());
            store.set_domain(variable, restored);
        }
    }
}

impl<K: VariableKey, V: Value> Default for InferenceRecord<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A strategy run after each tentative assignment to prune domains before
/// recursing.
///
/// Contract: on success the returned record accounts for *every* domain
/// mutation the policy made; on failure (`None`) the store's domains are
/// already restored to their pre-call state.
pub trait InferencePolicy<K: VariableKey, V: Value>: std::fmt::Debug {
    fn infer(
        &self,
        store: &mut ConstraintStore<K, V>,
        variable: &K,
        value: &V,
        stats: &mut SearchStats,
    ) -> Option<InferenceRecord<K, V>>;
}

/// Performs no propagation: every assignment "succeeds" with an empty record.
///
/// With this policy the search degenerates to plain chronological
/// backtracking, relying solely on the consistency check against already
/// assigned variables.
#[derive(Debug)]
pub struct NoInference;

impl<K: VariableKey, V: Value> InferencePolicy<K, V> for NoInference {
    fn infer(
        &self,
        _store: &mut ConstraintStore<K, V>,
        _variable: &K,
        _value: &V,
        _stats: &mut SearchStats,
    ) -> Option<InferenceRecord<K, V>> {
        Some(InferenceRecord::new())
    }
}

/// Forces the assigned variable's domain to the chosen singleton and runs
/// full arc consistency.
///
/// On success the record holds exactly the values propagation removed,
/// including the trimming of the assigned variable itself. On failure the
/// pre-inference snapshot is restored before reporting.
#[derive(Debug)]
pub struct PropagateAssignments;

impl<K: VariableKey, V: Value> InferencePolicy<K, V> for PropagateAssignments {
    fn infer(
        &self,
        store: &mut ConstraintStore<K, V>,
        variable: &K,
        value: &V,
        stats: &mut SearchStats,
    ) -> Option<InferenceRecord<K, V>> {
        let before = store.snapshot_domains();
        store.set_domain(variable, im::hashset! { value.clone() });

        if propagation::enforce(store, stats) {
            Some(InferenceRecord::diff(&before, store))
        } else {
            store.restore_domains(before);
            None
        }
    }
}
