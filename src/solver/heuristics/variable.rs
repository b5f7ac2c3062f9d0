//! Strategies for selecting which unassigned variable to branch on next.

use crate::solver::{
    assignment::Assignment,
    store::ConstraintStore,
    value::{Value, VariableKey},
};

/// A variable-selection heuristic.
///
/// Implementors choose the next unassigned variable the search engine should
/// branch on. Both provided strategies break ties by declaration order, so a
/// given problem always produces the same search tree.
pub trait VariableSelection<K: VariableKey, V: Value>: std::fmt::Debug {
    /// Selects the next variable to assign, or `None` when every variable is
    /// already assigned.
    fn select(&self, store: &ConstraintStore<K, V>, assignment: &Assignment<K, V>) -> Option<K>;
}

/// Selects the first unassigned variable in declaration order.
#[derive(Debug)]
pub struct SelectFirst;

impl<K: VariableKey, V: Value> VariableSelection<K, V> for SelectFirst {
    fn select(&self, store: &ConstraintStore<K, V>, assignment: &Assignment<K, V>) -> Option<K> {
        store
            .variables()
            .iter()
            .find(|variable| !assignment.is_assigned(variable))
            .cloned()
    }
}

/// Selects the unassigned variable with the fewest values left in its live
/// domain (minimum remaining values).
///
/// A fail-first strategy: branching on the most constrained variable first
/// tends to surface dead ends early. Ties go to the earliest-declared
/// variable.
#[derive(Debug)]
pub struct MinimumRemainingValues;

impl<K: VariableKey, V: Value> VariableSelection<K, V> for MinimumRemainingValues {
    fn select(&self, store: &ConstraintStore<K, V>, assignment: &Assignment<K, V>) -> Option<K> {
        store
            .variables()
            .iter()
            .filter(|variable| !assignment.is_assigned(variable))
            .min_by_key(|variable| store.domain_of(variable).len())
            .cloned()
    }
}
