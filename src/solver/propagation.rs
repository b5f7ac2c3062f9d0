//! Arc consistency propagation (AC-3).
//!
//! Repeatedly revises arcs until every value left in a variable's domain has
//! at least one supporting value in each constrained neighbour's domain, or
//! until some domain empties. Each successful revision permanently removes at
//! least one value from a finite domain, so the loop terminates.

use tracing::debug;

use crate::solver::{
    stats::SearchStats,
    store::ConstraintStore,
    value::{Value, VariableKey},
    work_list::WorkList,
};

/// Prunes the store's domains to arc consistency.
///
/// Returns `false` as soon as a domain empties (the current domain state is
/// unsatisfiable), including when a domain is already empty on entry. Domains
/// are left in their reduced state either way.
pub fn enforce<K: VariableKey, V: Value>(
    store: &mut ConstraintStore<K, V>,
    stats: &mut SearchStats,
) -> bool {
    // An already-empty domain is a contradiction before any arc is examined.
    for variable in store.variables() {
        if store.domain_of(variable).is_empty() {
            return false;
        }
    }

    // Seed the queue with exactly the arcs present in the constraint table.
    let mut worklist = WorkList::new();
    for (a, b) in store.constraint_keys() {
        worklist.push_back(a.clone(), b.clone());
    }

    while let Some((xi, xj)) = worklist.pop_front() {
        stats.revisions += 1;

        if revise(store, &xi, &xj) {
            stats.prunings += 1;

            if store.domain_of(&xi).is_empty() {
                return false;
            }

            // The domain of xi shrank, so every arc into xi must be
            // re-checked. The arc from xj is skipped: xj was just verified
            // against the new domain.
            for (a, b) in store.constraint_keys() {
                if b == &xi && a != &xj {
                    worklist.push_back(a.clone(), xi.clone());
                } else if a == &xi && b != &xj {
                    worklist.push_back(b.clone(), xi.clone());
                }
            }
        }
    }

    debug!(revisions = stats.revisions, "arc consistency reached a fixpoint");
    true
}

/// Revises the domain of `xi` against `xj`: removes every value of `xi` that
/// has no supporting value in `xj`'s live domain.
///
/// The constraint is resolved under the key `(xi, xj)` first, then `(xj, xi)`
/// with the pair orientation flipped; when neither key exists the pair is
/// unconstrained and the domain is left alone. Returns whether any value was
/// removed.
pub fn revise<K: VariableKey, V: Value>(
    store: &mut ConstraintStore<K, V>,
    xi: &K,
    xj: &K,
) -> bool {
    let (pairs, forward) = match store.constraint_between(xi, xj) {
        Some((pairs, forward)) => (pairs.clone(), forward),
        None => return false,
    };
    let supports = store.domain_of(xj).clone();
    let current = store.domain_of(xi).clone();

    let mut retained = current.clone();
    let mut removed = false;
    for value in current.iter() {
        let supported = supports.iter().any(|support| {
            if forward {
                pairs.contains(&(value.clone(), support.clone()))
            } else {
                pairs.contains(&(support.clone(), value.clone()))
            }
        });
        if !supported {
            retained.remove(value);
            removed = true;
        }
    }

    if removed {
        store.set_domain(xi, retained);
    }
    removed
}
