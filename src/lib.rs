//! Distinto is a generic finite-domain constraint satisfaction (CSP) solver.
//!
//! Given a set of variables, a domain of candidate values per variable, and
//! binary "not-equal" edges between variable pairs, it finds a complete
//! assignment satisfying every constraint, or reports that none exists. Two
//! cooperating engines do the work:
//!
//! - **Arc consistency propagation (AC-3)** prunes domains by removing values
//!   that can never participate in a consistent solution.
//! - **Backtracking search** explores assignments depth-first, with pluggable
//!   variable selection ([`SelectFirst`] or [`MinimumRemainingValues`]) and
//!   pluggable inference ([`NoInference`] or [`PropagateAssignments`]).
//!
//! Both engines share one [`ConstraintStore`], whose snapshot/restore
//! operations enforce the search engine's undo discipline.
//!
//! # Example
//!
//! Two variables that must differ, where `b` can only be `1`, so `a` must be
//! `2`:
//!
//! ```
//! use distinto::solver::store::{all_different, ConstraintStore};
//!
//! let variables = vec!["a", "b"];
//! let domains = im::hashmap! {
//!     "a" => im::hashset! {1, 2},
//!     "b" => im::hashset! {1},
//! };
//! let edges = all_different(&variables);
//! let mut store = ConstraintStore::new(variables, domains, &edges)?;
//!
//! // Optional: shrink domains up front. Here AC-3 alone solves the problem.
//! assert!(store.arc_consistency());
//!
//! let assignment = store.backtracking_search().expect("a solution exists");
//! assert_eq!(assignment.get(&"a"), Some(&2));
//! assert_eq!(assignment.get(&"b"), Some(&1));
//! # Ok::<(), distinto::error::Error>(())
//! ```
//!
//! [`SelectFirst`]: solver::heuristics::variable::SelectFirst
//! [`MinimumRemainingValues`]: solver::heuristics::variable::MinimumRemainingValues
//! [`NoInference`]: solver::inference::NoInference
//! [`PropagateAssignments`]: solver::inference::PropagateAssignments
//! [`ConstraintStore`]: solver::store::ConstraintStore

pub mod error;
pub mod examples;
pub mod solver;
