/// The base trait for any value that can appear in a variable's domain.
///
/// This establishes the minimum requirements for a value: it must be
/// cloneable, debuggable, equatable, and hashable. This is a marker trait,
/// so any type that satisfies these bounds implements `Value`. The solver
/// core stays agnostic to whether values are integers, strings, or enums.
pub trait Value: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> Value for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}

/// A marker trait for variable identifiers.
///
/// Variables are opaque to the solver; anything identity-comparable and
/// hashable works, from `&'static str` labels to numeric indices.
pub trait VariableKey: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> VariableKey for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
