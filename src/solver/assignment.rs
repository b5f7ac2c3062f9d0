use serde::Serialize;

use crate::solver::value::{Value, VariableKey};

/// An insertion-ordered partial mapping from variables to concrete values.
///
/// The search engine grows and shrinks an `Assignment` strictly via [`push`]
/// and [`pop`], so the entry order is the order in which variables were
/// assigned, which makes a search trace deterministic to replay. Lookup goes
/// through a persistent index map, so consistency checks don't pay for a
/// linear scan.
///
/// [`push`]: Assignment::push
/// [`pop`]: Assignment::pop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment<K: VariableKey, V: Value> {
    entries: Vec<(K, V)>,
    #[serde(skip)]
    index: im::HashMap<K, V>,
}

impl<K: VariableKey, V: Value> Assignment<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: im::HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value assigned to `variable`, if any.
    pub fn get(&self, variable: &K) -> Option<&V> {
        self.index.get(variable)
    }

    pub fn is_assigned(&self, variable: &K) -> bool {
        self.index.contains_key(variable)
    }

    /// Records a tentative assignment.
    pub fn push(&mut self, variable: K, value: V) {
        self.index.insert(variable.clone(), value.clone());
        self.entries.push((variable, value));
    }

    /// Undoes the most recent assignment.
    pub fn pop(&mut self) -> Option<(K, V)> {
        let (variable, value) = self.entries.pop()?;
        self.index.remove(&variable);
        Some((variable, value))
    }

    /// Iterates entries in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.entries.iter()
    }
}

impl<K: VariableKey, V: Value> Default for Assignment<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
