use std::{
    collections::{HashSet, VecDeque},
    hash::Hash,
};

/// A FIFO queue of arcs awaiting revision, with membership deduplication.
///
/// An arc that is already queued is not queued a second time; once popped it
/// may be re-added, which is what the propagation loop does when a domain
/// shrinks after the arc was last processed.
pub struct WorkList<K> {
    queue: VecDeque<(K, K)>,
    members: HashSet<(K, K)>,
}

impl<K: Clone + Eq + Hash> WorkList<K> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, from: K, to: K) {
        let arc = (from, to);
        if !self.members.contains(&arc) {
            self.members.insert(arc.clone());
            self.queue.push_back(arc);
        }
    }

    pub fn pop_front(&mut self) -> Option<(K, K)> {
        let arc = self.queue.pop_front()?;
        self.members.remove(&arc);
        Some(arc)
    }
}

impl<K: Clone + Eq + Hash> Default for WorkList<K> {
    fn default() -> Self {
        Self::new()
    }
}
