use std::collections::HashMap;
use std::hash::Hash;

/// Proof that a request was started for `key`. Only the newest ticket for a
/// key may apply its response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket<K = ()> {
    pub key: K,
    pub generation: u64,
}

/// Per-key monotonically increasing request counters.
#[derive(Clone, Debug)]
pub struct Generations<K> {
    latest: HashMap<K, u64>,
}

impl<K: Copy + Eq + Hash> Generations<K> {
    pub fn new() -> Self {
        Self { latest: HashMap::new() }
    }

    pub fn begin(&mut self, key: K) -> Ticket<K> {
        let counter = self.latest.entry(key).or_insert(0);
        *counter += 1;
        Ticket { key, generation: *counter }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.latest.get(&ticket.key) == Some(&ticket.generation)
    }

    pub fn latest(&self, key: K) -> u64 {
        self.latest.get(&key).copied().unwrap_or(0)
    }
}

impl<K: Copy + Eq + Hash> Default for Generations<K> {
    fn default() -> Self {
        Self::new()
    }
}
