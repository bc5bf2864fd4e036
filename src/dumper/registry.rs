//! Identity registry
//!
//! Maps instance identity to the sequence number it was given during one
//! dump. Numbers start at 1 and follow first-visit order; an arena of
//! identities indexed by `id - 1` backs a hash index for lookups.

use super::describe::Identity;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct IdentityRegistry {
    entries: Vec<Option<Identity>>,
    index: HashMap<Identity, usize>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number `identity`, returning `(id, is_new)`.
    ///
    /// An instance seen before keeps its number. `None` (no stable address)
    /// always gets a fresh number and is never matched later.
    pub fn register(&mut self, identity: Option<Identity>) -> (usize, bool) {
        if let Some(identity) = identity {
            if let Some(&id) = self.index.get(&identity) {
                return (id, false);
            }
            self.entries.push(Some(identity));
            let id = self.entries.len();
            self.index.insert(identity, id);
            (id, true)
        } else {
            self.entries.push(None);
            (self.entries.len(), true)
        }
    }

    /// Number already assigned to `identity`, if any.
    pub fn lookup(&self, identity: &Identity) -> Option<usize> {
        self.index.get(identity).copied()
    }

    /// Make `identity` resolve to an existing number. Used for wrappers
    /// (cells, locks) that render as the value they guard.
    pub fn alias(&mut self, identity: Identity, id: usize) {
        self.index.entry(identity).or_insert(id);
    }

    /// Stop matching `identity`. Its number is not reused.
    pub fn forget(&mut self, identity: &Identity) {
        self.index.remove(identity);
    }

    /// Identity that received `id`.
    pub fn identity_of(&self, id: usize) -> Option<Identity> {
        id.checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .copied()
            .flatten()
    }

    /// How many numbers have been handed out.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
