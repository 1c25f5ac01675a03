//! Cache replacement policies
//!
//! Replacement policies are pluggable: the engine only sees the `Cache`
//! trait, and concrete policies are selected by name through the registry.
//! Two reference policies are provided so experiments run out of the box;
//! richer suites plug in through the same trait.

use crate::ContentId;
use std::collections::{HashSet, VecDeque};

/// Per-node content store with a replacement policy
///
/// `get` counts as a reference for replacement purposes; `has` is a pure
/// inspection used by read-only views and must not perturb the policy state.
pub trait Cache {
    /// Look up content, updating replacement metadata. Returns true on hit.
    fn get(&mut self, content: ContentId) -> bool;

    /// Inspect for content without touching replacement metadata
    fn has(&self, content: ContentId) -> bool;

    /// Insert content, evicting according to the policy if full
    fn put(&mut self, content: ContentId);

    /// Remove content if present, returning whether it was there
    fn remove(&mut self, content: ContentId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;
}

/// Least-recently-used replacement
#[derive(Debug)]
pub struct Lru {
    // Front is most recently used
    order: VecDeque<ContentId>,
    members: HashSet<ContentId>,
    capacity: usize,
}

impl Lru {
    pub fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    fn touch(&mut self, content: ContentId) {
        if let Some(pos) = self.order.iter().position(|&c| c == content) {
            self.order.remove(pos);
            self.order.push_front(content);
        }
    }
}

impl Cache for Lru {
    fn get(&mut self, content: ContentId) -> bool {
        if self.members.contains(&content) {
            self.touch(content);
            true
        } else {
            false
        }
    }

    fn has(&self, content: ContentId) -> bool {
        self.members.contains(&content)
    }

    fn put(&mut self, content: ContentId) {
        if self.members.contains(&content) {
            self.touch(content);
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(evicted) = self.order.pop_back() {
                self.members.remove(&evicted);
            }
        }
        self.order.push_front(content);
        self.members.insert(content);
    }

    fn remove(&mut self, content: ContentId) -> bool {
        if self.members.remove(&content) {
            if let Some(pos) = self.order.iter().position(|&c| c == content) {
                self.order.remove(pos);
            }
            true
        } else {
            false
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

/// First-in-first-out replacement
#[derive(Debug)]
pub struct Fifo {
    order: VecDeque<ContentId>,
    members: HashSet<ContentId>,
    capacity: usize,
}

impl Fifo {
    pub fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            capacity,
        }
    }
}

impl Cache for Fifo {
    fn get(&mut self, content: ContentId) -> bool {
        self.members.contains(&content)
    }

    fn has(&self, content: ContentId) -> bool {
        self.members.contains(&content)
    }

    fn put(&mut self, content: ContentId) {
        if self.members.contains(&content) {
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.members.remove(&evicted);
            }
        }
        self.order.push_back(content);
        self.members.insert(content);
    }

    fn remove(&mut self, content: ContentId) -> bool {
        if self.members.remove(&content) {
            if let Some(pos) = self.order.iter().position(|&c| c == content) {
                self.order.remove(pos);
            }
            true
        } else {
            false
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_eviction_order() {
        let mut cache = Lru::new(2);
        cache.put(1);
        cache.put(2);
        assert!(cache.get(1)); // 1 becomes most recent
        cache.put(3); // evicts 2
        assert!(cache.has(1));
        assert!(!cache.has(2));
        assert!(cache.has(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_has_does_not_touch() {
        let mut cache = Lru::new(2);
        cache.put(1);
        cache.put(2);
        assert!(cache.has(1)); // inspection only
        cache.put(3); // evicts 1, the least recently *referenced*
        assert!(!cache.has(1));
        assert!(cache.has(2));
    }

    #[test]
    fn test_fifo_eviction_order() {
        let mut cache = Fifo::new(2);
        cache.put(1);
        cache.put(2);
        assert!(cache.get(1)); // no effect on eviction order
        cache.put(3); // evicts 1
        assert!(!cache.has(1));
        assert!(cache.has(2));
        assert!(cache.has(3));
    }

    #[test]
    fn test_remove() {
        let mut cache = Lru::new(4);
        cache.put(7);
        assert!(cache.remove(7));
        assert!(!cache.remove(7));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reinsert_is_idempotent() {
        let mut cache = Fifo::new(2);
        cache.put(1);
        cache.put(1);
        assert_eq!(cache.len(), 1);
    }
}
