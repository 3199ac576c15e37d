//! # Change Sets
//!
//! The set of top-level keys a single mutation touched. A publish carries one
//! change set and one snapshot; keyed subscribers fire when their key is in
//! the set.

use std::fmt;

/// Keys changed by one mutation, in first-touched order, without duplicates.
#[derive(Clone, PartialEq, Eq)]
pub struct ChangeSet<K> {
    keys: Vec<K>,
}

impl<K: PartialEq> ChangeSet<K> {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Record `key` as changed. Returns `false` if it was already recorded.
    pub fn insert(&mut self, key: K) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Record `key` only when `changed` holds.
    pub fn mark_if(&mut self, key: K, changed: bool) {
        if changed {
            self.insert(key);
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Fold another change set into this one, keeping first-touched order.
    pub fn merge(&mut self, other: ChangeSet<K>) {
        for key in other.keys {
            self.insert(key);
        }
    }
}

impl<K: PartialEq> Default for ChangeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq> FromIterator<K> for ChangeSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl<K: fmt::Debug> fmt::Debug for ChangeSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedupes() {
        let mut set = ChangeSet::new();
        assert!(set.insert("a"));
        assert!(set.insert("b"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_mark_if_skips_unchanged() {
        let mut set = ChangeSet::new();
        set.mark_if(1, false);
        assert!(set.is_empty());
        set.mark_if(1, true);
        assert!(set.contains(&1));
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut left: ChangeSet<u8> = [3, 1].into_iter().collect();
        let right: ChangeSet<u8> = [1, 2].into_iter().collect();
        left.merge(right);
        assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
