#![forbid(unsafe_code)]

//! Ordered id → row mirror of the graph's property list.
//!
//! [`PropertyMirror`] stores one entry per live property in a dense vector
//! and keeps an id → position table beside it. The mirror never reorders
//! itself: entries land where [`insert_at`](PropertyMirror::insert_at) puts
//! them, and reordering is done by draining and reinserting.
//!
//! # Invariants
//!
//! 1. `index[id] == i` iff `entries[i].0 == id`.
//! 2. An id appears at most once.

use ahash::AHashMap;
use bboard_core::property::PropertyId;

/// Ordered mapping from property id to its row.
#[derive(Debug, Clone)]
pub struct PropertyMirror<R> {
    entries: Vec<(PropertyId, R)>,
    index: AHashMap<PropertyId, usize>,
}

impl<R> Default for PropertyMirror<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: AHashMap::new(),
        }
    }
}

impl<R> PropertyMirror<R> {
    /// Create an empty mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of `id` in the mirror order.
    #[must_use]
    pub fn position(&self, id: PropertyId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&R> {
        let i = *self.index.get(&id)?;
        Some(&self.entries[i].1)
    }

    pub fn get_mut(&mut self, id: PropertyId) -> Option<&mut R> {
        let i = *self.index.get(&id)?;
        Some(&mut self.entries[i].1)
    }

    /// Insert `row` for `id` at `index`, appending when out of range.
    ///
    /// Returns `false` (and drops `row`) if `id` is already present.
    pub fn insert_at(&mut self, id: PropertyId, row: R, index: usize) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        let at = index.min(self.entries.len());
        self.entries.insert(at, (id, row));
        self.reindex_from(at);
        true
    }

    /// Append `row` for `id`. Returns `false` if `id` is already present.
    pub fn push(&mut self, id: PropertyId, row: R) -> bool {
        self.insert_at(id, row, usize::MAX)
    }

    /// Remove the entry for `id`, returning its row. Absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: PropertyId) -> Option<R> {
        let at = self.index.remove(&id)?;
        let (_, row) = self.entries.remove(at);
        self.reindex_from(at);
        Some(row)
    }

    /// Ids in mirror order.
    #[must_use]
    pub fn ordered_ids(&self) -> Vec<PropertyId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    /// Entries in mirror order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &R)> {
        self.entries.iter().map(|(id, row)| (*id, row))
    }

    /// Rows in mirror order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PropertyId, &mut R)> {
        self.entries.iter_mut().map(|(id, row)| (*id, row))
    }

    /// Remove every entry, returning them in mirror order.
    pub fn drain(&mut self) -> Vec<(PropertyId, R)> {
        self.index.clear();
        std::mem::take(&mut self.entries)
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, (id, _)) in self.entries.iter().enumerate().skip(start) {
            self.index.insert(*id, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [PropertyId; N] {
        std::array::from_fn(|_| PropertyId::new())
    }

    #[test]
    fn insert_at_places_and_clamps() {
        let [a, b, c] = ids();
        let mut mirror = PropertyMirror::new();
        assert!(mirror.insert_at(a, "a", 0));
        assert!(mirror.insert_at(b, "b", 99));
        assert!(mirror.insert_at(c, "c", 1));
        assert_eq!(mirror.ordered_ids(), vec![a, c, b]);
        assert_eq!(mirror.position(b), Some(2));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let [a] = ids();
        let mut mirror = PropertyMirror::new();
        assert!(mirror.push(a, 1));
        assert!(!mirror.insert_at(a, 2, 0));
        assert_eq!(mirror.len(), 1);
        assert_eq!(mirror.get(a), Some(&1));
    }

    #[test]
    fn remove_reindexes_followers() {
        let [a, b, c] = ids();
        let mut mirror = PropertyMirror::new();
        for (i, id) in [a, b, c].into_iter().enumerate() {
            mirror.push(id, i);
        }
        assert_eq!(mirror.remove_by_id(a), Some(0));
        assert_eq!(mirror.remove_by_id(a), None);
        assert_eq!(mirror.position(b), Some(0));
        assert_eq!(mirror.position(c), Some(1));
        assert!(!mirror.contains(a));
    }

    #[test]
    fn get_mut_edits_in_place() {
        let [a] = ids();
        let mut mirror = PropertyMirror::new();
        mirror.push(a, String::from("x"));
        mirror.get_mut(a).unwrap().push('y');
        assert_eq!(mirror.get(a).map(String::as_str), Some("xy"));
    }

    #[test]
    fn drain_empties_in_order() {
        let [a, b] = ids();
        let mut mirror = PropertyMirror::new();
        mirror.push(a, 'a');
        mirror.push(b, 'b');
        let drained = mirror.drain();
        assert_eq!(drained, vec![(a, 'a'), (b, 'b')]);
        assert!(mirror.is_empty());
        assert!(!mirror.contains(a));
    }
}
