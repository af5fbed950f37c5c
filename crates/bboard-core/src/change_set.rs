#![forbid(unsafe_code)]

//! Per-cycle description of what changed in a graph's property list.
//!
//! A [`ChangeSet`] is produced once per graph mutation cycle and consumed
//! exactly once by the panel's reconciliation pass. It is a plain value:
//! taking it out of the graph (see
//! [`PropertyGraph::take_changes`](crate::graph::PropertyGraph::take_changes))
//! discards it from the graph's side.
//!
//! # Invariants
//!
//! 1. `removed` and `added` are disjoint by id; `renamed` never names an
//!    id from either.
//! 2. `added` is sorted by ascending target index.
//! 3. Every `added` entry's index is its position in the canonical order at
//!    the time the change set was taken.

use crate::property::{Property, PropertyId};

/// A property reported as added, with the index it occupies in the
/// canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedProperty {
    pub property: Property,
    pub index: usize,
}

/// Removals, additions and reorders observed during one cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Ids removed from the graph.
    pub removed: Vec<PropertyId>,
    /// Properties added to the graph, ascending by index.
    pub added: Vec<AddedProperty>,
    /// Ids whose relative order changed. Non-empty acts as the moved flag.
    pub moved: Vec<PropertyId>,
    /// Ids whose display name changed.
    pub renamed: Vec<PropertyId>,
}

impl ChangeSet {
    /// Create an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any property's relative order changed.
    #[inline]
    #[must_use]
    pub fn has_moves(&self) -> bool {
        !self.moved.is_empty()
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.added.is_empty()
            && self.moved.is_empty()
            && self.renamed.is_empty()
    }

    /// Builder: report a removal.
    #[must_use]
    pub fn with_removed(mut self, id: PropertyId) -> Self {
        self.removed.push(id);
        self
    }

    /// Builder: report an addition at `index`.
    ///
    /// Keeps `added` sorted by index; equal indices keep insertion order.
    #[must_use]
    pub fn with_added(mut self, property: Property, index: usize) -> Self {
        let at = self.added.partition_point(|a| a.index <= index);
        self.added.insert(at, AddedProperty { property, index });
        self
    }

    /// Builder: report a reorder involving `id`.
    #[must_use]
    pub fn with_moved(mut self, id: PropertyId) -> Self {
        self.moved.push(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyKind;

    #[test]
    fn empty_change_set() {
        let cs = ChangeSet::new();
        assert!(cs.is_empty());
        assert!(!cs.has_moves());
    }

    #[test]
    fn moved_flag_follows_moved_ids() {
        let cs = ChangeSet::new().with_moved(PropertyId::new());
        assert!(cs.has_moves());
        assert!(!cs.is_empty());
    }

    #[test]
    fn added_stays_sorted_by_index() {
        let a = Property::new(PropertyKind::Float);
        let b = Property::new(PropertyKind::Int);
        let c = Property::new(PropertyKind::Color);
        let cs = ChangeSet::new()
            .with_added(a.clone(), 3)
            .with_added(b.clone(), 0)
            .with_added(c.clone(), 3);
        let order: Vec<PropertyId> = cs.added.iter().map(|a| a.property.id()).collect();
        assert_eq!(order, vec![b.id(), a.id(), c.id()]);
    }
}
