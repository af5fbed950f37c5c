#![forbid(unsafe_code)]

//! The graph model collaborator.
//!
//! [`PropertyGraph`] is everything the blackboard panel needs from the graph
//! that owns the properties: the canonical property order, the path string,
//! structural mutations, name sanitization against siblings, the per-cycle
//! [`ChangeSet`], the property nodes to re-notify after a rename, and
//! snapshot/restore for undo.
//!
//! [`NodeGraph`] is an in-memory implementation that records changes as they
//! happen and hands them out through [`take_changes`](PropertyGraph::take_changes).
//!
//! # Invariants (NodeGraph)
//!
//! 1. Property ids are unique within `properties()`.
//! 2. A pending change set never reports the same id as both removed and added.
//! 3. An id added and removed within one cycle is reported in neither list.
//! 4. `restore` leaves pending changes that, applied to a mirror of the
//!    pre-restore order, reproduce the restored order.

use ahash::{AHashMap, AHashSet};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::change_set::ChangeSet;
use crate::naming::sanitize_name;
use crate::property::{Property, PropertyId, PropertyKind};

/// Identifier of a node in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Node categories the panel cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A node that reads a blackboard property.
    Property,
    /// Any other node.
    Other,
}

/// How much of the graph a node change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ModificationScope {
    #[default]
    Nothing,
    Node,
    Graph,
    Topological,
}

/// A node of the in-memory graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Property read by a [`NodeKind::Property`] node.
    pub property: Option<PropertyId>,
    /// Times the node was re-enabled after a property change.
    pub enable_count: u32,
    /// Widest pending modification scope.
    pub dirty: ModificationScope,
}

/// Property list and path captured by an undo checkpoint.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphSnapshot {
    pub properties: Vec<Property>,
    pub path: String,
}

/// Graph model interface consumed by the blackboard panel.
pub trait PropertyGraph {
    /// Properties in canonical order.
    fn properties(&self) -> &[Property];

    /// Look up a property by id.
    fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties().iter().find(|p| p.id() == id)
    }

    /// Position of a property in the canonical order.
    fn property_index(&self, id: PropertyId) -> Option<usize> {
        self.properties().iter().position(|p| p.id() == id)
    }

    /// Slash-delimited category path.
    fn path(&self) -> &str;

    /// Replace the path. Callers sanitize first.
    fn set_path(&mut self, path: String);

    /// Append a property. Adding an id that is already present is a no-op.
    fn add_property(&mut self, property: Property);

    /// Relocate a property in the canonical order, clamping `index`.
    ///
    /// Returns `false` if the id is unknown or the position is unchanged.
    fn move_property(&mut self, id: PropertyId, index: usize) -> bool;

    /// Remove a property, returning it if it was present.
    fn remove_property(&mut self, id: PropertyId) -> Option<Property>;

    /// Set a property's display name. Callers sanitize first.
    ///
    /// Returns `false` if the id is unknown or the name is unchanged.
    fn set_display_name(&mut self, id: PropertyId, name: &str) -> bool;

    /// Sanitize a proposed display name against the sibling properties.
    ///
    /// `exclude` names the property being renamed so that its own current
    /// name does not count as a collision; `kind` supplies the fallback name
    /// for a blank proposal.
    fn sanitize_property_name(
        &self,
        proposed: &str,
        kind: PropertyKind,
        exclude: Option<PropertyId>,
    ) -> String {
        let siblings = self
            .properties()
            .iter()
            .filter(|p| Some(p.id()) != exclude)
            .map(Property::display_name);
        sanitize_name(proposed, kind.default_name(), siblings)
    }

    /// Hand out and clear the changes recorded since the last call.
    fn take_changes(&mut self) -> ChangeSet;

    /// Nodes of the given kind.
    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId>;

    /// Re-notify a node and mark it dirty with `scope`.
    fn refresh_node(&mut self, node: NodeId, scope: ModificationScope);

    /// Capture the state an undo checkpoint restores.
    fn snapshot(&self) -> GraphSnapshot;

    /// Restore a captured state, recording the resulting changes.
    fn restore(&mut self, snapshot: &GraphSnapshot);
}

/// In-memory graph with change tracking.
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    properties: Vec<Property>,
    path: String,
    nodes: Vec<GraphNode>,
    next_node: u64,
    pending_removed: Vec<PropertyId>,
    pending_added: Vec<PropertyId>,
    pending_moved: Vec<PropertyId>,
    pending_renamed: Vec<PropertyId>,
}

impl NodeGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial path (builder). The value is sanitized.
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = crate::naming::sanitize_segments(path);
        self
    }

    /// Load initial properties (builder).
    ///
    /// Loaded properties are reported as added by the first change set.
    #[must_use]
    pub fn with_properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        for property in properties {
            self.add_property(property);
        }
        self
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, kind: NodeKind, property: Option<PropertyId>) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.push(GraphNode {
            id,
            kind,
            property,
            enable_count: 0,
            dirty: ModificationScope::Nothing,
        });
        id
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Whether changes are waiting to be taken.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !(self.pending_removed.is_empty()
            && self.pending_added.is_empty()
            && self.pending_moved.is_empty()
            && self.pending_renamed.is_empty())
    }

    fn note_added(&mut self, id: PropertyId) {
        if let Some(pos) = self.pending_removed.iter().position(|&r| r == id) {
            // Removed and re-added in one cycle: the mirror still holds the
            // row, so this is a reorder at most.
            self.pending_removed.remove(pos);
            self.note_moved(id);
        } else if !self.pending_added.contains(&id) {
            self.pending_added.push(id);
        }
    }

    fn note_removed(&mut self, id: PropertyId) {
        self.pending_moved.retain(|&m| m != id);
        self.pending_renamed.retain(|&r| r != id);
        if let Some(pos) = self.pending_added.iter().position(|&a| a == id) {
            self.pending_added.remove(pos);
        } else if !self.pending_removed.contains(&id) {
            self.pending_removed.push(id);
        }
    }

    fn note_moved(&mut self, id: PropertyId) {
        if !self.pending_moved.contains(&id) {
            self.pending_moved.push(id);
        }
    }

    fn note_renamed(&mut self, id: PropertyId) {
        if !self.pending_added.contains(&id) && !self.pending_renamed.contains(&id) {
            self.pending_renamed.push(id);
        }
    }
}

impl PropertyGraph for NodeGraph {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
    }

    fn add_property(&mut self, property: Property) {
        if self.properties.iter().any(|p| p.id() == property.id()) {
            return;
        }
        let id = property.id();
        self.properties.push(property);
        self.note_added(id);
    }

    fn move_property(&mut self, id: PropertyId, index: usize) -> bool {
        let Some(from) = self.property_index(id) else {
            return false;
        };
        let to = index.min(self.properties.len() - 1);
        if from == to {
            return false;
        }
        let property = self.properties.remove(from);
        self.properties.insert(to, property);
        self.note_moved(id);
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "graph.move_property", %id, from, to);
        true
    }

    fn remove_property(&mut self, id: PropertyId) -> Option<Property> {
        let pos = self.property_index(id)?;
        let property = self.properties.remove(pos);
        self.note_removed(id);
        Some(property)
    }

    fn set_display_name(&mut self, id: PropertyId, name: &str) -> bool {
        let Some(property) = self.properties.iter_mut().find(|p| p.id() == id) else {
            return false;
        };
        if property.display_name() == name {
            return false;
        }
        property.set_display_name(name);
        self.note_renamed(id);
        true
    }

    fn take_changes(&mut self) -> ChangeSet {
        let mut changes = ChangeSet {
            removed: std::mem::take(&mut self.pending_removed),
            added: Vec::new(),
            moved: std::mem::take(&mut self.pending_moved),
            renamed: std::mem::take(&mut self.pending_renamed),
        };
        for id in std::mem::take(&mut self.pending_added) {
            if let Some(index) = self.property_index(id) {
                changes = changes.with_added(self.properties[index].clone(), index);
            }
        }
        changes
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.id)
            .collect()
    }

    fn refresh_node(&mut self, node: NodeId, scope: ModificationScope) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == node) {
            n.enable_count += 1;
            n.dirty = n.dirty.max(scope);
        }
    }

    fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            properties: self.properties.clone(),
            path: self.path.clone(),
        }
    }

    fn restore(&mut self, snapshot: &GraphSnapshot) {
        let target: AHashSet<PropertyId> = snapshot.properties.iter().map(Property::id).collect();
        let current: AHashMap<PropertyId, String> = self
            .properties
            .iter()
            .map(|p| (p.id(), p.display_name().to_owned()))
            .collect();

        for id in self.properties.iter().map(Property::id).collect::<Vec<_>>() {
            if !target.contains(&id) {
                self.note_removed(id);
            }
        }

        // Relative order of the survivors decides whether a reorder is needed.
        let before: Vec<PropertyId> = self
            .properties
            .iter()
            .map(Property::id)
            .filter(|id| target.contains(id))
            .collect();
        let after: Vec<PropertyId> = snapshot
            .properties
            .iter()
            .map(Property::id)
            .filter(|id| current.contains_key(id))
            .collect();
        if before != after {
            for &id in &after {
                self.note_moved(id);
            }
        }

        for property in &snapshot.properties {
            match current.get(&property.id()) {
                None => self.note_added(property.id()),
                Some(name) if name != property.display_name() => self.note_renamed(property.id()),
                Some(_) => {}
            }
        }

        self.properties = snapshot.properties.clone();
        self.path = snapshot.path.clone();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "graph.restore",
            properties = self.properties.len(),
            removed = self.pending_removed.len(),
            added = self.pending_added.len(),
            moved = self.pending_moved.len()
        );
    }
}
