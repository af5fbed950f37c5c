#![forbid(unsafe_code)]

//! Core: property model, naming rules, change sets, and input events.
//!
//! # Role in bboard
//! `bboard-core` is the model layer. It owns the property types exposed by a
//! graph to the blackboard panel, the pure naming utility shared by property
//! names and the graph path, the per-cycle [`ChangeSet`](change_set::ChangeSet),
//! and the [`PropertyGraph`](graph::PropertyGraph) collaborator trait.
//!
//! # Primary responsibilities
//! - **Property**: identified, typed, named values with a default.
//! - **Naming**: path segment cleanup and collision-free display names.
//! - **PropertyGraph**: the graph model interface plus [`NodeGraph`](graph::NodeGraph),
//!   an in-memory implementation with change tracking.
//! - **Event**: normalized input events and click-count detection used to
//!   drive inline editing.
//!
//! # How it fits in the system
//! `bboard-runtime` snapshots graph state for undo, and `bboard-widgets`
//! consumes change sets to keep its row mirror in canonical order.

pub mod change_set;
pub mod event;
pub mod gesture;
pub mod graph;
pub mod naming;
pub mod property;

pub use change_set::{AddedProperty, ChangeSet};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use gesture::{Click, ClickConfig, ClickDetector};
pub use graph::{GraphNode, GraphSnapshot, ModificationScope, NodeGraph, NodeId, NodeKind, PropertyGraph};
pub use naming::{DEFAULT_FALLBACK_NAME, DEFAULT_PATH_PLACEHOLDER, format_path, sanitize_name, sanitize_segments};
pub use property::{GradientKey, Keyframe, Property, PropertyId, PropertyKind, PropertyValue};
