#![forbid(unsafe_code)]

//! Blackboard panel for bboard.
//!
//! # Role in bboard
//! `bboard-widgets` keeps a list of property rows in step with a
//! [`PropertyGraph`](bboard_core::PropertyGraph) and turns user gestures into
//! undoable graph mutations.
//!
//! # Primary responsibilities
//! - **Blackboard**: the mutation coordinator. Every structural change is
//!   checkpointed into an [`UndoStore`](bboard_runtime::UndoStore) first.
//! - **Reconciler**: the single writer of the row mirror, driven by change sets.
//! - **InlineEditSession**: the Idle → Editing → Idle machine shared by the
//!   path label and the property name rows.
//! - **TextField**: a headless, grapheme-aware single-line text buffer.

pub mod blackboard;
pub mod commands;
pub mod edit_session;
pub mod menu;
pub mod mirror;
pub mod reconcile;
pub mod row;
pub mod text_field;

pub use blackboard::{
    Blackboard, UNDO_CREATE_PROPERTY, UNDO_EDIT_PATH, UNDO_EDIT_PROPERTY_NAME, UNDO_MOVE_PROPERTY,
};
pub use commands::{BlackboardCommands, EditSurface};
pub use edit_session::{EditOutcome, EditResponse, InlineEditSession};
pub use menu::{AddItemMenu, MenuAction, MenuItem};
pub use mirror::PropertyMirror;
pub use reconcile::{ReconcileReport, Reconciler};
pub use row::{BlackboardRow, RowHandle, Section};
pub use text_field::TextField;
