#![forbid(unsafe_code)]

//! Undo/redo checkpoint history.
//!
//! The panel does not describe its mutations as reversible commands. It asks
//! the graph for a snapshot, hands the snapshot to an [`UndoStore`] under a
//! label, and only then mutates. Undoing restores the snapshot wholesale and
//! lets reconciliation bring the rows back in line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        UndoHistory                          │
//! │  ┌──────────────────┐          ┌──────────────────┐         │
//! │  │   Undo Stack     │          │   Redo Stack     │         │
//! │  │  ┌────────────┐  │  undo()  │  ┌────────────┐  │         │
//! │  │  │ "Move"  s2 │  │ ──────►  │  │ "Move"  s3 │  │         │
//! │  │  ├────────────┤  │          │  └────────────┘  │         │
//! │  │  │ "Create" s1│  │  ◄────── │                  │         │
//! │  │  └────────────┘  │  redo()  │                  │         │
//! │  └──────────────────┘          └──────────────────┘         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`checkpoint`]: labeled snapshot with metadata
//! - [`history`]: the [`UndoStore`] trait and the depth-bounded [`UndoHistory`]

pub mod checkpoint;
pub mod history;

pub use checkpoint::{Checkpoint, CheckpointMetadata, CheckpointSource};
pub use history::{HistoryConfig, Restored, UndoHistory, UndoStore};
