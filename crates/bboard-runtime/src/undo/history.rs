#![forbid(unsafe_code)]

//! Checkpoint history for undo/redo.
//!
//! [`UndoHistory`] keeps labeled pre-mutation snapshots on two stacks.
//! Unlike a store that keeps the *current* state on top, a checkpoint is
//! recorded *before* each mutation, so undo needs the caller's current
//! state to park on the redo stack.
//!
//! # Invariants
//!
//! 1. `undo_stack.len() <= config.max_depth` (after any operation).
//! 2. The redo stack is cleared whenever a new checkpoint is registered.
//! 3. `undo` then `redo` with the states handed back returns the state that
//!    was current before the `undo`.
//! 4. A checkpoint keeps its label when it moves between stacks.
//!
//! # Memory Model
//!
//! ```text
//! register("Create Property", s0)   register("Move Property", s1)
//! ┌──────────────────────────────────────────────────┐
//! │ Undo Stack:  [Create(s0), Move(s1)]              │
//! │ Redo Stack:  []                                   │
//! └──────────────────────────────────────────────────┘
//!
//! undo(current = s2) -> restores s1
//! ┌──────────────────────────────────────────────────┐
//! │ Undo Stack:  [Create(s0)]                        │
//! │ Redo Stack:  [Move(s2)]                          │
//! └──────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use super::checkpoint::{Checkpoint, CheckpointMetadata};

/// Configuration for the undo history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of checkpoints kept for undo.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl HistoryConfig {
    /// Create a configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// A state handed back by undo or redo.
#[derive(Debug, Clone)]
pub struct Restored<S> {
    /// Label of the checkpoint that was reverted or reapplied.
    pub label: String,
    /// State to restore.
    pub state: Arc<S>,
}

/// Injected undo collaborator.
///
/// The panel calls [`register_complete_undo`](UndoStore::register_complete_undo)
/// before every structural mutation, handing over the state as it was before
/// the change.
pub trait UndoStore<S> {
    /// Record a checkpoint labeled `label` holding the pre-mutation `state`.
    fn register_complete_undo(&mut self, label: &str, state: S);

    /// Step back one checkpoint. `current` is parked for redo.
    fn undo(&mut self, current: S) -> Option<Restored<S>>;

    /// Reapply the most recently undone checkpoint. `current` is parked for undo.
    fn redo(&mut self, current: S) -> Option<Restored<S>>;

    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;
}

/// Depth-bounded checkpoint history.
pub struct UndoHistory<S> {
    /// Checkpoints available for undo (newest at back).
    undo_stack: VecDeque<Checkpoint<S>>,
    /// Checkpoints available for redo (newest at back).
    redo_stack: VecDeque<Checkpoint<S>>,
    config: HistoryConfig,
}

impl<S> fmt::Debug for UndoHistory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<S> Default for UndoHistory<S> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<S> UndoHistory<S> {
    /// Create a history with the given configuration.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            config,
        }
    }

    /// Record a checkpoint with full metadata.
    pub fn push(&mut self, metadata: CheckpointMetadata, state: S) {
        self.redo_stack.clear();
        self.undo_stack.push_back(Checkpoint::new(metadata, state));
        self.enforce_depth();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "undo.checkpoint",
            label = self.next_undo_label().unwrap_or_default(),
            undo_depth = self.undo_stack.len()
        );
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Number of checkpoints available for undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of checkpoints available for redo.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the next undo step.
    #[must_use]
    pub fn next_undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(Checkpoint::label)
    }

    /// Label of the next redo step.
    #[must_use]
    pub fn next_redo_label(&self) -> Option<&str> {
        self.redo_stack.back().map(Checkpoint::label)
    }

    /// Labels available for undo (most recent first).
    pub fn undo_labels(&self, limit: usize) -> Vec<&str> {
        self.undo_stack
            .iter()
            .rev()
            .take(limit)
            .map(Checkpoint::label)
            .collect()
    }

    /// Labels available for redo (most recent first).
    pub fn redo_labels(&self, limit: usize) -> Vec<&str> {
        self.redo_stack
            .iter()
            .rev()
            .take(limit)
            .map(Checkpoint::label)
            .collect()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Clear both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_depth(&mut self) {
        while self.undo_stack.len() > self.config.max_depth {
            self.undo_stack.pop_front();
        }
    }
}

impl<S> UndoStore<S> for UndoHistory<S> {
    fn register_complete_undo(&mut self, label: &str, state: S) {
        self.push(CheckpointMetadata::new(label), state);
    }

    fn undo(&mut self, current: S) -> Option<Restored<S>> {
        let (metadata, state) = self.undo_stack.pop_back()?.into_parts();
        let label = metadata.label.clone();
        self.redo_stack.push_back(Checkpoint::new(metadata, current));
        Some(Restored { label, state })
    }

    fn redo(&mut self, current: S) -> Option<Restored<S>> {
        let (metadata, state) = self.redo_stack.pop_back()?.into_parts();
        let label = metadata.label.clone();
        self.undo_stack.push_back(Checkpoint::new(metadata, current));
        self.enforce_depth();
        Some(Restored { label, state })
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
