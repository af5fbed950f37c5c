#![forbid(unsafe_code)]

//! Labeled undo checkpoints.
//!
//! A [`Checkpoint`] pairs a pre-mutation state snapshot with the metadata
//! shown to the user ("Undo Move Property"). Snapshots are held in [`Arc`]
//! so that moving a checkpoint between the undo and redo stacks never
//! copies state.

use std::fmt;
use std::sync::Arc;

use web_time::Instant;

/// Source of a checkpoint - who/what triggered the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckpointSource {
    /// Direct user gesture on the panel.
    #[default]
    User,
    /// Triggered programmatically by application code.
    Programmatic,
}

/// Metadata attached to every checkpoint.
#[derive(Debug, Clone)]
pub struct CheckpointMetadata {
    /// Human-readable label (e.g., "Edit Property Name").
    pub label: String,
    /// When the checkpoint was recorded.
    pub timestamp: Instant,
    /// Who/what triggered the mutation.
    pub source: CheckpointSource,
}

impl CheckpointMetadata {
    /// Create new metadata with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timestamp: Instant::now(),
            source: CheckpointSource::User,
        }
    }

    /// Set the checkpoint source.
    #[must_use]
    pub fn with_source(mut self, source: CheckpointSource) -> Self {
        self.source = source;
        self
    }
}

/// A state snapshot recorded before a mutation.
pub struct Checkpoint<S> {
    metadata: CheckpointMetadata,
    state: Arc<S>,
}

impl<S> Checkpoint<S> {
    /// Create a checkpoint from metadata and a state.
    #[must_use]
    pub fn new(metadata: CheckpointMetadata, state: S) -> Self {
        Self::from_arc(metadata, Arc::new(state))
    }

    /// Create a checkpoint from an already shared state.
    #[must_use]
    pub fn from_arc(metadata: CheckpointMetadata, state: Arc<S>) -> Self {
        Self { metadata, state }
    }

    /// Label shown for this checkpoint.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.metadata.label
    }

    #[must_use]
    pub fn metadata(&self) -> &CheckpointMetadata {
        &self.metadata
    }

    /// The captured state.
    #[must_use]
    pub fn state(&self) -> &Arc<S> {
        &self.state
    }

    /// Split into metadata and state.
    #[must_use]
    pub fn into_parts(self) -> (CheckpointMetadata, Arc<S>) {
        (self.metadata, self.state)
    }
}

impl<S> Clone for Checkpoint<S> {
    fn clone(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> fmt::Debug for Checkpoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkpoint")
            .field("label", &self.metadata.label)
            .field("source", &self.metadata.source)
            .finish()
    }
}
