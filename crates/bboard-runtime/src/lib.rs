#![forbid(unsafe_code)]

//! Runtime services for the blackboard panel.
//!
//! # Key Components
//!
//! - [`UndoStore`] - Injected undo collaborator the panel checkpoints into
//! - [`UndoHistory`] - Depth-bounded, labeled checkpoint history
//! - [`BlackboardConfig`] - Panel configuration, loadable from TOML or JSON
//!
//! # How it fits in the system
//! `bboard-widgets` records a [`GraphSnapshot`](bboard_core::GraphSnapshot)
//! into an [`UndoStore`] before every structural mutation and restores it on
//! undo. The configuration feeds the history depth and the click thresholds
//! used for label activation.

pub mod config;
pub mod undo;

pub use config::{
    BlackboardConfig, ConfigError, GesturePolicyConfig, PanelPolicyConfig, UndoPolicyConfig,
};
pub use undo::{
    Checkpoint, CheckpointMetadata, CheckpointSource, HistoryConfig, Restored, UndoHistory,
    UndoStore,
};
