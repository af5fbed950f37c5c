#![forbid(unsafe_code)]

//! bboard public facade crate.
//!
//! Re-exports the types a host needs to embed the blackboard panel and offers
//! a prelude for day-to-day use.

use std::fmt;
#[cfg(feature = "config")]
use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use bboard_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use bboard_core::graph::{GraphSnapshot, ModificationScope, NodeGraph, NodeKind, PropertyGraph};
pub use bboard_core::naming::{sanitize_name, sanitize_segments};
pub use bboard_core::property::{Property, PropertyId, PropertyKind, PropertyValue};
pub use bboard_core::ChangeSet;

// --- Runtime re-exports ----------------------------------------------------

pub use bboard_runtime::config::{BlackboardConfig, ConfigError};
pub use bboard_runtime::undo::{HistoryConfig, UndoHistory, UndoStore};

// --- Widget re-exports -----------------------------------------------------

pub use bboard_widgets::{
    Blackboard, BlackboardCommands, BlackboardRow, EditOutcome, EditSurface, InlineEditSession,
    ReconcileReport,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for bboard hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while reading host resources.
    Io(std::io::Error),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(err) => Self::Io(err),
            other => Self::Config(other),
        }
    }
}

/// Standard result type for bboard APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Panel construction ---------------------------------------------------

/// Build a panel over `graph` after validating `config`.
pub fn open<G: PropertyGraph>(graph: G, config: BlackboardConfig) -> Result<Blackboard<G>> {
    let config = config.validated()?;
    Ok(Blackboard::with_history(graph, &config))
}

/// Build a panel over `graph` with configuration read from `path`.
///
/// Files ending in `.json` are parsed as JSON, anything else as TOML.
#[cfg(feature = "config")]
pub fn open_with_config_file<G: PropertyGraph>(
    graph: G,
    path: impl AsRef<Path>,
) -> Result<Blackboard<G>> {
    let path = path.as_ref();
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => BlackboardConfig::from_json_file(path)?,
        _ => BlackboardConfig::from_toml_file(path)?,
    };
    open(graph, config)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Blackboard, BlackboardCommands, BlackboardConfig, EditOutcome, EditSurface, Error, Event,
        KeyCode, NodeGraph, Property, PropertyGraph, PropertyId, PropertyKind, Result, UndoStore,
    };

    pub use crate::{core, runtime, widgets};
}

pub use bboard_core as core;
pub use bboard_runtime as runtime;
pub use bboard_widgets as widgets;
