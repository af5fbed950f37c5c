#![forbid(unsafe_code)]

//! Configuration for the blackboard panel.
//!
//! Collects the tunable parameters of the panel into a single
//! [`BlackboardConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # bboard.toml
//! [undo]
//! max_depth = 50
//!
//! [panel]
//! title = "Lit Shader"
//! empty_path_placeholder = "(none)"
//!
//! [gesture]
//! multi_click_timeout_ms = 400
//! ```
//!
//! ```rust,ignore
//! let config = BlackboardConfig::from_toml_file("bboard.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the behavior the panel has without a config, so
//! `BlackboardConfig::default()` changes nothing.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use bboard_core::gesture::ClickConfig;
use bboard_core::naming::DEFAULT_PATH_PLACEHOLDER;

use crate::undo::HistoryConfig;

/// Longest accepted multi-click window.
const MAX_MULTI_CLICK_TIMEOUT_MS: u64 = 5_000;

// ---------------------------------------------------------------------------
// Top-level BlackboardConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for the blackboard panel.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BlackboardConfig {
    /// Undo checkpoint history.
    pub undo: UndoPolicyConfig,

    /// Panel presentation.
    pub panel: PanelPolicyConfig,

    /// Label activation gestures.
    pub gesture: GesturePolicyConfig,
}

impl BlackboardConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.undo.max_depth == 0 {
            errors.push("undo.max_depth must be > 0".into());
        }

        if self.panel.empty_path_placeholder.trim().is_empty() {
            errors.push("panel.empty_path_placeholder must not be blank".into());
        }

        if self.gesture.multi_click_timeout_ms == 0
            || self.gesture.multi_click_timeout_ms > MAX_MULTI_CLICK_TIMEOUT_MS
        {
            errors.push(format!(
                "gesture.multi_click_timeout_ms must be in 1..={MAX_MULTI_CLICK_TIMEOUT_MS}, got {}",
                self.gesture.multi_click_timeout_ms
            ));
        }

        errors
    }

    /// Return `self` if it validates, otherwise every error found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Undo history settings.
    #[must_use]
    pub fn to_history_config(&self) -> HistoryConfig {
        HistoryConfig::new(self.undo.max_depth)
    }

    /// Click detection thresholds for label activation.
    #[must_use]
    pub fn to_click_config(&self) -> ClickConfig {
        ClickConfig {
            multi_click_timeout: Duration::from_millis(self.gesture.multi_click_timeout_ms),
            click_tolerance: self.gesture.click_tolerance,
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Undo history parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct UndoPolicyConfig {
    /// Checkpoints kept before the oldest is evicted. Default: 100.
    pub max_depth: usize,
}

impl Default for UndoPolicyConfig {
    fn default() -> Self {
        Self {
            max_depth: HistoryConfig::default().max_depth,
        }
    }
}

/// Panel presentation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PanelPolicyConfig {
    /// Panel title (the asset name). Default: empty.
    pub title: String,
    /// Path label text when the path is empty. Default: an em dash.
    pub empty_path_placeholder: String,
    /// Expand the row of a newly created property. Default: true.
    pub expand_created_rows: bool,
    /// Open a rename session on a newly created property. Default: true.
    pub edit_created_rows: bool,
    /// Whether the row section scrolls. Default: true.
    pub scrollable: bool,
}

impl Default for PanelPolicyConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            empty_path_placeholder: DEFAULT_PATH_PLACEHOLDER.to_owned(),
            expand_created_rows: true,
            edit_created_rows: true,
            scrollable: true,
        }
    }
}

/// Label activation gesture parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GesturePolicyConfig {
    /// Double-click window in milliseconds. Default: 300.
    pub multi_click_timeout_ms: u64,
    /// Position tolerance between clicks (manhattan distance). Default: 1.
    pub click_tolerance: u16,
}

impl Default for GesturePolicyConfig {
    fn default() -> Self {
        let click = ClickConfig::default();
        Self {
            multi_click_timeout_ms: u64::try_from(click.multi_click_timeout.as_millis())
                .unwrap_or(u64::MAX),
            click_tolerance: click.click_tolerance,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a panel configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_component_defaults() {
        let config = BlackboardConfig::default();

        assert_eq!(config.to_history_config().max_depth, HistoryConfig::default().max_depth);

        let click = config.to_click_config();
        let expected = ClickConfig::default();
        assert_eq!(click.multi_click_timeout, expected.multi_click_timeout);
        assert_eq!(click.click_tolerance, expected.click_tolerance);

        assert_eq!(config.panel.empty_path_placeholder, DEFAULT_PATH_PLACEHOLDER);
        assert!(config.panel.expand_created_rows);
        assert!(config.panel.edit_created_rows);
        assert!(config.panel.title.is_empty());
    }

    #[test]
    fn default_validates_clean() {
        assert!(BlackboardConfig::default().validate().is_empty());
        assert!(BlackboardConfig::default().validated().is_ok());
    }

    #[test]
    fn validate_catches_zero_depth() {
        let mut config = BlackboardConfig::default();
        config.undo.max_depth = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("undo.max_depth"));
    }

    #[test]
    fn validate_catches_blank_placeholder() {
        let mut config = BlackboardConfig::default();
        config.panel.empty_path_placeholder = "  ".into();
        assert!(config.validate()[0].contains("empty_path_placeholder"));
    }

    #[test]
    fn validate_catches_timeout_out_of_range() {
        let mut config = BlackboardConfig::default();
        config.gesture.multi_click_timeout_ms = 0;
        assert_eq!(config.validate().len(), 1);
        config.gesture.multi_click_timeout_ms = 60_000;
        assert!(config.validate()[0].contains("60000"));
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = BlackboardConfig::default();
        config.undo.max_depth = 0;
        config.panel.empty_path_placeholder.clear();
        config.gesture.multi_click_timeout_ms = 0;
        match config.validated() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validation_error_display_joins_messages() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn io_error_has_source() {
        let err = ConfigError::Io(std::io::Error::other("boom"));
        assert!(err.to_string().starts_with("I/O error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_preserves_defaults() {
        let config = BlackboardConfig::from_toml_str(
            r#"
            [undo]
            max_depth = 7

            [panel]
            title = "Lit Shader"
            "#,
        )
        .unwrap();
        assert_eq!(config.undo.max_depth, 7);
        assert_eq!(config.panel.title, "Lit Shader");
        assert_eq!(config.panel.empty_path_placeholder, DEFAULT_PATH_PLACEHOLDER);
        assert_eq!(config.gesture, GesturePolicyConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trips_through_serde() {
        let mut config = BlackboardConfig::default();
        config.gesture.click_tolerance = 3;
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(BlackboardConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = BlackboardConfig::from_toml_str("[undo\nmax_depth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
