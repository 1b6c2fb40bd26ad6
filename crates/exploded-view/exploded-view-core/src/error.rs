//! Error types for view operations and configuration.

use serde::Serialize;

use crate::state::ViewState;

/// Why a view operation was turned down. A returned error always means the
/// operation was a no-op: validation runs before any state is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub enum ViewError {
    /// Part index outside `0..len`.
    #[error("Invalid part index {index} (part count: {len})")]
    InvalidIndex { index: usize, len: usize },

    /// Operation not allowed in the current view state.
    #[error("Cannot {operation} while {state}: {reason}")]
    InvalidStateTransition {
        operation: &'static str,
        state: ViewState,
        reason: &'static str,
    },
}

/// Problems found while loading or validating a [`ViewConfig`](crate::config::ViewConfig).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("view config parse error: {0}")]
    Parse(String),

    #[error("view config must declare at least one part")]
    NoParts,

    #[error("transition speed must be finite and > 0 (got {0})")]
    InvalidSpeed(f32),

    #[error("part '{part}' has a non-finite {field}")]
    NonFinite { part: String, field: &'static str },

    #[error("view origin is not finite")]
    NonFiniteOrigin,

    #[error("duplicate part transform name '{0}'")]
    DuplicatePart(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
