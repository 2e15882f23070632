//! Common types used throughout scopus-query
//!
//! Shared type aliases and small value types used across modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// One result entry. The engine never looks inside it.
pub type Record = serde_json::Value;

/// Caller-supplied or default query parameters.
///
/// Ordered so that URL construction is deterministic.
pub type QueryParameters = BTreeMap<String, String>;

// ============================================================================
// Log Level
// ============================================================================

/// Log level accepted by the CLI and config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Build a [`QueryParameters`] map from string pairs
pub fn params<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> QueryParameters
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
