//! Error types for Breakfall.
//!
//! Both error types are `thiserror` enums:
//!
//! - [`ObserverError`] - Failure of a single observer during dispatch
//! - [`ConfigError`] - Errors while loading instrumentation settings
//!
//! Neither ever replaces the error an observer is told about. They
//! describe what went wrong *inside* the diagnostic layer itself.

use std::path::PathBuf;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of one observer invocation.
///
/// Recorded in the dispatch report; dispatch itself carries on with the
/// remaining observers.
#[derive(Error, Debug)]
pub enum ObserverError {
    /// The observer returned an error.
    #[error("observer `{name}` failed: {source}")]
    Failed {
        /// Name of the failing observer.
        name: String,
        /// The error it returned.
        #[source]
        source: BoxError,
    },

    /// The observer panicked.
    #[error("observer `{name}` panicked: {message}")]
    Panicked {
        /// Name of the panicking observer.
        name: String,
        /// Rendered panic payload.
        message: String,
    },
}

impl ObserverError {
    /// Name of the observer this failure belongs to.
    pub fn observer_name(&self) -> &str {
        match self {
            ObserverError::Failed { name, .. } | ObserverError::Panicked { name, .. } => name,
        }
    }

    /// Whether the observer panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, ObserverError::Panicked { .. })
    }
}

/// Errors that can occur while loading instrumentation settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The settings text is not valid.
    #[error("invalid settings: {0}")]
    Parse(String),

    /// An environment variable holds an unusable value.
    #[error("invalid value for {var}: {reason}")]
    Env {
        /// Name of the variable.
        var: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
