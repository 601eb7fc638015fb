//! Testing utilities for Breakfall.
//!
//! This module provides observers that make it easy to assert what a
//! registry or interception point did.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of observer tags
//! - [`RecordingObserver`]: Records an owned snapshot of every incident
//! - [`FailingObserver`]: Always returns an error
//! - [`PanickingObserver`]: Always panics

use breakfall_core::{BoxError, Exchange, HandlerId, Incident, Observer};
use std::sync::{Arc, Mutex};

// ============================================================================
// Call Log
// ============================================================================

/// A shared log of observer tags, in invocation order.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// builder.register_scoped("Foo", RecordingObserver::with_log("c1", &log));
/// builder.register_global(RecordingObserver::with_log("g1", &log));
///
/// registry.dispatch(&incident);
/// assert_eq!(log.entries(), vec!["c1", "g1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag.
    pub fn push(&self, tag: &'static str) {
        self.0.lock().unwrap().push(tag);
    }

    /// Get a copy of the logged tags.
    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

/// Owned snapshot of one incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// Handler id the incident came with.
    pub handler_id: Option<HandlerId>,
    /// The error, formatted with `Debug`.
    pub error: String,
    /// Whether a request was attached.
    pub has_request: bool,
    /// Whether an actor was attached.
    pub has_actor: bool,
    /// Whether params were attached.
    pub has_params: bool,
}

/// An observer that records every incident it receives.
///
/// Clones share their records, so keep one clone for assertions.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingObserver::new("audit");
/// builder.register_global(recorder.clone());
///
/// registry.dispatch(&incident);
///
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingObserver {
    tag: &'static str,
    records: Arc<Mutex<Vec<Recorded>>>,
    log: Option<CallLog>,
}

impl RecordingObserver {
    /// Create a new recording observer.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            records: Arc::new(Mutex::new(Vec::new())),
            log: None,
        }
    }

    /// Create a recording observer that also appends its tag to `log`.
    pub fn with_log(tag: &'static str, log: &CallLog) -> Self {
        Self {
            log: Some(log.clone()),
            ..Self::new(tag)
        }
    }

    /// Get a clone of the recorded incidents.
    pub fn records(&self) -> Vec<Recorded> {
        self.records.lock().unwrap().clone()
    }

    /// Get the number of recorded incidents.
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Clear all recorded incidents.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl<X: Exchange> Observer<X> for RecordingObserver {
    fn on_error(&self, incident: &Incident<'_, X>) -> Result<(), BoxError> {
        self.records.lock().unwrap().push(Recorded {
            handler_id: incident.handler_id().cloned(),
            error: format!("{:?}", incident.error()),
            has_request: incident.request().is_some(),
            has_actor: incident.actor().is_some(),
            has_params: incident.params().is_some(),
        });
        if let Some(log) = &self.log {
            log.push(self.tag);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.tag
    }
}

// ============================================================================
// Misbehaving Observers
// ============================================================================

/// An observer that always returns an error.
#[derive(Debug, Clone)]
pub struct FailingObserver {
    message: &'static str,
}

impl FailingObserver {
    /// Create an observer failing with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<X: Exchange> Observer<X> for FailingObserver {
    fn on_error(&self, _incident: &Incident<'_, X>) -> Result<(), BoxError> {
        Err(self.message.into())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// An observer that always panics.
#[derive(Debug, Clone)]
pub struct PanickingObserver {
    message: &'static str,
}

impl PanickingObserver {
    /// Create an observer panicking with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<X: Exchange> Observer<X> for PanickingObserver {
    fn on_error(&self, _incident: &Incident<'_, X>) -> Result<(), BoxError> {
        panic!("{}", self.message)
    }

    fn name(&self) -> &str {
        "panicking"
    }
}
