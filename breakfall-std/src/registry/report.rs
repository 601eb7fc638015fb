//! Dispatch reports and isolated observer invocation.

use super::entry::{ObserverEntry, ObserverId};
use breakfall_core::{Exchange, HandlerId, Incident, ObserverError, SharedObserver};
use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

/// How one observer invocation ended.
#[derive(Debug)]
pub enum Outcome {
    /// The observer returned normally.
    Completed,
    /// The observer returned an error or panicked.
    Failed(ObserverError),
}

impl Outcome {
    /// Whether the observer completed normally.
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// One observer invoked by a dispatch.
pub struct Invoked<X: Exchange> {
    id: ObserverId,
    name: String,
    observer: SharedObserver<X>,
    outcome: Outcome,
}

impl<X: Exchange> Invoked<X> {
    /// Registration id of the observer.
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Name of the observer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The observer that was invoked.
    pub fn observer(&self) -> &SharedObserver<X> {
        &self.observer
    }

    /// How the invocation ended.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

impl<X: Exchange> fmt::Debug for Invoked<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoked")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// The ordered list of observers one dispatch invoked.
///
/// Scoped observers come first in registration order, then global ones in
/// registration order. An empty report means nothing was registered for the
/// incident, which is not an error.
pub struct Dispatch<X: Exchange> {
    handler_id: Option<HandlerId>,
    invoked: Vec<Invoked<X>>,
}

impl<X: Exchange> Dispatch<X> {
    pub(crate) fn with_capacity(handler_id: Option<HandlerId>, capacity: usize) -> Self {
        Self {
            handler_id,
            invoked: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, entry: &ObserverEntry<X>, outcome: Outcome) {
        self.invoked.push(Invoked {
            id: entry.id(),
            name: entry.name().to_owned(),
            observer: Arc::clone(entry.observer()),
            outcome,
        });
    }

    /// The handler id the dispatch resolved scoped observers for.
    pub fn handler_id(&self) -> Option<&HandlerId> {
        self.handler_id.as_ref()
    }

    /// Number of observers invoked.
    pub fn len(&self) -> usize {
        self.invoked.len()
    }

    /// Whether no observer was invoked.
    pub fn is_empty(&self) -> bool {
        self.invoked.is_empty()
    }

    /// Iterate over the invocations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Invoked<X>> {
        self.invoked.iter()
    }

    /// The invoked observers in order.
    pub fn observers(&self) -> impl Iterator<Item = &SharedObserver<X>> {
        self.invoked.iter().map(Invoked::observer)
    }

    /// Names of the invoked observers in order.
    pub fn names(&self) -> Vec<&str> {
        self.invoked.iter().map(Invoked::name).collect()
    }

    /// Invocations that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ObserverError> {
        self.invoked.iter().filter_map(|i| match &i.outcome {
            Outcome::Failed(err) => Some(err),
            Outcome::Completed => None,
        })
    }

    /// Whether every invoked observer completed normally.
    pub fn all_completed(&self) -> bool {
        self.invoked.iter().all(|i| i.outcome.is_completed())
    }
}

impl<X: Exchange> fmt::Debug for Dispatch<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("handler_id", &self.handler_id)
            .field("invoked", &self.invoked)
            .finish()
    }
}

impl<'a, X: Exchange> IntoIterator for &'a Dispatch<X> {
    type Item = &'a Invoked<X>;
    type IntoIter = std::slice::Iter<'a, Invoked<X>>;

    fn into_iter(self) -> Self::IntoIter {
        self.invoked.iter()
    }
}

/// Invoke one observer, containing both error returns and panics.
pub(crate) fn invoke<X: Exchange>(entry: &ObserverEntry<X>, incident: &Incident<'_, X>) -> Outcome {
    let observer = entry.observer();
    match panic::catch_unwind(AssertUnwindSafe(|| observer.on_error(incident))) {
        Ok(Ok(())) => Outcome::Completed,
        Ok(Err(source)) => {
            tracing::warn!(
                observer = %entry.name(),
                id = %entry.id(),
                error = %source,
                "Observer failed"
            );
            Outcome::Failed(ObserverError::Failed {
                name: entry.name().to_owned(),
                source,
            })
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(
                observer = %entry.name(),
                id = %entry.id(),
                panic = %message,
                "Observer panicked"
            );
            Outcome::Failed(ObserverError::Panicked {
                name: entry.name().to_owned(),
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
