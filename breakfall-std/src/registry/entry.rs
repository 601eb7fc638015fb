//! Registered observers and their metadata.

use breakfall_core::{Exchange, SharedObserver};
use std::fmt;

/// Identifies one registration within a registry.
///
/// Ids grow with registration order across both scopes, so they double as
/// a record of when an observer was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

impl ObserverId {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registration-time data that is not part of the observer itself.
///
/// Currently just a display name, shown in logs and dispatch reports in
/// place of [`Observer::name`](breakfall_core::Observer::name). Handy when
/// the same observer type is registered more than once.
#[derive(Debug, Clone, Default)]
pub struct ObserverMeta {
    name: Option<String>,
}

impl ObserverMeta {
    /// Metadata that keeps the observer's own name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report this registration under `name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// An observer together with its registration data.
pub struct ObserverEntry<X: Exchange> {
    id: ObserverId,
    observer: SharedObserver<X>,
    meta: ObserverMeta,
}

impl<X: Exchange> ObserverEntry<X> {
    pub(crate) fn new(id: ObserverId, observer: SharedObserver<X>, meta: ObserverMeta) -> Self {
        Self { id, observer, meta }
    }

    /// The registration id.
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// The observer itself.
    pub fn observer(&self) -> &SharedObserver<X> {
        &self.observer
    }

    /// The name from the metadata, falling back to the observer's own name.
    pub fn name(&self) -> &str {
        self.meta.name.as_deref().unwrap_or_else(|| self.observer.name())
    }
}

impl<X: Exchange> fmt::Debug for ObserverEntry<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverEntry")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}
