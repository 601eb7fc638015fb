//! Observer registry.
//!
//! Two collections of observers live here:
//!
//! - a **global** list, invoked for every incident;
//! - a **scoped** table mapping a [`HandlerId`] to the observers invoked only
//!   for incidents from that unit.
//!
//! [`Registry::dispatch`] invokes the scoped observers of the incident's unit
//! first, then the global ones, each group in registration order. That order
//! is part of the contract: a unit-local observer (a warning log, say) always
//! runs before catch-all ones (a pager), which lets downstream sinks enrich or
//! deduplicate.
//!
//! Observers are registered on a [`RegistryBuilder`] during startup; `build`
//! seals them into an immutable [`Registry`]. After that the set of observers
//! cannot change, so dispatch needs no lock and a `Registry` can be shared
//! through `Arc` by every request handler.

mod builder;
mod entry;
mod report;
mod table;

pub use builder::RegistryBuilder;
pub use entry::{ObserverEntry, ObserverId, ObserverMeta};
pub use report::{Dispatch, Invoked, Outcome};

use breakfall_core::{Exchange, HandlerId, Incident, SharedObserver};
use std::fmt;
use table::ScopedTable;

/// An immutable, thread-safe registry of observers.
///
/// Created by calling [`RegistryBuilder::build`].
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::<Api>::new()
///     .with_scoped("UsersController", local_log)
///     .with_global(pager)
///     .build();
///
/// let report = registry.dispatch(&Incident::new(&err).with_handler_id("UsersController"));
/// assert_eq!(report.len(), 2);
/// ```
pub struct Registry<X: Exchange> {
    global: Vec<ObserverEntry<X>>,
    scoped: ScopedTable<X>,
}

impl<X: Exchange> Registry<X> {
    pub(crate) fn new(global: Vec<ObserverEntry<X>>, scoped: ScopedTable<X>) -> Self {
        Self { global, scoped }
    }

    /// Start registering observers.
    pub fn builder() -> RegistryBuilder<X> {
        RegistryBuilder::new()
    }

    /// The observers a dispatch for `handler_id` would invoke, in order.
    ///
    /// Scoped observers of `handler_id` first (none if it is `None`, empty or
    /// unknown), then the global ones.
    pub fn resolve<'a>(
        &'a self,
        handler_id: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ObserverEntry<X>> + 'a {
        let scoped: &'a [ObserverEntry<X>] = match handler_id {
            Some(id) if !id.is_empty() => self.scoped.get(id),
            _ => &[],
        };
        scoped.iter().chain(self.global.iter())
    }

    /// Like [`resolve`](Self::resolve), yielding the observers themselves.
    pub fn observers_for<'a>(
        &'a self,
        handler_id: Option<&'a str>,
    ) -> impl Iterator<Item = &'a SharedObserver<X>> + 'a {
        self.resolve(handler_id).map(ObserverEntry::observer)
    }

    /// Invoke every applicable observer for `incident` and report what ran.
    ///
    /// Each invocation is isolated: an observer that returns an error or
    /// panics is logged and recorded in the report, and the remaining
    /// observers still run. Dispatch itself never fails and never touches
    /// the incident's payload.
    pub fn dispatch(&self, incident: &Incident<'_, X>) -> Dispatch<X> {
        let handler_id = incident.handler_id().cloned();
        let scoped_len = handler_id
            .as_deref()
            .map_or(0, |id| self.scoped.get(id).len());
        let mut report = Dispatch::with_capacity(handler_id, scoped_len + self.global.len());

        tracing::debug!(
            handler_id = ?report.handler_id(),
            error = ?incident.error(),
            "Dispatching incident"
        );

        for entry in self.resolve(incident.handler_id().map(HandlerId::as_str)) {
            let outcome = report::invoke(entry, incident);
            report.push(entry, outcome);
        }

        tracing::debug!(
            handler_id = ?report.handler_id(),
            invoked = report.len(),
            failed = report.failures().count(),
            "Incident dispatched"
        );

        report
    }

    /// Global observers in registration order.
    pub fn global(&self) -> &[ObserverEntry<X>] {
        &self.global
    }

    /// Scoped observers of `handler_id` in registration order.
    ///
    /// Empty for units nothing was registered for.
    pub fn scoped(&self, handler_id: &str) -> &[ObserverEntry<X>] {
        self.scoped.get(handler_id)
    }

    /// Units that have scoped observers, in no particular order.
    pub fn units(&self) -> impl Iterator<Item = &HandlerId> {
        self.scoped.units()
    }

    /// Number of global observers.
    pub fn global_len(&self) -> usize {
        self.global.len()
    }

    /// Number of observers scoped to `handler_id`.
    pub fn scoped_len(&self, handler_id: &str) -> usize {
        self.scoped.get(handler_id).len()
    }

    /// Get the number of registered observers across both scopes.
    pub fn len(&self) -> usize {
        self.global.len() + self.scoped.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<X: Exchange> Default for Registry<X> {
    fn default() -> Self {
        RegistryBuilder::new().build()
    }
}

impl<X: Exchange> fmt::Debug for Registry<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("global", &self.global)
            .field("scoped", &self.scoped.entries().collect::<Vec<_>>())
            .finish()
    }
}
