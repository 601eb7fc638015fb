//! Registration phase.

use super::{
    Registry,
    entry::{ObserverEntry, ObserverId, ObserverMeta},
    table::ScopedTable,
};
use breakfall_core::{Exchange, FnObserver, HandlerId, Incident, Observer, SharedObserver};
use std::sync::Arc;

/// Builder collecting observers before the registry is sealed.
///
/// Registration is meant to happen once, at startup, on one thread. Call
/// [`build`](Self::build) to get an immutable [`Registry`] that can be
/// shared across request handlers without locking.
///
/// # Example
/// ```ignore
/// let mut builder = RegistryBuilder::<Api>::new();
/// builder.on_error_for("UsersController", |incident| warn_locally(incident));
/// builder.on_error(|incident| page_on_call(incident));
/// let registry = Arc::new(builder.build());
/// ```
pub struct RegistryBuilder<X: Exchange> {
    global: Vec<ObserverEntry<X>>,
    scoped: ScopedTable<X>,
    next_id: u64,
}

impl<X: Exchange> RegistryBuilder<X> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            global: Vec::new(),
            scoped: ScopedTable::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_global(&mut self, observer: SharedObserver<X>, meta: ObserverMeta) -> ObserverId {
        let id = self.next_id();
        self.global.push(ObserverEntry::new(id, observer, meta));
        id
    }

    fn push_scoped(
        &mut self,
        handler_id: HandlerId,
        observer: SharedObserver<X>,
        meta: ObserverMeta,
    ) -> ObserverId {
        let id = self.next_id();
        self.scoped
            .push(handler_id, ObserverEntry::new(id, observer, meta));
        id
    }

    /// Register an observer invoked for every incident.
    pub fn register_global<O: Observer<X>>(&mut self, observer: O) -> ObserverId {
        self.push_global(Arc::new(observer), ObserverMeta::new())
    }

    /// Register a global observer with specified metadata.
    pub fn register_global_with_meta<O: Observer<X>>(
        &mut self,
        observer: O,
        meta: ObserverMeta,
    ) -> ObserverId {
        self.push_global(Arc::new(observer), meta)
    }

    /// Register an observer invoked only for incidents from `handler_id`.
    ///
    /// Any representation of the unit's name is accepted; they all resolve
    /// to the same entry.
    pub fn register_scoped<O: Observer<X>>(
        &mut self,
        handler_id: impl Into<HandlerId>,
        observer: O,
    ) -> ObserverId {
        self.push_scoped(handler_id.into(), Arc::new(observer), ObserverMeta::new())
    }

    /// Register a scoped observer with specified metadata.
    pub fn register_scoped_with_meta<O: Observer<X>>(
        &mut self,
        handler_id: impl Into<HandlerId>,
        observer: O,
        meta: ObserverMeta,
    ) -> ObserverId {
        self.push_scoped(handler_id.into(), Arc::new(observer), meta)
    }

    /// Register an already shared observer globally.
    ///
    /// Dispatch reports hand back this same `Arc`, so callers can check
    /// identity with [`Arc::ptr_eq`].
    pub fn register_shared(&mut self, observer: SharedObserver<X>) -> ObserverId {
        self.push_global(observer, ObserverMeta::new())
    }

    /// Register an already shared observer for `handler_id`.
    pub fn register_shared_scoped(
        &mut self,
        handler_id: impl Into<HandlerId>,
        observer: SharedObserver<X>,
    ) -> ObserverId {
        self.push_scoped(handler_id.into(), observer, ObserverMeta::new())
    }

    /// Register a closure invoked for every incident.
    pub fn on_error<F>(&mut self, f: F) -> ObserverId
    where
        F: Fn(&Incident<'_, X>) + Send + Sync + 'static,
    {
        self.register_global(FnObserver::new(f))
    }

    /// Register a closure invoked only for incidents from `handler_id`.
    pub fn on_error_for<F>(&mut self, handler_id: impl Into<HandlerId>, f: F) -> ObserverId
    where
        F: Fn(&Incident<'_, X>) + Send + Sync + 'static,
    {
        self.register_scoped(handler_id, FnObserver::new(f))
    }

    /// Register a global observer (by-value version).
    pub fn with_global<O: Observer<X>>(mut self, observer: O) -> Self {
        self.register_global(observer);
        self
    }

    /// Register a scoped observer (by-value version).
    pub fn with_scoped<O: Observer<X>>(
        mut self,
        handler_id: impl Into<HandlerId>,
        observer: O,
    ) -> Self {
        self.register_scoped(handler_id, observer);
        self
    }

    /// Remove every global observer.
    pub fn clear_global(&mut self) {
        self.global.clear();
    }

    /// Remove every scoped observer.
    pub fn clear_scoped(&mut self) {
        self.scoped.clear();
    }

    /// Remove all observers.
    pub fn clear(&mut self) {
        self.clear_global();
        self.clear_scoped();
    }

    /// Get the number of registered observers across both scopes.
    pub fn len(&self) -> usize {
        self.global.len() + self.scoped.len()
    }

    /// Check if the builder has no observers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seal the registration phase.
    pub fn build(self) -> Registry<X> {
        tracing::debug!(
            global = self.global.len(),
            scoped = self.scoped.len(),
            "Observer registry sealed"
        );
        Registry::new(self.global, self.scoped)
    }
}

impl<X: Exchange> Default for RegistryBuilder<X> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Exchange for Plain {
        type Error = String;
        type Request = ();
        type Actor = ();
        type Params = ();
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let mut builder = RegistryBuilder::<Plain>::new();
        let a = builder.on_error(|_| {});
        let b = builder.on_error_for("Foo", |_| {});
        let c = builder.on_error(|_| {});
        assert!(a < b && b < c);
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut builder = RegistryBuilder::<Plain>::new();
        builder.on_error(|_| {});
        builder.on_error_for("Foo", |_| {});
        builder.on_error_for("Bar", |_| {});

        builder.clear_global();
        assert_eq!(builder.len(), 2);
        builder.clear_scoped();
        assert!(builder.is_empty());

        builder.on_error(|_| {});
        builder.clear();
        assert!(builder.is_empty());
    }
}
