//! # Observer
//!
//! An observer is told about every unhandled error that reaches a registry
//! it is registered with. It is side-effecting only (write a log line, page
//! someone, bump a counter) and can never change what happens to the error.
//!
//! Observers run synchronously, inline on the thread that is handling the
//! failed request. Anything slow belongs behind a channel owned by the
//! observer itself.

use crate::{error::BoxError, exchange::Exchange, incident::Incident};
use std::sync::Arc;

/// A callback invoked for unhandled errors.
///
/// Returning `Err` marks this invocation as failed in the dispatch report.
/// It does not stop the other observers and does not reach the request
/// pipeline.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Observer` for `{X}`",
    label = "missing `Observer<{X}>` implementation",
    note = "Implement `on_error`, or register a closure with `on_error`/`on_error_for`."
)]
pub trait Observer<X: Exchange>: Send + Sync + 'static {
    /// Called once per dispatched incident.
    fn on_error(&self, incident: &Incident<'_, X>) -> Result<(), BoxError>;

    /// Name used in logs and dispatch reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared, type-erased observer as stored by registries.
pub type SharedObserver<X> = Arc<dyn Observer<X>>;

impl<X: Exchange, O: Observer<X> + ?Sized> Observer<X> for Arc<O> {
    fn on_error(&self, incident: &Incident<'_, X>) -> Result<(), BoxError> {
        (**self).on_error(incident)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<X: Exchange, O: Observer<X> + ?Sized> Observer<X> for Box<O> {
    fn on_error(&self, incident: &Incident<'_, X>) -> Result<(), BoxError> {
        (**self).on_error(incident)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapter turning an infallible closure into an [`Observer`].
pub struct FnObserver<F> {
    f: F,
    name: &'static str,
}

impl<F> FnObserver<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f, name: "closure" }
    }

    /// Wrap a closure under an explicit name.
    pub fn named(name: &'static str, f: F) -> Self {
        Self { f, name }
    }
}

impl<X, F> Observer<X> for FnObserver<F>
where
    X: Exchange,
    F: Fn(&Incident<'_, X>) + Send + Sync + 'static,
{
    fn on_error(&self, incident: &Incident<'_, X>) -> Result<(), BoxError> {
        (self.f)(incident);
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Adapter turning a fallible closure into an [`Observer`].
pub struct TryFnObserver<F> {
    f: F,
    name: &'static str,
}

impl<F> TryFnObserver<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f, name: "closure" }
    }

    /// Wrap a closure under an explicit name.
    pub fn named(name: &'static str, f: F) -> Self {
        Self { f, name }
    }
}

impl<X, F> Observer<X> for TryFnObserver<F>
where
    X: Exchange,
    F: Fn(&Incident<'_, X>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn on_error(&self, incident: &Incident<'_, X>) -> Result<(), BoxError> {
        (self.f)(incident)
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Plain;

    impl Exchange for Plain {
        type Error = &'static str;
        type Request = ();
        type Actor = ();
        type Params = ();
    }

    struct Counter(AtomicUsize);

    impl Observer<Plain> for Counter {
        fn on_error(&self, _incident: &Incident<'_, Plain>) -> Result<(), BoxError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        let counter = Counter(AtomicUsize::new(0));
        assert!(Observer::<Plain>::name(&counter).ends_with("Counter"));
    }

    #[test]
    fn test_arc_forwards() {
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let shared: SharedObserver<Plain> = counter.clone();
        let error = "boom";
        shared.on_error(&Incident::<Plain>::new(&error)).unwrap();
        shared.on_error(&Incident::<Plain>::new(&error)).unwrap();
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fn_observers() {
        let error = "boom";
        let ok = FnObserver::named("ok", |incident: &Incident<'_, Plain>| {
            assert_eq!(*incident.error(), "boom");
        });
        assert!(ok.on_error(&Incident::<Plain>::new(&error)).is_ok());
        assert_eq!(Observer::<Plain>::name(&ok), "ok");

        let failing =
            TryFnObserver::new(|_: &Incident<'_, Plain>| Err::<(), BoxError>("nope".into()));
        assert!(failing.on_error(&Incident::<Plain>::new(&error)).is_err());
    }
}
