//! Supervisory interception point.
//!
//! A [`Supervisor`] wraps the execution of a handling unit. When the unit's
//! body returns an error that it did not recover from itself, the
//! supervisor builds an [`Incident`] from what the unit exposes, dispatches
//! it once, and hands the very same error back to the caller. Successful
//! bodies, and units outside the configured [`Instrumentation`], pass
//! through untouched.
//!
//! Panics inside the body are not unhandled errors in this sense; they
//! unwind through the supervisor without a dispatch.
//!
//! # Example
//!
//! ```rust,ignore
//! let supervisor = Supervisor::new(Arc::new(registry));
//!
//! let response = supervisor.guard(&controller, || controller.show(id))?;
//! let response = supervisor.guard_async(&controller, controller.index()).await?;
//! ```

use crate::{
    config::{BreakfallConfig, Instrumentation},
    registry::{Dispatch, Registry},
};
use breakfall_core::{Exchange, HandlingUnit, Incident};
use std::{fmt, future::Future, sync::Arc};

/// Interception point reporting unhandled errors to a [`Registry`].
pub struct Supervisor<X: Exchange> {
    registry: Arc<Registry<X>>,
    instrumentation: Instrumentation,
}

impl<X: Exchange> Supervisor<X> {
    /// Create a supervisor instrumenting every unit.
    pub fn new(registry: Arc<Registry<X>>) -> Self {
        Self {
            registry,
            instrumentation: Instrumentation::All,
        }
    }

    /// Create a supervisor from loaded settings.
    pub fn from_config(registry: Arc<Registry<X>>, config: &BreakfallConfig) -> Self {
        Self::new(registry).with_instrumentation(config.instrumentation.clone())
    }

    /// Restrict which units are instrumented.
    pub fn with_instrumentation(mut self, instrumentation: Instrumentation) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    /// The registry incidents are dispatched to.
    pub fn registry(&self) -> &Arc<Registry<X>> {
        &self.registry
    }

    /// The instrumentation policy.
    pub fn instrumentation(&self) -> &Instrumentation {
        &self.instrumentation
    }

    /// Whether incidents from `handler_id` are dispatched.
    pub fn is_instrumented(&self, handler_id: &str) -> bool {
        self.instrumentation.covers(handler_id)
    }

    /// Report `error`, raised inside `unit`, to the registry.
    ///
    /// Returns `None` without dispatching if the unit is not instrumented.
    pub fn intercept<U>(&self, unit: &U, error: &X::Error) -> Option<Dispatch<X>>
    where
        U: HandlingUnit<X> + ?Sized,
    {
        let handler_id = unit.handler_id();
        if !self.is_instrumented(&handler_id) {
            tracing::trace!(%handler_id, "Unit not instrumented, skipping dispatch");
            return None;
        }

        tracing::debug!(%handler_id, error = ?error, "Intercepted unhandled error");

        let mut incident = Incident::<X>::new(error)
            .with_actor_opt(unit.actor())
            .with_handler_id(handler_id);
        if let Some(request) = unit.request() {
            incident = incident.with_request(request);
        }
        if let Some(params) = unit.params() {
            incident = incident.with_params(params);
        }

        Some(self.registry.dispatch(&incident))
    }

    /// Run `body` on behalf of `unit`, reporting an escaping error.
    ///
    /// The returned result is exactly what `body` returned.
    pub fn guard<U, T, F>(&self, unit: &U, body: F) -> Result<T, X::Error>
    where
        U: HandlingUnit<X> + ?Sized,
        F: FnOnce() -> Result<T, X::Error>,
    {
        body().inspect_err(|error| {
            self.intercept(unit, error);
        })
    }

    /// Await `body` on behalf of `unit`, reporting an escaping error.
    ///
    /// The returned result is exactly what `body` resolved to.
    pub async fn guard_async<U, T, Fut>(&self, unit: &U, body: Fut) -> Result<T, X::Error>
    where
        U: HandlingUnit<X> + ?Sized,
        Fut: Future<Output = Result<T, X::Error>>,
    {
        body.await.inspect_err(|error| {
            self.intercept(unit, error);
        })
    }
}

impl<X: Exchange> Clone for Supervisor<X> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            instrumentation: self.instrumentation.clone(),
        }
    }
}

impl<X: Exchange> fmt::Debug for Supervisor<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("registry", &self.registry)
            .field("instrumentation", &self.instrumentation)
            .finish()
    }
}
