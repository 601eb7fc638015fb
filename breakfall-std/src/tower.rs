//! Tower integration for breakfall.
//!
//! This module provides a tower `Layer` that reports errors escaping the
//! wrapped `Service` to a [`Registry`](crate::registry::Registry).
//!
//! # Overview
//!
//! - [`BreakfallLayer`] wraps a service in [`BreakfallService`]
//! - When the inner response future resolves to `Err`, an incident is built
//!   from a clone of the request, the layer's handler id and an optional
//!   actor extractor, then dispatched once
//! - The error is handed back to the caller unchanged
//!
//! `poll_ready` errors are passed through without dispatch: no request was
//! handled yet.
//!
//! # Example
//!
//! ```rust,ignore
//! use breakfall::tower::BreakfallLayer;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(BreakfallLayer::new(supervisor, "users").with_actor(|req| current_user(req)))
//!     .service(users_service);
//! ```

use crate::supervisor::Supervisor;
use breakfall_core::{ActorProvider, Exchange, HandlerId, HandlingUnit};
use futures::future::BoxFuture;
use std::{
    fmt,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

/// Extracts the actor from a request.
pub type ActorFn<X> =
    Arc<dyn Fn(&<X as Exchange>::Request) -> Option<<X as Exchange>::Actor> + Send + Sync>;

// ============================================================================
// Layer
// ============================================================================

/// Applies [`BreakfallService`] to a tower service.
pub struct BreakfallLayer<X: Exchange> {
    supervisor: Supervisor<X>,
    handler_id: HandlerId,
    actor: Option<ActorFn<X>>,
}

impl<X: Exchange> BreakfallLayer<X> {
    /// Create a layer reporting under `handler_id`.
    pub fn new(supervisor: Supervisor<X>, handler_id: impl Into<HandlerId>) -> Self {
        Self {
            supervisor,
            handler_id: handler_id.into(),
            actor: None,
        }
    }

    /// Resolve the actor of each failed request with `f`.
    pub fn with_actor<F>(mut self, f: F) -> Self
    where
        F: Fn(&X::Request) -> Option<X::Actor> + Send + Sync + 'static,
    {
        self.actor = Some(Arc::new(f));
        self
    }
}

impl<X: Exchange> Clone for BreakfallLayer<X> {
    fn clone(&self) -> Self {
        Self {
            supervisor: self.supervisor.clone(),
            handler_id: self.handler_id.clone(),
            actor: self.actor.clone(),
        }
    }
}

impl<X: Exchange> fmt::Debug for BreakfallLayer<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakfallLayer")
            .field("handler_id", &self.handler_id)
            .field("actor", &self.actor.is_some())
            .finish()
    }
}

impl<S, X: Exchange> Layer<S> for BreakfallLayer<X> {
    type Service = BreakfallService<S, X>;

    fn layer(&self, inner: S) -> Self::Service {
        BreakfallService {
            inner,
            supervisor: self.supervisor.clone(),
            handler_id: self.handler_id.clone(),
            actor: self.actor.clone(),
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// A service reporting its inner service's errors.
pub struct BreakfallService<S, X: Exchange> {
    inner: S,
    supervisor: Supervisor<X>,
    handler_id: HandlerId,
    actor: Option<ActorFn<X>>,
}

impl<S: Clone, X: Exchange> Clone for BreakfallService<S, X> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            supervisor: self.supervisor.clone(),
            handler_id: self.handler_id.clone(),
            actor: self.actor.clone(),
        }
    }
}

impl<S, X> Service<X::Request> for BreakfallService<S, X>
where
    X: Exchange,
    X::Request: Clone,
    S: Service<X::Request, Error = X::Error>,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = S::Response;
    type Error = X::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: X::Request) -> Self::Future {
        // Only pay for the clone when a failure would be reported.
        let captured = self
            .supervisor
            .is_instrumented(&self.handler_id)
            .then(|| request.clone());
        let response = self.inner.call(request);

        let supervisor = self.supervisor.clone();
        let handler_id = self.handler_id.clone();
        let actor = self.actor.clone();

        Box::pin(async move {
            response.await.inspect_err(|error| {
                if let Some(request) = &captured {
                    let unit = RequestUnit::<X> {
                        handler_id: &handler_id,
                        actor: actor.as_ref().and_then(|f| f(request)),
                        request,
                    };
                    supervisor.intercept(&unit, error);
                }
            })
        })
    }
}

// ============================================================================
// Request as handling unit
// ============================================================================

struct RequestUnit<'a, X: Exchange> {
    handler_id: &'a HandlerId,
    request: &'a X::Request,
    actor: Option<X::Actor>,
}

impl<X: Exchange> HandlingUnit<X> for RequestUnit<'_, X> {
    fn handler_id(&self) -> HandlerId {
        self.handler_id.clone()
    }

    fn request(&self) -> Option<&X::Request> {
        Some(self.request)
    }

    fn actor_provider(&self) -> Option<&dyn ActorProvider<X>> {
        Some(self)
    }
}

impl<X: Exchange> ActorProvider<X> for RequestUnit<'_, X> {
    fn current_actor(&self) -> Option<&X::Actor> {
        self.actor.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================
