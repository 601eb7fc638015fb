//! # Handling units
//!
//! A handling unit is whatever owns the code that ran when the error
//! escaped: a controller, a route handler, a service. The interception
//! point asks the unit for:
//!
//! 1. Its [`HandlerId`], used to select scoped observers.
//! 2. The request and params it is serving, when it holds them.
//! 3. Optionally, an [`ActorProvider`] capability. Units without an actor
//!    concept keep the default and incidents are dispatched without one.
//!
//! The capability is fixed by the unit's type when the pipeline is wired,
//! so no per-request probing takes place.

use crate::{exchange::Exchange, handler_id::HandlerId};

/// Capability of exposing the identity associated with the current request.
pub trait ActorProvider<X: Exchange>: Send + Sync {
    /// The current actor, if one is known.
    fn current_actor(&self) -> Option<&X::Actor>;
}

/// A request-handling unit as seen by an interception point.
pub trait HandlingUnit<X: Exchange>: Send + Sync {
    /// The unit's identifier.
    fn handler_id(&self) -> HandlerId;

    /// The request being served, if the unit holds it.
    fn request(&self) -> Option<&X::Request> {
        None
    }

    /// The request parameters, if the unit holds them.
    fn params(&self) -> Option<&X::Params> {
        None
    }

    /// The unit's actor capability, if it has one.
    fn actor_provider(&self) -> Option<&dyn ActorProvider<X>> {
        None
    }

    /// The current actor, resolved through [`actor_provider`](Self::actor_provider).
    fn actor(&self) -> Option<&X::Actor> {
        self.actor_provider()?.current_actor()
    }
}

impl<X: Exchange> HandlingUnit<X> for HandlerId {
    fn handler_id(&self) -> HandlerId {
        self.clone()
    }
}

impl<X: Exchange> HandlingUnit<X> for str {
    fn handler_id(&self) -> HandlerId {
        HandlerId::from(self)
    }
}

impl<X: Exchange, U: HandlingUnit<X> + ?Sized> HandlingUnit<X> for &U {
    fn handler_id(&self) -> HandlerId {
        (**self).handler_id()
    }

    fn request(&self) -> Option<&X::Request> {
        (**self).request()
    }

    fn params(&self) -> Option<&X::Params> {
        (**self).params()
    }

    fn actor_provider(&self) -> Option<&dyn ActorProvider<X>> {
        (**self).actor_provider()
    }
}
