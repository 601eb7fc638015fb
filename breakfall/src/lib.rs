//! # breakfall - Ordered Observers for Unhandled Errors
//!
//! `breakfall` lets an application register observers (log writers,
//! alerting hooks, metrics counters) that are told about every error a
//! request handler fails to recover from. It is a diagnostic layer only:
//! the error keeps propagating exactly as it would without it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use breakfall::prelude::*;
//! use std::sync::Arc;
//!
//! struct Api;
//!
//! impl Exchange for Api {
//!     type Error = ApiError;
//!     type Request = Request;
//!     type Actor = User;
//!     type Params = Params;
//! }
//!
//! // Startup: register, then seal.
//! let mut builder = RegistryBuilder::<Api>::new();
//! builder.on_error_for("UsersController", |incident| warn_locally(incident));
//! builder.register_global(TracingObserver::named("unhandled"));
//! let registry = Arc::new(builder.build());
//!
//! // Per request: guard the handling unit.
//! let supervisor = Supervisor::new(registry);
//! let response = supervisor.guard(&controller, || controller.show())?;
//! ```
//!
//! ## Ordering
//!
//! For an incident from unit `U`, observers scoped to `U` run first in
//! registration order, then global observers in registration order.
//!
//! ## Failure isolation
//!
//! An observer that returns an error or panics is logged and recorded in
//! the [`Dispatch`] report; the remaining observers still run and the
//! original error is untouched.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use breakfall_core::{
    // Unit capabilities
    ActorProvider,
    // Error types
    BoxError,
    ConfigError,
    // Exchange
    Exchange,
    // Observer
    FnObserver,
    // Identifiers
    HandlerId,
    HandlingUnit,
    // Invocation context
    Incident,
    Observer,
    ObserverError,
    SharedObserver,
    TryFnObserver,
    UnitName,
};

// Registry
pub use breakfall_std::registry::{
    Dispatch, Invoked, ObserverEntry, ObserverId, ObserverMeta, Outcome, Registry, RegistryBuilder,
};

// Interception
pub use breakfall_std::supervisor::Supervisor;

// Settings
pub use breakfall_std::config::{BreakfallConfig, Instrumentation};

/// Instrumentation settings.
pub mod config {
    pub use breakfall_std::config::{
        BreakfallConfig, ENV_ENABLED, ENV_UNITS, Instrumentation,
    };
}

/// Standard observer implementations.
pub mod observers {
    pub use breakfall_std::observers::{CountingObserver, TracingObserver};
}

/// Tower integration.
#[cfg(feature = "tower")]
pub mod tower {
    pub use breakfall_std::tower::{ActorFn, BreakfallLayer, BreakfallService};
}

/// Testing utilities.
pub mod testing {
    pub use breakfall_std::testing::{
        CallLog, FailingObserver, PanickingObserver, Recorded, RecordingObserver,
    };
}

/// Prelude module - common imports for Breakfall.
///
/// # Usage
///
/// ```rust,ignore
/// use breakfall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ActorProvider,
        BoxError,
        Dispatch,
        Exchange,
        HandlerId,
        HandlingUnit,
        Incident,
        Instrumentation,
        Observer,
        Registry,
        RegistryBuilder,
        Supervisor,
        observers::TracingObserver,
    };
}
