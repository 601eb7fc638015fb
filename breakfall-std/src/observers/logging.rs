//! Logging observer - structured `tracing` event per incident.

use breakfall_core::{BoxError, Exchange, Incident, Observer};
use tracing::Level;

/// An observer that emits one `tracing` event per incident.
///
/// The event carries the error (`Debug`), the handler id and whether an
/// actor was attached. Request and params are left out; log them from an
/// observer of your own if your types are safe to print.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = RegistryBuilder::<Api>::new();
/// builder.register_scoped("UsersController", TracingObserver::new().with_level(Level::WARN));
/// builder.register_global(TracingObserver::named("unhandled"));
/// ```
#[derive(Debug, Clone)]
pub struct TracingObserver {
    name: &'static str,
    level: Level,
}

impl TracingObserver {
    /// Create a new `TracingObserver` logging at `ERROR`.
    pub fn new() -> Self {
        Self {
            name: "tracing",
            level: Level::ERROR,
        }
    }

    /// Create a new `TracingObserver` with a custom name.
    ///
    /// The name is included in every event it emits.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            ..Self::new()
        }
    }

    /// Set the level events are emitted at.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! emit {
    ($level:expr, $name:expr, $incident:expr) => {
        tracing::event!(
            $level,
            observer = %$name,
            handler_id = ?$incident.handler_id(),
            error = ?$incident.error(),
            has_actor = $incident.actor().is_some(),
            "Unhandled error"
        )
    };
}

impl<X: Exchange> Observer<X> for TracingObserver {
    fn on_error(&self, incident: &Incident<'_, X>) -> Result<(), BoxError> {
        // `event!` needs a constant level.
        if self.level == Level::ERROR {
            emit!(Level::ERROR, self.name, incident);
        } else if self.level == Level::WARN {
            emit!(Level::WARN, self.name, incident);
        } else if self.level == Level::INFO {
            emit!(Level::INFO, self.name, incident);
        } else if self.level == Level::DEBUG {
            emit!(Level::DEBUG, self.name, incident);
        } else {
            emit!(Level::TRACE, self.name, incident);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}
