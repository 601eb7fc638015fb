//! Counting observer.

use breakfall_core::{BoxError, Exchange, Incident, Observer};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// An observer that counts incidents.
///
/// Clones share the same counter, so keep one clone to read it after
/// registering the other.
#[derive(Debug, Clone, Default)]
pub struct CountingObserver {
    count: Arc<AtomicU64>,
}

impl CountingObserver {
    /// Create a new counting observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Reset the counter, returning the previous count.
    pub fn reset(&self) -> u64 {
        self.count.swap(0, Ordering::Relaxed)
    }
}

impl<X: Exchange> Observer<X> for CountingObserver {
    fn on_error(&self, _incident: &Incident<'_, X>) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}
