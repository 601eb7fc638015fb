//! Standard observer implementations.

pub mod counting;
pub mod logging;

pub use counting::CountingObserver;
pub use logging::TracingObserver;
