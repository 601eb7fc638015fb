//! # breakfall-core
//!
//! Core traits for the Breakfall error observer registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! observer plugins and pipeline integrations that don't need the full
//! `breakfall-std` implementation.
//!
//! # Building Blocks
//!
//! ## [`Exchange`]
//!
//! Names the error, request, actor and params types of one request
//! pipeline. Everything else is generic over an exchange.
//!
//! ## [`Observer`]
//!
//! A side-effecting callback told about unhandled errors. Observers never
//! alter or suppress the error they observe.
//!
//! ## [`Incident`]
//!
//! The borrowed invocation context of one dispatch: the error plus the
//! request, actor, params and [`HandlerId`] it came with.
//!
//! ## [`HandlingUnit`]
//!
//! What an interception point knows about the code that failed: its id and,
//! optionally, an [`ActorProvider`] capability.
//!
//! # Error Types
//!
//! - [`ObserverError`] - Failure of one observer invocation
//! - [`ConfigError`] - Instrumentation settings errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod exchange;
mod handler_id;
mod incident;
mod observer;
mod unit;

// Re-exports
pub use error::{BoxError, ConfigError, ObserverError};
pub use exchange::Exchange;
pub use handler_id::{HandlerId, UnitName};
pub use incident::Incident;
pub use observer::{FnObserver, Observer, SharedObserver, TryFnObserver};
pub use unit::{ActorProvider, HandlingUnit};
