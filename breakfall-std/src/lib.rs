//! # breakfall-std
//!
//! Standard implementations for the Breakfall error observer registry.
//!
//! This crate provides:
//! - **Registry**: [`RegistryBuilder`], [`Registry`] and the [`Dispatch`] report
//! - **Interception**: [`Supervisor`], guarding handling units
//! - **Settings**: [`Instrumentation`], [`BreakfallConfig`]
//! - **Standard observers**: Tracing, Counting
//! - **Tower integration** (feature `tower`): [`tower::BreakfallLayer`]
//! - **Testing**: recording and misbehaving observers
//!
//! [`RegistryBuilder`]: registry::RegistryBuilder
//! [`Registry`]: registry::Registry
//! [`Dispatch`]: registry::Dispatch
//! [`Supervisor`]: supervisor::Supervisor
//! [`Instrumentation`]: config::Instrumentation
//! [`BreakfallConfig`]: config::BreakfallConfig

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use breakfall_core;

// Modules
pub mod config;
pub mod observers;
pub mod registry;
pub mod supervisor;
pub mod testing;

#[cfg(feature = "tower")]
pub mod tower;
