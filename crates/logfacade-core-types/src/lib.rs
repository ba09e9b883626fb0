//! Core types shared by the logger facade and its backends
//!
//! This crate holds the value types that sit at the edge of the facade:
//!
//! - **Event kinds**: the [`EventKind`] marker and the general purpose [`LogEvent`]
//! - **Event factories**: [`EventFactory`] and the [`DefaultFactory`] built on `Default`
//! - **Schema constants**: canonical field keys and event names for diagnostics

pub mod event;
pub mod factory;
pub mod schema;

pub use event::{EventKind, LogEvent};
pub use factory::{DefaultFactory, EventFactory, LogEventFactory};
