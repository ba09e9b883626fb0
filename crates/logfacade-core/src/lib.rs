//! logfacade Core - logger facade with a process-wide registry
//!
//! Callers ask for a logger by name (or let the name be inferred from the
//! call site) and by event factory. This crate provides:
//! - A concurrency-safe registry with exactly-once construction per
//!   (name, factory type) key
//! - Name inference through `#[track_caller]` and the `logger!` macro
//! - Lazy, write-once backend binding with a no-op fallback
//! - Builtin backends (no-op, `tracing`) and an in-memory capture backend
//! - Structured internal diagnostics via `tracing`
//!
//! # Example
//!
//! ```
//! use logfacade_core::{get_logger_named, Logger};
//!
//! let a = get_logger_named("svc");
//! let b = get_logger_named("svc");
//! assert!(Logger::ptr_eq(&a, &b));
//!
//! // With no backend bound this is a no-op
//! a.info(|event| {
//!     event.insert("attempt", 1);
//!     "connected".to_string()
//! });
//! ```

pub mod backend;
pub mod binder;
pub mod errors;
pub mod facade;
pub mod key;
pub mod logger;
pub mod logging_facility;
pub mod name;
pub mod registry;
pub mod testing;

pub use logfacade_core_types::schema;

// Re-export commonly used types
pub use backend::{Backend, LogSink, Record};
pub use binder::{install, BackendBinder};
pub use errors::{FacadeError, FacadeErrorKind, Result};
pub use facade::{
    get_logger, get_logger_named, get_logger_named_with, get_logger_with, LoggerFactory,
};
pub use key::{FactoryIdentity, RegistryKey};
pub use logfacade_core_types::{
    DefaultFactory, EventFactory, EventKind, LogEvent, LogEventFactory,
};
pub use logger::{Logger, LoggerHandle};
pub use registry::LoggerRegistry;
