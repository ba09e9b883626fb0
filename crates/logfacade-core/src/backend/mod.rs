//! Backend abstraction layer
//!
//! The facade never formats or writes anything itself. A [`Backend`] turns a
//! registry key into a [`LogSink`], and every record a logger emits is handed
//! to that sink as a non-generic [`Record`].
//!
//! # Builtin backends
//!
//! - [`NoOpBackend`]: every level disabled, nothing observable happens
//! - [`TracingBackend`]: forwards records into the `tracing` ecosystem
//!
//! Builtins can be selected by name through [`builtin`], which is what
//! environment-driven discovery uses.

mod noop;
mod tracing_adapter;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::Level;
use uuid::Uuid;

use crate::errors::Result;
use crate::key::RegistryKey;

pub use noop::{NoOpBackend, NoOpSink};
pub use tracing_adapter::{TracingBackend, TracingSink, TRACING_TARGET};

/// One emitted log record, independent of the logger's event kind
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    /// Resolved logger name
    pub logger: &'a str,
    /// Identity of the logger instance that emitted the record
    pub instance_id: Uuid,
    pub level: Level,
    pub message: String,
    /// Type name of the logger's event kind
    pub event_kind: &'static str,
    /// The event as filled in by the message closure
    pub event: Value,
    pub timestamp: DateTime<Utc>,
}

/// Destination for the records of one logger
///
/// # Thread Safety
///
/// Sinks are shared by every clone of a logger, so they must be `Send + Sync`.
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Whether records at `level` would be kept
    ///
    /// Loggers skip event creation and the message closure entirely when this
    /// returns `false`.
    fn is_enabled(&self, level: Level) -> bool;

    /// Accept one record
    fn emit(&self, record: &Record<'_>);
}

/// Strategy for building the sink behind each newly registered logger
pub trait Backend: Send + Sync + fmt::Debug {
    /// Short name used for discovery and diagnostics
    fn name(&self) -> &'static str;

    /// Build the sink for the logger identified by `key`
    ///
    /// Called at most once per key by the registry.
    ///
    /// # Errors
    ///
    /// Returns `FacadeError::BuildFailed` when the backend cannot serve this
    /// logger. The failure reaches the requesting caller and nothing is cached.
    fn build(&self, key: &RegistryKey) -> Result<Arc<dyn LogSink>>;
}

/// Look up a builtin backend by name
///
/// Matching ignores case and surrounding whitespace.
///
/// # Example
///
/// ```
/// use logfacade_core::backend::builtin;
///
/// assert_eq!(builtin(" Tracing ").map(|b| b.name()), Some("tracing"));
/// assert_eq!(builtin("noop").map(|b| b.name()), Some("noop"));
/// assert!(builtin("syslog").is_none());
/// ```
pub fn builtin(name: &str) -> Option<Arc<dyn Backend>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "tracing" => Some(Arc::new(TracingBackend::new())),
        "noop" => Some(Arc::new(NoOpBackend)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_round_trip() {
        for name in ["tracing", "noop"] {
            let backend = builtin(name).expect("builtin backend");
            assert_eq!(backend.name(), name);
        }
    }

    #[test]
    fn test_builtin_unknown_name() {
        assert!(builtin("").is_none());
        assert!(builtin("journald").is_none());
    }

    #[test]
    fn test_traits_are_object_safe() {
        let backend: Arc<dyn Backend> = Arc::new(NoOpBackend);
        let key = RegistryKey::for_factory::<logfacade_core_types::LogEventFactory>("svc");
        let sink: Arc<dyn LogSink> = backend.build(&key).unwrap();
        assert!(!sink.is_enabled(Level::ERROR));
    }
}
