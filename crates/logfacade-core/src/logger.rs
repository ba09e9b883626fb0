//! Logger handles
//!
//! The registry stores loggers as [`LoggerHandle`] trait objects so that one
//! map can hold loggers of every event kind. Callers get the typed view,
//! [`Logger<E>`], which is recovered from the handle by downcasting.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use logfacade_core_types::{EventFactory, EventKind};
use serde_json::Value;
use tracing::Level;
use uuid::Uuid;

use crate::backend::{LogSink, NoOpSink, Record};
use crate::errors::{FacadeError, Result};

/// Type-erased view of a registered logger
pub trait LoggerHandle: Send + Sync + fmt::Debug {
    /// Resolved logger name
    fn name(&self) -> &str;

    /// Unique id of this logger instance
    fn instance_id(&self) -> Uuid;

    /// Type name of the event kind the logger produces
    fn event_kind(&self) -> &'static str;

    /// Whether records at `level` would reach the backend
    fn is_enabled(&self, level: Level) -> bool;

    /// Upcast used to recover the typed logger
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Shared state behind every clone of a [`Logger<E>`]
struct LoggerCore<E: EventKind> {
    name: String,
    instance_id: Uuid,
    sink: Arc<dyn LogSink>,
    // None only for disabled loggers, whose sink never enables a level
    factory: Option<Box<dyn EventFactory<Event = E>>>,
}

impl<E: EventKind> fmt::Debug for LoggerCore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerCore")
            .field("name", &self.name)
            .field("instance_id", &self.instance_id)
            .field("event_kind", &type_name::<E>())
            .field("sink", &self.sink)
            .finish()
    }
}

impl<E: EventKind> LoggerHandle for LoggerCore<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    fn event_kind(&self) -> &'static str {
        type_name::<E>()
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.sink.is_enabled(level)
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Named logger producing events of kind `E`
///
/// Cloning is cheap and clones share the same instance. Every emission method
/// takes a closure that receives a fresh event from the logger's factory and
/// returns the message text; the closure runs only when the level is enabled.
///
/// # Example
///
/// ```
/// use logfacade_core::testing::CaptureBackend;
/// use logfacade_core::LoggerFactory;
/// use std::sync::Arc;
///
/// let backend = Arc::new(CaptureBackend::new());
/// let records = backend.records();
/// let factory = LoggerFactory::with_backend(backend);
///
/// let logger = factory.named("orders");
/// logger.info(|event| {
///     event.insert("order_id", 42);
///     "order accepted".to_string()
/// });
///
/// let captured = records.for_logger("orders");
/// assert_eq!(captured[0].message, "order accepted");
/// assert_eq!(captured[0].event["order_id"], 42);
/// ```
pub struct Logger<E: EventKind> {
    core: Arc<LoggerCore<E>>,
}

impl<E: EventKind> Logger<E> {
    /// Create a logger that is not registered anywhere
    ///
    /// Registered loggers come from [`LoggerFactory`](crate::LoggerFactory);
    /// this is the building block its builders use.
    pub fn detached<F>(name: impl Into<String>, sink: Arc<dyn LogSink>, factory: F) -> Self
    where
        F: EventFactory<Event = E>,
    {
        Self {
            core: Arc::new(LoggerCore {
                name: name.into(),
                instance_id: Uuid::now_v7(),
                sink,
                factory: Some(Box::new(factory)),
            }),
        }
    }

    /// Create an unregistered logger that discards everything
    ///
    /// Every level reports disabled and no event is ever created.
    pub fn disabled(name: impl Into<String>) -> Self {
        Self {
            core: Arc::new(LoggerCore {
                name: name.into(),
                instance_id: Uuid::now_v7(),
                sink: Arc::new(NoOpSink),
                factory: None,
            }),
        }
    }

    /// Recover the typed logger from a registry handle
    ///
    /// # Errors
    ///
    /// Returns `FacadeError::HandleTypeMismatch` if the handle was not built
    /// for event kind `E`.
    pub fn from_handle(handle: Arc<dyn LoggerHandle>) -> Result<Self> {
        let name = handle.name().to_string();
        handle
            .into_any()
            .downcast::<LoggerCore<E>>()
            .map(|core| Self { core })
            .map_err(|_| FacadeError::HandleTypeMismatch {
                name,
                expected: type_name::<E>(),
            })
    }

    /// The type-erased handle for this logger
    pub fn handle(&self) -> Arc<dyn LoggerHandle> {
        self.core.clone()
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    pub fn instance_id(&self) -> Uuid {
        self.core.instance_id
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.core.sink.is_enabled(level)
    }

    /// Whether two loggers are the same instance
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.core, &other.core)
    }

    /// Emit a record at `level`
    ///
    /// `message` is invoked with a fresh event only if the level is enabled.
    pub fn log<M>(&self, level: Level, message: M)
    where
        M: FnOnce(&mut E) -> String,
    {
        let core = &*self.core;
        let Some(factory) = core.factory.as_ref() else {
            return;
        };
        if !core.sink.is_enabled(level) {
            return;
        }

        let mut event = factory.create();
        let message = message(&mut event);
        let event = serde_json::to_value(&event).unwrap_or_else(|err| {
            tracing::warn!(
                logger = %core.name,
                event_kind = type_name::<E>(),
                error = %err,
                "event serialization failed; recording null event"
            );
            Value::Null
        });

        core.sink.emit(&Record {
            logger: &core.name,
            instance_id: core.instance_id,
            level,
            message,
            event_kind: type_name::<E>(),
            event,
            timestamp: Utc::now(),
        });
    }

    pub fn trace<M: FnOnce(&mut E) -> String>(&self, message: M) {
        self.log(Level::TRACE, message);
    }

    pub fn debug<M: FnOnce(&mut E) -> String>(&self, message: M) {
        self.log(Level::DEBUG, message);
    }

    pub fn info<M: FnOnce(&mut E) -> String>(&self, message: M) {
        self.log(Level::INFO, message);
    }

    pub fn warn<M: FnOnce(&mut E) -> String>(&self, message: M) {
        self.log(Level::WARN, message);
    }

    pub fn error<M: FnOnce(&mut E) -> String>(&self, message: M) {
        self.log(Level::ERROR, message);
    }
}

impl<E: EventKind> Clone for Logger<E> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<E: EventKind> fmt::Debug for Logger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.core.name)
            .field("instance_id", &self.core.instance_id)
            .field("event_kind", &type_name::<E>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CaptureSink;
    use logfacade_core_types::{DefaultFactory, LogEvent, LogEventFactory};
    use serde::Serialize;

    #[derive(Debug, Default, Serialize)]
    struct Specialized {
        name: String,
        version: u32,
    }

    impl EventKind for Specialized {}

    #[test]
    fn test_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger<LogEvent>>();
        assert_send_sync::<Logger<Specialized>>();
    }

    #[test]
    fn test_disabled_level_skips_closure() {
        let logger = Logger::detached("svc", Arc::new(NoOpSink), LogEventFactory::new());
        let mut invoked = false;

        logger.error(|_| {
            invoked = true;
            String::new()
        });

        assert!(!invoked);
    }

    #[test]
    fn test_enabled_level_records_event_fields() {
        let sink = CaptureSink::default();
        let records = sink.records();
        let logger = Logger::detached(
            "svc",
            Arc::new(sink),
            DefaultFactory::<Specialized>::new(),
        );

        logger.debug(|e| {
            e.name = "Special".to_string();
            e.version = 2;
            "specialized".to_string()
        });

        let captured = records.records();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, Level::DEBUG);
        assert_eq!(captured[0].event["name"], "Special");
        assert_eq!(captured[0].event["version"], 2);
        assert!(captured[0].event_kind.contains("Specialized"));
    }

    #[test]
    fn test_clones_share_instance() {
        let logger = Logger::detached("svc", Arc::new(NoOpSink), LogEventFactory::new());
        let clone = logger.clone();

        assert!(Logger::ptr_eq(&logger, &clone));
        assert_eq!(logger.instance_id(), clone.instance_id());
    }

    #[test]
    fn test_from_handle_round_trip() {
        let logger = Logger::detached("svc", Arc::new(NoOpSink), LogEventFactory::new());
        let recovered = Logger::<LogEvent>::from_handle(logger.handle()).unwrap();

        assert!(Logger::ptr_eq(&logger, &recovered));
    }

    #[test]
    fn test_from_handle_wrong_kind() {
        let logger = Logger::detached("svc", Arc::new(NoOpSink), LogEventFactory::new());
        let err = Logger::<Specialized>::from_handle(logger.handle()).unwrap_err();

        assert_eq!(err.code(), "ERR_HANDLE_TYPE_MISMATCH");
        assert_eq!(err.logger_name(), Some("svc"));
    }

    #[test]
    fn test_disabled_logger_never_creates_events() {
        let logger = Logger::<Specialized>::disabled("fallback");
        let mut invoked = false;

        for level in [Level::TRACE, Level::INFO, Level::ERROR] {
            assert!(!logger.is_enabled(level));
            logger.log(level, |_| {
                invoked = true;
                String::new()
            });
        }

        assert!(!invoked);
        assert_eq!(logger.name(), "fallback");
    }

    #[test]
    fn test_handle_reports_identity() {
        let logger = Logger::detached("svc", Arc::new(NoOpSink), LogEventFactory::new());
        let handle = logger.handle();

        assert_eq!(handle.name(), "svc");
        assert_eq!(handle.instance_id(), logger.instance_id());
        assert!(handle.event_kind().contains("LogEvent"));
        assert!(!handle.is_enabled(Level::INFO));
    }
}
