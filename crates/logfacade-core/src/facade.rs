//! Logger facade
//!
//! [`LoggerFactory`] owns a [`LoggerRegistry`] and a backend binding and
//! answers every logger request with the same algorithm: resolve a name,
//! build a [`RegistryKey`] from the name and the event factory's type, and
//! fetch-or-build the logger from the registry using the bound backend.
//!
//! The free functions ([`get_logger`] and friends) go through the process-wide
//! factory returned by [`LoggerFactory::global`].
//!
//! Requests never fail. If the backend cannot build a logger, the caller gets
//! a disabled logger for that call; nothing is cached, so the next request
//! retries. The `try_*` methods expose the underlying [`Result`].

use std::sync::{Arc, OnceLock};

use logfacade_core_types::{EventFactory, LogEvent, LogEventFactory};

use crate::backend::Backend;
use crate::binder::{process_binder, BackendBinder};
use crate::errors::{FacadeError, Result};
use crate::key::RegistryKey;
use crate::logger::Logger;
use crate::name::caller_name;
use crate::registry::LoggerRegistry;

static GLOBAL_FACTORY: OnceLock<LoggerFactory> = OnceLock::new();

#[derive(Debug)]
enum Binding {
    Process,
    Owned(BackendBinder),
}

/// Owned registry plus backend binding
///
/// Construct one per isolated logging domain, or use
/// [`LoggerFactory::global`] for the process-wide instance.
///
/// Name-inferring methods are `#[track_caller]`; wrapping them in a helper
/// without the attribute names every logger after the helper instead.
#[derive(Debug)]
pub struct LoggerFactory {
    registry: LoggerRegistry,
    binding: Binding,
}

impl LoggerFactory {
    /// Factory with its own registry, bound through the process-wide binder
    pub fn new() -> Self {
        Self {
            registry: LoggerRegistry::new(),
            binding: Binding::Process,
        }
    }

    /// Factory with its own registry and its own binder
    pub fn with_binder(binder: BackendBinder) -> Self {
        Self {
            registry: LoggerRegistry::new(),
            binding: Binding::Owned(binder),
        }
    }

    /// Factory bound to `backend` directly, skipping discovery
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self::with_binder(BackendBinder::prebound(backend))
    }

    /// The process-wide factory behind the free functions
    pub fn global() -> &'static LoggerFactory {
        GLOBAL_FACTORY.get_or_init(LoggerFactory::new)
    }

    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }

    pub fn binder(&self) -> &BackendBinder {
        match &self.binding {
            Binding::Process => process_binder(),
            Binding::Owned(binder) => binder,
        }
    }

    /// The bound backend, resolving the binding on first call
    pub fn backend(&self) -> Arc<dyn Backend> {
        self.binder().backend()
    }

    /// Logger named after the caller, default event kind
    #[track_caller]
    pub fn logger(&self) -> Logger<LogEvent> {
        self.named(caller_name())
    }

    /// Logger with an explicit name, default event kind
    pub fn named(&self, name: impl Into<String>) -> Logger<LogEvent> {
        self.named_with(name, LogEventFactory::new())
    }

    /// Logger named after the caller, producing `factory`'s event kind
    #[track_caller]
    pub fn with_factory<F: EventFactory>(&self, factory: F) -> Logger<F::Event> {
        self.named_with(caller_name(), factory)
    }

    /// Logger with an explicit name, producing `factory`'s event kind
    ///
    /// Loggers are keyed by name and the factory's type: a second factory
    /// instance of the same type gets the logger built with the first one.
    pub fn named_with<F: EventFactory>(
        &self,
        name: impl Into<String>,
        factory: F,
    ) -> Logger<F::Event> {
        let name = name.into();
        match self.try_named_with(name.as_str(), factory) {
            Ok(logger) => logger,
            Err(err) => {
                warn_unavailable(&name, &err);
                Logger::disabled(name)
            }
        }
    }

    /// Fallible form of [`logger`](Self::logger)
    ///
    /// # Errors
    ///
    /// See [`try_named_with`](Self::try_named_with).
    #[track_caller]
    pub fn try_logger(&self) -> Result<Logger<LogEvent>> {
        self.try_named(caller_name())
    }

    /// Fallible form of [`named`](Self::named)
    ///
    /// # Errors
    ///
    /// See [`try_named_with`](Self::try_named_with).
    pub fn try_named(&self, name: impl Into<String>) -> Result<Logger<LogEvent>> {
        self.try_named_with(name, LogEventFactory::new())
    }

    /// Fallible form of [`with_factory`](Self::with_factory)
    ///
    /// # Errors
    ///
    /// See [`try_named_with`](Self::try_named_with).
    #[track_caller]
    pub fn try_with_factory<F: EventFactory>(&self, factory: F) -> Result<Logger<F::Event>> {
        self.try_named_with(caller_name(), factory)
    }

    /// Fallible form of [`named_with`](Self::named_with)
    ///
    /// # Errors
    ///
    /// Returns the backend's error if it fails to build a sink for a new
    /// logger; nothing is cached in that case. Returns
    /// `FacadeError::HandleTypeMismatch` if the cached handle does not hold
    /// `F::Event`, which a correctly keyed registry never produces.
    pub fn try_named_with<F: EventFactory>(
        &self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<Logger<F::Event>> {
        let key = RegistryKey::for_factory::<F>(name);
        let handle = self.registry.get_or_create(key, |key| {
            let sink = self.backend().build(key)?;
            Ok(Logger::detached(key.name(), sink, factory).handle())
        })?;
        Logger::from_handle(handle)
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn warn_unavailable(name: &str, err: &FacadeError) {
    tracing::warn!(
        logger = %name,
        err.kind = ?err.kind(),
        err.code = err.code(),
        error = %err,
        "logger unavailable, using a disabled logger"
    );
}

/// Logger named after the caller, default event kind
///
/// # Example
///
/// ```
/// let logger = logfacade_core::get_logger();
/// logger.info(|_| "ready".to_string());
/// ```
#[track_caller]
pub fn get_logger() -> Logger<LogEvent> {
    LoggerFactory::global().logger()
}

/// Logger with an explicit name, default event kind
pub fn get_logger_named(name: impl Into<String>) -> Logger<LogEvent> {
    LoggerFactory::global().named(name)
}

/// Logger named after the caller, producing `factory`'s event kind
#[track_caller]
pub fn get_logger_with<F: EventFactory>(factory: F) -> Logger<F::Event> {
    LoggerFactory::global().with_factory(factory)
}

/// Logger with an explicit name, producing `factory`'s event kind
///
/// # Example
///
/// ```
/// use logfacade_core::{get_logger_named, get_logger_named_with, Logger};
/// use logfacade_core_types::{DefaultFactory, EventKind};
/// use serde::Serialize;
///
/// #[derive(Default, Serialize)]
/// struct Audit {
///     actor: String,
/// }
///
/// impl EventKind for Audit {}
///
/// let audit = get_logger_named_with("svc", DefaultFactory::<Audit>::new());
/// let again = get_logger_named_with("svc", DefaultFactory::<Audit>::new());
/// assert!(Logger::ptr_eq(&audit, &again));
///
/// let plain = get_logger_named("svc");
/// assert_eq!(plain.name(), audit.name());
/// ```
pub fn get_logger_named_with<F: EventFactory>(
    name: impl Into<String>,
    factory: F,
) -> Logger<F::Event> {
    LoggerFactory::global().named_with(name, factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::name_from_path;
    use crate::testing::CaptureBackend;
    use logfacade_core_types::{DefaultFactory, EventKind};
    use serde::Serialize;
    use tracing::Level;

    #[derive(Debug, Default, Serialize)]
    struct Audit {
        actor: String,
    }

    impl EventKind for Audit {}

    fn capture_factory() -> (LoggerFactory, Arc<CaptureBackend>) {
        let backend = Arc::new(CaptureBackend::new());
        (LoggerFactory::with_backend(backend.clone()), backend)
    }

    #[test]
    fn test_named_twice_is_same_instance() {
        let (factory, backend) = capture_factory();

        let first = factory.named("svc");
        let second = factory.named("svc");

        assert!(Logger::ptr_eq(&first, &second));
        assert_eq!(backend.build_count(), 1);
    }

    #[test]
    fn test_svc_scenario() {
        let (factory, _backend) = capture_factory();

        let first = factory.named("svc");
        let second = factory.named("svc");
        let audit = factory.named_with("svc", DefaultFactory::<Audit>::new());
        let third = factory.named("svc");

        assert!(Logger::ptr_eq(&first, &second));
        assert_ne!(first.instance_id(), audit.instance_id());
        assert!(Logger::ptr_eq(&first, &third));
        assert_eq!(factory.registry().len(), 2);
    }

    #[test]
    fn test_inferred_name_matches_explicit() {
        let (factory, _backend) = capture_factory();

        let inferred = factory.logger();
        let explicit = factory.named(name_from_path(file!()));

        assert!(inferred.name().ends_with("facade"));
        assert!(Logger::ptr_eq(&inferred, &explicit));
    }

    #[test]
    fn test_inferred_name_with_factory() {
        let (factory, _backend) = capture_factory();

        let inferred = factory.with_factory(DefaultFactory::<Audit>::new());
        let explicit =
            factory.named_with(name_from_path(file!()), DefaultFactory::<Audit>::new());

        assert!(Logger::ptr_eq(&inferred, &explicit));
    }

    #[test]
    fn test_emission_reaches_backend() {
        let (factory, backend) = capture_factory();
        let logger = factory.named_with("svc", DefaultFactory::<Audit>::new());

        logger.warn(|event| {
            event.actor = "ops".to_string();
            "manual override".to_string()
        });

        let captured = backend.records().for_logger("svc");
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, Level::WARN);
        assert_eq!(captured[0].event["actor"], "ops");
    }

    #[test]
    fn test_build_failure_is_absorbed_and_retried() {
        let (factory, backend) = capture_factory();
        backend.set_failing(true);

        let err = factory.try_named("svc").unwrap_err();
        assert_eq!(err.code(), "ERR_BUILD_FAILED");

        let fallback = factory.named("svc");
        assert!(!fallback.is_enabled(Level::ERROR));
        assert!(factory.registry().is_empty());

        backend.set_failing(false);
        let recovered = factory.named("svc");
        assert!(recovered.is_enabled(Level::ERROR));
        assert_eq!(factory.registry().len(), 1);
        assert_eq!(backend.build_count(), 3);
    }

    #[test]
    fn test_owned_binder_falls_back_to_noop() {
        let factory = LoggerFactory::with_binder(BackendBinder::with_discovery(|| Ok(None)));
        let logger = factory.named("svc");
        let mut invoked = false;

        logger.error(|_| {
            invoked = true;
            String::new()
        });

        assert!(!invoked);
        assert_eq!(factory.backend().name(), "noop");
    }

    #[test]
    fn test_separate_factories_have_separate_registries() {
        let (left, _) = capture_factory();
        let (right, _) = capture_factory();

        let a = left.named("svc");
        let b = right.named("svc");

        assert!(!Logger::ptr_eq(&a, &b));
    }
}
