//! Logger registry
//!
//! A process-lifetime cache from [`RegistryKey`] to logger handle with
//! compute-if-absent semantics: for any key at most one handle is ever
//! constructed and every caller observes that same handle.
//!
//! Entries are never evicted.

use std::sync::Arc;
use std::time::Instant;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::errors::Result;
use crate::key::RegistryKey;
use crate::logger::LoggerHandle;
use crate::{log_op_end, log_op_error, log_op_start};
use logfacade_core_types::schema::OP_GET_OR_CREATE;

/// Concurrency-safe cache of logger handles
///
/// Lookups of existing entries take a shared shard lock. A miss takes the
/// shard's write lock for the duration of construction, which is what makes
/// construction exactly-once; builders must therefore not call back into the
/// same registry.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: DashMap<RegistryKey, Arc<dyn LoggerHandle>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle cached under `key`, building it on first access
    ///
    /// Under concurrent first access exactly one caller runs `builder`; the
    /// others wait for it and receive the same handle.
    ///
    /// # Errors
    ///
    /// Returns whatever `builder` returns. Nothing is cached on failure, so a
    /// later call for the same key runs a builder again.
    ///
    /// # Example
    ///
    /// ```
    /// use logfacade_core::backend::NoOpSink;
    /// use logfacade_core::{Logger, LoggerRegistry, RegistryKey};
    /// use logfacade_core_types::{LogEvent, LogEventFactory};
    /// use std::sync::Arc;
    ///
    /// let registry = LoggerRegistry::new();
    /// let key = RegistryKey::for_factory::<LogEventFactory>("svc");
    ///
    /// let first = registry
    ///     .get_or_create(key.clone(), |key| {
    ///         let logger = Logger::<LogEvent>::detached(
    ///             key.name(),
    ///             Arc::new(NoOpSink),
    ///             LogEventFactory::new(),
    ///         );
    ///         Ok(logger.handle())
    ///     })
    ///     .unwrap();
    /// let second = registry
    ///     .get_or_create(key, |_| unreachable!("already cached"))
    ///     .unwrap();
    ///
    /// assert!(Arc::ptr_eq(&first, &second));
    /// ```
    pub fn get_or_create<B>(&self, key: RegistryKey, builder: B) -> Result<Arc<dyn LoggerHandle>>
    where
        B: FnOnce(&RegistryKey) -> Result<Arc<dyn LoggerHandle>>,
    {
        if let Some(existing) = self.loggers.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }

        match self.loggers.entry(key) {
            Entry::Occupied(occupied) => Ok(Arc::clone(occupied.get())),
            Entry::Vacant(vacant) => {
                let started = Instant::now();
                let logger = vacant.key().name().to_string();
                let factory = vacant.key().factory().type_name();
                log_op_start!(OP_GET_OR_CREATE, logger = %logger, factory = factory);

                match builder(vacant.key()) {
                    Ok(handle) => {
                        vacant.insert(Arc::clone(&handle));
                        log_op_end!(
                            OP_GET_OR_CREATE,
                            duration_ms = started.elapsed().as_millis() as u64,
                            logger = %logger,
                            factory = factory
                        );
                        Ok(handle)
                    }
                    Err(err) => {
                        log_op_error!(
                            OP_GET_OR_CREATE,
                            err,
                            duration_ms = started.elapsed().as_millis() as u64,
                            logger = %logger,
                            factory = factory
                        );
                        Err(err)
                    }
                }
            }
        }
    }

    /// The cached handle for `key`, without building
    pub fn get(&self, key: &RegistryKey) -> Option<Arc<dyn LoggerHandle>> {
        self.loggers.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, key: &RegistryKey) -> bool {
        self.loggers.contains_key(key)
    }

    /// Number of cached loggers
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Names of all cached loggers, sorted and deduplicated
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .iter()
            .map(|entry| entry.key().name().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NoOpSink;
    use crate::errors::FacadeError;
    use crate::logger::Logger;
    use logfacade_core_types::{DefaultFactory, EventKind, LogEvent, LogEventFactory};
    use serde::Serialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default, Serialize)]
    struct AuditEvent;

    impl EventKind for AuditEvent {}

    fn noop_handle(key: &RegistryKey) -> Result<Arc<dyn LoggerHandle>> {
        let logger =
            Logger::<LogEvent>::detached(key.name(), Arc::new(NoOpSink), LogEventFactory::new());
        Ok(logger.handle())
    }

    #[test]
    fn test_hit_returns_cached_instance() {
        let registry = LoggerRegistry::new();
        let key = RegistryKey::for_factory::<LogEventFactory>("svc");

        let first = registry.get_or_create(key.clone(), noop_handle).unwrap();
        let second = registry.get_or_create(key, noop_handle).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builder_runs_once_per_key() {
        let registry = LoggerRegistry::new();
        let builds = AtomicUsize::new(0);

        for _ in 0..5 {
            registry
                .get_or_create(RegistryKey::for_factory::<LogEventFactory>("svc"), |key| {
                    builds.fetch_add(1, Ordering::SeqCst);
                    noop_handle(key)
                })
                .unwrap();
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distinct_factory_types_get_distinct_entries() {
        let registry = LoggerRegistry::new();

        let plain = registry
            .get_or_create(RegistryKey::for_factory::<LogEventFactory>("svc"), noop_handle)
            .unwrap();
        let audit = registry
            .get_or_create(
                RegistryKey::for_factory::<DefaultFactory<AuditEvent>>("svc"),
                noop_handle,
            )
            .unwrap();

        assert!(!Arc::ptr_eq(&plain, &audit));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["svc".to_string()]);
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let registry = LoggerRegistry::new();
        let key = RegistryKey::for_factory::<LogEventFactory>("flaky");

        let err = registry
            .get_or_create(key.clone(), |key| {
                Err(FacadeError::BuildFailed {
                    name: key.name().to_string(),
                    factory: key.factory().type_name(),
                    reason: "sink unavailable".to_string(),
                })
            })
            .unwrap_err();

        assert_eq!(err.code(), "ERR_BUILD_FAILED");
        assert!(!registry.contains(&key));
        assert!(registry.is_empty());

        let handle = registry.get_or_create(key.clone(), noop_handle).unwrap();
        assert_eq!(handle.name(), "flaky");
        assert!(registry.contains(&key));
    }

    #[test]
    fn test_get_does_not_build() {
        let registry = LoggerRegistry::new();
        let key = RegistryKey::for_factory::<LogEventFactory>("svc");

        assert!(registry.get(&key).is_none());
        assert!(registry.is_empty());

        let built = registry.get_or_create(key.clone(), noop_handle).unwrap();
        let fetched = registry.get(&key).unwrap();
        assert!(Arc::ptr_eq(&built, &fetched));
    }
}
