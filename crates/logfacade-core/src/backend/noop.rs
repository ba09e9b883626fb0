//! No-operation backend.

use std::sync::Arc;

use tracing::Level;

use crate::backend::{Backend, LogSink, Record};
use crate::errors::Result;
use crate::key::RegistryKey;

/// A sink that reports every level disabled and discards anything it is given.
///
/// Because no level is enabled, loggers backed by this sink never create
/// events or run message closures.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl LogSink for NoOpSink {
    #[inline]
    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    #[inline]
    fn emit(&self, _record: &Record<'_>) {}
}

/// Backend bound when no real backend is installed or discovery fails.
///
/// # Example
///
/// ```
/// use logfacade_core::backend::NoOpBackend;
/// use logfacade_core::LoggerFactory;
/// use std::sync::Arc;
///
/// let factory = LoggerFactory::with_backend(Arc::new(NoOpBackend));
/// let logger = factory.named("svc");
/// logger.info(|_| unreachable!("closure is never invoked"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpBackend;

impl Backend for NoOpBackend {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn build(&self, _key: &RegistryKey) -> Result<Arc<dyn LogSink>> {
        Ok(Arc::new(NoOpSink))
    }
}
