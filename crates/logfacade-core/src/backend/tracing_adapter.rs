//! Tracing library adapter implementation.

use std::sync::Arc;

use tracing::Level;

use crate::backend::{Backend, LogSink, Record};
use crate::errors::Result;
use crate::key::RegistryKey;

/// Target used for every record forwarded into `tracing`.
///
/// The logger name travels as the `logger` field, so subscribers can filter
/// the facade's records as a whole with `RUST_LOG=logfacade=...`.
pub const TRACING_TARGET: &str = "logfacade";

/// Sink that forwards records to the `tracing` crate.
///
/// Level gating follows whatever subscriber is installed; with no subscriber
/// every level reports disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn is_enabled(&self, level: Level) -> bool {
        if level == Level::ERROR {
            tracing::enabled!(target: TRACING_TARGET, Level::ERROR)
        } else if level == Level::WARN {
            tracing::enabled!(target: TRACING_TARGET, Level::WARN)
        } else if level == Level::INFO {
            tracing::enabled!(target: TRACING_TARGET, Level::INFO)
        } else if level == Level::DEBUG {
            tracing::enabled!(target: TRACING_TARGET, Level::DEBUG)
        } else {
            tracing::enabled!(target: TRACING_TARGET, Level::TRACE)
        }
    }

    fn emit(&self, record: &Record<'_>) {
        let logger = record.logger;
        let event_kind = record.event_kind;
        let event_fields = &record.event;
        let message = &record.message;

        if record.level == Level::ERROR {
            tracing::error!(
                target: TRACING_TARGET,
                logger,
                event_kind,
                %event_fields,
                "{}",
                message
            );
        } else if record.level == Level::WARN {
            tracing::warn!(
                target: TRACING_TARGET,
                logger,
                event_kind,
                %event_fields,
                "{}",
                message
            );
        } else if record.level == Level::INFO {
            tracing::info!(
                target: TRACING_TARGET,
                logger,
                event_kind,
                %event_fields,
                "{}",
                message
            );
        } else if record.level == Level::DEBUG {
            tracing::debug!(
                target: TRACING_TARGET,
                logger,
                event_kind,
                %event_fields,
                "{}",
                message
            );
        } else {
            tracing::trace!(
                target: TRACING_TARGET,
                logger,
                event_kind,
                %event_fields,
                "{}",
                message
            );
        }
    }
}

/// Backend that bridges the facade to the `tracing` ecosystem.
///
/// Assumes a subscriber is installed, e.g. through
/// [`logging_facility::init`](crate::logging_facility::init).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl TracingBackend {
    /// Create a new tracing backend.
    pub fn new() -> Self {
        Self
    }
}

impl Backend for TracingBackend {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn build(&self, _key: &RegistryKey) -> Result<Arc<dyn LogSink>> {
        Ok(Arc::new(TracingSink))
    }
}
