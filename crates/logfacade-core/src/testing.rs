//! In-memory backend for asserting on emitted records
//!
//! [`CaptureBackend`] builds [`CaptureSink`]s that all append to one shared
//! [`CapturedRecords`] buffer. It can also be switched into a failing mode to
//! exercise builder-failure paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::Level;
use uuid::Uuid;

use crate::backend::{Backend, LogSink, Record};
use crate::errors::{FacadeError, Result};
use crate::key::RegistryKey;

/// One record as seen by a capture sink
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub logger: String,
    pub instance_id: Uuid,
    pub level: Level,
    pub message: String,
    pub event_kind: String,
    pub event: Value,
    /// When the logger stamped the record, not when it was captured
    pub timestamp: DateTime<Utc>,
}

/// Shared buffer of captured records
#[derive(Debug, Clone, Default)]
pub struct CapturedRecords {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl CapturedRecords {
    fn push(&self, record: CapturedRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    /// Snapshot of all records so far
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Records emitted by the logger called `name`
    pub fn for_logger(&self, name: &str) -> Vec<CapturedRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.logger == name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

/// Sink that records into a [`CapturedRecords`] buffer
///
/// Levels more verbose than `max_level` are disabled.
#[derive(Debug, Clone)]
pub struct CaptureSink {
    records: CapturedRecords,
    max_level: Level,
}

impl CaptureSink {
    pub fn new(records: CapturedRecords, max_level: Level) -> Self {
        Self { records, max_level }
    }

    pub fn records(&self) -> CapturedRecords {
        self.records.clone()
    }
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self::new(CapturedRecords::default(), Level::TRACE)
    }
}

impl LogSink for CaptureSink {
    fn is_enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    fn emit(&self, record: &Record<'_>) {
        self.records.push(CapturedRecord {
            logger: record.logger.to_string(),
            instance_id: record.instance_id,
            level: record.level,
            message: record.message.clone(),
            event_kind: record.event_kind.to_string(),
            event: record.event.clone(),
            timestamp: record.timestamp,
        });
    }
}

/// Backend whose sinks all capture into one shared buffer
#[derive(Debug)]
pub struct CaptureBackend {
    records: CapturedRecords,
    max_level: Level,
    builds: AtomicUsize,
    failing: AtomicBool,
}

impl CaptureBackend {
    pub fn new() -> Self {
        Self::with_max_level(Level::TRACE)
    }

    pub fn with_max_level(max_level: Level) -> Self {
        Self {
            records: CapturedRecords::default(),
            max_level,
            builds: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Handle to the buffer every sink of this backend writes to
    pub fn records(&self) -> CapturedRecords {
        self.records.clone()
    }

    /// Number of `build` calls so far, failed ones included
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Make subsequent builds fail with `FacadeError::BuildFailed`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for CaptureBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CaptureBackend {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn build(&self, key: &RegistryKey) -> Result<Arc<dyn LogSink>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(FacadeError::BuildFailed {
                name: key.name().to_string(),
                factory: key.factory().type_name(),
                reason: "capture backend is set to fail".to_string(),
            });
        }
        Ok(Arc::new(CaptureSink::new(self.records.clone(), self.max_level)))
    }
}
