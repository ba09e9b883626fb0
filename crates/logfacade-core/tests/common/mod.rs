use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use logfacade_core::testing::CaptureBackend;
use logfacade_core::{EventFactory, EventKind, LogEvent, LoggerFactory};
use serde::Serialize;

/// Structured event used as a non-default event kind
#[allow(dead_code)]
#[derive(Debug, Default, Serialize)]
pub struct AuditEvent {
    pub actor: String,
    pub action: String,
}

impl EventKind for AuditEvent {}

/// Factory with instance state, producing the default event kind
///
/// Two instances with different prefixes are still the same factory type.
#[allow(dead_code)]
pub struct PrefixedFactory {
    pub prefix: String,
}

impl EventFactory for PrefixedFactory {
    type Event = LogEvent;

    fn create(&self) -> LogEvent {
        LogEvent::new().with_field("prefix", self.prefix.clone())
    }
}

/// Facade with a private registry bound to a fresh capture backend
#[allow(dead_code)]
pub fn capture_factory() -> (LoggerFactory, Arc<CaptureBackend>) {
    let backend = Arc::new(CaptureBackend::new());
    (LoggerFactory::with_backend(backend.clone()), backend)
}

/// Logger name no other test in the binary uses
#[allow(dead_code)]
pub fn unique_name(prefix: &str) -> String {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    format!("{prefix}-{}", NEXT.fetch_add(1, Ordering::Relaxed))
}
