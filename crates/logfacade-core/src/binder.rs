//! Backend binding
//!
//! A [`BackendBinder`] resolves which [`Backend`] builds new loggers. It does
//! so once, lazily, on first use; the result is kept for the binder's
//! lifetime with no invalidation and no hot swap. If discovery finds nothing,
//! returns an error, or panics, the no-op backend is bound instead and the
//! failure goes to the diagnostic sink (`tracing`), never to the caller.
//!
//! # Process-wide binding
//!
//! [`process_binder`] is the binder shared by every facade built with
//! [`LoggerFactory::new`](crate::LoggerFactory::new), including the global
//! one. Its discovery consults, in order:
//!
//! 1. a backend registered with [`install`] before discovery first runs
//! 2. the `LOGFACADE_BACKEND` environment variable (`tracing` or `noop`)
//! 3. nothing found: no-op

use std::any::Any;
use std::env::{self, VarError};
use std::fmt;
use std::panic;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use logfacade_core_types::schema::OP_BIND_BACKEND;

use crate::backend::{builtin, Backend, NoOpBackend};
use crate::errors::{FacadeError, Result};
use crate::{log_op_end, log_op_error, log_op_start};

/// Environment variable naming the builtin backend to bind
pub const BACKEND_ENV_VAR: &str = "LOGFACADE_BACKEND";

/// Discovery function consulted once by a binder
///
/// `Ok(None)` means no backend is available.
pub type Discovery = fn() -> Result<Option<Arc<dyn Backend>>>;

// Sealed with None by the first discovery that finds nothing installed
static INSTALLED: OnceLock<Option<Arc<dyn Backend>>> = OnceLock::new();

static PROCESS_BINDER: BackendBinder = BackendBinder::new();

/// Lazily resolved, write-once backend binding
pub struct BackendBinder {
    bound: OnceLock<Arc<dyn Backend>>,
    discovery: Discovery,
}

impl BackendBinder {
    /// Binder using the standard discovery ([`discover_backend`])
    pub const fn new() -> Self {
        Self::with_discovery(discover_backend)
    }

    /// Binder using a custom discovery function
    pub const fn with_discovery(discovery: Discovery) -> Self {
        Self {
            bound: OnceLock::new(),
            discovery,
        }
    }

    /// Binder that is already bound to `backend`; discovery never runs
    pub fn prebound(backend: Arc<dyn Backend>) -> Self {
        Self {
            bound: OnceLock::from(backend),
            discovery: discover_backend,
        }
    }

    /// The bound backend, resolving it on first call
    ///
    /// Concurrent first calls block until one of them has resolved; discovery
    /// runs at most once per binder.
    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(self.bound.get_or_init(|| resolve(self.discovery)))
    }

    /// The bound backend if resolution already happened
    pub fn peek(&self) -> Option<Arc<dyn Backend>> {
        self.bound.get().cloned()
    }

    pub fn is_bound(&self) -> bool {
        self.bound.get().is_some()
    }
}

impl Default for BackendBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BackendBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendBinder")
            .field("bound", &self.bound.get().map(|backend| backend.name()))
            .finish()
    }
}

/// The binder shared by every process-bound facade
pub fn process_binder() -> &'static BackendBinder {
    &PROCESS_BINDER
}

/// Shorthand for `process_binder().backend()`
pub fn bound_backend() -> Arc<dyn Backend> {
    PROCESS_BINDER.backend()
}

/// Register the backend the process binder should bind
///
/// Must happen before the first logger is requested through a process-bound
/// facade. The first run of [`discover_backend`] closes the slot, whether or
/// not a backend was installed, so an install that loses the race against
/// discovery fails instead of being silently ignored.
///
/// # Errors
///
/// Returns `FacadeError::AlreadyBound` if discovery has already run, or if
/// another backend was installed first.
pub fn install(backend: Arc<dyn Backend>) -> Result<()> {
    INSTALLED
        .set(Some(backend))
        .map_err(|_| FacadeError::AlreadyBound {
            backend: bound_name().to_string(),
        })
}

/// The backend registered with [`install`], if any
pub fn installed_backend() -> Option<Arc<dyn Backend>> {
    INSTALLED.get().and_then(Option::clone)
}

fn bound_name() -> &'static str {
    INSTALLED
        .get()
        .and_then(Option::as_ref)
        .or_else(|| PROCESS_BINDER.bound.get())
        .map_or("unresolved", |backend| backend.name())
}

/// Standard discovery: an installed backend, else the environment
///
/// Closes the [`install`] slot on first call.
///
/// # Errors
///
/// See [`backend_from_env`].
pub fn discover_backend() -> Result<Option<Arc<dyn Backend>>> {
    if let Some(installed) = INSTALLED.get_or_init(|| None) {
        return Ok(Some(Arc::clone(installed)));
    }
    backend_from_env()
}

/// Builtin backend named by `LOGFACADE_BACKEND`
///
/// An unset or blank variable means no backend.
///
/// # Errors
///
/// Returns `FacadeError::UnknownBackend` if the name matches no builtin, or
/// `FacadeError::DiscoveryFailed` if the value is not valid unicode.
pub fn backend_from_env() -> Result<Option<Arc<dyn Backend>>> {
    match env::var(BACKEND_ENV_VAR) {
        Ok(name) if name.trim().is_empty() => Ok(None),
        Ok(name) => match builtin(&name) {
            Some(backend) => Ok(Some(backend)),
            None => Err(FacadeError::UnknownBackend { name }),
        },
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(FacadeError::DiscoveryFailed {
            reason: format!("{BACKEND_ENV_VAR}: {err}"),
        }),
    }
}

fn resolve(discovery: Discovery) -> Arc<dyn Backend> {
    let started = Instant::now();
    log_op_start!(OP_BIND_BACKEND);

    let outcome = panic::catch_unwind(discovery).unwrap_or_else(|payload| {
        Err(FacadeError::DiscoveryFailed {
            reason: panic_reason(payload.as_ref()),
        })
    });

    match outcome {
        Ok(Some(backend)) => {
            log_op_end!(
                OP_BIND_BACKEND,
                duration_ms = started.elapsed().as_millis() as u64,
                backend = backend.name()
            );
            backend
        }
        Ok(None) => {
            log_op_end!(
                OP_BIND_BACKEND,
                duration_ms = started.elapsed().as_millis() as u64,
                backend = NoOpBackend.name()
            );
            Arc::new(NoOpBackend)
        }
        Err(err) => {
            log_op_error!(
                OP_BIND_BACKEND,
                err,
                duration_ms = started.elapsed().as_millis() as u64,
                backend = NoOpBackend.name()
            );
            Arc::new(NoOpBackend)
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("discovery panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("discovery panicked: {message}")
    } else {
        "discovery panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TracingBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tracing_discovery() -> Result<Option<Arc<dyn Backend>>> {
        let backend: Arc<dyn Backend> = Arc::new(TracingBackend::new());
        Ok(Some(backend))
    }

    static COUNTED_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counted_discovery() -> Result<Option<Arc<dyn Backend>>> {
        COUNTED_CALLS.fetch_add(1, Ordering::SeqCst);
        tracing_discovery()
    }

    #[test]
    fn test_discovered_backend_is_bound() {
        let binder = BackendBinder::with_discovery(tracing_discovery);
        assert!(!binder.is_bound());
        assert_eq!(binder.backend().name(), "tracing");
        assert!(binder.is_bound());
    }

    #[test]
    fn test_nothing_found_binds_noop() {
        let binder = BackendBinder::with_discovery(|| Ok(None));
        assert_eq!(binder.backend().name(), "noop");
    }

    #[test]
    fn test_discovery_error_binds_noop() {
        let binder = BackendBinder::with_discovery(|| {
            Err(FacadeError::UnknownBackend {
                name: "journald".to_string(),
            })
        });
        assert_eq!(binder.backend().name(), "noop");
    }

    #[test]
    fn test_discovery_panic_binds_noop() {
        let binder = BackendBinder::with_discovery(|| panic!("lookup exploded"));
        assert_eq!(binder.backend().name(), "noop");
    }

    #[test]
    fn test_discovery_runs_once() {
        let binder = BackendBinder::with_discovery(counted_discovery);
        let first = binder.backend();
        let second = binder.backend();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(COUNTED_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_prebound_skips_discovery() {
        let binder = BackendBinder::prebound(Arc::new(NoOpBackend));
        assert!(binder.is_bound());
        assert_eq!(binder.peek().map(|backend| backend.name()), Some("noop"));
    }

    #[test]
    fn test_panic_reason_messages() {
        let from_str: Box<dyn Any + Send> = Box::new("boom");
        let from_string: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let opaque: Box<dyn Any + Send> = Box::new(7u8);

        assert_eq!(panic_reason(from_str.as_ref()), "discovery panicked: boom");
        assert_eq!(panic_reason(from_string.as_ref()), "discovery panicked: bang");
        assert_eq!(panic_reason(opaque.as_ref()), "discovery panicked");
    }

    #[test]
    fn test_debug_shows_bound_backend_name() {
        let binder = BackendBinder::prebound(Arc::new(TracingBackend::new()));
        assert_eq!(
            format!("{:?}", binder),
            "BackendBinder { bound: Some(\"tracing\") }"
        );
    }
}
