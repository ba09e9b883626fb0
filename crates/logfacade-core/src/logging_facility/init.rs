//! Subscriber installation

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output
    Development,
    /// JSON structured output
    Production,
    /// Bare registry; tests install their own layer via `init_test_capture`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset or invalid
    pub fn default_filter(self) -> &'static str {
        match self {
            Profile::Development => "logfacade=debug,logfacade_core=debug",
            Profile::Production => "logfacade=info,logfacade_core=warn",
            Profile::Test => "trace",
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_filter()))
}

/// Install the global `tracing` subscriber
///
/// Only the first call has an effect. If another subscriber is already set
/// globally, the call is a no-op rather than a panic.
///
/// Records forwarded by [`TracingBackend`](crate::backend::TracingBackend)
/// use the `logfacade` target; the facade's own diagnostics use
/// `logfacade_core::*` targets.
///
/// # Example
///
/// ```
/// use logfacade_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}
