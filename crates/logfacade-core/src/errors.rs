use thiserror::Error;

/// Result type alias using FacadeError
pub type Result<T> = std::result::Result<T, FacadeError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tests and diagnostics can rely
/// on independently of the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacadeErrorKind {
    // Construction
    BuildFailed,
    HandleTypeMismatch,

    // Binding
    AlreadyBound,
    UnknownBackend,
    DiscoveryFailed,
}

impl FacadeErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FacadeErrorKind::BuildFailed => "ERR_BUILD_FAILED",
            FacadeErrorKind::HandleTypeMismatch => "ERR_HANDLE_TYPE_MISMATCH",
            FacadeErrorKind::AlreadyBound => "ERR_ALREADY_BOUND",
            FacadeErrorKind::UnknownBackend => "ERR_UNKNOWN_BACKEND",
            FacadeErrorKind::DiscoveryFailed => "ERR_DISCOVERY_FAILED",
        }
    }
}

/// Errors raised by the logger facade
///
/// Only construction failures ever reach callers of the lookup path; the
/// binding errors are absorbed by the backend binder and reported to the
/// diagnostic sink.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FacadeError {
    /// A backend failed to build the sink for a logger
    #[error("Failed to build logger '{name}' for {factory}: {reason}")]
    BuildFailed {
        name: String,
        factory: &'static str,
        reason: String,
    },

    /// A cached handle was not built for the requested event kind
    #[error("Logger '{name}' is cached with a different event kind than {expected}")]
    HandleTypeMismatch { name: String, expected: &'static str },

    /// A backend was installed after the process binding was resolved
    #[error("A backend is already bound: {backend}")]
    AlreadyBound { backend: String },

    /// The configured backend name matches no builtin backend
    #[error("Unknown backend: '{name}'")]
    UnknownBackend { name: String },

    /// Backend discovery failed or panicked
    #[error("Backend discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl FacadeError {
    /// Get the error kind
    pub fn kind(&self) -> FacadeErrorKind {
        match self {
            FacadeError::BuildFailed { .. } => FacadeErrorKind::BuildFailed,
            FacadeError::HandleTypeMismatch { .. } => FacadeErrorKind::HandleTypeMismatch,
            FacadeError::AlreadyBound { .. } => FacadeErrorKind::AlreadyBound,
            FacadeError::UnknownBackend { .. } => FacadeErrorKind::UnknownBackend,
            FacadeError::DiscoveryFailed { .. } => FacadeErrorKind::DiscoveryFailed,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Get the logger name the error refers to, if any
    pub fn logger_name(&self) -> Option<&str> {
        match self {
            FacadeError::BuildFailed { name, .. }
            | FacadeError::HandleTypeMismatch { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}
