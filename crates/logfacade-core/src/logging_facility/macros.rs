//! Canonical logging macros
//!
//! Every macro emits `component`, `op` and `event`; extra fields follow the
//! usual `tracing` field syntax. Start and end are `DEBUG`, errors `WARN`
//! since the facade absorbs them.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use logfacade_core::log_op_start;
/// log_op_start!("get_or_create");
/// log_op_start!("get_or_create", logger = "svc");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use logfacade_core::log_op_end;
/// log_op_end!("get_or_create", duration_ms = 3);
/// log_op_end!("bind_backend", duration_ms = 0, backend = "noop");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation that ended in a [`FacadeError`](crate::FacadeError)
///
/// The error is borrowed, not consumed.
///
/// # Example
///
/// ```
/// # use logfacade_core::{log_op_error, FacadeError};
/// let err = FacadeError::UnknownBackend { name: "syslog".to_string() };
/// log_op_error!("bind_backend", err, duration_ms = 1);
/// assert_eq!(err.code(), "ERR_UNKNOWN_BACKEND");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err_ref: &$crate::FacadeError = &$err;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?err_ref.kind(),
            err.code = err_ref.code(),
            error = %err_ref,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err_ref: &$crate::FacadeError = &$err;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?err_ref.kind(),
            err.code = err_ref.code(),
            error = %err_ref,
            $($field)*
        );
    }};
}
