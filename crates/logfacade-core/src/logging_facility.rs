//! Internal diagnostics for the facade
//!
//! The facade reports its own activity (registry misses, backend binding)
//! through `tracing`, using a fixed set of structured fields:
//! - `component`: module that emitted the event
//! - `op`: operation name from [`schema`](crate::schema)
//! - `event`: `start`, `end` or `end_error`
//!
//! # Usage
//!
//! ```rust
//! use logfacade_core::logging_facility::{init, Profile};
//!
//! // Once, at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
