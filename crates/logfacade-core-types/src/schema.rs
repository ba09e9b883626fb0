//! Canonical schema constants for the facade's own diagnostics
//!
//! These constants keep the structured fields of internal events consistent.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Logger identity
pub const FIELD_LOGGER: &str = "logger";
pub const FIELD_FACTORY: &str = "factory";
pub const FIELD_BACKEND: &str = "backend";

// Record payload (tracing bridge)
pub const FIELD_EVENT_KIND: &str = "event_kind";
pub const FIELD_EVENT_FIELDS: &str = "event_fields";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_GET_OR_CREATE: &str = "get_or_create";
pub const OP_BIND_BACKEND: &str = "bind_backend";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_LOGGER.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_are_distinct() {
        assert_ne!(OP_GET_OR_CREATE, OP_BIND_BACKEND);
    }
}
