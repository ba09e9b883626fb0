//! Event kinds produced by loggers
//!
//! An event kind is the shape of structured data a logger hands to the
//! message closure. The closure may fill the event in before returning the
//! message text; the filled event travels with the message to the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker for types a logger can produce as its event kind
///
/// Events are serialized once per emitted record, so any `Serialize` type
/// that can cross threads qualifies.
///
/// # Example
///
/// ```
/// use logfacade_core_types::EventKind;
/// use serde::Serialize;
///
/// #[derive(Debug, Default, Serialize)]
/// struct RequestEvent {
///     method: String,
///     status: u16,
/// }
///
/// impl EventKind for RequestEvent {}
/// ```
pub trait EventKind: Serialize + Send + 'static {}

/// General purpose event carrying free-form structured fields
///
/// This is the event kind used when a caller does not ask for a specific one.
/// It serializes as a flat JSON object of its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEvent {
    fields: Map<String, Value>,
}

impl LogEvent {
    /// Create an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`LogEvent::insert`]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, in key order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl EventKind for LogEvent {}
