//! Event factories
//!
//! A logger creates one fresh event per emitted record through its factory.
//! The factory's concrete *type* is part of the logger's identity; its
//! instance and any state it carries are not.

use std::fmt;
use std::marker::PhantomData;

use crate::event::{EventKind, LogEvent};

/// Zero-argument producer of event values
///
/// Two factories of the same concrete type are interchangeable for logger
/// lookups, so a factory should not carry state that changes what it
/// produces.
///
/// # Example
///
/// ```
/// use logfacade_core_types::{EventFactory, EventKind};
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct AuditEvent {
///     actor: String,
/// }
///
/// impl EventKind for AuditEvent {}
///
/// struct AuditEventFactory;
///
/// impl EventFactory for AuditEventFactory {
///     type Event = AuditEvent;
///
///     fn create(&self) -> AuditEvent {
///         AuditEvent { actor: "system".to_string() }
///     }
/// }
///
/// assert_eq!(AuditEventFactory.create().actor, "system");
/// ```
pub trait EventFactory: Send + Sync + 'static {
    /// The event kind this factory produces
    type Event: EventKind;

    /// Produce a new event
    fn create(&self) -> Self::Event;
}

/// Factory that produces events through their `Default` implementation
pub struct DefaultFactory<E> {
    _event: PhantomData<fn() -> E>,
}

impl<E> DefaultFactory<E> {
    pub const fn new() -> Self {
        Self {
            _event: PhantomData,
        }
    }
}

impl<E> Default for DefaultFactory<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for DefaultFactory<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for DefaultFactory<E> {}

impl<E> fmt::Debug for DefaultFactory<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefaultFactory<{}>", std::any::type_name::<E>())
    }
}

impl<E: EventKind + Default> EventFactory for DefaultFactory<E> {
    type Event = E;

    fn create(&self) -> E {
        E::default()
    }
}

/// Factory used when a caller does not name an event kind
pub type LogEventFactory = DefaultFactory<LogEvent>;
