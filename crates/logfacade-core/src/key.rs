//! Composite logger identity
//!
//! A logger is identified by its name together with the concrete type of the
//! event factory it was requested with. Two requests that agree on both share
//! one logger; a request with the same name but another factory type gets its
//! own.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use logfacade_core_types::EventFactory;

/// Runtime type identity of an event factory
///
/// Equality and hashing use the `TypeId` only. The type name is kept for
/// diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct FactoryIdentity {
    type_id: TypeId,
    type_name: &'static str,
}

impl FactoryIdentity {
    /// Identity of the factory type `F`
    pub fn of<F: EventFactory>() -> Self {
        Self {
            type_id: TypeId::of::<F>(),
            type_name: type_name::<F>(),
        }
    }

    /// Identity of the type of `factory`; the instance itself is not retained
    pub fn of_val<F: EventFactory>(_factory: &F) -> Self {
        Self::of::<F>()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for FactoryIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for FactoryIdentity {}

impl Hash for FactoryIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for FactoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)
    }
}

/// Registry lookup key: logger name plus factory type identity
///
/// The name is not validated; the empty string is a valid logger name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryKey {
    name: String,
    factory: FactoryIdentity,
}

impl RegistryKey {
    pub fn new(name: impl Into<String>, factory: FactoryIdentity) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }

    /// Key for a logger named `name` producing events through factory type `F`
    pub fn for_factory<F: EventFactory>(name: impl Into<String>) -> Self {
        Self::new(name, FactoryIdentity::of::<F>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> FactoryIdentity {
        self.factory
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.factory)
    }
}
