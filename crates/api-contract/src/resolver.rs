//! # Resolvers
//!
//! A [`Resolver`] binds a [`Procedure`](crate::procedure::Procedure) to an
//! endpoint. It is matched against a [`Contract`](crate::Contract) by endpoint only.

use crate::endpoint::Endpoint;
use crate::method::Method;
use crate::procedure::ProcedureRef;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Behavior for one endpoint.
#[derive(Clone)]
pub struct Resolver {
    endpoint: Endpoint,
    procedure: ProcedureRef,
}

impl Resolver {
    pub fn new(endpoint: Endpoint, procedure: ProcedureRef) -> Self {
        Self {
            endpoint,
            procedure,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn version(&self) -> u32 {
        self.endpoint.version()
    }

    pub fn method(&self) -> Method {
        self.endpoint.method()
    }

    pub fn path(&self) -> &str {
        self.endpoint.path()
    }

    pub fn procedure(&self) -> &ProcedureRef {
        &self.procedure
    }

    pub fn hash_key(&self) -> String {
        self.endpoint.hash_key()
    }
}

impl PartialEq for Resolver {
    fn eq(&self, other: &Self) -> bool {
        self.endpoint == other.endpoint
    }
}

impl Eq for Resolver {}

impl Hash for Resolver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.endpoint.hash(state);
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolver({})", self.endpoint)
    }
}
