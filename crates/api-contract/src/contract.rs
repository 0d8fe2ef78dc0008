//! # Contracts
//!
//! A [`Contract`] declares the shape of an endpoint: what it accepts and what it
//! promises to return. It says nothing about behavior; that is the
//! [`Resolver`](crate::Resolver)'s job.

use crate::endpoint::Endpoint;
use crate::method::Method;
use crate::schema::SchemaRef;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Shape declaration for one endpoint.
///
/// Identity is the endpoint's: two contracts for the same endpoint are equal
/// even if their schemas differ.
#[derive(Clone)]
pub struct Contract {
    endpoint: Endpoint,
    input_schema: SchemaRef,
    output_schema: SchemaRef,
}

impl Contract {
    pub fn new(endpoint: Endpoint, input_schema: SchemaRef, output_schema: SchemaRef) -> Self {
        Self {
            endpoint,
            input_schema,
            output_schema,
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

    pub fn input_schema(&self) -> &SchemaRef {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &SchemaRef {
        &self.output_schema
    }

    pub fn hash_key(&self) -> String {
        self.endpoint.hash_key()
    }
}

impl PartialEq for Contract {
    fn eq(&self, other: &Self) -> bool {
        self.endpoint == other.endpoint
    }
}

impl Eq for Contract {}

impl Hash for Contract {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.endpoint.hash(state);
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("endpoint", &self.endpoint)
            .field("input_schema", &self.input_schema)
            .field("output_schema", &self.output_schema)
            .finish()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contract({} → {} → {})",
            self.endpoint,
            self.input_schema.describe(),
            self.output_schema.describe()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{any, string, Schema};

    fn endpoint(path: &str) -> Endpoint {
        Endpoint::new(1, Method::Post, path).unwrap()
    }

    #[test]
    fn test_accessors_follow_endpoint() {
        let contract = Contract::new(endpoint("/user"), string().into_ref(), any().into_ref());
        assert_eq!(contract.version(), contract.endpoint().version());
        assert_eq!(contract.method(), Method::Post);
        assert_eq!(contract.path(), "/user");
        assert_eq!(contract.hash_key(), "1:post:/user");
        assert_eq!(
            contract.to_string(),
            "Contract(Endpoint(1 POST /user) → string → any)"
        );
    }

    #[test]
    fn test_equality_ignores_schemas() {
        let a = Contract::new(endpoint("/user"), string().into_ref(), any().into_ref());
        let b = Contract::new(endpoint("/user"), any().into_ref(), string().into_ref());
        let c = Contract::new(endpoint("/other"), string().into_ref(), any().into_ref());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
