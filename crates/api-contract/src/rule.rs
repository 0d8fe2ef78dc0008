//! # Rules
//!
//! A [`Rule`] is a contract and a resolver proven to describe the same endpoint.
//! [`Rule::new`] is the one place a declaration/implementation mismatch is caught;
//! once a rule exists it is installable as is.

use crate::contract::Contract;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::method::Method;
use crate::procedure::ProcedureRef;
use crate::resolver::Resolver;
use crate::schema::SchemaRef;
use std::fmt;
use std::sync::Arc;

/// The installable unit: a [`Contract`] joined with its [`Resolver`].
///
/// Equality is identity: two rules are equal only when they were built from the
/// very same contract and resolver instances.
#[derive(Clone)]
pub struct Rule {
    contract: Arc<Contract>,
    resolver: Arc<Resolver>,
}

impl Rule {
    /// Joins `contract` and `resolver`, failing with [`ApiError::EndpointMismatch`]
    /// unless both describe the same endpoint.
    pub fn new(contract: Arc<Contract>, resolver: Arc<Resolver>) -> Result<Self, ApiError> {
        if contract.endpoint() != resolver.endpoint() {
            return Err(ApiError::EndpointMismatch {
                contract: contract.endpoint().clone(),
                resolver: resolver.endpoint().clone(),
            });
        }
        Ok(Self { contract, resolver })
    }

    pub fn contract(&self) -> &Arc<Contract> {
        &self.contract
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.contract.endpoint()
    }

    pub fn version(&self) -> u32 {
        self.contract.version()
    }

    pub fn method(&self) -> Method {
        self.contract.method()
    }

    pub fn path(&self) -> &str {
        self.contract.path()
    }

    pub fn input_schema(&self) -> &SchemaRef {
        self.contract.input_schema()
    }

    pub fn output_schema(&self) -> &SchemaRef {
        self.contract.output_schema()
    }

    pub fn procedure(&self) -> &ProcedureRef {
        self.resolver.procedure()
    }

    pub fn hash_key(&self) -> String {
        self.endpoint().hash_key()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.contract, &other.contract) && Arc::ptr_eq(&self.resolver, &other.resolver)
    }
}

impl Eq for Rule {}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("contract", &self.contract)
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({}, {})", self.contract, self.resolver)
    }
}
