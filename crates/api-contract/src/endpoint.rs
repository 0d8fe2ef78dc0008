//! # Endpoint Identity
//!
//! An [`Endpoint`] is the identity of one API operation: `(version, method, path)`.
//! Contracts and resolvers are matched by it, so it is the only thing that
//! decides which declaration belongs to which implementation.

use crate::error::ApiError;
use crate::method::Method;
use std::fmt;

/// Identity triple of an API operation.
///
/// Fields are private and never change after [`Endpoint::new`]. Equality and
/// `Hash` are structural over all three fields, so the endpoint itself is
/// used as the registry key; [`Endpoint::hash_key`] is the printable form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint {
    version: u32,
    method: Method,
    path: String,
}

impl Endpoint {
    /// Builds an endpoint, rejecting version `0`.
    ///
    /// The path is kept verbatim; no normalization of slashes happens here.
    pub fn new(version: u32, method: Method, path: impl Into<String>) -> Result<Self, ApiError> {
        if version == 0 {
            return Err(ApiError::InvalidEndpoint(
                "version must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            version,
            method,
            path: path.into(),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Canonical key `"{version}:{method}:{path}"`.
    ///
    /// Neither the version digits nor the method token contain `:`, and the
    /// path is the last component, so distinct triples never share a key.
    pub fn hash_key(&self) -> String {
        format!("{}:{}:{}", self.version, self.method.as_str(), self.path)
    }

    /// Path the endpoint is served on: `/api/v{version}{path}`.
    pub fn api_path(&self) -> String {
        format!("/api/v{}{}", self.version, self.path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Endpoint({} {} {})", self.version, self.method, self.path)
    }
}
