//! # Registry Errors
//!
//! Boot-time errors raised while declaring endpoints and compiling an [`Api`](crate::Api).
//! None of these are recoverable per request: a value of [`ApiError`] means the API
//! surface is misconfigured and the server must not start.

use crate::endpoint::Endpoint;

/// Errors that can occur while building the API surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Contract and resolver endpoints do not match (contract: {contract}, resolver: {resolver})")]
    EndpointMismatch {
        contract: Endpoint,
        resolver: Endpoint,
    },

    #[error("No resolver found for contract: {0}")]
    UnmatchedContract(String),

    #[error("Resolvers without matching contracts: [{}]", .0.join(", "))]
    OrphanResolvers(Vec<String>),

    #[error("Contract declared twice: {0}")]
    DuplicateContract(String),

    #[error("Resolver declared twice: {0}")]
    DuplicateResolver(String),

    #[error("{} API errors: {}", .0.len(), display_all(.0))]
    Multiple(Vec<ApiError>),
}

impl ApiError {
    /// Flattens a [`ApiError::Multiple`] into its members; any other error yields itself.
    pub fn causes(&self) -> Vec<&ApiError> {
        match self {
            ApiError::Multiple(errors) => errors.iter().flat_map(ApiError::causes).collect(),
            other => vec![other],
        }
    }
}

fn display_all(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_causes_flattens_nested_errors() {
        let err = ApiError::Multiple(vec![
            ApiError::UnmatchedContract("1:get:/a".to_string()),
            ApiError::Multiple(vec![ApiError::OrphanResolvers(vec!["1:get:/b".to_string()])]),
        ]);

        let causes = err.causes();
        assert_eq!(causes.len(), 2);
        assert!(matches!(causes[0], ApiError::UnmatchedContract(_)));
        assert!(matches!(causes[1], ApiError::OrphanResolvers(_)));
    }

    #[test]
    fn test_orphan_message_lists_keys() {
        let err = ApiError::OrphanResolvers(vec!["1:get:/a".into(), "2:post:/b".into()]);
        assert_eq!(
            err.to_string(),
            "Resolvers without matching contracts: [1:get:/a, 2:post:/b]"
        );
    }
}
