//! # The API Registry
//!
//! [`Api`] takes a set of [`Contract`]s and a set of [`Resolver`]s, matches them
//! one-to-one by [`Endpoint`], and compiles each pair into a [`Rule`].
//!
//! ## Matching
//!
//! The match has to be a bijection. Every contract needs exactly one resolver
//! and every resolver exactly one contract:
//!
//! - a contract with no resolver is [`ApiError::UnmatchedContract`];
//! - resolvers left over after all contracts are consumed are
//!   [`ApiError::OrphanResolvers`];
//! - the same endpoint twice on either side is [`ApiError::DuplicateContract`] /
//!   [`ApiError::DuplicateResolver`].
//!
//! All problems are collected before failing. A single problem is returned as
//! is; several come back together in [`ApiError::Multiple`]. Either way the
//! failure happens while building, never while serving.
//!
//! ## Installing
//!
//! [`Api::install`] registers one [`RuleHandler`] per rule on a [`ServerTarget`],
//! at `/api/v{version}{path}` for the rule's method.
//!
//! ```rust
//! use api_contract::procedure::{from_fn, Procedure};
//! use api_contract::schema::{any, Schema};
//! use api_contract::{Api, Method, Router};
//! use serde_json::{json, Value};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), api_contract::ApiError> {
//! let api = Api::from_table(vec![(
//!     1,
//!     "get",
//!     "/hello",
//!     any().into_ref(),
//!     any().into_ref(),
//!     from_fn(|_: Value| Ok(json!({ "message": "world" }))).into_ref(),
//! )])?;
//!
//! let mut router = Router::new();
//! api.install(&mut router);
//!
//! let reply = router.dispatch(Method::Get, "/api/v1/hello", Value::Null).await;
//! assert_eq!(reply.status(), 200);
//! assert_eq!(reply.body(), &json!({ "message": "world" }));
//! # Ok(())
//! # }
//! ```

use crate::contract::Contract;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::handler::RuleHandler;
use crate::method::Method;
use crate::procedure::ProcedureRef;
use crate::resolver::Resolver;
use crate::rule::Rule;
use crate::schema::SchemaRef;
use crate::target::ServerTarget;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// `(version, method, path, input_schema, output_schema, procedure)`
pub type ApiTableRow<'a> = (u32, &'a str, &'a str, SchemaRef, SchemaRef, ProcedureRef);

/// `(version, method, path, input_schema, output_schema)`
pub type ContractTableRow<'a> = (u32, &'a str, &'a str, SchemaRef, SchemaRef);

/// `(version, method, path, procedure)`
pub type ResolverTableRow<'a> = (u32, Method, &'a str, ProcedureRef);

/// A compiled, immutable set of rules keyed by endpoint.
#[derive(Debug, Clone)]
pub struct Api {
    rules: BTreeMap<Endpoint, Rule>,
}

impl Api {
    /// Matches `contracts` against `resolvers` and compiles the pairs into rules.
    pub fn new(
        contracts: impl IntoIterator<Item = Arc<Contract>>,
        resolvers: impl IntoIterator<Item = Arc<Resolver>>,
    ) -> Result<Self, ApiError> {
        let mut errors = Vec::new();

        let mut pending: HashMap<Endpoint, Arc<Resolver>> = HashMap::new();
        for resolver in resolvers {
            let endpoint = resolver.endpoint().clone();
            if pending.contains_key(&endpoint) {
                errors.push(ApiError::DuplicateResolver(endpoint.hash_key()));
                continue;
            }
            pending.insert(endpoint, resolver);
        }

        let mut seen = HashSet::new();
        let mut rules = BTreeMap::new();
        for contract in contracts {
            let endpoint = contract.endpoint().clone();
            if !seen.insert(endpoint.clone()) {
                errors.push(ApiError::DuplicateContract(endpoint.hash_key()));
                continue;
            }
            let Some(resolver) = pending.remove(&endpoint) else {
                errors.push(ApiError::UnmatchedContract(endpoint.hash_key()));
                continue;
            };
            // Looked up by the same endpoint, so this only fails on a broken Eq/Hash.
            match Rule::new(contract, resolver) {
                Ok(rule) => {
                    rules.insert(endpoint, rule);
                }
                Err(e) => errors.push(e),
            }
        }

        if !pending.is_empty() {
            let mut orphans: Vec<_> = pending.keys().map(Endpoint::hash_key).collect();
            orphans.sort();
            errors.push(ApiError::OrphanResolvers(orphans));
        }

        match errors.len() {
            0 => {
                debug!(rules = rules.len(), "Api compiled");
                Ok(Self { rules })
            }
            1 => Err(errors.remove(0)),
            _ => Err(ApiError::Multiple(errors)),
        }
    }

    /// Builds an API where each row supplies both the contract and the resolver.
    pub fn from_table<'a>(table: impl IntoIterator<Item = ApiTableRow<'a>>) -> Result<Self, ApiError> {
        let mut contracts = Vec::new();
        let mut resolvers = Vec::new();
        for (version, method, path, input, output, procedure) in table {
            let endpoint = Endpoint::new(version, Method::parse(method)?, path)?;
            contracts.push(Arc::new(Contract::new(endpoint.clone(), input, output)));
            resolvers.push(Arc::new(Resolver::new(endpoint, procedure)));
        }
        Self::new(contracts, resolvers)
    }

    /// Parses contract declarations, for when resolvers come from elsewhere.
    pub fn parse_contracts_table<'a>(
        table: impl IntoIterator<Item = ContractTableRow<'a>>,
    ) -> Result<Vec<Arc<Contract>>, ApiError> {
        table
            .into_iter()
            .map(|(version, method, path, input, output)| {
                let endpoint = Endpoint::new(version, Method::parse(method)?, path)?;
                Ok(Arc::new(Contract::new(endpoint, input, output)))
            })
            .collect()
    }

    /// Parses resolver rows, for when contracts come from elsewhere.
    pub fn parse_resolvers_table<'a>(
        table: impl IntoIterator<Item = ResolverTableRow<'a>>,
    ) -> Result<Vec<Arc<Resolver>>, ApiError> {
        table
            .into_iter()
            .map(|(version, method, path, procedure)| {
                let endpoint = Endpoint::new(version, method, path)?;
                Ok(Arc::new(Resolver::new(endpoint, procedure)))
            })
            .collect()
    }

    /// Registers every rule on `target` at `/api/v{version}{path}`.
    pub fn install<T: ServerTarget>(&self, target: &mut T) {
        for rule in self.rules.values() {
            let path = rule.endpoint().api_path();
            info!(method = %rule.method(), path = %path, "Installing rule");
            target.register(rule.method(), &path, RuleHandler::new(rule.clone()));
        }
        info!(rules = self.rules.len(), "Api installed");
    }

    pub fn get(&self, endpoint: &Endpoint) -> Option<&Rule> {
        self.rules.get(endpoint)
    }

    /// Rules in endpoint order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .rules
            .iter()
            .map(|(endpoint, rule)| format!("{} => {}", endpoint.hash_key(), rule))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Api {{ {entries} }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::{from_fn, Procedure};
    use crate::schema::{any, Schema};
    use serde_json::{json, Value};

    fn contract(method: Method, path: &str) -> Arc<Contract> {
        let endpoint = Endpoint::new(1, method, path).unwrap();
        Arc::new(Contract::new(endpoint, any().into_ref(), any().into_ref()))
    }

    fn resolver(method: Method, path: &str) -> Arc<Resolver> {
        let endpoint = Endpoint::new(1, method, path).unwrap();
        Arc::new(Resolver::new(
            endpoint,
            from_fn(|_: Value| Ok(json!(null))).into_ref(),
        ))
    }

    #[test]
    fn test_new_matches_by_endpoint_regardless_of_order() {
        let api = Api::new(
            vec![contract(Method::Get, "/a"), contract(Method::Post, "/b")],
            vec![resolver(Method::Post, "/b"), resolver(Method::Get, "/a")],
        )
        .unwrap();

        assert_eq!(api.len(), 2);
        let a = Endpoint::new(1, Method::Get, "/a").unwrap();
        let rule = api.get(&a).unwrap();
        assert_eq!(rule.contract().endpoint(), rule.resolver().endpoint());
    }

    #[test]
    fn test_empty_sets_build_an_empty_api() {
        let api = Api::new(Vec::new(), Vec::new()).unwrap();
        assert!(api.is_empty());
        assert_eq!(api.to_string(), "Api {  }");
    }

    #[test]
    fn test_unmatched_contract() {
        let err = Api::new(
            vec![contract(Method::Get, "/a"), contract(Method::Get, "/b")],
            vec![resolver(Method::Get, "/a")],
        )
        .unwrap_err();
        assert_eq!(err, ApiError::UnmatchedContract("1:get:/b".to_string()));
    }

    #[test]
    fn test_orphan_resolvers_are_listed_sorted() {
        let err = Api::new(
            vec![contract(Method::Get, "/a")],
            vec![
                resolver(Method::Get, "/a"),
                resolver(Method::Post, "/z"),
                resolver(Method::Get, "/c"),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ApiError::OrphanResolvers(vec!["1:get:/c".to_string(), "1:post:/z".to_string()])
        );
    }

    #[test]
    fn test_method_alone_distinguishes_endpoints() {
        let err = Api::new(vec![contract(Method::Get, "/a")], vec![resolver(Method::Post, "/a")])
            .unwrap_err();
        let causes = err.causes();
        assert_eq!(causes.len(), 2);
        assert_eq!(causes[0], &ApiError::UnmatchedContract("1:get:/a".to_string()));
        assert_eq!(causes[1], &ApiError::OrphanResolvers(vec!["1:post:/a".to_string()]));
    }

    #[test]
    fn test_duplicate_resolvers_are_rejected() {
        let err = Api::new(
            vec![contract(Method::Get, "/a")],
            vec![resolver(Method::Get, "/a"), resolver(Method::Get, "/a")],
        )
        .unwrap_err();
        assert_eq!(err, ApiError::DuplicateResolver("1:get:/a".to_string()));
    }

    #[test]
    fn test_duplicate_contracts_are_rejected() {
        let err = Api::new(
            vec![contract(Method::Get, "/a"), contract(Method::Get, "/a")],
            vec![resolver(Method::Get, "/a")],
        )
        .unwrap_err();
        assert_eq!(err, ApiError::DuplicateContract("1:get:/a".to_string()));
    }

    #[test]
    fn test_from_table_rejects_bad_rows() {
        let row = |version: u32, method: &'static str| -> ApiTableRow<'static> {
            (
                version,
                method,
                "/a",
                any().into_ref(),
                any().into_ref(),
                from_fn(|_: Value| Ok(json!(null))).into_ref(),
            )
        };

        let err = Api::from_table(vec![row(1, "delete")]).unwrap_err();
        assert_eq!(err, ApiError::UnsupportedMethod("delete".to_string()));

        let err = Api::from_table(vec![row(0, "get")]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidEndpoint(_)));

        // Both halves of a repeated row are duplicates.
        let err = Api::from_table(vec![row(1, "get"), row(1, "GET")]).unwrap_err();
        assert_eq!(
            err.causes(),
            vec![
                &ApiError::DuplicateResolver("1:get:/a".to_string()),
                &ApiError::DuplicateContract("1:get:/a".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_tables_compose() {
        let contracts = Api::parse_contracts_table(vec![
            (1, "get", "/a", any().into_ref(), any().into_ref()),
            (2, "post", "/b", any().into_ref(), any().into_ref()),
        ])
        .unwrap();
        let resolvers = Api::parse_resolvers_table(vec![
            (2, Method::Post, "/b", from_fn(|_: Value| Ok(json!(2))).into_ref()),
            (1, Method::Get, "/a", from_fn(|_: Value| Ok(json!(1))).into_ref()),
        ])
        .unwrap();

        let api = Api::new(contracts, resolvers).unwrap();
        let keys: Vec<_> = api.rules().map(Rule::hash_key).collect();
        assert_eq!(keys, vec!["1:get:/a", "2:post:/b"]);
    }

    #[test]
    fn test_display_lists_rules() {
        let api = Api::new(vec![contract(Method::Get, "/a")], vec![resolver(Method::Get, "/a")])
            .unwrap();
        assert_eq!(
            api.to_string(),
            "Api { 1:get:/a => Rule(Contract(Endpoint(1 GET /a) → any → any), Resolver(Endpoint(1 GET /a))) }"
        );
    }
}
