//! # API Contract
//!
//! This crate binds **declarations** of API endpoints to **implementations** of
//! them, checks that the two sides line up exactly, and compiles the result into
//! validated request handlers that can be installed on an HTTP server.
//!
//! ## Why split declaration from implementation?
//!
//! - **Contracts** ([`Contract`]) say what an endpoint accepts and returns.
//!   They can be written by hand, generated, or shared with clients.
//! - **Resolvers** ([`Resolver`]) say what an endpoint does.
//!
//! [`Api`] joins the two by [`Endpoint`] identity. A contract without a resolver,
//! a resolver without a contract, or either one declared twice is rejected when
//! the API is built, so a missing handler shows up at boot instead of as a 404
//! in production.
//!
//! ## Architecture Overview
//!
//! 1. **Identity** ([`Method`], [`Endpoint`]) - what an operation *is*.
//! 2. **Declarations** ([`Contract`], [`schema`]) and **behavior** ([`Resolver`], [`procedure`]).
//! 3. **Compilation** ([`Rule`], [`Api`]) - the bijection check.
//! 4. **Serving** ([`RuleHandler`], [`ServerTarget`], [`Router`]) - the
//!    three-phase pipeline: validate input, run the procedure, validate output.
//!
//! ## Quick Start
//!
//! ```rust
//! use api_contract::procedure::{from_fn, Procedure};
//! use api_contract::schema::{integer, object, string, Schema};
//! use api_contract::{Api, Method, Router};
//! use serde_json::{json, Value};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), api_contract::ApiError> {
//! let api = Api::from_table(vec![(
//!     1,
//!     "post",
//!     "/user",
//!     object().field("name", string()).into_ref(),
//!     object()
//!         .field("id", integer().positive())
//!         .field("name", string())
//!         .into_ref(),
//!     from_fn(|input: Value| Ok(json!({ "id": 1, "name": input["name"] }))).into_ref(),
//! )])?;
//!
//! let mut router = Router::new();
//! api.install(&mut router);
//!
//! let ok = router
//!     .dispatch(Method::Post, "/api/v1/user", json!({ "name": "Alice" }))
//!     .await;
//! assert_eq!(ok.status(), 200);
//!
//! let bad = router.dispatch(Method::Post, "/api/v1/user", json!({})).await;
//! assert_eq!(bad.status(), 400);
//! assert_eq!(bad.body(), &json!({ "error": "Client error" }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! Everything an [`Api`] holds is immutable and shared through `Arc`. Handlers
//! can be cloned into as many Tokio tasks as the server wants; there are no locks
//! on the request path.
//!
//! ## Testing
//!
//! The [`mock`] module has a call-counting procedure, a failing procedure and a
//! recording [`ServerTarget`].

pub mod api;
pub mod contract;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod method;
pub mod mock;
pub mod procedure;
pub mod resolver;
pub mod router;
pub mod rule;
pub mod schema;
pub mod target;

// Re-export core types for convenience
pub use api::{Api, ApiTableRow, ContractTableRow, ResolverTableRow};
pub use contract::Contract;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use handler::{Reply, RuleHandler};
pub use method::Method;
pub use procedure::{Procedure, ProcedureError, ProcedureRef};
pub use resolver::Resolver;
pub use router::Router;
pub use rule::Rule;
pub use schema::{Schema, SchemaError, SchemaRef};
pub use target::ServerTarget;
