//! # Server Lifecycle
//!
//! Everything between `main` and the request handlers.
//!
//! ## Boot Order
//!
//! 1. **Configuration** - [`ServerConfig::from_env`](crate::config::ServerConfig::from_env)
//! 2. **Tracing** - [`setup_tracing`], format chosen by environment
//! 3. **Compilation** - [`ApiServer::new`] builds the [`Api`](api_contract::Api) from the
//!    route table. An unmatched contract or orphan resolver is returned as
//!    [`ServerError::Api`](crate::error::ServerError::Api) and the process exits
//!    before a port is bound.
//! 4. **Serving** - [`ApiServer::start`] binds, serves, and waits for Ctrl-C/SIGTERM.
//!
//! ## Graceful Shutdown
//!
//! On the signal axum stops accepting connections and lets in-flight requests
//! complete. Handlers hold no shared mutable state, so nothing else needs
//! draining.

pub mod server;
pub mod tracing;

pub use server::*;
pub use self::tracing::*;
