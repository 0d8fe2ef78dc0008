//! # API Server
//!
//! The process around [`api_contract`]: reads configuration, sets up tracing,
//! compiles the route table into an [`Api`](api_contract::Api) and serves it over
//! HTTP with axum.
//!
//! - **[config]**: environment configuration ([`ServerConfig`](config::ServerConfig)).
//! - **[routes]**: the API table, one row per endpoint.
//! - **[model]**: request/response payloads.
//! - **[http]**: the axum [`ServerTarget`](api_contract::ServerTarget).
//! - **[lifecycle]**: [`ApiServer`](lifecycle::ApiServer) and tracing setup.
//!
//! This library exposes the modules for integration testing; the binary lives in
//! `main.rs`.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod routes;
