//! # Server Targets
//!
//! The seam between the registry and whatever actually serves HTTP. An
//! [`Api`](crate::Api) only needs to bind a handler to a method and an exact
//! path; routing, body decoding and writing responses belong to the target.
//!
//! Implementations in this workspace:
//! - [`Router`](crate::Router): in-memory dispatch, used in tests and embedding.
//! - [`RecordingTarget`](crate::mock::RecordingTarget): captures registrations.
//! - `HttpTarget` in the `api-server` crate: builds an axum router.

use crate::handler::RuleHandler;
use crate::method::Method;

/// Something handlers can be registered on.
pub trait ServerTarget {
    /// Binds `handler` to `method` on the literal `path` (no templating).
    fn register(&mut self, method: Method, path: &str, handler: RuleHandler);
}
