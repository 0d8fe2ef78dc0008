//! # In-Memory Router
//!
//! A [`ServerTarget`] that keeps handlers in a map and dispatches requests to
//! them directly, without any network I/O.

use crate::handler::{Reply, RuleHandler};
use crate::method::Method;
use crate::target::ServerTarget;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Exact-match `(method, path)` dispatcher.
#[derive(Debug, Default, Clone)]
pub struct Router {
    routes: HashMap<(Method, String), RuleHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `body` to the handler bound to `(method, path)`.
    ///
    /// Unknown routes get `404 {"error":"Not found"}`.
    pub async fn dispatch(&self, method: Method, path: &str, body: Value) -> Reply {
        match self.routes.get(&(method, path.to_string())) {
            Some(handler) => handler.handle(body).await,
            None => {
                warn!(%method, path, "No route");
                Reply::not_found()
            }
        }
    }

    /// Registered routes, sorted by path then method.
    pub fn routes(&self) -> Vec<(Method, &str)> {
        let mut routes: Vec<_> = self
            .routes
            .keys()
            .map(|(method, path)| (*method, path.as_str()))
            .collect();
        routes.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(&b.0)));
        routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl ServerTarget for Router {
    fn register(&mut self, method: Method, path: &str, handler: RuleHandler) {
        if self
            .routes
            .insert((method, path.to_string()), handler)
            .is_some()
        {
            warn!(%method, path, "Route registered twice, keeping the latest");
        }
    }
}
