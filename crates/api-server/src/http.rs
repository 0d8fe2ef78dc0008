//! # HTTP Target
//!
//! [`HttpTarget`] is the axum-backed [`ServerTarget`]. Each registered
//! [`RuleHandler`] becomes a route on an [`axum::Router`]; the adapter only
//! decodes the JSON body and writes the [`Reply`](api_contract::Reply) back.
//!
//! An empty body is passed to the handler as `null`. A body that is not JSON is
//! rejected with the same `400 {"error":"Client error"}` an input-schema
//! violation produces.

use api_contract::{Method, Reply, RuleHandler, ServerTarget};
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter};
use axum::{Json, Router};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

/// Collects registrations and turns them into an axum router.
#[derive(Default)]
pub struct HttpTarget {
    routes: BTreeMap<String, MethodRouter>,
}

impl HttpTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_router(self) -> Router {
        self.routes
            .into_iter()
            .fold(Router::new(), |router, (path, methods)| {
                router.route(&path, methods)
            })
    }
}

impl ServerTarget for HttpTarget {
    fn register(&mut self, method: Method, path: &str, handler: RuleHandler) {
        let route = path.to_string();
        let endpoint = move |body: Bytes| {
            let handler = handler.clone();
            let route = route.clone();
            async move { serve(&handler, method, &route, body).await }
        };

        let filter = match method {
            Method::Get => MethodFilter::GET,
            Method::Post => MethodFilter::POST,
        };
        let methods = match self.routes.remove(path) {
            Some(existing) => existing.on(filter, endpoint),
            None => axum::routing::on(filter, endpoint),
        };
        self.routes.insert(path.to_string(), methods);
    }
}

async fn serve(handler: &RuleHandler, method: Method, path: &str, body: Bytes) -> Response {
    let started = Instant::now();
    let reply = match decode(&body) {
        Some(body) => handler.handle(body).await,
        None => {
            debug!(%method, path, "Body is not JSON");
            Reply::client_error()
        }
    };
    info!(
        %method,
        path,
        status = reply.status(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request"
    );
    into_response(reply)
}

fn decode(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(Value::Null);
    }
    serde_json::from_slice(body).ok()
}

fn into_response(reply: Reply) -> Response {
    let status = StatusCode::from_u16(reply.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.into_body())).into_response()
}
