//! # Request Handling
//!
//! A [`RuleHandler`] is a [`Rule`] compiled into a request handler. Every request
//! goes through three phases, stopping at the first failure:
//!
//! 1. **Input** - the body is parsed with the input schema. A rejection is the
//!    caller's fault: `400 {"error":"Client error"}` and the procedure never runs.
//! 2. **Procedure** - the validated input is passed to the procedure. An error
//!    (or a panic) is logged and answered with `500 {"error":"Server error"}`.
//! 3. **Output** - the procedure's value is parsed with the output schema. A
//!    rejection is a server bug: the value is logged, never sent, and the caller
//!    gets `500 {"error":"Server error"}`.
//!
//! On success the parsed output is returned with `200`.
//!
//! Dropping the future returned by [`RuleHandler::handle`] cancels the
//! procedure as well, so a server that abandons a request also stops its work.
//!
//! Error payloads are fixed strings. Validation messages and procedure errors
//! only ever reach the logs.

use crate::rule::Rule;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info_span, Instrument};

/// Status and JSON body produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: u16,
    body: Value,
}

impl Reply {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;

    pub fn ok(body: Value) -> Self {
        Self {
            status: Self::OK,
            body,
        }
    }

    pub fn client_error() -> Self {
        Self {
            status: Self::BAD_REQUEST,
            body: json!({ "error": "Client error" }),
        }
    }

    pub fn server_error() -> Self {
        Self {
            status: Self::INTERNAL_SERVER_ERROR,
            body: json!({ "error": "Server error" }),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: Self::NOT_FOUND,
            body: json!({ "error": "Not found" }),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// A spawned task that is aborted when its handle is dropped before completion.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Future for AbortOnDrop<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A rule ready to serve requests. Cheap to clone; holds no mutable state.
#[derive(Debug, Clone)]
pub struct RuleHandler {
    rule: Rule,
}

impl RuleHandler {
    pub fn new(rule: Rule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Runs the validate → execute → validate pipeline on a raw request body.
    pub async fn handle(&self, body: Value) -> Reply {
        let span = info_span!("request", endpoint = %self.rule.hash_key());
        self.run(body).instrument(span).await
    }

    async fn run(&self, body: Value) -> Reply {
        let input = match self.rule.input_schema().parse(&body) {
            Ok(input) => input,
            Err(e) => {
                debug!(error = %e, "Input rejected");
                return Reply::client_error();
            }
        };

        // Spawned so a panicking procedure fails only this request. The guard
        // ties the task to this future.
        let procedure = self.rule.procedure().clone();
        let task = AbortOnDrop(tokio::spawn(async move { procedure.call(input).await }));
        let output = match task.await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!(error = %e, "Procedure failed");
                return Reply::server_error();
            }
            Err(e) => {
                error!(error = %e, "Procedure panicked");
                return Reply::server_error();
            }
        };

        match self.rule.output_schema().parse(&output) {
            Ok(output) => {
                debug!("Ok");
                Reply::ok(output)
            }
            Err(e) => {
                error!(error = %e, reply = %output, "Unexpected reply");
                Reply::server_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Contract;
    use crate::endpoint::Endpoint;
    use crate::method::Method;
    use crate::mock::{CountingProcedure, FailingProcedure};
    use crate::procedure::{from_async, from_fn, Procedure, ProcedureError, ProcedureRef};
    use crate::resolver::Resolver;
    use crate::schema::{integer, object, string, Schema};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn user_handler(procedure: ProcedureRef) -> RuleHandler {
        let endpoint = Endpoint::new(1, Method::Post, "/user").unwrap();
        let contract = Contract::new(
            endpoint.clone(),
            object().field("name", string()).into_ref(),
            object()
                .field("id", integer().positive())
                .field("name", string())
                .into_ref(),
        );
        let resolver = Resolver::new(endpoint, procedure);
        RuleHandler::new(Rule::new(Arc::new(contract), Arc::new(resolver)).unwrap())
    }

    fn create_user() -> impl Procedure + 'static {
        from_fn(|input: Value| Ok(json!({ "id": 1, "name": input["name"] })))
    }

    #[tokio::test]
    async fn test_valid_request_returns_output() {
        let handler = user_handler(create_user().into_ref());
        let reply = handler.handle(json!({ "name": "Alice" })).await;
        assert_eq!(reply.status(), 200);
        assert_eq!(reply.body(), &json!({ "id": 1, "name": "Alice" }));
    }

    #[tokio::test]
    async fn test_invalid_input_skips_procedure() {
        let counting = CountingProcedure::new(create_user());
        let handler = user_handler(counting.clone().into_ref());

        let reply = handler.handle(json!({})).await;
        assert_eq!(reply, Reply::client_error());
        assert_eq!(reply.body(), &json!({ "error": "Client error" }));
        assert_eq!(counting.calls(), 0);
    }

    #[tokio::test]
    async fn test_procedure_receives_parsed_input() {
        let handler = user_handler(
            from_fn(|input: Value| {
                // Undeclared keys were stripped by the input schema.
                assert_eq!(input, json!({ "name": "Bob" }));
                Ok(json!({ "id": 2, "name": "Bob" }))
            })
            .into_ref(),
        );
        let reply = handler.handle(json!({ "name": "Bob", "role": "admin" })).await;
        assert_eq!(reply.status(), 200);
    }

    #[tokio::test]
    async fn test_procedure_failure_is_server_error() {
        let handler = user_handler(FailingProcedure::new("database unavailable").into_ref());
        let reply = handler.handle(json!({ "name": "Alice" })).await;
        assert_eq!(reply, Reply::server_error());
    }

    #[tokio::test]
    async fn test_procedure_panic_is_server_error() {
        let handler = user_handler(from_fn(|_: Value| panic!("boom")).into_ref());
        let reply = handler.handle(json!({ "name": "Alice" })).await;
        assert_eq!(reply, Reply::server_error());
    }

    #[tokio::test]
    async fn test_malformed_output_is_never_sent() {
        let handler = user_handler(from_fn(|_: Value| Ok(json!({ "id": -1, "secret": "x" }))).into_ref());
        let reply = handler.handle(json!({ "name": "Alice" })).await;
        assert_eq!(reply.status(), 500);
        assert_eq!(reply.into_body(), json!({ "error": "Server error" }));
    }

    #[tokio::test]
    async fn test_dropped_request_cancels_procedure() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let handler = user_handler(
            from_async(move |input: Value| {
                let flag = flag.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    flag.store(true, Ordering::SeqCst);
                    Ok::<_, ProcedureError>(json!({ "id": 1, "name": input["name"] }))
                }
            })
            .into_ref(),
        );

        let cancelled =
            tokio::time::timeout(Duration::from_millis(10), handler.handle(json!({ "name": "Alice" })))
                .await;
        assert!(cancelled.is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
