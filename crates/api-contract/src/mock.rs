//! # Test Doubles
//!
//! Utilities for testing tables and targets without a real server.
//!
//! - [`CountingProcedure`] wraps a procedure and counts calls, so a test can
//!   prove a rejected request never reached the behavior.
//! - [`FailingProcedure`] always errors.
//! - [`RecordingTarget`] records what an [`Api`](crate::Api) registered.
//!
//! These are plain public types rather than `#[cfg(test)]` items so integration
//! tests in other crates can use them.

use crate::handler::RuleHandler;
use crate::method::Method;
use crate::procedure::{Procedure, ProcedureError, ProcedureRef};
use crate::target::ServerTarget;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Wraps a procedure and counts how many times it was invoked.
///
/// Clones share the counter.
///
/// # Example
/// ```ignore
/// let counting = CountingProcedure::new(create_user());
/// let api = Api::from_table(vec![(1, "post", "/user", input, output, counting.clone().into_ref())])?;
/// // ... send an invalid body ...
/// assert_eq!(counting.calls(), 0);
/// ```
#[derive(Clone)]
pub struct CountingProcedure {
    inner: ProcedureRef,
    calls: Arc<AtomicUsize>,
}

impl CountingProcedure {
    pub fn new<P: Procedure + 'static>(inner: P) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Procedure for CountingProcedure {
    async fn call(&self, input: Value) -> Result<Value, ProcedureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.call(input).await
    }
}

/// A procedure that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingProcedure {
    message: String,
}

impl FailingProcedure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Procedure for FailingProcedure {
    async fn call(&self, _input: Value) -> Result<Value, ProcedureError> {
        Err(self.message.clone().into())
    }
}

/// A [`ServerTarget`] that only records registrations.
#[derive(Debug, Default, Clone)]
pub struct RecordingTarget {
    registrations: Arc<Mutex<Vec<(Method, String, RuleHandler)>>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(method, path)` pairs in registration order.
    pub fn routes(&self) -> Vec<(Method, String)> {
        self.registrations
            .lock()
            .unwrap()
            .iter()
            .map(|(method, path, _)| (*method, path.clone()))
            .collect()
    }

    /// The handler registered for `(method, path)`, if any.
    pub fn handler(&self, method: Method, path: &str) -> Option<RuleHandler> {
        self.registrations
            .lock()
            .unwrap()
            .iter()
            .find(|(m, p, _)| *m == method && p == path)
            .map(|(_, _, handler)| handler.clone())
    }

    /// Panics unless exactly `expected` was registered, in any order.
    pub fn verify(&self, expected: &[(Method, &str)]) {
        let mut actual = self.routes();
        actual.sort();
        let mut expected: Vec<_> = expected
            .iter()
            .map(|(method, path)| (*method, path.to_string()))
            .collect();
        expected.sort();
        assert_eq!(actual, expected, "Registered routes do not match");
    }
}

impl ServerTarget for RecordingTarget {
    fn register(&mut self, method: Method, path: &str, handler: RuleHandler) {
        self.registrations
            .lock()
            .unwrap()
            .push((method, path.to_string(), handler));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::from_fn;
    use serde_json::json;

    #[tokio::test]
    async fn test_counting_procedure_shares_counter() {
        let counting = CountingProcedure::new(from_fn(|input: Value| Ok(input)));
        let shared = counting.clone().into_ref();

        shared.call(json!(1)).await.unwrap();
        shared.call(json!(2)).await.unwrap();
        assert_eq!(counting.calls(), 2);
    }

    #[tokio::test]
    async fn test_failing_procedure() {
        let err = FailingProcedure::new("nope").call(Value::Null).await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
