//! # Procedures
//!
//! A [`Procedure`] is the behavior behind an endpoint: one JSON value in, one JSON
//! value (or an error) out. Most procedures are plain closures wrapped with
//! [`from_fn`] or [`from_async`].
//!
//! ```rust
//! use api_contract::procedure::{from_async, from_fn, Procedure, ProcedureError};
//! use serde_json::{json, Value};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let hello = from_fn(|_input: Value| Ok(json!({"message": "world"})));
//! let echo = from_async(|input: Value| async move { Ok::<_, ProcedureError>(input) });
//!
//! assert_eq!(hello.call(json!(null)).await.unwrap(), json!({"message": "world"}));
//! assert_eq!(echo.call(json!(5)).await.unwrap(), json!(5));
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Error returned by a failing procedure. Never shown to clients.
pub type ProcedureError = Box<dyn std::error::Error + Send + Sync>;

/// Shared handle to a procedure.
pub type ProcedureRef = Arc<dyn Procedure>;

/// Behavior capability invoked with the validated request input.
#[async_trait]
pub trait Procedure: Send + Sync {
    async fn call(&self, input: Value) -> Result<Value, ProcedureError>;

    fn into_ref(self) -> ProcedureRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

#[async_trait]
impl<P: Procedure + ?Sized> Procedure for Arc<P> {
    async fn call(&self, input: Value) -> Result<Value, ProcedureError> {
        (**self).call(input).await
    }
}

/// Adapter for synchronous closures. See [`from_fn`].
pub struct FnProcedure<F> {
    f: F,
}

/// Wraps a synchronous closure as a procedure.
pub fn from_fn<F>(f: F) -> FnProcedure<F>
where
    F: Fn(Value) -> Result<Value, ProcedureError> + Send + Sync,
{
    FnProcedure { f }
}

#[async_trait]
impl<F> Procedure for FnProcedure<F>
where
    F: Fn(Value) -> Result<Value, ProcedureError> + Send + Sync,
{
    async fn call(&self, input: Value) -> Result<Value, ProcedureError> {
        (self.f)(input)
    }
}

/// Adapter for closures returning a future. See [`from_async`].
pub struct AsyncFnProcedure<F> {
    f: F,
}

/// Wraps an asynchronous closure as a procedure.
pub fn from_async<F, Fut>(f: F) -> AsyncFnProcedure<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ProcedureError>> + Send,
{
    AsyncFnProcedure { f }
}

#[async_trait]
impl<F, Fut> Procedure for AsyncFnProcedure<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ProcedureError>> + Send,
{
    async fn call(&self, input: Value) -> Result<Value, ProcedureError> {
        (self.f)(input).await
    }
}
