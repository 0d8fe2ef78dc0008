//! # API Table
//!
//! The endpoints this server exposes, declared as one table. Each row pairs a
//! contract (schemas) with its procedure:
//!
//! | version | method | path     | input            | output                           |
//! |---------|--------|----------|------------------|----------------------------------|
//! | 1       | get    | `/hello` | any              | any                              |
//! | 1       | post   | `/user`  | `{name: string}` | `{id: positive int, name: string}` |

use crate::model::{Greeting, User, UserCreate};
use api_contract::procedure::{from_fn, Procedure, ProcedureError};
use api_contract::schema::{any, integer, object, string, Schema};
use api_contract::{Api, ApiError, ApiTableRow};
use serde_json::Value;
use tracing::debug;

pub fn hello(_input: Value) -> Result<Value, ProcedureError> {
    let greeting = Greeting {
        message: "world".to_string(),
    };
    Ok(serde_json::to_value(greeting)?)
}

pub fn create_user(input: Value) -> Result<Value, ProcedureError> {
    let params: UserCreate = serde_json::from_value(input)?;
    debug!(?params, "create_user called");
    Ok(serde_json::to_value(User::new(1, params.name))?)
}

pub fn api_table() -> Vec<ApiTableRow<'static>> {
    vec![
        (
            1,
            "get",
            "/hello",
            any().into_ref(),
            any().into_ref(),
            from_fn(hello).into_ref(),
        ),
        (
            1,
            "post",
            "/user",
            object().field("name", string()).into_ref(),
            object()
                .field("id", integer().positive())
                .field("name", string())
                .into_ref(),
            from_fn(create_user).into_ref(),
        ),
    ]
}

/// Compiles [`api_table`] into an [`Api`].
pub fn build_api() -> Result<Api, ApiError> {
    Api::from_table(api_table())
}
