//! # Schemas
//!
//! A [`Schema`] is the validator capability a contract carries for its input and
//! output. The registry only ever calls [`Schema::parse`]; it never looks inside.
//!
//! A handful of built-in schemas cover the common JSON shapes:
//!
//! ```rust
//! use api_contract::schema::{integer, object, string, Schema};
//! use serde_json::json;
//!
//! let user = object()
//!     .field("id", integer().positive())
//!     .field("name", string());
//!
//! assert!(user.parse(&json!({"id": 1, "name": "Alice"})).is_ok());
//! assert!(user.parse(&json!({"id": 0, "name": "Alice"})).is_err());
//! ```
//!
//! Object schemas drop keys they do not declare, so the parsed value only ever
//! contains the declared shape.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a schema. Contracts reference schemas, they do not own them.
pub type SchemaRef = Arc<dyn Schema>;

/// A value failed a schema. `path` locates the offending field from the root.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} at {}", .message, display_path(.path))]
pub struct SchemaError {
    path: Vec<String>,
    message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Prefixes the error location with `segment`.
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn display_path(path: &[String]) -> String {
    std::iter::once("$")
        .chain(path.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(".")
}

/// Validator capability: accepts a value (returning its parsed form) or rejects it.
pub trait Schema: Send + Sync {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError>;

    /// Short human-readable description, used in `Display` output and logs.
    fn describe(&self) -> String;

    /// Called for an object field whose key is missing. `Ok(None)` leaves the key
    /// out of the parsed object.
    fn parse_missing(&self) -> Result<Option<Value>, SchemaError> {
        Err(SchemaError::new("Required"))
    }

    fn into_ref(self) -> SchemaRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        (**self).parse(value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn parse_missing(&self) -> Result<Option<Value>, SchemaError> {
        (**self).parse_missing()
    }
}

impl fmt::Debug for dyn Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(what: &str, value: &Value) -> SchemaError {
    SchemaError::new(format!("Expected {what}, received {}", kind(value)))
}

/// Accepts every value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

pub fn any() -> AnySchema {
    AnySchema
}

impl Schema for AnySchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        Ok(value.clone())
    }

    fn describe(&self) -> String {
        "any".to_string()
    }

    fn parse_missing(&self) -> Result<Option<Value>, SchemaError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringSchema;

pub fn string() -> StringSchema {
    StringSchema
}

impl Schema for StringSchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(expected("string", other)),
        }
    }

    fn describe(&self) -> String {
        "string".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanSchema;

pub fn boolean() -> BooleanSchema {
    BooleanSchema
}

impl Schema for BooleanSchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        match value {
            Value::Bool(_) => Ok(value.clone()),
            other => Err(expected("boolean", other)),
        }
    }

    fn describe(&self) -> String {
        "boolean".to_string()
    }
}

/// Accepts only `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSchema;

pub fn null() -> NullSchema {
    NullSchema
}

impl Schema for NullSchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        match value {
            Value::Null => Ok(Value::Null),
            other => Err(expected("null", other)),
        }
    }

    fn describe(&self) -> String {
        "null".to_string()
    }
}

/// Numbers, optionally restricted to integers and/or strictly positive values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSchema {
    integer: bool,
    positive: bool,
}

pub fn number() -> NumberSchema {
    NumberSchema::default()
}

pub fn integer() -> NumberSchema {
    NumberSchema {
        integer: true,
        positive: false,
    }
}

impl NumberSchema {
    /// Requires the number to be strictly greater than zero.
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }
}

impl Schema for NumberSchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        let Value::Number(n) = value else {
            return Err(expected("number", value));
        };
        let is_integer = n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0);
        if self.integer && !is_integer {
            return Err(SchemaError::new("Expected integer, received float"));
        }
        if self.positive && !n.as_f64().is_some_and(|f| f > 0.0) {
            return Err(SchemaError::new("Number must be greater than 0"));
        }
        Ok(value.clone())
    }

    fn describe(&self) -> String {
        let base = if self.integer { "integer" } else { "number" };
        if self.positive {
            format!("{base}(positive)")
        } else {
            base.to_string()
        }
    }
}

/// Arrays whose every element matches `item`.
pub struct ArraySchema {
    item: SchemaRef,
}

pub fn array<S: Schema + 'static>(item: S) -> ArraySchema {
    ArraySchema {
        item: Arc::new(item),
    }
}

impl Schema for ArraySchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        let Value::Array(items) = value else {
            return Err(expected("array", value));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.item.parse(item).map_err(|e| e.at(i.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn describe(&self) -> String {
        format!("array<{}>", self.item.describe())
    }
}

/// An object field that may be left out. A present value, `null` included, must
/// match `inner`.
pub struct OptionalSchema {
    inner: SchemaRef,
}

pub fn optional<S: Schema + 'static>(inner: S) -> OptionalSchema {
    OptionalSchema {
        inner: Arc::new(inner),
    }
}

impl Schema for OptionalSchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        self.inner.parse(value)
    }

    fn describe(&self) -> String {
        format!("optional<{}>", self.inner.describe())
    }

    fn parse_missing(&self) -> Result<Option<Value>, SchemaError> {
        Ok(None)
    }
}

/// JSON objects with a declared set of fields. Undeclared keys are stripped.
#[derive(Default)]
pub struct ObjectSchema {
    fields: Vec<(String, SchemaRef)>,
}

pub fn object() -> ObjectSchema {
    ObjectSchema::default()
}

impl ObjectSchema {
    pub fn field<S: Schema + 'static>(mut self, name: impl Into<String>, schema: S) -> Self {
        self.fields.push((name.into(), Arc::new(schema)));
        self
    }
}

impl Schema for ObjectSchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        let Value::Object(map) = value else {
            return Err(expected("object", value));
        };
        let mut parsed = Map::new();
        for (name, schema) in &self.fields {
            match map.get(name) {
                Some(field) => {
                    let field = schema.parse(field).map_err(|e| e.at(name.clone()))?;
                    parsed.insert(name.clone(), field);
                }
                None => {
                    if let Some(field) = schema.parse_missing().map_err(|e| e.at(name.clone()))? {
                        parsed.insert(name.clone(), field);
                    }
                }
            }
        }
        Ok(Value::Object(parsed))
    }

    fn describe(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(name, schema)| format!("{name}: {}", schema.describe()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("object {{ {fields} }}")
    }
}
