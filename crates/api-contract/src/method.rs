//! # HTTP Methods
//!
//! The closed set of verbs an endpoint can be declared with. Parsing is
//! case-insensitive; the canonical token is lowercase.

use crate::error::ApiError;
use std::fmt;
use std::str::FromStr;

/// A supported HTTP verb.
///
/// The variants are the only values that exist, so a `Method` is always valid
/// once you hold one. Extend the set by adding a variant and a `parse` arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Matches `name` case-insensitively against the supported verbs.
    pub fn parse(name: &str) -> Result<Self, ApiError> {
        match name.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            _ => Err(ApiError::UnsupportedMethod(name.to_string())),
        }
    }

    /// The canonical lowercase token (`"get"`, `"post"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
        }
    }
}

impl FromStr for Method {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Method::parse("get").unwrap(), Method::Get);
        assert_eq!(Method::parse("GET").unwrap(), Method::Get);
        assert_eq!(Method::parse("PoSt").unwrap(), Method::Post);
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
    }

    #[test]
    fn test_parse_rejects_unsupported_verbs() {
        for name in ["put", "DELETE", "", " get", "patch"] {
            let err = Method::parse(name).unwrap_err();
            assert_eq!(err, ApiError::UnsupportedMethod(name.to_string()));
        }
    }

    #[test]
    fn test_canonical_token_and_display() {
        assert_eq!(Method::Get.as_str(), "get");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_ne!(Method::Get, Method::Post);
    }
}
