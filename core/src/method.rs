#![deny(missing_docs)]

//! # HTTP Methods
//!
//! The nine method tokens that may appear as operation keys under an OpenAPI path item.

use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

/// A recognized HTTP method token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `CONNECT`
    Connect,
}

impl HttpMethod {
    /// All recognized methods, in the order they are offered to users.
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
        HttpMethod::Connect,
    ];

    /// Lowercase token, as used for path item keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
            HttpMethod::Connect => "connect",
        }
    }

    /// Case-insensitive lookup. Surrounding whitespace is not trimmed.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "'{}' is not an HTTP method (expected one of {})",
                s,
                Self::ALL.map(|m| m.as_str()).join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(HttpMethod::parse("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("Delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::parse("connect"), Some(HttpMethod::Connect));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(HttpMethod::parse("foo"), None);
        assert_eq!(HttpMethod::parse("x-internal"), None);
        assert_eq!(HttpMethod::parse(" get"), None);
    }

    #[test]
    fn test_from_str_error_lists_choices() {
        let err = "fetch".parse::<HttpMethod>().unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("'fetch'"));
        assert!(msg.contains("options"));
    }
}
