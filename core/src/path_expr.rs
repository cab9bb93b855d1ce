#![deny(missing_docs)]

//! # Path Expressions
//!
//! Parses the raw API path a user types (e.g. `/users/{id}/posts?limit=10&cursor`)
//! into the normalized OpenAPI path and the parameters it implies.

use crate::method::HttpMethod;

/// A raw API path split into its normalized form and inferred parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    /// The text as entered.
    pub raw: String,
    /// Everything before the first `?`.
    pub normalized: String,
    /// `{name}` segments in order of appearance, duplicates kept.
    pub path_parameters: Vec<String>,
    /// Names from the query string, in order.
    pub query_parameters: Vec<String>,
}

impl PathExpression {
    /// Parses a raw path expression.
    ///
    /// Input is expected to have passed [`validate_path`]; anything else is
    /// still parsed, and the normalized path is forced to start with `/`.
    pub fn parse(raw: &str) -> Self {
        let mut normalized = normalized_path(raw).replace(':', "");
        if !normalized.starts_with('/') {
            normalized.insert(0, '/');
        }

        Self {
            raw: raw.to_string(),
            path_parameters: parse_path_parameters(&normalized),
            query_parameters: parse_query_parameters(raw),
            normalized,
        }
    }

    /// The slug used for operation ids and file names.
    pub fn slug(&self) -> String {
        slugify(&self.normalized)
    }
}

/// Returns the `{...}` parameter names of a path, braces stripped.
///
/// `{}` yields an empty name. An unclosed `{` is ignored.
pub fn parse_path_parameters(path: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                params.push(after[..close].to_string());
                rest = &after[close + 1..];
            }
            None => break,
        }
    }

    params
}

/// Returns the query parameter names following the first `?`.
pub fn parse_query_parameters(raw: &str) -> Vec<String> {
    let Some((_, query)) = raw.split_once('?') else {
        return Vec::new();
    };

    query
        .split('&')
        .map(|segment| match segment.split_once('=') {
            Some((name, _)) => name.to_string(),
            None => segment.to_string(),
        })
        .collect()
}

/// Strips the query string, if any.
pub fn normalized_path(raw: &str) -> &str {
    match raw.split_once('?') {
        Some((path, _)) => path,
        None => raw,
    }
}

/// Builds a dash-separated slug from the non-empty path segments.
///
/// e.g. `/users/{id}/posts?limit=1` -> `users-id-posts`
pub fn slugify(path: &str) -> String {
    normalized_path(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace(['{', '}'], ""))
        .collect::<Vec<_>>()
        .join("-")
}

/// Checks a method token, returning the rejection reason on failure.
pub fn validate_method(input: &str) -> Result<HttpMethod, String> {
    HttpMethod::parse(input.trim()).ok_or_else(|| {
        format!(
            "'{}' is not one of: {}",
            input.trim(),
            HttpMethod::ALL.map(|m| m.as_str()).join(", ")
        )
    })
}

/// Checks a raw API path, returning the rejection reason on failure.
pub fn validate_path(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("path must not be empty".to_string());
    }
    if !input.starts_with('/') {
        return Err("path must start with '/'".to_string());
    }
    if input.contains(':') {
        return Err("path must not contain ':' (use {name} for parameters)".to_string());
    }
    if input.matches('?').count() > 1 {
        return Err("path may contain at most one '?'".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parameters_in_order() {
        assert_eq!(parse_path_parameters("/a/{x}/b/{y}"), vec!["x", "y"]);
    }

    #[test]
    fn test_empty_braces_yield_empty_name() {
        assert_eq!(parse_path_parameters("/a/{}/b"), vec![""]);
    }

    #[test]
    fn test_duplicate_path_parameters_kept() {
        assert_eq!(
            parse_path_parameters("/{id}/x/{id}"),
            vec!["id".to_string(), "id".to_string()]
        );
    }

    #[test]
    fn test_unclosed_brace_ignored() {
        assert_eq!(parse_path_parameters("/a/{x}/{broken"), vec!["x"]);
    }

    #[test]
    fn test_no_query_means_no_query_parameters() {
        for raw in ["/", "/users", "/users/{id}", "/a/b/c/"] {
            assert!(parse_query_parameters(raw).is_empty(), "{}", raw);
        }
    }

    #[test]
    fn test_query_parameter_names() {
        assert_eq!(
            parse_query_parameters("/users?limit=10&cursor&sort=asc"),
            vec!["limit", "cursor", "sort"]
        );
    }

    #[test]
    fn test_normalized_path_drops_query() {
        assert_eq!(normalized_path("/users?limit=1"), "/users");
        assert_eq!(normalized_path("/users"), "/users");
        assert!(!PathExpression::parse("/a/{b}?c=d").normalized.contains('?'));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("/users/{id}/posts?limit=1"), "users-id-posts");
        assert_eq!(slugify("/"), "");
        assert_eq!(slugify("//health//"), "health");
    }

    #[test]
    fn test_parse_full_expression() {
        let expr = PathExpression::parse("/orgs/{org}/members?role=admin&page");
        assert_eq!(expr.normalized, "/orgs/{org}/members");
        assert_eq!(expr.path_parameters, vec!["org"]);
        assert_eq!(expr.query_parameters, vec!["role", "page"]);
        assert_eq!(expr.slug(), "orgs-org-members");
    }

    #[test]
    fn test_parse_repairs_malformed_input() {
        let expr = PathExpression::parse("users/:id");
        assert_eq!(expr.normalized, "/users/id");
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/users/{id}").is_ok());
        assert!(validate_path("/users?a=1").is_ok());
        assert!(validate_path("").is_err());
        assert!(validate_path("users").is_err());
        assert!(validate_path("/users/:id").is_err());
        assert!(validate_path("/users?a=1?b=2").is_err());
    }

    #[test]
    fn test_validate_method() {
        assert_eq!(validate_method("PoSt"), Ok(HttpMethod::Post));
        assert!(validate_method("fetch").is_err());
    }
}
