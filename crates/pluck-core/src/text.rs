//! Symbol sanitization for parametrization values.
//!
//! Parametrization values double as navigation keys. To be usable in an
//! attribute-style shell they are rendered and normalized: spaces, hyphens,
//! and slashes become underscores, and anything that would start with a digit
//! is rejected. Rejected values are simply absent from the filterable key
//! set; listings never fail because of them.

use crate::error::{TreeError, TreeResult};

/// Render a parametrization value as a navigable symbol.
///
/// Strings are used verbatim; every other JSON value is rendered through its
/// JSON representation. Illegal characters (` `, `-`, `/`) are replaced with
/// underscores.
///
/// # Errors
///
/// [`TreeError::InvalidIdentifier`] when the rendered value is empty or
/// starts with a digit.
pub fn to_symbol(value: &serde_json::Value) -> TreeResult<String> {
    let rendered = match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let symbol: String = rendered
        .chars()
        .map(|c| match c {
            ' ' | '-' | '/' => '_',
            other => other,
        })
        .collect();
    match symbol.chars().next() {
        None => Err(TreeError::invalid_identifier(rendered, "empty value")),
        Some(c) if c.is_ascii_digit() => {
            Err(TreeError::invalid_identifier(rendered, "starts with a digit"))
        }
        Some(_) => Ok(symbol),
    }
}

// ============================================================================
// Tests
// ============================================================================
