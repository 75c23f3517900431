// crates/contract-probe-core/src/core/template.rs
// ============================================================================
// Module: Endpoint Path Templates
// Description: Strict `{name}` placeholder substitution for endpoint paths.
// Purpose: Expand path templates while failing loudly on authoring mistakes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Endpoint paths are written as templates with `{name}` placeholders and
//! expanded with the case's path parameters. Expansion is strict in both
//! directions: every placeholder must be matched by a parameter and every
//! parameter must be consumed by a placeholder. A mismatch indicates a
//! scenario-authoring bug and fails before any request is issued.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Path template expansion errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - All variants indicate scenario-authoring bugs, not runtime conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder had no matching path parameter.
    #[error("placeholder `{{{name}}}` in `{template}` has no matching path parameter")]
    MissingParam {
        /// Unmatched placeholder name.
        name: String,
        /// Template under expansion.
        template: String,
    },
    /// A path parameter matched no placeholder.
    #[error("path parameter `{name}` matches no placeholder in `{template}`")]
    UnusedParam {
        /// Unconsumed parameter name.
        name: String,
        /// Template under expansion.
        template: String,
    },
    /// A `{` placeholder was never closed.
    #[error("unclosed placeholder in `{template}`")]
    UnclosedPlaceholder {
        /// Template under expansion.
        template: String,
    },
    /// A placeholder had an empty name.
    #[error("empty placeholder in `{template}`")]
    EmptyPlaceholder {
        /// Template under expansion.
        template: String,
    },
    /// A `}` appeared without a matching `{`.
    #[error("stray `}}` in `{template}`")]
    StrayClose {
        /// Template under expansion.
        template: String,
    },
}

// ============================================================================
// SECTION: Expansion
// ============================================================================

/// Expands `{name}` placeholders in a path template.
///
/// # Errors
///
/// Returns [`TemplateError`] when a placeholder is unmatched, a parameter is
/// unused, or the template itself is malformed.
pub fn expand_template(
    template: &str,
    params: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    let mut expanded = String::with_capacity(template.len());
    let mut consumed: BTreeSet<&str> = BTreeSet::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (literal, tail) = rest.split_at(open);
        if literal.contains('}') {
            return Err(TemplateError::StrayClose {
                template: template.to_string(),
            });
        }
        expanded.push_str(literal);
        let tail = &tail[1 ..];
        let Some(close) = tail.find('}') else {
            return Err(TemplateError::UnclosedPlaceholder {
                template: template.to_string(),
            });
        };
        let name = &tail[.. close];
        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder {
                template: template.to_string(),
            });
        }
        let Some((key, value)) = params.get_key_value(name) else {
            return Err(TemplateError::MissingParam {
                name: name.to_string(),
                template: template.to_string(),
            });
        };
        expanded.push_str(value);
        consumed.insert(key.as_str());
        rest = &tail[close + 1 ..];
    }

    if rest.contains('}') {
        return Err(TemplateError::StrayClose {
            template: template.to_string(),
        });
    }
    expanded.push_str(rest);

    for name in params.keys() {
        if !consumed.contains(name.as_str()) {
            return Err(TemplateError::UnusedParam {
                name: name.clone(),
                template: template.to_string(),
            });
        }
    }

    Ok(expanded)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions are permitted."
    )]

    use super::*;

    /// Builds a parameter map from string pairs.
    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn expands_single_placeholder() {
        let out = expand_template("api/users/{id}", &params(&[("id", "2")])).unwrap();
        assert_eq!(out, "api/users/2");
    }

    #[test]
    fn passes_through_literal_template() {
        let out = expand_template("api/users", &params(&[])).unwrap();
        assert_eq!(out, "api/users");
    }

    #[test]
    fn rejects_missing_param() {
        let err = expand_template("api/users/{id}", &params(&[])).unwrap_err();
        assert!(matches!(err, TemplateError::MissingParam { .. }));
    }

    #[test]
    fn rejects_unused_param() {
        let err = expand_template("api/users", &params(&[("id", "2")])).unwrap_err();
        assert!(matches!(err, TemplateError::UnusedParam { .. }));
    }

    #[test]
    fn rejects_unclosed_placeholder() {
        let err = expand_template("api/users/{id", &params(&[("id", "2")])).unwrap_err();
        assert!(matches!(err, TemplateError::UnclosedPlaceholder { .. }));
    }

    #[test]
    fn rejects_empty_placeholder() {
        let err = expand_template("api/users/{}", &params(&[])).unwrap_err();
        assert!(matches!(err, TemplateError::EmptyPlaceholder { .. }));
    }

    #[test]
    fn rejects_stray_close() {
        let err = expand_template("api/users/id}", &params(&[])).unwrap_err();
        assert!(matches!(err, TemplateError::StrayClose { .. }));
    }

    #[test]
    fn expands_repeated_placeholder_once_per_site() {
        let out =
            expand_template("api/{version}/users/{version}", &params(&[("version", "v1")]))
                .unwrap();
        assert_eq!(out, "api/v1/users/v1");
    }
}
