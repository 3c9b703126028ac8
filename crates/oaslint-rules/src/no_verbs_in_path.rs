//! Rule forbidding HTTP method names as path segments.
//!
//! # Rationale
//!
//! The method already states the action; `/users/get` duplicates it and
//! usually hides an RPC-style design.

use oaslint_core::utils::paths::{is_http_method, is_variable, segments};
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "noVerbsInPath";

/// Flags path segments named after an HTTP method.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVerbsInPath;

impl NoVerbsInPath {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoVerbsInPath {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Operations
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for item in model.path_items() {
            for segment in segments(item.path) {
                if is_variable(segment) || !is_http_method(&segment.to_ascii_lowercase()) {
                    continue;
                }
                violations.push(ctx.violation(
                    format!("path `{}` contains an HTTP Verb `{segment}`", item.path),
                    &item.json_path,
                    item.key,
                ));
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_flags_verbs_in_any_case() {
        let violations = lint(
            &NoVerbsInPath::new(),
            r"swagger: '2.0'
info: {title: t, version: '1'}
paths:
  /users/GET: {}
  /posts/{get}: {}
  /getters: {}
",
        );
        assert_eq!(messages(&violations), vec!["path `/users/GET` contains an HTTP Verb `GET`"]);
    }
}
