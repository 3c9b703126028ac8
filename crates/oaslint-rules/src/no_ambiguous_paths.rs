//! Rule detecting path templates a router cannot tell apart.
//!
//! Two paths are ambiguous when they have the same number of segments,
//! every position holds either the same literal or a variable in both,
//! at least one position is a variable, and they share an HTTP method.
//! A literal segment wins over a variable at the same position, so
//! `/foo/{x}` and `/foo/bar` are not ambiguous.

use oaslint_core::model::PathItem;
use oaslint_core::utils::paths::{is_variable, segments};
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "noAmbiguousPaths";

/// Flags pairs of ambiguous paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAmbiguousPaths;

impl NoAmbiguousPaths {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoAmbiguousPaths {
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

        let items = model.path_items();
        let mut violations = Vec::new();
        for (i, first) in items.iter().enumerate() {
            for second in &items[i + 1..] {
                if ambiguous(first, second) {
                    violations.push(ctx.violation(
                        format!(
                            "paths are ambiguous with one another: `{}` and `{}`",
                            first.path, second.path
                        ),
                        &second.json_path,
                        second.key,
                    ));
                }
            }
        }
        violations
    }
}

fn ambiguous(a: &PathItem<'_>, b: &PathItem<'_>) -> bool {
    let left = segments(a.path);
    let right = segments(b.path);
    if left.len() != right.len() {
        return false;
    }
    let mut templated = false;
    for (l, r) in left.iter().zip(&right) {
        match (is_variable(l), is_variable(r)) {
            (true, true) => templated = true,
            (false, false) if l == r => {}
            _ => return false,
        }
    }
    if !templated {
        return false;
    }
    let methods = b.methods();
    a.methods().iter().any(|m| methods.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_reports_only_structurally_identical_pairs() {
        let violations = lint(
            &NoAmbiguousPaths::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /foo/{x}: {get: {}}
  /foo/bar: {get: {}}
  /foo/{y}: {post: {}}
  /users/{a}: {get: {}}
  /users/{b}: {get: {}}
",
        );
        assert_eq!(
            messages(&violations),
            vec!["paths are ambiguous with one another: `/users/{a}` and `/users/{b}`"]
        );
        assert_eq!(violations[0].path, "$.paths['/users/{b}']");
    }

    #[test]
    fn test_different_lengths_are_fine() {
        let violations = lint(
            &NoAmbiguousPaths::new(),
            "openapi: 3.1.0\ninfo: {title: t}\npaths:\n  /a/{x}: {get: {}}\n  /a/{x}/b: {get: {}}\n",
        );
        assert!(violations.is_empty());
    }
}
