//! Rule flagging descriptions that match a forbidden pattern.
//!
//! Markdown descriptions end up rendered in documentation portals; script
//! tags or `eval(` calls in them are an injection risk. The pattern comes
//! from the `pattern` option and is compiled once with the rule
//! definition. Without a pattern the rule reports nothing.

use oaslint_core::{Category, Node, Rule, RuleContext, RuleSchema, Violation};

/// Function name of the rule.
pub const NAME: &str = "noEvalDescriptions";

/// Flags descriptions matching the configured pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvalDescriptions;

impl NoEvalDescriptions {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoEvalDescriptions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::new(NAME).property("pattern", "regular expression descriptions must not match")
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let (Some(index), Some(pattern)) = (ctx.index, ctx.rule.pattern.as_ref()) else {
            return Vec::new();
        };

        index
            .descriptions
            .iter()
            .filter(|d| pattern.is_match(d.value))
            .map(|d| {
                ctx.violation(
                    format!("description contains content with `{}`, forbidden", pattern.as_str()),
                    &d.path,
                    d.node,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint_with, messages};
    use oaslint_core::{RuleDefinition, Severity};

    const DOC: &str = r"openapi: 3.1.0
info:
  title: t
  description: |
    Welcome <script>alert(1)</script>
paths:
  /a:
    get:
      description: calls eval(x)
      responses: {'200': {description: ok}}
";

    fn definition(pattern: &str) -> RuleDefinition {
        RuleDefinition::new("no-eval-in-markdown", NAME, Category::Security, Severity::Error)
            .option("pattern", pattern)
    }

    #[test]
    fn test_matches_configured_pattern() {
        let violations = lint_with(&NoEvalDescriptions::new(), definition(r"eval\("), DOC);
        assert_eq!(messages(&violations), vec![r"description contains content with `eval\(`, forbidden"]);
        assert_eq!(violations[0].path, "$.paths['/a'].get.description");

        let scripts = lint_with(&NoEvalDescriptions::new(), definition("<script"), DOC);
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].path, "$.info.description");
    }

    #[test]
    fn test_no_pattern_reports_nothing() {
        let bare = RuleDefinition::new("no-eval", NAME, Category::Security, Severity::Error);
        assert!(lint_with(&NoEvalDescriptions::new(), bare, DOC).is_empty());
    }
}
