//! Rule requiring kebab-case path segments.
//!
//! # Rationale
//!
//! URLs are case-insensitive in practice; lowercase hyphenated segments
//! avoid surprises. Templated segments (`{petId}`, `{id}.json`) and empty
//! segments are not checked.

use oaslint_core::utils::casing::is_kebab_segment;
use oaslint_core::utils::paths::{is_variable, segments};
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "pathsKebabCase";

/// Flags paths with segments that are not kebab-case.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathsKebabCase;

impl PathsKebabCase {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PathsKebabCase {
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

        model
            .path_items()
            .iter()
            .filter_map(|item| {
                let offending: Vec<String> = segments(item.path)
                    .into_iter()
                    .filter(|s| !s.is_empty() && !is_variable(s) && !is_kebab_segment(s))
                    .map(|s| format!("`{s}`"))
                    .collect();
                if offending.is_empty() {
                    return None;
                }
                Some(ctx.violation(
                    format!("path segments {} do not use kebab-case", offending.join(", ")),
                    &item.json_path,
                    item.key,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_flags_segments() {
        let violations = lint(
            &PathsKebabCase::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /pet_store/{petId}/Photos: {}
  /pets/{id}.json: {}
  /api//v1/report.csv: {}
  /: {}
",
        );
        assert_eq!(
            messages(&violations),
            vec!["path segments `pet_store`, `Photos` do not use kebab-case"]
        );
        assert_eq!(violations[0].path, "$.paths['/pet_store/{petId}/Photos']");
    }
}
