//! Rule requiring schema property names to be camelCase.
//!
//! # Rationale
//!
//! Mixed naming conventions across payloads make generated clients awkward
//! to use. A single lowercase word counts as camelCase.
//!
//! # Skipped
//!
//! - Vendor extensions (`x-…`, any case)

use oaslint_core::utils::casing::{classify, Case};
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "camelCaseProperties";

/// Flags schema property names that are not camelCase.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseProperties;

impl CamelCaseProperties {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CamelCaseProperties {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Schemas
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(index) = ctx.index else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for schema in &index.schemas {
            let Some(properties) = schema.node.get("properties") else {
                continue;
            };
            let base = schema.path.key("properties");
            for (key, _) in properties.unique_pairs() {
                let name = key.value.as_str();
                if is_extension(name) {
                    continue;
                }
                let case = classify(name);
                if case == Case::Camel {
                    continue;
                }
                violations.push(ctx.schema_violation(
                    format!("property `{name}` is `{case}` not `camelCase`"),
                    &base.key(name),
                    key,
                ));
            }
        }
        violations
    }
}

fn is_extension(name: &str) -> bool {
    name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("x-"))
}
