//! Rule flagging `allOf`, `anyOf` or `oneOf` with a single entry.
//!
//! OpenAPI 3.0 and Swagger 2.0 drop keys next to `$ref`, so
//! `description` + `allOf: [{$ref}]` is the usual way to describe a
//! referenced schema there. That form is accepted on those versions.

use oaslint_core::model::reference_of;
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "unnecessaryCombinator";

const COMBINATORS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// Flags single-entry combinators.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnnecessaryCombinator;

impl UnnecessaryCombinator {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_described_reference(schema: &Node, entry: &Node) -> bool {
    reference_of(entry).is_some() && (schema.has("description") || entry.has("description"))
}

impl Rule for UnnecessaryCombinator {
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
        let workaround_allowed = !ctx.supports_ref_siblings();

        let mut violations = Vec::new();
        for schema in &index.schemas {
            for keyword in COMBINATORS {
                let Some((key, list)) = schema.node.entry(keyword) else {
                    continue;
                };
                let [only] = list.items() else {
                    continue;
                };
                if keyword == "allOf" && workaround_allowed && is_described_reference(schema.node, only) {
                    continue;
                }
                violations.push(ctx.schema_violation(
                    format!("schema uses `{keyword}` with a single entry, the combinator is unnecessary"),
                    &schema.path.key(keyword),
                    key,
                ));
            }
        }
        violations
    }
}
