//! Rules on keys placed next to `$ref`.
//!
//! Before OpenAPI 3.1 a reference object replaces itself with its target,
//! so anything written beside `$ref` is silently dropped. `refSiblings`
//! rejects every sibling; `oasRefSiblings` tolerates `description` and
//! `summary`. Both stay quiet on 3.1 documents, where schemas follow JSON
//! Schema 2020-12 and siblings are evaluated.

use oaslint_core::index::ReferenceFact;
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the strict rule.
pub const NAME: &str = "refSiblings";

/// Function name of the rule allowing `description` and `summary`.
pub const OAS_NAME: &str = "oasRefSiblings";

const ALLOWED_SIBLINGS: [&str; 2] = ["description", "summary"];

fn report(ctx: &RuleContext<'_>, reference: &ReferenceFact<'_>, message: String) -> Violation {
    ctx.violation(message, &reference.path.key("$ref"), reference.key)
}

/// Flags any `$ref` that has sibling keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefSiblings;

impl RefSiblings {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RefSiblings {
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
        if ctx.supports_ref_siblings() {
            return Vec::new();
        }

        index
            .reference_siblings()
            .into_iter()
            .map(|reference| {
                report(
                    ctx,
                    reference,
                    "a `$ref` cannot be placed next to any other properties".to_string(),
                )
            })
            .collect()
    }
}

/// Flags `$ref` siblings other than `description` and `summary`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OasRefSiblings;

impl OasRefSiblings {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OasRefSiblings {
    fn name(&self) -> &'static str {
        OAS_NAME
    }

    fn category(&self) -> Category {
        Category::Schemas
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(index) = ctx.index else {
            return Vec::new();
        };
        if ctx.supports_ref_siblings() {
            return Vec::new();
        }

        let mut violations = Vec::new();
        for reference in index.reference_siblings() {
            let forbidden: Vec<&str> = reference
                .sibling_keys()
                .into_iter()
                .filter(|key| !ALLOWED_SIBLINGS.contains(key))
                .collect();
            if forbidden.is_empty() {
                continue;
            }
            violations.push(report(
                ctx,
                reference,
                format!(
                    "a `$ref` cannot be placed next to `{}`, only `description` and `summary` are allowed",
                    forbidden.join("`, `")
                ),
            ));
        }
        violations
    }
}
