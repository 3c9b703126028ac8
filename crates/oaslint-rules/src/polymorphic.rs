//! Style rules discouraging references under `oneOf` and `anyOf`.

use oaslint_core::index::ReferenceFact;
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the `oneOf` rule.
pub const ONE_OF_NAME: &str = "polymorphicOneOf";

/// Function name of the `anyOf` rule.
pub const ANY_OF_NAME: &str = "polymorphicAnyOf";

fn report(ctx: &RuleContext<'_>, keyword: &str, references: Vec<&ReferenceFact<'_>>) -> Vec<Violation> {
    references
        .into_iter()
        .map(|reference| {
            ctx.schema_violation(
                format!(
                    "`{keyword}` polymorphic reference `{}`, polymorphism makes schemas harder to consume",
                    reference.reference
                ),
                &reference.path,
                reference.node,
            )
        })
        .collect()
}

/// Flags every reference under `oneOf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolymorphicOneOf;

impl PolymorphicOneOf {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PolymorphicOneOf {
    fn name(&self) -> &'static str {
        ONE_OF_NAME
    }

    fn category(&self) -> Category {
        Category::Schemas
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        match ctx.index {
            Some(index) => report(ctx, "oneOf", index.poly_one_of()),
            None => Vec::new(),
        }
    }
}

/// Flags every reference under `anyOf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolymorphicAnyOf;

impl PolymorphicAnyOf {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PolymorphicAnyOf {
    fn name(&self) -> &'static str {
        ANY_OF_NAME
    }

    fn category(&self) -> Category {
        Category::Schemas
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        match ctx.index {
            Some(index) => report(ctx, "anyOf", index.poly_any_of()),
            None => Vec::new(),
        }
    }
}
