//! Swagger 2.0 rule: a `discriminator` names a required property.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "oas2Discriminator";

/// Checks Swagger 2.0 discriminators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oas2Discriminator;

impl Oas2Discriminator {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Oas2Discriminator {
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
            let Some((key, discriminator)) = schema.node.entry("discriminator") else {
                continue;
            };
            let id = schema.key.map_or_else(|| schema.path.to_string(), |k| k.value.clone());
            let path = schema.path.key("discriminator");

            let Some(property) = discriminator.as_str().filter(|_| discriminator.is_scalar()) else {
                violations.push(ctx.schema_violation(
                    format!("the schema `{id}` uses a non string discriminator"),
                    &path,
                    discriminator,
                ));
                continue;
            };
            let message = match schema.node.get("required") {
                None => format!("schema `{id}` uses a discriminator but has no `required` property set"),
                Some(required) if !required.items().iter().any(|r| r.as_str() == Some(property)) => format!(
                    "schema `{id}` uses discriminator `{property}` but it is not included in `required` properties"
                ),
                Some(_) => continue,
            };
            violations.push(ctx.schema_violation(message, &path, key));
        }
        violations
    }
}
