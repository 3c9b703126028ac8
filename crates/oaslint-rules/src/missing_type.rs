//! Rule requiring a `type` on schemas that give no other hint of their
//! shape.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "missingType";

/// Keys that make a missing `type` acceptable.
const SHAPE_KEYS: [&str; 12] = [
    "type",
    "allOf",
    "oneOf",
    "anyOf",
    "enum",
    "const",
    "properties",
    "items",
    "$ref",
    "additionalProperties",
    "patternProperties",
    "not",
];

/// Members of these keywords inherit the shape of the parent schema.
const CONSTRAINT_KEYWORDS: [&str; 4] = ["allOf", "oneOf", "anyOf", "not"];

/// Flags schemas without `type` or any structural keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingType;

impl MissingType {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingType {
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
            if SHAPE_KEYS.iter().any(|key| schema.node.has(key)) {
                continue;
            }
            if schema.via.is_some_and(|via| CONSTRAINT_KEYWORDS.contains(&via)) {
                continue;
            }
            let message = match (schema.via, schema.key) {
                (Some("properties"), Some(key)) => {
                    format!("schema property `{}` is missing a `type` field", key.value)
                }
                _ => "schema is missing a `type` field".to_string(),
            };
            violations.push(ctx.schema_violation(message, &schema.path, schema.key.unwrap_or(schema.node)));
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_untyped_schemas() {
        let violations = lint(
            &MissingType::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /a:
    get:
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema: {description: anything}
components:
  schemas:
    Pet:
      type: object
      properties:
        name: {description: the name}
        tag: {enum: [a, b]}
      oneOf:
        - required: [name]
    Ref: {$ref: '#/components/schemas/Pet'}
",
        );
        assert_eq!(
            messages(&violations),
            vec![
                "schema is missing a `type` field",
                "schema property `name` is missing a `type` field",
            ]
        );
        assert_eq!(violations[0].path, "$.paths['/a'].get.responses['200'].content['application/json'].schema");
        assert_eq!(violations[1].path, "$.components.schemas.Pet.properties.name");
    }
}
