//! Rule checking enum entries against the declared schema type.
//!
//! An integer entry satisfies `number`; a float does not satisfy
//! `integer`. `null` is accepted when the schema is nullable. The `type`
//! option supplies a type for schemas that declare none.

use crate::nullable_enum::is_nullable;

use oaslint_core::{Category, Node, Rule, RuleContext, RuleSchema, Violation};

/// Function name of the rule.
pub const NAME: &str = "typedEnum";

/// Flags enum entries whose type differs from the schema type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedEnum;

impl TypedEnum {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TypedEnum {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Schemas
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::new(NAME).property("type", "type assumed when a schema declares none")
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(index) = ctx.index else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for fact in &index.enums {
            let declared: Vec<&str> = match fact.type_node {
                Some(ty) if ty.is_sequence() => ty.items().iter().filter_map(Node::as_str).collect(),
                Some(ty) => ty.as_str().into_iter().collect(),
                None => ctx.options.get_str("type").into_iter().collect(),
            };
            if declared.is_empty() {
                continue;
            }
            let nullable = is_nullable(ctx, fact.schema);

            for (i, item) in fact.values.items().iter().enumerate() {
                let actual = item.json_type();
                let matches = declared.contains(&actual)
                    || (actual == "integer" && declared.contains(&"number"))
                    || (actual == "null" && nullable);
                if matches {
                    continue;
                }
                let shown = if item.is_scalar() { item.value.clone() } else { item.to_json().to_string() };
                violations.push(ctx.schema_violation(
                    format!(
                        "enum value `{shown}` is of type `{actual}` but the schema requires `{}`",
                        declared.join("`, `")
                    ),
                    &fact.path.index(i),
                    item,
                ));
            }
        }
        violations
    }
}
