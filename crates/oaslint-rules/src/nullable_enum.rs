//! Rule requiring nullable enums to list `null`.
//!
//! A schema is nullable when it declares `nullable: true` (OpenAPI 3.0,
//! `x-nullable` in Swagger 2.0) or when its `type` array contains
//! `"null"` (OpenAPI 3.1). Validators check `enum` independently, so a
//! nullable enum without an actual `null` entry still rejects `null`.
//! The string `"null"` does not count.

use oaslint_core::{Category, Node, NullableEncoding, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "nullableEnum";

/// Flags nullable enums that do not contain `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableEnum;

impl NullableEnum {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NullableEnum {
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

        index
            .enums
            .iter()
            .filter(|fact| is_nullable(ctx, fact.schema))
            .filter(|fact| !fact.values.items().iter().any(Node::is_null))
            .map(|fact| {
                ctx.schema_violation(
                    "enum contains a `null` type, but the enum does not contain a `null` value",
                    &fact.path,
                    fact.key,
                )
            })
            .collect()
    }
}

/// Whether `schema` admits `null` under either encoding.
///
/// Both encodings are accepted regardless of version; the native one is
/// checked first.
pub(crate) fn is_nullable(ctx: &RuleContext<'_>, schema: &Node) -> bool {
    let keyword = || ["nullable", "x-nullable"].iter().any(|k| schema.get(k).is_some_and(Node::is_true));
    let type_array = || {
        schema
            .get("type")
            .is_some_and(|ty| ty.items().iter().any(|t| t.as_str() == Some("null")))
    };
    match ctx.nullable_encoding() {
        NullableEncoding::Keyword => keyword() || type_array(),
        NullableEncoding::TypeArray => type_array() || keyword(),
    }
}
