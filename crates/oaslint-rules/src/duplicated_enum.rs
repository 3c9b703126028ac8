//! Rule detecting repeated `enum` values.
//!
//! Values are compared by JSON value, so the string `"1"` and the number
//! `1` are different entries.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

use serde_json::Value;

/// Function name of the rule.
pub const NAME: &str = "duplicatedEnum";

/// Flags every repeated enum entry after its first occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicatedEnum;

impl DuplicatedEnum {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DuplicatedEnum {
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
        for fact in &index.enums {
            let mut seen: Vec<Value> = Vec::new();
            for (i, item) in fact.values.items().iter().enumerate() {
                let value = item.to_json();
                if seen.contains(&value) {
                    let shown = if item.is_scalar() { item.value.clone() } else { value.to_string() };
                    violations.push(ctx.schema_violation(
                        format!("enum contains a duplicate: `{shown}`"),
                        &fact.path.index(i),
                        item,
                    ));
                } else {
                    seen.push(value);
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_reports_repeats_by_value_and_type() {
        let violations = lint(
            &DuplicatedEnum::new(),
            r"openapi: 3.0.3
info: {title: t}
paths: {}
components:
  schemas:
    Code:
      enum: [1, '1', 2, 1, 1]
    Shape:
      enum: [{a: 1}, {a: 1}]
",
        );
        assert_eq!(
            messages(&violations),
            vec![
                "enum contains a duplicate: `1`",
                "enum contains a duplicate: `1`",
                r#"enum contains a duplicate: `{"a":1}`"#,
            ]
        );
        assert_eq!(violations[0].path, "$.components.schemas.Code.enum[3]");
    }

    #[test]
    fn test_swagger_parameter_enums() {
        let violations = lint(
            &DuplicatedEnum::new(),
            r"swagger: '2.0'
info: {title: t, version: '1'}
paths:
  /a:
    get:
      parameters:
        - {name: kind, in: query, type: string, enum: [a, a]}
      responses: {'200': {description: ok}}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "$.paths['/a'].get.parameters[0].enum[1]");
    }
}
