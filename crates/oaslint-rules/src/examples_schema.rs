//! Rule validating examples against the schema they illustrate.
//!
//! Media types, parameters and headers have their `example` and every
//! `examples[*].value` checked against their `schema`; schemas have
//! their own `example` (and, in OpenAPI 3.1, `examples`) checked against
//! themselves. Each validator failure becomes one finding anchored on the
//! offending part of the example.
//!
//! OpenAPI 3.0 `nullable: true` is expanded into a `null` type before
//! validation. In OpenAPI 3.1 `nullable` is not a keyword, so a `null`
//! example under it is reported with a dedicated message.

use oaslint_core::model::reference_of;
use oaslint_core::validator::{expand_nullable, schema_at};
use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, SpecFormat, Violation};

use serde_json::Value;
use tracing::debug;

/// Function name of the rule.
pub const NAME: &str = "examplesSchema";

/// Validates examples against their schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExamplesSchema;

impl ExamplesSchema {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

struct Checker<'c, 'a> {
    ctx: &'c RuleContext<'a>,
    document: Value,
    violations: Vec<Violation>,
}

impl Rule for ExamplesSchema {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Validation
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let (Some(model), Some(index)) = (ctx.model, ctx.index) else {
            return Vec::new();
        };
        if ctx.validator.is_none() {
            return Vec::new();
        }

        let mut document = ctx.document.to_json();
        if ctx.spec_info.format != SpecFormat::Oas31 {
            expand_nullable(&mut document);
        }
        let mut checker = Checker {
            ctx,
            document,
            violations: Vec::new(),
        };

        let owners = index
            .media_types
            .iter()
            .map(|m| (m.node, &m.path))
            .chain(index.headers.iter().map(|h| (h.node, &h.path)))
            .chain(index.parameter_objects.iter().map(|p| (p.node, &p.path)));
        for (owner, path) in owners {
            let Some(schema) = owner.get("schema") else {
                continue;
            };
            let reference = schema_reference(schema, &path.key("schema"));
            let resolved = model.resolve(schema);
            if let Some(example) = owner.get("example") {
                checker.check(&reference, resolved, example, &path.key("example"));
            }
            let Some(examples) = owner.get("examples") else {
                continue;
            };
            let base = path.key("examples");
            for (name, raw) in examples.unique_pairs() {
                let example = model.resolve(raw);
                let Some(value) = example.get("value") else {
                    continue;
                };
                if reference_of(raw).is_some() {
                    checker.check_anchored(&reference, resolved, value, &base.key(name.value.clone()), raw);
                } else {
                    checker.check(&reference, resolved, value, &base.key(name.value.clone()).key("value"));
                }
            }
        }

        for schema in &index.schemas {
            let reference = schema.path.to_reference();
            if let Some(example) = schema.node.get("example") {
                checker.check(&reference, schema.node, example, &schema.path.key("example"));
            }
            if ctx.spec_info.format == SpecFormat::Oas31 {
                if let Some(examples) = schema.node.get("examples") {
                    let base = schema.path.key("examples");
                    for (i, example) in examples.items().iter().enumerate() {
                        checker.check(&reference, schema.node, example, &base.index(i));
                    }
                }
            }
        }
        checker.violations
    }
}

fn schema_reference(schema: &Node, path: &JsonPath) -> String {
    reference_of(schema)
        .filter(|r| r.starts_with('#'))
        .map_or_else(|| path.to_reference(), str::to_string)
}

impl Checker<'_, '_> {
    fn check(&mut self, reference: &str, schema: &Node, example: &Node, path: &JsonPath) {
        self.validate(reference, schema, example, path, None);
    }

    fn check_anchored(&mut self, reference: &str, schema: &Node, example: &Node, path: &JsonPath, anchor: &Node) {
        self.validate(reference, schema, example, path, Some(anchor));
    }

    fn validate(&mut self, reference: &str, schema: &Node, example: &Node, path: &JsonPath, anchor: Option<&Node>) {
        let ctx = self.ctx;
        let Some(validator) = ctx.validator else {
            return;
        };

        if ctx.spec_info.format == SpecFormat::Oas31
            && example.is_null()
            && schema.get("nullable").is_some_and(Node::is_true)
        {
            self.violations.push(ctx.violation(
                "schema invalid: `nullable` is not supported in OpenAPI 3.1, use `type: [T, \"null\"]` to allow null",
                path,
                anchor.unwrap_or(example),
            ));
            return;
        }

        let wrapper = schema_at(&self.document, reference);
        let failures = match validator.validate(&wrapper, &example.to_json(), ctx.spec_info.dialect()) {
            Ok(failures) => failures,
            Err(err) => {
                debug!(%reference, error = %err, "skipping example, schema does not compile");
                return;
            }
        };
        for failure in failures {
            let (relative, node) = example.locate_pointer(&failure.instance_path);
            let (path, node) = match anchor {
                Some(anchor) => (path.clone(), anchor),
                None => (path.join(relative.segments()), node),
            };
            self.violations.push(ctx.violation(format!("schema invalid: {}", failure.reason), &path, node));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lint;

    #[test]
    fn test_media_type_examples() {
        let violations = lint(
            &ExamplesSchema::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /pets:
    get:
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema: {$ref: '#/components/schemas/Pet'}
              example: {id: one, name: Rex}
              examples:
                good: {value: {id: 1, name: Rex}}
                bad: {value: {name: Rex}}
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: {type: integer}
        name: {type: string, nullable: true, example: null}
",
        );
        assert_eq!(violations.len(), 2, "{violations:?}");
        assert!(violations.iter().all(|v| v.message.starts_with("schema invalid: ")));
        assert_eq!(
            violations[0].path,
            "$.paths['/pets'].get.responses['200'].content['application/json'].example.id"
        );
        assert_eq!(
            violations[1].path,
            "$.paths['/pets'].get.responses['200'].content['application/json'].examples.bad.value"
        );
    }

    #[test]
    fn test_nullable_is_rejected_in_oas31() {
        let violations = lint(
            &ExamplesSchema::new(),
            r"openapi: 3.1.0
info: {title: t}
paths: {}
components:
  schemas:
    Name: {type: string, nullable: true, example: null}
    Other: {type: [string, 'null'], examples: [a, null, 3]}
",
        );
        assert_eq!(violations.len(), 2, "{violations:?}");
        assert!(violations[0].message.contains("`nullable` is not supported in OpenAPI 3.1"));
        assert_eq!(violations[1].path, "$.components.schemas.Other.examples[2]");
    }

    #[test]
    fn test_one_of_must_match_exactly_once() {
        let violations = lint(
            &ExamplesSchema::new(),
            r"openapi: 3.1.0
info: {title: t}
paths: {}
components:
  schemas:
    Id:
      oneOf: [{type: integer}, {type: number}]
      example: 3
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "$.components.schemas.Id.example");
    }
}
