//! Rule requiring examples on parameters, headers, media types and
//! object or array schemas.
//!
//! # Rationale
//!
//! Examples drive mock servers and documentation. An element is
//! satisfied when it, or anything its schema contains, carries an
//! `example` or non-empty `examples`. A `null` example counts as absent.
//!
//! Scalar schemas (`string`, `number`, `integer`, `boolean`), schemas
//! with `enum`, `const` or `default`, untyped schemas and arrays of enums
//! do not need one. Schemas under media types, parameters and headers are
//! covered by their owner and are not reported on their own.

use oaslint_core::index::{ComponentClass, SpecIndex};
use oaslint_core::model::OpenApi;
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

use std::collections::BTreeSet;

/// Function name of the rule.
pub const NAME: &str = "examplesMissing";

const MAX_DEPTH: usize = 10;

const SCALAR_TYPES: [&str; 4] = ["string", "number", "integer", "boolean"];

/// Flags elements that admit an example but have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExamplesMissing;

impl ExamplesMissing {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ExamplesMissing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Schemas
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let (Some(model), Some(index)) = (ctx.model, ctx.index) else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for param in &index.parameter_objects {
            let Some(schema) = param.node.get("schema") else {
                continue;
            };
            if has_example(param.node) || provides_example(model, schema, 0) {
                continue;
            }
            let name = param.name().unwrap_or_default();
            violations.push(ctx.violation(
                format!("parameter `{name}` is missing `examples` or `example`"),
                &param.path,
                param.node.get("name").unwrap_or(param.raw),
            ));
        }

        for (kind, facts) in [("header", &index.headers), ("media type", &index.media_types)] {
            for fact in facts {
                let Some(schema) = fact.node.get("schema") else {
                    continue;
                };
                if has_example(fact.node) || provides_example(model, schema, 0) {
                    continue;
                }
                violations.push(ctx.violation(
                    format!("{kind} `{}` is missing `examples` or `example`", fact.name),
                    &fact.path,
                    fact.key,
                ));
            }
        }

        check_schemas(ctx, model, index, &mut violations);
        violations
    }
}

fn check_schemas(ctx: &RuleContext<'_>, model: &OpenApi<'_>, index: &SpecIndex<'_>, violations: &mut Vec<Violation>) {
    let components: BTreeSet<String> = index
        .components_of(ComponentClass::Schemas)
        .map(|c| c.path.to_string())
        .collect();
    let mut flagged = BTreeSet::new();

    for (id, schema) in index.schemas.iter().enumerate() {
        let ancestors = ancestors(index, id);
        let top = ancestors.last().copied().unwrap_or(id);
        if !components.contains(&index.schemas[top].path.to_string()) {
            continue;
        }
        if ancestors
            .iter()
            .any(|a| flagged.contains(a) || has_example(index.schemas[*a].node))
        {
            continue;
        }
        if exempt(schema.node) || provides_example(model, schema.node, 0) {
            continue;
        }
        flagged.insert(id);
        violations.push(ctx.schema_violation(
            "schema is missing `examples` or `example`",
            &schema.path,
            schema.key.unwrap_or(schema.node),
        ));
    }
}

/// Indices of the enclosing schemas, innermost first.
fn ancestors(index: &SpecIndex<'_>, id: usize) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut current = index.schemas[id].parent;
    while let Some(parent) = current {
        chain.push(parent);
        current = index.schemas[parent].parent;
    }
    chain
}

fn exempt(schema: &Node) -> bool {
    let Some(ty) = schema.get("type") else {
        return true;
    };
    let scalar = if ty.is_sequence() {
        ty.items().iter().filter_map(Node::as_str).any(|t| SCALAR_TYPES.contains(&t))
    } else {
        ty.as_str().is_some_and(|t| SCALAR_TYPES.contains(&t))
    };
    scalar
        || ["enum", "const", "default"].iter().any(|k| schema.has(k))
        || schema.get("items").is_some_and(|items| items.has("enum"))
}

/// Returns true for a non-null `example` or a non-empty `examples`.
pub(crate) fn has_example(node: &Node) -> bool {
    if node.get("example").is_some_and(|e| !e.is_null()) {
        return true;
    }
    node.get("examples").is_some_and(|examples| {
        if examples.is_sequence() {
            examples.items().iter().any(|e| !e.is_null())
        } else {
            examples.pairs().any(|(_, e)| example_object_present(e))
        }
    })
}

/// An Example Object counts when it carries a non-null `value` or points
/// elsewhere through `externalValue` or `$ref`.
fn example_object_present(example: &Node) -> bool {
    example.has("$ref")
        || example.get("externalValue").is_some_and(|v| !v.is_null())
        || example.get("value").is_some_and(|v| !v.is_null())
}

fn provides_example(model: &OpenApi<'_>, schema: &Node, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    let schema = oaslint_core::model::resolve(model.root(), schema);
    if has_example(schema) {
        return true;
    }
    let nested = |node: &Node| provides_example(model, node, depth + 1);
    if schema
        .get("properties")
        .is_some_and(|props| props.pairs().any(|(_, p)| nested(p)))
    {
        return true;
    }
    if schema.get("items").is_some_and(|items| nested(items)) {
        return true;
    }
    ["allOf", "oneOf", "anyOf"].iter().any(|keyword| {
        schema
            .get(keyword)
            .is_some_and(|list| list.items().iter().any(|member| nested(member)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_flags_parameters_headers_and_media_types() {
        let violations = lint(
            &ExamplesMissing::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /pets:
    get:
      parameters:
        - {name: limit, in: query, schema: {type: integer}}
        - {name: kind, in: query, schema: {type: string}, example: cat}
        - {name: raw, in: query, content: {text/plain: {example: x}}}
      responses:
        '200':
          description: ok
          headers:
            X-Rate: {schema: {type: integer}, example: null}
          content:
            application/json:
              schema:
                type: array
                items:
                  type: object
                  properties:
                    id: {type: integer, example: 1}
            text/plain: {schema: {type: string}}
            application/xml: {}
",
        );
        assert_eq!(
            messages(&violations),
            vec![
                "parameter `limit` is missing `examples` or `example`",
                "header `X-Rate` is missing `examples` or `example`",
                "media type `text/plain` is missing `examples` or `example`",
            ]
        );
        assert_eq!(violations[0].path, "$.paths['/pets'].get.parameters[0]");
    }

    #[test]
    fn test_named_examples_need_a_value() {
        let violations = lint(
            &ExamplesMissing::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /pets:
    get:
      responses:
        '200':
          description: ok
          content:
            text/plain:
              schema: {type: string}
              examples: {one: {value: null}, two: {summary: no value}}
            text/csv:
              schema: {type: string}
              examples: {remote: {externalValue: 'https://example.com/pets.csv'}}
            text/html:
              schema: {type: string}
              examples: {shared: {$ref: '#/components/examples/Page'}}
            application/json:
              schema: {type: string}
              examples: {inline: {value: {name: cat}}}
components:
  examples:
    Page: {value: '<p>pets</p>'}
",
        );
        assert_eq!(
            messages(&violations),
            vec!["media type `text/plain` is missing `examples` or `example`"]
        );
    }

    #[test]
    fn test_component_schemas() {
        let violations = lint(
            &ExamplesMissing::new(),
            r"openapi: 3.1.0
info: {title: t}
paths: {}
components:
  schemas:
    Pet:
      type: object
      properties:
        owner:
          type: object
          properties:
            name: {type: string}
    Tag:
      type: object
      example: {name: a}
      properties:
        meta: {type: object, properties: {a: {type: string}}}
    Name: {type: string}
    Names: {type: array, items: {enum: [a, b]}}
    Wrapper:
      type: object
      allOf:
        - $ref: '#/components/schemas/Tag'
",
        );
        assert_eq!(messages(&violations), vec!["schema is missing `examples` or `example`"]);
        assert_eq!(violations[0].path, "$.components.schemas.Pet");
    }
}
