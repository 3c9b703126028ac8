//! Rule enforcing the JSON Schema constraints of type keywords.
//!
//! For every schema:
//!
//! - `type` is a known type name, or an array of them
//! - length, item, property and contains counts are non-negative, and
//!   each `max*` is at least its `min*`
//! - `multipleOf` is positive
//! - `maximum >= minimum`, `exclusiveMaximum >= exclusiveMinimum`
//! - `pattern` is a valid ECMA-262 expression
//! - names in `required` and `dependentRequired` are declared properties
//!
//! Properties are looked up on the schema, on the members of its
//! `allOf`/`oneOf`/`anyOf` (following `$ref`), and, for a schema that is
//! itself a combinator member, on its parent.

use oaslint_core::index::SchemaFact;
use oaslint_core::model::resolve;
use oaslint_core::{Category, Node, Rule, RuleContext, SpecFormat, Violation};

use std::collections::BTreeSet;

/// Function name of the rule.
pub const NAME: &str = "schemaTypeCheck";

const KNOWN_TYPES: [&str; 7] = ["string", "integer", "number", "boolean", "array", "object", "null"];

const COUNT_PAIRS: [(&str, &str); 4] = [
    ("minLength", "maxLength"),
    ("minItems", "maxItems"),
    ("minProperties", "maxProperties"),
    ("minContains", "maxContains"),
];

const COMBINATORS: [&str; 3] = ["allOf", "oneOf", "anyOf"];

const MAX_MEMBER_DEPTH: usize = 8;

/// Checks type keywords of every schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaTypeCheck;

impl SchemaTypeCheck {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

struct Checker<'c, 'a> {
    ctx: &'c RuleContext<'a>,
    schemas: &'c [SchemaFact<'a>],
    violations: Vec<Violation>,
}

impl Rule for SchemaTypeCheck {
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

        let mut checker = Checker {
            ctx,
            schemas: &index.schemas,
            violations: Vec::new(),
        };
        for schema in &index.schemas {
            checker.check_type(schema);
            checker.check_counts(schema);
            checker.check_numbers(schema);
            checker.check_pattern(schema);
            checker.check_required(schema);
            checker.check_dependent_required(schema);
        }
        checker.violations
    }
}

impl<'a> Checker<'_, 'a> {
    fn report(&mut self, schema: &SchemaFact<'a>, keyword: &str, node: &Node, message: String) {
        let violation = self.ctx.schema_violation(message, &schema.path.key(keyword), node);
        self.violations.push(violation);
    }

    fn check_type(&mut self, schema: &SchemaFact<'a>) {
        let Some(ty) = schema.node.get("type") else {
            return;
        };
        let allows_file = self.ctx.spec_info.format == SpecFormat::Swagger2;
        let known = |name: &str| KNOWN_TYPES.contains(&name) || (allows_file && name == "file");

        let names: Vec<&Node> = if ty.is_sequence() {
            ty.items().iter().collect()
        } else {
            vec![ty]
        };
        for name in names {
            match name.as_str() {
                Some(value) if name.is_scalar() && known(value) => {}
                Some(value) => {
                    self.report(schema, "type", name, format!("unknown schema type: `{value}`"));
                }
                None => self.report(
                    schema,
                    "type",
                    name,
                    "schema `type` must be a string or an array of strings".to_string(),
                ),
            }
        }
    }

    fn check_counts(&mut self, schema: &SchemaFact<'a>) {
        for (min_key, max_key) in COUNT_PAIRS {
            let mut bounds = [None, None];
            for (slot, keyword) in [min_key, max_key].into_iter().enumerate() {
                let Some(value) = schema.node.get(keyword) else {
                    continue;
                };
                match value.as_f64() {
                    Some(n) if n >= 0.0 => bounds[slot] = Some(n),
                    _ => self.report(
                        schema,
                        keyword,
                        value,
                        format!("`{keyword}` should be a non-negative number"),
                    ),
                }
            }
            if let ([Some(min), Some(max)], Some(node)) = (bounds, schema.node.get(max_key)) {
                if max < min {
                    self.report(
                        schema,
                        max_key,
                        node,
                        format!("`{max_key}` should be greater than or equal to `{min_key}`"),
                    );
                }
            }
        }
    }

    fn check_numbers(&mut self, schema: &SchemaFact<'a>) {
        if let Some(value) = schema.node.get("multipleOf") {
            if !value.as_f64().is_some_and(|n| n > 0.0) {
                self.report(
                    schema,
                    "multipleOf",
                    value,
                    "`multipleOf` should be a number greater than `0`".to_string(),
                );
            }
        }

        for (min_key, max_key) in [("minimum", "maximum"), ("exclusiveMinimum", "exclusiveMaximum")] {
            let min = schema.node.get(min_key).and_then(Node::as_f64);
            let Some(max_node) = schema.node.get(max_key) else {
                continue;
            };
            if let (Some(min), Some(max)) = (min, max_node.as_f64()) {
                if max < min {
                    self.report(
                        schema,
                        max_key,
                        max_node,
                        format!("`{max_key}` should be greater than or equal to `{min_key}`"),
                    );
                }
            }
        }
    }

    fn check_pattern(&mut self, schema: &SchemaFact<'a>) {
        let Some(node) = schema.node.get("pattern") else {
            return;
        };
        let Some(pattern) = node.as_str() else {
            return;
        };
        if let Some(reason) = pattern_error(pattern) {
            self.report(
                schema,
                "pattern",
                node,
                format!("schema `pattern` should be a valid regular expression: {reason}"),
            );
        }
    }

    fn check_required(&mut self, schema: &SchemaFact<'a>) {
        let Some(required) = schema.node.get("required") else {
            return;
        };
        if !required.is_sequence() || accepts_any_property(schema.node) {
            return;
        }
        let defined = self.defined_properties(schema);

        for (i, item) in required.items().iter().enumerate() {
            let Some(name) = item.as_str() else {
                continue;
            };
            if !defined.contains(name) {
                let violation = self.ctx.schema_violation(
                    format!("`required` property `{name}` is not defined in `properties`"),
                    &schema.path.key("required").index(i),
                    item,
                );
                self.violations.push(violation);
            }
        }
    }

    fn check_dependent_required(&mut self, schema: &SchemaFact<'a>) {
        let Some(dependencies) = schema.node.get("dependentRequired") else {
            return;
        };
        let defined = self.defined_properties(schema);
        let base = schema.path.key("dependentRequired");

        for (property, names) in dependencies.pairs() {
            let property_path = base.key(property.value.clone());
            if !defined.contains(property.value.as_str()) {
                let violation = self.ctx.schema_violation(
                    format!("`dependentRequired` property `{}` is not defined in `properties`", property.value),
                    &property_path,
                    property,
                );
                self.violations.push(violation);
            }
            for (i, item) in names.items().iter().enumerate() {
                let Some(name) = item.as_str() else {
                    continue;
                };
                let message = if name == property.value {
                    format!("`dependentRequired` property `{name}` depends on itself, a circular dependency")
                } else if !defined.contains(name) {
                    format!("`dependentRequired` property `{name}` is not defined in `properties`")
                } else {
                    continue;
                };
                let violation = self.ctx.schema_violation(message, &property_path.index(i), item);
                self.violations.push(violation);
            }
        }
    }

    fn defined_properties(&self, schema: &SchemaFact<'a>) -> BTreeSet<&'a str> {
        let mut names = BTreeSet::new();
        collect_properties(self.ctx.document, schema.node, &mut names, 0);

        let polymorphic = schema.via.is_some_and(|via| COMBINATORS.contains(&via));
        if let (true, Some(parent)) = (polymorphic, schema.parent.and_then(|p| self.schemas.get(p))) {
            collect_properties(self.ctx.document, parent.node, &mut names, 0);
        }
        names
    }
}

fn accepts_any_property(schema: &Node) -> bool {
    schema.has("patternProperties")
        || schema
            .get("additionalProperties")
            .is_some_and(|extra| extra.is_mapping() && !extra.is_empty())
}

fn collect_properties<'a>(document: &'a Node, schema: &'a Node, names: &mut BTreeSet<&'a str>, depth: usize) {
    if depth > MAX_MEMBER_DEPTH {
        return;
    }
    let schema = resolve(document, schema);
    if let Some(properties) = schema.get("properties") {
        names.extend(properties.pairs().map(|(key, _)| key.value.as_str()));
    }
    for keyword in COMBINATORS {
        let Some(members) = schema.get(keyword) else {
            continue;
        };
        for member in members.items() {
            collect_properties(document, member, names, depth + 1);
        }
    }
}

/// Returns why `pattern` is not a valid ECMA-262 expression, if it is not.
///
/// Patterns are compiled without the `u` flag, so Annex B forms such as a
/// literal `{` are accepted.
fn pattern_error(pattern: &str) -> Option<String> {
    regress::Regex::new(pattern).err().map(|err| err.to_string())
}
