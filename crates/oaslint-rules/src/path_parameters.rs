//! Rule checking path templates against their `in: path` parameters.
//!
//! # Rationale
//!
//! Every template variable needs a parameter definition and every path
//! parameter needs a variable, otherwise clients cannot build the URL.
//!
//! # Detected Problems
//!
//! - A variable used twice in one template
//! - Templates that only differ by variable names (`/a/{x}` and `/a/{y}`)
//! - Path parameters without `required: true`
//! - A path parameter defined twice at the same level
//! - Variables without a parameter, and parameters without a variable

use oaslint_core::model::Parameter;
use oaslint_core::utils::paths::{normalize, template_variables};
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

use std::collections::{BTreeMap, BTreeSet};

/// Function name of the rule.
pub const NAME: &str = "pathParameters";

/// Checks path templates and path parameters against each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParameters;

impl PathParameters {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PathParameters {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Operations
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        let mut templates: BTreeMap<String, &str> = BTreeMap::new();

        for item in model.path_items() {
            let path = item.path;
            let variables = template_variables(path);

            let mut seen = BTreeSet::new();
            for variable in &variables {
                if !seen.insert(variable.as_str()) {
                    violations.push(ctx.violation(
                        format!("path `{path}` must not use parameter `{variable}` multiple times"),
                        &item.json_path,
                        item.key,
                    ));
                }
            }

            match templates.get(&normalize(path)) {
                Some(first) => violations.push(ctx.violation(
                    format!("paths `{first}` and `{path}` must not be equivalent, paths must be unique"),
                    &item.json_path,
                    item.key,
                )),
                None => {
                    templates.insert(normalize(path), path);
                }
            }

            let top = path_params(item.parameters());
            check_level(ctx, &top, &mut violations);
            let top_names: BTreeSet<&str> = top.iter().filter_map(Parameter::name).collect();

            let operations = item.operations();
            if operations.is_empty() {
                for variable in &variables {
                    if !top_names.contains(variable.as_str()) {
                        violations.push(ctx.violation(
                            format!("path `{path}` must define parameter `{variable}` as expected by the template"),
                            &item.json_path,
                            item.key,
                        ));
                    }
                }
            }

            for op in &operations {
                let own = path_params(op.own_parameters());
                check_level(ctx, &own, &mut violations);
                let mut names = top_names.clone();
                names.extend(own.iter().filter_map(Parameter::name));

                for variable in &variables {
                    if !names.contains(variable.as_str()) {
                        violations.push(ctx.violation(
                            format!(
                                "operation `{}` at `{path}` must define parameter `{variable}` as expected by the path",
                                op.method.to_ascii_uppercase()
                            ),
                            &op.json_path,
                            op.key,
                        ));
                    }
                }
                for param in &own {
                    unused(ctx, param, path, &variables, &mut violations);
                }
            }

            for param in &top {
                unused(ctx, param, path, &variables, &mut violations);
            }
        }
        violations
    }
}

fn path_params(params: Vec<Parameter<'_>>) -> Vec<Parameter<'_>> {
    params
        .into_iter()
        .filter(|p| p.location() == Some("path"))
        .collect()
}

fn check_level(ctx: &RuleContext<'_>, params: &[Parameter<'_>], violations: &mut Vec<Violation>) {
    let mut seen = BTreeSet::new();
    for param in params {
        let Some(name) = param.name() else {
            continue;
        };
        if !param.is_required() {
            let anchor = if param.is_ref() {
                param.raw
            } else {
                param.node.get("required").unwrap_or(param.raw)
            };
            violations.push(ctx.violation(
                format!("path parameter `{name}` must have `required` set to `true`"),
                &param.json_path,
                anchor,
            ));
        }
        if !seen.insert(name) {
            violations.push(ctx.violation(
                format!("path parameter `{name}` must not be defined multiple times"),
                &param.json_path,
                anchor_of(param),
            ));
        }
    }
}

fn unused(
    ctx: &RuleContext<'_>,
    param: &Parameter<'_>,
    path: &str,
    variables: &[String],
    violations: &mut Vec<Violation>,
) {
    let Some(name) = param.name() else {
        return;
    };
    if variables.iter().any(|v| v == name) {
        return;
    }
    violations.push(ctx.violation(
        format!("parameter `{name}` must be used in path `{path}`"),
        &param.json_path,
        anchor_of(param),
    ));
}

fn anchor_of<'a>(param: &Parameter<'a>) -> &'a Node {
    if param.is_ref() {
        param.raw
    } else {
        param.node.get("name").unwrap_or(param.raw)
    }
}
