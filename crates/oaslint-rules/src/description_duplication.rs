//! Rule detecting copy-pasted descriptions and summaries.
//!
//! Texts are compared after trimming. By default descriptions and
//! summaries share one pool, so a description repeating an earlier
//! summary is reported too; set `crossCheck` to `false` to compare each
//! kind only with itself.

use oaslint_core::index::TextFact;
use oaslint_core::{Category, Node, Rule, RuleContext, RuleSchema, Violation};

use std::collections::HashMap;

/// Function name of the rule.
pub const NAME: &str = "descriptionDuplication";

/// Flags repeated description and summary texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionDuplication;

impl DescriptionDuplication {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Description,
    Summary,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Summary => "Summary",
        }
    }
}

impl Rule for DescriptionDuplication {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Descriptions
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::new(NAME).property(
            "crossCheck",
            "compare descriptions with summaries (default true)",
        )
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(index) = ctx.index else {
            return Vec::new();
        };
        let cross_check = ctx.options.get_bool("crossCheck").unwrap_or(true);

        let mut texts: Vec<(Kind, &TextFact<'_>)> = index
            .descriptions
            .iter()
            .map(|t| (Kind::Description, t))
            .chain(index.summaries.iter().map(|t| (Kind::Summary, t)))
            .collect();
        texts.sort_by_key(|(_, t)| (t.node.line, t.node.column));

        let mut first_seen: HashMap<(Option<Kind>, &str), usize> = HashMap::new();
        let mut violations = Vec::new();
        for (kind, text) in texts {
            let trimmed = text.value.trim();
            if trimmed.is_empty() {
                continue;
            }
            let pool = if cross_check { None } else { Some(kind) };
            match first_seen.get(&(pool, trimmed)) {
                Some(first) => violations.push(ctx.violation(
                    format!(
                        "{} at line `{}` is a duplicate of line `{first}`",
                        kind.label(),
                        text.node.line
                    ),
                    &text.path,
                    text.node,
                )),
                None => {
                    first_seen.insert((pool, trimmed), text.node.line);
                }
            }
        }
        violations
    }
}
