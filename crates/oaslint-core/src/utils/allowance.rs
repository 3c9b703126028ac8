//! `x-lint-ignore` allowance directives.
//!
//! Any mapping may carry a directive that silences rules for findings
//! anchored inside it (the key that owns the mapping included):
//! ```yaml
//! paths:
//!   /legacy:
//!     get:
//!       x-lint-ignore: operation-4xx-response
//!       responses: {'200': {description: ok}}
//! ```
//! The value may also be a list of rule ids, or a mapping from rule id to
//! a reason. `all` matches every rule.

use crate::node::Node;
use crate::types::Position;

use std::collections::HashMap;

/// Key carrying an allowance directive.
pub const IGNORE_KEY: &str = "x-lint-ignore";

/// Result of checking a finding against the directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// No directive covers the finding.
    Denied,
    /// A directive covers the finding.
    Allowed {
        /// The reason given in mapping form, if any.
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// One parsed directive and the span it covers.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule ids mapped to their optional reason.
    pub rules: HashMap<String, Option<String>>,
    /// First covered position.
    pub start: Position,
    /// Last covered position.
    pub end: Position,
}

impl AllowDirective {
    fn covers(&self, rule_id: &str, position: Position) -> Option<&Option<String>> {
        if position < self.start || position > self.end {
            return None;
        }
        self.rules.get(rule_id).or_else(|| self.rules.get("all"))
    }
}

/// All directives of one document.
#[derive(Debug, Clone, Default)]
pub struct Allowances {
    directives: Vec<AllowDirective>,
}

impl Allowances {
    /// Collects every directive in the document.
    #[must_use]
    pub fn collect(document: &Node) -> Self {
        let mut directives = Vec::new();
        walk(document.root(), None, &mut directives);
        Self { directives }
    }

    /// Returns true if no directive was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// The parsed directives in document order.
    #[must_use]
    pub fn directives(&self) -> &[AllowDirective] {
        &self.directives
    }

    /// Checks whether `rule_id` is silenced at `position`.
    ///
    /// The innermost covering directive supplies the reason.
    #[must_use]
    pub fn check(&self, rule_id: &str, position: Position) -> AllowCheck {
        self.directives
            .iter()
            .filter_map(|d| d.covers(rule_id, position).map(|reason| (d.start, reason)))
            .max_by_key(|(start, _)| *start)
            .map_or(AllowCheck::Denied, |(_, reason)| AllowCheck::Allowed {
                reason: reason.clone(),
            })
    }
}

fn walk(node: &Node, owner: Option<Position>, out: &mut Vec<AllowDirective>) {
    if node.is_mapping() {
        if let Some(value) = node.get(IGNORE_KEY) {
            let rules = parse_rules(value);
            if !rules.is_empty() {
                out.push(AllowDirective {
                    rules,
                    start: owner.unwrap_or_else(|| node.start()),
                    end: node.end(),
                });
            }
        }
        for (key, value) in node.pairs() {
            if key.value != IGNORE_KEY {
                walk(value, Some(key.start()), out);
            }
        }
    } else {
        for item in node.items() {
            walk(item, None, out);
        }
    }
}

fn parse_rules(value: &Node) -> HashMap<String, Option<String>> {
    let mut rules = HashMap::new();
    if let Some(id) = value.as_text() {
        rules.insert(id.to_string(), None);
    }
    for item in value.items() {
        if let Some(id) = item.as_text() {
            rules.insert(id.to_string(), None);
        }
    }
    for (key, reason) in value.pairs() {
        if let Some(id) = key.as_text() {
            rules.insert(id.to_string(), reason.as_text().map(String::from));
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowances(src: &str) -> Allowances {
        Allowances::collect(&Node::parse(src).expect("valid yaml"))
    }

    const DOC: &str = r"openapi: 3.1.0
paths:
  /legacy:
    get:
      x-lint-ignore: operation-4xx-response
      responses:
        '200':
          description: ok
  /modern:
    get:
      responses: {}
";

    #[test]
    fn test_scalar_directive_covers_owner_key() {
        let allow = allowances(DOC);
        assert_eq!(allow.directives().len(), 1);
        // `get:` of /legacy is on line 4
        assert!(allow
            .check("operation-4xx-response", Position::new(4, 5))
            .is_allowed());
        assert!(allow
            .check("operation-4xx-response", Position::new(8, 11))
            .is_allowed());
    }

    #[test]
    fn test_directive_does_not_leak() {
        let allow = allowances(DOC);
        assert!(!allow
            .check("operation-4xx-response", Position::new(10, 5))
            .is_allowed());
        assert!(!allow.check("operation-tags", Position::new(4, 5)).is_allowed());
    }

    #[test]
    fn test_list_and_all() {
        let allow = allowances("info:\n  x-lint-ignore: [info-contact, info-license]\n  title: t\ntags:\n  x-lint-ignore: all\n");
        assert!(allow.check("info-license", Position::new(2, 3)).is_allowed());
        assert!(allow.check("anything", Position::new(5, 3)).is_allowed());
        assert!(!allow.check("anything", Position::new(2, 3)).is_allowed());
    }

    #[test]
    fn test_mapping_form_keeps_reason() {
        let allow = allowances("info:\n  x-lint-ignore:\n    info-contact: internal api\n  title: t\n");
        let check = allow.check("info-contact", Position::new(1, 1));
        assert!(check.is_allowed());
        assert_eq!(check.reason(), Some("internal api"));
    }

    #[test]
    fn test_no_directives() {
        let allow = allowances("openapi: 3.0.0\n");
        assert!(allow.is_empty());
        assert_eq!(allow.check("x", Position::new(1, 1)), AllowCheck::Denied);
    }
}
