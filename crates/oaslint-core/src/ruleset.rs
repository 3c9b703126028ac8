//! Rule definitions: metadata, actions and options.

use crate::rule::RuleBox;
use crate::spec_info::SpecFormat;
use crate::types::{Category, Severity};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// A single option value: a string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Scalar option.
    Text(String),
    /// List option.
    List(Vec<String>),
}

/// Free-form rule options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleOptions(BTreeMap<String, OptionValue>);

impl RuleOptions {
    /// Creates an empty option map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a scalar option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), OptionValue::Text(value.into()));
    }

    /// Sets a list option.
    pub fn set_list<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            key.into(),
            OptionValue::List(values.into_iter().map(Into::into).collect()),
        );
    }

    /// Returns the raw value of an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Returns a scalar option.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            OptionValue::Text(value) => Some(value),
            OptionValue::List(_) => None,
        }
    }

    /// Returns a list option; a scalar is read as a one-element list.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<Vec<&str>> {
        match self.0.get(key)? {
            OptionValue::Text(value) => Some(vec![value.as_str()]),
            OptionValue::List(values) => Some(values.iter().map(String::as_str).collect()),
        }
    }

    /// Returns an unsigned integer option; malformed values read as absent.
    #[must_use]
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get_str(key)?.trim().parse().ok()
    }

    /// Returns a boolean option; malformed values read as absent.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get_str(key)?.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Overlays `other` on top of these options.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Iterates options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts a TOML table into options.
    ///
    /// Scalars become text, arrays of scalars become lists, and nested
    /// tables are dropped.
    #[must_use]
    pub fn from_toml(table: &HashMap<String, toml::Value>) -> Self {
        let mut options = Self::new();
        for (key, value) in table {
            match value {
                toml::Value::Array(items) => {
                    options.set_list(key.clone(), items.iter().filter_map(toml_scalar));
                }
                other => {
                    if let Some(text) = toml_scalar(other) {
                        options.set(key.clone(), text);
                    }
                }
            }
        }
        options
    }
}

fn toml_scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

/// Immutable metadata of a rule definition.
#[derive(Debug, Clone)]
pub struct RuleMetadata {
    /// Rule id (e.g., `operation-tags`).
    pub id: String,
    /// One-line description.
    pub description: String,
    /// Category.
    pub category: Category,
    /// Severity of emitted violations.
    pub severity: Severity,
    /// Formats the rule applies to.
    pub formats: Vec<SpecFormat>,
    /// Message template; `{{error}}` is replaced by the function's message.
    pub message: Option<String>,
    /// Remediation hint.
    pub how_to_fix: Option<String>,
    /// Pattern compiled from the `pattern` option.
    pub pattern: Option<Regex>,
    /// Whether the rule is part of the recommended preset.
    pub recommended: bool,
}

impl RuleMetadata {
    /// Returns true if the rule applies to `format`.
    #[must_use]
    pub fn applies_to(&self, format: SpecFormat) -> bool {
        self.formats.contains(&format)
    }
}

/// Per-invocation tuning of a rule.
#[derive(Debug, Clone, Default)]
pub struct RuleAction {
    /// JSON-Path selecting the nodes passed to the function.
    pub given: Option<String>,
    /// JSON-Path narrowing the checked field.
    pub field: Option<String>,
    /// Function name.
    pub function: String,
    /// Options decoded for the function.
    pub options: RuleOptions,
}

/// A rule definition: metadata plus the action binding it to a function.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    /// Metadata.
    pub metadata: RuleMetadata,
    /// Action.
    pub action: RuleAction,
}

impl RuleDefinition {
    /// Creates a definition that applies to every format and is recommended.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        function: impl Into<String>,
        category: Category,
        severity: Severity,
    ) -> Self {
        Self {
            metadata: RuleMetadata {
                id: id.into(),
                description: String::new(),
                category,
                severity,
                formats: vec![SpecFormat::Swagger2, SpecFormat::Oas30, SpecFormat::Oas31],
                message: None,
                how_to_fix: None,
                pattern: None,
                recommended: true,
            },
            action: RuleAction {
                function: function.into(),
                ..RuleAction::default()
            },
        }
    }

    /// Returns the rule id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = description.into();
        self
    }

    /// Restricts the formats.
    #[must_use]
    pub fn formats(mut self, formats: &[SpecFormat]) -> Self {
        self.metadata.formats = formats.to_vec();
        self
    }

    /// Sets the message template.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.metadata.message = Some(message.into());
        self
    }

    /// Sets the remediation hint.
    #[must_use]
    pub fn how_to_fix(mut self, hint: impl Into<String>) -> Self {
        self.metadata.how_to_fix = Some(hint.into());
        self
    }

    /// Marks whether the rule belongs to the recommended preset.
    #[must_use]
    pub fn recommended(mut self, recommended: bool) -> Self {
        self.metadata.recommended = recommended;
        self
    }

    /// Sets a scalar option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.action.options.set(key, value);
        self
    }

    /// Sets a list option.
    #[must_use]
    pub fn option_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action.options.set_list(key, values);
        self
    }

    /// Sets the `given` selector.
    #[must_use]
    pub fn given(mut self, given: impl Into<String>) -> Self {
        self.action.given = Some(given.into());
        self
    }

    /// Recompiles [`RuleMetadata::pattern`] from the `pattern` option.
    ///
    /// An invalid pattern is logged and leaves the rule without one.
    pub fn compile_pattern(&mut self) {
        self.metadata.pattern = match self.action.options.get_str("pattern") {
            Some(pattern) => match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    warn!(rule = %self.metadata.id, error = %err, "invalid pattern option");
                    None
                }
            },
            None => None,
        };
    }
}

/// A definition bound to the function that implements it.
pub struct RegisteredRule {
    /// The definition.
    pub definition: RuleDefinition,
    /// The function.
    pub function: RuleBox,
}

impl RegisteredRule {
    /// Binds a definition to a function and compiles its pattern.
    #[must_use]
    pub fn new(mut definition: RuleDefinition, function: RuleBox) -> Self {
        definition.compile_pattern();
        Self {
            definition,
            function,
        }
    }
}

impl std::fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredRule")
            .field("id", &self.definition.metadata.id)
            .field("function", &self.function.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_scalar_and_list_options() {
        let mut options = RuleOptions::new();
        options.set("minWords", "3");
        options.set_list("properties", ["200", "201"]);
        assert_eq!(options.get_usize("minWords"), Some(3));
        assert_eq!(options.get_list("properties"), Some(vec!["200", "201"]));
        assert_eq!(options.get_list("minWords"), Some(vec!["3"]));
        assert_eq!(options.get_str("properties"), None);
    }

    #[test]
    fn malformed_options_read_as_absent() {
        let mut options = RuleOptions::new();
        options.set("minWords", "many");
        options.set("crossCheck", "perhaps");
        assert_eq!(options.get_usize("minWords"), None);
        assert_eq!(options.get_bool("crossCheck"), None);
        assert_eq!(options.get_usize("missing"), None);
    }

    #[test]
    fn converts_toml_values() {
        let table: HashMap<String, toml::Value> = toml::from_str(
            r#"
minWords = 3
crossCheck = false
properties = ["200", 201]
nested = { a = 1 }
"#,
        )
        .expect("valid toml");
        let options = RuleOptions::from_toml(&table);
        assert_eq!(options.get_usize("minWords"), Some(3));
        assert_eq!(options.get_bool("crossCheck"), Some(false));
        assert_eq!(options.get_list("properties"), Some(vec!["200", "201"]));
        assert!(options.get("nested").is_none());
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut base = RuleOptions::new();
        base.set("minWords", "1");
        base.set("crossCheck", "true");
        let mut overrides = RuleOptions::new();
        overrides.set("minWords", "5");
        base.merge(&overrides);
        assert_eq!(base.get_usize("minWords"), Some(5));
        assert_eq!(base.get_bool("crossCheck"), Some(true));
    }

    #[test]
    fn compiles_pattern_option() {
        let mut definition =
            RuleDefinition::new("no-eval", "noEvalDescriptions", Category::Security, Severity::Error)
                .option("pattern", r"eval\(");
        definition.compile_pattern();
        let pattern = definition.metadata.pattern.as_ref().expect("compiled");
        assert!(pattern.is_match("call eval(x)"));

        let mut broken = definition.clone().option("pattern", "(");
        broken.compile_pattern();
        assert!(broken.metadata.pattern.is_none());
    }

    #[test]
    fn definition_defaults_cover_every_format() {
        let definition =
            RuleDefinition::new("info-contact", "infoContact", Category::Information, Severity::Warning);
        assert!(definition.metadata.applies_to(SpecFormat::Swagger2));
        assert!(definition.metadata.applies_to(SpecFormat::Oas31));
        let restricted = definition.formats(&SpecFormat::OAS3);
        assert!(!restricted.metadata.applies_to(SpecFormat::Swagger2));
    }
}
