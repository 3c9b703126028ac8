//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::RuleContext;
use crate::index::SpecIndex;
use crate::model::OpenApi;
use crate::node::{Node, ParseError};
use crate::rule::Rule;
use crate::ruleset::{RegisteredRule, RuleDefinition};
use crate::spec_info::SpecInfo;
use crate::types::{LintResult, Violation};
use crate::utils::allowance::Allowances;
use crate::utils::jsonpath::JsonPath;
use crate::validator::{JsonSchemaValidator, SchemaValidator};

use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid YAML or JSON.
    #[error("Parse error in {source_name}: {error}")]
    Parse {
        /// Name of the source that failed to parse.
        source_name: String,
        /// Underlying parse error.
        error: ParseError,
    },

    /// The document is neither Swagger 2.0 nor OpenAPI 3.x.
    #[error("{source_name} is not a Swagger 2.0 or OpenAPI 3.x document")]
    UnknownFormat {
        /// Name of the offending source.
        source_name: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Cooperative cancellation flag checked between rules.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates an unset token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RegisteredRule>,
    config: Option<Config>,
    validator: Option<Box<dyn SchemaValidator>>,
    cancellation: Option<CancellationToken>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule definition bound to its function.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, definition: RuleDefinition, function: R) -> Self {
        self.rules.push(RegisteredRule::new(definition, Box::new(function)));
        self
    }

    /// Adds an already bound rule.
    #[must_use]
    pub fn registered(mut self, rule: RegisteredRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple bound rules.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RegisteredRule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default schema validator.
    #[must_use]
    pub fn validator<V: SchemaValidator + 'static>(mut self, validator: V) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Sets the cancellation token.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Builds the analyzer, applying configuration overrides to every rule.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let config = self.config.unwrap_or_default();
        let preset = config.preset();

        for id in config.rules.keys() {
            if !self.rules.iter().any(|r| r.definition.id() == id) {
                warn!(rule = %id, "unknown rule in configuration, ignoring");
            }
        }

        let rules = self
            .rules
            .into_iter()
            .map(|mut rule| {
                let id = rule.definition.metadata.id.clone();
                let enabled =
                    config.is_rule_enabled(&id, preset.enables(rule.definition.metadata.recommended));
                if let Some(severity) = config.rule_severity(&id) {
                    rule.definition.metadata.severity = severity;
                }
                let overrides = config.rule_options(&id);
                if !overrides.is_empty() {
                    rule.definition.action.options.merge(&overrides);
                    rule.definition.compile_pattern();
                }
                ConfiguredRule { rule, enabled }
            })
            .collect();

        Analyzer {
            rules,
            config,
            validator: self.validator.unwrap_or_else(|| Box::new(JsonSchemaValidator)),
            cancellation: self.cancellation.unwrap_or_default(),
        }
    }
}

struct ConfiguredRule {
    rule: RegisteredRule,
    enabled: bool,
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<ConfiguredRule>,
    config: Config,
    validator: Box<dyn SchemaValidator>,
    cancellation: CancellationToken,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.iter().filter(|r| r.enabled).count()
    }

    /// Every registered rule with its effective enablement.
    pub fn rules(&self) -> impl Iterator<Item = (&RegisteredRule, bool)> {
        self.rules.iter().map(|r| (&r.rule, r.enabled))
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the cancellation token observed by this analyzer.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Reads and analyzes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is not an
    /// OpenAPI document.
    pub fn analyze_file(&self, path: &Path) -> Result<LintResult, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.analyze_source(&path.display().to_string(), &content)
    }

    /// Parses and analyzes a document held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not YAML/JSON or not an OpenAPI
    /// document.
    pub fn analyze_source(&self, name: &str, source: &str) -> Result<LintResult, AnalyzerError> {
        let document = Node::parse(source).map_err(|error| AnalyzerError::Parse {
            source_name: name.to_string(),
            error,
        })?;
        let spec_info = SpecInfo::detect(&document).ok_or_else(|| AnalyzerError::UnknownFormat {
            source_name: name.to_string(),
        })?;
        Ok(self.analyze_document(name, &document, &spec_info))
    }

    /// Evaluates every enabled rule against a parsed document.
    #[must_use]
    pub fn analyze_document(&self, name: &str, document: &Node, spec_info: &SpecInfo) -> LintResult {
        info!("Starting analysis of {name} ({})", spec_info.label());

        let root = document.root();
        let model = OpenApi::new(root, spec_info.clone());
        let index = SpecIndex::build(&model);

        let selected: Vec<&RegisteredRule> = self
            .rules
            .iter()
            .filter(|r| {
                if !r.enabled {
                    debug!("Skipping disabled rule: {}", r.rule.definition.id());
                    return false;
                }
                r.rule.definition.metadata.applies_to(spec_info.format)
            })
            .map(|r| &r.rule)
            .collect();

        let evaluate = |rule: &&RegisteredRule| -> Option<Vec<Violation>> {
            if self.cancellation.is_cancelled() {
                return None;
            }
            let definition = &rule.definition;
            let ctx = RuleContext::new(root, spec_info, &definition.metadata, &definition.action)
                .with_model(&model)
                .with_index(&index)
                .with_validator(&*self.validator);
            let nodes = select_given(root, definition.action.given.as_deref());
            let violations = dedupe(rule.function.evaluate(&nodes, &ctx));
            debug!(rule = %definition.id(), count = violations.len(), "rule evaluated");
            Some(violations)
        };

        let outcomes: Vec<Option<Vec<Violation>>> = if self.config.analyzer.parallel {
            selected.par_iter().map(evaluate).collect()
        } else {
            selected.iter().map(evaluate).collect()
        };

        let mut result = LintResult::new(name);
        result.spec = Some(spec_info.label());
        for outcome in outcomes {
            match outcome {
                Some(violations) => {
                    result.rules_run += 1;
                    result.violations.extend(violations);
                }
                None => result.cancelled = true,
            }
        }
        if result.cancelled {
            warn!("Analysis of {name} cancelled after {} rules", result.rules_run);
        }

        if self.config.analyzer.honor_ignores {
            let allowances = Allowances::collect(root);
            if !allowances.is_empty() {
                let before = result.violations.len();
                result.violations.retain(|v| {
                    let check = allowances.check(&v.rule_id, v.start);
                    if let Some(reason) = check.reason() {
                        debug!(rule = %v.rule_id, %reason, "violation ignored");
                    }
                    !check.is_allowed()
                });
                result.ignored = before - result.violations.len();
            }
        }

        result.violations.sort_by(|a, b| {
            a.rule_id
                .cmp(&b.rule_id)
                .then(a.start.line.cmp(&b.start.line))
                .then(a.start.column.cmp(&b.start.column))
        });

        info!(
            "Analysis complete: {} violations from {} rules in {name}",
            result.violations.len(),
            result.rules_run
        );
        result
    }
}

/// Drops violations with the same path, position and message.
fn dedupe(violations: Vec<Violation>) -> Vec<Violation> {
    let mut seen = HashSet::new();
    violations
        .into_iter()
        .filter(|v| {
            seen.insert(result_hash(v))
        })
        .collect()
}

/// Stable hash of `(path, line, column, message)`. Text fields are
/// length-prefixed so that no two distinct tuples share an encoding.
fn result_hash(v: &Violation) -> String {
    let mut hasher = Sha256::new();
    hasher.update((v.path.len() as u64).to_le_bytes());
    hasher.update(v.path.as_bytes());
    hasher.update((v.start.line as u64).to_le_bytes());
    hasher.update((v.start.column as u64).to_le_bytes());
    hasher.update((v.message.len() as u64).to_le_bytes());
    hasher.update(v.message.as_bytes());
    hex::encode(hasher.finalize())
}

/// Nodes selected by a `given` path: `$` or a dotted/bracketed location.
fn select_given<'a>(root: &'a Node, given: Option<&str>) -> Vec<&'a Node> {
    let Some(given) = given else {
        return vec![root];
    };
    root.at(&JsonPath::parse_selector(given)).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::types::{Category, Position, Range, Severity};

    /// Flags every top-level key.
    struct TopLevelKeys;

    impl Rule for TopLevelKeys {
        fn name(&self) -> &'static str {
            "topLevelKeys"
        }

        fn category(&self) -> Category {
            Category::OpenApi
        }

        fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
            ctx.document
                .pairs()
                .map(|(k, _)| ctx.violation(format!("key {}", k.value), &JsonPath::root().key(k.value.clone()), k))
                .collect()
        }
    }

    /// Emits the same violation twice.
    struct Repeats;

    impl Rule for Repeats {
        fn name(&self) -> &'static str {
            "repeats"
        }

        fn category(&self) -> Category {
            Category::Validation
        }

        fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
            let root = ctx.document;
            vec![
                ctx.violation("twice", &JsonPath::root(), root),
                ctx.violation("twice", &JsonPath::root(), root),
            ]
        }
    }

    const DOC: &str = "openapi: 3.0.3\ninfo:\n  title: t\npaths: {}\n";

    fn definition(id: &str, recommended: bool) -> RuleDefinition {
        RuleDefinition::new(id, "fn", Category::OpenApi, Severity::Warning).recommended(recommended)
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .rule(definition("top-level", true), TopLevelKeys)
            .rule(definition("optional", false), TopLevelKeys)
            .build();
        assert_eq!(analyzer.rule_count(), 1);
    }

    #[test]
    fn sorts_by_rule_then_position() {
        let analyzer = Analyzer::builder()
            .rule(definition("b-rule", true), TopLevelKeys)
            .rule(definition("a-rule", true), TopLevelKeys)
            .build();
        let result = analyzer.analyze_source("doc.yaml", DOC).expect("analyzes");
        let order: Vec<(&str, usize)> = result
            .violations
            .iter()
            .map(|v| (v.rule_id.as_str(), v.start.line))
            .collect();
        assert_eq!(
            order,
            vec![("a-rule", 1), ("a-rule", 2), ("a-rule", 4), ("b-rule", 1), ("b-rule", 2), ("b-rule", 4)]
        );
        assert_eq!(result.rules_run, 2);
        assert_eq!(result.spec.as_deref(), Some("OpenAPI 3.0.3"));
    }

    #[test]
    fn deduplicates_within_a_rule() {
        let analyzer = Analyzer::builder().rule(definition("repeats", true), Repeats).build();
        let result = analyzer.analyze_source("doc.yaml", DOC).expect("analyzes");
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn dedupe_keeps_tuples_that_differ_only_in_field_boundaries() {
        let at = Range::new(Position::new(3, 5), Position::new(3, 9));
        let violation =
            |path: &str, message: &str| Violation::new("r", Category::OpenApi, Severity::Warning, message, path, at);
        let kept = dedupe(vec![
            violation("$.ab", "c"),
            violation("$.a", "bc"),
            violation("$.a", "bc"),
        ]);
        let pairs: Vec<(&str, &str)> = kept.iter().map(|v| (v.path.as_str(), v.message.as_str())).collect();
        assert_eq!(pairs, vec![("$.ab", "c"), ("$.a", "bc")]);
        assert_ne!(result_hash(&kept[0]), result_hash(&kept[1]));
    }

    #[test]
    fn applies_config_overrides() {
        let config = Config::parse(
            r#"
preset = "off"

[rules.top-level]
enabled = true
severity = "error"
"#,
        )
        .expect("valid config");
        let analyzer = Analyzer::builder()
            .rule(definition("top-level", true), TopLevelKeys)
            .rule(definition("repeats", true), Repeats)
            .config(config)
            .build();
        assert_eq!(analyzer.config().preset(), Preset::Off);
        let result = analyzer.analyze_source("doc.yaml", DOC).expect("analyzes");
        assert_eq!(result.rules_run, 1);
        assert!(result.violations.iter().all(|v| v.severity == Severity::Error));
    }

    #[test]
    fn skips_rules_for_other_formats() {
        let analyzer = Analyzer::builder()
            .rule(
                definition("swagger-only", true).formats(&[crate::spec_info::SpecFormat::Swagger2]),
                TopLevelKeys,
            )
            .build();
        let result = analyzer.analyze_source("doc.yaml", DOC).expect("analyzes");
        assert_eq!(result.rules_run, 0);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn honors_inline_ignores() {
        let doc = "openapi: 3.0.3\ninfo:\n  x-lint-ignore: top-level\n  title: t\n";
        let analyzer = Analyzer::builder().rule(definition("top-level", true), TopLevelKeys).build();
        let result = analyzer.analyze_source("doc.yaml", doc).expect("analyzes");
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.ignored, 1);

        let nested = "openapi: 3.0.3\nx-lint-ignore: all\ninfo: {}\n";
        let result = analyzer.analyze_source("doc.yaml", nested).expect("analyzes");
        assert!(result.violations.is_empty());
        assert_eq!(result.ignored, 3);

        let config = Config::parse("[analyzer]\nhonor_ignores = false\n").expect("valid config");
        let analyzer = Analyzer::builder()
            .rule(definition("top-level", true), TopLevelKeys)
            .config(config)
            .build();
        let result = analyzer.analyze_source("doc.yaml", nested).expect("analyzes");
        assert_eq!(result.violations.len(), 3);
    }

    #[test]
    fn cancelled_runs_skip_remaining_rules() {
        let token = CancellationToken::new();
        token.cancel();
        let analyzer = Analyzer::builder()
            .rule(definition("top-level", true), TopLevelKeys)
            .cancellation(token)
            .config(Config::parse("[analyzer]\nparallel = false\n").expect("valid config"))
            .build();
        let result = analyzer.analyze_source("doc.yaml", DOC).expect("analyzes");
        assert!(result.cancelled);
        assert_eq!(result.rules_run, 0);
    }

    #[test]
    fn reports_unknown_documents_and_parse_errors() {
        let analyzer = Analyzer::builder().build();
        assert!(matches!(
            analyzer.analyze_source("a.yaml", "name: thing"),
            Err(AnalyzerError::UnknownFormat { .. })
        ));
        assert!(matches!(
            analyzer.analyze_source("b.yaml", "a: [1, 2"),
            Err(AnalyzerError::Parse { .. })
        ));
    }

    #[test]
    fn selects_given_nodes() {
        let doc = Node::parse(DOC).expect("valid yaml");
        let root = doc.root();
        assert_eq!(select_given(root, None).len(), 1);
        assert_eq!(select_given(root, Some("$.info.title"))[0].value, "t");
        assert_eq!(select_given(root, Some("#/info/title"))[0].value, "t");
        assert!(select_given(root, Some("$.missing")).is_empty());
    }
}
