//! # oaslint-core
//!
//! Core framework for linting OpenAPI documents (Swagger 2.0, OpenAPI 3.0
//! and 3.1).
//!
//! This crate provides the foundational types rules are built on:
//!
//! - [`Node`] trees that keep line and column for every YAML/JSON node
//! - [`OpenApi`] typed views and the [`SpecIndex`] of pre-extracted facts
//! - [`Rule`] trait and the [`RuleContext`] handed to every rule
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use oaslint_core::{Analyzer, RuleDefinition, Category, Severity};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(
//!         RuleDefinition::new("info-title", "infoTitle", Category::Information, Severity::Error),
//!         InfoTitle,
//!     )
//!     .build();
//!
//! let result = analyzer.analyze_file("openapi.yaml".as_ref())?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod ruleset;
mod types;

pub mod index;
pub mod model;
pub mod node;
pub mod spec_info;
pub mod validator;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, CancellationToken};
pub use config::{AnalyzerConfig, Config, ConfigError, Preset, RuleConfig};
pub use context::RuleContext;
pub use index::SpecIndex;
pub use model::OpenApi;
pub use node::{Node, NodeKind, ParseError, ScalarKind};
pub use rule::{Rule, RuleBox, RuleProperty, RuleSchema};
pub use ruleset::{OptionValue, RegisteredRule, RuleAction, RuleDefinition, RuleMetadata, RuleOptions};
pub use spec_info::{NullableEncoding, SpecFormat, SpecInfo};
pub use types::{
    Category, LintResult, Position, Range, Severity, Violation, ViolationDiagnostic,
};
pub use utils::allowance::{AllowCheck, Allowances};
pub use utils::jsonpath::JsonPath;
pub use validator::{Dialect, JsonSchemaValidator, SchemaValidator, ValidationFailure, ValidatorError};
