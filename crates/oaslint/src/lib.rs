//! # oaslint
//!
//! Linter for OpenAPI 3.x and Swagger 2.0 documents.
//!
//! This is the main facade crate that re-exports the core engine and the
//! built-in rules.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! oaslint = "0.4"
//! ```
//!
//! ```rust,ignore
//! // tests/openapi.rs
//! oaslint::check!(openapi_is_clean, "api/openapi.yaml");
//! ```
//!
//! This lints the document as part of `cargo test`. Configure via
//! `oaslint.toml` at the workspace root.
//!
//! ## Inline Ignores
//!
//! Any mapping may silence rules for findings inside it:
//!
//! ```yaml
//! paths:
//!   /legacy:
//!     get:
//!       x-lint-ignore: [operation-4xx-response, operation-tags]
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use oaslint::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .rules(oaslint::rules::builtin_rules())
//!     .build();
//!
//! let result = analyzer.analyze_source("openapi.yaml", &text)?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use oaslint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use oaslint_rules::*;
}

mod runner;

pub use runner::{check, Check};

/// Generates a `#[test]` that lints a document with the project
/// configuration.
///
/// ```rust,ignore
/// oaslint::check!(petstore_is_clean, "api/petstore.yaml");
/// ```
#[macro_export]
macro_rules! check {
    ($name:ident, $document:expr $(,)?) => {
        #[test]
        fn $name() {
            $crate::check($document);
        }
    };
}
