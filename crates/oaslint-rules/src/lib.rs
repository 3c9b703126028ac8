//! # oaslint-rules
//!
//! Built-in OpenAPI lint rules for oaslint.
//!
//! Rules are split into *functions* (the [`Rule`] implementations in this
//! crate) and *definitions* (rule id, category, severity, formats and
//! options). Several definitions may share one function, e.g.
//! `no-eval-in-markdown` and `no-script-tags-in-markdown` both run
//! `noEvalDescriptions` with a different `pattern`.
//!
//! ## Available Rules
//!
//! | Family | Functions |
//! |--------|-----------|
//! | Naming | `camelCaseProperties`, `pathsKebabCase`, `noVerbsInPath` |
//! | Paths | `pathParameters`, `duplicatePaths`, `noAmbiguousPaths` |
//! | Descriptions | `operationDescription`, `componentDescription`, `descriptionDuplication`, `noEvalDescriptions`, `parameterDescription` |
//! | Examples | `examplesMissing`, `examplesSchema` |
//! | Enums | `duplicatedEnum`, `nullableEnum`, `typedEnum` |
//! | Operations | `operationId`, `uniqueOperationId`, `operationTags`, `operationSingleTag`, `tagDefined`, `tagDescription`, `operationParameters`, `oas2OperationFormDataConsumeCheck` |
//! | Responses | `operation4xxResponse`, `successResponse`, `postResponseSuccess`, `noRequestBody` |
//! | References | `refSiblings`, `oasRefSiblings`, `pathItemReferences`, `polymorphicOneOf`, `polymorphicAnyOf`, `unusedComponent` |
//! | Schemas | `unnecessaryCombinator`, `schemaTypeCheck`, `missingType`, `oas2Discriminator` |
//! | Info | `infoContact`, `infoContactProperties`, `infoDescription`, `infoLicense`, `infoLicenseURL`, `infoLicenseURLSPDX`, `apiServers` |
//! | Security | `operationSecurityDefined`, `oas2OperationSecurityDefined` |
//! | Structure | `oasSchema`, `migrateZallyIgnore` |
//!
//! ## Usage
//!
//! ```ignore
//! use oaslint_core::Analyzer;
//! use std::path::Path;
//!
//! let analyzer = Analyzer::builder()
//!     .rules(oaslint_rules::builtin_rules())
//!     .build();
//! let result = analyzer.analyze_file(Path::new("openapi.yaml"))?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api_servers;
mod camel_case_properties;
mod component_description;
mod description_duplication;
mod duplicate_paths;
mod duplicated_enum;
mod examples_missing;
mod examples_schema;
mod form_data_consumes;
mod info;
mod meta_schema;
mod migrate_zally_ignore;
mod missing_type;
mod no_ambiguous_paths;
mod no_eval_descriptions;
mod no_request_body;
mod no_verbs_in_path;
mod nullable_enum;
mod oas2_discriminator;
mod oas_schema;
mod operation_description;
mod operation_id;
mod operation_parameters;
mod operation_tags;
mod parameter_description;
mod path_item_references;
mod path_parameters;
mod paths_kebab_case;
mod polymorphic;
mod presets;
mod ref_siblings;
mod registry;
mod responses;
mod schema_type_check;
mod security_defined;
mod tags;
mod typed_enum;
mod unnecessary_combinator;
mod unused_component;

#[cfg(test)]
mod test_support;

pub use api_servers::ApiServers;
pub use camel_case_properties::CamelCaseProperties;
pub use component_description::ComponentDescription;
pub use description_duplication::DescriptionDuplication;
pub use duplicate_paths::DuplicatePaths;
pub use duplicated_enum::DuplicatedEnum;
pub use examples_missing::ExamplesMissing;
pub use examples_schema::ExamplesSchema;
pub use form_data_consumes::FormDataConsumes;
pub use info::{
    InfoContact, InfoContactProperties, InfoDescription, InfoLicense, InfoLicenseUrl,
    InfoLicenseUrlSpdx,
};
pub use migrate_zally_ignore::MigrateZallyIgnore;
pub use missing_type::MissingType;
pub use no_ambiguous_paths::NoAmbiguousPaths;
pub use no_eval_descriptions::NoEvalDescriptions;
pub use no_request_body::NoRequestBody;
pub use no_verbs_in_path::NoVerbsInPath;
pub use nullable_enum::NullableEnum;
pub use oas2_discriminator::Oas2Discriminator;
pub use oas_schema::OasSchema;
pub use operation_description::OperationDescription;
pub use operation_id::{OperationId, UniqueOperationId};
pub use operation_parameters::OperationParameters;
pub use operation_tags::{OperationSingleTag, OperationTags};
pub use parameter_description::ParameterDescription;
pub use path_item_references::PathItemReferences;
pub use path_parameters::PathParameters;
pub use paths_kebab_case::PathsKebabCase;
pub use polymorphic::{PolymorphicAnyOf, PolymorphicOneOf};
pub use presets::{builtin_rules, definitions};
pub use ref_siblings::{OasRefSiblings, RefSiblings};
pub use registry::{all_functions, function, FUNCTIONS};
pub use responses::{Operation4xxResponse, PostResponseSuccess, SuccessResponse};
pub use schema_type_check::SchemaTypeCheck;
pub use security_defined::{Oas2OperationSecurityDefined, OperationSecurityDefined};
pub use tags::{TagDefined, TagDescription};
pub use typed_enum::TypedEnum;
pub use unnecessary_combinator::UnnecessaryCombinator;
pub use unused_component::UnusedComponent;

/// Re-export core types for convenience.
pub use oaslint_core::{Rule, Severity, Violation};
