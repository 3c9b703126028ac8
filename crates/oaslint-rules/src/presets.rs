//! Built-in rule definitions.
//!
//! Each definition binds a rule id to a function from the
//! [`registry`](crate::registry) together with its category, default
//! severity, applicable formats and default options. Whether a definition
//! starts enabled is decided by the configured [`Preset`](oaslint_core::Preset)
//! and its `recommended` flag.

use crate::{
    api_servers, camel_case_properties, component_description, description_duplication,
    duplicate_paths, duplicated_enum, examples_missing, examples_schema, form_data_consumes, info,
    migrate_zally_ignore, missing_type, no_ambiguous_paths, no_eval_descriptions, no_request_body,
    no_verbs_in_path, nullable_enum, oas2_discriminator, oas_schema, operation_description,
    operation_id, operation_parameters, operation_tags, parameter_description,
    path_item_references, path_parameters, paths_kebab_case, polymorphic, ref_siblings, registry,
    responses, schema_type_check, security_defined, tags, typed_enum, unnecessary_combinator,
    unused_component,
};
use oaslint_core::{Category, RegisteredRule, RuleDefinition, Severity, SpecFormat};
use tracing::warn;

const SWAGGER2: &[SpecFormat] = &[SpecFormat::Swagger2];
const OAS31: &[SpecFormat] = &[SpecFormat::Oas31];

fn rule(id: &str, function: &str, category: Category, severity: Severity) -> RuleDefinition {
    RuleDefinition::new(id, function, category, severity)
}

/// Naming and path structure.
fn naming() -> Vec<RuleDefinition> {
    vec![
        rule(
            "camel-case-properties",
            camel_case_properties::NAME,
            Category::Schemas,
            Severity::Warning,
        )
        .description("Schema property names should be camelCase")
        .how_to_fix("Rename the property to camelCase, e.g. `userId` instead of `user_id`")
        .recommended(false),
        rule("paths-kebab-case", paths_kebab_case::NAME, Category::Operations, Severity::Warning)
            .description("Path segments should be kebab-case")
            .how_to_fix("Use lowercase words separated by hyphens in static path segments"),
        rule("no-http-verbs-in-path", no_verbs_in_path::NAME, Category::Operations, Severity::Warning)
            .description("Paths should not contain HTTP verbs")
            .how_to_fix("Express the action through the HTTP method instead of the path")
            .recommended(false),
        rule("path-params", path_parameters::NAME, Category::Operations, Severity::Error)
            .description("Path parameters must be defined and used consistently")
            .how_to_fix(
                "Declare every `{variable}` of the template as a required `in: path` parameter",
            ),
        rule("duplicate-paths", duplicate_paths::NAME, Category::Operations, Severity::Error)
            .description("Paths must not be declared more than once")
            .how_to_fix("Merge the operations of the duplicated path into a single path item"),
        rule("no-ambiguous-paths", no_ambiguous_paths::NAME, Category::Operations, Severity::Error)
            .description("Paths must not resolve ambiguously")
            .how_to_fix("Make sure templated segments cannot match a sibling's literal segment"),
    ]
}

/// Descriptions and summaries.
fn descriptions() -> Vec<RuleDefinition> {
    vec![
        rule(
            "operation-description",
            operation_description::NAME,
            Category::Descriptions,
            Severity::Warning,
        )
        .description("Operations must have a description")
        .how_to_fix("Add a `description` explaining what the operation does"),
        rule(
            "component-description",
            component_description::NAME,
            Category::Descriptions,
            Severity::Warning,
        )
        .description("Components must have a description")
        .how_to_fix("Add a `description` to the component"),
        rule(
            "description-duplication",
            description_duplication::NAME,
            Category::Descriptions,
            Severity::Info,
        )
        .description("Descriptions should not be copied between objects")
        .how_to_fix("Write a description specific to each object, or reference a shared component"),
        rule("no-eval-in-markdown", no_eval_descriptions::NAME, Category::Security, Severity::Error)
            .description("Markdown descriptions must not contain `eval(`")
            .how_to_fix("Remove script content from the description")
            .option("pattern", r"eval\("),
        rule(
            "no-script-tags-in-markdown",
            no_eval_descriptions::NAME,
            Category::Security,
            Severity::Error,
        )
        .description("Markdown descriptions must not contain `<script>` tags")
        .how_to_fix("Remove script tags from the description")
        .option("pattern", "<script"),
    ]
}

/// Examples, enums and schema shape.
fn schemas() -> Vec<RuleDefinition> {
    vec![
        rule("oas3-missing-example", examples_missing::NAME, Category::Schemas, Severity::Warning)
            .description("Media types, parameters, headers and schemas should carry examples")
            .how_to_fix("Add an `example` or `examples` entry")
            .formats(&SpecFormat::OAS3),
        rule(
            "oas3-valid-schema-example",
            examples_schema::NAME,
            Category::Validation,
            Severity::Warning,
        )
        .description("Examples must validate against their schema")
        .how_to_fix("Fix the example so that it matches the schema, or fix the schema")
        .formats(&SpecFormat::OAS3),
        rule("duplicated-entry-in-enum", duplicated_enum::NAME, Category::Schemas, Severity::Warning)
            .description("Enum values must be unique")
            .how_to_fix("Remove the duplicated values from `enum`"),
        rule(
            "nullable-enum-contains-null",
            nullable_enum::NAME,
            Category::Schemas,
            Severity::Warning,
        )
        .description("Nullable enums must list `null` as a value")
        .how_to_fix("Add `null` to the `enum` values of the nullable schema"),
        rule("typed-enum", typed_enum::NAME, Category::Schemas, Severity::Warning)
            .description("Enum values must match the schema type")
            .how_to_fix("Remove values that do not match `type`, or change the type"),
        rule("unnecessary-combinator", unnecessary_combinator::NAME, Category::Schemas, Severity::Warning)
            .description("Combinators with a single entry are unnecessary")
            .how_to_fix("Replace the combinator with its only entry"),
        rule("oas-schema-check", schema_type_check::NAME, Category::Schemas, Severity::Error)
            .description("Schema keywords must be consistent with their type")
            .how_to_fix("Fix the reported keyword so that the schema is well formed"),
        rule("oas-missing-type", missing_type::NAME, Category::Schemas, Severity::Warning)
            .description("Schemas should declare a `type`")
            .how_to_fix("Add a `type` to the schema"),
        rule("oas2-discriminator", oas2_discriminator::NAME, Category::Schemas, Severity::Error)
            .description("Discriminators must be required string properties")
            .how_to_fix("List the discriminator property in `required` and give it `type: string`")
            .formats(SWAGGER2),
    ]
}

/// Operation ids and tags.
fn operations() -> Vec<RuleDefinition> {
    vec![
        rule("operation-operationId", operation_id::NAME, Category::Operations, Severity::Warning)
            .description("Operations must have an `operationId`")
            .how_to_fix("Add a unique `operationId` to the operation"),
        rule(
            "operation-operationId-unique",
            operation_id::UNIQUE_NAME,
            Category::Operations,
            Severity::Error,
        )
        .description("Operation ids must be unique")
        .how_to_fix("Rename one of the operations sharing the `operationId`"),
        rule("operation-singular-tag", operation_tags::SINGLE_NAME, Category::Tags, Severity::Warning)
            .description("Operations should have at most one tag")
            .how_to_fix("Keep a single tag on the operation")
            .recommended(false),
        rule("operation-tags", operation_tags::NAME, Category::Tags, Severity::Warning)
            .description("Operations must have at least one tag")
            .how_to_fix("Add a `tags` entry to the operation"),
        rule("operation-tag-defined", tags::DEFINED_NAME, Category::Tags, Severity::Warning)
            .description("Operation tags must be declared in the global `tags`")
            .how_to_fix("Declare the tag in the root `tags` list"),
        rule("tag-description", tags::DESCRIPTION_NAME, Category::Tags, Severity::Warning)
            .description("Global tags should have a description")
            .how_to_fix("Add a `description` to the tag")
            .recommended(false),
        rule(
            "operation-parameters",
            operation_parameters::NAME,
            Category::Operations,
            Severity::Error,
        )
        .description("Parameter lists must be unique and well formed")
        .how_to_fix("Give every parameter an `in` value and remove duplicates"),
        rule(
            "oas3-parameter-description",
            parameter_description::NAME,
            Category::Descriptions,
            Severity::Warning,
        )
        .description("Parameters should have a description")
        .how_to_fix("Add a `description` to the parameter")
        .formats(&SpecFormat::OAS3)
        .recommended(false),
        rule(
            "oas2-parameter-description",
            parameter_description::NAME,
            Category::Descriptions,
            Severity::Warning,
        )
        .description("Parameters should have a description")
        .how_to_fix("Add a `description` to the parameter")
        .formats(SWAGGER2)
        .recommended(false),
        rule(
            "oas2-operation-formData-consume-check",
            form_data_consumes::NAME,
            Category::Operations,
            Severity::Warning,
        )
        .description("Operations with `formData` parameters must consume form media types")
        .how_to_fix("Add `application/x-www-form-urlencoded` or `multipart/form-data` to `consumes`")
        .formats(SWAGGER2),
    ]
}

/// Responses and request bodies.
fn responses() -> Vec<RuleDefinition> {
    vec![
        rule(
            "operation-4xx-response",
            responses::CLIENT_ERROR_NAME,
            Category::Operations,
            Severity::Warning,
        )
        .description("Operations must define at least one `4xx` response")
        .how_to_fix("Document the client errors the operation can return"),
        rule(
            "operation-success-response",
            responses::SUCCESS_NAME,
            Category::Operations,
            Severity::Warning,
        )
        .description("Operations must define at least one `2xx` or `3xx` response")
        .how_to_fix("Document the successful response of the operation"),
        rule(
            "post-response-success",
            responses::POST_SUCCESS_NAME,
            Category::Operations,
            Severity::Warning,
        )
        .description("`POST` operations must define a success response")
        .how_to_fix("Add one of the expected success responses to the operation")
        .option_list("properties", ["200", "201", "202"])
        .recommended(false),
        rule("no-request-body", no_request_body::NAME, Category::Operations, Severity::Warning)
            .description("`GET` and `DELETE` operations must not accept a request body")
            .how_to_fix("Move the payload into query parameters or use another method")
            .formats(&SpecFormat::OAS3),
    ]
}

/// References and polymorphism.
fn references() -> Vec<RuleDefinition> {
    vec![
        rule("no-$ref-siblings", ref_siblings::NAME, Category::Schemas, Severity::Error)
            .description("`$ref` values cannot be placed next to other properties")
            .how_to_fix("Remove the sibling properties or wrap the reference in `allOf`")
            .formats(&[SpecFormat::Swagger2, SpecFormat::Oas30]),
        rule("oas3-no-$ref-siblings", ref_siblings::OAS_NAME, Category::Schemas, Severity::Error)
            .description("`$ref` values may only have `description` and `summary` siblings")
            .how_to_fix("Remove the sibling properties other than `description` and `summary`")
            .formats(&SpecFormat::OAS3)
            .recommended(false),
        rule("path-item-refs", path_item_references::NAME, Category::Operations, Severity::Error)
            .description("Only path items may be referenced, not operations")
            .how_to_fix("Reference the whole path item instead of the operation")
            .formats(&SpecFormat::OAS3),
        rule("polymorphic-oneOf", polymorphic::ONE_OF_NAME, Category::Schemas, Severity::Warning)
            .description("`oneOf` makes schemas harder to consume")
            .how_to_fix("Prefer a single schema or a discriminated structure")
            .recommended(false),
        rule("polymorphic-anyOf", polymorphic::ANY_OF_NAME, Category::Schemas, Severity::Warning)
            .description("`anyOf` makes schemas harder to consume")
            .how_to_fix("Prefer a single schema or a discriminated structure")
            .recommended(false),
        rule("oas3-unused-component", unused_component::NAME, Category::Schemas, Severity::Warning)
            .description("Components should be referenced somewhere")
            .how_to_fix("Reference the component or remove it")
            .formats(&SpecFormat::OAS3),
        rule("oas2-unused-definition", unused_component::NAME, Category::Schemas, Severity::Warning)
            .description("Definitions should be referenced somewhere")
            .how_to_fix("Reference the definition or remove it")
            .formats(SWAGGER2),
    ]
}

/// Info block, servers and security.
fn information() -> Vec<RuleDefinition> {
    vec![
        rule("info-contact", info::CONTACT_NAME, Category::Information, Severity::Warning)
            .description("The info section must contain contact details")
            .how_to_fix("Add an `info.contact` object"),
        rule(
            "contact-properties",
            info::CONTACT_PROPERTIES_NAME,
            Category::Information,
            Severity::Info,
        )
        .description("Contact details should include a name, a URL and an email")
        .how_to_fix("Fill in `name`, `url` and `email` of `info.contact`")
        .recommended(false),
        rule("info-description", info::DESCRIPTION_NAME, Category::Information, Severity::Warning)
            .description("The info section must contain a description")
            .how_to_fix("Add an `info.description` explaining the API"),
        rule("info-license", info::LICENSE_NAME, Category::Information, Severity::Info)
            .description("The info section should contain a license")
            .how_to_fix("Add an `info.license` object with a `name`"),
        rule("license-url", info::LICENSE_URL_NAME, Category::Information, Severity::Info)
            .description("The license should contain a URL or an SPDX identifier")
            .how_to_fix("Add a `url` or an `identifier` to `info.license`"),
        rule("info-license-spdx", info::LICENSE_SPDX_NAME, Category::Information, Severity::Error)
            .description("The license must not contain both a URL and an SPDX identifier")
            .how_to_fix("Keep either `url` or `identifier`")
            .formats(OAS31),
        rule("oas3-api-servers", api_servers::NAME, Category::OpenApi, Severity::Warning)
            .description("The specification must define valid servers")
            .how_to_fix("Add `servers` with absolute or relative URLs without a trailing slash")
            .formats(&SpecFormat::OAS3),
        rule(
            "oas3-operation-security-defined",
            security_defined::NAME,
            Category::Security,
            Severity::Error,
        )
        .description("Security requirements must reference defined security schemes")
        .how_to_fix("Declare the scheme under `components.securitySchemes`")
        .formats(&SpecFormat::OAS3)
        .option("schemesPath", "$.components.securitySchemes"),
        rule(
            "oas2-operation-security-defined",
            security_defined::OAS2_NAME,
            Category::Security,
            Severity::Error,
        )
        .description("Security requirements must reference defined security definitions")
        .how_to_fix("Declare the scheme under `securityDefinitions`")
        .formats(SWAGGER2),
    ]
}

/// Whole-document structure.
fn structure() -> Vec<RuleDefinition> {
    vec![
        rule("oas3-schema", oas_schema::NAME, Category::Validation, Severity::Error)
            .description("The document must be a valid OpenAPI 3 description")
            .how_to_fix("Fix the structure reported by the meta-schema")
            .formats(&SpecFormat::OAS3),
        rule("oas2-schema", oas_schema::NAME, Category::Validation, Severity::Error)
            .description("The document must be a valid Swagger 2.0 description")
            .how_to_fix("Fix the structure reported by the meta-schema")
            .formats(SWAGGER2),
        rule("migrate-zally-ignore", migrate_zally_ignore::NAME, Category::OpenApi, Severity::Warning)
            .description("`x-zally-ignore` is not supported")
            .how_to_fix("Rename `x-zally-ignore` to `x-lint-ignore` and use rule ids")
            .recommended(false),
    ]
}

/// Returns every built-in definition, grouped by family.
#[must_use]
pub fn definitions() -> Vec<RuleDefinition> {
    let mut all = naming();
    all.extend(descriptions());
    all.extend(schemas());
    all.extend(operations());
    all.extend(responses());
    all.extend(references());
    all.extend(information());
    all.extend(structure());
    all
}

/// Returns every built-in definition bound to its function.
///
/// A definition naming an unknown function is logged and skipped.
#[must_use]
pub fn builtin_rules() -> Vec<RegisteredRule> {
    definitions()
        .into_iter()
        .filter_map(|definition| match registry::function(&definition.action.function) {
            Some(function) => Some(RegisteredRule::new(definition, function)),
            None => {
                warn!(
                    rule = %definition.metadata.id,
                    function = %definition.action.function,
                    "rule definition names an unknown function"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let defs = definitions();
        let ids: HashSet<_> = defs.iter().map(RuleDefinition::id).collect();
        assert_eq!(ids.len(), defs.len());
    }

    #[test]
    fn test_every_definition_is_bound() {
        assert_eq!(builtin_rules().len(), definitions().len());
    }

    #[test]
    fn test_every_function_has_a_definition() {
        let defs = definitions();
        for name in registry::FUNCTIONS {
            assert!(
                defs.iter().any(|d| d.action.function == *name),
                "{name} has no definition"
            );
        }
    }

    #[test]
    fn test_definitions_carry_no_message_template() {
        for def in definitions() {
            assert!(def.metadata.message.is_none(), "{}", def.id());
            assert!(!def.metadata.description.is_empty(), "{}", def.id());
            assert!(def.metadata.how_to_fix.is_some(), "{}", def.id());
        }
    }

    #[test]
    fn test_opt_in_rules() {
        let opt_in: Vec<String> = definitions()
            .iter()
            .filter(|d| !d.metadata.recommended)
            .map(|d| d.id().to_string())
            .collect();
        insta::assert_snapshot!(opt_in.join("\n"), @r"
        camel-case-properties
        no-http-verbs-in-path
        operation-singular-tag
        tag-description
        oas3-parameter-description
        oas2-parameter-description
        post-response-success
        oas3-no-$ref-siblings
        polymorphic-oneOf
        polymorphic-anyOf
        contact-properties
        migrate-zally-ignore
        ");
    }

    #[test]
    fn test_pattern_options_compile() {
        let rules = builtin_rules();
        let eval = rules
            .iter()
            .find(|r| r.definition.id() == "no-eval-in-markdown")
            .map(|r| &r.definition.metadata);
        assert!(eval.and_then(|m| m.pattern.as_ref()).is_some_and(|p| p.is_match("eval(x)")));
    }

    #[test]
    fn test_format_scoping() {
        let defs = definitions();
        let formats = |id: &str| {
            defs.iter()
                .find(|d| d.id() == id)
                .map(|d| d.metadata.formats.clone())
                .unwrap_or_default()
        };
        assert_eq!(formats("oas2-schema"), vec![SpecFormat::Swagger2]);
        assert_eq!(formats("oas3-schema"), SpecFormat::OAS3.to_vec());
        assert_eq!(formats("info-license-spdx"), vec![SpecFormat::Oas31]);
        assert_eq!(formats("duplicate-paths").len(), 3);
    }
}
