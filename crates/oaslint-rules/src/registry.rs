//! Lookup of rule functions by name.
//!
//! Definitions refer to functions by their camelCase name. The registry is
//! the single place where those names become rule instances.

use crate::{
    api_servers, camel_case_properties, component_description, description_duplication,
    duplicate_paths, duplicated_enum, examples_missing, examples_schema, form_data_consumes, info,
    migrate_zally_ignore, missing_type, no_ambiguous_paths, no_eval_descriptions, no_request_body,
    no_verbs_in_path, nullable_enum, oas2_discriminator, oas_schema, operation_description,
    operation_id, operation_parameters, operation_tags, parameter_description,
    path_item_references, path_parameters, paths_kebab_case, polymorphic, ref_siblings, responses,
    schema_type_check, security_defined, tags, typed_enum, unnecessary_combinator,
    unused_component,
};
use oaslint_core::RuleBox;

/// Every function name the registry knows, in catalog order.
pub const FUNCTIONS: &[&str] = &[
    camel_case_properties::NAME,
    paths_kebab_case::NAME,
    no_verbs_in_path::NAME,
    path_parameters::NAME,
    duplicate_paths::NAME,
    no_ambiguous_paths::NAME,
    operation_description::NAME,
    component_description::NAME,
    description_duplication::NAME,
    no_eval_descriptions::NAME,
    examples_missing::NAME,
    examples_schema::NAME,
    duplicated_enum::NAME,
    nullable_enum::NAME,
    typed_enum::NAME,
    operation_id::NAME,
    operation_id::UNIQUE_NAME,
    operation_tags::NAME,
    operation_tags::SINGLE_NAME,
    tags::DEFINED_NAME,
    tags::DESCRIPTION_NAME,
    responses::CLIENT_ERROR_NAME,
    responses::SUCCESS_NAME,
    responses::POST_SUCCESS_NAME,
    no_request_body::NAME,
    ref_siblings::NAME,
    ref_siblings::OAS_NAME,
    path_item_references::NAME,
    polymorphic::ONE_OF_NAME,
    polymorphic::ANY_OF_NAME,
    unused_component::NAME,
    unnecessary_combinator::NAME,
    schema_type_check::NAME,
    missing_type::NAME,
    info::CONTACT_NAME,
    info::CONTACT_PROPERTIES_NAME,
    info::DESCRIPTION_NAME,
    info::LICENSE_NAME,
    info::LICENSE_URL_NAME,
    info::LICENSE_SPDX_NAME,
    api_servers::NAME,
    security_defined::NAME,
    security_defined::OAS2_NAME,
    oas2_discriminator::NAME,
    oas_schema::NAME,
    migrate_zally_ignore::NAME,
    operation_parameters::NAME,
    parameter_description::NAME,
    form_data_consumes::NAME,
];

/// Returns a fresh instance of the function called `name`.
#[must_use]
pub fn function(name: &str) -> Option<RuleBox> {
    let rule: RuleBox = match name {
        camel_case_properties::NAME => Box::new(crate::CamelCaseProperties::new()),
        paths_kebab_case::NAME => Box::new(crate::PathsKebabCase::new()),
        no_verbs_in_path::NAME => Box::new(crate::NoVerbsInPath::new()),
        path_parameters::NAME => Box::new(crate::PathParameters::new()),
        duplicate_paths::NAME => Box::new(crate::DuplicatePaths::new()),
        no_ambiguous_paths::NAME => Box::new(crate::NoAmbiguousPaths::new()),
        operation_description::NAME => Box::new(crate::OperationDescription::new()),
        component_description::NAME => Box::new(crate::ComponentDescription::new()),
        description_duplication::NAME => Box::new(crate::DescriptionDuplication::new()),
        no_eval_descriptions::NAME => Box::new(crate::NoEvalDescriptions::new()),
        examples_missing::NAME => Box::new(crate::ExamplesMissing::new()),
        examples_schema::NAME => Box::new(crate::ExamplesSchema::new()),
        duplicated_enum::NAME => Box::new(crate::DuplicatedEnum::new()),
        nullable_enum::NAME => Box::new(crate::NullableEnum::new()),
        typed_enum::NAME => Box::new(crate::TypedEnum::new()),
        operation_id::NAME => Box::new(crate::OperationId::new()),
        operation_id::UNIQUE_NAME => Box::new(crate::UniqueOperationId::new()),
        operation_tags::NAME => Box::new(crate::OperationTags::new()),
        operation_tags::SINGLE_NAME => Box::new(crate::OperationSingleTag::new()),
        tags::DEFINED_NAME => Box::new(crate::TagDefined::new()),
        tags::DESCRIPTION_NAME => Box::new(crate::TagDescription::new()),
        responses::CLIENT_ERROR_NAME => Box::new(crate::Operation4xxResponse::new()),
        responses::SUCCESS_NAME => Box::new(crate::SuccessResponse::new()),
        responses::POST_SUCCESS_NAME => Box::new(crate::PostResponseSuccess::new()),
        no_request_body::NAME => Box::new(crate::NoRequestBody::new()),
        ref_siblings::NAME => Box::new(crate::RefSiblings::new()),
        ref_siblings::OAS_NAME => Box::new(crate::OasRefSiblings::new()),
        path_item_references::NAME => Box::new(crate::PathItemReferences::new()),
        polymorphic::ONE_OF_NAME => Box::new(crate::PolymorphicOneOf::new()),
        polymorphic::ANY_OF_NAME => Box::new(crate::PolymorphicAnyOf::new()),
        unused_component::NAME => Box::new(crate::UnusedComponent::new()),
        unnecessary_combinator::NAME => Box::new(crate::UnnecessaryCombinator::new()),
        schema_type_check::NAME => Box::new(crate::SchemaTypeCheck::new()),
        missing_type::NAME => Box::new(crate::MissingType::new()),
        info::CONTACT_NAME => Box::new(crate::InfoContact::new()),
        info::CONTACT_PROPERTIES_NAME => Box::new(crate::InfoContactProperties::new()),
        info::DESCRIPTION_NAME => Box::new(crate::InfoDescription::new()),
        info::LICENSE_NAME => Box::new(crate::InfoLicense::new()),
        info::LICENSE_URL_NAME => Box::new(crate::InfoLicenseUrl::new()),
        info::LICENSE_SPDX_NAME => Box::new(crate::InfoLicenseUrlSpdx::new()),
        api_servers::NAME => Box::new(crate::ApiServers::new()),
        security_defined::NAME => Box::new(crate::OperationSecurityDefined::new()),
        security_defined::OAS2_NAME => Box::new(crate::Oas2OperationSecurityDefined::new()),
        oas2_discriminator::NAME => Box::new(crate::Oas2Discriminator::new()),
        oas_schema::NAME => Box::new(crate::OasSchema::new()),
        migrate_zally_ignore::NAME => Box::new(crate::MigrateZallyIgnore::new()),
        operation_parameters::NAME => Box::new(crate::OperationParameters::new()),
        parameter_description::NAME => Box::new(crate::ParameterDescription::new()),
        form_data_consumes::NAME => Box::new(crate::FormDataConsumes::new()),
        _ => return None,
    };
    Some(rule)
}

/// Returns one instance of every function.
#[must_use]
pub fn all_functions() -> Vec<RuleBox> {
    FUNCTIONS.iter().filter_map(|name| function(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_function_resolves_to_itself() {
        for name in FUNCTIONS {
            let rule = function(name).unwrap_or_else(|| panic!("{name} is not registered"));
            assert_eq!(rule.name(), *name);
        }
    }

    #[test]
    fn test_function_names_are_unique() {
        let unique: HashSet<_> = FUNCTIONS.iter().collect();
        assert_eq!(unique.len(), FUNCTIONS.len());
    }

    #[test]
    fn test_unknown_function() {
        assert!(function("noSuchRule").is_none());
    }

    #[test]
    fn test_schema_names_match() {
        for rule in all_functions() {
            assert_eq!(rule.schema().name, rule.name());
        }
    }
}
