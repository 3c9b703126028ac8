//! Rules on the `info` object: contact, description and license.

use oaslint_core::model::Entry;
use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, Violation};

/// Function name of the contact rule.
pub const CONTACT_NAME: &str = "infoContact";

/// Function name of the contact properties rule.
pub const CONTACT_PROPERTIES_NAME: &str = "infoContactProperties";

/// Function name of the description rule.
pub const DESCRIPTION_NAME: &str = "infoDescription";

/// Function name of the license rule.
pub const LICENSE_NAME: &str = "infoLicense";

/// Function name of the license URL rule.
pub const LICENSE_URL_NAME: &str = "infoLicenseURL";

/// Function name of the license URL/SPDX exclusivity rule.
pub const LICENSE_SPDX_NAME: &str = "infoLicenseURLSPDX";

const CONTACT_FIELDS: [&str; 3] = ["name", "url", "email"];

fn info<'a>(ctx: &RuleContext<'a>) -> Option<Entry<'a>> {
    ctx.model.and_then(|model| model.info()).filter(|info| info.value.is_mapping())
}

fn info_path() -> JsonPath {
    JsonPath::root().key("info")
}

macro_rules! info_rule {
    ($(#[$doc:meta])* $ty:ident, $name:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl $ty {
            /// Creates the rule.
            #[must_use]
            pub fn new() -> Self {
                Self
            }
        }

        impl Rule for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn category(&self) -> Category {
                Category::Information
            }

            fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
                match info(ctx) {
                    Some(info) => self.check(ctx, info),
                    None => Vec::new(),
                }
            }
        }
    };
}

info_rule!(
    /// Requires `info.contact`.
    InfoContact,
    CONTACT_NAME
);

info_rule!(
    /// Requires `name`, `url` and `email` on `info.contact`.
    InfoContactProperties,
    CONTACT_PROPERTIES_NAME
);

info_rule!(
    /// Requires a non-empty `info.description`.
    InfoDescription,
    DESCRIPTION_NAME
);

info_rule!(
    /// Requires `info.license` with a `name`.
    InfoLicense,
    LICENSE_NAME
);

info_rule!(
    /// Requires a license `url` or SPDX `identifier`.
    InfoLicenseUrl,
    LICENSE_URL_NAME
);

info_rule!(
    /// Forbids a license carrying both `url` and `identifier`.
    InfoLicenseUrlSpdx,
    LICENSE_SPDX_NAME
);

impl InfoContact {
    fn check(self, ctx: &RuleContext<'_>, info: Entry<'_>) -> Vec<Violation> {
        if info.value.has("contact") {
            return Vec::new();
        }
        vec![ctx.violation("info section is missing contact details", &info_path(), info.key)]
    }
}

impl InfoContactProperties {
    fn check(self, ctx: &RuleContext<'_>, info: Entry<'_>) -> Vec<Violation> {
        let Some((key, contact)) = info.value.entry("contact") else {
            return Vec::new();
        };
        let path = info_path().key("contact");
        CONTACT_FIELDS
            .iter()
            .filter(|field| contact.get(field).and_then(Node::as_text).is_none())
            .map(|field| ctx.violation(format!("contact details must include `{field}`"), &path, key))
            .collect()
    }
}

impl InfoDescription {
    fn check(self, ctx: &RuleContext<'_>, info: Entry<'_>) -> Vec<Violation> {
        match info.value.entry("description") {
            Some((_, value)) if value.as_text().is_some() => Vec::new(),
            Some((key, _)) => vec![ctx.violation(
                "info section has an empty description",
                &info_path().key("description"),
                key,
            )],
            None => vec![ctx.violation("info section is missing a description", &info_path(), info.key)],
        }
    }
}

impl InfoLicense {
    fn check(self, ctx: &RuleContext<'_>, info: Entry<'_>) -> Vec<Violation> {
        match info.value.entry("license") {
            None => vec![ctx.violation("info section should contain a license", &info_path(), info.key)],
            Some((key, license)) if license.get("name").and_then(Node::as_text).is_none() => {
                vec![ctx.violation("license must contain a `name`", &info_path().key("license"), key)]
            }
            Some(_) => Vec::new(),
        }
    }
}

impl InfoLicenseUrl {
    fn check(self, ctx: &RuleContext<'_>, info: Entry<'_>) -> Vec<Violation> {
        let Some((key, license)) = info.value.entry("license") else {
            return Vec::new();
        };
        if license.has("url") || license.has("identifier") {
            return Vec::new();
        }
        vec![ctx.violation(
            "license should contain a `url` or an SPDX `identifier`",
            &info_path().key("license"),
            key,
        )]
    }
}

impl InfoLicenseUrlSpdx {
    fn check(self, ctx: &RuleContext<'_>, info: Entry<'_>) -> Vec<Violation> {
        let Some(license) = info.value.get("license") else {
            return Vec::new();
        };
        let (Some((url_key, _)), Some((_, identifier))) = (license.entry("url"), license.entry("identifier")) else {
            return Vec::new();
        };
        vec![ctx.violation_between(
            "license must not contain both a `url` and an `identifier`, they are mutually exclusive",
            &info_path().key("license"),
            url_key,
            identifier,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    const BARE: &str = "openapi: 3.1.0\ninfo:\n  title: t\npaths: {}\n";

    const PARTIAL: &str = r"openapi: 3.1.0
info:
  title: t
  description: ' '
  contact: {name: API team}
  license: {url: 'https://example.com/license'}
paths: {}
";

    const BOTH: &str = r"openapi: 3.1.0
info:
  title: t
  license:
    name: MIT
    url: 'https://opensource.org/licenses/MIT'
    identifier: MIT
paths: {}
";

    #[test]
    fn test_contact() {
        assert_eq!(messages(&lint(&InfoContact::new(), BARE)), vec!["info section is missing contact details"]);
        assert!(lint(&InfoContact::new(), PARTIAL).is_empty());
    }

    #[test]
    fn test_contact_properties() {
        let violations = lint(&InfoContactProperties::new(), PARTIAL);
        assert_eq!(
            messages(&violations),
            vec!["contact details must include `url`", "contact details must include `email`"]
        );
        assert_eq!(violations[0].path, "$.info.contact");
        assert!(lint(&InfoContactProperties::new(), BARE).is_empty());
    }

    #[test]
    fn test_description() {
        assert_eq!(messages(&lint(&InfoDescription::new(), BARE)), vec!["info section is missing a description"]);
        assert_eq!(messages(&lint(&InfoDescription::new(), PARTIAL)), vec!["info section has an empty description"]);
    }

    #[test]
    fn test_license() {
        assert_eq!(messages(&lint(&InfoLicense::new(), BARE)), vec!["info section should contain a license"]);
        assert_eq!(messages(&lint(&InfoLicense::new(), PARTIAL)), vec!["license must contain a `name`"]);
        assert!(lint(&InfoLicense::new(), BOTH).is_empty());
    }

    #[test]
    fn test_license_url() {
        let src = "openapi: 3.1.0\ninfo:\n  title: t\n  license: {name: MIT}\npaths: {}\n";
        assert_eq!(
            messages(&lint(&InfoLicenseUrl::new(), src)),
            vec!["license should contain a `url` or an SPDX `identifier`"]
        );
        assert!(lint(&InfoLicenseUrl::new(), PARTIAL).is_empty());
    }

    #[test]
    fn test_license_url_and_identifier() {
        let violations = lint(&InfoLicenseUrlSpdx::new(), BOTH);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].start.line, 6);
        assert_eq!(violations[0].end.line, 7);
        assert!(lint(&InfoLicenseUrlSpdx::new(), PARTIAL).is_empty());
    }
}
