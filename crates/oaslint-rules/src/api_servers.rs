//! Rule checking the top-level `servers` array of OpenAPI 3 documents.
//!
//! URLs with `{variable}` templates are not checked, since they only
//! become URLs after substitution.

use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "apiServers";

/// Requires well-formed server URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiServers;

impl ApiServers {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Why a server URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UrlProblem {
    Invalid(&'static str),
    NoHostOrPath,
    TrailingSlash,
}

/// Splits a URL (absolute or relative) into host and path.
fn parse_url(url: &str) -> Result<(&str, &str), &'static str> {
    if url.chars().any(char::is_whitespace) {
        return Err("contains whitespace");
    }
    let rest = match url.split_once("://") {
        Some((scheme, rest)) => {
            let mut chars = scheme.chars();
            let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if !valid {
                return Err("invalid scheme");
            }
            rest
        }
        None if url.starts_with("//") => &url[2..],
        None => return Ok(("", strip_query(url))),
    };
    let (authority, path) = rest.find('/').map_or((rest, ""), |at| rest.split_at(at));
    let host = authority.rsplit('@').next().unwrap_or(authority);
    Ok((host, strip_query(path)))
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn check_url(url: &str) -> Result<(), UrlProblem> {
    let (host, path) = parse_url(url).map_err(UrlProblem::Invalid)?;
    if host.is_empty() && path.is_empty() {
        return Err(UrlProblem::NoHostOrPath);
    }
    if path.ends_with('/') {
        return Err(UrlProblem::TrailingSlash);
    }
    Ok(())
}

impl Rule for ApiServers {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::OpenApi
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };
        let base = JsonPath::root().key("servers");

        let Some(servers) = model.servers() else {
            return vec![ctx.violation(
                "no servers defined for the specification",
                &JsonPath::root(),
                ctx.document,
            )];
        };
        if servers.value.is_empty() {
            return vec![ctx.violation(
                "servers definition is empty, contains no servers",
                &base,
                servers.key,
            )];
        }

        let mut violations = Vec::new();
        for (i, server) in servers.value.items().iter().enumerate() {
            let path = base.index(i);
            let Some((key, url_node)) = server.entry("url") else {
                violations.push(ctx.violation("server definition is missing a URL", &path, server));
                continue;
            };
            let Some(url) = url_node.as_str() else {
                violations.push(ctx.violation("server definition is missing a URL", &path.key("url"), key));
                continue;
            };
            if url.contains('{') {
                continue;
            }
            let message = match check_url(url) {
                Ok(()) => continue,
                Err(UrlProblem::Invalid(reason)) => format!("server URL cannot be parsed: {reason}"),
                Err(UrlProblem::NoHostOrPath) => {
                    "server URL is not valid: no hostname or path provided".to_string()
                }
                Err(UrlProblem::TrailingSlash) => {
                    "server URL is not valid: must not have a trailing slash".to_string()
                }
            };
            violations.push(ctx.violation(message, &path.key("url"), url_node));
        }
        violations
    }
}
