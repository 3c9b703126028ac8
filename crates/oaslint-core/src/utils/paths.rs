//! Path-template utilities.
//!
//! Paths are OpenAPI path templates such as `/pets/{petId}/photos`.

/// HTTP methods that may appear as operations on a path item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Returns true if `key` names an operation on a path item.
#[must_use]
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key)
}

/// Splits a path template into segments, dropping the leading empty one.
///
/// # Examples
///
/// ```
/// use oaslint_core::utils::paths::segments;
///
/// assert_eq!(segments("/pets/{id}"), vec!["pets", "{id}"]);
/// assert_eq!(segments("/a//b"), vec!["a", "", "b"]);
/// assert!(segments("/").iter().all(|s| s.is_empty()));
/// ```
#[must_use]
pub fn segments(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

/// Returns true if a segment is wholly or partially templated.
#[must_use]
pub fn is_variable(segment: &str) -> bool {
    segment.contains('{')
}

/// Names of the template variables of `path`, in order of appearance.
///
/// Modifier characters (`;`, `?`, `*`) are stripped, so `{;id*}` yields
/// `id`. Braces holding anything but `[A-Za-z0-9_.-]` are ignored.
///
/// # Examples
///
/// ```
/// use oaslint_core::utils::paths::template_variables;
///
/// assert_eq!(template_variables("/a/{id}/b/{name}.json"), vec!["id", "name"]);
/// ```
#[must_use]
pub fn template_variables(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let inner = after[..close]
            .trim_start_matches([';', '?'])
            .trim_end_matches('*');
        if !inner.is_empty()
            && inner
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            names.push(inner.to_string());
        }
        rest = &after[close + 1..];
    }
    names
}

/// Replaces every template variable with `{}` so that templates differing
/// only by variable names compare equal.
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '{' => {
                if depth == 0 {
                    out.push('{');
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    out.push('}');
                }
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
