//! Identifier casing classifiers.

use std::fmt;

/// Casing style of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// `userName`, `userID`, `id`.
    Camel,
    /// `UserName`.
    Pascal,
    /// `user_name`.
    Snake,
    /// `user-name`.
    Kebab,
    /// `USER_NAME`, `USER-NAME`, `ID`.
    Upper,
    /// Anything else, e.g. `User_Name` or `_id`.
    Ambiguous,
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Camel => "camelCase",
            Self::Pascal => "PascalCase",
            Self::Snake => "snake_case",
            Self::Kebab => "kebab-case",
            Self::Upper => "UPPER_CASE",
            Self::Ambiguous => "ambiguous",
        })
    }
}

/// Classifies an identifier.
///
/// A single lowercase word is both camel and Pascal-compatible; it is
/// classified as camelCase.
///
/// # Examples
///
/// ```
/// use oaslint_core::utils::casing::{classify, Case};
///
/// assert_eq!(classify("userID"), Case::Camel);
/// assert_eq!(classify("UserName"), Case::Pascal);
/// assert_eq!(classify("user_name"), Case::Snake);
/// ```
#[must_use]
pub fn classify(name: &str) -> Case {
    let Some(first) = name.chars().next() else {
        return Case::Ambiguous;
    };
    let alnum = name.chars().all(|c| c.is_ascii_alphanumeric());
    let has_lower = name.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = name.chars().any(|c| c.is_ascii_uppercase());

    if alnum && first.is_ascii_lowercase() {
        return Case::Camel;
    }
    if alnum && first.is_ascii_uppercase() && has_lower {
        return Case::Pascal;
    }
    if !first.is_ascii_alphabetic() {
        return Case::Ambiguous;
    }
    let separated = |sep: char| {
        name.contains(sep)
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == sep)
            && !name.ends_with(sep)
            && !name.contains(&format!("{sep}{sep}"))
    };
    if !has_lower && (alnum || separated('_') || separated('-')) {
        return Case::Upper;
    }
    if !has_upper && separated('_') {
        return Case::Snake;
    }
    if !has_upper && separated('-') {
        return Case::Kebab;
    }
    Case::Ambiguous
}

/// Returns true if `name` is camelCase.
#[must_use]
pub fn is_camel_case(name: &str) -> bool {
    classify(name) == Case::Camel
}

/// Returns true if a path segment is kebab-case: `[a-z0-9-]+` with an
/// optional `.ext` suffix.
///
/// # Examples
///
/// ```
/// use oaslint_core::utils::casing::is_kebab_segment;
///
/// assert!(is_kebab_segment("pet-owners"));
/// assert!(is_kebab_segment("openapi.json"));
/// assert!(!is_kebab_segment("petOwners"));
/// ```
#[must_use]
pub fn is_kebab_segment(segment: &str) -> bool {
    let (stem, ext) = match segment.split_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (segment, None),
    };
    let stem_ok = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let ext_ok = ext.map_or(true, |ext| {
        !ext.is_empty()
            && ext
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    });
    stem_ok && ext_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_styles() {
        assert_eq!(classify("userName"), Case::Camel);
        assert_eq!(classify("id"), Case::Camel);
        assert_eq!(classify("UserName"), Case::Pascal);
        assert_eq!(classify("user_name"), Case::Snake);
        assert_eq!(classify("user-name"), Case::Kebab);
        assert_eq!(classify("USER_NAME"), Case::Upper);
        assert_eq!(classify("USER-NAME"), Case::Upper);
        assert_eq!(classify("ID"), Case::Upper);
    }

    #[test]
    fn mixed_styles_are_ambiguous() {
        assert_eq!(classify("User_Name"), Case::Ambiguous);
        assert_eq!(classify("_id"), Case::Ambiguous);
        assert_eq!(classify("user name"), Case::Ambiguous);
        assert_eq!(classify("user__name"), Case::Ambiguous);
        assert_eq!(classify(""), Case::Ambiguous);
    }

    #[test]
    fn kebab_segments() {
        assert!(is_kebab_segment("v1"));
        assert!(is_kebab_segment("a-b-c"));
        assert!(!is_kebab_segment("a_b"));
        assert!(!is_kebab_segment("file.tar.gz"));
        assert!(!is_kebab_segment(""));
    }
}
