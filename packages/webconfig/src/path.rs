//! Helpers for colon-delimited configuration key paths.

use crate::config::KEY_DELIMITER;

/// Join path segments with the key delimiter.
///
/// # Examples
/// ```
/// use webconfig::path::combine;
///
/// assert_eq!(combine(["appSettings", "Theme"]), "appSettings:Theme");
/// assert_eq!(combine(["Theme"]), "Theme");
/// ```
pub fn combine<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            key.push_str(KEY_DELIMITER);
        }
        key.push_str(segment.as_ref());
    }
    key
}

/// Fold a character for case-insensitive key comparison.
///
/// Characters are compared one at a time: a character maps to its uppercase
/// form only when that form is a single character, so `ß` stays `ß` rather
/// than expanding to `SS`.
pub fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// If `key` lies below `section`, return the remainder after `section:`.
///
/// Comparison of the section prefix ignores case, character by character.
pub fn strip_section<'a>(key: &'a str, section: &str) -> Option<&'a str> {
    if section.is_empty() {
        return Some(key);
    }

    let mut chars = key.chars();
    for expected in section.chars() {
        match chars.next() {
            Some(actual) if fold_char(actual) == fold_char(expected) => {}
            _ => return None,
        }
    }

    chars
        .as_str()
        .strip_prefix(KEY_DELIMITER)
        .filter(|rest| !rest.is_empty())
}
