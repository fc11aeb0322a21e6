//! The flattened key/value store produced by a load.

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::KEY_DELIMITER;
use crate::path::{fold_char, strip_section};

/// A configuration key that compares without regard to case.
///
/// Ordering follows the uppercase form of each character, so
/// `appSettings:a` and `APPSETTINGS:A` are the same key while the stored
/// text keeps whatever casing was inserted first.
#[derive(Clone)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Create a key from its text.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key text as originally stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().map(fold_char)
    }
}

impl Ord for ConfigKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl PartialOrd for ConfigKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ConfigKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ConfigKey {}

impl fmt::Debug for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, case-insensitive map of flattened configuration values.
///
/// Keys are colon-delimited paths such as `appSettings:Theme`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigData {
    entries: BTreeMap<ConfigKey, String>,
}

impl ConfigData {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value, ignoring key case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&ConfigKey::new(key)).map(String::as_str)
    }

    /// Check whether a key is present, ignoring case.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&ConfigKey::new(key))
    }

    /// Insert or replace a value, returning the previous one.
    ///
    /// When the key already exists its stored spelling is kept and only the
    /// value changes.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(ConfigKey::new(key), value.into())
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(&ConfigKey::new(key))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Entries below `section`, with the section prefix stripped.
    ///
    /// An empty section yields every entry.
    pub fn section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter()
            .filter_map(move |(key, value)| strip_section(key, section).map(|rest| (rest, value)))
    }

    /// Distinct immediate child segment names below `parent` (or at the top
    /// level when `parent` is `None`), in key order.
    #[must_use]
    pub fn child_keys(&self, parent: Option<&str>) -> Vec<String> {
        let section = parent.unwrap_or_default();
        let children: BTreeSet<ConfigKey> = self
            .section(section)
            .map(|(rest, _)| {
                let first = rest.split(KEY_DELIMITER).next().unwrap_or(rest);
                ConfigKey::new(first)
            })
            .collect();
        children.into_iter().map(|key| key.0).collect()
    }
}

/// Iterator over the entries of a [`ConfigData`].
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, ConfigKey, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a ConfigData {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}

impl Serialize for ConfigData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
