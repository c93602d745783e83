use std::collections::BTreeMap;

use crate::model::FieldPath;

/// Field path to error message. An absent entry means the field is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<K: Ord = FieldPath> {
    errors: BTreeMap<K, String>,
}

impl<K: Ord> Default for ValidationErrors<K> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<K: Ord> ValidationErrors<K> {
    /// Creates an empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Error message for `key`, if it failed.
    pub fn get(&self, key: &K) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` failed.
    pub fn contains(&self, key: &K) -> bool {
        self.errors.contains_key(key)
    }

    /// The first failing field in key order.
    pub fn first(&self) -> Option<(&K, &str)> {
        self.errors.iter().next().map(|(k, v)| (k, v.as_str()))
    }

    /// Iterates failing fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Keeps only the errors whose key satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.errors.retain(|k, _| keep(k));
    }

    /// Records an error, keeping an earlier message for the same key.
    pub(crate) fn insert(&mut self, key: K, message: String) {
        self.errors.entry(key).or_insert(message);
    }
}

impl<K: Ord> IntoIterator for ValidationErrors<K> {
    type Item = (K, String);
    type IntoIter = std::collections::btree_map::IntoIter<K, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
