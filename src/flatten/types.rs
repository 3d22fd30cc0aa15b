use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// One flattened resource - a row in the output table
///
/// Maps dotted keys (e.g. `Tags.Value`) to scalar values in string form.
/// Key order inside a record is irrelevant; output ordering comes from the
/// sorted key set of the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        self.fields.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let _ = self.fields.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// The result of one flatten call: the extracted records plus the union of
/// every dotted key seen across them.
///
/// `keys` is a `BTreeSet`, so iteration yields plain byte-order sorting.
/// Every record's keys are a subset of `keys`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatTable {
    pub records: Vec<Record>,
    pub keys: BTreeSet<String>,
}

impl FlatTable {
    /// The CSV header: deduplicated keys in sorted order.
    pub fn header(&self) -> Vec<&str> {
        self.keys.iter().map(String::as_str).collect()
    }
}

/// Configuration for the flattening process
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Maximum nesting depth to descend into (guards against pathological input)
    pub max_depth: usize,

    /// Separator between nested key components (default: ".")
    pub key_separator: String,

    /// Separator joining repeated scalar values for one key in a list
    /// context (default: "|")
    pub multi_value_separator: String,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            max_depth: 64,
            key_separator: String::from("."),
            multi_value_separator: String::from("|"),
        }
    }
}

/// Faults raised during traversal
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("maximum nesting depth of {0} exceeded")]
    MaxDepthExceeded(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_insert_and_get() {
        let mut record = Record::default();
        record.insert("Id", "i-1");

        assert_eq!(record.get("Id"), Some("i-1"));
        assert_eq!(record.get("Missing"), None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_header_is_sorted_and_deduplicated() {
        let mut table = FlatTable::default();
        let _ = table.keys.insert("b".to_string());
        let _ = table.keys.insert("a".to_string());
        let _ = table.keys.insert("a".to_string());

        assert_eq!(table.header(), vec!["a", "b"]);
    }
}
