//! Index-to-token mapping table
//!
//! The table is stored on disk as two parallel arrays:
//!
//! ```json
//! { "keys": [0, 1, 2], "values": ["4.7.11", "C4", "E-5"] }
//! ```
//!
//! It is loaded once and never mutated afterwards; decoders borrow it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::TableError;

/// On-disk form of the table
#[derive(Debug, Serialize, Deserialize)]
struct KeyedArrays {
    keys: Vec<i64>,
    values: Vec<String>,
}

/// Immutable mapping from model class index to token string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<i64, String>,
}

impl MappingTable {
    /// Build a table from parallel key and value arrays
    pub fn from_arrays(keys: Vec<i64>, values: Vec<String>) -> Result<Self, TableError> {
        if keys.len() != values.len() {
            return Err(TableError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        let mut entries = BTreeMap::new();
        for (key, value) in keys.into_iter().zip(values) {
            if entries.insert(key, value).is_some() {
                return Err(TableError::DuplicateKey(key));
            }
        }

        Ok(MappingTable { entries })
    }

    /// Build a table from a token vocabulary.
    ///
    /// Tokens are deduplicated and sorted, then numbered from 0, which is
    /// how the class indices are assigned when the vocabulary is built.
    pub fn from_vocabulary<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
        let entries = vocabulary
            .into_iter()
            .enumerate()
            .map(|(idx, token)| (idx as i64, token))
            .collect();

        MappingTable { entries }
    }

    /// Parse a table from its JSON keyed-array form
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let arrays: KeyedArrays = serde_json::from_str(json)?;
        Self::from_arrays(arrays.keys, arrays.values)
    }

    /// Load a table resource from disk
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let data = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_json_str(&data)?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded mapping table");
        Ok(table)
    }

    /// Serialize to the JSON keyed-array form, keys ascending
    pub fn to_json_string(&self) -> Result<String, TableError> {
        let arrays = KeyedArrays {
            keys: self.entries.keys().copied().collect(),
            values: self.entries.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&arrays)?)
    }

    /// Write the table resource to disk
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, index: i64) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    pub fn contains(&self, index: i64) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_json() {
        let table =
            MappingTable::from_json_str(r#"{"keys": [0, 5, 2], "values": ["C4", "4.7.11", "77"]}"#)
                .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(5), Some("4.7.11"));
        assert_eq!(table.get(2), Some("77"));
        assert_eq!(table.get(1), None);
    }

    #[test]
    fn test_length_mismatch() {
        let err = MappingTable::from_arrays(vec![0, 1], vec!["C4".into()]).unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { keys: 2, values: 1 }));
    }

    #[test]
    fn test_duplicate_key() {
        let err =
            MappingTable::from_arrays(vec![3, 3], vec!["C4".into(), "D4".into()]).unwrap_err();
        assert!(matches!(err, TableError::DuplicateKey(3)));
    }

    #[test]
    fn test_malformed_json() {
        let err = MappingTable::from_json_str(r#"{"keys": [0]}"#).unwrap_err();
        assert!(matches!(err, TableError::Json(_)));
    }

    #[test]
    fn test_from_vocabulary_sorts_and_dedups() {
        let table = MappingTable::from_vocabulary(["E4", "4.7", "C4", "E4"]);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0, "4.7"), (1, "C4"), (2, "E4")]);
    }

    #[test]
    fn test_json_reload() {
        let table = MappingTable::from_vocabulary(["B-3", "11.2", "G#5"]);
        let json = table.to_json_string().unwrap();
        assert_eq!(MappingTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("int_to_note.json");
        let table = MappingTable::from_arrays(
            vec![7, 0, 3],
            vec!["C4".into(), "4.7.11".into(), "77".into()],
        )
        .unwrap();

        table.save(&path).unwrap();
        let loaded = MappingTable::load(&path).unwrap();

        assert_eq!(loaded, table);
        assert_eq!(loaded.get(7), Some("C4"));
    }

    #[test]
    fn test_load_written_resource() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("int_to_note.json");
        std::fs::write(&path, r#"{"keys": [1, 2], "values": ["E-5", "2.6"]}"#).unwrap();

        let table = MappingTable::load(&path).unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(1, "E-5"), (2, "2.6")]);
    }

    #[test]
    fn test_save_to_missing_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("int_to_note.json");
        let err = MappingTable::from_vocabulary(["C4"]).save(&path).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MappingTable::load(Path::new("/nonexistent/int_to_note.json")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
