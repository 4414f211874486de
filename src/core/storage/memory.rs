//! core::storage::memory
//!
//! In-memory record storage.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{validate_key, Storage, StorageError};

/// Storage that keeps every record in a map.
///
/// Used by unit tests and anywhere a repository should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all directories.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Check whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        Ok(self.records.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        self.records
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.records.borrow_mut().remove(key);
        Ok(())
    }

    fn list(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        validate_key(dir)?;
        let prefix = format!("{}/", dir);
        // BTreeMap iteration is already sorted.
        Ok(self
            .records
            .borrow()
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }
}
