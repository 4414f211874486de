//! core::worktree::memory
//!
//! In-memory working tree.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{validate_filename, WorkTree};
use crate::core::storage::StorageError;

/// A working tree held in a map of filename to content.
#[derive(Debug, Default)]
pub struct MemoryWorkTree {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryWorkTree {
    /// Create an empty working tree.
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkTree for MemoryWorkTree {
    fn files(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.files.borrow().keys().cloned().collect())
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_filename(name)?;
        Ok(self.files.borrow().get(name).cloned())
    }

    fn write(&self, name: &str, content: &[u8]) -> Result<(), StorageError> {
        validate_filename(name)?;
        self.files
            .borrow_mut()
            .insert(name.to_string(), content.to_vec());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        validate_filename(name)?;
        self.files.borrow_mut().remove(name);
        Ok(())
    }
}
