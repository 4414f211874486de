//! core::worktree::disk
//!
//! The working directory on the local filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{validate_filename, WorkTree};
use crate::core::storage::StorageError;

/// A working directory on disk.
#[derive(Debug, Clone)]
pub struct DiskWorkTree {
    root: PathBuf,
}

impl DiskWorkTree {
    /// Create a working tree rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_filename(name)?;
        Ok(self.root.join(name))
    }
}

impl WorkTree for DiskWorkTree {
    fn files(&self) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(&self.root).map_err(|e| StorageError::io(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.root, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StorageError::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            // Names the tree could not read back are not versionable.
            if let Some(name) = entry.file_name().to_str() {
                if validate_filename(name).is_ok() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(name)?;
        if path.is_dir() {
            return Ok(None);
        }
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn write(&self, name: &str, content: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        fs::write(&path, content).map_err(|e| StorageError::io(path, e))
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        if path.is_dir() {
            return Ok(());
        }
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}
