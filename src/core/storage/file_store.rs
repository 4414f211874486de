//! core::storage::file_store
//!
//! Directory-backed record storage.
//!
//! Each key is one file below the root directory. Writes go to a
//! uniquely named hidden file in the same directory and are persisted
//! over the target, so no record name can collide with a temp file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::{validate_key, Storage, StorageError};

/// Directory-backed storage rooted at a repository's `.twig/` directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `root`. The directory is created lazily on write.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |path, part| path.join(part)))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::InvalidName(key.to_string()))?;
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StorageError::io(parent, e))?;
        temp.write_all(bytes)
            .map_err(|e| StorageError::io(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StorageError::io(temp.path(), e))?;

        temp.persist(&path)
            .map_err(|e| StorageError::io(&path, e.error))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn list(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        let path = self.path_for(dir)?;
        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&path, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StorageError::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // Hidden names are in-flight writes, never records.
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
