//! core::worktree
//!
//! The working directory whose files are versioned.
//!
//! # Architecture
//!
//! Twig versions a flat directory: only regular files directly inside the
//! working directory are tracked, and the metadata directory is never
//! visible through this interface. Access goes through the [`WorkTree`]
//! trait:
//!
//! - [`DiskWorkTree`]: The real working directory
//! - [`MemoryWorkTree`]: An in-memory file map, for tests
//!
//! Filenames are single path components; anything containing a separator
//! is rejected with [`StorageError::InvalidName`].

mod disk;
mod memory;

pub use disk::DiskWorkTree;
pub use memory::MemoryWorkTree;

use crate::core::paths::TWIG_DIR;
use crate::core::storage::StorageError;

/// Trait for working-directory access.
pub trait WorkTree {
    /// List every regular file in the working directory, sorted.
    fn files(&self) -> Result<Vec<String>, StorageError>;

    /// Read a file's content.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Create or overwrite a file.
    fn write(&self, name: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Delete a file.
    ///
    /// Returns `Ok(())` even if the file did not exist.
    fn delete(&self, name: &str) -> Result<(), StorageError>;

    /// Check if a file exists.
    fn contains(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.read(name)?.is_some())
    }
}

/// Validate a working-tree filename.
pub(crate) fn validate_filename(name: &str) -> Result<(), StorageError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name != TWIG_DIR
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_validation() {
        assert!(validate_filename("a.txt").is_ok());
        assert!(validate_filename(".hidden").is_ok());
        assert!(validate_filename("").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename(".twig").is_err());
        assert!(validate_filename("dir/file").is_err());
    }
}
