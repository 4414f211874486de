//! core::storage
//!
//! Keyed record storage underneath every persisted Twig structure.
//!
//! # Architecture
//!
//! Records are stored through the [`Storage`] trait, which has two
//! implementations:
//!
//! - [`FileStorage`]: Stores each key as a file under `.twig/` (default)
//! - [`MemoryStorage`]: Keeps records in memory, for tests and embedding
//!
//! Keys are produced by [`crate::core::paths`]. The typed helpers
//! [`read_json`] and [`write_json`] layer `serde_json` encoding on top.
//!
//! # Example
//!
//! ```
//! use twig::core::storage::{MemoryStorage, Storage};
//!
//! let storage = MemoryStorage::new();
//! storage.write("commits/abc", b"{}").unwrap();
//! assert_eq!(storage.list("commits").unwrap(), vec!["abc".to_string()]);
//! ```

mod file_store;
mod memory;

pub use file_store::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from storage and working-tree operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("i/o error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record could not be encoded.
    #[error("failed to serialize '{key}': {message}")]
    Serialize { key: String, message: String },

    /// A record could not be decoded.
    #[error("failed to parse '{key}': {message}")]
    Deserialize { key: String, message: String },

    /// A key or working-tree filename is not a plain relative name.
    #[error("invalid name: '{0}'")]
    InvalidName(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Trait for keyed record storage.
///
/// Keys are `/`-separated relative names such as `commits/<id>`.
/// Implementations must make each `write` atomic with respect to readers:
/// a key is observed either with its old value or its new one.
pub trait Storage {
    /// Read the bytes stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store bytes under `key`, replacing any existing value.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete `key`.
    ///
    /// Returns `Ok(())` even if the key did not exist.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// List the names stored directly under `dir`, sorted.
    ///
    /// A directory with no entries (or that was never written) is empty.
    fn list(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    /// Check if a key exists.
    ///
    /// Default implementation uses `read()` and checks for `Some`.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.read(key)?.is_some())
    }
}

/// Read and decode a JSON record.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.read(key)? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::Deserialize {
                key: key.to_string(),
                message: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Encode and write a JSON record.
pub fn write_json<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    storage.write(key, &bytes)
}

/// Validate a storage key: non-empty `/`-separated plain components.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != ".." && !part.contains('\\'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn json_roundtrip_through_storage() {
        let storage = MemoryStorage::new();
        let record = Record {
            name: "a".into(),
            count: 3,
        };
        write_json(&storage, "records/a", &record).unwrap();
        let read: Option<Record> = read_json(&storage, "records/a").unwrap();
        assert_eq!(read, Some(record));
    }

    #[test]
    fn missing_record_is_none() {
        let storage = MemoryStorage::new();
        let read: Option<Record> = read_json(&storage, "records/missing").unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn malformed_record_is_error() {
        let storage = MemoryStorage::new();
        storage.write("records/bad", b"not json").unwrap();
        let result: Result<Option<Record>, _> = read_json(&storage, "records/bad");
        assert!(matches!(result, Err(StorageError::Deserialize { .. })));
    }

    #[test]
    fn key_validation() {
        assert!(validate_key("HEAD").is_ok());
        assert!(validate_key("commits/abc").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/abs").is_err());
        assert!(validate_key("a//b").is_err());
        assert!(validate_key("../escape").is_err());
    }
}
