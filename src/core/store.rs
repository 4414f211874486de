//! core::store
//!
//! Content-addressed persistence for blobs and commits.
//!
//! # Invariants
//!
//! - Records are written once; storing an object whose id already exists
//!   is a no-op, so the underlying record is never duplicated or rewritten.
//! - Records are verified against their id when read back.
//!
//! # Example
//!
//! ```
//! use twig::core::storage::MemoryStorage;
//! use twig::core::store::ObjectStore;
//!
//! let storage = MemoryStorage::new();
//! let store = ObjectStore::new(&storage);
//!
//! let id = store.put_blob("a.txt", b"hello").unwrap();
//! assert_eq!(store.put_blob("a.txt", b"hello").unwrap(), id);
//! assert_eq!(store.get_blob(&id).unwrap().content(), b"hello");
//! ```

use thiserror::Error;
use tracing::debug;

use crate::core::objects::{Blob, Commit};
use crate::core::paths::{self, BLOBS_DIR, COMMITS_DIR};
use crate::core::storage::{read_json, write_json, Storage, StorageError};
use crate::core::types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No commit matches the id or prefix.
    #[error("no commit with id '{0}'")]
    CommitNotFound(String),

    /// A referenced blob is missing.
    #[error("no blob with id '{0}'")]
    BlobNotFound(String),

    /// A prefix matches more than one commit.
    #[error("commit id prefix '{prefix}' is ambiguous ({matches} matches)")]
    AmbiguousPrefix { prefix: String, matches: usize },

    /// A stored record does not hash to its own id.
    #[error("corrupt object '{0}'")]
    Corrupt(String),

    /// Underlying storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Object store over a [`Storage`] backend.
#[derive(Clone, Copy)]
pub struct ObjectStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> ObjectStore<'a> {
    /// Create an object store using the given storage.
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Store `content` as a blob for `filename`, returning its id.
    ///
    /// Idempotent: the record is only written if absent.
    pub fn put_blob(&self, filename: &str, content: &[u8]) -> Result<ObjectId, StoreError> {
        let blob = Blob::new(filename, content);
        self.put(&blob)?;
        Ok(blob.id().clone())
    }

    /// Store an already-constructed blob. Idempotent.
    pub fn put(&self, blob: &Blob) -> Result<(), StoreError> {
        let key = paths::blob_key(blob.id());
        if self.storage.exists(&key)? {
            return Ok(());
        }
        debug!(blob = %blob.id(), filename = blob.filename(), "writing blob");
        write_json(self.storage, &key, blob)?;
        Ok(())
    }

    /// Load a blob by id.
    pub fn get_blob(&self, id: &ObjectId) -> Result<Blob, StoreError> {
        let blob: Blob = read_json(self.storage, &paths::blob_key(id))?
            .ok_or_else(|| StoreError::BlobNotFound(id.to_string()))?;
        if blob.id() != id || !blob.verify() {
            return Err(StoreError::Corrupt(id.to_string()));
        }
        Ok(blob)
    }

    /// Store a commit. Write-once: re-storing the same id is a no-op.
    pub fn put_commit(&self, commit: &Commit) -> Result<(), StoreError> {
        let key = paths::commit_key(commit.id());
        if self.storage.exists(&key)? {
            return Ok(());
        }
        debug!(commit = %commit.id(), "writing commit");
        write_json(self.storage, &key, commit)?;
        Ok(())
    }

    /// Check whether a commit record exists.
    pub fn contains_commit(&self, id: &ObjectId) -> Result<bool, StoreError> {
        Ok(self.storage.exists(&paths::commit_key(id))?)
    }

    /// Load a commit by full id.
    pub fn get_commit(&self, id: &ObjectId) -> Result<Commit, StoreError> {
        let commit: Commit = read_json(self.storage, &paths::commit_key(id))?
            .ok_or_else(|| StoreError::CommitNotFound(id.to_string()))?;
        if commit.id() != id || !commit.verify() {
            return Err(StoreError::Corrupt(id.to_string()));
        }
        Ok(commit)
    }

    /// Resolve a full id or a unique prefix to a commit.
    ///
    /// # Errors
    ///
    /// - [`StoreError::CommitNotFound`] if nothing matches
    /// - [`StoreError::AmbiguousPrefix`] if a prefix matches several commits
    pub fn resolve_commit(&self, id_or_prefix: &str) -> Result<Commit, StoreError> {
        if !ObjectId::is_hex_prefix(id_or_prefix) {
            return Err(StoreError::CommitNotFound(id_or_prefix.to_string()));
        }

        if let Ok(id) = ObjectId::new(id_or_prefix) {
            return self.get_commit(&id);
        }

        let matches: Vec<ObjectId> = self
            .commit_ids()?
            .into_iter()
            .filter(|id| id.has_prefix(id_or_prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(StoreError::CommitNotFound(id_or_prefix.to_string())),
            [only] => self.get_commit(only),
            _ => Err(StoreError::AmbiguousPrefix {
                prefix: id_or_prefix.to_string(),
                matches: matches.len(),
            }),
        }
    }

    /// Ids of every stored commit, sorted.
    pub fn commit_ids(&self) -> Result<Vec<ObjectId>, StoreError> {
        Ok(self
            .storage
            .list(COMMITS_DIR)?
            .into_iter()
            .filter_map(|name| ObjectId::new(name).ok())
            .collect())
    }

    /// Ids of every stored blob, sorted.
    pub fn blob_ids(&self) -> Result<Vec<ObjectId>, StoreError> {
        Ok(self
            .storage
            .list(BLOBS_DIR)?
            .into_iter()
            .filter_map(|name| ObjectId::new(name).ok())
            .collect())
    }
}
