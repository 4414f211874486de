//! core::refs
//!
//! Mutable references: the Head record and named branches.
//!
//! # Invariants
//!
//! - `Head.commit` equals the commit of the branch it names, except
//!   immediately after file-level checkouts, which never touch Head.
//! - Every write persists immediately. There is no coupling between the
//!   Head record and branch records; callers update both when required.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::paths::{self, BRANCHES_DIR, HEAD};
use crate::core::storage::{read_json, write_json, Storage, StorageError};
use crate::core::types::{BranchName, ObjectId};

/// The currently checked-out branch and commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    pub branch: BranchName,
    pub commit: ObjectId,
}

/// A named pointer to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: BranchName,
    pub commit: ObjectId,
}

/// Reference storage over a [`Storage`] backend.
#[derive(Clone, Copy)]
pub struct RefStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> RefStore<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Read the Head record, `None` if the repository was never initialized.
    pub fn head(&self) -> Result<Option<Head>, StorageError> {
        read_json(self.storage, HEAD)
    }

    pub fn set_head(&self, head: &Head) -> Result<(), StorageError> {
        debug!(branch = %head.branch, commit = %head.commit, "updating HEAD");
        write_json(self.storage, HEAD, head)
    }

    pub fn branch(&self, name: &BranchName) -> Result<Option<Branch>, StorageError> {
        read_json(self.storage, &paths::branch_key(name))
    }

    pub fn set_branch(&self, branch: &Branch) -> Result<(), StorageError> {
        debug!(branch = %branch.name, commit = %branch.commit, "updating branch");
        write_json(self.storage, &paths::branch_key(&branch.name), branch)
    }

    pub fn delete_branch(&self, name: &BranchName) -> Result<(), StorageError> {
        debug!(branch = %name, "deleting branch");
        self.storage.delete(&paths::branch_key(name))
    }

    pub fn branch_exists(&self, name: &BranchName) -> Result<bool, StorageError> {
        self.storage.exists(&paths::branch_key(name))
    }

    /// All branch names, sorted.
    pub fn branch_names(&self) -> Result<Vec<BranchName>, StorageError> {
        Ok(self
            .storage
            .list(BRANCHES_DIR)?
            .into_iter()
            .filter_map(|name| BranchName::new(name).ok())
            .collect())
    }
}
