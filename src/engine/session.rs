//! engine::session
//!
//! The mutable reference state of one top-level operation.
//!
//! A [`Session`] loads Head, the current Branch, and the Stage once,
//! lets the operation mutate them in memory, and writes back only what
//! changed in [`Session::flush`].
//!
//! # Flush Order
//!
//! Objects are written through by the operations themselves, before the
//! session is flushed. The flush then writes the branch record, Head, and
//! finally the stage, so an interrupted flush leaves at worst an
//! unreferenced commit.

use tracing::debug;

use super::error::TwigError;
use crate::core::refs::{Branch, Head, RefStore};
use crate::core::stage::Stage;
use crate::core::storage::Storage;
use crate::core::types::{BranchName, ObjectId};

/// Loaded references and stage.
#[derive(Debug, Clone)]
pub struct Session {
    head: Head,
    branch: Branch,
    stage: Stage,
    head_dirty: bool,
    branch_dirty: bool,
    stage_dirty: bool,
}

impl Session {
    /// Load the session state from storage.
    ///
    /// # Errors
    ///
    /// [`TwigError::NotInitialized`] if no Head record exists.
    pub fn load(storage: &dyn Storage) -> Result<Self, TwigError> {
        let refs = RefStore::new(storage);
        let head = refs.head()?.ok_or(TwigError::NotInitialized)?;
        // A missing branch record is rebuilt from Head on the next flush.
        let (branch, branch_dirty) = match refs.branch(&head.branch)? {
            Some(branch) => (branch, false),
            None => (
                Branch {
                    name: head.branch.clone(),
                    commit: head.commit.clone(),
                },
                true,
            ),
        };
        let stage = Stage::load(storage)?;

        Ok(Self {
            head,
            branch,
            stage,
            head_dirty: false,
            branch_dirty,
            stage_dirty: false,
        })
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    /// The branch Head names.
    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.head.branch
    }

    pub fn head_commit(&self) -> &ObjectId {
        &self.head.commit
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable access to the stage; marks it for writing.
    pub fn stage_mut(&mut self) -> &mut Stage {
        self.stage_dirty = true;
        &mut self.stage
    }

    pub fn clear_stage(&mut self) {
        self.stage_mut().clear();
    }

    /// Move the current branch and Head to `commit`.
    pub fn advance(&mut self, commit: ObjectId) {
        debug!(branch = %self.branch.name, %commit, "advancing branch");
        self.branch.commit = commit.clone();
        self.head.commit = commit;
        self.branch_dirty = true;
        self.head_dirty = true;
    }

    /// Point Head at another, already persisted branch.
    pub fn switch_to(&mut self, branch: Branch) {
        debug!(branch = %branch.name, commit = %branch.commit, "switching branch");
        self.head = Head {
            branch: branch.name.clone(),
            commit: branch.commit.clone(),
        };
        self.branch = branch;
        self.branch_dirty = false;
        self.head_dirty = true;
    }

    /// Whether any state is waiting to be flushed.
    pub fn is_dirty(&self) -> bool {
        self.head_dirty || self.branch_dirty || self.stage_dirty
    }

    /// Write back every changed record: branch, then Head, then stage.
    pub fn flush(&mut self, storage: &dyn Storage) -> Result<(), TwigError> {
        let refs = RefStore::new(storage);
        if self.branch_dirty {
            refs.set_branch(&self.branch)?;
            self.branch_dirty = false;
        }
        if self.head_dirty {
            refs.set_head(&self.head)?;
            self.head_dirty = false;
        }
        if self.stage_dirty {
            self.stage.save(storage)?;
            self.stage_dirty = false;
        }
        Ok(())
    }
}
