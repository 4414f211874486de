//! engine::branch
//!
//! Creating and deleting branches. Neither operation moves Head or
//! touches commits.

use tracing::debug;

use super::error::TwigError;
use super::repo::Repository;
use super::session::Session;
use crate::core::refs::Branch;
use crate::core::types::BranchName;

/// Create branch `name` at Head's commit.
pub fn create_branch(repo: &Repository, session: &Session, name: &str) -> Result<(), TwigError> {
    let name = BranchName::new(name)?;
    let refs = repo.refs();
    if refs.branch_exists(&name)? {
        return Err(TwigError::BranchExists);
    }
    debug!(branch = %name, commit = %session.head_commit(), "creating branch");
    refs.set_branch(&Branch {
        name,
        commit: session.head_commit().clone(),
    })?;
    Ok(())
}

/// Delete branch `name`. The current branch cannot be removed.
pub fn remove_branch(repo: &Repository, session: &Session, name: &str) -> Result<(), TwigError> {
    if name == session.current_branch().as_str() {
        return Err(TwigError::RemoveCurrentBranch);
    }
    let name = BranchName::new(name).map_err(|_| TwigError::BranchNotFound)?;
    let refs = repo.refs();
    if !refs.branch_exists(&name)? {
        return Err(TwigError::BranchNotFound);
    }
    refs.delete_branch(&name)?;
    Ok(())
}

impl Repository {
    /// Create a branch. See [`create_branch`].
    pub fn create_branch(&self, name: &str) -> Result<(), TwigError> {
        self.run(|repo, session| create_branch(repo, session, name))
    }

    /// Delete a branch. See [`remove_branch`].
    pub fn remove_branch(&self, name: &str) -> Result<(), TwigError> {
        self.run(|repo, session| remove_branch(repo, session, name))
    }
}
