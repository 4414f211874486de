//! engine::query
//!
//! Read-only operations: `log`, `global-log`, `find`, and `status`.

use std::collections::BTreeMap;

use super::error::TwigError;
use super::repo::Repository;
use super::session::Session;
use crate::core::objects::{Blob, Commit};
use crate::core::types::{BranchName, ObjectId};

/// The head commit's first-parent history, child first.
pub fn log(repo: &Repository, session: &Session) -> Result<Vec<Commit>, TwigError> {
    let head = repo.objects().get_commit(session.head_commit())?;
    Ok(repo.graph().history(&head)?)
}

/// Every commit in the repository, sorted by id.
pub fn global_log(repo: &Repository) -> Result<Vec<Commit>, TwigError> {
    Ok(repo.graph().all()?)
}

/// Ids of every commit whose message is exactly `message`, sorted.
pub fn find(repo: &Repository, message: &str) -> Result<Vec<ObjectId>, TwigError> {
    let ids: Vec<ObjectId> = repo
        .graph()
        .all()?
        .into_iter()
        .filter(|commit| commit.message() == message)
        .map(|commit| commit.id().clone())
        .collect();
    if ids.is_empty() {
        return Err(TwigError::NoCommitWithMessage);
    }
    Ok(ids)
}

/// How a working file differs from what would be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    Modified,
    Deleted,
}

impl FileChange {
    pub fn label(self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Deleted => "deleted",
        }
    }
}

/// Everything `status` reports, each list sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub current_branch: BranchName,
    pub branches: Vec<BranchName>,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<(String, FileChange)>,
    pub untracked: Vec<String>,
}

/// Summarize branches, the stage, and the working tree.
pub fn status(repo: &Repository, session: &Session) -> Result<StatusReport, TwigError> {
    let head = repo.objects().get_commit(session.head_commit())?;
    let tracked = head.state();
    let stage = session.stage();
    let worktree = repo.worktree();

    let mut working = BTreeMap::new();
    for name in worktree.files()? {
        if let Some(content) = worktree.read(&name)? {
            let id = Blob::compute_id(&name, &content);
            working.insert(name, id);
        }
    }

    let mut modified = BTreeMap::new();
    for (name, staged_id) in stage.additions() {
        match working.get(name) {
            Some(id) if id != staged_id => {
                modified.insert(name.clone(), FileChange::Modified);
            }
            None => {
                modified.insert(name.clone(), FileChange::Deleted);
            }
            _ => {}
        }
    }
    for (name, head_id) in tracked {
        if stage.is_staged_for_addition(name) || stage.is_staged_for_removal(name) {
            continue;
        }
        match working.get(name) {
            Some(id) if id != head_id => {
                modified.insert(name.clone(), FileChange::Modified);
            }
            None => {
                modified.insert(name.clone(), FileChange::Deleted);
            }
            _ => {}
        }
    }

    let untracked = working
        .keys()
        .filter(|name| {
            let unknown = !tracked.contains_key(*name) && !stage.is_staged_for_addition(name);
            unknown || stage.is_staged_for_removal(name)
        })
        .cloned()
        .collect();

    Ok(StatusReport {
        current_branch: session.current_branch().clone(),
        branches: repo.refs().branch_names()?,
        staged: stage.additions().keys().cloned().collect(),
        removed: stage.removals().iter().cloned().collect(),
        modified: modified.into_iter().collect(),
        untracked,
    })
}

impl Repository {
    /// See [`log`].
    pub fn log(&self) -> Result<Vec<Commit>, TwigError> {
        log(self, &self.session()?)
    }

    /// See [`global_log`].
    pub fn global_log(&self) -> Result<Vec<Commit>, TwigError> {
        self.session()?;
        global_log(self)
    }

    /// See [`find`].
    pub fn find(&self, message: &str) -> Result<Vec<ObjectId>, TwigError> {
        self.session()?;
        find(self, message)
    }

    /// See [`status`].
    pub fn status(&self) -> Result<StatusReport, TwigError> {
        status(self, &self.session()?)
    }
}
