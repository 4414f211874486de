//! engine::staging
//!
//! `add`, `rm`, and `commit`: building the next snapshot.

use tracing::debug;

use super::error::TwigError;
use super::repo::Repository;
use super::session::Session;
use crate::core::objects::{Blob, Commit};
use crate::core::types::{ObjectId, Timestamp};

/// Stage the working copy of `filename`.
///
/// Content identical to the head commit's entry clears any pending
/// addition or removal instead of staging.
pub fn add(repo: &Repository, session: &mut Session, filename: &str) -> Result<(), TwigError> {
    let content = repo
        .worktree()
        .read(filename)?
        .ok_or(TwigError::FileNotFound)?;
    let head = repo.objects().get_commit(session.head_commit())?;
    let candidate = Blob::new(filename, content);

    if head.state().get(filename) == Some(candidate.id()) {
        debug!(filename, "content matches head, unstaging");
        let stage = session.stage_mut();
        stage.unstage_addition(filename);
        stage.unstage_removal(filename);
        return Ok(());
    }

    repo.objects().put(&candidate)?;
    debug!(filename, blob = %candidate.id(), "staged for addition");
    session
        .stage_mut()
        .stage_addition(filename, candidate.id().clone());
    Ok(())
}

/// Unstage `filename`, and stage it for removal if the head commit tracks it.
///
/// A tracked file is also deleted from the working tree.
pub fn remove(repo: &Repository, session: &mut Session, filename: &str) -> Result<(), TwigError> {
    let head = repo.objects().get_commit(session.head_commit())?;
    let staged = session.stage().is_staged_for_addition(filename);
    let tracked = head.state().contains_key(filename);

    if !staged && !tracked {
        return Err(TwigError::NothingToRemove);
    }
    if staged {
        session.stage_mut().unstage_addition(filename);
    }
    if tracked {
        session.stage_mut().stage_removal(filename);
        repo.worktree().delete(filename)?;
        debug!(filename, "staged for removal");
    }
    Ok(())
}

/// Commit the stage on top of Head.
pub fn commit(repo: &Repository, session: &mut Session, message: &str) -> Result<Commit, TwigError> {
    if message.trim().is_empty() {
        return Err(TwigError::BlankMessage);
    }
    if session.stage().is_empty() {
        return Err(TwigError::NothingToCommit);
    }
    commit_snapshot(repo, session, message, None)
}

/// Write a commit of the stage applied to Head, then advance the current
/// branch to it and clear the stage.
pub(crate) fn commit_snapshot(
    repo: &Repository,
    session: &mut Session,
    message: &str,
    parent2: Option<ObjectId>,
) -> Result<Commit, TwigError> {
    let objects = repo.objects();
    let head = objects.get_commit(session.head_commit())?;
    let state = session.stage().apply(head.state());

    // Commit ids do not cover parents; keep them unique per repository.
    let mut timestamp = Timestamp::now();
    let commit = loop {
        let candidate = Commit::new(
            Some(head.id().clone()),
            parent2.clone(),
            message,
            timestamp.clone(),
            state.clone(),
        );
        if !objects.contains_commit(candidate.id())? {
            break candidate;
        }
        timestamp = timestamp.next_nanosecond();
    };

    objects.put_commit(&commit)?;
    session.advance(commit.id().clone());
    session.clear_stage();
    Ok(commit)
}

impl Repository {
    /// Stage a file. See [`add`].
    pub fn add(&self, filename: &str) -> Result<(), TwigError> {
        self.run(|repo, session| add(repo, session, filename))
    }

    /// Remove a file. See [`remove`].
    pub fn remove(&self, filename: &str) -> Result<(), TwigError> {
        self.run(|repo, session| remove(repo, session, filename))
    }

    /// Commit the stage. See [`commit`].
    pub fn commit(&self, message: &str) -> Result<Commit, TwigError> {
        self.run(|repo, session| commit(repo, session, message))
    }
}
