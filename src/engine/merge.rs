//! engine::merge
//!
//! Merging another branch into the current one.
//!
//! # Decision Order
//!
//! 1. Merging the current branch into itself fails.
//! 2. The other branch must exist.
//! 3. The split point is computed (see [`CommitGraph::split_point`]).
//! 4. If the other tip is the split point, the other branch is already an
//!    ancestor: nothing changes.
//! 5. If the current tip is the split point, fast-forward by checking out
//!    the other branch.
//! 6. A non-empty stage aborts.
//! 7. Otherwise every file is resolved by [`plan_merge`], untracked files
//!    the plan would overwrite abort, and the plan is applied and committed
//!    with both tips as parents.
//!
//! [`CommitGraph::split_point`]: crate::core::graph::CommitGraph::split_point

use std::collections::BTreeSet;

use tracing::debug;

use super::error::TwigError;
use super::repo::Repository;
use super::session::Session;
use super::staging::commit_snapshot;
use super::sync::checkout_branch;
use crate::core::objects::{Commit, FileState};
use crate::core::types::{BranchName, ObjectId};

/// How a merge finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other branch is an ancestor of the current one.
    AlreadyAncestor,
    /// The current branch was behind and the other branch was checked out.
    FastForwarded,
    /// A merge commit was created.
    Merged {
        commit: ObjectId,
        /// Whether any file was written with conflict markers.
        conflicted: bool,
    },
}

/// What to do with one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Take the other side's blob.
    Take { filename: String, blob: ObjectId },
    /// The other side deleted the file.
    Remove { filename: String },
    /// Both sides changed the file differently.
    Conflict {
        filename: String,
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl MergeAction {
    pub fn filename(&self) -> &str {
        match self {
            Self::Take { filename, .. }
            | Self::Remove { filename }
            | Self::Conflict { filename, .. } => filename,
        }
    }
}

/// Resolve every file of three snapshots.
///
/// Files where both sides agree, or only the current side changed, need
/// no action and are left out.
pub fn plan_merge(split: &FileState, current: &FileState, other: &FileState) -> Vec<MergeAction> {
    let filenames: BTreeSet<&String> = split
        .keys()
        .chain(current.keys())
        .chain(other.keys())
        .collect();

    let mut actions = Vec::new();
    for filename in filenames {
        let s = split.get(filename);
        let c = current.get(filename);
        let o = other.get(filename);

        if c == o || s == o {
            continue;
        }
        if s == c {
            actions.push(match o {
                Some(blob) => MergeAction::Take {
                    filename: filename.clone(),
                    blob: blob.clone(),
                },
                None => MergeAction::Remove {
                    filename: filename.clone(),
                },
            });
        } else {
            actions.push(MergeAction::Conflict {
                filename: filename.clone(),
                current: c.cloned(),
                other: o.cloned(),
            });
        }
    }
    actions
}

/// The content written for a conflicted file.
pub fn conflict_content(current: &[u8], other: &[u8]) -> Vec<u8> {
    let mut content = Vec::with_capacity(current.len() + other.len() + 32);
    content.extend_from_slice(b"<<<<<<< HEAD\n");
    content.extend_from_slice(current);
    content.extend_from_slice(b"=======\n");
    content.extend_from_slice(other);
    content.extend_from_slice(b">>>>>>>\n");
    content
}

/// Merge branch `other` into the current branch.
pub fn merge(
    repo: &Repository,
    session: &mut Session,
    other: &str,
) -> Result<MergeOutcome, TwigError> {
    if other == session.current_branch().as_str() {
        return Err(TwigError::MergeWithSelf);
    }
    let other_name = BranchName::new(other).map_err(|_| TwigError::BranchNotFound)?;
    let other_branch = repo
        .refs()
        .branch(&other_name)?
        .ok_or(TwigError::BranchNotFound)?;

    let current_tip = session.head_commit().clone();
    let other_tip = other_branch.commit.clone();
    let split = repo
        .graph()
        .split_point(&current_tip, &other_tip)?
        .ok_or(TwigError::NoSplitPoint)?;
    debug!(%split, current = %current_tip, other = %other_tip, "computed split point");

    if split == other_tip {
        return Ok(MergeOutcome::AlreadyAncestor);
    }
    if split == current_tip {
        checkout_branch(repo, session, other)?;
        return Ok(MergeOutcome::FastForwarded);
    }
    if !session.stage().is_empty() {
        return Err(TwigError::UncommittedChanges);
    }

    let objects = repo.objects();
    let split_commit = objects.get_commit(&split)?;
    let current_commit = objects.get_commit(&current_tip)?;
    let other_commit = objects.get_commit(&other_tip)?;
    let actions = plan_merge(
        split_commit.state(),
        current_commit.state(),
        other_commit.state(),
    );

    guard_untracked(repo, session, &current_commit, &actions)?;
    let writes = materialize(repo, &actions)?;

    let worktree = repo.worktree();
    let mut conflicted = false;
    for (action, content) in actions.iter().zip(writes) {
        let filename = action.filename();
        match (action, content) {
            (MergeAction::Take { blob, .. }, Some(content)) => {
                worktree.write(filename, &content)?;
                session.stage_mut().stage_addition(filename, blob.clone());
            }
            (MergeAction::Conflict { .. }, Some(content)) => {
                let blob = objects.put_blob(filename, &content)?;
                worktree.write(filename, &content)?;
                session.stage_mut().stage_addition(filename, blob);
                conflicted = true;
                debug!(filename, "wrote conflict markers");
            }
            _ => {
                session.stage_mut().stage_removal(filename);
                worktree.delete(filename)?;
            }
        }
    }

    let message = format!(
        "Merged {} into {}.",
        other_name,
        session.current_branch()
    );
    let commit = commit_snapshot(repo, session, &message, Some(other_tip))?;
    Ok(MergeOutcome::Merged {
        commit: commit.id().clone(),
        conflicted,
    })
}

/// Abort if an action would clobber a file that Head does not track.
fn guard_untracked(
    repo: &Repository,
    session: &Session,
    head: &Commit,
    actions: &[MergeAction],
) -> Result<(), TwigError> {
    let worktree = repo.worktree();
    for action in actions {
        let filename = action.filename();
        let untracked = !head.state().contains_key(filename)
            && !session.stage().is_staged_for_addition(filename);
        if untracked && worktree.contains(filename)? {
            debug!(filename, "untracked file blocks merge");
            return Err(TwigError::UntrackedFileInTheWay);
        }
    }
    Ok(())
}

/// Load the content each action writes, `None` for removals.
fn materialize(
    repo: &Repository,
    actions: &[MergeAction],
) -> Result<Vec<Option<Vec<u8>>>, TwigError> {
    let objects = repo.objects();
    let read = |blob: &Option<ObjectId>| -> Result<Vec<u8>, TwigError> {
        match blob {
            Some(id) => Ok(objects.get_blob(id)?.content().to_vec()),
            None => Ok(Vec::new()),
        }
    };

    actions
        .iter()
        .map(|action| -> Result<Option<Vec<u8>>, TwigError> {
            match action {
                MergeAction::Take { blob, .. } => {
                    Ok(Some(objects.get_blob(blob)?.content().to_vec()))
                }
                MergeAction::Remove { .. } => Ok(None),
                MergeAction::Conflict { current, other, .. } => {
                    Ok(Some(conflict_content(&read(current)?, &read(other)?)))
                }
            }
        })
        .collect()
}

impl Repository {
    /// Merge a branch into the current one. See [`merge`].
    pub fn merge(&self, other: &str) -> Result<MergeOutcome, TwigError> {
        self.run(|repo, session| merge(repo, session, other))
    }
}
