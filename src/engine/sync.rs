//! engine::sync
//!
//! Reconciling the working tree with a commit's snapshot.
//!
//! # Safety Ordering
//!
//! Branch checkout and reset share [`replace_working_tree`], which runs in
//! three phases:
//!
//! 1. Load every blob of the target snapshot. A missing blob fails here.
//! 2. Scan for untracked files. Any file in the working tree that is in
//!    neither the head commit's snapshot nor the add-map aborts the
//!    operation.
//! 3. Delete every working file, then write the target snapshot.
//!
//! Nothing touches the working tree before phase 3, and phase 3 cannot
//! fail for lack of data.

use tracing::debug;

use super::error::TwigError;
use super::repo::Repository;
use super::session::Session;
use crate::core::objects::Commit;
use crate::core::types::BranchName;

/// Restore `filename` from a commit (Head when `commit` is `None`).
///
/// Neither Head nor the stage changes.
pub fn checkout_file(
    repo: &Repository,
    session: &Session,
    commit: Option<&str>,
    filename: &str,
) -> Result<(), TwigError> {
    let objects = repo.objects();
    let source = match commit {
        Some(id) => objects.resolve_commit(id)?,
        None => objects.get_commit(session.head_commit())?,
    };
    let blob_id = source
        .state()
        .get(filename)
        .ok_or(TwigError::FileNotInCommit)?;
    let blob = objects.get_blob(blob_id)?;

    debug!(filename, commit = %source.id(), "restoring file");
    repo.worktree().write(filename, blob.content())?;
    Ok(())
}

/// Switch to branch `name`, replacing the working tree with its tip.
pub fn checkout_branch(
    repo: &Repository,
    session: &mut Session,
    name: &str,
) -> Result<(), TwigError> {
    if name == session.current_branch().as_str() {
        return Err(TwigError::AlreadyOnBranch);
    }
    let name = BranchName::new(name).map_err(|_| TwigError::NoSuchBranch)?;
    let branch = repo.refs().branch(&name)?.ok_or(TwigError::NoSuchBranch)?;
    let target = repo.objects().get_commit(&branch.commit)?;

    replace_working_tree(repo, session, &target)?;
    session.switch_to(branch);
    session.clear_stage();
    Ok(())
}

/// Move the current branch to commit `id`, replacing the working tree.
pub fn reset(repo: &Repository, session: &mut Session, id: &str) -> Result<(), TwigError> {
    let target = repo.objects().resolve_commit(id)?;

    replace_working_tree(repo, session, &target)?;
    session.advance(target.id().clone());
    session.clear_stage();
    Ok(())
}

/// Files in the working tree that neither Head nor the add-map knows about.
pub fn untracked_files(repo: &Repository, session: &Session) -> Result<Vec<String>, TwigError> {
    let head = repo.objects().get_commit(session.head_commit())?;
    let files = repo.worktree().files()?;
    Ok(files
        .into_iter()
        .filter(|name| {
            !head.state().contains_key(name) && !session.stage().is_staged_for_addition(name)
        })
        .collect())
}

/// Make the working tree hold exactly `target`'s snapshot.
pub(crate) fn replace_working_tree(
    repo: &Repository,
    session: &Session,
    target: &Commit,
) -> Result<(), TwigError> {
    let objects = repo.objects();
    let contents = target
        .state()
        .iter()
        .map(|(name, id)| -> Result<_, TwigError> { Ok((name.as_str(), objects.get_blob(id)?)) })
        .collect::<Result<Vec<_>, _>>()?;

    let untracked = untracked_files(repo, session)?;
    if let Some(name) = untracked.first() {
        debug!(filename = name.as_str(), "untracked file blocks checkout");
        return Err(TwigError::UntrackedFileInTheWay);
    }

    let worktree = repo.worktree();
    for name in worktree.files()? {
        worktree.delete(&name)?;
    }
    for (name, blob) in &contents {
        worktree.write(name, blob.content())?;
    }
    debug!(commit = %target.id(), files = contents.len(), "materialized snapshot");
    Ok(())
}

impl Repository {
    /// Restore one file. See [`checkout_file`].
    pub fn checkout_file(&self, commit: Option<&str>, filename: &str) -> Result<(), TwigError> {
        self.run(|repo, session| checkout_file(repo, session, commit, filename))
    }

    /// Switch branches. See [`checkout_branch`].
    pub fn checkout_branch(&self, name: &str) -> Result<(), TwigError> {
        self.run(|repo, session| checkout_branch(repo, session, name))
    }

    /// Reset the current branch. See [`reset`].
    pub fn reset(&self, id: &str) -> Result<(), TwigError> {
        self.run(|repo, session| reset(repo, session, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with_commit() -> (Repository, Commit) {
        let repo = Repository::in_memory();
        repo.initialize().unwrap();
        repo.worktree().write("a.txt", b"x").unwrap();
        repo.add("a.txt").unwrap();
        let commit = repo.commit("first").unwrap();
        (repo, commit)
    }

    fn content(repo: &Repository, name: &str) -> Option<Vec<u8>> {
        repo.worktree().read(name).unwrap()
    }

    #[test]
    fn checkout_file_from_older_commit() {
        let (repo, first) = repo_with_commit();
        repo.worktree().write("a.txt", b"y").unwrap();
        repo.add("a.txt").unwrap();
        repo.commit("second").unwrap();

        repo.checkout_file(Some(first.id().as_str()), "a.txt").unwrap();
        assert_eq!(content(&repo, "a.txt"), Some(b"x".to_vec()));
        // Head did not move.
        assert_eq!(repo.head_commit().unwrap().message(), "second");
    }

    #[test]
    fn checkout_file_from_head() {
        let (repo, _) = repo_with_commit();
        repo.worktree().write("a.txt", b"scribble").unwrap();
        repo.checkout_file(None, "a.txt").unwrap();
        assert_eq!(content(&repo, "a.txt"), Some(b"x".to_vec()));
    }

    #[test]
    fn checkout_file_by_short_id() {
        let (repo, first) = repo_with_commit();
        repo.worktree().write("a.txt", b"y").unwrap();
        repo.checkout_file(Some(first.id().short(8)), "a.txt").unwrap();
        assert_eq!(content(&repo, "a.txt"), Some(b"x".to_vec()));
    }

    #[test]
    fn checkout_file_errors() {
        let (repo, first) = repo_with_commit();
        assert!(matches!(
            repo.checkout_file(Some(first.id().as_str()), "missing.txt"),
            Err(TwigError::FileNotInCommit)
        ));
        assert!(matches!(
            repo.checkout_file(Some("0123456789abcdef"), "a.txt"),
            Err(TwigError::NoSuchCommit)
        ));
    }

    #[test]
    fn checkout_branch_switches_snapshot() {
        let (repo, _) = repo_with_commit();
        repo.create_branch("feature").unwrap();

        repo.worktree().write("b.txt", b"b").unwrap();
        repo.add("b.txt").unwrap();
        repo.commit("add b").unwrap();

        repo.checkout_branch("feature").unwrap();
        assert_eq!(repo.session().unwrap().current_branch().as_str(), "feature");
        assert!(content(&repo, "b.txt").is_none());
        assert_eq!(content(&repo, "a.txt"), Some(b"x".to_vec()));

        repo.checkout_branch("master").unwrap();
        assert_eq!(content(&repo, "b.txt"), Some(b"b".to_vec()));
    }

    #[test]
    fn checkout_branch_errors() {
        let (repo, _) = repo_with_commit();
        assert!(matches!(
            repo.checkout_branch("master"),
            Err(TwigError::AlreadyOnBranch)
        ));
        assert!(matches!(
            repo.checkout_branch("nope"),
            Err(TwigError::NoSuchBranch)
        ));
        assert!(matches!(
            repo.checkout_branch("bad/name"),
            Err(TwigError::NoSuchBranch)
        ));
    }

    #[test]
    fn untracked_file_blocks_before_any_deletion() {
        let (repo, _) = repo_with_commit();
        let root = crate::core::objects::Commit::initial();
        repo.worktree().write("stray.txt", b"mine").unwrap();

        assert!(matches!(
            repo.reset(root.id().as_str()),
            Err(TwigError::UntrackedFileInTheWay)
        ));
        assert_eq!(content(&repo, "a.txt"), Some(b"x".to_vec()));
        assert_eq!(content(&repo, "stray.txt"), Some(b"mine".to_vec()));
        assert_eq!(repo.head_commit().unwrap().message(), "first");
    }

    #[test]
    fn staged_new_file_is_not_untracked() {
        let (repo, _) = repo_with_commit();
        repo.worktree().write("new.txt", b"n").unwrap();
        repo.add("new.txt").unwrap();
        let session = repo.session().unwrap();
        assert!(untracked_files(&repo, &session).unwrap().is_empty());
    }

    #[test]
    fn reset_moves_branch_and_clears_stage() {
        let (repo, first) = repo_with_commit();
        repo.worktree().write("a.txt", b"y").unwrap();
        repo.add("a.txt").unwrap();
        repo.commit("second").unwrap();
        repo.worktree().write("b.txt", b"b").unwrap();
        repo.add("b.txt").unwrap();

        repo.reset(first.id().as_str()).unwrap();
        let session = repo.session().unwrap();
        assert_eq!(session.head_commit(), first.id());
        assert_eq!(&session.branch().commit, first.id());
        assert!(session.stage().is_empty());
        assert_eq!(content(&repo, "a.txt"), Some(b"x".to_vec()));
        assert!(content(&repo, "b.txt").is_none());
    }
}
