//! engine::repo
//!
//! A repository: injected record storage, a working tree, and config.
//!
//! # Example
//!
//! ```
//! use twig::engine::Repository;
//!
//! let repo = Repository::in_memory();
//! repo.initialize().unwrap();
//! repo.worktree().write("a.txt", b"x").unwrap();
//! repo.add("a.txt").unwrap();
//! let commit = repo.commit("first").unwrap();
//! assert_eq!(repo.head_commit().unwrap(), commit);
//! ```

use std::path::Path;

use tracing::debug;

use super::error::TwigError;
use super::session::Session;
use crate::core::config::Config;
use crate::core::graph::CommitGraph;
use crate::core::objects::Commit;
use crate::core::paths::RepoPaths;
use crate::core::refs::{Branch, Head, RefStore};
use crate::core::stage::Stage;
use crate::core::storage::{FileStorage, MemoryStorage, Storage};
use crate::core::store::ObjectStore;
use crate::core::types::BranchName;
use crate::core::worktree::{DiskWorkTree, MemoryWorkTree, WorkTree};

/// A Twig repository.
pub struct Repository {
    storage: Box<dyn Storage>,
    worktree: Box<dyn WorkTree>,
    config: Config,
}

impl Repository {
    /// Assemble a repository from its parts.
    pub fn new(storage: Box<dyn Storage>, worktree: Box<dyn WorkTree>, config: Config) -> Self {
        Self {
            storage,
            worktree,
            config,
        }
    }

    /// A repository held entirely in memory, with default config.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStorage::new()),
            Box::new(MemoryWorkTree::new()),
            Config::default(),
        )
    }

    /// Create a new repository in `work_dir`.
    ///
    /// # Errors
    ///
    /// [`TwigError::AlreadyInitialized`] if `work_dir/.twig` exists.
    pub fn init_at(work_dir: &Path) -> Result<Self, TwigError> {
        let paths = RepoPaths::new(work_dir.to_path_buf());
        if paths.twig_dir().exists() {
            return Err(TwigError::AlreadyInitialized);
        }
        let config = Config::load(None)?;
        let repo = Self::new(
            Box::new(FileStorage::new(paths.twig_dir())),
            Box::new(DiskWorkTree::new(paths.work_dir().to_path_buf())),
            config,
        );
        repo.initialize()?;
        Ok(repo)
    }

    /// Open the repository in `work_dir`.
    ///
    /// # Errors
    ///
    /// [`TwigError::NotInitialized`] if `work_dir/.twig` is missing.
    pub fn open_at(work_dir: &Path) -> Result<Self, TwigError> {
        let paths = RepoPaths::new(work_dir.to_path_buf());
        if !paths.is_initialized() {
            return Err(TwigError::NotInitialized);
        }
        let storage = FileStorage::new(paths.twig_dir());
        let config = Config::load(Some(&storage))?;
        Ok(Self::new(
            Box::new(storage),
            Box::new(DiskWorkTree::new(paths.work_dir().to_path_buf())),
            config,
        ))
    }

    /// Write the initial commit, the default branch, Head, an empty stage,
    /// and the repo config.
    pub fn initialize(&self) -> Result<(), TwigError> {
        let refs = self.refs();
        if refs.head()?.is_some() {
            return Err(TwigError::AlreadyInitialized);
        }

        let branch_name = BranchName::new(self.config.default_branch())?;
        let initial = Commit::initial();
        self.objects().put_commit(&initial)?;

        refs.set_branch(&Branch {
            name: branch_name.clone(),
            commit: initial.id().clone(),
        })?;
        refs.set_head(&Head {
            branch: branch_name.clone(),
            commit: initial.id().clone(),
        })?;
        Stage::new().save(self.storage())?;
        Config::write_repo(self.storage(), &self.config.initial_repo_config())?;

        debug!(branch = %branch_name, commit = %initial.id(), "initialized repository");
        Ok(())
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn worktree(&self) -> &dyn WorkTree {
        self.worktree.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn objects(&self) -> ObjectStore<'_> {
        ObjectStore::new(self.storage())
    }

    pub fn graph(&self) -> CommitGraph<'_> {
        CommitGraph::new(self.objects())
    }

    pub fn refs(&self) -> RefStore<'_> {
        RefStore::new(self.storage())
    }

    /// Load a fresh session.
    pub fn session(&self) -> Result<Session, TwigError> {
        Session::load(self.storage())
    }

    /// Run `op` against a loaded session, flushing it if `op` succeeds.
    ///
    /// A failed operation leaves every reference and the stage as they
    /// were loaded.
    pub fn run<T>(
        &self,
        op: impl FnOnce(&Self, &mut Session) -> Result<T, TwigError>,
    ) -> Result<T, TwigError> {
        let mut session = self.session()?;
        let output = op(self, &mut session)?;
        session.flush(self.storage())?;
        Ok(output)
    }

    /// The commit Head points at.
    pub fn head_commit(&self) -> Result<Commit, TwigError> {
        let session = self.session()?;
        Ok(self.objects().get_commit(session.head_commit())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RepoConfig;
    use crate::core::objects::INITIAL_COMMIT_MESSAGE;
    use tempfile::TempDir;

    #[test]
    fn initialize_writes_root_state() {
        let repo = Repository::in_memory();
        repo.initialize().unwrap();

        let head = repo.refs().head().unwrap().unwrap();
        assert_eq!(head.branch.as_str(), "master");
        assert_eq!(&head.commit, Commit::initial().id());

        let commit = repo.head_commit().unwrap();
        assert_eq!(commit.message(), INITIAL_COMMIT_MESSAGE);
        assert!(commit.state().is_empty());
        assert!(repo.session().unwrap().stage().is_empty());
    }

    #[test]
    fn initialize_twice_fails() {
        let repo = Repository::in_memory();
        repo.initialize().unwrap();
        assert!(matches!(
            repo.initialize(),
            Err(TwigError::AlreadyInitialized)
        ));
    }

    #[test]
    fn configured_default_branch() {
        let config = Config {
            repo: Some(RepoConfig {
                default_branch: Some("main".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let repo = Repository::new(
            Box::new(MemoryStorage::new()),
            Box::new(MemoryWorkTree::new()),
            config,
        );
        repo.initialize().unwrap();
        assert_eq!(repo.session().unwrap().current_branch().as_str(), "main");
    }

    #[test]
    fn uninitialized_operations_fail() {
        let repo = Repository::in_memory();
        assert!(matches!(repo.session(), Err(TwigError::NotInitialized)));
    }

    #[test]
    fn disk_init_and_open() {
        let temp = TempDir::new().unwrap();
        Repository::init_at(temp.path()).unwrap();
        assert!(temp.path().join(".twig/HEAD").is_file());
        assert!(temp.path().join(".twig/config.toml").is_file());

        assert!(matches!(
            Repository::init_at(temp.path()),
            Err(TwigError::AlreadyInitialized)
        ));

        let repo = Repository::open_at(temp.path()).unwrap();
        assert_eq!(repo.head_commit().unwrap().id(), Commit::initial().id());
    }

    #[test]
    fn open_uninitialized_fails() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            Repository::open_at(temp.path()),
            Err(TwigError::NotInitialized)
        ));
    }

    #[test]
    fn failed_operation_is_not_flushed() {
        let repo = Repository::in_memory();
        repo.initialize().unwrap();
        let result: Result<(), TwigError> = repo.run(|_, session| {
            session.clear_stage();
            session.advance(crate::core::types::ObjectId::digest(&[b"x"]));
            Err(TwigError::NothingToCommit)
        });
        assert!(result.is_err());
        assert_eq!(&repo.refs().head().unwrap().unwrap().commit, Commit::initial().id());
    }
}
