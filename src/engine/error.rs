//! engine::error
//!
//! The user-facing error taxonomy.
//!
//! Every variant's message is the exact sentence shown to the user. Each
//! variant belongs to one [`ErrorKind`]; no kind other than
//! [`ErrorKind::Internal`] is ever raised after a destructive working-tree
//! change has begun.

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::storage::StorageError;
use crate::core::store::StoreError;
use crate::core::types::TypeError;

/// Classification of a [`TwigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or blank operand.
    UserInput,
    /// Unresolvable commit, branch, or file.
    NotFound,
    /// The repository state forbids the operation.
    StateConflict,
    /// Repository initialized (or not) contrary to what the command needs.
    Configuration,
    /// Storage or record corruption.
    Internal,
}

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum TwigError {
    #[error("Please enter a commit message.")]
    BlankMessage,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("File does not exist.")]
    FileNotFound,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Commit id prefix '{prefix}' is ambiguous ({matches} matches).")]
    AmbiguousCommitId { prefix: String, matches: usize },

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Given branches share no common ancestor.")]
    NoSplitPoint,

    #[error("A Twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized Twig directory.")]
    NotInitialized,

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(StorageError),

    #[error("{0}")]
    Store(StoreError),
}

impl TwigError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankMessage | Self::InvalidBranchName(_) | Self::InvalidFileName(_) => {
                ErrorKind::UserInput
            }
            Self::FileNotFound
            | Self::NoSuchCommit
            | Self::AmbiguousCommitId { .. }
            | Self::FileNotInCommit
            | Self::NoSuchBranch
            | Self::BranchNotFound
            | Self::NoCommitWithMessage => ErrorKind::NotFound,
            Self::NothingToRemove
            | Self::NothingToCommit
            | Self::UntrackedFileInTheWay
            | Self::UncommittedChanges
            | Self::MergeWithSelf
            | Self::BranchExists
            | Self::RemoveCurrentBranch
            | Self::AlreadyOnBranch
            | Self::NoSplitPoint => ErrorKind::StateConflict,
            Self::AlreadyInitialized | Self::NotInitialized | Self::Config(_) => {
                ErrorKind::Configuration
            }
            Self::Storage(_) | Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StorageError> for TwigError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName(name) => Self::InvalidFileName(name),
            other => Self::Storage(other),
        }
    }
}

impl From<StoreError> for TwigError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CommitNotFound(_) => Self::NoSuchCommit,
            StoreError::AmbiguousPrefix { prefix, matches } => {
                Self::AmbiguousCommitId { prefix, matches }
            }
            StoreError::Storage(inner) => inner.into(),
            other => Self::Store(other),
        }
    }
}

impl From<TypeError> for TwigError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidBranchName(msg) => Self::InvalidBranchName(msg),
            TypeError::InvalidObjectId(_) => Self::NoSuchCommit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_sentences() {
        assert_eq!(
            TwigError::UntrackedFileInTheWay.to_string(),
            "There is an untracked file in the way; delete it, or add and commit it first."
        );
        assert_eq!(
            TwigError::AmbiguousCommitId {
                prefix: "ab".into(),
                matches: 3
            }
            .to_string(),
            "Commit id prefix 'ab' is ambiguous (3 matches)."
        );
    }

    #[test]
    fn store_errors_map_to_taxonomy() {
        let err: TwigError = StoreError::CommitNotFound("abc".into()).into();
        assert!(matches!(err, TwigError::NoSuchCommit));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: TwigError = StoreError::Corrupt("abc".into()).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn invalid_name_is_user_input() {
        let err: TwigError = StorageError::InvalidName("a/b".into()).into();
        assert!(matches!(err, TwigError::InvalidFileName(_)));
        assert_eq!(err.kind(), ErrorKind::UserInput);
    }

    #[test]
    fn kinds() {
        assert_eq!(TwigError::BlankMessage.kind(), ErrorKind::UserInput);
        assert_eq!(TwigError::UncommittedChanges.kind(), ErrorKind::StateConflict);
        assert_eq!(TwigError::NotInitialized.kind(), ErrorKind::Configuration);
    }
}
