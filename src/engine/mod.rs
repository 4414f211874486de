//! engine
//!
//! The operations of a Twig repository.
//!
//! # Architecture
//!
//! Every top-level operation follows the same lifecycle:
//!
//! ```text
//! Load Session -> Validate -> Write objects -> Mutate working tree -> Flush Session
//! ```
//!
//! 1. **Load**: Head, the current branch, and the stage are read once into
//!    a [`Session`]
//! 2. **Validate**: every check that can fail does so before anything
//!    destructive happens
//! 3. **Write objects**: blobs and commits are write-once and go straight
//!    to storage
//! 4. **Mutate**: the working tree is updated
//! 5. **Flush**: changed references and the stage are written back
//!
//! Each operation is a free function over `(&Repository, &mut Session)`,
//! with a [`Repository`] method that wraps it in [`Repository::run`].
//!
//! # Invariants
//!
//! - A failed operation never flushes its session
//! - Untracked files are never overwritten or deleted
//! - References only point at commits that are already stored

pub mod branch;
pub mod error;
pub mod merge;
pub mod query;
pub mod repo;
pub mod session;
pub mod staging;
pub mod sync;

pub use error::{ErrorKind, TwigError};
pub use merge::{MergeAction, MergeOutcome};
pub use query::{FileChange, StatusReport};
pub use repo::Repository;
pub use session::Session;

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory commands operate in.
    pub fn work_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
