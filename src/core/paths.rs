//! core::paths
//!
//! Centralized routing for Twig storage locations.
//!
//! # Storage Layout
//!
//! All repository data lives under `<work_dir>/.twig/`:
//! - `HEAD` - The single Head record
//! - `branches/<name>` - One Branch record per branch
//! - `commits/<id>` - One Commit record per commit
//! - `blobs/<id>` - One Blob record per blob
//! - `stage_addition` - Serialized add-map
//! - `stage_removal` - Serialized remove-set
//! - `config.toml` - Repository configuration
//!
//! Records are addressed by *keys*: paths relative to the `.twig/`
//! directory using `/` as separator. Storage backends map keys to their own
//! locations; no code outside this module should spell out a key.
//!
//! # Example
//!
//! ```
//! use twig::core::paths::{self, RepoPaths};
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::new(PathBuf::from("/work"));
//! assert_eq!(paths.twig_dir(), PathBuf::from("/work/.twig"));
//! assert_eq!(paths::HEAD, "HEAD");
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::{BranchName, ObjectId};

/// Name of the metadata directory inside the working directory.
pub const TWIG_DIR: &str = ".twig";

/// Key of the Head record.
pub const HEAD: &str = "HEAD";

/// Directory holding branch records.
pub const BRANCHES_DIR: &str = "branches";

/// Directory holding commit records.
pub const COMMITS_DIR: &str = "commits";

/// Directory holding blob records.
pub const BLOBS_DIR: &str = "blobs";

/// Key of the serialized add-map.
pub const STAGE_ADDITION: &str = "stage_addition";

/// Key of the serialized remove-set.
pub const STAGE_REMOVAL: &str = "stage_removal";

/// Key of the repository configuration file.
pub const REPO_CONFIG: &str = "config.toml";

/// Key of a branch record.
pub fn branch_key(name: &BranchName) -> String {
    format!("{}/{}", BRANCHES_DIR, name)
}

/// Key of a commit record.
pub fn commit_key(id: &ObjectId) -> String {
    format!("{}/{}", COMMITS_DIR, id)
}

/// Key of a blob record.
pub fn blob_key(id: &ObjectId) -> String {
    format!("{}/{}", BLOBS_DIR, id)
}

/// Filesystem locations of a repository on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    work_dir: PathBuf,
}

impl RepoPaths {
    /// Create the paths for a repository rooted at `work_dir`.
    pub fn new(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    /// The working directory whose files are versioned.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The metadata directory, `<work_dir>/.twig`.
    pub fn twig_dir(&self) -> PathBuf {
        self.work_dir.join(TWIG_DIR)
    }

    /// Check whether the metadata directory exists.
    pub fn is_initialized(&self) -> bool {
        self.twig_dir().is_dir()
    }
}
