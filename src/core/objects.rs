//! core::objects
//!
//! The immutable objects kept in the object store: blobs and commits.
//!
//! # Content Addressing
//!
//! - A blob's id is `digest(filename, content)`; the same pair always
//!   produces the same id, which is what deduplicates storage.
//! - A commit's id is `digest(state, message, timestamp)` where `state` is
//!   serialized in filename order and the timestamp in its canonical
//!   nanosecond form.
//!
//! Both derivations are pure functions of their inputs, so ids are stable
//! across processes and platforms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{ObjectId, Timestamp};

/// A commit snapshot: filename to blob id, ordered by filename.
pub type FileState = BTreeMap<String, ObjectId>;

/// Message of the root commit written by `init`.
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Stored file content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    id: ObjectId,
    filename: String,
    #[serde(with = "hex::serde")]
    content: Vec<u8>,
}

impl Blob {
    /// Create a blob, computing its id.
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let content = content.into();
        let id = Self::compute_id(&filename, &content);
        Self {
            id,
            filename,
            content,
        }
    }

    /// The id a blob with this filename and content would have.
    pub fn compute_id(filename: &str, content: &[u8]) -> ObjectId {
        ObjectId::digest(&[filename.as_bytes(), content])
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Check that the stored id matches the content.
    pub fn verify(&self) -> bool {
        Self::compute_id(&self.filename, &self.content) == self.id
    }
}

/// A node of the commit graph.
///
/// Commits are never mutated after creation. `parent1` is `None` only for
/// the root commit; `parent2` is set only on merge commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    id: ObjectId,
    parent1: Option<ObjectId>,
    parent2: Option<ObjectId>,
    message: String,
    timestamp: Timestamp,
    state: FileState,
}

impl Commit {
    /// Create a commit, computing its id.
    pub fn new(
        parent1: Option<ObjectId>,
        parent2: Option<ObjectId>,
        message: impl Into<String>,
        timestamp: Timestamp,
        state: FileState,
    ) -> Self {
        let message = message.into();
        let id = Self::compute_id(&state, &message, &timestamp);
        Self {
            id,
            parent1,
            parent2,
            message,
            timestamp,
            state,
        }
    }

    /// The root commit: no parents, empty state, epoch timestamp.
    ///
    /// Every repository's root commit has the same id.
    pub fn initial() -> Self {
        Self::new(
            None,
            None,
            INITIAL_COMMIT_MESSAGE,
            Timestamp::epoch(),
            FileState::new(),
        )
    }

    /// The id a commit with these fields would have.
    pub fn compute_id(state: &FileState, message: &str, timestamp: &Timestamp) -> ObjectId {
        let mut serialized = Vec::new();
        for (filename, blob) in state {
            serialized.extend_from_slice(filename.as_bytes());
            serialized.push(0);
            serialized.extend_from_slice(blob.as_str().as_bytes());
            serialized.push(b'\n');
        }
        ObjectId::digest(&[
            &serialized,
            message.as_bytes(),
            timestamp.canonical().as_bytes(),
        ])
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn parent1(&self) -> Option<&ObjectId> {
        self.parent1.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    /// Both parents, first parent first.
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent1.iter().chain(self.parent2.iter())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// The authoritative snapshot for this commit.
    pub fn state(&self) -> &FileState {
        &self.state
    }

    pub fn is_root(&self) -> bool {
        self.parent1.is_none()
    }

    pub fn is_merge(&self) -> bool {
        self.parent2.is_some()
    }

    /// Check that the stored id matches the fields.
    pub fn verify(&self) -> bool {
        Self::compute_id(&self.state, &self.message, &self.timestamp) == self.id
    }
}
