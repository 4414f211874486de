//! core
//!
//! Core domain types, persisted records, and the commit graph for Twig.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ObjectId, BranchName, Timestamp
//! - [`paths`] - Storage keys and the on-disk layout under `.twig/`
//! - [`config`] - Configuration schema and loading
//! - [`storage`] - Keyed record storage (file-backed and in-memory)
//! - [`worktree`] - The versioned working directory
//! - [`objects`] - Blob and Commit records
//! - [`store`] - Content-addressed object store
//! - [`graph`] - Commit graph traversal and split points
//! - [`stage`] - The staging area
//! - [`refs`] - Head and branch references
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Objects are immutable and addressed by the hash of their fields
//! - Every persisted structure goes through an injectable [`storage::Storage`]

pub mod config;
pub mod graph;
pub mod objects;
pub mod paths;
pub mod refs;
pub mod stage;
pub mod storage;
pub mod store;
pub mod types;
pub mod worktree;
