//! Twig - a small content-addressed version-control engine
//!
//! Twig versions a flat working directory: files are captured as
//! content-addressed blobs, snapshots as immutable commits linked by parent
//! ids, and named branches point into the resulting graph. Branches can be
//! checked out, reset, and merged through their most recent common
//! ancestor.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Operations run against a loaded [`engine::Session`]
//! - [`core`] - Domain types, records, storage, and the commit graph
//! - [`ui`] - Output formatting and logging setup
//!
//! # Correctness Invariants
//!
//! Twig maintains the following invariants:
//!
//! 1. Blobs and commits are written once and never modified
//! 2. Identical inputs always hash to identical ids
//! 3. Destructive working-tree updates are preceded by full validation
//! 4. References are flushed only after the objects they point to exist

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
