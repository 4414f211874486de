//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//! - [`logging`] - Diagnostic logging setup
//!
//! # Design
//!
//! User-facing text goes through [`output`] and respects `--quiet`.
//! Diagnostics go through `tracing` and are configured by [`logging`];
//! the two never mix.

pub mod logging;
pub mod output;
