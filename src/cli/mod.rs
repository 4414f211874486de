//! cli
//!
//! Command-line interface layer for Twig.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT perform repository mutations directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. Every error surfaces through `anyhow`
//! and is printed once by `main`.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine::{self, ErrorKind, TwigError};
use crate::ui::logging;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.debug);

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    let result = commands::dispatch(cli.command, &ctx);
    if let Err(err) = &result {
        report_failure(err);
    }
    result
}

/// The taxonomy bucket of a failed command, if it came from the engine.
pub fn failure_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TwigError>())
        .map(TwigError::kind)
}

fn report_failure(err: &anyhow::Error) {
    match failure_kind(err) {
        Some(ErrorKind::Internal) => {
            tracing::warn!(kind = ?ErrorKind::Internal, "repository records are unreadable");
        }
        Some(kind) => tracing::debug!(kind = ?kind, "command failed"),
        None => tracing::debug!("command rejected before reaching the engine"),
    }
}
