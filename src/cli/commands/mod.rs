//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository for the context's working directory
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! Handlers do NOT perform repository mutations directly.

mod branch;
mod checkout;
mod completion;
mod init;
mod log_cmd;
mod merge;
mod staging;
mod status;

// Re-export command functions for testing and direct invocation
pub use branch::{branch, rm_branch};
pub use checkout::{checkout, reset};
pub use completion::completion;
pub use init::init;
pub use log_cmd::{find, global_log, log};
pub use merge::merge;
pub use staging::{add, commit, rm};
pub use status::status;

use crate::cli::args::Command;
use crate::engine::{Context, Repository};
use crate::ui::output::Verbosity;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init => init(ctx),
        Command::Add { file } => add(ctx, &file),
        Command::Commit { message } => commit(ctx, &message),
        Command::Rm { file } => rm(ctx, &file),
        Command::Log => log(ctx),
        Command::GlobalLog => global_log(ctx),
        Command::Find { message } => find(ctx, &message),
        Command::Status => status(ctx),
        Command::Checkout { target, file } => checkout(ctx, target.as_deref(), file.as_deref()),
        Command::Branch { name } => branch(ctx, &name),
        Command::RmBranch { name } => rm_branch(ctx, &name),
        Command::Reset { commit } => reset(ctx, &commit),
        Command::Merge { branch } => merge(ctx, &branch),
        Command::Completion { shell } => completion(shell),
    }
}

/// Open the repository in the context's working directory.
pub(crate) fn open(ctx: &Context) -> Result<Repository> {
    let dir = ctx
        .work_dir()
        .context("failed to determine the working directory")?;
    Ok(Repository::open_at(&dir)?)
}

pub(crate) fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.debug)
}
