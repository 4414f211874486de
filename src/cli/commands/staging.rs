//! add, commit, rm commands - Build and record snapshots

use super::open;
use crate::engine::Context;
use anyhow::Result;
use tracing::debug;

/// Stage a file.
pub fn add(ctx: &Context, file: &str) -> Result<()> {
    open(ctx)?.add(file)?;
    Ok(())
}

/// Commit the stage.
pub fn commit(ctx: &Context, message: &str) -> Result<()> {
    let commit = open(ctx)?.commit(message)?;
    debug!(id = %commit.id(), "committed");
    Ok(())
}

/// Unstage or remove a file.
pub fn rm(ctx: &Context, file: &str) -> Result<()> {
    open(ctx)?.remove(file)?;
    Ok(())
}
