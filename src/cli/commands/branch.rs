//! branch, rm-branch commands - Manage branch pointers

use super::open;
use crate::engine::Context;
use anyhow::Result;

/// Create a branch at the current commit.
pub fn branch(ctx: &Context, name: &str) -> Result<()> {
    open(ctx)?.create_branch(name)?;
    Ok(())
}

/// Delete a branch.
pub fn rm_branch(ctx: &Context, name: &str) -> Result<()> {
    open(ctx)?.remove_branch(name)?;
    Ok(())
}
