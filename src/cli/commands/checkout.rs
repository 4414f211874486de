//! checkout, reset commands - Update the working tree from a commit

use super::open;
use crate::engine::Context;
use anyhow::{bail, Result};

/// Restore a file or switch branches, depending on the operands.
///
/// * `checkout -- <file>` restores from the current commit
/// * `checkout <commit> -- <file>` restores from another commit
/// * `checkout <branch>` switches branches
pub fn checkout(ctx: &Context, target: Option<&str>, file: Option<&str>) -> Result<()> {
    let repo = open(ctx)?;
    match (target, file) {
        (commit, Some(file)) => repo.checkout_file(commit, file)?,
        (Some(branch), None) => repo.checkout_branch(branch)?,
        (None, None) => bail!("Incorrect operands."),
    }
    Ok(())
}

/// Check out a commit and move the current branch to it.
pub fn reset(ctx: &Context, commit: &str) -> Result<()> {
    open(ctx)?.reset(commit)?;
    Ok(())
}
