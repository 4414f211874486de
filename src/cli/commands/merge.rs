//! merge command - Merge a branch into the current branch

use super::{open, verbosity};
use crate::engine::{Context, MergeOutcome};
use crate::ui::output;
use anyhow::Result;

/// Merge `branch` into the current branch and report the outcome.
pub fn merge(ctx: &Context, branch: &str) -> Result<()> {
    let outcome = open(ctx)?.merge(branch)?;
    let verbosity = verbosity(ctx);
    match outcome {
        MergeOutcome::AlreadyAncestor => {
            output::print("Given branch is an ancestor of the current branch.", verbosity)
        }
        MergeOutcome::FastForwarded => output::print("Current branch fast-forwarded.", verbosity),
        MergeOutcome::Merged { conflicted, .. } => {
            if conflicted {
                output::print("Encountered a merge conflict.", verbosity);
            }
        }
    }
    Ok(())
}
