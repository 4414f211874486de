//! log, global-log, find commands - Inspect commit history

use super::{open, verbosity};
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;

/// Print the current commit's history.
pub fn log(ctx: &Context) -> Result<()> {
    let repo = open(ctx)?;
    let commits = repo.log()?;
    output::write(
        &output::format_log(&commits, repo.config().date_format()),
        verbosity(ctx),
    );
    Ok(())
}

/// Print every commit, sorted by id.
pub fn global_log(ctx: &Context) -> Result<()> {
    let repo = open(ctx)?;
    let commits = repo.global_log()?;
    output::write(
        &output::format_log(&commits, repo.config().date_format()),
        verbosity(ctx),
    );
    Ok(())
}

/// Print the id of every commit with this exact message.
pub fn find(ctx: &Context, message: &str) -> Result<()> {
    let ids = open(ctx)?.find(message)?;
    output::print(output::format_list(&ids, ""), verbosity(ctx));
    Ok(())
}
