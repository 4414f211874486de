//! status command - Show branches, the stage, and working-tree changes

use super::{open, verbosity};
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;

/// Print the repository status.
pub fn status(ctx: &Context) -> Result<()> {
    let report = open(ctx)?.status()?;
    output::write(&output::format_status(&report), verbosity(ctx));
    Ok(())
}
