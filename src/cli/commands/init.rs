//! init command - Create a repository in the working directory

use crate::engine::{Context, Repository};
use anyhow::{Context as _, Result};

/// Create a repository in the working directory.
pub fn init(ctx: &Context) -> Result<()> {
    let dir = ctx
        .work_dir()
        .context("failed to determine the working directory")?;
    Repository::init_at(&dir)?;
    Ok(())
}
