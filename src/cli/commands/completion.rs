//! completion command - Print a shell completion script for twig

use std::io::{self, Write};

use crate::cli::args::{Cli, Shell};
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells, Generator};

/// Print the completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let mut out = io::stdout().lock();
    write_script(shell, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_script(shell: Shell, out: &mut dyn Write) -> io::Result<()> {
    match shell {
        Shell::Bash => render(shells::Bash, out),
        Shell::Zsh => render(shells::Zsh, out),
        Shell::Fish => render(shells::Fish, out),
        Shell::PowerShell => render(shells::PowerShell, out),
    }
    Ok(())
}

fn render(generator: impl Generator, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(generator, &mut cmd, bin, out);
}
