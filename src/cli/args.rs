//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Twig - a small content-addressed version-control system
#[derive(Parser, Debug)]
#[command(name = "twig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if twig was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new repository in the current directory
    #[command(
        long_about = "Create a new repository in the current directory.\n\n\
            Writes the initial commit (message \"initial commit\", dated at the \
            Unix epoch), creates the default branch pointing at it, and checks \
            it out. The default branch is \"master\" unless configured with \
            `default_branch`."
    )]
    Init,

    /// Stage a file for the next commit
    Add {
        /// File to stage
        file: String,
    },

    /// Record the staged changes as a new commit
    Commit {
        /// Commit message
        message: String,
    },

    /// Unstage a file, marking it for removal if tracked
    #[command(name = "rm")]
    Rm {
        /// File to remove
        file: String,
    },

    /// Show the history of the current commit
    Log,

    /// Show every commit ever made
    #[command(name = "global-log")]
    GlobalLog,

    /// Print the ids of commits with the given message
    Find {
        /// Exact commit message
        message: String,
    },

    /// Show branches, staged files, and working-tree changes
    Status,

    /// Restore a file or switch branches
    #[command(
        long_about = "Restore a file or switch branches.\n\n\
            The three forms are distinguished by their operands.",
        after_help = "\
EXAMPLES:
    # Restore a file from the current commit
    twig checkout -- notes.txt

    # Restore a file from an earlier commit (an id prefix is enough)
    twig checkout 3f2a91c -- notes.txt

    # Switch to another branch
    twig checkout feature"
    )]
    Checkout {
        /// Commit id (with `-- <file>`) or branch name
        target: Option<String>,

        /// File to restore
        #[arg(last = true)]
        file: Option<String>,
    },

    /// Create a branch at the current commit
    Branch {
        /// Name of the new branch
        name: String,
    },

    /// Delete a branch
    #[command(name = "rm-branch")]
    RmBranch {
        /// Branch to delete
        name: String,
    },

    /// Check out a commit and move the current branch to it
    Reset {
        /// Commit id or unique prefix
        commit: String,
    },

    /// Merge a branch into the current branch
    Merge {
        /// Branch to merge in
        branch: String,
    },

    /// Generate shell completion scripts
    #[command(
        after_help = "\
EXAMPLES:
    # Bash
    twig completion bash > ~/.local/share/bash-completion/completions/twig

    # Zsh
    twig completion zsh > ~/.zfunc/_twig

    # Fish
    twig completion fish > ~/.config/fish/completions/twig.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("twig").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn checkout_forms() {
        match parse(&["checkout", "--", "a.txt"]).command {
            Command::Checkout { target, file } => {
                assert_eq!(target, None);
                assert_eq!(file.as_deref(), Some("a.txt"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse(&["checkout", "abc123", "--", "a.txt"]).command {
            Command::Checkout { target, file } => {
                assert_eq!(target.as_deref(), Some("abc123"));
                assert_eq!(file.as_deref(), Some("a.txt"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse(&["checkout", "feature"]).command {
            Command::Checkout { target, file } => {
                assert_eq!(target.as_deref(), Some("feature"));
                assert_eq!(file, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["status", "--debug", "-q"]);
        assert!(cli.debug);
        assert!(cli.quiet);
    }

    #[test]
    fn hyphenated_names() {
        assert!(matches!(parse(&["global-log"]).command, Command::GlobalLog));
        assert!(matches!(
            parse(&["rm-branch", "x"]).command,
            Command::RmBranch { .. }
        ));
        assert!(matches!(parse(&["rm", "x"]).command, Command::Rm { .. }));
    }

    #[test]
    fn missing_operand_is_rejected() {
        assert!(Cli::try_parse_from(["twig", "commit"]).is_err());
        assert!(Cli::try_parse_from(["twig", "add"]).is_err());
    }
}
