//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Errors
//! are always shown, on stderr.

use std::fmt::Display;

use crate::core::objects::Commit;
use crate::engine::StatusReport;

/// Length of an abbreviated commit id on `Merge:` lines.
pub const SHORT_ID_LEN: usize = 7;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print text as-is, without adding a newline (respects quiet mode).
pub fn write(text: &str, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        print!("{}", text);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one `log` entry, without the trailing blank line.
pub fn format_log_entry(commit: &Commit, date_format: &str) -> String {
    let mut lines = vec!["===".to_string(), format!("commit {}", commit.id())];
    if let (Some(p1), Some(p2)) = (commit.parent1(), commit.parent2()) {
        lines.push(format!(
            "Merge: {} {}",
            p1.short(SHORT_ID_LEN),
            p2.short(SHORT_ID_LEN)
        ));
    }
    lines.push(format!("Date: {}", commit.timestamp().format(date_format)));
    lines.push(commit.message().to_string());
    lines.join("\n")
}

/// Format every entry of a log, each followed by a blank line.
pub fn format_log(commits: &[Commit], date_format: &str) -> String {
    commits
        .iter()
        .map(|commit| format!("{}\n\n", format_log_entry(commit, date_format)))
        .collect()
}

/// Format a `status` report.
pub fn format_status(report: &StatusReport) -> String {
    let branches: Vec<String> = report
        .branches
        .iter()
        .map(|name| {
            if name == &report.current_branch {
                format!("*{}", name)
            } else {
                name.to_string()
            }
        })
        .collect();
    let modified: Vec<String> = report
        .modified
        .iter()
        .map(|(name, change)| format!("{} ({})", name, change.label()))
        .collect();

    [
        section("Branches", &branches),
        section("Staged Files", &report.staged),
        section("Removed Files", &report.removed),
        section("Modifications Not Staged For Commit", &modified),
        section("Untracked Files", &report.untracked),
    ]
    .join("\n")
}

fn section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        format!("=== {} ===\n", title)
    } else {
        format!("=== {} ===\n{}\n", title, format_list(items, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_DATE_FORMAT;
    use crate::core::objects::FileState;
    use crate::core::types::{BranchName, ObjectId, Timestamp};
    use crate::engine::FileChange;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn log_entry_for_initial_commit() {
        let commit = Commit::initial();
        assert_eq!(
            format_log_entry(&commit, DEFAULT_DATE_FORMAT),
            format!(
                "===\ncommit {}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit",
                commit.id()
            )
        );
    }

    #[test]
    fn log_entry_for_merge_shows_parents() {
        let p1 = ObjectId::digest(&[b"p1"]);
        let p2 = ObjectId::digest(&[b"p2"]);
        let merge = Commit::new(
            Some(p1.clone()),
            Some(p2.clone()),
            "Merged b into a.",
            Timestamp::epoch(),
            FileState::new(),
        );
        let entry = format_log_entry(&merge, DEFAULT_DATE_FORMAT);
        let lines: Vec<&str> = entry.lines().collect();
        assert_eq!(
            lines[2],
            format!("Merge: {} {}", p1.short(7), p2.short(7))
        );
        assert_eq!(lines[4], "Merged b into a.");
    }

    #[test]
    fn log_entries_separated_by_blank_lines() {
        let commits = vec![Commit::initial(), Commit::initial()];
        let text = format_log(&commits, "%Y");
        assert_eq!(text.matches("===").count(), 2);
        assert!(text.contains("initial commit\n\n===\n"));
        assert!(text.ends_with("initial commit\n\n"));
    }

    #[test]
    fn status_layout() {
        let report = StatusReport {
            current_branch: BranchName::new("master").unwrap(),
            branches: vec![
                BranchName::new("feature").unwrap(),
                BranchName::new("master").unwrap(),
            ],
            staged: vec!["a.txt".into()],
            removed: vec![],
            modified: vec![("b.txt".into(), FileChange::Deleted)],
            untracked: vec!["c.txt".into()],
        };
        assert_eq!(
            format_status(&report),
            "=== Branches ===\nfeature\n*master\n\n\
             === Staged Files ===\na.txt\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\nb.txt (deleted)\n\n\
             === Untracked Files ===\nc.txt\n"
        );
    }
}
