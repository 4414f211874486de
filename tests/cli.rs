//! Binary-level tests for the `twig` command.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `twig` command running in `dir`, isolated from any user config.
fn twig(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("twig").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir.join("no-home"))
        .env_remove("TWIG_CONFIG")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("TWIG_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    twig(dir.path()).arg("init").assert().success();
    dir
}

fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    fs::write(dir.join(name), content).unwrap();
    twig(dir).args(["add", name]).assert().success();
    twig(dir).args(["commit", message]).assert().success();
}

fn head_id(dir: &Path) -> String {
    let out = twig(dir).arg("log").output().unwrap();
    let text = String::from_utf8(out.stdout).unwrap();
    text.lines()
        .find_map(|line| line.strip_prefix("commit "))
        .unwrap()
        .to_string()
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    twig(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("global-log"))
        .stdout(predicate::str::contains("rm-branch"));
}

#[test]
fn init_twice_fails() {
    let dir = initialized();
    twig(dir.path())
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "A Twig version-control system already exists in the current directory.",
        ));
}

#[test]
fn commands_outside_a_repository_fail() {
    let dir = TempDir::new().unwrap();
    twig(dir.path())
        .arg("status")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "error: Not in an initialized Twig directory.",
        ));
}

#[test]
fn cwd_flag_selects_the_repository() {
    let dir = initialized();
    let elsewhere = TempDir::new().unwrap();
    twig(elsewhere.path())
        .arg("--cwd")
        .arg(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*master\n"));
}

#[test]
fn log_of_fresh_repository() {
    let dir = initialized();
    twig(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("===\ncommit "))
        .stdout(predicate::str::contains(
            "Date: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n",
        ));
}

#[test]
fn status_after_staging() {
    let dir = initialized();
    commit_file(dir.path(), "kept.txt", "k", "base");
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    twig(dir.path()).args(["add", "b.txt"]).assert().success();
    twig(dir.path()).args(["add", "a.txt"]).assert().success();
    twig(dir.path()).args(["rm", "kept.txt"]).assert().success();
    fs::write(dir.path().join("loose.txt"), "l").unwrap();

    twig(dir.path()).arg("status").assert().success().stdout(
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\na.txt\nb.txt\n\n\
         === Removed Files ===\nkept.txt\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\nloose.txt\n",
    );
}

#[test]
fn user_errors_exit_nonzero() {
    let dir = initialized();
    twig(dir.path())
        .args(["add", "missing.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File does not exist."));
    twig(dir.path())
        .args(["commit", "nothing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No changes added to the commit."));
    twig(dir.path())
        .args(["rm", "ghost.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No reason to remove the file."));
    twig(dir.path())
        .args(["find", "no such message"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Found no commit with that message."));
}

#[test]
fn debug_log_names_the_error_kind() {
    let dir = initialized();
    twig(dir.path())
        .env("TWIG_LOG", "twig=debug")
        .args(["commit", "nothing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("StateConflict"))
        .stderr(predicate::str::contains("No changes added to the commit."));
    twig(dir.path())
        .env("TWIG_LOG", "twig=debug")
        .args(["add", "missing.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NotFound"));
}

#[test]
fn missing_operands_are_rejected() {
    let dir = initialized();
    twig(dir.path()).arg("commit").assert().failure();
    twig(dir.path())
        .arg("checkout")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Incorrect operands."));
}

#[test]
fn checkout_forms() {
    let dir = initialized();
    commit_file(dir.path(), "a.txt", "x", "first");
    let first = head_id(dir.path());
    commit_file(dir.path(), "a.txt", "y", "second");

    twig(dir.path())
        .args(["checkout", &first[..10], "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "x");

    twig(dir.path())
        .args(["checkout", "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "y");

    twig(dir.path()).args(["branch", "feature"]).assert().success();
    twig(dir.path())
        .args(["checkout", "feature"])
        .assert()
        .success();
    twig(dir.path())
        .args(["checkout", "feature"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No need to checkout the current branch.",
        ));
    twig(dir.path())
        .args(["checkout", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No such branch exists."));
}

#[test]
fn find_prints_matching_ids() {
    let dir = initialized();
    commit_file(dir.path(), "a.txt", "1", "tagged");
    let id = head_id(dir.path());
    twig(dir.path())
        .args(["find", "tagged"])
        .assert()
        .success()
        .stdout(format!("{}\n", id));
}

#[test]
fn merge_messages() {
    let dir = initialized();
    let path = dir.path();
    commit_file(path, "a.txt", "base\n", "base");
    twig(path).args(["branch", "feature"]).assert().success();

    twig(path)
        .args(["merge", "feature"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");
    twig(path)
        .args(["merge", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot merge a branch with itself."));

    commit_file(path, "a.txt", "ours\n", "master edit");
    twig(path).args(["checkout", "feature"]).assert().success();
    commit_file(path, "a.txt", "theirs\n", "feature edit");
    twig(path).args(["checkout", "master"]).assert().success();

    twig(path)
        .args(["merge", "feature"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");
    twig(path)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge: "))
        .stdout(predicate::str::contains("Merged feature into master."));
}

#[test]
fn merge_fast_forward_message() {
    let dir = initialized();
    let path = dir.path();
    twig(path).args(["branch", "feature"]).assert().success();
    commit_file(path, "a.txt", "1", "on master");
    twig(path).args(["checkout", "feature"]).assert().success();

    twig(path)
        .args(["merge", "master"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");
}

#[test]
fn quiet_suppresses_output() {
    let dir = initialized();
    twig(dir.path())
        .args(["-q", "log"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn repo_config_controls_log_dates() {
    let dir = initialized();
    fs::write(
        dir.path().join(".twig/config.toml"),
        "[log]\ndate_format = \"%Y-%m-%d\"\n",
    )
    .unwrap();
    twig(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Date: 1970-01-01\n"));
}

#[test]
fn global_config_names_the_default_branch() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("global.toml");
    fs::write(&config, "default_branch = \"trunk\"\n").unwrap();
    let repo = dir.path().join("repo");
    fs::create_dir(&repo).unwrap();

    twig(&repo)
        .env("TWIG_CONFIG", &config)
        .arg("init")
        .assert()
        .success();
    twig(&repo)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*trunk\n"));
}

#[test]
fn completion_script() {
    let dir = TempDir::new().unwrap();
    twig(dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("twig"));
}
