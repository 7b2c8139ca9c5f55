use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::{assertions, fixtures::*, repository::*};

#[cfg(test)]
mod show_command_tests {
    use super::*;

    #[test]
    fn test_show_head_card() -> anyhow::Result<()> {
        let repo = create_history_repo(2)?;

        let mut cmd = Command::cargo_bin("git-alias")?;
        cmd.arg("show")
            .current_dir(repo.path())
            .assert()
            .success()
            .stdout(assertions::has_card_header())
            .stdout(predicate::str::contains("Test User"))
            .stdout(predicate::str::contains("Commit number 1"))
            .stdout(predicate::str::contains("file1.txt"))
            .stdout(predicate::str::contains("1 file changed"))
            .stdout(predicate::str::contains("Branches:"))
            .stdout(predicate::str::contains("main"));

        Ok(())
    }

    #[test]
    fn test_show_older_revision() -> anyhow::Result<()> {
        let repo = create_history_repo(3)?;

        let mut cmd = Command::cargo_bin("git-alias")?;
        cmd.args(["show", "HEAD~2"])
            .current_dir(repo.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Commit number 0"))
            .stdout(predicate::str::contains("Commit number 2").not());

        Ok(())
    }

    #[test]
    fn test_show_unknown_revision() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        let mut cmd = Command::cargo_bin("git-alias")?;
        cmd.args(["show", "no-such-rev"])
            .current_dir(repo.path())
            .assert()
            .failure()
            .stdout(predicate::str::contains("git show failed"));

        Ok(())
    }
}
