//! Predefined repository scenarios

#![allow(dead_code)]

use super::repository::*;
use git_alias::core::error::Result;

/// Scenario: `count` commits, each touching its own file, the newest tagged
/// `v1.0`. Commit messages are `Commit number <i>`.
pub fn create_history_repo(count: usize) -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    for i in 0..count {
        let name = format!("file{i}.txt");
        create_file(&repo.path, &name, &format!("content {i}\nline 2\n"))?;
        git_add(&repo.path, &name)?;
        git_commit(&repo.path, &format!("Commit number {i}"))?;
    }
    git_tag(&repo.path, "v1.0")?;

    Ok(repo)
}

/// Scenario: one committed file with an unstaged edit that replaces its
/// second line and appends a third.
pub fn create_modified_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "notes.txt", "first\nsecond\n")?;
    git_add(&repo.path, "notes.txt")?;
    git_commit(&repo.path, "Add notes")?;
    create_file(&repo.path, "notes.txt", "first\nchanged\nthird\n")?;

    Ok(repo)
}
