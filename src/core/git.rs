//! Git repository access.
//!
//! [`GitRepo`] discovers the repository with `git2` and runs git subcommands in
//! its working directory, returning their raw stdout for the parsers.
//!
//! # Public API
//! - [`GitRepo`]: Repository handle and subcommand runner
//! - [`LogQuery`]: Filters for `git log`

use crate::core::error::{GitAliasError, Result};
use crate::core::log_entry::{LOG_DATE_FORMAT, LOG_FORMAT};
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Filters applied to `git log`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub limit: usize,
    pub author: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
}

impl LogQuery {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            format!("--format={LOG_FORMAT}"),
            format!("--date={LOG_DATE_FORMAT}"),
            format!("--max-count={}", self.limit),
        ];
        if let Some(author) = &self.author {
            args.push(format!("--author={author}"));
        }
        if let Some(since) = &self.since {
            args.push(format!("--since={since}"));
        }
        if let Some(until) = &self.until {
            args.push(format!("--until={until}"));
        }
        args
    }
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitAliasError::NotInGitRepo,
            _ => GitAliasError::GitRepo(e),
        })?;
        Ok(GitRepo { repo })
    }

    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or(GitAliasError::NoWorkdir)
    }

    pub fn has_commits(&self) -> bool {
        self.repo.head().is_ok_and(|head| head.target().is_some())
    }

    /// Run a git subcommand in the working directory and return its stdout
    fn execute_git_command<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        log::debug!("Running git {}", args.join(" "));

        let output = Command::new("git")
            .args(&args)
            .current_dir(self.workdir()?)
            .output()?;

        if !output.status.success() {
            let subcommand = args.first().copied().unwrap_or_default();
            return Err(GitAliasError::git_command_failed(
                subcommand,
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Raw `git log` output in the format read by `parse_log_output`.
    pub fn log_output(&self, query: &LogQuery) -> Result<String> {
        if !self.has_commits() {
            return Err(GitAliasError::NoCommits);
        }
        self.execute_git_command(&query.to_args())
    }

    pub fn show_stat(&self, rev: &str) -> Result<String> {
        self.execute_git_command(&["show", "--stat", rev])
    }

    /// Patch of a single commit without the commit header.
    pub fn show_patch(&self, rev: &str) -> Result<String> {
        self.execute_git_command(&["show", "--format=", "--patch", rev])
    }

    pub fn branches_containing(&self, rev: &str) -> Result<String> {
        self.execute_git_command(&["branch", "-a", "--contains", rev])
    }

    /// Working-tree diff, or the index against HEAD when `staged` is set.
    pub fn diff(&self, staged: bool, paths: &[PathBuf]) -> Result<String> {
        let mut args = vec!["diff".to_string()];
        if staged {
            args.push("--staged".to_string());
        }
        if !paths.is_empty() {
            args.push("--".to_string());
            args.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        }
        self.execute_git_command(&args)
    }
}
