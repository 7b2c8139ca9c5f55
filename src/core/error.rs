//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitAliasError`] which covers every failure that can
//! escape an interactive session or a one-shot command. Parsers and the browser
//! session never produce these for malformed input; they degrade instead.
//!
//! # Public API
//! - [`GitAliasError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitAliasError>`
//!
//! # Error Categories
//! - **Git operations**: Repository not found, git2 errors, failing subcommands
//! - **Browser setup**: Invalid page size, empty history
//! - **Configuration**: Reading, parsing and writing the config file
//! - **Terminal / clipboard**: I/O failures and clipboard access

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-alias
#[derive(Error, Debug)]
pub enum GitAliasError {
    // Git repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Repository has no working directory")]
    NoWorkdir,

    #[error("git {command} failed: {stderr}")]
    GitCommandFailed { command: String, stderr: String },

    #[error("No commits to show")]
    NoCommits,

    // Browser errors
    #[error("Invalid page size: {size}. Page size must be at least 1")]
    InvalidPageSize { size: usize },

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Terminal errors
    #[error("The commit browser needs an interactive terminal")]
    NotATerminal,

    // Clipboard errors
    #[error("Clipboard unavailable: {message}")]
    Clipboard { message: String },

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitAliasError
pub type Result<T> = std::result::Result<T, GitAliasError>;

impl GitAliasError {
    /// Create a git command failure from the subcommand and its stderr
    pub fn git_command_failed(command: impl Into<String>, stderr: impl AsRef<str>) -> Self {
        Self::GitCommandFailed {
            command: command.into(),
            stderr: stderr.as_ref().trim().to_string(),
        }
    }

    /// Create an invalid page size error
    pub fn invalid_page_size(size: usize) -> Self {
        Self::InvalidPageSize { size }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config write failed error
    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a clipboard error from any displayable cause
    pub fn clipboard(message: impl std::fmt::Display) -> Self {
        Self::Clipboard {
            message: message.to_string(),
        }
    }
}
