//! Git Alias - git command aliases with an interactive, paginated commit browser.
//!
//! This library holds the parsers for git's log, diff and `show --stat`
//! output, the pure renderers for tables, cards and diffs, and the
//! keypress-driven browser session that ties them together.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Diff, commit-detail and log parsing
//! - Pagination and the navigation reducer
//! - The browser session with its fetch and clipboard collaborators
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Rendering
    card_view,
    diff_view,
    // Parsing
    paginate,
    parse_diff,
    parse_log_output,
    parse_show_detail,
    table_view,

    BrowserSession,
    BrowserState,
    CommitDetail,
    FileDiff,
    // Error handling
    GitAliasError,
    // Git operations
    GitRepo,
    Key,
    LogEntry,
    Result,
};
