//! Core functionality for the git-alias commit browser.
//!
//! Leaves first: the parsers and paginator turn git output into records, the
//! renderer turns records into terminal text, and the browser reducer plus
//! session loop drive navigation over them.

pub mod browser;
pub mod colors;
pub mod config;
pub mod diff_parser;
pub mod dirs;
pub mod error;
pub mod fetch;
pub mod git;
pub mod layout;
pub mod log_entry;
pub mod output;
pub mod paginator;
pub mod render;
pub mod session;
pub mod show_parser;
pub mod terminal;

// === Error handling ===
pub use error::{GitAliasError, Result};

// === Git operations ===
// Repository discovery and the subcommands whose output the parsers read
pub use git::{GitRepo, LogQuery};

// === Parsed records ===
pub use diff_parser::{parse_diff, ChangeKind, DiffLine, FileDiff, Hunk};
pub use log_entry::{parse_log_output, LogEntry};
pub use show_parser::{parse_branch_list, parse_show_detail, BranchRef, CommitDetail, FileStat};

// === Navigation ===
// Pure reducer and the session that owns state, cache and async fetches
pub use browser::{reduce, ActionKind, BrowserState, Dispatch, Key, Mode};
pub use paginator::paginate;
pub use session::{BrowserSession, FrameSink, Input, SessionOutcome};

// === Collaborators ===
pub use fetch::{Clipboard, DetailFetcher, FetchedDetail, GitDetailFetcher, SystemClipboard};

// === Rendering ===
pub use render::{card_view, diff_view, legend, status_line, table_view};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header};
