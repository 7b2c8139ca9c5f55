//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for git repository error messages
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// Creates a predicate that checks for the table header of the log view
pub fn has_table_header() -> impl Predicate<str> {
    predicates::str::contains("Hash")
        .and(predicates::str::contains("Author"))
        .and(predicates::str::contains("Message"))
}

/// Creates a predicate that checks for the header lines of a commit card
pub fn has_card_header() -> impl Predicate<str> {
    predicates::str::contains("Commit:")
        .and(predicates::str::contains("Author:"))
        .and(predicates::str::contains("Date:"))
}

/// Creates a predicate that checks for the additions/deletions tally of a diff
pub fn has_diff_tally(files: usize, additions: usize, deletions: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("{files} file(s), +{additions} -{deletions}"))
}
