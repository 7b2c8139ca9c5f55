//! Output helpers for one-shot command messages.
//!
//! Errors, notices and section headers printed outside the interactive
//! browser go through these so every command spaces and colors them alike.

use colored::*;

/// Prints `✕ Error: <message>` in red with a blank line before and after.
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Prints an informational message surrounded by blank lines.
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Prints `<header>:` followed by a blank line.
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_does_not_panic() {
        print_error("Test error message");
    }

    #[test]
    fn test_print_info_does_not_panic() {
        print_info("Information message");
    }

    #[test]
    fn test_print_section_header_does_not_panic() {
        print_section_header("Unstaged changes");
    }
}
