use crate::core::{
    colors::{paint, Tone},
    diff_parser::{parse_diff, FileDiff},
    error::Result,
    git::GitRepo,
    print_info, print_section_header,
    render::diff_view,
    terminal::terminal_width,
};
use std::env;
use std::path::PathBuf;

pub fn execute_diff(staged: bool, paths: Vec<PathBuf>) -> Result<()> {
    let current_dir = env::current_dir()?;
    let git_repo = GitRepo::open(&current_dir)?;

    let files = parse_diff(&git_repo.diff(staged, &paths)?);
    if files.is_empty() {
        let scope = if staged { "staged" } else { "unstaged" };
        print_info(&format!("No {scope} changes."));
        return Ok(());
    }

    print_section_header(if staged {
        "Staged changes"
    } else {
        "Unstaged changes"
    });
    print_file_diffs(&files, terminal_width());
    Ok(())
}

/// Prints each file block followed by an additions/deletions tally.
pub fn print_file_diffs(files: &[FileDiff], width: usize) {
    for file in files {
        println!("{}", diff_view(file, width));
    }

    let additions: usize = files.iter().map(FileDiff::additions).sum();
    let deletions: usize = files.iter().map(FileDiff::deletions).sum();
    println!(
        "{} file(s), {} {}",
        files.len(),
        paint(&format!("+{additions}"), Tone::Green),
        paint(&format!("-{deletions}"), Tone::Red)
    );
}
