use crate::core::{
    error::Result,
    git::GitRepo,
    print_info,
    render::card_view,
    show_parser::{parse_branch_list, parse_show_detail},
    terminal::terminal_width,
};
use std::env;

pub fn execute_show(rev: &str) -> Result<()> {
    let current_dir = env::current_dir()?;
    let git_repo = GitRepo::open(&current_dir)?;

    let detail = parse_show_detail(&git_repo.show_stat(rev)?);
    if detail.is_empty() {
        print_info(&format!("Nothing to show for {rev}."));
        return Ok(());
    }
    let branches = parse_branch_list(&git_repo.branches_containing(rev)?);

    println!("{}", card_view(Some(&detail), &branches, true, terminal_width()));
    Ok(())
}
