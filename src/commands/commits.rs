use crate::core::{
    browser::ActionKind,
    config::AliasConfig,
    error::Result,
    fetch::{DetailFetcher, GitDetailFetcher, SystemClipboard},
    git::{GitRepo, LogQuery},
    log_entry::{parse_log_output, LogEntry},
    paginator::paginate,
    print_error, print_info,
    render::{card_view, summary_headline, table_view},
    session::{BrowserSession, SessionOutcome},
    show_parser::{parse_branch_list, parse_show_detail},
    terminal::{is_interactive, key_stream, terminal_width, RawModeGuard, TerminalScreen},
};
use crate::commands::diff::print_file_diffs;
use crate::core::diff_parser::parse_diff;
use std::env;
use std::sync::Arc;

/// Options for `git-alias log`. Unset values fall back to the config file.
#[derive(Debug, Clone, Default)]
pub struct LogArgs {
    pub limit: Option<usize>,
    pub author: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub page_size: Option<usize>,
}

pub fn execute_log(args: LogArgs) -> Result<()> {
    let current_dir = env::current_dir()?;
    let git_repo = GitRepo::open(&current_dir)?;

    let config = AliasConfig::load().unwrap_or_else(|e| {
        log::warn!("Ignoring config: {e}");
        AliasConfig::default()
    });
    let page_size = args.page_size.unwrap_or(config.page_size);
    let query = LogQuery {
        limit: args.limit.unwrap_or(config.log_limit),
        author: args.author,
        since: args.since,
        until: args.until,
    };

    let entries = parse_log_output(&git_repo.log_output(&query)?);
    if entries.is_empty() {
        print_info("No commits match the given filters.");
        return Ok(());
    }
    log::debug!("Loaded {} commits, {} per page", entries.len(), page_size);

    if !is_interactive() {
        return print_pages(&entries, page_size, config.max_table_width);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(browse(&git_repo, &entries, page_size, config.max_table_width))
}

/// Prints every page as a plain table when there is no terminal to browse in.
fn print_pages(entries: &[LogEntry], page_size: usize, max_table_width: usize) -> Result<()> {
    let width = terminal_width().min(max_table_width);
    for page in paginate(entries, page_size)? {
        println!("{}", table_view(&page, None, false, width));
    }
    Ok(())
}

/// Runs browser sessions until the user quits, performing each dispatched
/// action and resuming on the same row.
async fn browse(
    git_repo: &GitRepo,
    entries: &[LogEntry],
    page_size: usize,
    max_table_width: usize,
) -> Result<()> {
    let fetcher: Arc<dyn DetailFetcher> = Arc::new(GitDetailFetcher::new(git_repo.workdir()?));
    let mut clipboard = SystemClipboard::new();
    let mut resume: Option<(usize, usize)> = None;

    loop {
        let mut session =
            BrowserSession::new(entries, page_size)?.with_max_table_width(max_table_width);
        if let Some((page_index, row_index)) = resume {
            session = session.resume_at(page_index, row_index);
        }

        let outcome = {
            let _raw_mode = RawModeGuard::enable()?;
            let mut screen = TerminalScreen::new();
            let outcome = session
                .run(key_stream(), &mut screen, Arc::clone(&fetcher), &mut clipboard)
                .await;
            match &outcome {
                Ok(SessionOutcome::Dispatch(_)) => screen.clear()?,
                _ => screen.finish()?,
            }
            outcome?
        };

        let dispatch = match outcome {
            SessionOutcome::Quit => return Ok(()),
            SessionOutcome::Dispatch(dispatch) => dispatch,
        };
        let Some(entry) = session.entry((dispatch.page_index, dispatch.row_index)) else {
            return Ok(());
        };

        let result = match dispatch.action {
            ActionKind::Summary => print_summary(git_repo, entry),
            ActionKind::Diff => print_commit_diff(git_repo, entry),
        };
        if let Err(e) = result {
            print_error(&e.to_string());
        }
        resume = Some((dispatch.page_index, dispatch.row_index));
    }
}

fn print_summary(git_repo: &GitRepo, entry: &LogEntry) -> Result<()> {
    let detail = parse_show_detail(&git_repo.show_stat(&entry.hash)?);
    let branches = parse_branch_list(&git_repo.branches_containing(&entry.hash)?);

    println!("{}", summary_headline(entry));
    println!("{}", card_view(Some(&detail), &branches, true, terminal_width()));
    Ok(())
}

fn print_commit_diff(git_repo: &GitRepo, entry: &LogEntry) -> Result<()> {
    let files = parse_diff(&git_repo.show_patch(&entry.hash)?);
    println!("{}", summary_headline(entry));
    if files.is_empty() {
        print_info("No textual changes in this commit.");
        return Ok(());
    }
    print_file_diffs(&files, terminal_width());
    Ok(())
}
