use clap::{Parser, Subcommand};
use git_alias::commands::*;
use git_alias::core::{
    error::{GitAliasError, Result},
    print_error,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-alias")]
#[command(about = "Git command aliases with an interactive commit browser")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the commit log page by page (gl alias)
    Log {
        /// Maximum number of commits to load
        #[arg(short = 'l', long)]
        limit: Option<usize>,
        /// Only commits by this author
        #[arg(short = 'a', long)]
        author: Option<String>,
        /// Only commits after this date
        #[arg(short = 'f', long = "from")]
        since: Option<String>,
        /// Only commits before this date
        #[arg(short = 't', long = "to")]
        until: Option<String>,
        /// Commits per page
        #[arg(short = 'p', long)]
        page_size: Option<usize>,
    },
    /// Show the working tree diff with row numbers (gd alias)
    Diff {
        /// Diff the index against HEAD instead
        #[arg(short, long)]
        staged: bool,
        /// Limit the diff to these paths
        paths: Vec<PathBuf>,
    },
    /// Show a commit card with stats and containing branches (gsh alias)
    Show {
        /// Revision to show
        #[arg(default_value = "HEAD")]
        rev: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let result = match cli.command {
        Commands::Log {
            limit,
            author,
            since,
            until,
            page_size,
        } => execute_log(LogArgs {
            limit,
            author,
            since,
            until,
            page_size,
        }),
        Commands::Diff { staged, paths } => execute_diff(staged, paths),
        Commands::Show { rev } => execute_show(&rev),
    };

    if let Err(e) = result {
        if let GitAliasError::NotInGitRepo = e {
            print_error("Not in a git repository");
        } else {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }

    Ok(())
}
