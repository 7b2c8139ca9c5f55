//! Collaborators the browser session calls out to: the asynchronous detail
//! fetch behind the card view and the clipboard behind yank.

use crate::core::error::{GitAliasError, Result};
use crate::core::show_parser::{parse_branch_list, parse_show_detail, BranchRef, CommitDetail};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Everything the card view shows for one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedDetail {
    pub detail: CommitDetail,
    pub branches: Vec<BranchRef>,
}

/// Loads commit detail and branch containment for a hash.
///
/// Implementations run outside the key loop; the session only sees the
/// finished result.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch(&self, hash: &str) -> Result<FetchedDetail>;
}

/// Runs `git show --stat` and `git branch -a --contains` concurrently.
pub struct GitDetailFetcher {
    workdir: PathBuf,
}

impl GitDetailFetcher {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            return Err(GitAliasError::git_command_failed(
                args.first().copied().unwrap_or_default(),
                String::from_utf8_lossy(&output.stderr),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl DetailFetcher for GitDetailFetcher {
    async fn fetch(&self, hash: &str) -> Result<FetchedDetail> {
        log::debug!("Fetching detail for {hash}");
        let show_args = ["show", "--stat", hash];
        let branch_args = ["branch", "-a", "--contains", hash];
        let (show, branches) = tokio::try_join!(self.git(&show_args), self.git(&branch_args))?;
        Ok(FetchedDetail {
            detail: parse_show_detail(&show),
            branches: parse_branch_list(&branches),
        })
    }
}

/// Destination for yanked hashes.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via `arboard`. A missing clipboard (no display server,
/// CI) is reported per copy instead of at startup.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = arboard::Clipboard::new()
            .map_err(|e| log::warn!("Clipboard unavailable: {e}"))
            .ok();
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| GitAliasError::clipboard("no system clipboard"))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(GitAliasError::clipboard)
    }
}
