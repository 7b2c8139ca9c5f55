//! One interactive browsing session over a paginated commit list.
//!
//! [`BrowserSession`] owns the pages, the [`BrowserState`] and a detail cache
//! keyed by `(page, row)`. Key handling and rendering are synchronous;
//! [`BrowserSession::run`] adds the async loop that interleaves key input with
//! detail fetches running in spawned tasks.
//!
//! A fetch result always lands in the cache, but only triggers a redraw when
//! its selection is still the active one with the card open.

use crate::core::browser::{reduce, Bounds, BrowserState, Dispatch, Effect, Key, Mode};
use crate::core::error::Result;
use crate::core::fetch::{Clipboard, DetailFetcher, FetchedDetail};
use crate::core::log_entry::LogEntry;
use crate::core::paginator::paginate;
use crate::core::render::{card_view, legend, status_line, table_view};
use futures::{Stream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// `(page_index, row_index)` of an entry.
pub type DetailKey = (usize, usize);

const DEFAULT_MAX_TABLE_WIDTH: usize = 80;

#[derive(Debug)]
enum DetailSlot {
    Pending,
    Ready(FetchedDetail),
    Failed,
}

/// Input events the session loop consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    /// Terminal size changed; redraw at the new width.
    Resize,
}

/// Where rendered frames go.
pub trait FrameSink {
    fn width(&self) -> usize;
    fn draw(&mut self, frame: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: DetailKey,
    pub hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Quit,
    Dispatch(Dispatch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue { fetch: Option<FetchRequest> },
    Finished(SessionOutcome),
}

pub struct BrowserSession {
    pages: Vec<Vec<LogEntry>>,
    page_size: usize,
    max_table_width: usize,
    state: BrowserState,
    cache: HashMap<DetailKey, DetailSlot>,
}

impl BrowserSession {
    pub fn new(entries: &[LogEntry], page_size: usize) -> Result<Self> {
        Ok(Self {
            pages: paginate(entries, page_size)?,
            page_size,
            max_table_width: DEFAULT_MAX_TABLE_WIDTH,
            state: BrowserState::new(),
            cache: HashMap::new(),
        })
    }

    pub fn with_max_table_width(mut self, width: usize) -> Self {
        self.max_table_width = width;
        self
    }

    /// Starts in row mode on the given selection, clamped to the pages.
    pub fn resume_at(mut self, page_index: usize, row_index: usize) -> Self {
        if self.pages.is_empty() {
            return self;
        }
        let page_index = page_index.min(self.pages.len() - 1);
        let row_index = row_index.min(self.pages[page_index].len().saturating_sub(1));
        self.state = BrowserState::resume(page_index, row_index);
        self
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn entry(&self, (page_index, row_index): DetailKey) -> Option<&LogEntry> {
        self.pages.get(page_index)?.get(row_index)
    }

    /// Applies one key press, performing the yank side effect in place and
    /// returning any fetch the caller should start.
    pub fn handle_key(&mut self, key: Key, clipboard: &mut dyn Clipboard) -> KeyOutcome {
        let bounds = Bounds::of(&self.pages, self.state.page_index);
        let (state, effect) = reduce(self.state, key, bounds);
        self.state = state;

        let fetch = match effect {
            None => None,
            Some(Effect::RequestDetail {
                page_index,
                row_index,
            }) => self.request_detail((page_index, row_index)),
            Some(Effect::Yank {
                page_index,
                row_index,
            }) => {
                self.yank((page_index, row_index), clipboard);
                None
            }
            Some(Effect::Dispatch {
                page_index,
                row_index,
                action,
            }) => {
                return KeyOutcome::Finished(SessionOutcome::Dispatch(Dispatch {
                    page_index,
                    row_index,
                    page_size: self.page_size,
                    action,
                }))
            }
            Some(Effect::Quit) => return KeyOutcome::Finished(SessionOutcome::Quit),
        };
        KeyOutcome::Continue { fetch }
    }

    /// Marks `key` as pending unless it is already cached or in flight.
    /// Failed fetches are retried.
    fn request_detail(&mut self, key: DetailKey) -> Option<FetchRequest> {
        if matches!(
            self.cache.get(&key),
            Some(DetailSlot::Pending | DetailSlot::Ready(_))
        ) {
            log::debug!("Detail for {key:?} already cached or in flight");
            return None;
        }
        let hash = self.entry(key)?.hash.clone();
        self.cache.insert(key, DetailSlot::Pending);
        Some(FetchRequest { key, hash })
    }

    fn yank(&self, key: DetailKey, clipboard: &mut dyn Clipboard) {
        let Some(entry) = self.entry(key) else {
            return;
        };
        match clipboard.copy(&entry.hash) {
            Ok(()) => log::debug!("Copied {} to clipboard", entry.hash),
            Err(e) => log::warn!("Failed to copy {}: {e}", entry.short_hash),
        }
    }

    /// Stores a fetch result. Returns whether the visible output changed.
    pub fn apply_fetch(&mut self, key: DetailKey, result: Result<FetchedDetail>) -> bool {
        let slot = match result {
            Ok(detail) => DetailSlot::Ready(detail),
            Err(e) => {
                log::warn!("Detail fetch for {key:?} failed: {e}");
                DetailSlot::Failed
            }
        };
        self.cache.insert(key, slot);
        self.state.detail_visible && self.state.selection() == Some(key)
    }

    /// Renders the full frame for the current state at `width` columns.
    pub fn render(&self, width: usize) -> String {
        let state = &self.state;
        let page: &[LogEntry] = self
            .pages
            .get(state.page_index)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let card = state
            .selection()
            .filter(|_| state.detail_visible)
            .and_then(|key| self.cache.get(&key));
        let body = match card {
            Some(DetailSlot::Ready(fetched)) => card_view(
                Some(&fetched.detail),
                &fetched.branches,
                state.branch_info_visible,
                width,
            ),
            Some(DetailSlot::Failed) => card_view(None, &[], false, width),
            Some(DetailSlot::Pending) | None => {
                let highlight = match state.mode {
                    Mode::Row => state.row_index,
                    Mode::Page => None,
                };
                table_view(page, highlight, state.yanked, width.min(self.max_table_width))
            }
        };

        let mut frame = body;
        frame.push('\n');
        frame.push_str(&status_line(state, self.pages.len(), page.len()));
        if state.legend_visible {
            frame.push('\n');
            frame.push_str(&legend());
        }
        frame
    }

    /// Drives the session until quit or dispatch.
    ///
    /// Keys are applied in arrival order. Fetches run in spawned tasks and
    /// report back over a channel, so the loop never waits on one. The session
    /// ends as quit when `inputs` is exhausted.
    pub async fn run<I>(
        &mut self,
        mut inputs: I,
        sink: &mut dyn FrameSink,
        fetcher: Arc<dyn DetailFetcher>,
        clipboard: &mut dyn Clipboard,
    ) -> Result<SessionOutcome>
    where
        I: Stream<Item = Result<Input>> + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<(DetailKey, Result<FetchedDetail>)>();
        sink.draw(&self.render(sink.width()))?;

        loop {
            tokio::select! {
                input = inputs.next() => {
                    match input {
                        None => return Ok(SessionOutcome::Quit),
                        Some(Err(e)) => return Err(e),
                        Some(Ok(Input::Resize)) => {}
                        Some(Ok(Input::Key(key))) => match self.handle_key(key, clipboard) {
                            KeyOutcome::Finished(outcome) => return Ok(outcome),
                            KeyOutcome::Continue { fetch: Some(request) } => {
                                let fetcher = Arc::clone(&fetcher);
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let result = fetcher.fetch(&request.hash).await;
                                    // receiver is gone once the session ended
                                    let _ = tx.send((request.key, result));
                                });
                            }
                            KeyOutcome::Continue { fetch: None } => {}
                        },
                    }
                    sink.draw(&self.render(sink.width()))?;
                }
                Some((key, result)) = rx.recv() => {
                    if self.apply_fetch(key, result) {
                        sink.draw(&self.render(sink.width()))?;
                    }
                }
            }
        }
    }
}
