//! Navigation state of one interactive browser session.
//!
//! [`reduce`] is a pure function from the current [`BrowserState`] and a
//! [`Key`] to the next state plus an optional [`Effect`] for the session to
//! carry out (fetch, clipboard write, termination). It never performs I/O.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Recognised key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `space`
    ToggleMode,
    /// `k`
    Prev,
    /// `j`
    Next,
    /// `enter`
    ToggleDetail,
    /// `b`
    ToggleBranch,
    /// `y`
    Yank,
    /// `s`
    DispatchSummary,
    /// `d`
    DispatchDiff,
    /// `h`
    ToggleLegend,
    /// `q`, `esc` or `ctrl-c`
    Quit,
}

impl Key {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Key::ToggleMode),
            'k' => Some(Key::Prev),
            'j' => Some(Key::Next),
            '\n' | '\r' => Some(Key::ToggleDetail),
            'b' => Some(Key::ToggleBranch),
            'y' => Some(Key::Yank),
            's' => Some(Key::DispatchSummary),
            'd' => Some(Key::DispatchDiff),
            'h' => Some(Key::ToggleLegend),
            'q' => Some(Key::Quit),
            _ => None,
        }
    }

    /// Maps a terminal key event. Release and repeat events are ignored.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Key::Quit)
            }
            KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::from_char(c)
            }
            KeyCode::Enter => Some(Key::ToggleDetail),
            KeyCode::Esc => Some(Key::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `j`/`k` move between pages
    #[default]
    Page,
    /// `j`/`k` move between rows of the current page
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrowserState {
    pub mode: Mode,
    pub page_index: usize,
    /// Selected row within the current page. Always `Some` in row mode and
    /// `None` in page mode.
    pub row_index: Option<usize>,
    pub detail_visible: bool,
    /// Only meaningful while `detail_visible` is set.
    pub branch_info_visible: bool,
    pub yanked: bool,
    pub legend_visible: bool,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row-mode state selecting `row_index` on page `page_index`, used when a
    /// session is restarted after a dispatch.
    pub fn resume(page_index: usize, row_index: usize) -> Self {
        Self {
            mode: Mode::Row,
            page_index,
            row_index: Some(row_index),
            ..Self::default()
        }
    }

    /// `(page, row)` pair identifying the selected entry, if any.
    pub fn selection(&self) -> Option<(usize, usize)> {
        match self.mode {
            Mode::Row => self.row_index.map(|row| (self.page_index, row)),
            Mode::Page => None,
        }
    }

    fn clear_transient(&mut self) {
        self.detail_visible = false;
        self.branch_info_visible = false;
        self.yanked = false;
    }
}

/// Sizes the reducer clamps against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub page_count: usize,
    /// Length of the page at the current `page_index`
    pub page_len: usize,
}

impl Bounds {
    pub fn of<T>(pages: &[Vec<T>], page_index: usize) -> Self {
        Self {
            page_count: pages.len(),
            page_len: pages.get(page_index).map_or(0, Vec::len),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Summary,
    Diff,
}

/// Selection handed back to the caller when a session ends by dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub page_index: usize,
    pub row_index: usize,
    pub page_size: usize,
    pub action: ActionKind,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The detail card became visible for this `(page, row)`
    RequestDetail { page_index: usize, row_index: usize },
    /// Copy the hash at this `(page, row)`
    Yank { page_index: usize, row_index: usize },
    Dispatch {
        page_index: usize,
        row_index: usize,
        action: ActionKind,
    },
    Quit,
}

/// Applies one key press.
pub fn reduce(mut state: BrowserState, key: Key, bounds: Bounds) -> (BrowserState, Option<Effect>) {
    let effect = match key {
        Key::ToggleMode => {
            match state.mode {
                Mode::Page if bounds.page_len > 0 => {
                    state.mode = Mode::Row;
                    state.row_index = Some(0);
                }
                Mode::Page => log::debug!("Empty page, staying in page mode"),
                Mode::Row => {
                    state.mode = Mode::Page;
                    state.row_index = None;
                }
            }
            state.clear_transient();
            None
        }
        Key::Prev | Key::Next => {
            let forward = key == Key::Next;
            let changed = match (state.mode, state.row_index) {
                (Mode::Row, Some(row)) => {
                    let next = step(row, forward, bounds.page_len);
                    state.row_index = Some(next);
                    next != row
                }
                _ => {
                    let next = step(state.page_index, forward, bounds.page_count);
                    let changed = next != state.page_index;
                    state.page_index = next;
                    changed
                }
            };
            if changed {
                state.clear_transient();
            }
            None
        }
        Key::ToggleDetail => match state.selection() {
            Some(_) if state.detail_visible => {
                state.detail_visible = false;
                state.branch_info_visible = false;
                None
            }
            Some((page_index, row_index)) => {
                state.detail_visible = true;
                Some(Effect::RequestDetail {
                    page_index,
                    row_index,
                })
            }
            None => None,
        },
        Key::ToggleBranch => {
            if state.mode == Mode::Row && state.detail_visible {
                state.branch_info_visible = !state.branch_info_visible;
            }
            None
        }
        Key::Yank => state.selection().map(|(page_index, row_index)| {
            state.yanked = true;
            Effect::Yank {
                page_index,
                row_index,
            }
        }),
        Key::DispatchSummary | Key::DispatchDiff => {
            let action = if key == Key::DispatchSummary {
                ActionKind::Summary
            } else {
                ActionKind::Diff
            };
            state
                .selection()
                .map(|(page_index, row_index)| Effect::Dispatch {
                    page_index,
                    row_index,
                    action,
                })
        }
        Key::ToggleLegend => {
            state.legend_visible = !state.legend_visible;
            None
        }
        Key::Quit => Some(Effect::Quit),
    };
    (state, effect)
}

/// Moves `index` one step within `[0, len)`, clamping at both ends.
fn step(index: usize, forward: bool, len: usize) -> usize {
    if forward {
        (index + 1).min(len.saturating_sub(1))
    } else {
        index.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        page_count: 3,
        page_len: 5,
    };

    fn press(state: BrowserState, keys: &[Key]) -> BrowserState {
        keys.iter()
            .fold(state, |state, key| reduce(state, *key, BOUNDS).0)
    }

    #[test]
    fn test_initial_state() {
        let state = BrowserState::new();
        assert_eq!(state.mode, Mode::Page);
        assert_eq!(state.page_index, 0);
        assert_eq!(state.row_index, None);
        assert!(!state.detail_visible && !state.legend_visible);
    }

    #[test]
    fn test_toggle_mode_sets_row_index() {
        let row = press(BrowserState::new(), &[Key::Next, Key::ToggleMode]);
        assert_eq!(row.mode, Mode::Row);
        assert_eq!(row.row_index, Some(0));
        assert_eq!(row.page_index, 1);

        let page = press(row, &[Key::Next, Key::Next, Key::ToggleMode]);
        assert_eq!(page.mode, Mode::Page);
        assert_eq!(page.row_index, None);
        assert_eq!(page.page_index, 1);
    }

    #[test]
    fn test_toggle_mode_clears_transient_flags() {
        let state = press(
            BrowserState::new(),
            &[Key::ToggleMode, Key::Yank, Key::ToggleDetail, Key::ToggleBranch],
        );
        assert!(state.yanked && state.detail_visible && state.branch_info_visible);

        let state = press(state, &[Key::ToggleMode]);
        assert!(!state.yanked && !state.detail_visible && !state.branch_info_visible);
    }

    #[test]
    fn test_move_prev_at_lower_bound_is_noop() {
        let state = BrowserState::new();
        assert_eq!(reduce(state, Key::Prev, BOUNDS), (state, None));

        let row = BrowserState {
            detail_visible: true,
            yanked: true,
            ..BrowserState::resume(1, 0)
        };
        assert_eq!(reduce(row, Key::Prev, BOUNDS), (row, None));
    }

    #[test]
    fn test_move_next_at_upper_bound_is_noop() {
        let last_page = BrowserState {
            page_index: 2,
            ..BrowserState::new()
        };
        assert_eq!(reduce(last_page, Key::Next, BOUNDS).0, last_page);

        let last_row = BrowserState {
            detail_visible: true,
            ..BrowserState::resume(0, 4)
        };
        assert_eq!(reduce(last_row, Key::Next, BOUNDS).0, last_row);
    }

    #[test]
    fn test_move_clears_transient_flags_when_index_changes() {
        let state = BrowserState {
            detail_visible: true,
            branch_info_visible: true,
            yanked: true,
            ..BrowserState::resume(0, 2)
        };
        let (moved, effect) = reduce(state, Key::Next, BOUNDS);
        assert_eq!(moved.row_index, Some(3));
        assert!(!moved.detail_visible && !moved.branch_info_visible && !moved.yanked);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_row_moves_clamp_to_short_last_page() {
        let bounds = Bounds {
            page_count: 3,
            page_len: 2,
        };
        let state = BrowserState::resume(2, 1);
        assert_eq!(reduce(state, Key::Next, bounds).0.row_index, Some(1));
    }

    #[test]
    fn test_toggle_detail_requests_fetch_then_hides() {
        let state = BrowserState::resume(1, 3);
        let (shown, effect) = reduce(state, Key::ToggleDetail, BOUNDS);
        assert!(shown.detail_visible);
        assert_eq!(
            effect,
            Some(Effect::RequestDetail {
                page_index: 1,
                row_index: 3
            })
        );

        let shown = press(shown, &[Key::ToggleBranch]);
        let (hidden, effect) = reduce(shown, Key::ToggleDetail, BOUNDS);
        assert!(!hidden.detail_visible && !hidden.branch_info_visible);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_toggle_detail_ignored_in_page_mode() {
        let state = BrowserState::new();
        assert_eq!(reduce(state, Key::ToggleDetail, BOUNDS), (state, None));
    }

    #[test]
    fn test_toggle_branch_requires_visible_detail() {
        let state = BrowserState::resume(0, 0);
        assert_eq!(reduce(state, Key::ToggleBranch, BOUNDS).0, state);
    }

    #[test]
    fn test_yank_in_page_mode_has_no_effect() {
        let state = BrowserState::new();
        assert_eq!(reduce(state, Key::Yank, BOUNDS), (state, None));
    }

    #[test]
    fn test_yank_in_row_mode() {
        let (state, effect) = reduce(BrowserState::resume(2, 1), Key::Yank, BOUNDS);
        assert!(state.yanked);
        assert_eq!(
            effect,
            Some(Effect::Yank {
                page_index: 2,
                row_index: 1
            })
        );
    }

    #[test]
    fn test_dispatch_only_in_row_mode() {
        let state = BrowserState::new();
        assert_eq!(reduce(state, Key::DispatchDiff, BOUNDS).1, None);

        let (_, effect) = reduce(BrowserState::resume(1, 4), Key::DispatchSummary, BOUNDS);
        assert_eq!(
            effect,
            Some(Effect::Dispatch {
                page_index: 1,
                row_index: 4,
                action: ActionKind::Summary
            })
        );
    }

    #[test]
    fn test_legend_does_not_touch_navigation() {
        let state = BrowserState::resume(1, 2);
        let toggled = press(state, &[Key::ToggleLegend]);
        assert!(toggled.legend_visible);
        assert_eq!(toggled.selection(), state.selection());
        assert!(!press(toggled, &[Key::ToggleLegend]).legend_visible);
    }

    #[test]
    fn test_quit_from_any_mode() {
        assert_eq!(reduce(BrowserState::new(), Key::Quit, BOUNDS).1, Some(Effect::Quit));
        assert_eq!(
            reduce(BrowserState::resume(0, 0), Key::Quit, BOUNDS).1,
            Some(Effect::Quit)
        );
    }

    #[test]
    fn test_key_bindings() {
        let bindings = [
            (' ', Key::ToggleMode),
            ('j', Key::Next),
            ('k', Key::Prev),
            ('b', Key::ToggleBranch),
            ('y', Key::Yank),
            ('s', Key::DispatchSummary),
            ('d', Key::DispatchDiff),
            ('h', Key::ToggleLegend),
            ('q', Key::Quit),
        ];
        for (c, key) in bindings {
            assert_eq!(Key::from_char(c), Some(key));
        }
        assert_eq!(Key::from_char('x'), None);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(Key::from_event(&enter), Some(Key::ToggleDetail));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&ctrl_c), Some(Key::Quit));
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&ctrl_j), None);
    }
}
