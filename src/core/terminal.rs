//! Terminal driver for the browser: raw mode, in-place redraw and key input.
//!
//! Frames are drawn on the main screen, not the alternate screen, so whatever
//! a dispatch prints afterwards stays in the scrollback next to the last frame.

use crate::core::browser::Key;
use crate::core::error::{GitAliasError, Result};
use crate::core::layout::display_width;
use crate::core::session::{FrameSink, Input};
use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{Event, EventStream};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use futures::{future, Stream, StreamExt};
use std::io::{stdout, IsTerminal, Stdout, Write};

pub const FALLBACK_WIDTH: usize = 80;

/// Current terminal width, or [`FALLBACK_WIDTH`] when it cannot be read.
pub fn terminal_width() -> usize {
    terminal::size()
        .map(|(columns, _)| usize::from(columns))
        .ok()
        .filter(|w| *w > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Screen rows `frame` occupies once lines wider than `width` wrap.
pub fn screen_rows(frame: &str, width: usize) -> usize {
    let width = width.max(1);
    frame
        .lines()
        .map(|line| display_width(line).div_ceil(width).max(1))
        .sum()
}

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && stdout().is_terminal()
}

/// Keeps the terminal in raw mode with a hidden cursor until dropped.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> Result<Self> {
        if !is_interactive() {
            return Err(GitAliasError::NotATerminal);
        }
        enable_raw_mode()?;
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(stdout(), Show) {
            log::warn!("Failed to restore cursor: {e}");
        }
        if let Err(e) = disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {e}");
        }
    }
}

/// Redraws each frame over the previous one.
pub struct TerminalScreen {
    out: Stdout,
    drawn_lines: usize,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            out: stdout(),
            drawn_lines: 0,
        }
    }

    fn rewind(&mut self) -> Result<()> {
        queue!(self.out, MoveToColumn(0))?;
        if self.drawn_lines > 1 {
            let up = u16::try_from(self.drawn_lines - 1).unwrap_or(u16::MAX);
            queue!(self.out, MoveUp(up))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    /// Erases the last frame.
    pub fn clear(&mut self) -> Result<()> {
        if self.drawn_lines > 0 {
            self.rewind()?;
            self.out.flush()?;
            self.drawn_lines = 0;
        }
        Ok(())
    }

    /// Leaves the last frame on screen and moves below it.
    pub fn finish(&mut self) -> Result<()> {
        if self.drawn_lines > 0 {
            write!(self.out, "\r\n")?;
            self.out.flush()?;
            self.drawn_lines = 0;
        }
        Ok(())
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for TerminalScreen {
    fn width(&self) -> usize {
        terminal_width()
    }

    fn draw(&mut self, frame: &str) -> Result<()> {
        self.rewind()?;
        // raw mode does not translate \n
        write!(self.out, "{}", frame.replace('\n', "\r\n"))?;
        self.out.flush()?;
        self.drawn_lines = screen_rows(frame, terminal_width());
        Ok(())
    }
}

/// Terminal key presses and resizes as session input.
pub fn key_stream() -> impl Stream<Item = Result<Input>> + Unpin {
    Box::pin(EventStream::new().filter_map(|event| {
        future::ready(match event {
            Ok(Event::Key(key)) => Key::from_event(&key).map(|key| Ok(Input::Key(key))),
            Ok(Event::Resize(..)) => Some(Ok(Input::Resize)),
            Ok(_) => None,
            Err(e) => Some(Err(GitAliasError::Io(e))),
        })
    }))
}
