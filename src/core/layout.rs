//! Width-aware text helpers shared by the renderers.
//!
//! Widths are terminal columns (via `unicode-width`) measured on text with
//! ANSI escape sequences removed, so styled and plain strings can be padded
//! to the same column.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ELLIPSIS: char = '\u{2026}';

/// Rounded box-drawing characters used by tables, cards and diff blocks.
pub mod border {
    pub const TOP_LEFT: char = '╭';
    pub const TOP_RIGHT: char = '╮';
    pub const BOTTOM_LEFT: char = '╰';
    pub const BOTTOM_RIGHT: char = '╯';
    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const TOP_JOIN: char = '┬';
    pub const BOTTOM_JOIN: char = '┴';
    pub const LEFT_JOIN: char = '├';
    pub const RIGHT_JOIN: char = '┤';
    pub const CROSS: char = '┼';
}

pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Visible column width of `text`, ignoring ANSI escapes.
pub fn display_width(text: &str) -> usize {
    if text.contains('\x1b') {
        strip_ansi_codes(text).width()
    } else {
        text.width()
    }
}

/// Cuts plain text to at most `width` columns, ending with an ellipsis when
/// anything was dropped.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Right-pads (possibly styled) text with spaces to `width` visible columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let visible = display_width(text);
    if visible >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - visible))
}

/// Greedy word wrap of plain text into lines of at most `width` columns.
/// Words longer than a line are split.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let sep = usize::from(!current.is_empty());
        if current.width() + sep + word.width() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            if current.width() + ch.width().unwrap_or(0) > width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Fits a file path into `width` columns. Paths that are too long keep as
/// many trailing segments as fit behind a `.../` prefix.
pub fn clean_file_path(path: &str, width: usize) -> String {
    let path = path.trim();
    if path.width() <= width {
        return pad_to_width(path, width);
    }

    let segments: Vec<&str> = path.split('/').collect();
    let mut kept: Vec<&str> = Vec::new();
    for segment in segments.iter().rev() {
        let candidate = format!(".../{}", join_reversed(&kept, segment));
        if candidate.width() > width {
            break;
        }
        kept.push(segment);
    }

    let shortened = if kept.is_empty() {
        truncate_to_width(path, width)
    } else {
        kept.reverse();
        format!(".../{}", kept.join("/"))
    };
    pad_to_width(&shortened, width)
}

fn join_reversed(kept: &[&str], next: &str) -> String {
    let mut parts: Vec<&str> = kept.iter().rev().copied().collect();
    parts.insert(0, next);
    parts.join("/")
}

/// A horizontal rule `left + fill... + right` exactly `width` columns wide,
/// with `join` placed at each column offset in `joins`.
pub fn rule(left: char, right: char, join: char, width: usize, joins: &[usize]) -> String {
    if width < 2 {
        return String::new();
    }
    let mut line = String::with_capacity(width * 3);
    line.push(left);
    for col in 1..width - 1 {
        line.push(if joins.contains(&col) {
            join
        } else {
            border::HORIZONTAL
        });
    }
    line.push(right);
    line
}

/// Top border with `title` centred in it.
pub fn titled_rule(title: &str, width: usize) -> String {
    let title_width = title.width() + 2;
    if width < title_width + 2 {
        return rule(border::TOP_LEFT, border::TOP_RIGHT, border::HORIZONTAL, width, &[]);
    }
    let fill = width - 2 - title_width;
    let left = fill / 2;
    let right = fill - left;
    format!(
        "{}{} {title} {}{}",
        border::TOP_LEFT,
        border::HORIZONTAL.to_string().repeat(left),
        border::HORIZONTAL.to_string().repeat(right),
        border::TOP_RIGHT
    )
}
