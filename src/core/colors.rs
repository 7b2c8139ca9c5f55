//! Unified color system for the browser, cards and diff blocks.
//!
//! All rendering goes through the named [`Tone`] palette (Catppuccin Mocha),
//! so table, card and diff output share one set of colors.
//!
//! # Public API
//! - [`Tone`]: Named palette entries
//! - [`paint`]: Apply a tone as foreground color
//! - [`badge`]: Bold dark text on a tone background (mode badge, selection)
//! - [`get_change_color_style`]: Color function for a diff line kind
//! - [`get_ref_color_style`]: Icon and color for a ref label
//! - [`get_branch_color_style`]: Color function for a branch-containment line
//!
//! # Color Scheme
//! - **Additions**: Green
//! - **Removals**: Red
//! - **Hashes**: Yellow, selected hash on a yellow background (sky once yanked)
//! - **Keys / labels**: Blue bold, key hints in teal

use crate::core::diff_parser::ChangeKind;
use crate::core::log_entry::RefKind;
use crate::core::show_parser::BranchKind;
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pink,
    Mauve,
    Red,
    Peach,
    Yellow,
    Green,
    Teal,
    Sky,
    Blue,
    Subtext,
    Overlay,
    Surface,
}

impl Tone {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tone::Pink => (0xF5, 0xC2, 0xE7),
            Tone::Mauve => (0xCB, 0xA6, 0xF7),
            Tone::Red => (0xF3, 0x8B, 0xA8),
            Tone::Peach => (0xFA, 0xB3, 0x87),
            Tone::Yellow => (0xF9, 0xE2, 0xAF),
            Tone::Green => (0xA6, 0xE3, 0xA1),
            Tone::Teal => (0x94, 0xE2, 0xD5),
            Tone::Sky => (0x89, 0xDC, 0xEB),
            Tone::Blue => (0x89, 0xB4, 0xFA),
            Tone::Subtext => (0xBA, 0xC2, 0xDE),
            Tone::Overlay => (0x93, 0x99, 0xB2),
            Tone::Surface => (0x58, 0x5B, 0x70),
        }
    }
}

pub fn paint(text: &str, tone: Tone) -> ColoredString {
    let (r, g, b) = tone.rgb();
    text.truecolor(r, g, b)
}

pub fn badge(text: &str, background: Tone) -> ColoredString {
    let (r, g, b) = background.rgb();
    paint(text, Tone::Surface).bold().on_truecolor(r, g, b)
}

/// Bold blue label such as `Commit:` or a legend group name
pub fn label(text: &str) -> ColoredString {
    paint(text, Tone::Blue).bold()
}

/// Teal `<key>` hint used in the status line and legend
pub fn key_hint(key: &str) -> ColoredString {
    paint(&format!("<{key}>"), Tone::Teal)
}

pub fn get_change_color_style(kind: ChangeKind) -> Box<dyn Fn(&str) -> ColoredString> {
    match kind {
        ChangeKind::Add => Box::new(|text: &str| paint(text, Tone::Green)),
        ChangeKind::Remove => Box::new(|text: &str| paint(text, Tone::Red)),
        ChangeKind::Context => Box::new(|text: &str| paint(text, Tone::Subtext)),
    }
}

/// Icon and color for a ref label in the table's message column.
pub fn get_ref_color_style(kind: RefKind) -> (&'static str, Tone) {
    const BRANCH: &str = "\u{21c4}";
    const TAG: &str = "\u{2691}";
    match kind {
        RefKind::Remote => (BRANCH, Tone::Sky),
        RefKind::Head => (BRANCH, Tone::Green),
        RefKind::Tag => (TAG, Tone::Red),
        RefKind::Local => (BRANCH, Tone::Peach),
    }
}

pub fn get_branch_color_style(kind: BranchKind) -> Box<dyn Fn(&str) -> ColoredString> {
    match kind {
        BranchKind::Current => Box::new(|text: &str| paint(text, Tone::Green).bold()),
        BranchKind::Local => Box::new(|text: &str| paint(text, Tone::Peach)),
        BranchKind::Remote => Box::new(|text: &str| paint(text, Tone::Sky)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_keeps_text() {
        let painted = paint("abc1234", Tone::Yellow);
        assert!(painted.to_string().contains("abc1234"));
    }

    #[test]
    fn test_key_hint_wraps_key() {
        assert!(key_hint("space").to_string().contains("<space>"));
    }

    #[test]
    fn test_ref_styles() {
        assert_eq!(get_ref_color_style(RefKind::Tag).0, "\u{2691}");
        assert_eq!(get_ref_color_style(RefKind::Head).1, Tone::Green);
        assert_eq!(get_ref_color_style(RefKind::Remote).1, Tone::Sky);
    }

    #[test]
    fn test_change_color_style_consistency() {
        for kind in [ChangeKind::Add, ChangeKind::Remove, ChangeKind::Context] {
            let color_fn = get_change_color_style(kind);
            assert_eq!(color_fn("line").to_string(), color_fn("line").to_string());
        }
    }
}
