//! Pure renderers turning parsed records into terminal text.
//!
//! Every function takes the target width explicitly and returns a `String`
//! with lines separated by `\n`; nothing here reads terminal state. The same
//! input always yields byte-identical output.
//!
//! # Public API
//! - [`table_view`]: One page of log entries as a bordered, two-line-per-cell table
//! - [`card_view`]: Commit detail card with optional branch-containment section
//! - [`status_line`] / [`legend`]: Mode badge, counters and key bindings
//! - [`diff_view`]: One file of a parsed diff with old/new row numbers
//! - [`summary_headline`]: One-line author/date/hash headline

use crate::core::browser::{BrowserState, Mode};
use crate::core::colors::{
    badge, get_branch_color_style, get_change_color_style, get_ref_color_style, key_hint, label,
    paint, Tone,
};
use crate::core::diff_parser::{ChangeKind, FileDiff, Hunk};
use crate::core::layout::{
    border, clean_file_path, display_width, pad_to_width, rule, strip_ansi_codes, titled_rule,
    truncate_to_width, wrap_to_width,
};
use crate::core::log_entry::{LogEntry, RefKind};
use crate::core::show_parser::{BranchKind, BranchRef, CommitDetail, FileStat, StatSummary};
use colored::*;
use regex::Regex;
use std::sync::LazyLock;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'[^']+'|"[^"]+""#).expect("valid quote regex"));

/// Borders plus one column of padding on each side of three cells.
const TABLE_CHROME: usize = 10;
const MIN_MESSAGE_WIDTH: usize = 10;
const MIN_AUTHOR_WIDTH: usize = 4;
/// Card chrome: `│ ` and ` │`
const CARD_CHROME: usize = 4;
const MESSAGE_INDENT: &str = "    ";
const TAB_WIDTH: usize = 4;

type Cell = Vec<String>;

/// Column widths for one page, derived from that page's content only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumns {
    pub hash: usize,
    pub author: usize,
    pub message: usize,
}

impl TableColumns {
    pub fn for_page(entries: &[LogEntry], width: usize) -> Self {
        let hash = widest(
            ["Hash", "Date"].into_iter().chain(
                entries
                    .iter()
                    .flat_map(|e| [e.short_hash.as_str(), e.date.as_str()]),
            ),
        );
        let author_wanted = widest(
            ["Author", "Time"].into_iter().chain(
                entries
                    .iter()
                    .flat_map(|e| [e.author.as_str(), e.time.as_str()]),
            ),
        );

        let available = width.saturating_sub(TABLE_CHROME + hash);
        let author = author_wanted
            .min(available.saturating_sub(MIN_MESSAGE_WIDTH))
            .max(MIN_AUTHOR_WIDTH);
        let message = available.saturating_sub(author).max(MIN_MESSAGE_WIDTH);

        Self {
            hash,
            author,
            message,
        }
    }

    pub fn total_width(&self) -> usize {
        self.hash + self.author + self.message + TABLE_CHROME
    }

    fn joins(&self) -> [usize; 2] {
        let first = self.hash + 3;
        [first, first + self.author + 3]
    }
}

fn widest<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(display_width).max().unwrap_or(0)
}

/// Renders one page of entries. `highlight` is the selected row within the
/// page; `yanked` switches its highlight color.
pub fn table_view(
    entries: &[LogEntry],
    highlight: Option<usize>,
    yanked: bool,
    width: usize,
) -> String {
    let columns = TableColumns::for_page(entries, width);
    let total = columns.total_width();
    let joins = columns.joins();
    let separator = border_line(rule(
        border::LEFT_JOIN,
        border::RIGHT_JOIN,
        border::CROSS,
        total,
        &joins,
    ));

    let mut lines = vec![border_line(rule(
        border::TOP_LEFT,
        border::TOP_RIGHT,
        border::TOP_JOIN,
        total,
        &joins,
    ))];

    let title = |a: &str, b: &str| -> Cell {
        vec![
            paint(a, Tone::Green).bold().to_string(),
            paint(b, Tone::Green).bold().to_string(),
        ]
    };
    push_row(
        &mut lines,
        &columns,
        [title("Hash", "Date"), title("Author", "Time"), title("Message", "Ref")],
    );

    for (idx, entry) in entries.iter().enumerate() {
        lines.push(separator.clone());
        let selected = highlight == Some(idx);
        push_row(&mut lines, &columns, entry_cells(entry, &columns, selected, yanked));
    }

    lines.push(border_line(rule(
        border::BOTTOM_LEFT,
        border::BOTTOM_RIGHT,
        border::BOTTOM_JOIN,
        total,
        &joins,
    )));
    lines.join("\n")
}

fn entry_cells(entry: &LogEntry, columns: &TableColumns, selected: bool, yanked: bool) -> [Cell; 3] {
    let hash = match (selected, yanked) {
        (true, true) => badge(&entry.short_hash, Tone::Sky),
        (true, false) => badge(&entry.short_hash, Tone::Yellow),
        (false, _) => paint(&entry.short_hash, Tone::Yellow),
    };
    let hash_cell = vec![hash.to_string(), paint(&entry.date, Tone::Mauve).to_string()];

    let author_cell = vec![
        paint(&truncate_to_width(&entry.author, columns.author), Tone::Blue).to_string(),
        paint(&entry.time, Tone::Mauve).to_string(),
    ];

    let mut message_cell: Cell = wrap_to_width(&entry.subject, columns.message)
        .iter()
        .map(|line| paint(line, Tone::Pink).to_string())
        .collect();
    message_cell.extend(entry.refs.iter().map(|name| {
        let (icon, tone) = get_ref_color_style(RefKind::classify(name));
        let text = truncate_to_width(&format!("{icon} {}", name.trim()), columns.message);
        paint(&text, tone).to_string()
    }));

    [hash_cell, author_cell, message_cell]
}

fn push_row(lines: &mut Vec<String>, columns: &TableColumns, cells: [Cell; 3]) {
    let widths = [columns.hash, columns.author, columns.message];
    let height = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let bar = border_line(border::VERTICAL.to_string());

    for i in 0..height {
        let mut line = bar.clone();
        for (cell, width) in cells.iter().zip(widths) {
            let content = cell.get(i).map(String::as_str).unwrap_or("");
            line.push(' ');
            line.push_str(&pad_to_width(content, width));
            line.push(' ');
            line.push_str(&bar);
        }
        lines.push(line);
    }
}

fn border_line(text: String) -> String {
    paint(&text, Tone::Overlay).to_string()
}

/// Renders a commit detail card spanning `width` columns. A missing or empty
/// detail yields an empty placeholder block.
pub fn card_view(
    detail: Option<&CommitDetail>,
    branches: &[BranchRef],
    show_branches: bool,
    width: usize,
) -> String {
    let inner = width.saturating_sub(CARD_CHROME).max(1);
    let total = inner + CARD_CHROME;

    let mut body: Vec<String> = Vec::new();
    match detail.filter(|d| !d.is_empty()) {
        Some(detail) => {
            let sections = [
                format_header(detail, inner),
                format_message(&detail.message, inner),
                format_file_stats(&detail.file_stats, detail.summary.as_ref(), inner),
            ];
            for section in sections.into_iter().filter(|s| !s.is_empty()) {
                if !body.is_empty() {
                    body.push(String::new());
                }
                body.extend(section);
            }
        }
        None => body.push(String::new()),
    }

    let mut lines = vec![border_line(rule(
        border::TOP_LEFT,
        border::TOP_RIGHT,
        border::HORIZONTAL,
        total,
        &[],
    ))];
    lines.extend(body.iter().map(|line| card_line(line, inner)));

    if show_branches && detail.is_some_and(|d| !d.is_empty()) {
        lines.push(border_line(rule(
            border::LEFT_JOIN,
            border::RIGHT_JOIN,
            border::HORIZONTAL,
            total,
            &[],
        )));
        lines.extend(format_branches(branches, inner).iter().map(|line| card_line(line, inner)));
    }

    lines.push(border_line(rule(
        border::BOTTOM_LEFT,
        border::BOTTOM_RIGHT,
        border::HORIZONTAL,
        total,
        &[],
    )));
    lines.join("\n")
}

fn card_line(content: &str, inner: usize) -> String {
    let bar = border_line(border::VERTICAL.to_string());
    let content = if display_width(content) > inner {
        truncate_to_width(&strip_ansi_codes(content), inner)
    } else {
        content.to_string()
    };
    format!("{bar} {} {bar}", pad_to_width(&content, inner))
}

fn format_header(detail: &CommitDetail, inner: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if !detail.hash.is_empty() {
        let mut line = format!("{} {}", label("Commit:"), paint(&detail.hash, Tone::Yellow));
        if let Some(decoration) = &detail.decoration {
            let room = inner.saturating_sub(display_width(&line) + 1);
            if room > 2 {
                line.push(' ');
                line.push_str(&paint(&truncate_to_width(decoration, room), Tone::Pink).to_string());
            }
        }
        lines.push(line);
    }
    if let [first, rest @ ..] = detail.merge_parents.as_slice() {
        let mut line = format!("{} {}", label("Merge:"), paint(first, Tone::Sky));
        for parent in rest {
            line.push(' ');
            line.push_str(&paint(parent, Tone::Green).to_string());
        }
        lines.push(line);
    }
    if !detail.author_name.is_empty() {
        let mut line = format!("{} {}", label("Author:"), paint(&detail.author_name, Tone::Mauve));
        if !detail.author_email.is_empty() {
            line.push_str(&format!(" <{}>", paint(&detail.author_email, Tone::Green)));
        }
        lines.push(line);
    }
    if !detail.date.is_empty() {
        lines.push(format!("{} {}", label("Date:"), paint(&detail.date, Tone::Teal)));
    }
    lines
}

fn format_message(message: &str, inner: usize) -> Vec<String> {
    if message.is_empty() {
        return Vec::new();
    }
    let wrap_width = inner.saturating_sub(MESSAGE_INDENT.len()).max(1);
    message
        .lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                wrap_to_width(line, wrap_width)
                    .into_iter()
                    .map(|l| format!("{MESSAGE_INDENT}{}", emphasize_quotes(&l)))
                    .collect()
            }
        })
        .collect()
}

/// Highlights `'single'` and `"double"` quoted substrings.
pub fn emphasize_quotes(line: &str) -> String {
    QUOTED
        .replace_all(line, |caps: &regex::Captures| {
            paint(&caps[0], Tone::Pink).bold().to_string()
        })
        .into_owned()
}

fn format_file_stats(stats: &[FileStat], summary: Option<&StatSummary>, inner: usize) -> Vec<String> {
    let graph_width = stats
        .iter()
        .map(|s| display_width(&s.graph))
        .max()
        .unwrap_or(0);
    let longest_path = stats.iter().map(|s| display_width(&s.path)).max().unwrap_or(0);
    let path_width = longest_path
        .min(inner.saturating_sub(graph_width + 3))
        .max(8);

    let mut lines: Vec<String> = stats
        .iter()
        .map(|stat| {
            format!(
                "{} {} {}",
                paint(&clean_file_path(&stat.path, path_width), Tone::Mauve),
                paint("|", Tone::Overlay),
                render_file_change(stat)
            )
        })
        .collect();
    if let Some(summary) = summary {
        lines.push(render_summary_line(summary));
    }
    lines
}

/// Change count in blue followed by a marker colored by which side dominates.
pub fn render_file_change(stat: &FileStat) -> String {
    if stat.is_binary {
        return paint(&stat.graph, Tone::Blue).to_string();
    }
    let count = paint(&stat.changes.to_string(), Tone::Blue);
    let green = |s: &str| paint(s, Tone::Green).to_string();
    let red = |s: &str| paint(s, Tone::Red).to_string();
    let marker = match (stat.insertions, stat.deletions) {
        (0, 0) => String::new(),
        (_, 0) => green("+++"),
        (0, _) => red("---"),
        (ins, del) if ins > del => format!("{}{}", green("++"), red("-")),
        (ins, del) if ins < del => format!("{}{}", green("+"), red("--")),
        _ => format!("{}{}", green("+"), red("-")),
    };
    if marker.is_empty() {
        count.to_string()
    } else {
        format!("{count} {marker}")
    }
}

pub fn render_summary_line(summary: &StatSummary) -> String {
    let plural = |n: u32, word: &str| if n == 1 { word.to_string() } else { format!("{word}s") };
    let mut line = format!(
        " {} {} {}",
        paint(&summary.files_changed.to_string(), Tone::Blue),
        paint(&plural(summary.files_changed, "file"), Tone::Yellow),
        paint("changed", Tone::Yellow)
    );
    if summary.insertions > 0 {
        line.push_str(&format!(
            ", {} {}",
            paint(&summary.insertions.to_string(), Tone::Blue),
            paint(&format!("{}(+)", plural(summary.insertions, "insertion")), Tone::Green)
        ));
    }
    if summary.deletions > 0 {
        line.push_str(&format!(
            ", {} {}",
            paint(&summary.deletions.to_string(), Tone::Blue),
            paint(&format!("{}(-)", plural(summary.deletions, "deletion")), Tone::Red)
        ));
    }
    line
}

fn format_branches(branches: &[BranchRef], inner: usize) -> Vec<String> {
    let mut lines = vec![label("Branches:").to_string()];
    if branches.is_empty() {
        lines.push(paint("  no branch contains this commit", Tone::Overlay).to_string());
        return lines;
    }
    lines.extend(branches.iter().map(|branch| {
        let icon = match branch.kind {
            BranchKind::Current => "\u{25cf}",
            BranchKind::Local => "\u{25cb}",
            BranchKind::Remote => "\u{21c4}",
        };
        let text = truncate_to_width(&format!("  {icon} {}", branch.name), inner);
        get_branch_color_style(branch.kind)(&text).to_string()
    }));
    lines
}

/// Mode badge plus page or row counter.
pub fn status_line(state: &BrowserState, page_count: usize, page_len: usize) -> String {
    let (text, tone) = match state.mode {
        Mode::Page => (" PAG ", Tone::Green),
        Mode::Row => (" ROW ", Tone::Yellow),
    };
    let counter = match state.mode {
        Mode::Page => format!("{}/{}", state.page_index + 1, page_count.max(1)),
        Mode::Row => format!("{}/{}", state.row_index.map_or(0, |r| r + 1), page_len),
    };
    format!(
        "{} {} (Press {} to view the key mapping.)",
        badge(text, tone),
        key_hint(&counter),
        key_hint("h")
    )
}

const PAGE_KEYS: [(&str, &str); 5] = [
    ("Mode", "space"),
    ("Prev", "k"),
    ("Next", "j"),
    ("Legend", "h"),
    ("Quit", "q"),
];

const ROW_KEYS: [(&str, &str); 5] = [
    ("Detail", "enter"),
    ("Branches", "b"),
    ("Yank", "y"),
    ("Summary", "s"),
    ("Diff", "d"),
];

/// Fixed key-binding legend block.
pub fn legend() -> String {
    let group = |name: &str, keys: &[(&str, &str)]| {
        let keys: Vec<String> = keys
            .iter()
            .map(|(desc, key)| format!("{desc} {}", key_hint(key)))
            .collect();
        format!("{}: {}", label(name), keys.join(", "))
    };
    format!("{}\n{}", group("NOR", &PAGE_KEYS), group("ROW", &ROW_KEYS))
}

/// `author (relative date) hash` headline printed when a summary is dispatched.
pub fn summary_headline(entry: &LogEntry) -> String {
    format!(
        "{} ({}) {}",
        paint(&entry.author, Tone::Blue).bold(),
        paint(&entry.relative_date, Tone::Mauve),
        paint(&entry.hash, Tone::Yellow)
    )
}

/// Renders one file of a parsed diff as a titled block.
pub fn diff_view(file: &FileDiff, width: usize) -> String {
    let width = width.max(8);
    let title = truncate_to_width(&file.path, width.saturating_sub(6));
    let top = titled_rule(&title, width);
    let top = match top.split_once(&format!(" {title} ")) {
        Some((left, right)) => format!(
            "{} {} {}",
            paint(left, Tone::Overlay),
            paint(&title, Tone::Mauve).bold(),
            paint(right, Tone::Overlay)
        ),
        None => border_line(top),
    };

    let divider = format!(" {} ", border_line(border::HORIZONTAL.to_string().repeat(width - 2)));
    let mut lines = vec![top];
    if file.hunks.is_empty() {
        lines.push(paint(" binary or mode-only change", Tone::Overlay).to_string());
    }
    for (idx, hunk) in file.hunks.iter().enumerate() {
        if idx > 0 {
            lines.push(divider.clone());
        }
        lines.extend(hunk_lines(hunk, width));
    }
    lines.push(border_line(rule(
        border::BOTTOM_LEFT,
        border::BOTTOM_RIGHT,
        border::HORIZONTAL,
        width,
        &[],
    )));
    lines.join("\n")
}

fn hunk_lines(hunk: &Hunk, width: usize) -> Vec<String> {
    let number_width = hunk.row_number_width();
    let text_width = width.saturating_sub(number_width * 2 + 3).max(1);
    let row = |n: Option<u32>| match n {
        Some(n) => format!("{n:>number_width$}"),
        None => " ".repeat(number_width),
    };

    let mut lines = Vec::with_capacity(hunk.lines.len() + 1);
    if let Some(heading) = &hunk.heading {
        let header = format!(
            "@@ -{},{} +{},{} @@ {heading}",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        );
        lines.push(paint(&truncate_to_width(&header, width), Tone::Sky).to_string());
    }
    for line in &hunk.lines {
        let text = format!("{}{}", line.kind.marker(), line.text.replace('\t', &" ".repeat(TAB_WIDTH)));
        let color = get_change_color_style(line.kind);
        let text = color(&truncate_to_width(&text, text_width));
        let text = match line.kind {
            ChangeKind::Context => text,
            _ => text.bold(),
        };
        lines.push(format!(
            "{} {} {}",
            paint(&row(line.old_row), Tone::Yellow),
            paint(&row(line.new_row), Tone::Sky),
            text
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diff_parser::parse_diff;
    use crate::core::log_entry::tests::sample_entries;
    use crate::core::show_parser::{parse_branch_list, parse_show_detail, tests::FULL_SHOW};

    fn plain(text: &str) -> String {
        strip_ansi_codes(text)
    }

    #[test]
    fn test_table_view_is_deterministic() {
        let entries = sample_entries(5);
        let first = table_view(&entries, Some(2), false, 80);
        let second = table_view(&entries, Some(2), false, 80);
        assert_eq!(first, second);
    }

    #[test]
    fn test_table_view_lines_share_width() {
        let entries = sample_entries(3);
        let out = plain(&table_view(&entries, None, false, 80));
        let widths: Vec<usize> = out.lines().map(display_width).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
        assert!(widths[0] <= 80);
    }

    #[test]
    fn test_table_view_contains_two_line_cells() {
        let entries = sample_entries(2);
        let out = plain(&table_view(&entries, Some(0), false, 80));
        assert!(out.contains("Hash"));
        assert!(out.contains("Date"));
        assert!(out.contains(&entries[1].short_hash));
        assert!(out.contains("author1"));
        assert!(out.contains("commit number 1"));
        assert!(out.contains("HEAD -> main"));
        // header + 2 entries with separators
        assert!(out.lines().count() >= 1 + 2 + 2 * 2 + 1);
    }

    #[test]
    fn test_columns_follow_current_page_only() {
        let mut entries = sample_entries(2);
        let narrow = TableColumns::for_page(&entries, 80);
        entries[1].author = "A Much Longer Author Name".to_string();
        let wide = TableColumns::for_page(&entries, 80);
        assert!(wide.author > narrow.author);
        assert_eq!(narrow.total_width(), 80);
        assert_eq!(wide.total_width(), 80);
    }

    #[test]
    fn test_card_view_sections_in_order() {
        let detail = parse_show_detail(FULL_SHOW);
        let out = plain(&card_view(Some(&detail), &[], false, 90));
        let commit = out.find("Commit:").unwrap();
        let author = out.find("Author:").unwrap();
        let message = out.find("Add 'pager'").unwrap();
        let stat = out.find("src/browser.rs").unwrap();
        let summary = out.find("3 files changed").unwrap();
        assert!(commit < author && author < message && message < stat && stat < summary);
        assert!(!out.contains("Branches:"));
        assert!(out.lines().all(|l| display_width(l) == 90));
    }

    #[test]
    fn test_card_view_with_branches() {
        let detail = parse_show_detail(FULL_SHOW);
        let branches = parse_branch_list("* main\n  remotes/origin/main\n");
        let out = plain(&card_view(Some(&detail), &branches, true, 80));
        let divider = out.find('├').unwrap();
        assert!(divider < out.find("Branches:").unwrap());
        assert!(out.contains("\u{25cf} main"));
        assert!(out.contains("\u{21c4} remotes/origin/main"));
    }

    #[test]
    fn test_card_view_placeholder_for_missing_detail() {
        let out = plain(&card_view(None, &[], true, 40));
        assert_eq!(out.lines().count(), 3);
        assert!(!out.contains("Branches:"));

        let empty = CommitDetail::default();
        assert_eq!(plain(&card_view(Some(&empty), &[], false, 40)), out);
    }

    #[test]
    fn test_render_file_change_dominance() {
        let stat = |insertions, deletions| FileStat {
            path: "a".into(),
            changes: insertions + deletions,
            insertions,
            deletions,
            is_binary: false,
            graph: String::new(),
        };
        assert_eq!(plain(&render_file_change(&stat(4, 0))), "4 +++");
        assert_eq!(plain(&render_file_change(&stat(0, 4))), "4 ---");
        assert_eq!(plain(&render_file_change(&stat(3, 1))), "4 ++-");
        assert_eq!(plain(&render_file_change(&stat(1, 3))), "4 +--");
    }

    #[test]
    fn test_summary_line_pluralization() {
        let summary = StatSummary {
            files_changed: 1,
            insertions: 2,
            deletions: 0,
        };
        assert_eq!(
            plain(&render_summary_line(&summary)),
            " 1 file changed, 2 insertions(+)"
        );
    }

    #[test]
    fn test_status_line_counters() {
        let mut state = BrowserState::default();
        assert!(plain(&status_line(&state, 3, 5)).contains("PAG  <1/3>"));
        state.mode = Mode::Row;
        state.row_index = Some(1);
        assert!(plain(&status_line(&state, 3, 5)).contains("ROW  <2/5>"));
    }

    #[test]
    fn test_legend_lists_every_key() {
        let out = plain(&legend());
        for key in ["space", "k", "j", "h", "q", "enter", "b", "y", "s", "d"] {
            assert!(out.contains(&format!("<{key}>")), "missing {key}");
        }
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_diff_view_row_columns() {
        let files = parse_diff(
            "diff --git a/f b/f\n--- a/f\n+++ b/f\n@@ -10,3 +10,4 @@\n ctx\n-old\n+new1\n+new2\n",
        );
        let out = plain(&diff_view(&files[0], 40));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains(" f "));
        assert_eq!(lines[1], "10 10  ctx");
        assert_eq!(lines[2], "11    -old");
        assert_eq!(lines[3], "   11 +new1");
        assert_eq!(lines[4], "   12 +new2");
    }

    #[test]
    fn test_emphasize_quotes_keeps_text() {
        let out = emphasize_quotes("use 'foo' and \"bar\"");
        assert_eq!(plain(&out), "use 'foo' and \"bar\"");
    }
}
