//! Unified diff parsing with per-line row number reconstruction.
//!
//! [`parse_diff`] turns the literal output of `git diff` / `git show` (or plain
//! `diff -u`) into [`FileDiff`] records. Every [`DiffLine`] carries the row
//! numbers it occupies on the old and new side: additions advance only the new
//! side, removals only the old side, context lines both.
//!
//! The parser never fails. Lines it does not recognise outside a hunk are
//! metadata and are dropped.

use regex::Regex;
use std::sync::LazyLock;

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$").expect("valid hunk regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Context,
    Add,
    Remove,
}

impl ChangeKind {
    pub fn marker(self) -> char {
        match self {
            ChangeKind::Context => ' ',
            ChangeKind::Add => '+',
            ChangeKind::Remove => '-',
        }
    }

    fn advances_old(self) -> bool {
        self != ChangeKind::Add
    }

    fn advances_new(self) -> bool {
        self != ChangeKind::Remove
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: ChangeKind,
    /// Line content without the leading marker
    pub text: String,
    pub old_row: Option<u32>,
    pub new_row: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    /// Function context after the closing `@@`, if any
    pub heading: Option<String>,
    pub lines: Vec<DiffLine>,
    old_cursor: u32,
    new_cursor: u32,
}

impl Hunk {
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            heading: None,
            lines: Vec::new(),
            old_cursor: old_start.saturating_sub(1),
            new_cursor: new_start.saturating_sub(1),
        }
    }

    /// Appends a line, numbering it from the running counters.
    pub fn push(&mut self, kind: ChangeKind, text: impl Into<String>) {
        let old_row = kind.advances_old().then(|| {
            self.old_cursor = self.old_cursor.saturating_add(1);
            self.old_cursor
        });
        let new_row = kind.advances_new().then(|| {
            self.new_cursor = self.new_cursor.saturating_add(1);
            self.new_cursor
        });
        self.lines.push(DiffLine {
            kind,
            text: text.into(),
            old_row,
            new_row,
        });
    }

    /// Whether the lines seen so far cover both declared counts.
    pub fn is_complete(&self) -> bool {
        self.old_lines() >= self.old_count && self.new_lines() >= self.new_count
    }

    /// Lines occupying a row on the old side (context + removals).
    pub fn old_lines(&self) -> u32 {
        self.lines.iter().filter(|l| l.old_row.is_some()).count() as u32
    }

    /// Lines occupying a row on the new side (context + additions).
    pub fn new_lines(&self) -> u32 {
        self.lines.iter().filter(|l| l.new_row.is_some()).count() as u32
    }

    /// Widest row number this hunk can print on either side.
    pub fn row_number_width(&self) -> usize {
        let old_end = u64::from(self.old_start) + u64::from(self.old_count);
        let new_end = u64::from(self.new_start) + u64::from(self.new_count);
        old_end.max(new_end).to_string().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileDiff {
    pub path: String,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hunks: Vec::new(),
        }
    }

    pub fn additions(&self) -> usize {
        self.count_kind(ChangeKind::Add)
    }

    pub fn deletions(&self) -> usize {
        self.count_kind(ChangeKind::Remove)
    }

    fn count_kind(&self, kind: ChangeKind) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// Parses unified diff text into one [`FileDiff`] per file section.
pub fn parse_diff(text: &str) -> Vec<FileDiff> {
    let mut parser = DiffParser::default();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

#[derive(Default)]
struct DiffParser {
    files: Vec<FileDiff>,
    current: Option<FileDiff>,
    hunk: Option<Hunk>,
    /// Path from the `---` header, used when the new side is /dev/null
    old_path: Option<String>,
}

impl DiffParser {
    fn feed(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            self.start_file(path_from_git_header(rest));
            return;
        }

        if self.expects_header() {
            if let Some(rest) = line.strip_prefix("--- ") {
                // plain `diff -u` output has no `diff --git` line
                if self.current.as_ref().is_none_or(|f| !f.hunks.is_empty())
                    || self.hunk.is_some()
                {
                    self.start_file(String::new());
                }
                self.old_path = Some(strip_side_prefix(rest, "a/"));
                return;
            }
            if let Some(rest) = line.strip_prefix("+++ ") {
                self.set_new_path(rest);
                return;
            }
        }

        if let Some(caps) = HUNK_HEADER.captures(line) {
            let number = |i: usize, default: u32| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .unwrap_or(default)
            };
            self.close_hunk();
            let mut hunk = Hunk::new(number(1, 0), number(2, 1), number(3, 0), number(4, 1));
            hunk.heading = caps
                .get(5)
                .map(|m| m.as_str().trim().to_string())
                .filter(|h| !h.is_empty());
            if self.current.is_none() {
                self.start_file(String::new());
            }
            self.hunk = Some(hunk);
            return;
        }

        let Some(hunk) = self.hunk.as_mut() else {
            // index, mode, rename, similarity and binary lines
            return;
        };

        match line.chars().next() {
            Some('+') => hunk.push(ChangeKind::Add, &line[1..]),
            Some('-') => hunk.push(ChangeKind::Remove, &line[1..]),
            Some(' ') => hunk.push(ChangeKind::Context, &line[1..]),
            None => hunk.push(ChangeKind::Context, ""),
            // "\ No newline at end of file"
            Some('\\') => {}
            Some(_) => {
                if hunk.is_complete() {
                    self.close_hunk();
                } else {
                    hunk.push(ChangeKind::Context, line);
                }
            }
        }
    }

    /// File headers are only recognised outside a hunk or after the open
    /// hunk has consumed its declared line counts.
    fn expects_header(&self) -> bool {
        self.hunk.as_ref().is_none_or(Hunk::is_complete)
    }

    fn start_file(&mut self, path: String) {
        self.close_file();
        self.old_path = None;
        self.current = Some(FileDiff::new(path));
    }

    fn set_new_path(&mut self, raw: &str) {
        self.close_hunk();
        let path = strip_side_prefix(raw, "b/");
        let path = if path == "/dev/null" {
            self.old_path.clone().unwrap_or_default()
        } else {
            path
        };
        let file = self.current.get_or_insert_with(FileDiff::default);
        if !path.is_empty() && path != "/dev/null" {
            file.path = path;
        }
    }

    fn close_hunk(&mut self) {
        if let Some(hunk) = self.hunk.take() {
            if !hunk.is_complete() {
                log::debug!(
                    "Hunk @@ -{},{} +{},{} @@ ended early",
                    hunk.old_start,
                    hunk.old_count,
                    hunk.new_start,
                    hunk.new_count
                );
            }
            if let Some(file) = self.current.as_mut() {
                file.hunks.push(hunk);
            }
        }
    }

    fn close_file(&mut self) {
        self.close_hunk();
        if let Some(mut file) = self.current.take() {
            if file.path.is_empty() {
                if let Some(old) = self.old_path.take() {
                    file.path = old;
                }
            }
            self.files.push(file);
        }
    }

    fn finish(mut self) -> Vec<FileDiff> {
        self.close_file();
        self.files
    }
}

/// Extracts the new-side path from `a/x b/y`.
fn path_from_git_header(rest: &str) -> String {
    match rest.rfind(" b/") {
        Some(idx) => rest[idx + 3..].to_string(),
        None => rest.split_whitespace().last().unwrap_or_default().to_string(),
    }
}

fn strip_side_prefix(raw: &str, prefix: &str) -> String {
    // `--- a/file\t2024-01-01 ...` from plain diff carries a timestamp
    let raw = raw.split('\t').next().unwrap_or_default().trim();
    raw.strip_prefix(prefix).unwrap_or(raw).to_string()
}
