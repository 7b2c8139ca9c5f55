//! Parsing of `git show --stat` output into [`CommitDetail`].
//!
//! The text is split into three regions: the header block (up to the first
//! blank line), the message, and the stat section (from the first file-stat
//! or summary line onward). Any region may be missing; the parser returns
//! whatever it recognised and never fails.

use regex::Regex;
use std::sync::LazyLock;

static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(\d+)\s+files?\s+changed(?:,\s*(\d+)\s+insertions?\(\+\))?(?:,\s*(\d+)\s+deletions?\(-\))?",
    )
    .expect("valid summary regex")
});

/// Inputs of this many `\n`-separated segments or fewer carry no usable
/// detail. A trailing newline counts as one more (empty) segment.
const MAX_EMPTY_SEGMENTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileStat {
    pub path: String,
    /// Total changed lines as printed by git
    pub changes: u32,
    /// Insertions apportioned from the `+`/`-` graph
    pub insertions: u32,
    pub deletions: u32,
    pub is_binary: bool,
    /// The raw change column, e.g. `12 +++--` or `Bin 0 -> 1024 bytes`
    pub graph: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatSummary {
    pub files_changed: u32,
    pub insertions: u32,
    pub deletions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitDetail {
    pub hash: String,
    /// Trailing decoration on the `commit` line, e.g. `(HEAD -> main)`
    pub decoration: Option<String>,
    pub merge_parents: Vec<String>,
    pub author_name: String,
    pub author_email: String,
    pub date: String,
    pub message: String,
    pub file_stats: Vec<FileStat>,
    pub summary: Option<StatSummary>,
}

impl CommitDetail {
    pub fn is_empty(&self) -> bool {
        self.hash.is_empty()
            && self.author_name.is_empty()
            && self.message.is_empty()
            && self.file_stats.is_empty()
            && self.summary.is_none()
    }
}

pub fn is_summary_line(line: &str) -> bool {
    SUMMARY_LINE.is_match(line)
}

fn is_file_stat_line(line: &str) -> bool {
    line.starts_with(char::is_whitespace) && line.contains('|')
}

/// Parses the output of `git show --stat <rev>`.
pub fn parse_show_detail(text: &str) -> CommitDetail {
    if text.split('\n').count() <= MAX_EMPTY_SEGMENTS {
        return CommitDetail::default();
    }
    let lines: Vec<&str> = text.lines().collect();

    let header_end = lines
        .iter()
        .position(|l| l.trim().is_empty())
        .unwrap_or(lines.len());
    let stats_start = lines[header_end..]
        .iter()
        .position(|l| is_file_stat_line(l) || is_summary_line(l))
        .map_or(lines.len(), |offset| header_end + offset);

    let mut detail = CommitDetail::default();
    parse_header(&lines[..header_end], &mut detail);
    detail.message = parse_message(&lines[header_end..stats_start]);
    parse_stats(&lines[stats_start..], &mut detail);
    detail
}

fn parse_header(lines: &[&str], detail: &mut CommitDetail) {
    for line in lines {
        if let Some(rest) = line.strip_prefix("commit ") {
            let rest = rest.trim();
            let (hash, decoration) = rest.split_once(' ').unwrap_or((rest, ""));
            detail.hash = hash.to_string();
            detail.decoration = Some(decoration.trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string);
        } else if let Some(rest) = line.strip_prefix("Merge:") {
            detail.merge_parents = rest.split_whitespace().map(str::to_string).collect();
        } else if let Some(rest) = line.strip_prefix("Author:") {
            let (name, email) = split_author(rest);
            detail.author_name = name;
            detail.author_email = email;
        } else if let Some(rest) = line.strip_prefix("Date:") {
            detail.date = rest.trim().to_string();
        } else {
            log::debug!("Ignoring header line: {line}");
        }
    }
}

/// Splits `Jane Doe <jane@example.com>` into name and address.
fn split_author(raw: &str) -> (String, String) {
    let raw = raw.trim();
    match (raw.find('<'), raw.rfind('>')) {
        (Some(open), Some(close)) if open < close => (
            raw[..open].trim().to_string(),
            raw[open + 1..close].trim().to_string(),
        ),
        _ => (raw.to_string(), String::new()),
    }
}

fn parse_message(lines: &[&str]) -> String {
    let body: Vec<&str> = lines
        .iter()
        .map(|l| l.strip_prefix("    ").unwrap_or(l.trim_start()))
        .collect();
    let first = body.iter().position(|l| !l.trim().is_empty());
    let last = body.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => body[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn parse_stats(lines: &[&str], detail: &mut CommitDetail) {
    for line in lines {
        if is_file_stat_line(line) {
            if let Some(stat) = parse_file_stat(line) {
                detail.file_stats.push(stat);
            }
        } else if let Some(caps) = SUMMARY_LINE.captures(line) {
            let number = |i: usize| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .unwrap_or(0)
            };
            detail.summary = Some(StatSummary {
                files_changed: number(1),
                insertions: number(2),
                deletions: number(3),
            });
        }
    }
}

fn parse_file_stat(line: &str) -> Option<FileStat> {
    let (path, change) = line.rsplit_once('|')?;
    let path = path.trim().to_string();
    let graph = change.trim().to_string();

    if graph.starts_with("Bin") {
        return Some(FileStat {
            path,
            is_binary: true,
            graph,
            ..Default::default()
        });
    }

    let mut parts = graph.split_whitespace();
    let changes = parts.next().and_then(|n| n.parse::<u32>().ok()).unwrap_or(0);
    let bars = parts.next().unwrap_or_default();
    let (insertions, deletions) = apportion(changes, bars);

    Some(FileStat {
        path,
        changes,
        insertions,
        deletions,
        is_binary: false,
        graph,
    })
}

/// Splits a total change count by the ratio of `+` to `-` in the graph.
fn apportion(changes: u32, bars: &str) -> (u32, u32) {
    let plus = bars.chars().filter(|c| *c == '+').count() as u64;
    let minus = bars.chars().filter(|c| *c == '-').count() as u64;
    match (plus, minus) {
        (0, 0) => (0, 0),
        (_, 0) => (changes, 0),
        (0, _) => (0, changes),
        _ => {
            let total = plus + minus;
            // rounded share never exceeds `changes`
            let insertions = (u64::from(changes) * plus + total / 2) / total;
            let insertions = u32::try_from(insertions).unwrap_or(changes);
            (insertions, changes - insertions)
        }
    }
}

/// Where a branch from `git branch -a --contains` lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// Checked-out branch, marked with `*`
    Current,
    Local,
    /// `remotes/<remote>/<name>`
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub kind: BranchKind,
}

/// Parses a branch listing, one branch per line.
pub fn parse_branch_list(text: &str) -> Vec<BranchRef> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            if let Some(rest) = line.trim_start().strip_prefix("* ") {
                BranchRef {
                    name: rest.trim().to_string(),
                    kind: BranchKind::Current,
                }
            } else {
                let name = line.trim().to_string();
                let kind = if name.starts_with("remotes/") {
                    BranchKind::Remote
                } else {
                    BranchKind::Local
                };
                BranchRef { name, kind }
            }
        })
        .collect()
}
