//! Commit records shown by the browser.
//!
//! [`LogEntry`] values are produced from `git log` output written with
//! [`LOG_FORMAT`]: fields separated by the ASCII unit separator and records
//! terminated by the record separator, so multi-line bodies survive intact.
//! Field order is fixed: short hash, author, subject, date, time, ref labels,
//! body, full hash, relative date.

pub const FIELD_SEPARATOR: char = '\u{1f}';
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// `--format` argument matching [`parse_log_output`]. Date and time both come
/// from `%ad`, split by [`LOG_DATE_FORMAT`].
pub const LOG_FORMAT: &str = "%h%x1f%an%x1f%s%x1f%ad%x1f%D%x1f%b%x1f%H%x1f%ar%x1e";

/// `--date` argument producing `<date><US><time>` for `%ad`.
pub const LOG_DATE_FORMAT: &str = "format:%Y-%m-%d\u{1f}%H:%M:%S";

const FIELD_COUNT: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub short_hash: String,
    pub author: String,
    pub subject: String,
    pub date: String,
    pub time: String,
    pub refs: Vec<String>,
    pub body: String,
    pub hash: String,
    pub relative_date: String,
}

/// Classification of a ref label, used for icon and color selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `HEAD -> branch`
    Head,
    /// `origin/...` and other remote-tracking refs
    Remote,
    /// `tag: v1.0`
    Tag,
    Local,
}

impl RefKind {
    pub fn classify(label: &str) -> Self {
        let label = label.trim();
        if label.starts_with("HEAD ->") || label == "HEAD" {
            RefKind::Head
        } else if label.starts_with("tag:") {
            RefKind::Tag
        } else if label.starts_with("origin") || label.contains('/') {
            RefKind::Remote
        } else {
            RefKind::Local
        }
    }
}

impl LogEntry {
    /// Builds an entry from fields in the fixed log order. Returns `None` when
    /// fewer fields than expected are present.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        if fields.len() < FIELD_COUNT {
            return None;
        }

        Some(Self {
            short_hash: fields[0].trim().to_string(),
            author: fields[1].trim().to_string(),
            subject: fields[2].trim().to_string(),
            date: fields[3].trim().to_string(),
            time: fields[4].trim().to_string(),
            refs: split_refs(fields[5]),
            body: fields[6].trim().to_string(),
            hash: fields[7].trim().to_string(),
            relative_date: fields[8].trim().to_string(),
        })
    }
}

fn split_refs(raw: &str) -> Vec<String> {
    raw.split(", ")
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses raw `git log` output written with [`LOG_FORMAT`] and
/// [`LOG_DATE_FORMAT`]. Records with missing fields are skipped.
pub fn parse_log_output(raw: &str) -> Vec<LogEntry> {
    raw.split(RECORD_SEPARATOR)
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| {
            // git puts a newline between records; only strip it from the front
            let record = record.trim_start_matches(['\n', '\r']);
            let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
            let entry = LogEntry::from_fields(&fields);
            if entry.is_none() {
                log::warn!("Skipping malformed log record with {} fields", fields.len());
            }
            entry
        })
        .collect()
}
