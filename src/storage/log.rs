use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Maximum size of the event log before inline trimming (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Entries older than this are dropped when the log is trimmed.
const TRIM_AGE_DAYS: i64 = 30;

/// Self-documenting header written at the top of a new event log.
const FILE_HEADER: &str = "\
<!-- taskflow event log — append-only storage incident record
     Entries record stored data that could not be read or written.
     View with: tf events
     Safe to delete if empty or stale. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of an event entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// Stored data was missing or unreadable and the seed was used
    Read,
    /// A flush to storage failed
    Write,
    /// The collection was replaced by a JSON import
    Import,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Read => write!(f, "read"),
            EventCategory::Write => write!(f, "write"),
            EventCategory::Import => write!(f, "import"),
        }
    }
}

impl EventCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "read" => Some(EventCategory::Read),
            "write" => Some(EventCategory::Write),
            "import" => Some(EventCategory::Import),
            _ => None,
        }
    }
}

/// A single entry in the event log.
#[derive(Debug, Clone)]
pub struct EventEntry {
    pub timestamp: DateTime<Utc>,
    pub category: EventCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl EventEntry {
    pub fn new(category: EventCategory, description: impl Into<String>) -> EventEntry {
        EventEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> EventEntry {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> EventEntry {
        self.body = body.into();
        self
    }

    /// Format this entry as a markdown block for the log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} — {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// Return the path to the event log file.
pub fn event_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".events.log")
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append an event entry to the log. Errors are swallowed and printed to
/// stderr; the log must never take the dashboard down.
pub fn log_event(data_dir: &Path, entry: EventEntry) {
    if let Err(e) = log_event_inner(data_dir, entry) {
        eprintln!("warning: could not write to event log: {}", e);
    }
}

fn log_event_inner(data_dir: &Path, entry: EventEntry) -> io::Result<()> {
    let path = event_log_path(data_dir);

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        trim_log(&path);
    }

    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Drop entries older than the trim age once the log exceeds MAX_LOG_SIZE.
fn trim_log(path: &Path) {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };
    let cutoff = Utc::now() - chrono::Duration::days(TRIM_AGE_DAYS);
    let trimmed = drop_entries_before(&content, &cutoff);
    if trimmed.len() < content.len() {
        let _ = std::fs::write(path, trimmed);
    }
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read event entries from the log, most recent first.
pub fn read_events(data_dir: &Path, limit: Option<usize>) -> Vec<EventEntry> {
    let path = event_log_path(data_dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries = entries.into_iter().skip(skip).collect();
    }
    entries.reverse();
    entries
}

/// Parse all entries from the log content string.
fn parse_entries(content: &str) -> Vec<EventEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut in_code_block = false;

        for line in lines.by_ref() {
            if line == "---" && !in_code_block {
                break;
            }
            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }
            if line.starts_with("```") {
                in_code_block = true;
                continue;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(colon) = trimmed.find(": ") {
                fields.push((trimmed[..colon].to_string(), trimmed[colon + 2..].to_string()));
            }
        }

        entries.push(EventEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> — <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, EventCategory, String)> {
    let dash_pos = header.find(" — ")?;
    let timestamp_str = &header[..dash_pos];
    let rest = &header[dash_pos + " — ".len()..];

    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);

    let colon_pos = rest.find(": ")?;
    let category = EventCategory::parse_category(&rest[..colon_pos])?;

    Some((timestamp, category, rest[colon_pos + 2..].to_string()))
}

/// Remove entries with timestamps before `cutoff`, preserving the header.
fn drop_entries_before(content: &str, cutoff: &DateTime<Utc>) -> String {
    let mut result = String::new();
    let mut current_entry = String::new();
    let mut current_timestamp: Option<DateTime<Utc>> = None;
    let mut in_header = true;

    for line in content.lines() {
        if in_header {
            result.push_str(line);
            result.push('\n');
            if line == "---" {
                in_header = false;
            }
            continue;
        }

        if let Some(stripped) = line.strip_prefix("## ") {
            if let Some(ts) = current_timestamp
                && ts >= *cutoff
            {
                result.push_str(&current_entry);
            }
            current_entry.clear();
            current_timestamp = parse_entry_header(stripped).map(|(ts, _, _)| ts);
            current_entry.push_str(line);
            current_entry.push('\n');
        } else {
            current_entry.push_str(line);
            current_entry.push('\n');
        }
    }

    if let Some(ts) = current_timestamp
        && ts >= *cutoff
    {
        result.push_str(&current_entry);
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_entry(category: EventCategory, desc: &str, body: &str) -> EventEntry {
        EventEntry::new(category, desc)
            .field("Key", "taskflow.tasks")
            .body(body)
    }

    #[test]
    fn entry_formatting() {
        let entry = make_entry(EventCategory::Read, "stored tasks unreadable", "not json");
        let md = entry.to_markdown();
        assert!(md.contains("## "));
        assert!(md.contains("read: stored tasks unreadable"));
        assert!(md.contains("Key: taskflow.tasks"));
        assert!(md.contains("```text"));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn log_and_read_most_recent_first() {
        let tmp = TempDir::new().unwrap();
        log_event(tmp.path(), make_entry(EventCategory::Read, "first", "b1"));
        log_event(tmp.path(), make_entry(EventCategory::Write, "second", "b2"));

        let entries = read_events(tmp.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "second");
        assert_eq!(entries[1].description, "first");
        assert_eq!(entries[1].body, "b1");
    }

    #[test]
    fn read_with_limit_keeps_newest() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            log_event(
                tmp.path(),
                make_entry(EventCategory::Write, &format!("entry{}", i), ""),
            );
        }
        let entries = read_events(tmp.path(), Some(2));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "entry4");
        assert_eq!(entries[1].description, "entry3");
    }

    #[test]
    fn read_missing_log_returns_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(read_events(&tmp.path().join("nope"), None).is_empty());
    }

    #[test]
    fn header_written_once() {
        let tmp = TempDir::new().unwrap();
        log_event(tmp.path(), make_entry(EventCategory::Read, "a", ""));
        log_event(tmp.path(), make_entry(EventCategory::Read, "b", ""));

        let content = std::fs::read_to_string(event_log_path(tmp.path())).unwrap();
        assert!(content.starts_with("<!-- taskflow event log"));
        assert_eq!(content.matches("taskflow event log").count(), 1);
    }

    #[test]
    fn parse_entry_header_variants() {
        use chrono::Datelike;

        let parsed = parse_entry_header("2026-02-10T14:32:05Z — write: flush failed");
        let (ts, cat, desc) = parsed.unwrap();
        assert_eq!(cat, EventCategory::Write);
        assert_eq!(desc, "flush failed");
        assert_eq!(ts.year(), 2026);

        assert!(parse_entry_header("garbage").is_none());
        assert!(parse_entry_header("2026-02-10T14:32:05Z — unknown: x").is_none());
    }

    #[test]
    fn drop_entries_before_preserves_header_and_recent() {
        let old = (Utc::now() - chrono::Duration::days(60))
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let new = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let content = format!(
            "{}\n## {} — read: old\n\n---\n## {} — write: new\n\n---\n",
            FILE_HEADER, old, new
        );

        let cutoff = Utc::now() - chrono::Duration::days(TRIM_AGE_DAYS);
        let trimmed = drop_entries_before(&content, &cutoff);

        assert!(trimmed.contains("taskflow event log"));
        assert!(!trimmed.contains("read: old"));
        assert!(trimmed.contains("write: new"));
    }

    #[test]
    fn body_round_trips_through_parse() {
        let tmp = TempDir::new().unwrap();
        let entry = EventEntry::new(EventCategory::Read, "corrupt payload")
            .field("Key", "taskflow.tasks")
            .body("line one\nline two");
        log_event(tmp.path(), entry);

        let entries = read_events(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, "line one\nline two");
        assert_eq!(entries[0].fields[0].0, "Key");
    }
}
