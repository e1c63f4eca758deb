//! Regex driven extraction of release sections from changelog markdown.
use regex::Regex;
use std::sync::LazyLock;

use crate::changelog::{
    ChangelogEntry, MAX_ENTRIES, MAX_SUMMARY_CHARS, ReleaseDate,
    TRUNCATION_MARKER,
};

/// `## [1.2.0]` at the start of a line, capturing the bracketed version.
static RELEASE_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+\[([^\]]+)\]").unwrap());

static ISO_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Loose dates such as `March 1, 2024`, `Mar 1 2024` or `Sept. 21st, 2023`.
static LONG_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}\b",
    )
    .unwrap()
});

/// Leading whitespace and an optional dash bullet on every line.
static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*-?\s*").unwrap());

/// Bodies consisting of nothing but a horizontal rule.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());

/// Extracts up to [`MAX_ENTRIES`] release entries from raw changelog text,
/// in document order.
///
/// Absent, placeholder, headerless or otherwise malformed text yields an
/// empty list; this function never fails.
pub fn parse(raw: Option<&str>) -> Vec<ChangelogEntry> {
    let Some(raw) = raw else {
        return vec![];
    };

    let content = raw.replace("\r\n", "\n").replace('\r', "\n");

    if is_placeholder(&content) {
        return vec![];
    }

    let headers = RELEASE_HEADER_REGEX
        .captures_iter(&content)
        .collect::<Vec<_>>();

    let mut entries = vec![];

    for (i, captures) in headers.iter().enumerate() {
        let (Some(header), Some(version)) = (captures.get(0), captures.get(1))
        else {
            continue;
        };

        let body_end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(content.len(), |next| next.start());

        let body = &content[header.end()..body_end];

        if let Some(entry) = parse_section(version.as_str(), body) {
            entries.push(entry);
        }

        if entries.len() == MAX_ENTRIES {
            break;
        }
    }

    entries
}

fn is_placeholder(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.is_empty() || PLACEHOLDER_REGEX.is_match(trimmed)
}

fn parse_section(version: &str, body: &str) -> Option<ChangelogEntry> {
    let version = version.trim();

    if version.is_empty() {
        return None;
    }

    let (date, changes) = split_date(body.trim());

    Some(ChangelogEntry {
        version: version.to_string(),
        date,
        summary: summarize(changes),
    })
}

/// Looks for a date on the first line only. When one is found that line is
/// consumed, otherwise the whole body is kept for the summary.
fn split_date(body: &str) -> (ReleaseDate, &str) {
    let (first_line, rest) = body.split_once('\n').unwrap_or((body, ""));

    match find_date(first_line) {
        Some(date) => (ReleaseDate::Known(date.to_string()), rest.trim()),
        None => (ReleaseDate::Unknown, body),
    }
}

fn find_date(line: &str) -> Option<&str> {
    ISO_DATE_REGEX
        .find(line)
        .or_else(|| LONG_DATE_REGEX.find(line))
        .map(|m| m.as_str())
}

fn summarize(changes: &str) -> String {
    let cleaned = BULLET_REGEX.replace_all(changes, "");
    let cleaned = cleaned.trim();

    // a 201st character means the text exceeds the cap
    match cleaned.char_indices().nth(MAX_SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &cleaned[..cut]),
        None => cleaned.to_string(),
    }
}

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;
