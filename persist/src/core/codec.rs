//! Text codec for the persisted path set document.
//!
//! The on-disk shape is a single YAML-like key with a list of quoted entries:
//!
//! ```text
//! labs:
//!   - "/abs/path/one"
//!   - "/abs/path/two"
//! ```
//!
//! Entries are quoted with JSON string rules, which YAML also accepts. Decoding
//! is a two-state line scanner rather than a general YAML parser: it accepts only
//! this shape and never fails, dropping whatever it does not recognize.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::trace;

use super::types::PathSet;

/// Top-level key holding the list of persisted labs.
pub const LABS_KEY: &str = "labs";

/// Canonical document for an empty set.
pub const EMPTY_DOCUMENT: &str = "labs:\n";

/// Tabs are expanded to this many spaces before any indentation check.
const TAB_WIDTH: usize = 4;

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*labs\s*:\s*$").expect("labs key regex"));
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*(.+?)\s*$").expect("list entry regex"));

/// Render `set` as a document, one entry per line in sorted order.
pub fn encode(set: &PathSet) -> String {
    let mut out = String::with_capacity(EMPTY_DOCUMENT.len() + set.len() * 32);
    out.push_str(LABS_KEY);
    out.push_str(":\n");
    for path in set {
        // BTreeSet iteration is already lexicographic by raw string.
        out.push_str("  - ");
        out.push_str(&quote(path));
        out.push('\n');
    }
    out
}

/// Recover the set of paths from `text`, skipping anything malformed.
pub fn decode(text: &str) -> PathSet {
    let mut labs = PathSet::new();
    let mut state = ScanState::ScanningForKey;

    for raw in text.lines() {
        let line = raw.replace('\t', &" ".repeat(TAB_WIDTH));
        if KEY_RE.is_match(&line) {
            state = ScanState::InList;
            continue;
        }
        if state == ScanState::ScanningForKey {
            continue;
        }
        if starts_unindented(&line) {
            trace!(line = %line, "top-level line ends labs list");
            break;
        }
        match ENTRY_RE.captures(&line) {
            Some(caps) => {
                if let Some(value) = entry_value(&caps[1]) {
                    labs.insert(value);
                }
            }
            None => trace!(line = %line, "skipping unrecognized line"),
        }
    }

    labs
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Ignoring lines until the `labs:` key appears.
    ScanningForKey,
    /// Collecting `- value` entries under the key.
    InList,
}

fn quote(s: &str) -> String {
    Value::from(s).to_string()
}

/// Unquote an entry value; falls back to the trimmed raw text when it is not
/// a valid JSON string. Empty values yield `None`.
fn entry_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let value = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed).unwrap_or_else(|_| trimmed.to_string())
    } else {
        trimmed.to_string()
    };
    (!value.is_empty()).then_some(value)
}

fn starts_unindented(line: &str) -> bool {
    line.chars().next().is_some_and(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> PathSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encode_empty_set_is_bare_key() {
        assert_eq!(encode(&PathSet::new()), "labs:\n");
    }

    #[test]
    fn encode_sorts_entries_and_quotes() {
        let labs = set(&["/y", "/w", "/x"]);
        assert_eq!(encode(&labs), "labs:\n  - \"/w\"\n  - \"/x\"\n  - \"/y\"\n");
    }

    #[test]
    fn encode_is_independent_of_insertion_order() {
        let mut a = PathSet::new();
        a.insert("/b".to_string());
        a.insert("/a".to_string());
        let mut b = PathSet::new();
        b.insert("/a".to_string());
        b.insert("/b".to_string());
        assert_eq!(encode(&a), encode(&b));
    }

    #[test]
    fn encode_escapes_quotes_backslashes_and_controls() {
        let labs = set(&["/a \"q\"\\b\u{1}"]);
        assert_eq!(encode(&labs), "labs:\n  - \"/a \\\"q\\\"\\\\b\\u0001\"\n");
    }

    #[test]
    fn decode_round_trips_awkward_paths() {
        let labs = set(&[
            "/plain/path",
            "/with space/lab.clab.yml",
            "/quote\"inside",
            "C:\\Users\\lab",
            "/ünïcödé/ラボ",
            "/tab\there",
        ]);
        assert_eq!(decode(&encode(&labs)), labs);
    }

    #[test]
    fn decode_empty_document_is_empty() {
        assert!(decode(EMPTY_DOCUMENT).is_empty());
        assert!(decode("").is_empty());
    }

    #[test]
    fn decode_ignores_lines_before_key() {
        let text = "other:\n  - \"/nope\"\nlabs:\n  - \"/yes\"\n";
        assert_eq!(decode(text), set(&["/yes"]));
    }

    #[test]
    fn decode_stops_at_next_top_level_key() {
        let text = "labs:\n  - \"/a\"\nnext:\n  - \"/b\"\n";
        assert_eq!(decode(text), set(&["/a"]));
    }

    #[test]
    fn repeated_labs_key_keeps_collecting() {
        let text = "labs:\n  - \"/a\"\nlabs:\n  - \"/b\"\n";
        assert_eq!(decode(text), set(&["/a", "/b"]));
    }

    #[test]
    fn decode_skips_empty_and_malformed_entries() {
        let text = "labs:\n  - \n  -\n  garbage here\n\n  - \"\"\n  - \"/ok\"\n";
        assert_eq!(decode(text), set(&["/ok"]));
    }

    #[test]
    fn decode_keeps_raw_text_when_unquoting_fails() {
        let text = "labs:\n  - \"/broken\n  - /bare/path\n";
        assert_eq!(decode(text), set(&["\"/broken", "/bare/path"]));
    }

    #[test]
    fn decode_accepts_crlf_tabs_and_loose_key_spacing() {
        let text = "  labs \t:  \r\n\t- \"/a\"\r\n \t-\t\"/b\"  \r\n";
        assert_eq!(decode(text), set(&["/a", "/b"]));
    }

    #[test]
    fn decode_collapses_duplicates() {
        let text = "labs:\n  - \"/a\"\n  - \"/a\"\n";
        assert_eq!(decode(text), set(&["/a"]));
    }
}
