//! Quoted reply-chain removal.

use std::sync::LazyLock;

use regex::Regex;

/// Reply-chain markers, each anchored to the start of a line.
static REPLY_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?m)^On .*wrote:$",
        r"(?m)^From: ",
        r"(?m)^-----Original Message-----$",
        r"(?m)^> On .*wrote:$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Byte offset of the earliest reply marker across all patterns.
pub fn find_reply_marker(text: &str) -> Option<usize> {
    REPLY_MARKERS
        .iter()
        .filter_map(|re| re.find(text).map(|m| m.start()))
        .min()
}

/// Keep only what precedes the first reply marker, trimmed.
pub fn strip_quoted_reply(text: &str) -> String {
    let kept = match find_reply_marker(text) {
        Some(pos) => &text[..pos],
        None => text,
    };
    kept.trim().to_string()
}
