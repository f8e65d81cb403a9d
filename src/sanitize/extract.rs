//! Collect plain and HTML payload text from a part tree.

use tracing::warn;

use crate::sanitize::part::MimePart;

/// Text gathered from every `text/plain` and `text/html` part, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub plain: String,
    pub html: String,
}

/// Walk the tree depth-first. A node's own payload is taken before its
/// children's. Nodes deeper than `max_depth` are skipped.
pub fn extract_text(root: &MimePart, max_depth: usize) -> ExtractedText {
    let mut out = ExtractedText::default();
    walk(root, 0, max_depth, &mut out);
    out
}

fn walk(part: &MimePart, depth: usize, max_depth: usize, out: &mut ExtractedText) {
    if depth > max_depth {
        warn!(depth, max_depth, "Part tree exceeds depth limit, skipping subtree");
        return;
    }

    if part.is_type("text/plain") {
        out.plain.push_str(&part.decoded_text());
    } else if part.is_type("text/html") {
        out.html.push_str(&part.decoded_text());
    }

    for child in &part.parts {
        walk(child, depth + 1, max_depth, out);
    }
}
