//! Legal and marketing footer removal.

/// Phrases that open a footer block, matched case-insensitively.
pub const FOOTER_MARKERS: &[&str] = &[
    "confidentiality notice",
    "this email is confidential",
    "this e-mail is confidential",
    "this message is confidential",
    "this email and any attachments",
    "this e-mail and any attachments",
    "this message and any attachments",
    "this communication is intended only for",
    "the information contained in this",
    "please consider the environment before printing",
    "think before you print",
    "to unsubscribe",
    "click here to unsubscribe",
    "unsubscribe from this list",
    "you are receiving this email because",
];

/// Byte offset of the earliest footer marker, if any.
pub fn find_footer(text: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    FOOTER_MARKERS
        .iter()
        .filter_map(|marker| lower.find(marker))
        .min()
}

/// Cut the text before the earliest footer marker. Unchanged if none is found.
pub fn strip_footer(text: &str) -> String {
    match find_footer(text) {
        Some(pos) => text[..pos].trim_end().to_string(),
        None => text.to_string(),
    }
}
