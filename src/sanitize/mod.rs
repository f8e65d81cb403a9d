//! Inbound body sanitizer.
//!
//! Reduces a MIME part tree to a short plain-text body for an LLM:
//! 1. decode base64url payloads
//! 2. extract plain and HTML text from the tree
//! 3. prefer plain text, else convert the HTML
//! 4. strip the quoted reply chain
//! 5. strip legal/marketing footers
//! 6. bound the length
//!
//! Every stage is total: bad input degrades to an empty or partial string.

pub mod extract;
pub mod footer;
pub mod html;
pub mod part;
pub mod quotes;

use tracing::debug;

pub use extract::{ExtractedText, extract_text};
pub use footer::strip_footer;
pub use html::html_to_text;
pub use part::{MimePart, PartBody};
pub use quotes::strip_quoted_reply;

use crate::config::SanitizerConfig;

/// Appended when the body is cut to the character budget.
pub const TRUNCATION_MARKER: &str = "\n\n[... truncated for LLM processing]";

/// Runs the full sanitizer pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct BodySanitizer {
    config: SanitizerConfig,
}

impl BodySanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// Sanitize a part tree. Never fails; returns `""` when nothing readable exists.
    pub fn sanitize(&self, root: &MimePart) -> String {
        let extracted = extract_text(root, self.config.max_depth);
        let source = select_source(&extracted);
        self.clean_text(&source)
    }

    /// Sanitize a raw RFC 822 message.
    pub fn sanitize_rfc822(&self, raw: &[u8]) -> String {
        self.sanitize(&MimePart::from_rfc822(raw, self.config.max_depth))
    }

    /// Quote stripping, footer stripping and truncation on already-plain text.
    pub fn clean_text(&self, text: &str) -> String {
        let text = strip_quoted_reply(text);
        let text = strip_footer(&text);
        truncate_chars(&text, self.config.max_chars)
    }
}

/// Sanitize with the default configuration and a custom character budget.
pub fn sanitize_body(root: &MimePart, max_chars: usize) -> String {
    BodySanitizer::new(SanitizerConfig::default().with_max_chars(max_chars)).sanitize(root)
}

/// Plain text if it has any content, otherwise the HTML converted to text.
/// Line endings are normalized to `\n`.
pub fn select_source(extracted: &ExtractedText) -> String {
    if !extracted.plain.trim().is_empty() {
        debug!(chars = extracted.plain.len(), "Using text/plain source");
        return normalize_newlines(&extracted.plain);
    }
    if extracted.html.trim().is_empty() {
        return String::new();
    }
    debug!(chars = extracted.html.len(), "No plain text, converting text/html");
    html_to_text(&extracted.html)
}

/// Cut to `max_chars` characters and append [`TRUNCATION_MARKER`].
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            debug!(max_chars, "Truncating sanitized body");
            format!("{}{TRUNCATION_MARKER}", &text[..cut])
        }
        None => text.to_string(),
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
