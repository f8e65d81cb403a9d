//! RFC 2047 encoded-word header values.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Wrap a header value as `=?UTF-8?B?...?=` when it contains non-ASCII;
/// ASCII values pass through unchanged.
pub fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }
    format!("=?UTF-8?B?{}?=", STANDARD.encode(value.as_bytes()))
}

/// Collapse CR/LF runs to a single space so a value can't start a new header line.
pub fn single_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_word(encoded: &str) -> Vec<u8> {
        let payload = encoded
            .strip_prefix("=?UTF-8?B?")
            .and_then(|s| s.strip_suffix("?="))
            .expect("encoded-word markers");
        STANDARD.decode(payload).unwrap()
    }

    #[test]
    fn ascii_passthrough() {
        assert_eq!(encode_header("Quarterly report"), "Quarterly report");
        assert_eq!(encode_header(""), "");
    }

    #[test]
    fn non_ascii_is_wrapped() {
        let encoded = encode_header("Café meeting");
        assert!(encoded.starts_with("=?UTF-8?B?"));
        assert!(encoded.ends_with("?="));
        assert!(encoded.is_ascii());
    }

    #[test]
    fn non_ascii_round_trips() {
        for subject in ["Café", "日本語の件名", "Grüße 🎉 from Zürich"] {
            let encoded = encode_header(subject);
            assert_eq!(decode_word(&encoded), subject.as_bytes());
        }
    }

    #[test]
    fn single_line_folds_breaks() {
        assert_eq!(single_line("plain"), "plain");
        assert_eq!(single_line("Hi\r\nBcc: evil@example.com"), "Hi Bcc: evil@example.com");
        assert_eq!(single_line("a\n\nb\rc"), "a b c");
    }
}
