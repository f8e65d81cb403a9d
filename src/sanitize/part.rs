//! Inbound MIME part tree, in the JSON shape mail-reading APIs deliver.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use mail_parser::{MessageParser, MimeHeaders, PartType};
use serde::Deserialize;
use tracing::warn;

/// URL-safe alphabet; accepts payloads with or without `=` padding.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One node of a message's MIME tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MimePart {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub body: Option<PartBody>,
    #[serde(default)]
    pub parts: Vec<MimePart>,
}

/// Payload of a part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    /// base64url-encoded bytes.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl MimePart {
    /// A leaf carrying `text`, encoded the way the API would deliver it.
    pub fn leaf(mime_type: impl Into<String>, text: &str) -> Self {
        Self {
            mime_type: mime_type.into(),
            body: Some(PartBody {
                data: Some(BASE64URL.encode(text.as_bytes())),
                size: Some(text.len() as u64),
            }),
            parts: Vec::new(),
        }
    }

    /// A container node with the given children and no payload.
    pub fn container(mime_type: impl Into<String>, parts: Vec<MimePart>) -> Self {
        Self {
            mime_type: mime_type.into(),
            body: None,
            parts,
        }
    }

    /// Case-insensitive match on the base type, ignoring parameters
    /// such as `; charset=utf-8`.
    pub fn is_type(&self, expected: &str) -> bool {
        self.mime_type
            .split(';')
            .next()
            .is_some_and(|base| base.trim().eq_ignore_ascii_case(expected))
    }

    /// Decoded payload as text. Missing or undecodable data yields `""`;
    /// invalid UTF-8 is replaced, not rejected.
    pub fn decoded_text(&self) -> String {
        let Some(data) = self.body.as_ref().and_then(|b| b.data.as_deref()) else {
            return String::new();
        };
        decode_base64url(data)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    /// Build a part tree from a raw RFC 822 message, dropping anything
    /// nested deeper than `max_depth`.
    ///
    /// Unparseable input yields an empty part.
    pub fn from_rfc822(raw: &[u8], max_depth: usize) -> Self {
        match MessageParser::default().parse(raw) {
            Some(message) => convert(&message, 0, 0, max_depth),
            None => {
                warn!(bytes = raw.len(), "Could not parse raw message");
                Self::default()
            }
        }
    }
}

/// Decode a base64url payload, tolerating line breaks and missing padding.
pub fn decode_base64url(data: &str) -> Option<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match BASE64URL.decode(compact.as_bytes()) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(error = %e, "Undecodable part payload");
            None
        }
    }
}

fn convert(
    message: &mail_parser::Message<'_>,
    id: usize,
    depth: usize,
    max_depth: usize,
) -> MimePart {
    let Some(part) = message.parts.get(id) else {
        return MimePart::default();
    };
    if depth > max_depth {
        warn!(depth, max_depth, "Raw message nests too deeply, dropping subtree");
        return MimePart::default();
    }

    let declared = part.content_type().map(|ct| match ct.subtype() {
        Some(sub) => format!("{}/{}", ct.ctype(), sub).to_ascii_lowercase(),
        None => ct.ctype().to_ascii_lowercase(),
    });
    let mime_type = |fallback: &str| declared.clone().unwrap_or_else(|| fallback.to_string());

    match &part.body {
        PartType::Text(text) => MimePart::leaf(mime_type("text/plain"), text),
        PartType::Html(html) => MimePart::leaf(mime_type("text/html"), html),
        PartType::Multipart(children) => MimePart::container(
            mime_type("multipart/mixed"),
            children
                .iter()
                .map(|child| convert(message, *child as usize, depth + 1, max_depth))
                .collect(),
        ),
        PartType::Message(inner) => {
            MimePart::container(mime_type("message/rfc822"), vec![convert(inner, 0, depth + 1, max_depth)])
        }
        PartType::Binary(_) | PartType::InlineBinary(_) => {
            MimePart::container(mime_type("application/octet-stream"), Vec::new())
        }
    }
}
