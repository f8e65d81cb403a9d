//! Outbound request types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Explicit body type requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MimeType {
    /// `text/plain` forces a single plain part even when HTML is supplied.
    Plain,
    /// `text/html`
    Html,
    /// Anything else. Treated like "not forced to plain".
    Other(String),
}

impl MimeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "text/plain",
            Self::Html => "text/html",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for MimeType {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "text/plain" => Self::Plain,
            "text/html" => Self::Html,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for MimeType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<MimeType> for String {
    fn from(m: MimeType) -> Self {
        m.as_str().to_string()
    }
}

/// Structured input for composing an outbound message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessageRequest {
    /// Primary recipients. Must be non-empty and every entry a valid address.
    pub to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<MimeType>,
    /// Message-ID being replied to; sets both `In-Reply-To` and `References`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<PathBuf>>,
}

impl OutboundMessageRequest {
    pub fn new(
        to: impl IntoIterator<Item = impl Into<String>>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_cc(mut self, cc: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cc = Some(cc.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_bcc(mut self, bcc: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.bcc = Some(bcc.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<MimeType>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn in_reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.in_reply_to = Some(message_id.into());
        self
    }

    pub fn with_attachments(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.attachments = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the caller forced a single `text/plain` part.
    pub fn forces_plain(&self) -> bool {
        matches!(self.mime_type, Some(MimeType::Plain))
    }

    /// Whether the caller asked for a single `text/html` part.
    pub fn forces_html(&self) -> bool {
        matches!(self.mime_type, Some(MimeType::Html))
    }

    /// Attachment paths, empty if none were given.
    pub fn attachment_paths(&self) -> &[PathBuf] {
        self.attachments.as_deref().unwrap_or_default()
    }
}
