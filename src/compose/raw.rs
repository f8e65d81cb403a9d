//! Raw MIME message composer.
//!
//! Produces a complete message with CRLF line endings, ready to be
//! base64url-encoded for a mail submission API. Three shapes:
//! - plain + HTML (not forced plain) → `multipart/alternative`
//! - forced `text/html` → single HTML part (falls back to the plain body)
//! - otherwise → single `text/plain` part

use tracing::debug;

use crate::compose::address::validate_recipients;
use crate::compose::boundary::{BoundaryGenerator, RandomBoundary};
use crate::compose::header::{encode_header, single_line};
use crate::compose::request::OutboundMessageRequest;
use crate::config::{ComposerConfig, FROM_PLACEHOLDER};
use crate::error::ComposeError;

/// Which body layout a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape<'a> {
    Alternative { plain: &'a str, html: &'a str },
    Html(&'a str),
    Plain(&'a str),
}

impl<'a> BodyShape<'a> {
    pub fn for_request(req: &'a OutboundMessageRequest) -> Self {
        match req.html_body.as_deref() {
            Some(html) if !req.body.is_empty() && !req.forces_plain() => Self::Alternative {
                plain: req.body.as_str(),
                html,
            },
            html if req.forces_html() => Self::Html(html.unwrap_or(req.body.as_str())),
            _ => Self::Plain(req.body.as_str()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Alternative { .. } => "multipart/alternative",
            Self::Html(_) => "text/html",
            Self::Plain(_) => "text/plain",
        }
    }
}

/// Builds raw messages without any external MIME library.
pub struct RawComposer<B = RandomBoundary> {
    from: String,
    boundary: B,
}

impl RawComposer<RandomBoundary> {
    pub fn new() -> Self {
        Self {
            from: FROM_PLACEHOLDER.to_string(),
            boundary: RandomBoundary::default(),
        }
    }

    pub fn from_config(config: &ComposerConfig) -> Self {
        Self {
            from: config.from.clone(),
            boundary: RandomBoundary::default(),
        }
    }
}

impl Default for RawComposer<RandomBoundary> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BoundaryGenerator> RawComposer<B> {
    /// Swap the boundary source (e.g. `FixedBoundary` in tests).
    pub fn with_boundary<G: BoundaryGenerator>(self, boundary: G) -> RawComposer<G> {
        RawComposer {
            from: self.from,
            boundary,
        }
    }

    /// Compose the raw message. Fails on the first invalid `to` address.
    pub fn compose(&self, req: &OutboundMessageRequest) -> Result<String, ComposeError> {
        validate_recipients(&req.to)?;

        let mut lines = vec![
            format!("From: {}", single_line(&self.from)),
            format!("To: {}", req.to.join(", ")),
        ];
        if let Some(cc) = req.cc.as_ref().filter(|cc| !cc.is_empty()) {
            lines.push(format!("Cc: {}", single_line(&cc.join(", "))));
        }
        if let Some(bcc) = req.bcc.as_ref().filter(|bcc| !bcc.is_empty()) {
            lines.push(format!("Bcc: {}", single_line(&bcc.join(", "))));
        }
        lines.push(format!("Subject: {}", encode_header(&single_line(&req.subject))));
        if let Some(reference) = req
            .in_reply_to
            .as_deref()
            .map(single_line)
            .filter(|r| !r.is_empty())
        {
            lines.push(format!("In-Reply-To: {reference}"));
            lines.push(format!("References: {reference}"));
        }
        lines.push("MIME-Version: 1.0".to_string());

        let shape = BodyShape::for_request(req);
        match shape {
            BodyShape::Alternative { plain, html } => {
                let boundary = self.boundary.boundary();
                lines.push(format!(
                    "Content-Type: multipart/alternative; boundary=\"{boundary}\""
                ));
                lines.push(String::new());
                lines.push(format!("--{boundary}"));
                lines.extend(sub_part("text/plain", plain));
                lines.push(format!("--{boundary}"));
                lines.extend(sub_part("text/html", html));
                lines.push(format!("--{boundary}--"));
            }
            BodyShape::Html(html) => {
                lines.push("Content-Type: text/html; charset=UTF-8".to_string());
                lines.push(String::new());
                lines.push(to_crlf(html));
            }
            BodyShape::Plain(plain) => {
                lines.push("Content-Type: text/plain; charset=UTF-8".to_string());
                lines.push(String::new());
                lines.push(to_crlf(plain));
            }
        }

        debug!(recipients = req.to.len(), shape = shape.label(), "Composed raw message");
        Ok(lines.join("\r\n"))
    }
}

fn sub_part(content_type: &str, body: &str) -> [String; 4] {
    [
        format!("Content-Type: {content_type}; charset=UTF-8"),
        "Content-Transfer-Encoding: 7bit".to_string(),
        String::new(),
        to_crlf(body),
    ]
}

/// Normalize any mix of `\r\n`, `\r` and `\n` to `\r\n`.
pub(crate) fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "\r\n")
}
