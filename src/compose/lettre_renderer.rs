//! [`MessageRenderer`] backed by the lettre message builder.
//!
//! Formats the message only. No transport is configured.

use std::path::Path;

use async_trait::async_trait;
use lettre::Message;
use lettre::message::header::{self, ContentType};
use lettre::message::{Attachment, Mailbox, Mailboxes, MultiPart, SinglePart};

use crate::compose::render::{MessageRenderer, RenderRequest};
use crate::config::ComposerConfig;
use crate::error::ComposeError;

/// Renders through `lettre::Message::builder()`.
pub struct LettreRenderer {
    sender: Mailbox,
}

impl LettreRenderer {
    pub fn new(sender: Mailbox) -> Self {
        Self { sender }
    }

    pub fn from_config(config: &ComposerConfig) -> Result<Self, ComposeError> {
        let sender = config
            .sender_address
            .parse()
            .map_err(|e| render_error(format!("Invalid sender address: {e}")))?;
        Ok(Self::new(sender))
    }
}

#[async_trait]
impl MessageRenderer for LettreRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, ComposeError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .mailbox(header::To::from(parse_mailboxes("to", &request.to)?))
            .subject(request.subject.clone())
            .keep_bcc();

        if let Some(cc) = &request.cc {
            builder = builder.mailbox(header::Cc::from(parse_mailboxes("cc", cc)?));
        }
        if let Some(bcc) = &request.bcc {
            builder = builder.mailbox(header::Bcc::from(parse_mailboxes("bcc", bcc)?));
        }
        if let Some(in_reply_to) = &request.in_reply_to {
            builder = builder.in_reply_to(in_reply_to.clone());
        }
        if let Some(references) = &request.references {
            builder = builder.references(references.clone());
        }

        let mut attachments = Vec::with_capacity(request.attachments.len());
        for path in &request.attachments {
            attachments.push(attachment_part(path).await?);
        }

        let text = request.text.clone();
        let message = match (request.html.clone(), attachments.is_empty()) {
            (Some(html), true) if !text.is_empty() => {
                builder.multipart(MultiPart::alternative_plain_html(text, html))
            }
            (Some(html), true) => builder.singlepart(SinglePart::html(html)),
            (None, true) => builder.singlepart(SinglePart::plain(text)),
            (html, false) => {
                let mut mixed = match html {
                    Some(html) if !text.is_empty() => MultiPart::mixed()
                        .multipart(MultiPart::alternative_plain_html(text, html)),
                    Some(html) => MultiPart::mixed().singlepart(SinglePart::html(html)),
                    None => MultiPart::mixed().singlepart(SinglePart::plain(text)),
                };
                for part in attachments {
                    mixed = mixed.singlepart(part);
                }
                builder.multipart(mixed)
            }
        }
        .map_err(|e| render_error(format!("Failed to build email: {e}")))?;

        Ok(message.formatted())
    }
}

fn render_error(reason: String) -> ComposeError {
    ComposeError::Render { reason }
}

fn parse_mailboxes(field: &str, joined: &str) -> Result<Mailboxes, ComposeError> {
    joined
        .parse()
        .map_err(|e| render_error(format!("Invalid {field} list {joined:?}: {e}")))
}

async fn attachment_part(path: &Path) -> Result<SinglePart, ComposeError> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        render_error(format!("Failed to read attachment {}: {e}", path.display()))
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "attachment".to_string());
    let content_type = ContentType::parse(&mime_for(path))
        .map_err(|e| render_error(format!("Bad content type for {}: {e}", path.display())))?;
    Ok(Attachment::new(filename).body(data, content_type))
}

/// Guess a MIME type from the file extension, falling back to
/// `application/octet-stream`.
fn mime_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}
