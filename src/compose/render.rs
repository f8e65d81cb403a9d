//! Attachment-aware composer.
//!
//! Validation and field mapping live here; MIME encoding of the message and
//! its attachments is delegated to a [`MessageRenderer`] that only renders
//! (never transmits).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::compose::address::validate_recipients;
use crate::compose::request::OutboundMessageRequest;
use crate::config::ComposerConfig;
use crate::error::ComposeError;

/// Input shape handed to a [`MessageRenderer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    /// Comma-joined `to` addresses.
    pub to: String,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub subject: String,
    /// Plain-text body. Empty when only HTML should be sent.
    pub text: String,
    pub html: Option<String>,
    pub in_reply_to: Option<String>,
    pub references: Option<String>,
    /// Paths already confirmed to exist.
    pub attachments: Vec<PathBuf>,
}

impl RenderRequest {
    /// Map an outbound request onto the renderer's fields.
    pub fn from_outbound(req: &OutboundMessageRequest) -> Self {
        let join = |list: &Option<Vec<String>>| {
            list.as_ref()
                .filter(|l| !l.is_empty())
                .map(|l| l.join(", "))
        };

        let (text, html) = if req.forces_plain() {
            (req.body.clone(), None)
        } else if req.forces_html() && req.html_body.is_none() {
            (String::new(), Some(req.body.clone()))
        } else {
            (req.body.clone(), req.html_body.clone())
        };

        let thread = req.in_reply_to.clone().filter(|r| !r.is_empty());

        Self {
            to: req.to.join(", "),
            cc: join(&req.cc),
            bcc: join(&req.bcc),
            subject: req.subject.clone(),
            text,
            html,
            in_reply_to: thread.clone(),
            references: thread,
            attachments: req.attachment_paths().to_vec(),
        }
    }
}

/// External MIME rendering collaborator.
#[async_trait]
pub trait MessageRenderer: Send + Sync {
    /// Render the request to raw RFC 5322 bytes.
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, ComposeError>;
}

/// Validates a request, checks attachment paths, and renders it through a
/// [`MessageRenderer`].
pub struct AttachmentComposer {
    renderer: Arc<dyn MessageRenderer>,
    timeout: Option<Duration>,
}

impl AttachmentComposer {
    pub fn new(renderer: Arc<dyn MessageRenderer>) -> Self {
        Self {
            renderer,
            timeout: ComposerConfig::default().render_timeout,
        }
    }

    pub fn with_config(renderer: Arc<dyn MessageRenderer>, config: &ComposerConfig) -> Self {
        Self {
            renderer,
            timeout: config.render_timeout,
        }
    }

    /// Compose the raw message string.
    ///
    /// Fails with `InvalidRecipient` on the first bad `to` address and with
    /// `MissingAttachment` on the first path that does not exist. Neither
    /// failure reaches the renderer.
    pub async fn compose(&self, req: &OutboundMessageRequest) -> Result<String, ComposeError> {
        validate_recipients(&req.to)?;

        for path in req.attachment_paths() {
            if !path.exists() {
                return Err(ComposeError::MissingAttachment(path.clone()));
            }
        }

        let request = RenderRequest::from_outbound(req);
        debug!(
            recipients = req.to.len(),
            attachments = request.attachments.len(),
            "Rendering message"
        );

        let rendered = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.renderer.render(&request))
                .await
                .map_err(|_| ComposeError::RenderTimeout { timeout })??,
            None => self.renderer.render(&request).await?,
        };

        String::from_utf8(rendered).map_err(|e| ComposeError::Render {
            reason: format!("Rendered message is not UTF-8: {e}"),
        })
    }
}
