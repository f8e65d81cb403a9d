//! Error types for Mail Assist.

use std::path::PathBuf;
use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while composing an outbound message.
///
/// `InvalidRecipient` and `MissingAttachment` are input errors: the caller
/// should surface them to the user and not retry without fixing the request.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Message has no recipients")]
    NoRecipients,

    #[error("Attachment not found: {}", .0.display())]
    MissingAttachment(PathBuf),

    #[error("Failed to render message: {reason}")]
    Render { reason: String },

    #[error("Rendering timed out after {timeout:?}")]
    RenderTimeout { timeout: Duration },
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
