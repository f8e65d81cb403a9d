//! Mail Assist: outbound MIME composition and LLM-ready inbound body sanitizing.

pub mod compose;
pub mod config;
pub mod error;
pub mod sanitize;

pub use compose::{AttachmentComposer, LettreRenderer, OutboundMessageRequest, RawComposer};
pub use config::{ComposerConfig, SanitizerConfig};
pub use error::{ComposeError, ConfigError, Error, Result};
pub use sanitize::{BodySanitizer, MimePart};
