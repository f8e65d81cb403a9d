//! Outbound message composition.

pub mod address;
pub mod boundary;
pub mod header;
pub mod lettre_renderer;
pub mod raw;
pub mod render;
pub mod request;

pub use address::{is_valid_email, validate_recipients};
pub use boundary::{BoundaryGenerator, FixedBoundary, RandomBoundary};
pub use header::{encode_header, single_line};
pub use lettre_renderer::LettreRenderer;
pub use raw::{BodyShape, RawComposer};
pub use render::{AttachmentComposer, MessageRenderer, RenderRequest};
pub use request::{MimeType, OutboundMessageRequest};
