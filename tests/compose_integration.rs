//! Integration tests for outbound composition.
//!
//! Raw-composer output and lettre-rendered output are both parsed back with
//! mail-parser to check they are well-formed messages, not just strings.

use std::sync::Arc;

use mail_parser::{MessageParser, MimeHeaders};

use mail_assist::compose::{FixedBoundary, LettreRenderer, RawComposer};
use mail_assist::{AttachmentComposer, ComposeError, ComposerConfig, OutboundMessageRequest};

fn lettre_composer() -> AttachmentComposer {
    let config = ComposerConfig::default();
    let renderer = Arc::new(LettreRenderer::from_config(&config).unwrap());
    AttachmentComposer::with_config(renderer, &config)
}

/// Pull the boundary parameter out of a multipart Content-Type header.
fn boundary_of(raw: &str) -> String {
    let start = raw.find("boundary=\"").expect("boundary param") + "boundary=\"".len();
    let end = start + raw[start..].find('"').expect("closing quote");
    raw[start..end].to_string()
}

#[test]
fn plain_body_has_single_text_section() {
    let req = OutboundMessageRequest::new(["bob@example.com"], "Hello", "hello");
    let raw = RawComposer::new().compose(&req).unwrap();

    assert_eq!(raw.matches("Content-Type: text/plain; charset=UTF-8").count(), 1);
    assert!(!raw.contains("multipart"));
    assert!(raw.ends_with("\r\n\r\nhello"));

    let parsed = MessageParser::default().parse(raw.as_bytes()).unwrap();
    assert_eq!(parsed.subject(), Some("Hello"));
    assert_eq!(parsed.body_text(0).unwrap().trim(), "hello");
}

#[test]
fn html_and_plain_become_alternative() {
    let req = OutboundMessageRequest::new(["bob@example.com"], "Hello", "plain version")
        .with_html("<p>html version</p>")
        .with_mime_type("text/html");
    let raw = RawComposer::new().compose(&req).unwrap();

    assert!(raw.contains("Content-Type: multipart/alternative; boundary=\""));
    let boundary = boundary_of(&raw);
    assert!(boundary.starts_with("boundary_"));
    assert_eq!(raw.matches(&format!("--{boundary}\r\n")).count(), 2);
    assert!(raw.ends_with(&format!("--{boundary}--")));

    let sections: Vec<&str> = raw.split(&format!("--{boundary}")).collect();
    assert_eq!(sections.len(), 4);
    assert!(sections[1].contains("text/plain") && sections[1].contains("plain version"));
    assert!(sections[2].contains("text/html") && sections[2].contains("<p>html version</p>"));

    let parsed = MessageParser::default().parse(raw.as_bytes()).unwrap();
    assert_eq!(parsed.body_text(0).unwrap().trim(), "plain version");
    assert!(parsed.body_html(0).unwrap().contains("<p>html version</p>"));
}

#[test]
fn encoded_subject_parses_back() {
    let req = OutboundMessageRequest::new(["bob@example.com"], "Réunion ☕ demain", "hi");
    let raw = RawComposer::new()
        .with_boundary(FixedBoundary("B".into()))
        .compose(&req)
        .unwrap();

    assert!(raw.contains("Subject: =?UTF-8?B?"));
    let parsed = MessageParser::default().parse(raw.as_bytes()).unwrap();
    assert_eq!(parsed.subject(), Some("Réunion ☕ demain"));
}

#[test]
fn raw_composer_rejects_bad_recipient() {
    let req = OutboundMessageRequest::new(["bad-address"], "Hello", "hello");
    let err = RawComposer::new().compose(&req).unwrap_err();
    assert!(matches!(err, ComposeError::InvalidRecipient(ref a) if a == "bad-address"));
    assert!(err.to_string().contains("bad-address"));
}

#[test]
fn request_from_json() {
    let req: OutboundMessageRequest = serde_json::from_value(serde_json::json!({
        "to": ["a@example.com", "b@example.com"],
        "cc": ["c@example.com"],
        "subject": "Sync",
        "body": "See you there",
        "inReplyTo": "<m1@example.com>"
    }))
    .unwrap();
    let raw = RawComposer::new().compose(&req).unwrap();

    assert!(raw.contains("To: a@example.com, b@example.com\r\n"));
    assert!(raw.contains("Cc: c@example.com\r\n"));
    assert!(raw.contains("In-Reply-To: <m1@example.com>\r\n"));
    assert!(raw.contains("References: <m1@example.com>\r\n"));
}

#[tokio::test]
async fn lettre_renders_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "attachment contents").unwrap();

    let req = OutboundMessageRequest::new(["bob@example.com"], "Files", "See attached.")
        .with_attachments([path.clone()]);
    let raw = lettre_composer().compose(&req).await.unwrap();

    let parsed = MessageParser::default().parse(raw.as_bytes()).unwrap();
    assert_eq!(parsed.subject(), Some("Files"));
    assert_eq!(parsed.body_text(0).unwrap().trim(), "See attached.");
    assert_eq!(parsed.attachment_count(), 1);
    let attachment = parsed.attachment(0).unwrap();
    assert_eq!(MimeHeaders::attachment_name(attachment), Some("notes.txt"));
}

#[tokio::test]
async fn lettre_renders_html_alternative_with_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.4 fake").unwrap();

    let req = OutboundMessageRequest::new(["bob@example.com"], "Report", "Plain report")
        .with_html("<p>HTML report</p>")
        .in_reply_to("<thread@example.com>")
        .with_attachments([path]);
    let raw = lettre_composer().compose(&req).await.unwrap();

    assert!(raw.contains("multipart/mixed"));
    assert!(raw.contains("multipart/alternative"));
    assert!(raw.contains("In-Reply-To: <thread@example.com>"));
    assert!(raw.contains("References: <thread@example.com>"));

    let parsed = MessageParser::default().parse(raw.as_bytes()).unwrap();
    assert_eq!(parsed.attachment_count(), 1);
    assert!(parsed.body_html(0).unwrap().contains("HTML report"));
}

#[tokio::test]
async fn attachment_composer_rejects_bad_recipient_first() {
    let req = OutboundMessageRequest::new(["ok@example.com", "bad-address"], "Hi", "x")
        .with_attachments(["/no/such/file.txt"]);
    let err = lettre_composer().compose(&req).await.unwrap_err();
    assert!(matches!(err, ComposeError::InvalidRecipient(ref a) if a == "bad-address"));
}

#[tokio::test]
async fn attachment_composer_names_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("here.txt");
    std::fs::write(&present, "x").unwrap();
    let missing = dir.path().join("gone.txt");

    let req = OutboundMessageRequest::new(["bob@example.com"], "Hi", "x")
        .with_attachments([present, missing.clone()]);
    match lettre_composer().compose(&req).await {
        Err(ComposeError::MissingAttachment(path)) => assert_eq!(path, missing),
        other => panic!("expected MissingAttachment, got {other:?}"),
    }
}
