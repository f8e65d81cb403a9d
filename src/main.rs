use std::sync::Arc;

use tokio::io::AsyncReadExt;

use mail_assist::compose::is_valid_email;
use mail_assist::{
    AttachmentComposer, BodySanitizer, ComposerConfig, ConfigError, LettreRenderer, MimePart,
    OutboundMessageRequest, RawComposer, SanitizerConfig,
};

const USAGE: &str = "Usage: mail-assist <sanitize | sanitize-eml | compose | validate <address>...>";

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout carries only the result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but reported a failure.
async fn run() -> mail_assist::Result<bool> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        return Err(ConfigError::MissingRequired {
            key: "command".into(),
            hint: USAGE.into(),
        }
        .into());
    };

    match command.as_str() {
        "sanitize" => {
            let sanitizer = BodySanitizer::new(SanitizerConfig::from_env()?);
            let part: MimePart = serde_json::from_slice(&read_stdin().await?)?;
            println!("{}", sanitizer.sanitize(&part));
        }
        "sanitize-eml" => {
            let sanitizer = BodySanitizer::new(SanitizerConfig::from_env()?);
            println!("{}", sanitizer.sanitize_rfc822(&read_stdin().await?));
        }
        "compose" => {
            let config = ComposerConfig::from_env()?;
            let request: OutboundMessageRequest = serde_json::from_slice(&read_stdin().await?)?;
            let raw = if request.attachment_paths().is_empty() {
                RawComposer::from_config(&config).compose(&request)?
            } else {
                let renderer = Arc::new(LettreRenderer::from_config(&config)?);
                AttachmentComposer::with_config(renderer, &config)
                    .compose(&request)
                    .await?
            };
            tracing::info!(bytes = raw.len(), "Composed message");
            print!("{raw}");
        }
        "validate" => {
            let addresses = &args[1..];
            if addresses.is_empty() {
                return Err(ConfigError::MissingRequired {
                    key: "address".into(),
                    hint: USAGE.into(),
                }
                .into());
            }
            let mut all_valid = true;
            for address in addresses {
                let valid = is_valid_email(address);
                all_valid &= valid;
                println!("{address}: {}", if valid { "valid" } else { "invalid" });
            }
            return Ok(all_valid);
        }
        other => {
            return Err(ConfigError::InvalidValue {
                key: "command".into(),
                message: format!("unknown command {other:?}. {USAGE}"),
            }
            .into());
        }
    }

    Ok(true)
}

async fn read_stdin() -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    tokio::io::stdin().read_to_end(&mut buf).await?;
    Ok(buf)
}
