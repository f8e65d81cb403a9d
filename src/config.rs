//! Configuration types.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default character budget for a sanitized body.
pub const DEFAULT_MAX_CHARS: usize = 6000;

/// Default limit on how deep the part tree is walked.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Placeholder `From` value, replaced with the sending identity at transport time.
pub const FROM_PLACEHOLDER: &str = "me";

/// Inbound body sanitizer configuration.
#[derive(Debug, Clone)]
pub struct SanitizerConfig {
    /// Maximum characters in the sanitized body before the truncation marker.
    pub max_chars: usize,
    /// Parts nested deeper than this are not visited.
    pub max_depth: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SanitizerConfig {
    /// Build config from environment variables, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_chars: env_parse("MAIL_ASSIST_MAX_CHARS")?.unwrap_or(defaults.max_chars),
            max_depth: env_parse("MAIL_ASSIST_MAX_DEPTH")?.unwrap_or(defaults.max_depth),
        })
    }

    /// Override the character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

/// Outbound composer configuration.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Value written to the `From` header of raw messages.
    pub from: String,
    /// Mailbox used as `From` by the lettre renderer, which needs a real address.
    pub sender_address: String,
    /// Upper bound on waiting for the external renderer. `None` waits forever.
    pub render_timeout: Option<Duration>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            from: FROM_PLACEHOLDER.to_string(),
            sender_address: "me@localhost".to_string(),
            render_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ComposerConfig {
    /// Build config from environment variables.
    ///
    /// `MAIL_ASSIST_RENDER_TIMEOUT_SECS=0` disables the render timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let from = std::env::var("MAIL_ASSIST_FROM").unwrap_or(defaults.from);
        let sender_address =
            std::env::var("MAIL_ASSIST_SENDER").unwrap_or(defaults.sender_address);

        let render_timeout = match env_parse::<u64>("MAIL_ASSIST_RENDER_TIMEOUT_SECS")? {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.render_timeout,
        };

        Ok(Self {
            from,
            sender_address,
            render_timeout,
        })
    }
}

/// Parse an optional environment variable. Unset is `Ok(None)`; set but
/// unparseable is an error.
fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}
