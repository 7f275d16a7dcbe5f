//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use marvin_proto::LineDecoder;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("irc.server is required")]
    MissingServer,
    #[error("irc.port must not be 0")]
    InvalidPort,
    #[error("irc.nick must be a single non-empty word, got '{0}'")]
    InvalidNick(String),
    #[error("irc.channel must start with '#' or '&' and contain no spaces, got '{0}'")]
    InvalidChannel(String),
    #[error("irc.encodings: {0}")]
    UnknownEncoding(String),
    #[error("irc.read_size must be greater than 0")]
    InvalidReadSize,
    #[error("irc.max_pending must be greater than 0")]
    InvalidMaxPending,
    #[error("responders.{list}: unknown responder '{name}'")]
    UnknownResponder { list: &'static str, name: String },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let irc = &config.irc;

    if irc.server.trim().is_empty() {
        errors.push(ValidationError::MissingServer);
    }
    if irc.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if irc.nick.is_empty() || irc.nick.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidNick(irc.nick.clone()));
    }
    if let Some(channel) = config.channel()
        && (!channel.starts_with(['#', '&']) || channel.contains(char::is_whitespace))
    {
        errors.push(ValidationError::InvalidChannel(channel.to_string()));
    }
    if let Err(e) = LineDecoder::new(&irc.encodings) {
        errors.push(ValidationError::UnknownEncoding(e.to_string()));
    }
    if irc.read_size == 0 {
        errors.push(ValidationError::InvalidReadSize);
    }
    if irc.max_pending == 0 {
        errors.push(ValidationError::InvalidMaxPending);
    }

    let lists = [
        ("targeted", &config.responders.targeted),
        ("general", &config.responders.general),
    ];
    for (list, names) in lists {
        for name in names {
            if !crate::responders::is_builtin(name) {
                errors.push(ValidationError::UnknownResponder {
                    list,
                    name: name.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
