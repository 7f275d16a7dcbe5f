//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::defaults::*;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bot configuration.
///
/// Loaded once at startup and shared read-only (behind an `Arc`) by every
/// component of the session.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server, identity and wire settings.
    pub irc: IrcConfig,
    /// Recent-message log file.
    #[serde(default)]
    pub log: LogConfig,
    /// Directory-based outgoing message queue.
    #[serde(default)]
    pub outbox: OutboxConfig,
    /// Responder selection and limits.
    #[serde(default)]
    pub responders: ResponderConfig,
    /// Connection lifecycle policy.
    #[serde(default)]
    pub session: SessionConfig,
    /// Optional last.fm credentials for the `listen` responder.
    pub lastfm: Option<LastFmConfig>,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// The channel the bot joins and logs, if configured.
    pub fn channel(&self) -> Option<&str> {
        self.irc.channel.as_deref().filter(|c| !c.is_empty())
    }

    /// `true` when `target` names the configured channel.
    pub fn is_home_channel(&self, target: &str) -> bool {
        self.channel() == Some(target)
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server identity and wire configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IrcConfig {
    /// Server host name (e.g., "irc.libera.chat").
    pub server: String,
    /// Server port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Channel to join, log and relay the outbox to.
    pub channel: Option<String>,
    /// Nickname; also the word that routes a message to targeted responders.
    #[serde(default = "default_nick")]
    pub nick: String,
    /// Real name sent in USER.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Password sent with IDENTIFY after registration (optional).
    pub ident: Option<String>,
    /// Who receives the IDENTIFY line (default: "nick").
    #[serde(default = "default_identify_target")]
    pub identify_target: String,
    /// Preferred encodings for incoming lines, tried in order.
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,
    /// Maximum bytes per socket read.
    #[serde(default = "default_read_size")]
    pub read_size: usize,
    /// Largest partial line kept between reads; longer fragments are dropped.
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
    /// Message sent with QUIT on shutdown.
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
}

/// Recent-message log configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// JSON file rewritten on every loop tick.
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
    /// Number of channel messages kept (default: 20).
    #[serde(default = "default_log_capacity")]
    pub capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            capacity: default_log_capacity(),
        }
    }
}

/// Outbox directories.
#[derive(Debug, Clone, Deserialize)]
pub struct OutboxConfig {
    /// Pending text files, one message per line.
    #[serde(default = "default_incoming_dir")]
    pub incoming: PathBuf,
    /// Archive for relayed files.
    #[serde(default = "default_done_dir")]
    pub done: PathBuf,
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            incoming: default_incoming_dir(),
            done: default_done_dir(),
        }
    }
}

/// Responder configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponderConfig {
    /// Upper bound for a single responder call in seconds; 0 disables the bound.
    ///
    /// A responder that exceeds it counts as "no match", which keeps a slow
    /// web call from delaying PONG replies past the server's ping timeout.
    #[serde(default = "default_responder_timeout_secs")]
    pub timeout_secs: u64,
    /// JSON strings table used by the canned-text responders.
    #[serde(default = "default_strings_path")]
    pub strings: PathBuf,
    /// Responders run when the nick is mentioned, in order.
    #[serde(default = "default_targeted_responders")]
    pub targeted: Vec<String>,
    /// Responders run for every other message, in order.
    #[serde(default)]
    pub general: Vec<String>,
}

impl ResponderConfig {
    /// The configured timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_responder_timeout_secs(),
            strings: default_strings_path(),
            targeted: default_targeted_responders(),
            general: Vec::new(),
        }
    }
}

/// Connection lifecycle configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Seconds to wait before reconnecting after a transport failure.
    /// Unset means the process exits on the first failure.
    pub reconnect_delay_secs: Option<u64>,
}

impl SessionConfig {
    pub fn reconnect_delay(&self) -> Option<Duration> {
        self.reconnect_delay_secs.map(Duration::from_secs)
    }
}

/// last.fm API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LastFmConfig {
    pub user: String,
    pub apikey: String,
    /// API root, overridable for testing against a local server.
    #[serde(default = "default_lastfm_endpoint")]
    pub endpoint: String,
}
