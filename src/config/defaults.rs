//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::path::PathBuf;

use marvin_proto::{DEFAULT_ENCODINGS, DEFAULT_MAX_PENDING, DEFAULT_READ_SIZE};

// =============================================================================
// IRC Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6667
}

pub fn default_nick() -> String {
    "marvin".to_string()
}

pub fn default_realname() -> String {
    "Marvin The All Mighty dbwebb-bot".to_string()
}

/// Target of the IDENTIFY line sent after registration.
pub fn default_identify_target() -> String {
    "nick".to_string()
}

pub fn default_encodings() -> Vec<String> {
    DEFAULT_ENCODINGS.iter().map(|s| s.to_string()).collect()
}

pub fn default_read_size() -> usize {
    DEFAULT_READ_SIZE
}

pub fn default_max_pending() -> usize {
    DEFAULT_MAX_PENDING
}

pub fn default_quit_message() -> String {
    "Brain the size of a planet, and they ask me to quit.".to_string()
}

// =============================================================================
// Log Defaults
// =============================================================================

pub fn default_log_path() -> PathBuf {
    PathBuf::from("irclog.txt")
}

pub fn default_log_capacity() -> usize {
    20
}

// =============================================================================
// Outbox Defaults
// =============================================================================

pub fn default_incoming_dir() -> PathBuf {
    PathBuf::from("incoming")
}

pub fn default_done_dir() -> PathBuf {
    PathBuf::from("done")
}

// =============================================================================
// Responder Defaults
// =============================================================================

pub fn default_responder_timeout_secs() -> u64 {
    10
}

pub fn default_strings_path() -> PathBuf {
    PathBuf::from("marvin_strings.json")
}

/// Built-in responders answering when the nick is mentioned, in order.
pub fn default_targeted_responders() -> Vec<String> {
    crate::responders::BUILTIN_NAMES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// last.fm Defaults
// =============================================================================

pub fn default_lastfm_endpoint() -> String {
    "http://ws.audioscrobbler.com/2.0/".to_string()
}
