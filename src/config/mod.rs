//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup validation collecting every problem at once

mod defaults;
mod types;
mod validation;

pub use types::{
    Config, ConfigError, IrcConfig, LastFmConfig, LogConfig, OutboxConfig, ResponderConfig,
    SessionConfig,
};
pub use validation::ValidationError;
