//! Responder trait and the ordered responder registry.
//!
//! The registry holds two lists:
//!
//! - **targeted**: consulted only when the bot's nick is in the message
//! - **general**: consulted for every other message
//!
//! Both are filled at startup and never change during the run. Order is
//! registration order and decides which responder wins.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::context::MessageContext;

/// Failures a responder may report.
///
/// The dispatcher logs these and treats them as "no match".
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type for responders: `Ok(None)` means "does not apply".
pub type ResponderResult = Result<Option<String>, ResponderError>;

/// A pluggable action that may reply to a message.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Stable name used in configuration and logs.
    fn name(&self) -> &str;

    /// Inspect the message and optionally produce a reply.
    async fn respond(&self, msg: &MessageContext<'_>) -> ResponderResult;
}

/// Two ordered responder lists.
#[derive(Default)]
pub struct ResponderRegistry {
    targeted: Vec<Box<dyn Responder>>,
    general: Vec<Box<dyn Responder>>,
}

impl ResponderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append responders to the targeted list.
    pub fn register_targeted(&mut self, responders: impl IntoIterator<Item = Box<dyn Responder>>) {
        for responder in responders {
            info!(responder = responder.name(), "Adding targeted responder");
            self.targeted.push(responder);
        }
    }

    /// Append responders to the general list.
    pub fn register_general(&mut self, responders: impl IntoIterator<Item = Box<dyn Responder>>) {
        for responder in responders {
            info!(responder = responder.name(), "Adding general responder");
            self.general.push(responder);
        }
    }

    pub fn targeted(&self) -> &[Box<dyn Responder>] {
        &self.targeted
    }

    pub fn general(&self) -> &[Box<dyn Responder>] {
        &self.general
    }
}

impl std::fmt::Debug for ResponderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = |list: &[Box<dyn Responder>]| -> Vec<String> {
            list.iter().map(|r| r.name().to_string()).collect()
        };
        f.debug_struct("ResponderRegistry")
            .field("targeted", &names(&self.targeted))
            .field("general", &names(&self.general))
            .finish()
    }
}
