//! Responder dispatch.
//!
//! For each PRIVMSG the [`Dispatcher`] picks the targeted list when the bot's
//! nick is mentioned and the general list otherwise, then calls responders in
//! registration order until one returns a non-empty reply. Nothing falls
//! through from one list to the other, and silence is a valid outcome.
//!
//! Every call is a containment boundary: an error, a panic or an overrun of
//! the configured timeout is logged and counts as "no match", so one broken
//! responder cannot take message handling down with it.

mod context;
mod registry;

pub use context::MessageContext;
pub use registry::{Responder, ResponderError, ResponderRegistry, ResponderResult};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use marvin_proto::ProtocolLine;
use tracing::{debug, error, warn};

use crate::config::Config;

/// A reply chosen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Channel (or nick) to send the reply to.
    pub target: String,
    /// Reply text.
    pub text: String,
}

/// Routes channel messages to responders.
#[derive(Debug)]
pub struct Dispatcher {
    registry: ResponderRegistry,
    config: Arc<Config>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(registry: ResponderRegistry, config: Arc<Config>) -> Self {
        let timeout = config.responders.timeout();
        Self {
            registry,
            config,
            timeout,
        }
    }

    /// Find the reply for `line`, if any.
    ///
    /// Only PRIVMSG lines are considered. The reply goes back where the
    /// message was sent; a private message to the bot is answered to the
    /// sender instead of to the bot's own nick.
    pub async fn dispatch(&self, line: &ProtocolLine) -> Option<Reply> {
        if !line.is_command("PRIVMSG") {
            return None;
        }
        let target = line.token(2)?;

        let ctx = MessageContext::from_line(line, &self.config);
        let (list, kind) = if ctx.mentions(&self.config.irc.nick) {
            (self.registry.targeted(), "targeted")
        } else {
            (self.registry.general(), "general")
        };

        for responder in list {
            if let Some(text) = self.invoke(responder.as_ref(), &ctx).await {
                debug!(responder = responder.name(), kind, "Responder matched");
                let target = if target.eq_ignore_ascii_case(&self.config.irc.nick) {
                    line.sender_nick().unwrap_or(target)
                } else {
                    target
                };
                return Some(Reply {
                    target: target.to_string(),
                    text,
                });
            }
        }

        None
    }

    /// Run one responder inside the containment boundary.
    async fn invoke(&self, responder: &dyn Responder, ctx: &MessageContext<'_>) -> Option<String> {
        let call = AssertUnwindSafe(responder.respond(ctx)).catch_unwind();

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(
                        responder = responder.name(),
                        timeout_secs = limit.as_secs(),
                        "Responder timed out"
                    );
                    return None;
                }
            },
            None => call.await,
        };

        match outcome {
            Ok(Ok(Some(text))) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                warn!(responder = responder.name(), error = %e, "Responder failed");
                None
            }
            Err(_) => {
                error!(responder = responder.name(), "Responder panicked");
                None
            }
        }
    }
}
