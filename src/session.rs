//! The bot's event loop.
//!
//! A [`Session`] owns every piece of mutable state: the transport, the line
//! decoder, the recent-message ring and the dispatcher. Each iteration:
//!
//! 1. rewrites the log file from the ring
//! 2. relays files waiting in the outbox
//! 3. waits for bytes from the server
//! 4. decodes them into lines and routes every line through the reactor,
//!    then the dispatcher
//!
//! Everything runs on one task, so a line is fully handled before the next
//! one is looked at.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use marvin_proto::{Command, LineDecoder, ProtocolLine, TcpTransport, Transport};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::dispatch::{Dispatcher, ResponderRegistry};
use crate::error::BotError;
use crate::history::{ChannelMessage, RecentMessages};
use crate::outbox::Outbox;
use crate::reactor::{Reaction, react};

/// One connection's worth of bot state.
pub struct Session<T: Transport> {
    transport: T,
    decoder: LineDecoder,
    config: Arc<Config>,
    recent: RecentMessages,
    dispatcher: Dispatcher,
    outbox: Outbox,
}

impl<T: Transport> Session<T> {
    pub fn new(
        transport: T,
        config: Arc<Config>,
        registry: ResponderRegistry,
    ) -> Result<Self, BotError> {
        let decoder = new_decoder(&config)?;
        Ok(Self {
            transport,
            decoder,
            recent: RecentMessages::new(config.log.capacity),
            dispatcher: Dispatcher::new(registry, Arc::clone(&config)),
            outbox: Outbox::from_config(&config.outbox),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn recent(&self) -> &RecentMessages {
        &self.recent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Swap in a fresh connection, dropping any half-received line.
    ///
    /// The ring and the responders carry over.
    pub fn replace_transport(&mut self, transport: T) -> Result<T, BotError> {
        self.decoder = new_decoder(&self.config)?;
        Ok(std::mem::replace(&mut self.transport, transport))
    }

    /// Introduce the bot: NICK, USER, then IDENTIFY and JOIN when configured.
    pub async fn register(&mut self) -> Result<(), BotError> {
        let irc = &self.config.irc;
        let mut commands = vec![
            Command::Nick(irc.nick.clone()),
            Command::User {
                nick: irc.nick.clone(),
                realname: irc.realname.clone(),
            },
        ];

        match &irc.ident {
            Some(secret) => commands.push(Command::Identify {
                service: irc.identify_target.clone(),
                secret: secret.clone(),
            }),
            None => info!("Ignore identifying with password, ident is not set"),
        }

        match self.config.channel() {
            Some(channel) => commands.push(Command::Join(channel.to_owned())),
            None => info!("Ignore joining channel, no channel in configuration"),
        }

        for command in &commands {
            self.send(command).await?;
        }
        Ok(())
    }

    pub async fn send(&mut self, command: &Command) -> Result<(), BotError> {
        self.transport.send(&command.to_wire()).await?;
        Ok(())
    }

    /// Send a PRIVMSG, logging it to the ring when it goes to the home channel.
    pub async fn send_privmsg(&mut self, target: &str, text: &str) -> Result<(), BotError> {
        if self.config.is_home_channel(target) {
            self.recent
                .append(ChannelMessage::own(&self.config.irc.nick, text));
        }
        self.send(&Command::Privmsg(target.to_owned(), text.to_owned()))
            .await
    }

    /// Rewrite the log file from the ring. Failures are logged only.
    pub fn flush_log(&self) {
        if let Err(e) = self.recent.write_to(&self.config.log.path) {
            warn!(path = %self.config.log.path.display(), error = %e, "Failed to write irc log");
        }
    }

    /// Relay every outbox file to the channel and archive it.
    pub async fn relay_outbox(&mut self) -> Result<(), BotError> {
        let Some(channel) = self.config.channel().map(str::to_owned) else {
            return Ok(());
        };

        for path in self.outbox.pending() {
            debug!(file = %path.display(), "Relaying outbox file");
            for line in self.outbox.read_lines(&path) {
                self.send_privmsg(&channel, &line).await?;
            }
            self.outbox.archive(&path);
        }
        Ok(())
    }

    /// React to one line, then let the responders answer it.
    pub async fn handle_line(&mut self, line: &ProtocolLine) -> Result<(), BotError> {
        if line.is_empty() {
            return Ok(());
        }
        debug!("RECV: {}", line);

        for reaction in react(line, &self.config) {
            match reaction {
                Reaction::Send(command) => self.send(&command).await?,
                Reaction::Record(msg) => self.recent.append(msg),
            }
        }

        if let Some(reply) = self.dispatcher.dispatch(line).await {
            self.send_privmsg(&reply.target, &reply.text).await?;
        }
        Ok(())
    }

    async fn handle_bytes(&mut self, bytes: &[u8]) -> Result<(), BotError> {
        let lines: Vec<ProtocolLine> = self.decoder.feed(bytes).collect();
        for line in &lines {
            self.handle_line(line).await?;
        }
        Ok(())
    }

    /// One loop iteration: flush, relay, receive, handle.
    pub async fn tick(&mut self) -> Result<(), BotError> {
        let never = std::future::pending::<()>();
        tokio::pin!(never);
        self.step(never).await.map(|_| ())
    }

    /// Tick until the transport fails or Ctrl-C is pressed.
    pub async fn run(&mut self) -> Result<(), BotError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Tick until the transport fails or `shutdown` completes.
    ///
    /// On shutdown a QUIT is sent and the log is written one last time.
    pub async fn run_until<F: Future>(&mut self, shutdown: F) -> Result<(), BotError> {
        tokio::pin!(shutdown);
        while self.step(shutdown.as_mut()).await? {}

        info!("Shutting down");
        let message = self.config.irc.quit_message.clone();
        self.send(&Command::Quit(Some(message))).await?;
        self.flush_log();
        Ok(())
    }

    /// Flush, relay, then wait for bytes or `shutdown`.
    ///
    /// Returns `false` once `shutdown` has completed.
    async fn step<F: Future>(&mut self, shutdown: Pin<&mut F>) -> Result<bool, BotError> {
        self.flush_log();
        self.relay_outbox().await?;

        let read_size = self.config.irc.read_size;
        let received = tokio::select! {
            _ = shutdown => return Ok(false),
            received = self.transport.receive(read_size) => received?,
        };
        self.handle_bytes(&received).await?;
        Ok(true)
    }
}

fn new_decoder(config: &Config) -> Result<LineDecoder, BotError> {
    let decoder = LineDecoder::new(&config.irc.encodings)?;
    Ok(decoder.with_max_pending(config.irc.max_pending))
}

/// Dial the configured server, retrying when a reconnect delay is set.
pub async fn connect(config: &Config) -> Result<TcpTransport, BotError> {
    loop {
        match TcpTransport::connect(&config.irc.server, config.irc.port).await {
            Ok(transport) => return Ok(transport),
            Err(e) => {
                let e = BotError::from(e);
                match config.session.reconnect_delay() {
                    Some(delay) if e.is_recoverable() => {
                        warn!(error = %e, delay_secs = delay.as_secs(), "Connect failed, retrying");
                        tokio::time::sleep(delay).await;
                    }
                    _ => return Err(e),
                }
            }
        }
    }
}

/// Connect, register and run, reconnecting after transport failures when
/// `session.reconnect_delay_secs` is set.
pub async fn run_forever(config: Arc<Config>, registry: ResponderRegistry) -> Result<(), BotError> {
    let transport = connect(&config).await?;
    let mut session = Session::new(transport, Arc::clone(&config), registry)?;

    loop {
        let outcome = match session.register().await {
            Ok(()) => session.run().await,
            Err(e) => Err(e),
        };

        let e = match outcome {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        match config.session.reconnect_delay() {
            Some(delay) if e.is_recoverable() => {
                warn!(
                    error = %e,
                    code = e.error_code(),
                    delay_secs = delay.as_secs(),
                    "Connection lost, reconnecting"
                );
                session.flush_log();
                tokio::time::sleep(delay).await;
                session.replace_transport(connect(&config).await?)?;
            }
            _ => return Err(e),
        }
    }
}
