//! Fake IRC server.
//!
//! Accepts the bot's connection and lets a test script the server side of
//! the conversation line by line.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A listening socket on a random local port.
pub struct FakeIrcServer {
    listener: TcpListener,
}

impl FakeIrcServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Wait for the bot to connect.
    pub async fn accept(&self) -> anyhow::Result<BotConnection> {
        let (stream, _) = timeout(Duration::from_secs(5), self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(BotConnection {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }
}

/// The server's end of one bot connection.
pub struct BotConnection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

#[allow(dead_code)]
impl BotConnection {
    /// Send raw bytes in a single write.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send one line, adding CRLF when missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        let mut data = line.to_string();
        if !data.ends_with("\r\n") {
            data.push_str("\r\n");
        }
        self.send_bytes(data.as_bytes()).await
    }

    /// Receive one line from the bot, terminator removed.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("bot closed the connection");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until `predicate` matches, returning all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// `true` when the bot sends nothing within `dur`.
    pub async fn is_silent(&mut self, dur: Duration) -> bool {
        self.recv_timeout(dur).await.is_err()
    }

    /// Hang up on the bot.
    pub async fn close(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
