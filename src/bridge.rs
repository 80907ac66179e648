//! The pattern loop.
//!
//! The active [`Role`] is the sole state: it decides, once per process, in
//! what order and how many times the two building blocks run. There are no
//! transitions between roles during a run.
//!
//! - [`Bridge::drain_console`] - read a line, encode, submit.
//! - [`Bridge::drain_socket`] - receive, decode, print.
//!
//! Publisher and Subscriber run one block unbounded; Requester and Replier
//! interleave single-step invocations of both under an outer loop. Sends
//! are non-blocking (unless configured otherwise), receives always block:
//! an incoming message is the only event the receiving side waits on.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::codec::{RecvCodec, SendCodec};
use crate::config::{Config, Role, SendPolicy};
use crate::console::Console;
use crate::error::Result;
use crate::transport::{SendMode, SendStatus, Transport};

/// Verbose prompt shown before each console read.
const CONSOLE_MARKER: &str = ">>> ";

/// Verbose prompt shown before each socket receive.
const SOCKET_MARKER: &str = "... ";

/// The control loop binding a console to a pattern socket.
///
/// Owns both endpoints and the resolved codec pair; nothing is shared or
/// global. At most one message is in flight per direction, and each
/// payload is owned by the iteration that produced it - there is no
/// internal queue, backpressure is the transport's concern.
pub struct Bridge<C, T> {
    console: C,
    transport: T,
    role: Role,
    send_codec: SendCodec,
    recv_codec: RecvCodec,
    send_policy: SendPolicy,
    verbose: bool,
}

impl<C: Console, T: Transport> Bridge<C, T> {
    /// Bind a console and a transport under the resolved configuration.
    pub fn new(console: C, transport: T, config: &Config) -> Self {
        Self {
            console,
            transport,
            role: config.role,
            send_codec: config.send_codec,
            recv_codec: config.recv_codec,
            send_policy: config.send_policy,
            verbose: config.verbose,
        }
    }

    /// Run the loop for the configured role.
    ///
    /// A Publisher returns once the console input is exhausted; that is
    /// the only graceful ending. Requester and Replier have no inherent
    /// termination: after the console closes they keep serving the socket
    /// until the process ends or the transport fails.
    ///
    /// # Errors
    ///
    /// The first encode, decode, console, or transport failure ends the
    /// run; no message is skipped or retried.
    pub async fn run(&mut self) -> Result<()> {
        debug!(role = self.role.name(), "entering pattern loop");
        match self.role {
            Role::Publisher => self.drain_console(None).await,
            Role::Subscriber => self.drain_socket(None).await,
            Role::Requester => loop {
                self.drain_console(Some(1)).await?;
                self.drain_socket(Some(1)).await?;
            },
            Role::Replier => loop {
                self.drain_socket(Some(1)).await?;
                self.drain_console(Some(1)).await?;
            },
        }
    }

    /// Read, encode, and submit up to `bound` lines (forever when `None`).
    ///
    /// Returns early when the console reaches end of input, even with
    /// iterations left.
    pub async fn drain_console(&mut self, bound: Option<u64>) -> Result<()> {
        let mut left = bound;
        while left.map_or(true, |n| n > 0) {
            if self.verbose {
                self.console.print_marker(CONSOLE_MARKER).await?;
            }
            let Some(line) = self.console.next_line().await? else {
                debug!("console input exhausted");
                return Ok(());
            };
            let payload = self.send_codec.encode(&line)?;
            self.submit(payload).await?;
            if let Some(n) = left.as_mut() {
                *n -= 1;
            }
        }
        Ok(())
    }

    /// Receive, decode, and print up to `bound` messages (forever when
    /// `None`).
    pub async fn drain_socket(&mut self, bound: Option<u64>) -> Result<()> {
        let mut left = bound;
        while left.map_or(true, |n| n > 0) {
            if self.verbose {
                self.console.print_marker(SOCKET_MARKER).await?;
            }
            let payload = self.transport.recv().await?;
            let text = self.recv_codec.decode(&payload)?;
            self.console.print_line(&text).await?;
            if let Some(n) = left.as_mut() {
                *n -= 1;
            }
        }
        Ok(())
    }

    /// One send attempt under the configured policy.
    ///
    /// A dropped payload is never retried.
    async fn submit(&mut self, payload: Bytes) -> Result<()> {
        let mode = match self.send_policy {
            SendPolicy::Block => SendMode::Wait,
            SendPolicy::Warn | SendPolicy::Discard => SendMode::Immediate,
        };
        let status = self.transport.send(payload, mode).await?;
        if status == SendStatus::Dropped && self.send_policy == SendPolicy::Warn {
            warn!("transport not ready, message dropped");
        }
        Ok(())
    }
}
