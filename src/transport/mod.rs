//! Transport module - the socket as the pattern loop sees it.
//!
//! The loop only ever submits one payload or awaits one message at a time;
//! framing, reconnection, and delivery guarantees belong to the transport.
//! Exactly one socket is owned by the process for its entire lifetime.

mod zmq;

pub use zmq::ZmqTransport;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Blocking behavior of a single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMode {
    /// Poll the transport once; never suspend the loop.
    Immediate,
    /// Suspend until the transport accepts the payload.
    Wait,
}

/// Outcome of a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SendStatus {
    /// The transport took the payload.
    Sent,
    /// The transport was not ready; the payload was discarded, not queued.
    Dropped,
}

/// A pattern socket: submit one message, or await one.
#[async_trait]
pub trait Transport: Send {
    /// Submit one message payload.
    ///
    /// With [`SendMode::Immediate`] this must not suspend; a transport
    /// that cannot take the payload right now reports
    /// [`SendStatus::Dropped`] and the payload is gone.
    async fn send(&mut self, payload: Bytes, mode: SendMode) -> Result<SendStatus>;

    /// Receive one message, suspending until it arrives.
    async fn recv(&mut self) -> Result<Bytes>;
}
