//! ZeroMQ transport over the pure-Rust `zeromq` crate.
//!
//! One socket per process, created from the configured role: PUB/SUB for
//! the one-way pair, REQ/REP for the round-trip pair. Whether the socket
//! binds or connects is orthogonal to its kind.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::FutureExt;
use zeromq::{PubSocket, RepSocket, ReqSocket, Socket, SocketRecv, SocketSend, SubSocket, ZmqMessage};

use super::{SendMode, SendStatus, Transport};
use crate::config::{EndpointMode, Role};
use crate::error::{BridgeError, Result};

/// The four ZeroMQ socket kinds this bridge can drive.
pub enum ZmqTransport {
    Pub(PubSocket),
    Sub(SubSocket),
    Req(ReqSocket),
    Rep(RepSocket),
}

impl ZmqTransport {
    /// Create the socket matching `role`, then bind or connect it.
    ///
    /// A [`Role::Subscriber`] socket is additionally subscribed to the
    /// empty topic prefix before this returns, so every published message
    /// is delivered once the loop starts.
    ///
    /// # Errors
    ///
    /// Fails if the address cannot be bound or connected.
    pub async fn open(role: Role, mode: EndpointMode, address: &str) -> Result<Self> {
        match role {
            Role::Publisher => {
                let mut socket = PubSocket::new();
                attach(&mut socket, mode, address).await?;
                Ok(Self::Pub(socket))
            }
            Role::Subscriber => {
                let mut socket = SubSocket::new();
                attach(&mut socket, mode, address).await?;
                socket.subscribe("").await?;
                Ok(Self::Sub(socket))
            }
            Role::Requester => {
                let mut socket = ReqSocket::new();
                attach(&mut socket, mode, address).await?;
                Ok(Self::Req(socket))
            }
            Role::Replier => {
                let mut socket = RepSocket::new();
                attach(&mut socket, mode, address).await?;
                Ok(Self::Rep(socket))
            }
        }
    }
}

/// Bind or connect per the configured endpoint mode.
async fn attach<S: Socket>(socket: &mut S, mode: EndpointMode, address: &str) -> Result<()> {
    match mode {
        EndpointMode::Listen => {
            socket.bind(address).await?;
        }
        EndpointMode::Connect => socket.connect(address).await?,
    }
    Ok(())
}

/// Drive one send attempt on any sending socket kind.
async fn submit<S: SocketSend>(socket: &mut S, payload: Bytes, mode: SendMode) -> Result<SendStatus> {
    let message = ZmqMessage::from(payload);
    match mode {
        SendMode::Wait => {
            socket.send(message).await?;
            Ok(SendStatus::Sent)
        }
        // Poll the send future exactly once; if the socket cannot take the
        // message now, the payload is dropped rather than the loop stalled.
        SendMode::Immediate => match socket.send(message).now_or_never() {
            Some(result) => {
                result?;
                Ok(SendStatus::Sent)
            }
            None => Ok(SendStatus::Dropped),
        },
    }
}

/// Flatten a (possibly multipart) message into one payload buffer.
fn flatten(message: ZmqMessage) -> Bytes {
    let mut frames = message.into_vec();
    if frames.len() == 1 {
        frames.remove(0)
    } else {
        let mut buf = Vec::with_capacity(frames.iter().map(Bytes::len).sum());
        for frame in &frames {
            buf.extend_from_slice(frame);
        }
        Bytes::from(buf)
    }
}

#[async_trait]
impl Transport for ZmqTransport {
    async fn send(&mut self, payload: Bytes, mode: SendMode) -> Result<SendStatus> {
        match self {
            Self::Pub(socket) => submit(socket, payload, mode).await,
            Self::Req(socket) => submit(socket, payload, mode).await,
            Self::Rep(socket) => submit(socket, payload, mode).await,
            Self::Sub(_) => Err(BridgeError::RoleMismatch("sub sockets cannot send")),
        }
    }

    async fn recv(&mut self) -> Result<Bytes> {
        let message = match self {
            Self::Sub(socket) => socket.recv().await?,
            Self::Req(socket) => socket.recv().await?,
            Self::Rep(socket) => socket.recv().await?,
            Self::Pub(_) => return Err(BridgeError::RoleMismatch("pub sockets cannot receive")),
        };
        Ok(flatten(message))
    }
}
