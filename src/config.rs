//! Runtime configuration and boundary parsing.
//!
//! Every external name (role, codec, send policy) is parsed exactly once,
//! here or in the codec registry, into a closed enum. Past this boundary
//! the program never compares raw strings, and an unknown name fails
//! before any socket operation is attempted.

use std::fmt;
use std::str::FromStr;

use crate::codec::{RecvCodec, SendCodec};
use crate::error::{BridgeError, Result};

/// Messaging pattern adopted by this process.
///
/// Exactly one role is active per process; it is fixed at startup and
/// never changes during a run. The two pairs are complementary: a
/// Publisher talks to Subscribers, a Requester to a Replier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// One-way sender: every console line fans out to subscribers.
    Publisher,
    /// One-way receiver: prints every message the publisher emits.
    Subscriber,
    /// Sends one request per console line, then waits for the reply.
    Requester,
    /// Waits for a request, prints it, then sends one console line back.
    Replier,
}

impl Role {
    /// Valid role names, pipe-separated, for error messages.
    pub const NAMES: &'static str = "pub|sub|req|rep";

    /// Parse a role name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Any other name fails with [`BridgeError::UnknownRole`], which lists
    /// the valid names.
    pub fn resolve(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pub" => Ok(Self::Publisher),
            "sub" => Ok(Self::Subscriber),
            "req" => Ok(Self::Requester),
            "rep" => Ok(Self::Replier),
            _ => Err(BridgeError::UnknownRole(name.to_string())),
        }
    }

    /// Wire-style socket type name, as shown in the verbose banner.
    pub fn name(self) -> &'static str {
        match self {
            Self::Publisher => "pub",
            Self::Subscriber => "sub",
            Self::Requester => "req",
            Self::Replier => "rep",
        }
    }
}

impl FromStr for Role {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether this process binds the address or connects out to it.
///
/// Orthogonal to [`Role`]: servers listen, clients connect, and any
/// pattern can sit on either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMode {
    /// Bind the address and await peers.
    Listen,
    /// Connect out to a peer at the address.
    Connect,
}

/// What to do when a non-blocking send finds the transport not ready.
///
/// `Warn` and `Discard` never suspend the loop; a payload the transport
/// cannot take immediately is dropped, not retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPolicy {
    /// Submit without blocking; log a warning if the payload was dropped.
    #[default]
    Warn,
    /// Submit without blocking; drop silently.
    Discard,
    /// Wait until the transport accepts the payload.
    Block,
}

impl SendPolicy {
    /// Valid policy names, pipe-separated, for error messages.
    pub const NAMES: &'static str = "warn|discard|block";

    /// Parse a policy name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Any other name fails with [`BridgeError::UnknownSendPolicy`].
    pub fn resolve(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "warn" => Ok(Self::Warn),
            "discard" => Ok(Self::Discard),
            "block" => Ok(Self::Block),
            _ => Err(BridgeError::UnknownSendPolicy(name.to_string())),
        }
    }
}

impl FromStr for SendPolicy {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

/// Fully resolved configuration, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Active messaging pattern.
    pub role: Role,
    /// Listen or connect.
    pub mode: EndpointMode,
    /// Transport address, passed opaquely to bind/connect.
    pub address: String,
    /// Codec applied to console lines before sending.
    pub send_codec: SendCodec,
    /// Codec applied to received messages before printing.
    pub recv_codec: RecvCodec,
    /// Behavior of sends the transport cannot take immediately.
    pub send_policy: SendPolicy,
    /// Print the startup banner and per-step prompt markers.
    pub verbose: bool,
}
