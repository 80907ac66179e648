//! Error types for wirecat.
//!
//! The taxonomy is deliberately fail-fast: configuration errors are caught
//! before any socket exists, and the first codec or transport failure
//! during a run ends the run. There is no retry policy and no
//! partial-failure isolation between iterations.

use thiserror::Error;

/// Main error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// I/O error on the console.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown socket role name.
    #[error("unknown role '{0}', expected one of {}", crate::config::Role::NAMES)]
    UnknownRole(String),

    /// Unknown send codec name.
    #[error("unknown send codec '{0}', expected one of {}", crate::codec::SendCodec::NAMES)]
    UnknownSendCodec(String),

    /// Unknown receive codec name.
    #[error("unknown recv codec '{0}', expected one of {}", crate::codec::RecvCodec::NAMES)]
    UnknownRecvCodec(String),

    /// Unknown send policy name.
    #[error("unknown send policy '{0}', expected one of {}", crate::config::SendPolicy::NAMES)]
    UnknownSendPolicy(String),

    /// Missing or conflicting endpoint flags.
    #[error("exactly one of --listen-on or --connect-to is required")]
    Endpoint,

    /// JSON parse or serialize error (json2json, json2cbor, cbor2json).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed hex input on the send side.
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Malformed base64 input on the send side.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// CBOR serialization error.
    #[error("CBOR encode error: {0}")]
    CborEncode(#[from] ciborium::ser::Error<std::io::Error>),

    /// CBOR deserialization error.
    #[error("CBOR decode error: {0}")]
    CborDecode(#[from] ciborium::de::Error<std::io::Error>),

    /// Received message is not valid UTF-8 text.
    #[error("received message is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Error raised by the ZeroMQ transport.
    #[error("transport error: {0}")]
    Transport(#[from] zeromq::ZmqError),

    /// Operation not supported by the active socket kind.
    #[error("role mismatch: {0}")]
    RoleMismatch(&'static str),

    /// Connection closed by the peer.
    #[error("connection closed")]
    ConnectionClosed,
}

/// Result type alias using BridgeError.
pub type Result<T> = std::result::Result<T, BridgeError>;
