//! Receive-side codecs: wire bytes to printable text.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{BridgeError, Result};

/// Converts the payload of one wire message into one line of text.
///
/// Symmetric to [`SendCodec`](crate::codec::SendCodec): each pair sharing
/// a wire format round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvCodec {
    /// Print the payload as UTF-8 text. Invalid UTF-8 is a decode error.
    Bin2Str,
    /// Print the payload as lowercase hex.
    Bin2Hex,
    /// Print the payload as base64 (RFC 4648 standard alphabet).
    Bin2B64,
    /// Parse the payload as JSON text and pretty-print it, 2-space indent.
    Json2Json,
    /// Parse the payload as CBOR and pretty-print it as JSON, 2-space indent.
    Cbor2Json,
}

impl RecvCodec {
    /// Valid receive codec names, pipe-separated, for error messages.
    pub const NAMES: &'static str = "bin2str|bin2hex|bin2b64|json2json|cbor2json";

    /// Parse a receive codec name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Any other name fails with [`BridgeError::UnknownRecvCodec`], which
    /// lists the valid names.
    pub fn resolve(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bin2str" => Ok(Self::Bin2Str),
            "bin2hex" => Ok(Self::Bin2Hex),
            "bin2b64" => Ok(Self::Bin2B64),
            "json2json" => Ok(Self::Json2Json),
            "cbor2json" => Ok(Self::Cbor2Json),
            _ => Err(BridgeError::UnknownRecvCodec(name.to_string())),
        }
    }

    /// Decode one wire payload into printable text.
    ///
    /// # Errors
    ///
    /// A payload that is not valid UTF-8, JSON, or CBOR (as the codec
    /// requires) is fatal to the run.
    pub fn decode(self, payload: &[u8]) -> Result<String> {
        match self {
            Self::Bin2Str => Ok(String::from_utf8(payload.to_vec())?),
            Self::Bin2Hex => Ok(hex::encode(payload)),
            Self::Bin2B64 => Ok(BASE64.encode(payload)),
            Self::Json2Json => {
                let value: serde_json::Value = serde_json::from_slice(payload)?;
                Ok(serde_json::to_string_pretty(&value)?)
            }
            Self::Cbor2Json => {
                let value: serde_json::Value = ciborium::from_reader(payload)?;
                Ok(serde_json::to_string_pretty(&value)?)
            }
        }
    }
}

impl FromStr for RecvCodec {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for RecvCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bin2Str => "bin2str",
            Self::Bin2Hex => "bin2hex",
            Self::Bin2B64 => "bin2b64",
            Self::Json2Json => "json2json",
            Self::Cbor2Json => "cbor2json",
        })
    }
}
