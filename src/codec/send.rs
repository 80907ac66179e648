//! Send-side codecs: console text to wire bytes.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;

use crate::error::{BridgeError, Result};

/// Converts one console line into the payload of one wire message.
///
/// Resolved by name once at startup and fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendCodec {
    /// Pass the line through as its UTF-8 bytes.
    Str2Bin,
    /// Hex-decode the line.
    Hex2Bin,
    /// Base64-decode the line (RFC 4648 standard alphabet).
    B642Bin,
    /// Parse the line as JSON and re-serialize it compactly.
    Json2Json,
    /// Parse the line as JSON and serialize it as CBOR.
    Json2Cbor,
}

impl SendCodec {
    /// Valid send codec names, pipe-separated, for error messages.
    pub const NAMES: &'static str = "str2bin|hex2bin|b642bin|json2json|json2cbor";

    /// Parse a send codec name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Any other name fails with [`BridgeError::UnknownSendCodec`], which
    /// lists the valid names.
    pub fn resolve(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "str2bin" => Ok(Self::Str2Bin),
            "hex2bin" => Ok(Self::Hex2Bin),
            "b642bin" => Ok(Self::B642Bin),
            "json2json" => Ok(Self::Json2Json),
            "json2cbor" => Ok(Self::Json2Cbor),
            _ => Err(BridgeError::UnknownSendCodec(name.to_string())),
        }
    }

    /// Encode one line of text into a wire payload.
    ///
    /// # Errors
    ///
    /// Malformed hex, base64, or JSON input is fatal to the run; the loop
    /// does not skip the line and continue.
    pub fn encode(self, line: &str) -> Result<Bytes> {
        match self {
            Self::Str2Bin => Ok(Bytes::copy_from_slice(line.as_bytes())),
            Self::Hex2Bin => Ok(hex::decode(line)?.into()),
            Self::B642Bin => Ok(BASE64.decode(line)?.into()),
            Self::Json2Json => {
                let value: serde_json::Value = serde_json::from_str(line)?;
                Ok(serde_json::to_vec(&value)?.into())
            }
            Self::Json2Cbor => {
                let value: serde_json::Value = serde_json::from_str(line)?;
                let mut buf = Vec::new();
                ciborium::into_writer(&value, &mut buf)?;
                Ok(buf.into())
            }
        }
    }
}

impl FromStr for SendCodec {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for SendCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str2Bin => "str2bin",
            Self::Hex2Bin => "hex2bin",
            Self::B642Bin => "b642bin",
            Self::Json2Json => "json2json",
            Self::Json2Cbor => "json2cbor",
        })
    }
}
