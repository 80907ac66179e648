//! Codec registry - conversions between console text and wire bytes.
//!
//! This module provides the two codec directions:
//!
//! - [`SendCodec`] - console line → wire payload
//! - [`RecvCodec`] - wire payload → printable text
//!
//! # Design
//!
//! Codecs are closed enums resolved by name once at startup, not trait
//! objects: the set is fixed, resolution is a single fallible parse at the
//! configuration boundary, and dispatch is a total match. All conversions
//! are pure functions with no shared state.
//!
//! # Example
//!
//! ```
//! use wirecat::codec::{RecvCodec, SendCodec};
//!
//! let enc = SendCodec::resolve("hex2bin").unwrap();
//! let dec = RecvCodec::resolve("bin2hex").unwrap();
//!
//! let wire = enc.encode("cafe").unwrap();
//! assert_eq!(&wire[..], &[0xca, 0xfe]);
//! assert_eq!(dec.decode(&wire).unwrap(), "cafe");
//! ```

mod recv;
mod send;

pub use recv::RecvCodec;
pub use send::SendCodec;
