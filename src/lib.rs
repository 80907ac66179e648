//! # wirecat
//!
//! A line-oriented bridge between a text console and a ZeroMQ socket.
//!
//! Each line read from the console becomes one wire message, encoded by a
//! configurable send codec; each message arriving from the socket is
//! decoded by a receive codec and printed as one line. The socket role
//! (PUB, SUB, REQ, or REP) decides the order and multiplicity of the two
//! directions.
//!
//! ## Architecture
//!
//! - **Codec registry** ([`codec`]): pure text/bytes conversions, resolved
//!   by name once at startup.
//! - **Pattern loop** ([`bridge`]): drives read/encode/send and
//!   receive/decode/print cycles per the active role, with non-blocking
//!   sends and blocking receives.
//! - **Transport** ([`transport`]): the socket black box (bind/connect,
//!   send, recv) over the pure-Rust `zeromq` crate.
//!
//! ## Example
//!
//! ```ignore
//! use wirecat::{Bridge, Config, EndpointMode, Role, SendPolicy};
//! use wirecat::codec::{RecvCodec, SendCodec};
//! use wirecat::console::StdConsole;
//! use wirecat::transport::ZmqTransport;
//!
//! #[tokio::main]
//! async fn main() -> wirecat::Result<()> {
//!     let config = Config {
//!         role: Role::Subscriber,
//!         mode: EndpointMode::Connect,
//!         address: "tcp://127.0.0.1:5555".into(),
//!         send_codec: SendCodec::Str2Bin,
//!         recv_codec: RecvCodec::Bin2Str,
//!         send_policy: SendPolicy::Warn,
//!         verbose: false,
//!     };
//!     let transport = ZmqTransport::open(config.role, config.mode, &config.address).await?;
//!     Bridge::new(StdConsole::new(), transport, &config).run().await
//! }
//! ```

pub mod bridge;
pub mod codec;
pub mod config;
pub mod console;
pub mod error;
pub mod transport;

pub use bridge::Bridge;
pub use config::{Config, EndpointMode, Role, SendPolicy};
pub use error::{BridgeError, Result};
