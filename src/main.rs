//! wirecat binary - argument parsing, logging setup, and the top-level
//! error handler.
//!
//! All fatal errors end up here: the error's message is written to stderr
//! and the process exits non-zero. Configuration errors are resolved
//! before any socket is created.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wirecat::codec::{RecvCodec, SendCodec};
use wirecat::console::{Console, StdConsole};
use wirecat::transport::ZmqTransport;
use wirecat::{Bridge, BridgeError, Config, EndpointMode, Result, Role, SendPolicy};

/// Bridge a line console to a ZeroMQ socket.
///
/// Reads lines from stdin, encodes them, and sends them over the socket;
/// prints decoded messages arriving from the socket to stdout.
#[derive(Debug, Parser)]
#[command(name = "wirecat", version, about)]
struct Cli {
    /// Bind this address and await peers
    #[arg(
        long,
        value_name = "ADDR",
        conflicts_with = "connect_to",
        required_unless_present = "connect_to"
    )]
    listen_on: Option<String>,

    /// Connect out to a peer at this address
    #[arg(long, value_name = "ADDR")]
    connect_to: Option<String>,

    /// Socket role: pub|sub|req|rep
    #[arg(long = "as", value_name = "ROLE")]
    role: String,

    /// Codec applied to console lines before sending
    #[arg(long, value_name = "CODEC", default_value = "str2bin")]
    on_send: String,

    /// Codec applied to received messages before printing
    #[arg(long, value_name = "CODEC", default_value = "bin2str")]
    on_recv: String,

    /// What to do when a non-blocking send finds the socket not ready:
    /// warn|discard|block
    #[arg(long, value_name = "POLICY", default_value = "warn")]
    send_policy: String,

    /// Print the startup banner and per-step prompt markers
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Resolve raw names into the typed configuration.
    ///
    /// Runs before any socket exists, so bad names never reach the
    /// transport.
    fn into_config(self) -> Result<Config> {
        let (mode, address) = match (self.listen_on, self.connect_to) {
            (Some(address), None) => (EndpointMode::Listen, address),
            (None, Some(address)) => (EndpointMode::Connect, address),
            _ => return Err(BridgeError::Endpoint),
        };

        Ok(Config {
            role: Role::resolve(&self.role)?,
            mode,
            address,
            send_codec: SendCodec::resolve(&self.on_send)?,
            recv_codec: RecvCodec::resolve(&self.on_recv)?,
            send_policy: SendPolicy::resolve(&self.send_policy)?,
            verbose: self.verbose,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Open the socket, print the banner, and hand control to the loop.
async fn run(config: Config) -> Result<()> {
    let mut console = StdConsole::new();

    if config.verbose {
        let verb = match config.mode {
            EndpointMode::Listen => "Listening on",
            EndpointMode::Connect => "Connecting to",
        };
        console
            .print_line(&format!(
                "{verb} {} as {}...",
                config.address,
                config.role.name()
            ))
            .await?;
    }

    let transport = ZmqTransport::open(config.role, config.mode, &config.address).await?;
    Bridge::new(console, transport, &config).run().await
}

/// Logs go to stderr; stdout is reserved for decoded message text.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
