//! Console I/O - the text side of the bridge.
//!
//! stdout carries decoded message text only; logs go to stderr so the two
//! streams can be piped independently.
//!
//! # Important
//!
//! - Lines end with an explicit `\n`, never `println!` (which may emit
//!   `\r\n` on Windows)
//! - Every write flushes immediately so piped readers see complete lines

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use crate::error::Result;

/// A line-based text source and sink.
#[async_trait]
pub trait Console: Send {
    /// Read the next line, suspending until one is available.
    ///
    /// Returns `None` once the input stream is exhausted.
    async fn next_line(&mut self) -> Result<Option<String>>;

    /// Print one line of text, with a trailing newline.
    async fn print_line(&mut self, text: &str) -> Result<()>;

    /// Print a prompt marker without a newline (verbose mode).
    async fn print_marker(&mut self, marker: &str) -> Result<()>;
}

/// Production console over stdin/stdout.
pub struct StdConsole {
    input: Lines<BufReader<Stdin>>,
    output: Stdout,
}

impl StdConsole {
    /// Wrap the process stdin/stdout.
    pub fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()).lines(),
            output: tokio::io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.input.next_line().await?)
    }

    async fn print_line(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn print_marker(&mut self, marker: &str) -> Result<()> {
        self.output.write_all(marker.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
