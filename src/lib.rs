//! # xsnoop - X11 intercepting proxy
//!
//! xsnoop sits between X11 clients and a real X server. It accepts client
//! connections as if it were the server, opens a matching upstream connection
//! for each one, forwards bytes in both directions unmodified, and writes a
//! human-readable transcript of every protocol message crossing the link:
//! connection setup, requests, replies, errors, and events, for core X11 plus
//! the BIG-REQUESTS length extension.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`protocol`] - Table-driven X11 protocol decoder and per-connection parse state
//! - [`proxy`] - Listener, upstream connector, and the per-connection shuttle loop
//! - [`output`] - Transcript sink and message rendering
//! - [`core`] - Command-line arguments, settings, and logging setup
//!
//! ## Example
//!
//! ```rust,no_run
//! use xsnoop::core::Settings;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::default();
//!     let code = xsnoop::proxy::run(settings).await?;
//!     std::process::exit(code);
//! }
//! ```

pub mod core;
pub mod output;
pub mod protocol;
pub mod proxy;

// Re-export commonly used types
pub use core::Settings;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the xsnoop library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid display name: {0}")]
    DisplayName(String),

    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Transcript error: {0}")]
    Transcript(String),
}
