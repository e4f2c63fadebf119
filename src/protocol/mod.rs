//! X11 protocol decoding.
//!
//! The protocol knowledge lives in static schema tables ([`requests`],
//! [`events`], [`errors`], [`names`], [`atoms`]) interpreted by a
//! table-driven decoder ([`decode`]) and a per-connection driver
//! ([`parser`]). Messages are described as data, not as types with virtual
//! dispatch: one descriptor per opcode/event-code carries the fixed-field
//! layout and the plan for the variable suffix.

pub mod atoms;
pub mod decode;
pub mod endian;
pub mod errors;
pub mod events;
pub mod names;
pub mod parser;
pub mod requests;
pub mod setup;
pub mod types;

pub use endian::{ByteOrder, ByteReader, pad};
pub use parser::ParserState;

/// Failure modes of the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer does not yet hold the whole message; retry after more bytes.
    NeedMoreData,
    /// The message is shorter than its schema requires.
    Truncated(&'static str),
    /// The message contradicts the protocol; the connection must fail.
    Invalid(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::NeedMoreData => write!(f, "need more data"),
            ParseError::Truncated(what) => write!(f, "truncated message: {}", what),
            ParseError::Invalid(msg) => write!(f, "invalid message: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}
