//! # Error Types
//!
//! Error handling for the packet codec.
//!
//! This module defines all error variants that can occur while decoding wire
//! data, plus the ambient configuration errors of the crate.
//!
//! ## Error Categories
//! - **Framing Errors**: Reads past the end of a payload. These are fatal for
//!   the connection: a misaligned bit/byte stream has no resynchronization
//!   point, so the session layer must tear the connection down.
//! - **Protocol Violations**: Untrusted count or length fields exceeding the
//!   configured bounds, unknown discriminants, unknown opcodes.
//! - **Data Errors**: Malformed text in string fields.
//! - **Configuration Errors**: Invalid or unreadable configuration.
//!
//! Encoding has no error surface: the backing store grows as needed, and an
//! invalid field supplied by the caller is a contract violation (assertion),
//! not a wire error.
//!
//! All errors implement `std::error::Error` for interoperability.

use thiserror::Error;

/// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("buffer underrun: needed {needed} bytes, {available} available")]
    BufferUnderrun { needed: usize, available: usize },

    #[error("{what} length {count} exceeds limit {limit}")]
    OversizedCount {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    #[error("unknown {what} value: {value}")]
    UnknownDiscriminant { what: &'static str, value: u32 },

    #[error("unknown opcode: {0:#06x}")]
    UnknownOpcode(u16),

    #[error("malformed string field: invalid UTF-8")]
    MalformedString,

    #[error("{remaining} unconsumed bytes after decode")]
    TrailingBytes { remaining: usize },

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Whether this error leaves the connection unrecoverable.
    ///
    /// A buffer underrun or trailing payload means the peer and this side
    /// disagree about the wire layout; the stream cannot be realigned and the
    /// only safe recovery is to close the connection. The remaining variants
    /// reject a single message and leave the stream framing intact, so the
    /// session layer may choose to drop just that message.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProtocolError::BufferUnderrun { .. } | ProtocolError::TrailingBytes { .. }
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
