//! # realm-protocol
//!
//! Bit-packed binary packet codec core for realm game servers.
//!
//! This crate implements the read/write contract of a game protocol whose
//! wire format mixes byte-aligned primitives with sub-byte bitfields:
//! variable-width string length prefixes, optional-field presence bits,
//! packed GUIDs, and packed calendar timestamps. It sits between a framing/
//! session layer (which owns sockets, headers, and encryption) and game
//! domain logic (which owns the meaning of the fields).
//!
//! ## Layers
//! - [`core`]: the bit-oriented buffer cursors and the recurring value
//!   codecs (packed GUIDs, packed time)
//! - [`protocol`]: message identity, the schema catalog, and the opcode →
//!   decoder registry
//! - [`config`]: protocol constants, decode limits, key material
//!
//! ## Example
//! ```rust
//! use realm_protocol::core::{BitReader, BitWriter, Guid};
//!
//! // Encode: a 9-bit length-prefixed string and a packed GUID.
//! let mut w = BitWriter::new();
//! w.write_bits(5, 9);
//! w.write_string("hello");
//! w.write_packed_guid(Guid::new(0x1234));
//!
//! // Decode mirrors the exact same sequence.
//! let bytes = w.finish();
//! let mut r = BitReader::new(&bytes);
//! let len = r.read_bits(9)? as usize;
//! assert_eq!(r.read_string(len)?, "hello");
//! assert_eq!(r.read_packed_guid()?, Guid::new(0x1234));
//! # Ok::<(), realm_protocol::error::ProtocolError>(())
//! ```
//!
//! ## Safety Model
//! Decoding never trusts the peer: every read is bounds-checked and every
//! wire-supplied count is clamped before it sizes a loop or allocation. A
//! failed decode is a typed [`error::ProtocolError`]; fatal variants tell
//! the session layer the stream cannot be resynchronized.

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::{BitReader, BitWriter, Guid};
pub use config::{DecodeLimits, ProtocolConfig, RedirectKey};
pub use error::{ProtocolError, Result};
pub use protocol::{
    encode_message, ClientMessage, ConnChannel, Decodable, Dispatcher, Encodable, Message, Opcode,
    OutboundPacket,
};
