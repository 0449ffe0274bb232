//! # Message Identity and Capability Traits
//!
//! Every wire message carries a stable opcode and a channel classification,
//! and implements exactly the codec capability its direction needs:
//! [`Decodable`] for client-originated messages, [`Encodable`] for
//! server-originated ones. The few composite substructures embedded in both
//! directions implement both.
//!
//! The opcode and channel are metadata for the external framing layer, which
//! routes payloads by them; the codec only exposes the identity.

use crate::core::bit_buffer::{BitReader, BitWriter};
use crate::error::{ProtocolError, Result};
use bytes::Bytes;

/// Stable numeric identity of each message type.
///
/// Values are part of the external wire contract and never change between
/// releases targeting the same client build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    // Client -> server
    AuthSession = 0x01ED,
    CharEnumRequest = 0x0037,
    CharCreate = 0x0036,
    ChatMessage = 0x0095,
    MoveStartForward = 0x00B5,
    QueryTime = 0x01CE,

    // Server -> client
    AuthResponse = 0x01EE,
    ConnectTo = 0x0050,
    CharEnumResult = 0x003B,
    ServerChat = 0x0096,
    MoveUpdate = 0x00DD,
    QueryTimeResponse = 0x01CF,
    SetTimeSpeed = 0x0042,
}

impl Opcode {
    /// Map a raw wire value to an opcode
    pub fn from_u16(value: u16) -> Result<Self> {
        Ok(match value {
            0x01ED => Opcode::AuthSession,
            0x0037 => Opcode::CharEnumRequest,
            0x0036 => Opcode::CharCreate,
            0x0095 => Opcode::ChatMessage,
            0x00B5 => Opcode::MoveStartForward,
            0x01CE => Opcode::QueryTime,
            0x01EE => Opcode::AuthResponse,
            0x0050 => Opcode::ConnectTo,
            0x003B => Opcode::CharEnumResult,
            0x0096 => Opcode::ServerChat,
            0x00DD => Opcode::MoveUpdate,
            0x01CF => Opcode::QueryTimeResponse,
            0x0042 => Opcode::SetTimeSpeed,
            other => return Err(ProtocolError::UnknownOpcode(other)),
        })
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}({:#06x})", *self as u16)
    }
}

/// Logical connection class a message travels on.
///
/// The framing layer keeps one realm connection and, while the player is in
/// a world instance, a second instance connection; it routes each opcode to
/// the right socket using this classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnChannel {
    Realm,
    Instance,
}

/// A type that populates itself from wire data (client-originated messages)
pub trait Decodable: Sized {
    /// Consume fields from the reader in exact wire order
    fn decode(r: &mut BitReader<'_>) -> Result<Self>;
}

/// A type that serializes itself into wire data (server-originated messages)
pub trait Encodable {
    /// Sequence fields into the writer in exact wire order
    fn encode(&self, w: &mut BitWriter);
}

/// Identity carried by every top-level wire message
pub trait Message {
    /// Stable opcode of this message type
    const OPCODE: Opcode;

    /// Connection class this message travels on
    const CHANNEL: ConnChannel;
}

/// An encoded payload plus the routing metadata the framing layer needs
#[derive(Debug, Clone)]
pub struct OutboundPacket {
    pub opcode: Opcode,
    pub channel: ConnChannel,
    pub payload: Bytes,
}

/// Encode a server message into a fresh buffer and bundle its routing
/// metadata for the framing layer
pub fn encode_message<M: Message + Encodable>(msg: &M) -> OutboundPacket {
    let mut w = BitWriter::new();
    msg.encode(&mut w);
    OutboundPacket {
        opcode: M::OPCODE,
        channel: M::CHANNEL,
        payload: w.finish(),
    }
}
