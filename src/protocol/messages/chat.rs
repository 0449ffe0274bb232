//! Chat messages.
//!
//! The chat schemas carry the protocol's densest mix of bit-width string
//! length prefixes; each field's width is fixed by the schema and must match
//! on both sides.

use crate::core::bit_buffer::{BitReader, BitWriter};
use crate::core::guid::Guid;
use crate::error::{ProtocolError, Result};
use crate::protocol::message::{ConnChannel, Decodable, Encodable, Message, Opcode};

/// Chat delivery mode selected by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChatKind {
    Say = 1,
    Yell = 5,
    Whisper = 7,
}

impl ChatKind {
    /// Map a raw wire value to a chat kind
    pub fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            1 => ChatKind::Say,
            5 => ChatKind::Yell,
            7 => ChatKind::Whisper,
            other => {
                return Err(ProtocolError::UnknownDiscriminant {
                    what: "chat kind",
                    value: other as u32,
                })
            }
        })
    }
}

/// Client chat message.
///
/// The whisper target travels only when the kind discriminant says so; there
/// is no separate presence bit.
///
/// # Wire Format
/// ```text
/// [Kind(1)] [Language(4)]
/// bits: [TextLen(9)] [TargetLen(7)]?   (TargetLen iff Kind == Whisper)
/// [Text(TextLen)] [Target(TargetLen)]?
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub kind: ChatKind,
    pub language: u32,
    /// Whisper recipient; `Some` exactly when `kind` is [`ChatKind::Whisper`]
    pub target: Option<String>,
    pub text: String,
}

impl Message for ChatMessage {
    const OPCODE: Opcode = Opcode::ChatMessage;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Decodable for ChatMessage {
    fn decode(r: &mut BitReader<'_>) -> Result<Self> {
        let kind = ChatKind::from_u8(r.read_u8()?)?;
        let language = r.read_u32()?;

        let text_len = r.read_bits(9)? as usize;
        let target_len = if kind == ChatKind::Whisper {
            Some(r.read_bits(7)? as usize)
        } else {
            None
        };

        let text = r.read_string(text_len)?;
        let target = match target_len {
            Some(len) => Some(r.read_string(len)?),
            None => None,
        };

        Ok(ChatMessage {
            kind,
            language,
            target,
            text,
        })
    }
}

/// Server-relayed chat line.
///
/// # Wire Format
/// ```text
/// [Kind(1)] [Language(4)]
/// bits: [HasChannel(1)] [ChannelLen(7)]? [SenderNameLen(11)] [TextLen(13)]
/// [PackedGuid sender]
/// [Channel(ChannelLen)]? [SenderName(SenderNameLen)] [Text(TextLen)]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServerChat {
    pub kind: u8,
    pub language: u32,
    pub sender: Guid,
    /// Custom channel name, only for channel chat
    pub channel: Option<String>,
    pub sender_name: String,
    pub text: String,
}

impl Message for ServerChat {
    const OPCODE: Opcode = Opcode::ServerChat;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Encodable for ServerChat {
    fn encode(&self, w: &mut BitWriter) {
        if let Some(channel) = &self.channel {
            assert!(channel.len() < 1 << 7, "channel name exceeds 7-bit length");
        }
        assert!(
            self.sender_name.len() < 1 << 11,
            "sender name exceeds 11-bit length"
        );
        assert!(self.text.len() < 1 << 13, "chat text exceeds 13-bit length");

        w.write_u8(self.kind);
        w.write_u32(self.language);

        w.write_bit(self.channel.is_some());
        if let Some(channel) = &self.channel {
            w.write_bits(channel.len() as u32, 7);
        }
        w.write_bits(self.sender_name.len() as u32, 11);
        w.write_bits(self.text.len() as u32, 13);

        w.write_packed_guid(self.sender);

        if let Some(channel) = &self.channel {
            w.write_string(channel);
        }
        w.write_string(&self.sender_name);
        w.write_string(&self.text);
    }
}
