//! # Message Schema Catalog
//!
//! One type per wire message. The field sequence inside each `encode`/
//! `decode` method is the wire format itself and is order-dependent: a
//! reordered call changes the protocol.
//!
//! ## Catalog Organization
//! - **auth**: session establishment, verdicts, signed redirects
//! - **character**: roster enumeration and creation
//! - **chat**: client chat and server relay
//! - **movement**: move packets and the shared mover-state substructure
//! - **query**: time synchronization
//!
//! Client-originated messages implement [`Decodable`]; server-originated
//! messages implement [`Encodable`]; substructures embedded in both
//! directions implement both.
//!
//! [`Decodable`]: crate::protocol::message::Decodable
//! [`Encodable`]: crate::protocol::message::Encodable

pub mod auth;
pub mod character;
pub mod chat;
pub mod movement;
pub mod query;

use crate::protocol::message::Opcode;

/// A decoded client message, tagged by type.
///
/// This is what the dispatcher hands to domain logic after routing a raw
/// payload through the registered decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    AuthSession(auth::AuthSession),
    CharEnumRequest(character::CharEnumRequest),
    CharCreate(character::CharCreate),
    Chat(chat::ChatMessage),
    MoveStartForward(movement::MoveStartForward),
    QueryTime(query::QueryTime),
}

impl ClientMessage {
    /// Opcode of the wrapped message
    pub fn opcode(&self) -> Opcode {
        match self {
            ClientMessage::AuthSession(_) => Opcode::AuthSession,
            ClientMessage::CharEnumRequest(_) => Opcode::CharEnumRequest,
            ClientMessage::CharCreate(_) => Opcode::CharCreate,
            ClientMessage::Chat(_) => Opcode::ChatMessage,
            ClientMessage::MoveStartForward(_) => Opcode::MoveStartForward,
            ClientMessage::QueryTime(_) => Opcode::QueryTime,
        }
    }
}

impl From<auth::AuthSession> for ClientMessage {
    fn from(msg: auth::AuthSession) -> Self {
        ClientMessage::AuthSession(msg)
    }
}

impl From<character::CharEnumRequest> for ClientMessage {
    fn from(msg: character::CharEnumRequest) -> Self {
        ClientMessage::CharEnumRequest(msg)
    }
}

impl From<character::CharCreate> for ClientMessage {
    fn from(msg: character::CharCreate) -> Self {
        ClientMessage::CharCreate(msg)
    }
}

impl From<chat::ChatMessage> for ClientMessage {
    fn from(msg: chat::ChatMessage) -> Self {
        ClientMessage::Chat(msg)
    }
}

impl From<movement::MoveStartForward> for ClientMessage {
    fn from(msg: movement::MoveStartForward) -> Self {
        ClientMessage::MoveStartForward(msg)
    }
}

impl From<query::QueryTime> for ClientMessage {
    fn from(msg: query::QueryTime) -> Self {
        ClientMessage::QueryTime(msg)
    }
}
