//! # Protocol Layer
//!
//! Message identity, the schema catalog, and opcode-routed decoding.
//!
//! ## Components
//! - **Message**: opcodes, channels, and the `Decodable`/`Encodable`
//!   capability traits
//! - **Messages**: the per-type schema catalog
//! - **Dispatcher**: the opcode → decoder registry the framing layer drives

pub mod dispatcher;
pub mod message;
pub mod messages;


pub use dispatcher::Dispatcher;
pub use message::{encode_message, ConnChannel, Decodable, Encodable, Message, Opcode, OutboundPacket};
pub use messages::ClientMessage;
