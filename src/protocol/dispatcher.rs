use crate::config::DecodeLimits;
use crate::core::bit_buffer::BitReader;
use crate::error::{ProtocolError, Result};
use crate::protocol::message::{Decodable, Message, Opcode};
use crate::protocol::messages::ClientMessage;
use crate::protocol::messages::{auth, character, chat, movement, query};
use std::collections::HashMap;
use tracing::warn;

type DecodeFn = fn(&mut BitReader<'_>) -> Result<ClientMessage>;

/// Opcode-routed decode registry.
///
/// Built once at process start, immutable afterwards; the framing layer
/// hands each inbound payload to [`decode`](Self::decode) with the opcode it
/// framed. Monomorphized decoders are registered as plain function pointers,
/// so routing stays allocation-free.
pub struct Dispatcher {
    handlers: HashMap<Opcode, DecodeFn>,
    limits: DecodeLimits,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Empty registry with default decode limits
    pub fn new() -> Self {
        Self::with_limits(DecodeLimits::default())
    }

    /// Empty registry with explicit decode limits
    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self {
            handlers: HashMap::new(),
            limits,
        }
    }

    /// Registry pre-populated with every client message in the catalog
    pub fn standard() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register::<auth::AuthSession>();
        dispatcher.register::<character::CharEnumRequest>();
        dispatcher.register::<character::CharCreate>();
        dispatcher.register::<chat::ChatMessage>();
        dispatcher.register::<movement::MoveStartForward>();
        dispatcher.register::<query::QueryTime>();
        dispatcher
    }

    /// Register a message type's decoder under its opcode
    pub fn register<M>(&mut self)
    where
        M: Message + Decodable + Into<ClientMessage>,
    {
        self.handlers
            .insert(M::OPCODE, |r| M::decode(r).map(Into::into));
    }

    /// Number of registered decoders
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no decoders are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Decode a framed payload into a typed message.
    ///
    /// The payload must be consumed exactly: leftover bytes mean the peer
    /// and this catalog disagree about the schema, which is as fatal as an
    /// underrun.
    pub fn decode(&self, opcode: Opcode, payload: &[u8]) -> Result<ClientMessage> {
        let handler = self
            .handlers
            .get(&opcode)
            .ok_or(ProtocolError::UnknownOpcode(opcode as u16))?;

        let mut r = BitReader::with_limits(payload, self.limits);
        let msg = match handler(&mut r) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(%opcode, error = %e, "message decode rejected");
                return Err(e);
            }
        };

        if let Err(e) = r.expect_exhausted() {
            warn!(%opcode, error = %e, "message decode left trailing payload");
            return Err(e);
        }

        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bit_buffer::BitWriter;

    #[test]
    fn standard_catalog_covers_all_client_opcodes() {
        let dispatcher = Dispatcher::standard();
        assert_eq!(dispatcher.len(), 6);
    }

    #[test]
    fn routes_by_opcode() {
        let dispatcher = Dispatcher::standard();
        let msg = dispatcher.decode(Opcode::QueryTime, &[]).unwrap();
        assert_eq!(msg.opcode(), Opcode::QueryTime);
    }

    #[test]
    fn unregistered_opcode_is_rejected() {
        let dispatcher = Dispatcher::new();
        assert_eq!(
            dispatcher.decode(Opcode::QueryTime, &[]),
            Err(ProtocolError::UnknownOpcode(Opcode::QueryTime as u16))
        );
    }

    #[test]
    fn server_opcodes_are_not_decodable() {
        let dispatcher = Dispatcher::standard();
        assert!(matches!(
            dispatcher.decode(Opcode::AuthResponse, &[12]),
            Err(ProtocolError::UnknownOpcode(_))
        ));
    }

    #[test]
    fn trailing_payload_is_rejected() {
        let dispatcher = Dispatcher::standard();
        let err = dispatcher.decode(Opcode::QueryTime, &[0xFF]).unwrap_err();
        assert_eq!(err, ProtocolError::TrailingBytes { remaining: 1 });
    }

    #[test]
    fn registry_limits_reach_the_reader() {
        let mut dispatcher = Dispatcher::with_limits(DecodeLimits {
            max_string_bytes: 2,
            ..DecodeLimits::default()
        });
        dispatcher.register::<chat::ChatMessage>();

        let mut w = BitWriter::new();
        w.write_u8(chat::ChatKind::Say as u8);
        w.write_u32(0);
        w.write_bits(5, 9);
        w.write_string("hello");
        let bytes = w.finish();

        assert!(matches!(
            dispatcher.decode(Opcode::ChatMessage, &bytes),
            Err(ProtocolError::OversizedCount { what: "string", .. })
        ));
    }
}
