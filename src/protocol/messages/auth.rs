//! Session establishment messages.

use crate::config::RedirectKey;
use crate::core::bit_buffer::{BitReader, BitWriter};
use crate::error::Result;
use crate::protocol::message::{ConnChannel, Decodable, Encodable, Message, Opcode};
use crate::utils::crypto::RedirectSigner;
use std::net::Ipv4Addr;

/// Byte length of the client auth digest
pub const AUTH_DIGEST_LEN: usize = 20;

/// Addon the client reports during session setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonInfo {
    pub name: String,
    pub enabled: u8,
    pub crc: u32,
}

/// Client session-establishment request.
///
/// # Wire Format
/// ```text
/// [Build(4)] [ClientSeed(4)] [Digest(20)] [Account\0]
/// [AddonCount(4)]
/// per addon: [Name\0] [Enabled(1)] [Crc(4)]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Client build number; the session layer compares this against
    /// [`crate::config::CLIENT_BUILD`]
    pub build: u32,
    pub client_seed: u32,
    pub digest: [u8; AUTH_DIGEST_LEN],
    pub account: String,
    pub addons: Vec<AddonInfo>,
}

impl Message for AuthSession {
    const OPCODE: Opcode = Opcode::AuthSession;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Decodable for AuthSession {
    fn decode(r: &mut BitReader<'_>) -> Result<Self> {
        let build = r.read_u32()?;
        let client_seed = r.read_u32()?;

        let mut digest = [0u8; AUTH_DIGEST_LEN];
        digest.copy_from_slice(r.read_bytes(AUTH_DIGEST_LEN)?);

        let account = r.read_cstring()?;

        let addon_count = r.read_u32()? as usize;
        r.limits().check_list("addon list", addon_count)?;
        let mut addons = Vec::with_capacity(addon_count);
        for _ in 0..addon_count {
            addons.push(AddonInfo {
                name: r.read_cstring()?,
                enabled: r.read_u8()?,
                crc: r.read_u32()?,
            });
        }

        Ok(AuthSession {
            build,
            client_seed,
            digest,
            account,
            addons,
        })
    }
}

/// Session-establishment verdict.
///
/// The payload is keyed entirely by the result code that leads the message;
/// there is no presence bit.
///
/// # Wire Format
/// ```text
/// [Result(1)]
/// Ok:        [BillingTime(4)] [BillingFlags(1)] [Expansion(1)]
/// WaitQueue: [Position(4)]  bits: [FreeMigration(1)]
/// Failed:    (nothing)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResponse {
    Ok {
        billing_time: u32,
        billing_flags: u8,
        expansion: u8,
    },
    WaitQueue {
        position: u32,
        free_migration: bool,
    },
    Failed,
}

/// Wire values of the [`AuthResponse`] result code
impl AuthResponse {
    pub const RESULT_OK: u8 = 12;
    pub const RESULT_FAILED: u8 = 13;
    pub const RESULT_WAIT_QUEUE: u8 = 27;
}

impl Message for AuthResponse {
    const OPCODE: Opcode = Opcode::AuthResponse;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Encodable for AuthResponse {
    fn encode(&self, w: &mut BitWriter) {
        match *self {
            AuthResponse::Ok {
                billing_time,
                billing_flags,
                expansion,
            } => {
                w.write_u8(Self::RESULT_OK);
                w.write_u32(billing_time);
                w.write_u8(billing_flags);
                w.write_u8(expansion);
            }
            AuthResponse::WaitQueue {
                position,
                free_migration,
            } => {
                w.write_u8(Self::RESULT_WAIT_QUEUE);
                w.write_u32(position);
                w.write_bit(free_migration);
            }
            AuthResponse::Failed => {
                w.write_u8(Self::RESULT_FAILED);
            }
        }
    }
}

/// Server instruction to reconnect to another node.
///
/// Constructed with the redirect signing key so a populated message always
/// carries a valid signature; the key itself never reaches the wire.
///
/// # Wire Format
/// ```text
/// [Port(2)] [Ipv4Octets(4)] [Token(1)] [Signature(32)]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTo {
    pub addr: Ipv4Addr,
    pub port: u16,
    pub token: u8,
    signature: [u8; 32],
}

impl ConnectTo {
    /// Build a signed redirect to `addr:port`
    pub fn new(key: &RedirectKey, addr: Ipv4Addr, port: u16, token: u8) -> Self {
        let signature = RedirectSigner::new(key).sign(addr, port, token);
        Self {
            addr,
            port,
            token,
            signature,
        }
    }

    /// The signature over the redirect target
    pub fn signature(&self) -> &[u8; 32] {
        &self.signature
    }
}

impl Message for ConnectTo {
    const OPCODE: Opcode = Opcode::ConnectTo;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Encodable for ConnectTo {
    fn encode(&self, w: &mut BitWriter) {
        w.write_u16(self.port);
        w.write_bytes(&self.addr.octets());
        w.write_u8(self.token);
        w.write_bytes(&self.signature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeLimits;
    use crate::error::ProtocolError;

    fn encode_auth_session(addon_count: u32, addons_written: u32) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write_u32(15595);
        w.write_u32(0xDEAD_BEEF);
        w.write_bytes(&[0x11; AUTH_DIGEST_LEN]);
        w.write_cstring("ARTHAS");
        w.write_u32(addon_count);
        for i in 0..addons_written {
            w.write_cstring(&format!("Addon{i}"));
            w.write_u8(1);
            w.write_u32(0xCAFE + i);
        }
        w.finish().to_vec()
    }

    #[test]
    fn auth_session_decodes() {
        let bytes = encode_auth_session(2, 2);
        let mut r = BitReader::new(&bytes);
        let msg = AuthSession::decode(&mut r).unwrap();
        r.expect_exhausted().unwrap();
        assert_eq!(msg.build, 15595);
        assert_eq!(msg.account, "ARTHAS");
        assert_eq!(msg.addons.len(), 2);
        assert_eq!(msg.addons[1].name, "Addon1");
        assert_eq!(msg.addons[1].crc, 0xCAFF);
    }

    #[test]
    fn hostile_addon_count_is_rejected_before_allocation() {
        let bytes = encode_auth_session(u32::MAX, 0);
        let mut r = BitReader::new(&bytes);
        assert!(matches!(
            AuthSession::decode(&mut r),
            Err(ProtocolError::OversizedCount {
                what: "addon list",
                ..
            })
        ));
    }

    #[test]
    fn addon_count_beyond_payload_is_underrun() {
        let limits = DecodeLimits {
            max_list_len: 100,
            ..DecodeLimits::default()
        };
        let bytes = encode_auth_session(3, 1);
        let mut r = BitReader::with_limits(&bytes, limits);
        assert!(matches!(
            AuthSession::decode(&mut r),
            Err(ProtocolError::BufferUnderrun { .. })
        ));
    }

    #[test]
    fn auth_response_variants_lead_with_result_code() {
        let mut w = BitWriter::new();
        AuthResponse::Ok {
            billing_time: 0,
            billing_flags: 0,
            expansion: 3,
        }
        .encode(&mut w);
        let bytes = w.finish();
        assert_eq!(bytes[0], AuthResponse::RESULT_OK);
        assert_eq!(bytes.len(), 7);

        let mut w = BitWriter::new();
        AuthResponse::WaitQueue {
            position: 280,
            free_migration: false,
        }
        .encode(&mut w);
        let bytes = w.finish();
        assert_eq!(bytes[0], AuthResponse::RESULT_WAIT_QUEUE);
        assert_eq!(bytes.len(), 6);

        let mut w = BitWriter::new();
        AuthResponse::Failed.encode(&mut w);
        assert_eq!(w.finish().as_ref(), [AuthResponse::RESULT_FAILED]);
    }

    #[test]
    fn connect_to_wire_layout_and_signature() {
        let key = RedirectKey::new([9u8; 32]);
        let msg = ConnectTo::new(&key, Ipv4Addr::new(203, 0, 113, 9), 8086, 42);
        let mut w = BitWriter::new();
        msg.encode(&mut w);
        let bytes = w.finish();
        assert_eq!(bytes.len(), 2 + 4 + 1 + 32);

        let mut r = BitReader::new(&bytes);
        let port = r.read_u16().unwrap();
        let mut octets = [0u8; 4];
        octets.copy_from_slice(r.read_bytes(4).unwrap());
        let token = r.read_u8().unwrap();
        let mut signature = [0u8; 32];
        signature.copy_from_slice(r.read_bytes(32).unwrap());
        r.expect_exhausted().unwrap();

        assert_eq!(port, 8086);
        assert_eq!(Ipv4Addr::from(octets), Ipv4Addr::new(203, 0, 113, 9));
        assert!(RedirectSigner::new(&key).verify(Ipv4Addr::from(octets), port, token, &signature));
    }
}
