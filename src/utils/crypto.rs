//! # Redirect Signing
//!
//! HMAC-SHA256 signatures over connection-redirect targets.
//!
//! The server signs the address it is redirecting a client to, so the client
//! can verify the redirect came from the realm it authenticated against. Key
//! material is an explicitly constructed [`RedirectKey`] owned by the
//! embedder; nothing here is process-global.

use crate::config::RedirectKey;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::net::Ipv4Addr;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies redirect targets with a borrowed key.
pub struct RedirectSigner<'a> {
    key: &'a RedirectKey,
}

impl<'a> RedirectSigner<'a> {
    /// Borrow key material for signing
    pub fn new(key: &'a RedirectKey) -> Self {
        Self { key }
    }

    fn mac(&self, addr: Ipv4Addr, port: u16, token: u8) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(&addr.octets());
        mac.update(&port.to_le_bytes());
        mac.update(&[token]);
        mac
    }

    /// Signature over a redirect target
    pub fn sign(&self, addr: Ipv4Addr, port: u16, token: u8) -> [u8; 32] {
        self.mac(addr, port, token).finalize().into_bytes().into()
    }

    /// Constant-time check of a received signature
    pub fn verify(&self, addr: Ipv4Addr, port: u16, token: u8, signature: &[u8; 32]) -> bool {
        self.mac(addr, port, token).verify_slice(signature).is_ok()
    }
}
