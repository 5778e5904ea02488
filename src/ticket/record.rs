//! Stored ticket record

use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fmt;

/// One cached resumption ticket, keyed by (SNI, ALPN)
///
/// Records own copies of all their byte fields and are never mutated after
/// creation. Each field is at most 65535 bytes long.
#[derive(Clone, PartialEq, Eq)]
pub struct TicketRecord {
    pub(crate) expires_at: u64,
    pub(crate) sni: Vec<u8>,
    pub(crate) alpn: Vec<u8>,
    pub(crate) ticket: Vec<u8>,
}

impl TicketRecord {
    /// Absolute expiration time, in the store's time unit
    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }

    /// Server name the ticket was issued for
    pub fn sni(&self) -> &[u8] {
        &self.sni
    }

    /// Application protocol the ticket was issued for
    pub fn alpn(&self) -> &[u8] {
        &self.alpn
    }

    /// Opaque ticket payload
    pub fn ticket(&self) -> &[u8] {
        &self.ticket
    }

    /// A record is usable while `now` is strictly before its expiration
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// Exact byte-for-byte key comparison
    pub fn matches(&self, sni: &[u8], alpn: &[u8]) -> bool {
        self.sni == sni && self.alpn == alpn
    }

    /// Server name for display
    pub fn sni_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sni)
    }

    /// Application protocol for display
    pub fn alpn_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.alpn)
    }

    /// SHA256 of the ticket payload, first 12 hex chars
    ///
    /// Lets tools tell tickets apart without printing the secret itself.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.ticket);
        hex::encode(&digest[..6])
    }
}

// Keeps the payload out of logs and panic messages
impl fmt::Debug for TicketRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketRecord")
            .field("expires_at", &self.expires_at)
            .field("sni", &self.sni_lossy())
            .field("alpn", &self.alpn_lossy())
            .field("ticket_len", &self.ticket.len())
            .finish()
    }
}
