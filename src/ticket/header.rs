//! Resumption ticket header parsing
//!
//! Only two fields of the ticket blob are interpreted: the declared content
//! length and the lifetime. Everything else is opaque and stored verbatim.

use crate::error::{TicketStoreError, TicketStoreResult};

/// Smallest ticket the handshake layer can produce
pub const MIN_TICKET_LEN: usize = 35;

/// Largest ticket that fits the 16-bit length prefix of the file format
pub const MAX_TICKET_LEN: usize = u16::MAX as usize;

/// Offset of the big-endian 16-bit declared content length
pub const DECLARED_LENGTH_OFFSET: usize = 11;

/// Offset of the big-endian 32-bit lifetime, in seconds
pub const TTL_OFFSET: usize = 13;

/// Fields read from the front of a ticket blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketHeader {
    /// Content length announced by the issuer. Informational only.
    pub declared_length: u16,
    /// Ticket lifetime in seconds
    pub ttl_seconds: u32,
}

impl TicketHeader {
    /// Parse the header of a raw ticket blob
    pub fn parse(blob: &[u8]) -> TicketStoreResult<Self> {
        if blob.len() < MIN_TICKET_LEN {
            return Err(TicketStoreError::MalformedTicket {
                len: blob.len(),
                reason: "shorter than ticket header",
            });
        }

        let declared_length = u16::from_be_bytes([
            blob[DECLARED_LENGTH_OFFSET],
            blob[DECLARED_LENGTH_OFFSET + 1],
        ]);
        let ttl_seconds = u32::from_be_bytes([
            blob[TTL_OFFSET],
            blob[TTL_OFFSET + 1],
            blob[TTL_OFFSET + 2],
            blob[TTL_OFFSET + 3],
        ]);

        Ok(Self {
            declared_length,
            ttl_seconds,
        })
    }
}
