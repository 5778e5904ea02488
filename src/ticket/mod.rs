//! Resumption ticket data model
//!
//! A ticket arrives from the handshake layer as an opaque blob. The store
//! reads its lifetime from a small fixed header, keys it by server name and
//! application protocol, and persists it in a flat length-prefixed format.

pub mod codec;
pub mod header;
pub mod record;

pub use codec::{decode_all, encode_all, RecordDecoder};
pub use header::{TicketHeader, MIN_TICKET_LEN};
pub use record::TicketRecord;

/// Build a ticket blob the way the handshake layer lays one out:
/// issue time, version bytes, content length, lifetime, then filler.
#[cfg(test)]
pub(crate) fn sample_ticket(issued_at: u64, ttl_seconds: u32, len: usize) -> Vec<u8> {
    assert!(len >= MIN_TICKET_LEN);
    let mut buf = vec![0xcc; len];
    buf[..8].copy_from_slice(&issued_at.to_be_bytes());
    buf[8..11].copy_from_slice(&[0, 1, 0]);
    buf[11..13].copy_from_slice(&((len - 31) as u16).to_be_bytes());
    buf[13..17].copy_from_slice(&ttl_seconds.to_be_bytes());
    buf[len - 18] = 0;
    buf[len - 17] = 16;
    buf
}
