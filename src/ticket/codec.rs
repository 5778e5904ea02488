//! Binary encoding of ticket records
//!
//! Each record is written as, big-endian:
//!
//! | Field | Size |
//! |-------|------|
//! | expires_at | 8 |
//! | sni_length, sni | 2 + n |
//! | alpn_length, alpn | 2 + n |
//! | ticket_length, ticket | 2 + n |
//!
//! Records are concatenated with no header, count or delimiter. The end of
//! the input is the only terminator, and it must fall on a record boundary.

use crate::error::{TicketStoreError, TicketStoreResult};
use crate::ticket::TicketRecord;

/// Fixed bytes per record: timestamp plus three length prefixes
pub const RECORD_OVERHEAD: usize = 8 + 2 + 2 + 2;

/// Size of one record once encoded
pub fn encoded_len(record: &TicketRecord) -> usize {
    RECORD_OVERHEAD + record.sni.len() + record.alpn.len() + record.ticket.len()
}

/// Append one encoded record to `out`
pub fn encode_record(record: &TicketRecord, out: &mut Vec<u8>) {
    out.reserve(encoded_len(record));
    out.extend_from_slice(&record.expires_at.to_be_bytes());
    put_field(out, &record.sni);
    put_field(out, &record.alpn);
    put_field(out, &record.ticket);
}

fn put_field(out: &mut Vec<u8>, field: &[u8]) {
    debug_assert!(field.len() <= u16::MAX as usize);
    out.extend_from_slice(&(field.len() as u16).to_be_bytes());
    out.extend_from_slice(field);
}

/// Encode records in iteration order
pub fn encode_all<'a, I>(records: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a TicketRecord>,
{
    let mut out = Vec::new();
    for record in records {
        encode_record(record, &mut out);
    }
    out
}

/// Decode every record in `input`, in file order
///
/// Fails as a whole if the input ends inside a record.
pub fn decode_all(input: &[u8]) -> TicketStoreResult<Vec<TicketRecord>> {
    RecordDecoder::new(input).collect()
}

/// Streaming decoder over a buffer of concatenated records
///
/// Yields one record at a time so callers can drop records as they go.
/// After the first error the decoder is exhausted.
pub struct RecordDecoder<'a> {
    input: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> RecordDecoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            failed: false,
        }
    }

    /// Bytes consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take(&mut self, needed: usize) -> TicketStoreResult<&'a [u8]> {
        let available = self.input.len() - self.offset;
        if available < needed {
            return Err(TicketStoreError::TruncatedRecord {
                offset: self.offset,
                needed,
                available,
            });
        }
        let bytes = &self.input[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(bytes)
    }

    fn take_field(&mut self) -> TicketStoreResult<Vec<u8>> {
        let len = self.take(2)?;
        let len = u16::from_be_bytes([len[0], len[1]]) as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn decode_record(&mut self) -> TicketStoreResult<TicketRecord> {
        let mut expires_at = [0u8; 8];
        expires_at.copy_from_slice(self.take(8)?);

        Ok(TicketRecord {
            expires_at: u64::from_be_bytes(expires_at),
            sni: self.take_field()?,
            alpn: self.take_field()?,
            ticket: self.take_field()?,
        })
    }
}

impl Iterator for RecordDecoder<'_> {
    type Item = TicketStoreResult<TicketRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset == self.input.len() {
            return None;
        }

        let result = self.decode_record();
        self.failed = result.is_err();
        Some(result)
    }
}
