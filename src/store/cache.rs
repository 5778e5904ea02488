//! In-memory ticket cache
//!
//! Records are kept newest first. Lookup is a linear scan, which is fine for
//! the tens to low hundreds of tickets a client accumulates.

use crate::error::{TicketStoreError, TicketStoreResult};
use crate::ticket::header::MAX_TICKET_LEN;
use crate::ticket::{TicketHeader, TicketRecord};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Number of store time units per second
///
/// Timestamps handed to the store are opaque counters chosen by the host.
/// The scale converts a ticket's lifetime in seconds into that unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TimeScale(u64);

impl TimeScale {
    /// Microsecond clock
    pub const MICROS: Self = Self(1_000_000);
    /// Millisecond clock
    pub const MILLIS: Self = Self(1_000);
    /// Second clock
    pub const SECONDS: Self = Self(1);

    /// Create a scale, rejecting zero
    pub fn new(units_per_second: u64) -> Option<Self> {
        (units_per_second > 0).then_some(Self(units_per_second))
    }

    pub fn units_per_second(self) -> u64 {
        self.0
    }

    /// Convert a lifetime to store units, saturating on overflow
    pub fn seconds_to_units(self, seconds: u32) -> u64 {
        u64::from(seconds).saturating_mul(self.0)
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::MICROS
    }
}

impl TryFrom<u64> for TimeScale {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "time unit scale must be greater than zero".to_string())
    }
}

impl From<TimeScale> for u64 {
    fn from(scale: TimeScale) -> Self {
        scale.0
    }
}

/// Cache of resumption tickets keyed by (SNI, ALPN)
///
/// The store owns every record. Dropping it, or calling [`TicketStore::free`],
/// releases all of them. There is no internal locking; see
/// [`SharedTicketStore`](crate::store::SharedTicketStore) for a shared handle.
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    records: VecDeque<TicketRecord>,
    scale: TimeScale,
}

impl TicketStore {
    /// Create an empty store on a microsecond clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom clock unit
    pub fn with_time_scale(scale: TimeScale) -> Self {
        Self {
            records: VecDeque::new(),
            scale,
        }
    }

    pub(crate) fn from_records(records: VecDeque<TicketRecord>, scale: TimeScale) -> Self {
        Self { records, scale }
    }

    pub fn time_scale(&self) -> TimeScale {
        self.scale
    }

    /// Store a freshly received ticket
    ///
    /// The ticket expires `ttl * scale` units after `current_time`. The new
    /// record goes in front of any older ticket for the same key. Keys and
    /// payload are copied. On error the store is left unchanged.
    ///
    /// Returns the absolute expiration time of the stored record.
    pub fn store(
        &mut self,
        current_time: u64,
        sni: &[u8],
        alpn: &[u8],
        ticket: &[u8],
    ) -> TicketStoreResult<u64> {
        check_key("SNI", sni)?;
        check_key("ALPN", alpn)?;
        if ticket.len() > MAX_TICKET_LEN {
            return Err(TicketStoreError::MalformedTicket {
                len: ticket.len(),
                reason: "longer than 65535 bytes",
            });
        }

        let header = TicketHeader::parse(ticket)?;
        let expires_at = current_time.saturating_add(self.scale.seconds_to_units(header.ttl_seconds));

        let record = TicketRecord {
            expires_at,
            sni: copy_bytes(sni)?,
            alpn: copy_bytes(alpn)?,
            ticket: copy_bytes(ticket)?,
        };

        self.records
            .try_reserve(1)
            .map_err(|_| TicketStoreError::AllocationFailure {
                bytes: std::mem::size_of::<TicketRecord>(),
            })?;

        debug!(
            "Stored ticket for {}/{} ({} bytes, ttl {}s, declared {})",
            record.sni_lossy(),
            record.alpn_lossy(),
            ticket.len(),
            header.ttl_seconds,
            header.declared_length
        );
        self.records.push_front(record);

        Ok(expires_at)
    }

    /// Find the newest usable ticket for a key
    ///
    /// Keys match byte for byte. Expired records are skipped but not evicted.
    pub fn lookup(&self, current_time: u64, sni: &[u8], alpn: &[u8]) -> Option<&[u8]> {
        self.lookup_record(current_time, sni, alpn)
            .map(TicketRecord::ticket)
    }

    /// Like [`TicketStore::lookup`], returning the whole record
    pub fn lookup_record(
        &self,
        current_time: u64,
        sni: &[u8],
        alpn: &[u8],
    ) -> Option<&TicketRecord> {
        let found = self
            .records
            .iter()
            .find(|r| r.matches(sni, alpn) && !r.is_expired(current_time));

        match found {
            Some(record) => debug!(
                "Ticket hit for {}/{}",
                record.sni_lossy(),
                record.alpn_lossy()
            ),
            None => debug!(
                "No ticket for {}/{}",
                String::from_utf8_lossy(sni),
                String::from_utf8_lossy(alpn)
            ),
        }

        found
    }

    /// Drop records that are expired at `current_time`
    ///
    /// Returns the number of records removed.
    pub fn remove_expired(&mut self, current_time: u64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.is_expired(current_time));
        before - self.records.len()
    }

    /// Release every record. The store stays usable and empty.
    pub fn free(&mut self) {
        if !self.records.is_empty() {
            debug!("Freeing {} tickets", self.records.len());
        }
        self.records = VecDeque::new();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &TicketRecord> + '_ {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a TicketStore {
    type Item = &'a TicketRecord;
    type IntoIter = std::collections::vec_deque::Iter<'a, TicketRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn check_key(field: &'static str, key: &[u8]) -> TicketStoreResult<()> {
    if key.len() > u16::MAX as usize {
        return Err(TicketStoreError::KeyTooLong {
            field,
            len: key.len(),
        });
    }
    Ok(())
}

fn copy_bytes(src: &[u8]) -> TicketStoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| TicketStoreError::AllocationFailure { bytes: src.len() })?;
    buf.extend_from_slice(src);
    Ok(buf)
}
