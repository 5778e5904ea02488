//! Saving and reloading the ticket cache
//!
//! The file is the plain concatenation of encoded records, newest first.
//! Expired records are written as-is and dropped on the next load.

use crate::error::{TicketStoreError, TicketStoreResult};
use crate::store::cache::{TicketStore, TimeScale};
use crate::ticket::{codec, RecordDecoder};
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Permissions applied to saved ticket files
pub const DEFAULT_FILE_MODE: u32 = 0o600;

impl TicketStore {
    /// Encode every record, newest first
    pub fn encode(&self) -> Vec<u8> {
        codec::encode_all(self)
    }

    /// Rebuild a store from encoded records, dropping those expired at
    /// `retrieve_time`
    ///
    /// File order is preserved. A truncated buffer fails the whole call.
    pub fn decode(bytes: &[u8], retrieve_time: u64, scale: TimeScale) -> TicketStoreResult<Self> {
        let mut records = VecDeque::new();
        let mut pruned = 0usize;

        for record in RecordDecoder::new(bytes) {
            let record = record?;
            if record.is_expired(retrieve_time) {
                pruned += 1;
                continue;
            }
            records.push_back(record);
        }

        debug!(
            "Decoded {} tickets, pruned {} expired",
            records.len(),
            pruned
        );
        Ok(Self::from_records(records, scale))
    }

    /// Write the cache to `path`
    ///
    /// Nothing is checked against `current_time`; stale records are kept.
    pub fn save(&self, current_time: u64, path: &Path) -> TicketStoreResult<()> {
        self.save_with_mode(current_time, path, DEFAULT_FILE_MODE)
    }

    /// Write the cache to `path` with explicit unix permissions
    pub fn save_with_mode(
        &self,
        current_time: u64,
        path: &Path,
        mode: u32,
    ) -> TicketStoreResult<()> {
        let bytes = self.encode();
        write_ticket_file(path, &bytes, mode)?;

        debug!(
            "Saved {} tickets ({} bytes) to {} at {}",
            self.len(),
            bytes.len(),
            path.display(),
            current_time
        );
        Ok(())
    }

    /// Load a cache saved by [`TicketStore::save`] on a microsecond clock
    pub fn load(path: &Path, retrieve_time: u64) -> TicketStoreResult<Self> {
        Self::load_with_scale(path, retrieve_time, TimeScale::default())
    }

    /// Load a cache, dropping records expired at `retrieve_time`
    ///
    /// A missing file is an error here; see [`TicketStore::load_or_empty`].
    pub fn load_with_scale(
        path: &Path,
        retrieve_time: u64,
        scale: TimeScale,
    ) -> TicketStoreResult<Self> {
        let bytes = read_ticket_file(path)?;
        Self::decode(&bytes, retrieve_time, scale)
    }

    /// Load a cache, treating a missing file as an empty cache
    pub fn load_or_empty(
        path: &Path,
        retrieve_time: u64,
        scale: TimeScale,
    ) -> TicketStoreResult<Self> {
        match Self::load_with_scale(path, retrieve_time, scale) {
            Err(e) if e.is_not_found() => {
                debug!("No ticket file at {}, starting empty", path.display());
                Ok(Self::with_time_scale(scale))
            }
            other => other,
        }
    }

    /// Load every record in the file, expired ones included
    ///
    /// For inspection tools. A missing file is an error.
    pub fn load_unpruned(path: &Path, scale: TimeScale) -> TicketStoreResult<Self> {
        let bytes = read_ticket_file(path)?;
        let records = codec::decode_all(&bytes)?;
        Ok(Self::from_records(records.into(), scale))
    }
}

fn read_ticket_file(path: &Path) -> TicketStoreResult<Vec<u8>> {
    fs::read(path)
        .map_err(|e| TicketStoreError::io(format!("reading ticket file {}", path.display()), e))
}

/// Write a ticket file, creating parent directories
///
/// On unix a new file is created with `mode` already set, so the tickets are
/// never readable by others. An existing file is narrowed to `mode` too.
pub(crate) fn write_ticket_file(path: &Path, bytes: &[u8], mode: u32) -> TicketStoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TicketStoreError::io(format!("creating directory {}", parent.display()), e)
        })?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let context = || format!("writing ticket file {}", path.display());
    let mut file = options
        .open(path)
        .map_err(|e| TicketStoreError::io(context(), e))?;
    restrict_permissions(path, mode)?;
    file.write_all(bytes)
        .map_err(|e| TicketStoreError::io(context(), e))?;
    file.sync_all()
        .map_err(|e| TicketStoreError::io(context(), e))?;

    Ok(())
}

fn restrict_permissions(path: &Path, mode: u32) -> TicketStoreResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(mode);
        std::fs::set_permissions(path, perms)
            .map_err(|e| TicketStoreError::io("setting ticket file permissions", e))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);

    Ok(())
}
