//! CLI command implementations

pub mod config;
pub mod import;
pub mod list;
pub mod lookup;
pub mod prune;

pub use config::execute as config;
pub use import::execute as import;
pub use list::execute as list;
pub use lookup::execute as lookup;
pub use prune::execute as prune;

use crate::clock;
use crate::store::TimeScale;
use crate::ticket::TicketRecord;

/// Expiration time for display
pub(crate) fn format_expiry(record: &TicketRecord, scale: TimeScale) -> String {
    match clock::units_to_datetime(record.expires_at(), scale) {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => "never".to_string(),
    }
}
