//! ticket-store - TLS/QUIC session resumption ticket cache
//!
//! Keeps resumption tickets keyed by server name and application protocol,
//! expires them by lifetime, and persists them to a flat binary file so a
//! client can resume sessions across restarts.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod ticket;

pub use error::{TicketStoreError, TicketStoreResult};
pub use store::{SharedTicketStore, TicketStore, TimeScale};
pub use ticket::{TicketHeader, TicketRecord};
