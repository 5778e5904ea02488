//! Session resumption ticket store
//!
//! Keeps tickets in memory, hands them back on reconnection, and carries
//! them across restarts through a flat binary file.
//!
//! # Lifecycle
//!
//! | Step | Call |
//! |------|------|
//! | Ticket received | [`TicketStore::store`] |
//! | New connection | [`TicketStore::lookup`] |
//! | Shutdown | [`TicketStore::save`] |
//! | Startup | [`TicketStore::load`] (expired tickets dropped) |
//! | Teardown | [`TicketStore::free`] or drop |

pub mod cache;
pub mod persist;
pub mod shared;

pub use cache::{TicketStore, TimeScale};
pub use persist::DEFAULT_FILE_MODE;
pub use shared::SharedTicketStore;
