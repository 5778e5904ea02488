//! Prune command - rewrite the ticket file without expired tickets

use crate::clock;
use crate::config::Config;
use crate::error::TicketStoreResult;
use crate::store::TicketStore;
use console::style;
use std::path::Path;
use tracing::info;

/// Execute the prune command
pub async fn execute(config: &Config, ticket_path: &Path) -> TicketStoreResult<()> {
    if !ticket_path.exists() {
        println!("No ticket file at {}", ticket_path.display());
        return Ok(());
    }

    let scale = config.store.time_unit_scale;
    let now = clock::now_in_units(scale);

    let mut store = TicketStore::load_unpruned(ticket_path, scale)?;
    let removed = store.remove_expired(now);
    store.save_with_mode(now, ticket_path, config.store.file_mode)?;

    info!("Pruned {} from {}", removed, ticket_path.display());
    println!(
        "{} Removed {} expired ticket(s), {} remaining",
        style("✓").green(),
        removed,
        store.len()
    );

    Ok(())
}
