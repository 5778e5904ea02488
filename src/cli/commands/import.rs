//! Import command - store a ticket blob captured from a handshake

use crate::cli::args::ImportArgs;
use crate::clock;
use crate::config::Config;
use crate::error::{TicketStoreError, TicketStoreResult};
use crate::store::TicketStore;
use console::style;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Execute the import command
pub async fn execute(
    args: ImportArgs,
    config: &Config,
    ticket_path: &Path,
) -> TicketStoreResult<()> {
    let blob = fs::read(&args.blob).await.map_err(|e| {
        TicketStoreError::io(format!("reading ticket blob {}", args.blob.display()), e)
    })?;

    let scale = config.store.time_unit_scale;
    let now = clock::now_in_units(scale);

    let mut store = TicketStore::load_or_empty(ticket_path, now, scale)?;
    let expires_at = store.store(now, args.sni.as_bytes(), args.alpn.as_bytes(), &blob)?;
    store.save_with_mode(now, ticket_path, config.store.file_mode)?;

    info!(
        "Imported {} byte ticket into {}",
        blob.len(),
        ticket_path.display()
    );

    let expires = clock::units_to_datetime(expires_at, scale)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!(
        "{} Stored ticket for {}/{} (expires {})",
        style("✓").green(),
        style(&args.sni).cyan(),
        args.alpn,
        expires
    );

    Ok(())
}
