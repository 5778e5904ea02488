//! Lookup command - find the ticket a new connection would resume with

use crate::cli::args::LookupArgs;
use crate::cli::commands::format_expiry;
use crate::clock;
use crate::config::Config;
use crate::error::{TicketStoreError, TicketStoreResult};
use crate::store::TicketStore;
use console::style;
use std::path::Path;

/// Execute the lookup command
pub async fn execute(
    args: LookupArgs,
    config: &Config,
    ticket_path: &Path,
) -> TicketStoreResult<()> {
    let scale = config.store.time_unit_scale;
    let now = clock::now_in_units(scale);
    let store = TicketStore::load_or_empty(ticket_path, now, scale)?;

    let record = store
        .lookup_record(now, args.sni.as_bytes(), args.alpn.as_bytes())
        .ok_or_else(|| {
            TicketStoreError::User(format!("No ticket found for {}/{}", args.sni, args.alpn))
        })?;

    if args.hex {
        println!("{}", hex::encode(record.ticket()));
        return Ok(());
    }

    println!(
        "{} {}/{}: {} bytes, fingerprint {}, expires {}",
        style("✓").green(),
        style(&args.sni).cyan(),
        args.alpn,
        record.ticket().len(),
        record.fingerprint(),
        format_expiry(record, scale)
    );

    Ok(())
}
