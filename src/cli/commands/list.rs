//! List command - show stored tickets

use crate::cli::args::{ListArgs, OutputFormat};
use crate::cli::commands::format_expiry;
use crate::clock;
use crate::config::Config;
use crate::error::TicketStoreResult;
use crate::store::{TicketStore, TimeScale};
use crate::ticket::TicketRecord;
use console::style;
use serde::Serialize;
use std::path::Path;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config, ticket_path: &Path) -> TicketStoreResult<()> {
    let scale = config.store.time_unit_scale;
    let now = clock::now_in_units(scale);

    // Unpruned so --all can show expired tickets
    let store = match TicketStore::load_unpruned(ticket_path, scale) {
        Err(e) if e.is_not_found() => TicketStore::with_time_scale(scale),
        other => other?,
    };

    let filtered: Vec<&TicketRecord> = store
        .iter()
        .filter(|r| args.all || !r.is_expired(now))
        .collect();

    if filtered.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("No stored tickets"),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&filtered, now, scale),
        OutputFormat::Json => print_json(&filtered, now, scale)?,
        OutputFormat::Plain => print_plain(&filtered),
    }

    Ok(())
}

fn print_table(records: &[&TicketRecord], now: u64, scale: TimeScale) {
    println!(
        "{:<30} {:<10} {:>6} {:<14} {:<18} {:<8}",
        style("SNI").bold(),
        style("ALPN").bold(),
        style("SIZE").bold(),
        style("FINGERPRINT").bold(),
        style("EXPIRES").bold(),
        style("STATUS").bold()
    );
    println!("{}", "-".repeat(91));

    for record in records {
        let status = if record.is_expired(now) {
            style("expired").dim()
        } else {
            style("valid").green()
        };

        println!(
            "{:<30} {:<10} {:>6} {:<14} {:<18} {:<8}",
            record.sni_lossy(),
            record.alpn_lossy(),
            record.ticket().len(),
            record.fingerprint(),
            format_expiry(record, scale),
            status
        );
    }

    println!();
    println!("{} ticket(s)", records.len());
}

#[derive(Serialize)]
struct TicketJson {
    sni: String,
    alpn: String,
    ticket_len: usize,
    fingerprint: String,
    expires_at: u64,
    expires: Option<String>,
    expired: bool,
}

fn print_json(records: &[&TicketRecord], now: u64, scale: TimeScale) -> TicketStoreResult<()> {
    let json: Vec<TicketJson> = records
        .iter()
        .map(|r| TicketJson {
            sni: r.sni_lossy().into_owned(),
            alpn: r.alpn_lossy().into_owned(),
            ticket_len: r.ticket().len(),
            fingerprint: r.fingerprint(),
            expires_at: r.expires_at(),
            expires: clock::units_to_datetime(r.expires_at(), scale).map(|t| t.to_rfc3339()),
            expired: r.is_expired(now),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_plain(records: &[&TicketRecord]) {
    for record in records {
        println!("{} {}", record.sni_lossy(), record.alpn_lossy());
    }
}
