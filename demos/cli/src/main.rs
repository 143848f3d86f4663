use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use epoch_appwrite::parse_document_page_value;
use epoch_core::{EventRecord, TimelineSnapshot};

#[derive(Parser, Debug)]
#[command(
    name = "epoch-cli",
    about = "Inspect a scraped events file or a list-documents payload as a grouped timeline."
)]
struct Args {
    /// Path to an events JSON file (scraper output array or a raw
    /// list-documents response object).
    #[arg(short, long)]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("could not read file {:?}", args.input))?;

    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("{:?} is not valid JSON", args.input))?;

    let records: Vec<EventRecord> = if value.is_array() {
        serde_json::from_value(value).context("could not parse scraped events array")?
    } else {
        parse_document_page_value(&value)
            .context("could not parse list-documents payload")?
            .documents
            .into_iter()
            .map(|document| document.into_record())
            .collect()
    };

    let snapshot = TimelineSnapshot::new(records);

    println!(
        "Events: {}\nEras: {}",
        snapshot.event_count(),
        snapshot.era_count()
    );

    for group in snapshot.groups() {
        let first = group.events.first().map(|event| event.year);
        let last = group.events.last().map(|event| event.year);
        match (first, last) {
            (Some(first), Some(last)) => println!(
                "  {:>8}  {} events  ({first}-{last})",
                group.era.label(),
                group.events.len()
            ),
            _ => println!("  {:>8}  0 events", group.era.label()),
        }
    }

    Ok(())
}
