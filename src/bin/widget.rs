//! The satellite widget process. Reads the shared store on its own
//! schedule and renders a snapshot; never constructs a network client.

use chrono::Local;

use astroline::config::Config;
use astroline::dates::DateProvider;
use astroline::error::Result;
use astroline::models::{EntryState, STALE_NOTICE};
use astroline::storage::SharedStore;
use astroline::widget::WidgetSnapshotReader;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let dates = DateProvider::new();
    let reader = WidgetSnapshotReader::new(SharedStore::open(&config.shared_path)?, dates);

    let entry = reader.snapshot();
    println!("{}", entry.header_text());
    if entry.state == EntryState::Cached {
        println!("{STALE_NOTICE}");
    }
    println!("{}", entry.message);

    if matches!(entry.state, EntryState::Normal | EntryState::Cached) {
        let rating = entry.energy_rating() as usize;
        println!(
            "Energy: {}{}",
            "\u{2605}".repeat(rating),
            "\u{2606}".repeat(5 - rating)
        );
    }

    println!(
        "Next refresh: {}",
        reader.next_refresh(Local::now()).format("%Y-%m-%d %H:%M")
    );
    Ok(())
}
