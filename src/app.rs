use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;

use crate::config::Config;
use crate::dates::DateProvider;
use crate::error::Result;
use crate::models::{EntryState, RenderableEntry, SlotMode, Style, ZodiacSign, STALE_NOTICE};
use crate::repository::{HoroscopeRepository, UserRepository};
use crate::seeder::{SeedProgress, Seeder};
use crate::services::{
    IdentityProvider, RestIdentityProvider, UnconfiguredIdentityProvider,
};
use crate::storage::SharedStore;
use crate::store::{DocumentStore, RestDocumentStore, UnconfiguredStore};
use crate::sync::SyncCoordinator;
use crate::widget::WidgetSnapshotReader;

/// Wires the engine together for the command-line app: shared store,
/// remote repositories, sync coordinator, and seeder, all hanging off one
/// explicitly constructed context instead of hidden globals.
pub struct App {
    pub store: Arc<SharedStore>,
    pub sync: SyncCoordinator,
    pub seeder: Arc<Seeder>,
    dates: DateProvider,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let dates = DateProvider::new();
        let store = Arc::new(SharedStore::open(&config.shared_path)?);

        let (documents, auth): (Arc<dyn DocumentStore>, Arc<dyn IdentityProvider>) =
            match (&config.api_base_url, &config.api_key) {
                (Some(base_url), Some(api_key)) => (
                    Arc::new(RestDocumentStore::new(base_url, api_key.clone())?),
                    Arc::new(RestIdentityProvider::new(
                        base_url,
                        api_key.clone(),
                        PathBuf::from(&config.identity_path),
                    )),
                ),
                _ => {
                    tracing::warn!("Remote store not configured; running from local cache only");
                    (Arc::new(UnconfiguredStore), Arc::new(UnconfiguredIdentityProvider))
                }
            };

        let horoscopes = Arc::new(HoroscopeRepository::new(documents.clone(), dates.clone()));
        let users = Arc::new(UserRepository::new(documents, auth.clone()));
        let sync = SyncCoordinator::new(store.clone(), horoscopes.clone(), users, dates.clone());
        let seeder = Arc::new(Seeder::new(horoscopes, auth, dates.clone()));

        Ok(Self {
            store,
            sync,
            seeder,
            dates,
        })
    }

    /// Default action: reconcile preferences, then show today's content.
    pub async fn show_current(&self) -> Result<()> {
        self.sync.sync_preferences().await;
        let entry = self.sync.current_content().await?;
        self.print_entry(&entry);
        Ok(())
    }

    pub async fn refresh(&self) -> Result<()> {
        let entry = self.sync.refresh().await?;
        self.print_entry(&entry);
        Ok(())
    }

    /// Seed `days` consecutive days starting today, echoing progress.
    pub async fn run_seed(&self, days: usize, force_overwrite: bool) -> Result<()> {
        let mut rx = self.seeder.subscribe();
        let printer = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let progress = *rx.borrow_and_update();
                match progress {
                    SeedProgress::Seeding { done, total } => {
                        eprint!("\rSeeding... {done}/{total}");
                    }
                    SeedProgress::Complete { .. } => break,
                    SeedProgress::Idle => {}
                }
            }
        });

        let result = self.seeder.seed_next_days(days, force_overwrite).await;
        printer.abort();
        let _ = printer.await;
        eprintln!();

        match result? {
            Some(summary) => {
                println!(
                    "Seed complete. Created: {}, skipped: {}, failed: {}",
                    summary.created, summary.skipped, summary.failed
                );
                for line in self.seeder.seed_log() {
                    tracing::debug!("{}", line);
                }
            }
            None => println!("A seeding run is already in progress."),
        }
        Ok(())
    }

    pub async fn set_preferences(
        &self,
        sign: ZodiacSign,
        style: Style,
        mode: SlotMode,
    ) -> Result<()> {
        self.sync.update_preferences(sign, style, mode).await?;
        println!(
            "Preferences saved: {} {} / {} / {}",
            sign.emoji(),
            sign.display_name(),
            style.display_name(),
            mode.display_name()
        );
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.sync.reset()?;
        println!("All local data cleared.");
        Ok(())
    }

    /// Print what the widget process would render right now.
    pub fn status(&self) -> Result<()> {
        let reader = WidgetSnapshotReader::new(
            SharedStore::open(self.store.path())?,
            self.dates.clone(),
        );
        let entry = reader.snapshot();
        self.print_entry(&entry);
        println!(
            "Next widget refresh: {}",
            reader.next_refresh(Local::now()).format("%Y-%m-%d %H:%M")
        );
        Ok(())
    }

    fn print_entry(&self, entry: &RenderableEntry) {
        println!("{}", entry.header_text());
        println!("{}", self.dates.format_date(self.dates.today()));
        if entry.state == EntryState::Cached {
            println!("{STALE_NOTICE}");
        }
        println!();
        println!("{}", entry.message);

        if matches!(entry.state, EntryState::Normal | EntryState::Cached) {
            let rating = entry.energy_rating() as usize;
            println!();
            println!(
                "Energy: {}{}",
                "\u{2605}".repeat(rating),
                "\u{2606}".repeat(5 - rating)
            );
        }
        if let Some(updated) = entry.last_updated {
            println!("Updated {}", self.dates.format_time(updated));
        }
    }
}
