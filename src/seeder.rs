use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;
use tokio::sync::watch;

use crate::dates::DateProvider;
use crate::error::{AppError, Result};
use crate::generator;
use crate::models::{Horoscope, Slot, Style, ZodiacSign};
use crate::repository::HoroscopeRepository;
use crate::services::IdentityProvider;

/// Seeding state machine: Idle → Seeding → Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedProgress {
    Idle,
    /// `done` counts processed items (created + skipped + failed) so the
    /// bar always reaches `total`, even when some writes fail.
    Seeding { done: usize, total: usize },
    Complete {
        created: usize,
        skipped: usize,
        failed: usize,
    },
}

impl SeedProgress {
    pub fn display_text(&self) -> String {
        match self {
            SeedProgress::Idle => "Ready to seed".to_string(),
            SeedProgress::Seeding { done, total } => format!("Seeding... {done}/{total}"),
            SeedProgress::Complete {
                created,
                skipped,
                failed,
            } => format!("Done! Created: {created}, Skipped: {skipped}, Failed: {failed}"),
        }
    }
}

/// Terminal counts of one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Generates and writes the full date × sign × style cross product.
///
/// Only one run may be in flight; a second invocation while seeding is a
/// silent no-op, not a queue. Per-item failures are counted and logged but
/// never abort the run. Identity is the one precondition checked up front.
pub struct Seeder {
    horoscopes: Arc<HoroscopeRepository>,
    auth: Arc<dyn IdentityProvider>,
    dates: DateProvider,
    seeding: AtomicBool,
    progress: watch::Sender<SeedProgress>,
    log: Mutex<Vec<String>>,
}

impl Seeder {
    pub fn new(
        horoscopes: Arc<HoroscopeRepository>,
        auth: Arc<dyn IdentityProvider>,
        dates: DateProvider,
    ) -> Self {
        let (progress, _) = watch::channel(SeedProgress::Idle);
        Self {
            horoscopes,
            auth,
            dates,
            seeding: AtomicBool::new(false),
            progress,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Watch progress updates; one value per processed item.
    pub fn subscribe(&self) -> watch::Receiver<SeedProgress> {
        self.progress.subscribe()
    }

    pub fn is_seeding(&self) -> bool {
        self.seeding.load(Ordering::SeqCst)
    }

    /// Timestamped log of the most recent run.
    pub fn seed_log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Seed today only.
    pub async fn seed_today(&self, force_overwrite: bool) -> Result<Option<SeedSummary>> {
        self.seed(&[self.dates.today_string()], force_overwrite)
            .await
    }

    /// Seed today and the following `days - 1` days.
    pub async fn seed_next_days(
        &self,
        days: usize,
        force_overwrite: bool,
    ) -> Result<Option<SeedSummary>> {
        let dates: Vec<String> = (0..days as i64)
            .map(|offset| self.dates.day_string_offset(offset))
            .collect();
        self.seed(&dates, force_overwrite).await
    }

    /// Run the full cross product for the given dates. Returns `Ok(None)`
    /// when a run is already in flight.
    pub async fn seed(
        &self,
        dates: &[String],
        force_overwrite: bool,
    ) -> Result<Option<SeedSummary>> {
        if self
            .seeding
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Seed requested while a run is in flight; ignoring");
            return Ok(None);
        }

        let result = self.run(dates, force_overwrite).await;
        self.seeding.store(false, Ordering::SeqCst);
        result.map(Some)
    }

    async fn run(&self, dates: &[String], force_overwrite: bool) -> Result<SeedSummary> {
        self.log.lock().unwrap().clear();
        self.log(format!("Starting seed for {} date(s)", dates.len()));
        self.log(format!("Force overwrite: {force_overwrite}"));

        // Identity is required before anything is written.
        if let Err(e) = self.auth.ensure_identity().await {
            self.log(format!("Auth failed: {e}"));
            self.progress.send_replace(SeedProgress::Idle);
            return Err(e);
        }
        self.log("Authenticated".to_string());

        let total = dates.len() * ZodiacSign::ALL.len() * Style::ALL.len();
        let mut created = 0;
        let mut skipped = 0;
        let mut failed = 0;
        self.progress
            .send_replace(SeedProgress::Seeding { done: 0, total });

        for date in dates {
            self.log(format!("Processing date: {date}"));

            for sign in ZodiacSign::ALL {
                for style in Style::ALL {
                    let slot = Slot::Daily;
                    let message = generator::generate_message(date, sign, style);
                    let horoscope = Horoscope::new(date.clone(), sign, style, slot, message);

                    match self.horoscopes.save(&horoscope, force_overwrite).await {
                        Ok(()) => created += 1,
                        Err(AppError::AlreadyExists) => skipped += 1,
                        Err(e) => {
                            failed += 1;
                            self.log(format!(
                                "Failed: {}/{} - {}",
                                sign.display_name(),
                                style.display_name(),
                                e
                            ));
                        }
                    }

                    self.progress.send_replace(SeedProgress::Seeding {
                        done: created + skipped + failed,
                        total,
                    });
                }
            }
        }

        let summary = SeedSummary {
            created,
            skipped,
            failed,
        };
        self.log(format!(
            "Seed complete! Created: {created}, Skipped: {skipped}, Failed: {failed}"
        ));
        self.progress.send_replace(SeedProgress::Complete {
            created,
            skipped,
            failed,
        });
        Ok(summary)
    }

    fn log(&self, message: String) {
        let line = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        tracing::debug!("{}", message);
        self.log.lock().unwrap().push(line);
    }
}
