use std::sync::Arc;

use chrono::Utc;

use crate::dates::DateProvider;
use crate::error::Result;
use crate::models::{CachedHoroscope, Preferences, RenderableEntry, SlotMode, Style, ZodiacSign};
use crate::repository::{HoroscopeRepository, UserRepository};
use crate::storage::SharedStore;

/// Decides, per request, whether to serve the cache, fetch, or fall back.
///
/// The rules, in order: a cache entry dated today is served as-is; anything
/// else triggers a fetch whose result overwrites the cache; a failed fetch
/// degrades to whatever cache exists. Once any value is cached, callers
/// never see an error again, only possibly stale content.
pub struct SyncCoordinator {
    shared: Arc<SharedStore>,
    horoscopes: Arc<HoroscopeRepository>,
    users: Arc<UserRepository>,
    dates: DateProvider,
}

impl SyncCoordinator {
    pub fn new(
        shared: Arc<SharedStore>,
        horoscopes: Arc<HoroscopeRepository>,
        users: Arc<UserRepository>,
        dates: DateProvider,
    ) -> Self {
        Self {
            shared,
            horoscopes,
            users,
            dates,
        }
    }

    /// Today's content, serving the cache when fresh.
    pub async fn current_content(&self) -> Result<RenderableEntry> {
        let (sign, style) = self.require_preferences()?;
        let today = self.dates.today_string();

        if let Some(cached) = self.shared.cached_horoscope() {
            if cached.date == today {
                return Ok(RenderableEntry::from_cached(&cached, &today));
            }
        }

        self.fetch_and_cache(sign, style, &today).await
    }

    /// Fetch unconditionally, bypassing the freshness shortcut.
    pub async fn refresh(&self) -> Result<RenderableEntry> {
        let (sign, style) = self.require_preferences()?;
        let today = self.dates.today_string();
        self.fetch_and_cache(sign, style, &today).await
    }

    async fn fetch_and_cache(
        &self,
        sign: ZodiacSign,
        style: Style,
        today: &str,
    ) -> Result<RenderableEntry> {
        let mode = self.shared.preferred_slot_mode();

        match self.horoscopes.fetch_today(sign, style, mode).await {
            Ok(Some(horoscope)) => {
                let now = Utc::now();
                self.shared.cache_horoscope(&horoscope, now)?;
                let cached = CachedHoroscope::from_horoscope(&horoscope, now);
                Ok(RenderableEntry::from_cached(&cached, today))
            }
            Ok(None) => match self.shared.cached_horoscope() {
                Some(cached) => {
                    tracing::debug!("No horoscope published for {}, serving cache", today);
                    Ok(RenderableEntry::from_cached(&cached, today))
                }
                None => Ok(RenderableEntry::no_horoscope(sign, style)),
            },
            Err(e) => match self.shared.cached_horoscope() {
                // Never regress to an error while any cached value exists.
                Some(cached) => {
                    tracing::warn!("Fetch failed, serving cached horoscope: {}", e);
                    Ok(RenderableEntry::from_cached(&cached, today))
                }
                None => Err(e),
            },
        }
    }

    /// Commit a preference change locally, then sync remotely best-effort.
    /// The local write is synchronous and always wins: a remote failure is
    /// logged and swallowed, never surfaced.
    pub async fn update_preferences(
        &self,
        sign: ZodiacSign,
        style: Style,
        mode: SlotMode,
    ) -> Result<()> {
        self.shared.set_preferences(sign, style)?;
        self.shared.set_slot_mode(mode)?;
        self.shared.set_onboarding_complete(true)?;

        let preferences = Preferences::new(sign, style, mode);
        if let Err(e) = self.users.save_preferences(&preferences).await {
            tracing::warn!("Failed to sync preferences to remote store: {}", e);
        }
        Ok(())
    }

    /// Reconcile preferences across devices: a remote record overwrites
    /// local state; with no remote record, local preferences (if complete)
    /// are pushed up. All failures are swallowed; this is opportunistic.
    pub async fn sync_preferences(&self) {
        match self.users.fetch_preferences().await {
            Ok(Some(remote)) => {
                let applied = self
                    .shared
                    .set_preferences(remote.preferred_sign, remote.preferred_style)
                    .and_then(|_| self.shared.set_slot_mode(remote.preferred_slot_mode));
                if let Err(e) = applied {
                    tracing::warn!("Failed to apply remote preferences: {}", e);
                }
            }
            Ok(None) => {
                if let (Some(sign), Some(style)) =
                    (self.shared.preferred_sign(), self.shared.preferred_style())
                {
                    let preferences =
                        Preferences::new(sign, style, self.shared.preferred_slot_mode());
                    if let Err(e) = self.users.save_preferences(&preferences).await {
                        tracing::warn!("Failed to upload local preferences: {}", e);
                    }
                }
            }
            Err(e) => {
                tracing::debug!("Preference sync skipped: {}", e);
            }
        }
    }

    /// Back to factory state. Explicit user action only.
    pub fn reset(&self) -> Result<()> {
        self.shared.clear_all()
    }

    fn require_preferences(&self) -> Result<(ZodiacSign, Style)> {
        match (self.shared.preferred_sign(), self.shared.preferred_style()) {
            (Some(sign), Some(style)) => Ok((sign, style)),
            _ => Err(anyhow::anyhow!("preferences not set; choose a sign and style first").into()),
        }
    }
}
