use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{AppError, Result};
use crate::models::{CachedHoroscope, Horoscope, SlotMode, Style, ZodiacSign};

/// On-disk record shared between the app and the widget process.
/// Field names are the persisted format; renaming breaks existing installs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SharedState {
    preferred_sign: Option<ZodiacSign>,
    preferred_style: Option<Style>,
    preferred_slot_mode: Option<SlotMode>,
    cached_horoscope: Option<CachedHoroscope>,
    has_completed_onboarding: bool,
    last_fetch_date: Option<String>,
}

/// The shared local store: preferences plus the single cached horoscope,
/// held in one JSON file visible to both processes.
///
/// Writes go through an in-process mutex and a temp-file + atomic rename,
/// so the widget always reads either the previous or the new state, never
/// a torn one. Cross-process the store is eventually consistent: the
/// widget may briefly observe the previous state, which is accepted.
pub struct SharedStore {
    path: PathBuf,
    state: Mutex<SharedState>,
}

impl SharedStore {
    /// Open the store at `path`, creating parent directories. A missing
    /// file is an empty store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let state = Self::read_state(&path)?;
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    fn read_state(path: &Path) -> Result<SharedState> {
        if !path.exists() {
            return Ok(SharedState::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, picking up writes from the other process.
    pub fn reload(&self) -> Result<()> {
        let fresh = Self::read_state(&self.path)?;
        *self.state.lock().unwrap() = fresh;
        Ok(())
    }

    // Preferences

    pub fn preferred_sign(&self) -> Option<ZodiacSign> {
        self.state.lock().unwrap().preferred_sign
    }

    pub fn preferred_style(&self) -> Option<Style> {
        self.state.lock().unwrap().preferred_style
    }

    /// Delivery mode, defaulting to once-daily when never set. The default
    /// is resolved here and nowhere else.
    pub fn preferred_slot_mode(&self) -> SlotMode {
        self.state
            .lock()
            .unwrap()
            .preferred_slot_mode
            .unwrap_or_default()
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.state.lock().unwrap().has_completed_onboarding
    }

    pub fn last_fetch_date(&self) -> Option<String> {
        self.state.lock().unwrap().last_fetch_date.clone()
    }

    /// Set sign and style. A cached horoscope for a different sign or
    /// style is cleared in the same write: stale mismatched content must
    /// never be shown under new preferences, regardless of its date.
    pub fn set_preferences(&self, sign: ZodiacSign, style: Style) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.preferred_sign = Some(sign);
        state.preferred_style = Some(style);
        if let Some(cached) = &state.cached_horoscope {
            if cached.sign != sign || cached.style != style {
                state.cached_horoscope = None;
            }
        }
        self.persist(&state)
    }

    pub fn set_slot_mode(&self, mode: SlotMode) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.preferred_slot_mode = Some(mode);
        self.persist(&state)
    }

    pub fn set_onboarding_complete(&self, complete: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.has_completed_onboarding = complete;
        self.persist(&state)
    }

    // Cached horoscope

    pub fn cached_horoscope(&self) -> Option<CachedHoroscope> {
        self.state.lock().unwrap().cached_horoscope.clone()
    }

    /// Overwrite the single cache slot and record the fetch day.
    pub fn cache_horoscope(&self, horoscope: &Horoscope, now: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.cached_horoscope = Some(CachedHoroscope::from_horoscope(horoscope, now));
        state.last_fetch_date = Some(horoscope.date.clone());
        self.persist(&state)
    }

    /// Freshness predicate: the cache is valid only for the day it was
    /// fetched for. No other TTL exists.
    pub fn is_cache_valid_for(&self, today: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .cached_horoscope
            .as_ref()
            .is_some_and(|cached| cached.date == today)
    }

    /// Reset to factory state (explicit user action only).
    pub fn clear_all(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state = SharedState::default();
        self.persist(&state)
    }

    fn persist(&self, state: &SharedState) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let content = serde_json::to_string_pretty(state)?;

        // Write-then-rename keeps the file whole for the widget process.
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&self.path)
            .map_err(|e| AppError::Storage(format!("failed to replace shared store: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn open_store(dir: &tempfile::TempDir) -> SharedStore {
        SharedStore::open(dir.path().join("shared.json")).unwrap()
    }

    fn horoscope(sign: ZodiacSign, style: Style, date: &str) -> Horoscope {
        Horoscope::new(date, sign, style, Slot::Daily, "message text")
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        assert!(store.preferred_sign().is_none());
        assert!(store.cached_horoscope().is_none());
        assert_eq!(store.preferred_slot_mode(), SlotMode::Daily);
        assert!(!store.has_completed_onboarding());
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.json");

        let store = SharedStore::open(&path).unwrap();
        store
            .set_preferences(ZodiacSign::Leo, Style::Plain)
            .unwrap();
        store.set_slot_mode(SlotMode::Triple).unwrap();
        store
            .cache_horoscope(
                &horoscope(ZodiacSign::Leo, Style::Plain, "2026-08-06"),
                Utc::now(),
            )
            .unwrap();

        let reopened = SharedStore::open(&path).unwrap();
        assert_eq!(reopened.preferred_sign(), Some(ZodiacSign::Leo));
        assert_eq!(reopened.preferred_slot_mode(), SlotMode::Triple);
        assert_eq!(reopened.last_fetch_date().as_deref(), Some("2026-08-06"));
        assert!(reopened.is_cache_valid_for("2026-08-06"));
        assert!(!reopened.is_cache_valid_for("2026-08-07"));
    }

    #[test]
    fn cache_slot_holds_at_most_one_item() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .cache_horoscope(
                &horoscope(ZodiacSign::Leo, Style::Plain, "2026-08-05"),
                Utc::now(),
            )
            .unwrap();
        store
            .cache_horoscope(
                &horoscope(ZodiacSign::Leo, Style::Plain, "2026-08-06"),
                Utc::now(),
            )
            .unwrap();

        let cached = store.cached_horoscope().unwrap();
        assert_eq!(cached.date, "2026-08-06");
    }

    #[test]
    fn preference_change_clears_mismatched_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .set_preferences(ZodiacSign::Leo, Style::Plain)
            .unwrap();
        store
            .cache_horoscope(
                &horoscope(ZodiacSign::Leo, Style::Plain, "2026-08-06"),
                Utc::now(),
            )
            .unwrap();

        store
            .set_preferences(ZodiacSign::Virgo, Style::Plain)
            .unwrap();
        assert!(store.cached_horoscope().is_none());
    }

    #[test]
    fn same_preferences_keep_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .set_preferences(ZodiacSign::Leo, Style::Plain)
            .unwrap();
        store
            .cache_horoscope(
                &horoscope(ZodiacSign::Leo, Style::Plain, "2026-08-06"),
                Utc::now(),
            )
            .unwrap();

        store
            .set_preferences(ZodiacSign::Leo, Style::Plain)
            .unwrap();
        assert!(store.cached_horoscope().is_some());
    }

    #[test]
    fn clear_all_resets_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .set_preferences(ZodiacSign::Leo, Style::Plain)
            .unwrap();
        store.set_onboarding_complete(true).unwrap();
        store
            .cache_horoscope(
                &horoscope(ZodiacSign::Leo, Style::Plain, "2026-08-06"),
                Utc::now(),
            )
            .unwrap();

        store.clear_all().unwrap();
        assert!(store.preferred_sign().is_none());
        assert!(store.cached_horoscope().is_none());
        assert!(!store.has_completed_onboarding());
        assert!(store.last_fetch_date().is_none());
    }
}
