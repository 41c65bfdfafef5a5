use chrono::{DateTime, Utc};

use crate::generator;
use crate::models::{CachedHoroscope, Style, ZodiacSign};

/// Shown when preferences are set but no message is available yet.
pub const NOT_READY_MESSAGE: &str = "Your horoscope isn't ready yet. Check back later.";
/// Shown by the widget before onboarding completes.
pub const SETUP_MESSAGE: &str = "Open the app to set up";
/// Label attached when serving a previous day's cache.
pub const STALE_NOTICE: &str = "Last saved horoscope (offline)";

/// Consumer-facing states, in priority order. `NoPreferences` always wins
/// regardless of cache contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Cache exists and is for today.
    Normal,
    /// Cache exists but is for an earlier day; served rather than erroring.
    Cached,
    /// Preferences set, nothing cached.
    NoHoroscope,
    /// Sign or style not chosen yet.
    NoPreferences,
}

/// Rendering-ready snapshot served to the app screen and the widget.
/// Carries everything a renderer needs; never a raw error.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableEntry {
    pub sign: Option<ZodiacSign>,
    pub style: Option<Style>,
    pub message: String,
    pub horoscope_date: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub state: EntryState,
}

impl RenderableEntry {
    /// Entry backed by the shared cache; `Normal` when the cached day is
    /// `today`, `Cached` otherwise.
    pub fn from_cached(cached: &CachedHoroscope, today: &str) -> Self {
        let state = if cached.date == today {
            EntryState::Normal
        } else {
            EntryState::Cached
        };
        Self {
            sign: Some(cached.sign),
            style: Some(cached.style),
            message: cached.message.clone(),
            horoscope_date: Some(cached.date.clone()),
            last_updated: Some(cached.updated_at),
            state,
        }
    }

    pub fn no_preferences() -> Self {
        Self {
            sign: None,
            style: None,
            message: SETUP_MESSAGE.to_string(),
            horoscope_date: None,
            last_updated: None,
            state: EntryState::NoPreferences,
        }
    }

    pub fn no_horoscope(sign: ZodiacSign, style: Style) -> Self {
        Self {
            sign: Some(sign),
            style: Some(style),
            message: NOT_READY_MESSAGE.to_string(),
            horoscope_date: None,
            last_updated: None,
            state: EntryState::NoHoroscope,
        }
    }

    /// Cosmetic 1-5 rating derived from the message text. Stable across
    /// processes; purely presentational.
    pub fn energy_rating(&self) -> u8 {
        generator::energy_rating(&self.message)
    }

    /// "♌ Leo · Plain" header, or a generic fallback before onboarding.
    pub fn header_text(&self) -> String {
        match (self.sign, self.style) {
            (Some(sign), Some(style)) => format!(
                "{} {} \u{00B7} {}",
                sign.emoji(),
                sign.display_name(),
                style.display_name()
            ),
            _ => "Horoscope".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(date: &str) -> CachedHoroscope {
        CachedHoroscope {
            sign: ZodiacSign::Leo,
            style: Style::Plain,
            message: "Let your leadership lead today.".to_string(),
            date: date.to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cached_entry_state_follows_date() {
        let entry = RenderableEntry::from_cached(&cached("2026-08-06"), "2026-08-06");
        assert_eq!(entry.state, EntryState::Normal);

        let entry = RenderableEntry::from_cached(&cached("2026-08-05"), "2026-08-06");
        assert_eq!(entry.state, EntryState::Cached);
    }

    #[test]
    fn energy_rating_is_stable_and_in_range() {
        let entry = RenderableEntry::from_cached(&cached("2026-08-06"), "2026-08-06");
        let rating = entry.energy_rating();
        assert!((1..=5).contains(&rating));
        assert_eq!(rating, entry.energy_rating());
    }

    #[test]
    fn header_text_uses_display_names() {
        let entry = RenderableEntry::from_cached(&cached("2026-08-06"), "2026-08-06");
        assert!(entry.header_text().contains("Leo"));
        assert!(entry.header_text().contains("Plain"));
        assert_eq!(RenderableEntry::no_preferences().header_text(), "Horoscope");
    }
}
