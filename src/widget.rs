use chrono::{DateTime, Local};

use crate::dates::DateProvider;
use crate::models::RenderableEntry;
use crate::storage::SharedStore;

/// Builds the widget's snapshot from shared local state.
///
/// Runs in the satellite process on its own schedule. It only ever reads
/// the shared store, never the network, so it keeps working with whatever
/// the app process last cached.
pub struct WidgetSnapshotReader {
    store: SharedStore,
    dates: DateProvider,
}

impl WidgetSnapshotReader {
    pub fn new(store: SharedStore, dates: DateProvider) -> Self {
        Self { store, dates }
    }

    /// Rendering-ready snapshot. State priority: missing preferences win
    /// over everything, then an empty cache, then cache staleness.
    pub fn snapshot(&self) -> RenderableEntry {
        // Pick up whatever the app process wrote since we opened the file.
        // A failed re-read falls back to the last state; never an error.
        if let Err(e) = self.store.reload() {
            tracing::debug!("Shared store reload failed: {}", e);
        }

        let (Some(sign), Some(style)) =
            (self.store.preferred_sign(), self.store.preferred_style())
        else {
            return RenderableEntry::no_preferences();
        };

        match self.store.cached_horoscope() {
            Some(cached) => RenderableEntry::from_cached(&cached, &self.dates.today_string()),
            None => RenderableEntry::no_horoscope(sign, style),
        }
    }

    /// When the external scheduler should rebuild the snapshot next.
    pub fn next_refresh(&self, now: DateTime<Local>) -> DateTime<Local> {
        self.dates.next_widget_refresh(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryState, Horoscope, Slot, Style, ZodiacSign};
    use chrono::{NaiveDate, Utc};

    fn fixture(dir: &tempfile::TempDir) -> (SharedStore, WidgetSnapshotReader) {
        let path = dir.path().join("shared.json");
        let writer = SharedStore::open(&path).unwrap();
        let reader = WidgetSnapshotReader::new(
            SharedStore::open(&path).unwrap(),
            DateProvider::fixed(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(), 9),
        );
        (writer, reader)
    }

    fn horoscope(date: &str) -> Horoscope {
        Horoscope::new(
            date,
            ZodiacSign::Leo,
            Style::Plain,
            Slot::Daily,
            "A day to showcase your leadership.",
        )
    }

    #[test]
    fn missing_preferences_win_over_cache_contents() {
        let dir = tempfile::tempdir().unwrap();
        let (writer, _) = fixture(&dir);
        // Cache exists but preferences were never set.
        writer
            .cache_horoscope(&horoscope("2026-08-06"), Utc::now())
            .unwrap();

        // Reopen so the reader sees the write.
        let (_, reader) = fixture(&dir);
        assert_eq!(reader.snapshot().state, EntryState::NoPreferences);
    }

    #[test]
    fn preferences_without_cache_report_no_horoscope() {
        let dir = tempfile::tempdir().unwrap();
        let (writer, _) = fixture(&dir);
        writer
            .set_preferences(ZodiacSign::Leo, Style::Plain)
            .unwrap();

        let (_, reader) = fixture(&dir);
        let entry = reader.snapshot();
        assert_eq!(entry.state, EntryState::NoHoroscope);
        assert_eq!(entry.sign, Some(ZodiacSign::Leo));
    }

    #[test]
    fn todays_cache_renders_normal_and_stale_renders_cached() {
        let dir = tempfile::tempdir().unwrap();
        let (writer, _) = fixture(&dir);
        writer
            .set_preferences(ZodiacSign::Leo, Style::Plain)
            .unwrap();
        writer
            .cache_horoscope(&horoscope("2026-08-06"), Utc::now())
            .unwrap();

        let (writer, reader) = fixture(&dir);
        assert_eq!(reader.snapshot().state, EntryState::Normal);

        writer
            .cache_horoscope(&horoscope("2026-08-05"), Utc::now())
            .unwrap();
        let (_, reader) = fixture(&dir);
        let entry = reader.snapshot();
        assert_eq!(entry.state, EntryState::Cached);
        assert!((1..=5).contains(&entry.energy_rating()));
    }
}
