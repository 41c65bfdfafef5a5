use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Canonical day format used in document keys and date fields.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Hour/minute of the daily widget refresh (just past local midnight).
const DAILY_REFRESH_HOUR: u32 = 0;
const DAILY_REFRESH_MINUTE: u32 = 10;

/// Provides "today" in the user's timezone plus the display formatters.
///
/// Centralized so every component agrees on the calendar day, and so tests
/// can pin the clock instead of racing midnight.
#[derive(Debug, Clone, Default)]
pub struct DateProvider {
    fixed: Option<(NaiveDate, u32)>,
}

impl DateProvider {
    pub fn new() -> Self {
        Self { fixed: None }
    }

    /// A provider pinned to a specific day and hour. Test use only.
    pub fn fixed(date: NaiveDate, hour: u32) -> Self {
        Self {
            fixed: Some((date, hour)),
        }
    }

    /// Current calendar day in the local timezone.
    pub fn today(&self) -> NaiveDate {
        match self.fixed {
            Some((date, _)) => date,
            None => Local::now().date_naive(),
        }
    }

    /// Today as a canonical `YYYY-MM-DD` string.
    pub fn today_string(&self) -> String {
        Self::day_string(self.today())
    }

    /// Current hour of day (0-23), used for timeslot selection.
    pub fn current_hour(&self) -> u32 {
        use chrono::Timelike;
        match self.fixed {
            Some((_, hour)) => hour,
            None => Local::now().hour(),
        }
    }

    /// Canonical string for an arbitrary day.
    pub fn day_string(date: NaiveDate) -> String {
        date.format(DAY_FORMAT).to_string()
    }

    /// Canonical string for the day `days` from today.
    pub fn day_string_offset(&self, days: i64) -> String {
        Self::day_string(self.today() + Duration::days(days))
    }

    /// When the widget should next rebuild its snapshot: shortly after the
    /// next local midnight, so a fresh day picks up a fresh message.
    pub fn next_widget_refresh(&self, now: DateTime<Local>) -> DateTime<Local> {
        let tomorrow = now.date_naive() + Duration::days(1);
        tomorrow
            .and_hms_opt(DAILY_REFRESH_HOUR, DAILY_REFRESH_MINUTE, 0)
            .and_then(|naive| naive.and_local_timezone(Local).single())
            .unwrap_or_else(|| now + Duration::hours(1))
    }

    /// Short time for "Updated 9:41 AM" labels.
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&Local)
            .format("%-I:%M %p")
            .to_string()
    }

    /// Long date for headers, e.g. "Wednesday, August 6".
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%A, %B %-d").to_string()
    }
}
