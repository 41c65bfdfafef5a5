mod entry;
mod horoscope;
mod preferences;
mod sign;
mod slot;
mod style;

pub use entry::{EntryState, RenderableEntry, NOT_READY_MESSAGE, SETUP_MESSAGE, STALE_NOTICE};
pub use horoscope::{CachedHoroscope, DocumentKey, Horoscope, KEY_SEPARATOR};
pub use preferences::Preferences;
pub use sign::ZodiacSign;
pub use slot::{Slot, SlotMode};
pub use style::Style;
