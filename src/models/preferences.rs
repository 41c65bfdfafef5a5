use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::models::{SlotMode, Style, ZodiacSign};
use crate::store::server_timestamp;

/// Remote document field names. Fixed wire format; do not rename.
mod field {
    pub const PREFERRED_SIGN: &str = "preferredSign";
    pub const PREFERRED_STYLE: &str = "preferredStyle";
    pub const PREFERRED_SLOT_MODE: &str = "preferredSlotMode";
    pub const UPDATED_AT: &str = "updatedAt";
}

/// User preferences as stored remotely, keyed by the opaque identity id.
///
/// A remote record is only ever written after onboarding completes, so it
/// always carries a sign and a style. The locally persisted copy (see
/// `storage`) keeps them optional until then.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub preferred_sign: ZodiacSign,
    pub preferred_style: Style,
    pub preferred_slot_mode: SlotMode,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Preferences {
    pub fn new(sign: ZodiacSign, style: Style, mode: SlotMode) -> Self {
        Self {
            preferred_sign: sign,
            preferred_style: style,
            preferred_slot_mode: mode,
            updated_at: None,
        }
    }

    /// Remote document body; `updatedAt` resolves to the store's clock.
    pub fn to_document(&self) -> Value {
        json!({
            field::PREFERRED_SIGN: self.preferred_sign.as_str(),
            field::PREFERRED_STYLE: self.preferred_style.as_str(),
            field::PREFERRED_SLOT_MODE: self.preferred_slot_mode.as_str(),
            field::UPDATED_AT: server_timestamp(),
        })
    }

    /// Decode a remote record, falling back to defaults for any field a
    /// different client version left out.
    pub fn from_document(doc: &Value) -> Option<Self> {
        let preferred_sign = doc
            .get(field::PREFERRED_SIGN)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())?;
        let preferred_style = doc
            .get(field::PREFERRED_STYLE)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())?;
        let preferred_slot_mode = doc
            .get(field::PREFERRED_SLOT_MODE)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let updated_at = doc
            .get(field::UPDATED_AT)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Some(Self {
            preferred_sign,
            preferred_style,
            preferred_slot_mode,
            updated_at,
        })
    }
}
