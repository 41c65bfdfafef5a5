use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{Slot, Style, ZodiacSign};
use crate::store::server_timestamp;

/// Separator between key components. None of the enumerant tokens or the
/// `YYYY-MM-DD` date contain a double underscore, so splitting is exact.
pub const KEY_SEPARATOR: &str = "__";

/// Composite natural key of one horoscope: `{date}__{SIGN}__{STYLE}__{SLOT}`.
///
/// The rendered string is the remote document id; there is no surrogate id.
/// It must round-trip through `parse` byte-identically, because the same
/// string is used for existence checks before writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub date: String,
    pub sign: ZodiacSign,
    pub style: Style,
    pub slot: Slot,
}

impl DocumentKey {
    pub fn new(date: impl Into<String>, sign: ZodiacSign, style: Style, slot: Slot) -> Self {
        Self {
            date: date.into(),
            sign,
            style,
            slot,
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.date,
            self.sign,
            self.style,
            self.slot,
            sep = KEY_SEPARATOR
        )
    }
}

impl FromStr for DocumentKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(KEY_SEPARATOR).collect();
        let [date, sign, style, slot] = parts[..] else {
            return Err(AppError::InvalidKey(s.to_string()));
        };
        Ok(Self {
            date: date.to_string(),
            sign: sign
                .parse()
                .map_err(|_| AppError::InvalidKey(s.to_string()))?,
            style: style
                .parse()
                .map_err(|_| AppError::InvalidKey(s.to_string()))?,
            slot: slot
                .parse()
                .map_err(|_| AppError::InvalidKey(s.to_string()))?,
        })
    }
}

/// Remote document field names. Fixed wire format; do not rename.
mod field {
    pub const DATE: &str = "date";
    pub const SIGN: &str = "sign";
    pub const STYLE: &str = "style";
    pub const SLOT: &str = "slot";
    pub const MESSAGE: &str = "message";
    pub const TITLE: &str = "title";
    pub const CREATED_AT: &str = "createdAt";
    pub const VERSION: &str = "version";
    pub const IS_ACTIVE: &str = "isActive";
}

/// One horoscope message. Immutable once stored; only `is_active` may be
/// flipped to retire a message without deleting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Horoscope {
    pub date: String,
    pub sign: ZodiacSign,
    pub style: Style,
    pub slot: Slot,
    pub message: String,
    pub title: Option<String>,
    /// Stamped by the store at commit time; never set by this client.
    pub created_at: Option<DateTime<Utc>>,
    pub version: u32,
    pub is_active: bool,
}

impl Horoscope {
    pub fn new(
        date: impl Into<String>,
        sign: ZodiacSign,
        style: Style,
        slot: Slot,
        message: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            sign,
            style,
            slot,
            message: message.into(),
            title: None,
            created_at: None,
            version: 1,
            is_active: true,
        }
    }

    pub fn document_key(&self) -> DocumentKey {
        DocumentKey::new(self.date.clone(), self.sign, self.style, self.slot)
    }

    /// Remote document body. `createdAt` carries the server-timestamp
    /// sentinel so the store's clock is authoritative.
    pub fn to_document(&self) -> Value {
        let mut doc = json!({
            field::DATE: self.date,
            field::SIGN: self.sign.as_str(),
            field::STYLE: self.style.as_str(),
            field::SLOT: self.slot.as_str(),
            field::MESSAGE: self.message,
            field::VERSION: self.version,
            field::IS_ACTIVE: self.is_active,
            field::CREATED_AT: server_timestamp(),
        });
        if let Some(title) = &self.title {
            doc[field::TITLE] = json!(title);
        }
        doc
    }

    /// Decode a remote document. Returns `None` when required fields are
    /// missing or carry unknown tokens; optional fields fall back to their
    /// documented defaults (`version` 1, `isActive` true).
    pub fn from_document(doc: &Value) -> Option<Self> {
        let date = doc.get(field::DATE)?.as_str()?.to_string();
        let sign: ZodiacSign = doc.get(field::SIGN)?.as_str()?.parse().ok()?;
        let style: Style = doc.get(field::STYLE)?.as_str()?.parse().ok()?;
        let slot: Slot = doc.get(field::SLOT)?.as_str()?.parse().ok()?;
        let message = doc.get(field::MESSAGE)?.as_str()?.to_string();

        let title = doc
            .get(field::TITLE)
            .and_then(Value::as_str)
            .map(str::to_string);
        let created_at = doc
            .get(field::CREATED_AT)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let version = doc
            .get(field::VERSION)
            .and_then(Value::as_u64)
            .unwrap_or(1) as u32;
        let is_active = doc
            .get(field::IS_ACTIVE)
            .and_then(Value::as_bool)
            .unwrap_or(true);

        Some(Self {
            date,
            sign,
            style,
            slot,
            message,
            title,
            created_at,
            version,
            is_active,
        })
    }
}

/// Denormalized projection held in the shared local cache. At most one
/// exists at a time; `updated_at` is the local write time, not the
/// server's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedHoroscope {
    pub sign: ZodiacSign,
    pub style: Style,
    pub message: String,
    pub date: String,
    pub updated_at: DateTime<Utc>,
}

impl CachedHoroscope {
    pub fn from_horoscope(horoscope: &Horoscope, now: DateTime<Utc>) -> Self {
        Self {
            sign: horoscope.sign,
            style: horoscope.style,
            message: horoscope.message.clone(),
            date: horoscope.date.clone(),
            updated_at: now,
        }
    }
}
