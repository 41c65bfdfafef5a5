use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// All 12 zodiac signs.
///
/// The serialized token (`ARIES`, ...) is load-bearing: it appears in
/// document keys, generator seeds, and persisted preferences, and must
/// round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Canonical uppercase token used in keys and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "ARIES",
            ZodiacSign::Taurus => "TAURUS",
            ZodiacSign::Gemini => "GEMINI",
            ZodiacSign::Cancer => "CANCER",
            ZodiacSign::Leo => "LEO",
            ZodiacSign::Virgo => "VIRGO",
            ZodiacSign::Libra => "LIBRA",
            ZodiacSign::Scorpio => "SCORPIO",
            ZodiacSign::Sagittarius => "SAGITTARIUS",
            ZodiacSign::Capricorn => "CAPRICORN",
            ZodiacSign::Aquarius => "AQUARIUS",
            ZodiacSign::Pisces => "PISCES",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "\u{2648}",
            ZodiacSign::Taurus => "\u{2649}",
            ZodiacSign::Gemini => "\u{264A}",
            ZodiacSign::Cancer => "\u{264B}",
            ZodiacSign::Leo => "\u{264C}",
            ZodiacSign::Virgo => "\u{264D}",
            ZodiacSign::Libra => "\u{264E}",
            ZodiacSign::Scorpio => "\u{264F}",
            ZodiacSign::Sagittarius => "\u{2650}",
            ZodiacSign::Capricorn => "\u{2651}",
            ZodiacSign::Aquarius => "\u{2652}",
            ZodiacSign::Pisces => "\u{2653}",
        }
    }

    /// Date range shown next to the sign in pickers.
    pub fn date_range(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Mar 21 - Apr 19",
            ZodiacSign::Taurus => "Apr 20 - May 20",
            ZodiacSign::Gemini => "May 21 - Jun 20",
            ZodiacSign::Cancer => "Jun 21 - Jul 22",
            ZodiacSign::Leo => "Jul 23 - Aug 22",
            ZodiacSign::Virgo => "Aug 23 - Sep 22",
            ZodiacSign::Libra => "Sep 23 - Oct 22",
            ZodiacSign::Scorpio => "Oct 23 - Nov 21",
            ZodiacSign::Sagittarius => "Nov 22 - Dec 21",
            ZodiacSign::Capricorn => "Dec 22 - Jan 19",
            ZodiacSign::Aquarius => "Jan 20 - Feb 18",
            ZodiacSign::Pisces => "Feb 19 - Mar 20",
        }
    }

    pub fn element(&self) -> &'static str {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => "Fire",
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => "Earth",
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => "Air",
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => "Water",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sign| sign.as_str() == s)
            .ok_or_else(|| AppError::UnknownToken(s.to_string()))
    }
}
