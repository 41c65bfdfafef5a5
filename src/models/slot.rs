use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Delivery timeslots within a day.
///
/// Only `Daily` is exercised end-to-end today; the other three exist so
/// `Triple` delivery can be turned on without a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Slot {
    Daily,
    Morning,
    Afternoon,
    Night,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Daily, Slot::Morning, Slot::Afternoon, Slot::Night];

    /// Canonical uppercase token used in keys and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Daily => "DAILY",
            Slot::Morning => "MORNING",
            Slot::Afternoon => "AFTERNOON",
            Slot::Night => "NIGHT",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Slot::Daily => "Daily",
            Slot::Morning => "Morning",
            Slot::Afternoon => "Afternoon",
            Slot::Night => "Night",
        }
    }

    /// The slot covering a given hour of day, for triple delivery.
    /// Morning is [5,12), afternoon [12,17), everything else night.
    pub fn for_hour(hour: u32) -> Slot {
        match hour {
            5..=11 => Slot::Morning,
            12..=16 => Slot::Afternoon,
            _ => Slot::Night,
        }
    }

    /// The slots a delivery mode cycles through.
    pub fn slots_for(mode: SlotMode) -> &'static [Slot] {
        match mode {
            SlotMode::Daily => &[Slot::Daily],
            SlotMode::Triple => &[Slot::Morning, Slot::Afternoon, Slot::Night],
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| AppError::UnknownToken(s.to_string()))
    }
}

/// How often the user wants content to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotMode {
    #[default]
    Daily,
    Triple,
}

impl SlotMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotMode::Daily => "DAILY",
            SlotMode::Triple => "TRIPLE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SlotMode::Daily => "Once daily",
            SlotMode::Triple => "Three times daily",
        }
    }
}

impl FromStr for SlotMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(SlotMode::Daily),
            "TRIPLE" => Ok(SlotMode::Triple),
            other => Err(AppError::UnknownToken(other.to_string())),
        }
    }
}
