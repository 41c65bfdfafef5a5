use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Writing styles for generated messages.
///
/// Extending the set means adding a variant here and a template list in
/// the catalog; nothing else needs to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Style {
    Plain,
    Funny,
    Mystic,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Plain, Style::Funny, Style::Mystic];

    /// Canonical uppercase token used in keys and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Plain => "PLAIN",
            Style::Funny => "FUNNY",
            Style::Mystic => "MYSTIC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Style::Plain => "Plain",
            Style::Funny => "Funny",
            Style::Mystic => "Mystic",
        }
    }

    /// One-line description for pickers.
    pub fn description(&self) -> &'static str {
        match self {
            Style::Plain => "Clear, straightforward daily guidance",
            Style::Funny => "Light-hearted with a touch of humor",
            Style::Mystic => "Deep, cosmic wisdom and mystery",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Style::Plain => "\u{1F4DD}",
            Style::Funny => "\u{1F604}",
            Style::Mystic => "\u{1F52E}",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| AppError::UnknownToken(s.to_string()))
    }
}
