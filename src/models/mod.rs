use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub mod outfit;
pub mod persona;
pub mod product;
pub mod user_preferences;

pub use outfit::{Outfit, RankContext, ScoredOutfit};
pub use persona::Persona;
pub use product::Product;
pub use user_preferences::StylePreferences;

/// Calendar season used for seasonal fit and explanation copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    #[serde(alias = "fall")]
    Autumn,
    Winter,
}

impl Season {
    /// Northern hemisphere season for a 1-based month
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Season for today's date (UTC)
    pub fn current() -> Self {
        Self::for_date(chrono::Utc::now().date_naive())
    }

    /// Seasons that still wear reasonably well when this one is current
    pub fn compatible(self) -> &'static [Season] {
        match self {
            Season::Winter => &[Season::Autumn],
            Season::Spring => &[Season::Summer],
            Season::Summer => &[Season::Spring],
            Season::Autumn => &[Season::Winter],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            other => Err(format!("unknown season: {}", other)),
        }
    }
}

/// Phrasing register for generated outfit copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Minimal,
    Editorial,
    Playful,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Minimal => "minimal",
            Tone::Editorial => "editorial",
            Tone::Playful => "playful",
        }
    }
}

impl Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Ok(Tone::Minimal),
            "editorial" => Ok(Tone::Editorial),
            "playful" => Ok(Tone::Playful),
            other => Err(format!("unknown tone: {}", other)),
        }
    }
}

/// Tag explaining one component of an outfit's ranking score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    MatchArchetype,
    MismatchArchetype,
    SeasonBaseline,
    SeasonMatch,
    SeasonCompatible,
    SeasonOff,
    RecentRepeat,
    FreshType,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::MatchArchetype => "match_archetype",
            Reason::MismatchArchetype => "mismatch_archetype",
            Reason::SeasonBaseline => "season_baseline",
            Reason::SeasonMatch => "season_match",
            Reason::SeasonCompatible => "season_compatible",
            Reason::SeasonOff => "season_off",
            Reason::RecentRepeat => "recent_repeat",
            Reason::FreshType => "fresh_type",
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
