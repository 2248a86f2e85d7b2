use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

use super::{Product, Reason, Season};

/// A candidate outfit built by a caller before ranking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: String,
    pub archetype: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Season the outfit was composed for, if any
    #[serde(default)]
    pub season: Option<Season>,
}

/// Tag marking an outfit as wearable in every season
pub const ALL_SEASON_TAG: &str = "all-season";

impl Outfit {
    pub fn new(id: impl Into<String>, archetype: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            archetype: archetype.into(),
            products: Vec::new(),
            tags: Vec::new(),
            season: None,
        }
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Archetype label normalized for comparisons
    pub fn archetype_key(&self) -> String {
        self.archetype.trim().to_lowercase()
    }

    pub fn is_all_season(&self) -> bool {
        self.tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(ALL_SEASON_TAG) || t.eq_ignore_ascii_case("transitional"))
    }
}

/// Per-call ranking context supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankContext {
    /// Archetypes the user currently favors
    #[serde(default)]
    pub archetypes: Vec<String>,
    #[serde(default = "Season::current")]
    pub season: Season,
    /// Outfit types the user has seen recently
    #[serde(default)]
    pub recent_types: Vec<String>,
}

impl RankContext {
    pub fn new<I, S>(archetypes: I, season: Season) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            archetypes: archetypes.into_iter().map(Into::into).collect(),
            season,
            recent_types: Vec::new(),
        }
    }

    pub fn with_recent_types<I, S>(mut self, recent: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recent_types = recent.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the archetype is among the favored ones (case-insensitive)
    pub fn favors(&self, archetype: &str) -> bool {
        let archetype = archetype.trim();
        self.archetypes
            .iter()
            .any(|a| a.trim().eq_ignore_ascii_case(archetype))
    }

    pub fn recently_seen(&self, archetype: &str) -> bool {
        let archetype = archetype.trim();
        self.recent_types
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(archetype))
    }
}

/// An outfit paired with its ranking score and the reasons behind it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOutfit {
    pub outfit: Outfit,
    pub score: f64,
    pub reasons: Vec<Reason>,
}

impl ScoredOutfit {
    pub fn archetype_key(&self) -> String {
        self.outfit.archetype_key()
    }
}

// Crosses the service boundary as `{ outfitId, score, reasons }`
impl Serialize for ScoredOutfit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScoredOutfit", 3)?;
        state.serialize_field("outfitId", &self.outfit.id)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("reasons", &self.reasons)?;
        state.end()
    }
}
