use serde::{Deserialize, Serialize};

use super::Season;

/// A catalog product as handed to the scoring engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub style_tags: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub silhouette: Option<String>,
    /// Seasons the product suits; empty means all seasons
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
}

impl Product {
    /// Creates a product with only the required fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            style_tags: Vec::new(),
            color: None,
            material: None,
            silhouette: None,
            seasons: Vec::new(),
            category: None,
            price: 0.0,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_seasons(mut self, seasons: Vec<Season>) -> Self {
        self.seasons = seasons;
        self
    }

    /// Whether the product can be worn in the given season
    pub fn is_in_season(&self, season: Season) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&season)
    }

    /// Name shown in generated copy, falling back to the category
    pub fn display_label(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() {
            return name;
        }
        match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category,
            _ => "item",
        }
    }
}
