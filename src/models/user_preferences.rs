use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Highest weight a quiz answer can assign to a style tag
pub const MAX_TAG_WEIGHT: f64 = 5.0;

/// A user's style preference vector: lowercase style tag to weight (0-5)
///
/// Keys are lowercased on construction so lookups from mixed-case product
/// tags resolve to the same entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct StylePreferences {
    weights: HashMap<String, f64>,
}

// Keys that collide after lowercasing keep the highest weight, so the
// result does not depend on map iteration order. NaN sorts highest and
// is still caught by `validate`.
impl From<HashMap<String, f64>> for StylePreferences {
    fn from(raw: HashMap<String, f64>) -> Self {
        let mut weights: HashMap<String, f64> = HashMap::with_capacity(raw.len());
        for (tag, weight) in raw {
            weights
                .entry(tag.trim().to_lowercase())
                .and_modify(|current| {
                    if weight.total_cmp(current).is_gt() {
                        *current = weight;
                    }
                })
                .or_insert(weight);
        }
        Self { weights }
    }
}

impl From<StylePreferences> for HashMap<String, f64> {
    fn from(prefs: StylePreferences) -> Self {
        prefs.weights
    }
}

impl<K: AsRef<str>> FromIterator<(K, f64)> for StylePreferences {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut prefs = Self::new();
        for (tag, weight) in iter {
            prefs.set(tag.as_ref(), weight);
        }
        prefs
    }
}

impl StylePreferences {
    /// Creates an empty preference vector
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    /// Sets the weight for a tag, replacing any existing value
    pub fn set(&mut self, tag: &str, weight: f64) {
        self.weights.insert(tag.trim().to_lowercase(), weight);
    }

    /// Weight for a tag (case-insensitive); missing tags weigh 0
    pub fn weight(&self, tag: &str) -> f64 {
        self.weights
            .get(tag.trim().to_lowercase().as_str())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Tag with the highest weight; ties resolve alphabetically
    pub fn top_tag(&self) -> Option<(&str, f64)> {
        self.weights
            .iter()
            .map(|(tag, weight)| (tag.as_str(), *weight))
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Checks every weight is finite and within 0..=5
    pub fn validate(&self) -> Result<(), String> {
        for (tag, weight) in &self.weights {
            if !weight.is_finite() || *weight < 0.0 || *weight > MAX_TAG_WEIGHT {
                return Err(format!(
                    "weight for '{}' must be between 0 and {}, got {}",
                    tag, MAX_TAG_WEIGHT, weight
                ));
            }
        }
        Ok(())
    }
}
