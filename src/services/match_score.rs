use serde::Serialize;

use crate::models::{Product, StylePreferences};

/// Default denominator for [`calculate_match_percentage`]
pub const DEFAULT_MAX_MATCH_SCORE: f64 = 10.0;

/// Why a match score came out the way it did
///
/// Every variant other than `Matched` means the score is a zero default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// At least one product tag carried a weight
    Matched { matched_tags: usize },
    NoStyleTags,
    NoPreferences,
    /// Tags and preferences were present but none overlapped with weight > 0
    NoOverlap,
}

/// Raw match score plus the outcome behind it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchScore {
    pub score: f64,
    pub outcome: MatchOutcome,
}

impl MatchScore {
    pub fn is_no_match(&self) -> bool {
        !matches!(self.outcome, MatchOutcome::Matched { .. })
    }
}

/// Sums the preference weight of every style tag on the product
///
/// Missing tags contribute 0. A product without tags, or absent preferences,
/// degrade to a zero score with the matching [`MatchOutcome`].
pub fn match_score(product: &Product, preferences: Option<&StylePreferences>) -> MatchScore {
    let Some(preferences) = preferences else {
        tracing::debug!(product_id = %product.id, "No preferences supplied, match score defaults to 0");
        return MatchScore {
            score: 0.0,
            outcome: MatchOutcome::NoPreferences,
        };
    };

    if product.style_tags.is_empty() {
        tracing::debug!(product_id = %product.id, "Product has no style tags, match score defaults to 0");
        return MatchScore {
            score: 0.0,
            outcome: MatchOutcome::NoStyleTags,
        };
    }

    let mut score = 0.0;
    let mut matched_tags = 0;
    for tag in &product.style_tags {
        let weight = preferences.weight(tag);
        if weight > 0.0 {
            matched_tags += 1;
        }
        score += weight;
    }

    let outcome = if matched_tags > 0 {
        MatchOutcome::Matched { matched_tags }
    } else {
        MatchOutcome::NoOverlap
    };

    MatchScore { score, outcome }
}

/// Raw weighted-sum affinity between a product and a preference vector
pub fn calculate_match_score(product: &Product, preferences: Option<&StylePreferences>) -> f64 {
    match_score(product, preferences).score
}

/// Converts a raw score to a 0-100 percentage of `max_possible_score`
///
/// Returns 0 when `max_possible_score <= 0` instead of dividing by zero, and
/// for non-finite input.
pub fn calculate_match_percentage(score: f64, max_possible_score: f64) -> u8 {
    if max_possible_score <= 0.0 || !max_possible_score.is_finite() || !score.is_finite() {
        return 0;
    }
    let pct = (score / max_possible_score * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Qualitative band for a match percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchInsight {
    Perfect,
    Excellent,
    GoodFit,
    Good,
    Experimental,
}

impl MatchInsight {
    pub fn label(self) -> &'static str {
        match self {
            MatchInsight::Perfect => "Perfect match for your style",
            MatchInsight::Excellent => "An excellent choice for you",
            MatchInsight::GoodFit => "Fits your profile well",
            MatchInsight::Good => "A good match",
            MatchInsight::Experimental => "An experimental pick",
        }
    }
}

pub fn match_insight(percentage: u8) -> MatchInsight {
    match percentage {
        95..=u8::MAX => MatchInsight::Perfect,
        90..=94 => MatchInsight::Excellent,
        85..=89 => MatchInsight::GoodFit,
        80..=84 => MatchInsight::Good,
        _ => MatchInsight::Experimental,
    }
}
