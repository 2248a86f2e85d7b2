use std::collections::HashMap;

use serde::Serialize;

use crate::{
    config::Config,
    models::{Outfit, Product, RankContext, Reason, Season, StylePreferences, Tone},
};

use super::{
    diversity::{ensure_diversity, DEFAULT_DIVERSITY_CAP},
    explanation::{desc_for, occasion_for, title_for, DescInput, Occasion, TitleInput},
    match_score::{calculate_match_percentage, match_score, DEFAULT_MAX_MATCH_SCORE},
    persona_score::{score_for_persona, ColorRule},
    ranking::{OutfitRanker, RankWeights},
};

/// Products scoring below this are left out of product rankings
pub const MIN_PRODUCT_SCORE: f64 = 0.1;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 20;

/// A product with its preference match
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMatch {
    pub product: Product,
    pub score: f64,
    pub percentage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_score: Option<u8>,
}

/// Scores products against preferences and orders them for display
///
/// Products below [`MIN_PRODUCT_SCORE`] are dropped. The rest are sorted by
/// score, highest first, with the cheaper product first on equal scores.
/// Without preferences there is nothing to rank against: every product is
/// returned in catalog order with a zero score.
pub fn rank_products(
    products: Vec<Product>,
    preferences: Option<&StylePreferences>,
    max_possible_score: f64,
) -> Vec<ProductMatch> {
    let total = products.len();

    let Some(preferences) = preferences else {
        tracing::debug!(total, "No preferences supplied, returning catalog order");
        return products
            .into_iter()
            .map(|product| ProductMatch {
                product,
                score: 0.0,
                percentage: 0,
                persona_score: None,
            })
            .collect();
    };

    let mut matches: Vec<ProductMatch> = products
        .into_iter()
        .filter_map(|product| {
            let score = match_score(&product, Some(preferences)).score;
            (score >= MIN_PRODUCT_SCORE).then(|| ProductMatch {
                percentage: calculate_match_percentage(score, max_possible_score),
                product,
                score,
                persona_score: None,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.product.price.total_cmp(&b.product.price))
    });

    tracing::debug!(total, kept = matches.len(), "Ranked products");
    matches
}

/// One recommended outfit with its generated copy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedOutfit {
    pub outfit_id: String,
    pub archetype: String,
    pub score: f64,
    pub reasons: Vec<Reason>,
    pub occasion: Occasion,
    pub title: String,
    pub description: String,
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RecommendationQuery {
    pub preferences: Option<StylePreferences>,
    pub context: RankContext,
    pub persona_id: Option<String>,
    /// Maximum number of products returned
    pub limit: usize,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub tone: Tone,
    pub season: Season,
    pub products: Vec<ProductMatch>,
    pub outfits: Vec<RecommendedOutfit>,
}

/// Ties the scoring functions together for one recommendation request
#[derive(Debug)]
pub struct RecommendationEngine {
    ranker: OutfitRanker,
    diversity_cap: usize,
    max_match_score: f64,
    color_rule: ColorRule,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(OutfitRanker::default(), DEFAULT_DIVERSITY_CAP, DEFAULT_MAX_MATCH_SCORE)
    }
}

impl RecommendationEngine {
    pub fn new(ranker: OutfitRanker, diversity_cap: usize, max_match_score: f64) -> Self {
        Self {
            ranker,
            diversity_cap,
            max_match_score,
            color_rule: ColorRule::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let ranker = OutfitRanker::with_signal_set(config.rank_weights(), config.rank_signals);
        Self::new(ranker, config.diversity_cap, config.max_match_score)
            .with_color_rule(config.color_rule)
    }

    pub fn with_color_rule(mut self, color_rule: ColorRule) -> Self {
        self.color_rule = color_rule;
        self
    }

    pub fn ranker(&self) -> &OutfitRanker {
        &self.ranker
    }

    pub fn weights(&self) -> RankWeights {
        self.ranker.weights()
    }

    pub fn diversity_cap(&self) -> usize {
        self.diversity_cap
    }

    pub fn max_match_score(&self) -> f64 {
        self.max_match_score
    }

    pub fn color_rule(&self) -> ColorRule {
        self.color_rule
    }

    /// Ranks the catalog's products and outfits for one user
    ///
    /// Outfits are ranked, capped per archetype, and each gets a title and
    /// description in `query.tone`. The key piece named in the title is the
    /// outfit product that best matches the user's preferences; their top
    /// weighted tag is mentioned as a secondary style.
    pub fn recommend(
        &self,
        products: Vec<Product>,
        outfits: Vec<Outfit>,
        query: &RecommendationQuery,
    ) -> Recommendations {
        let preferences = query.preferences.as_ref();

        let mut product_matches = rank_products(products, preferences, self.max_match_score);
        product_matches.truncate(query.limit);

        if let Some(persona_id) = query.persona_id.as_deref() {
            for item in &mut product_matches {
                let persona = score_for_persona(&item.product, persona_id, self.color_rule);
                item.persona_score = Some(persona.score);
            }
        }

        let ranked = self.ranker.rank(outfits, &query.context);
        let diverse = ensure_diversity(ranked, self.diversity_cap);

        let top_tag = preferences.and_then(StylePreferences::top_tag).map(|(tag, _)| tag);

        let mut seen_per_archetype: HashMap<String, usize> = HashMap::new();
        let outfits: Vec<RecommendedOutfit> = diverse
            .into_iter()
            .map(|scored| {
                let index = seen_per_archetype.entry(scored.archetype_key()).or_insert(0);
                let occasion = occasion_for(&scored.outfit.archetype, *index);
                *index += 1;

                let outfit = &scored.outfit;
                let season = outfit.season.or(Some(query.context.season));
                let key = key_piece(&outfit.products, preferences).map(Product::display_label);
                // The user's strongest tag flavors the copy unless the archetype already says it
                let secondary = top_tag.filter(|tag| !scored.archetype_key().contains(tag));

                let title = title_for(
                    &TitleInput {
                        archetype: &outfit.archetype,
                        key,
                        season,
                    },
                    query.tone,
                );
                let description = desc_for(
                    &DescInput {
                        archetype: &outfit.archetype,
                        products: &outfit.products,
                        season,
                        occasion: Some(occasion.phrase()),
                        secondary,
                    },
                    query.tone,
                );

                RecommendedOutfit {
                    outfit_id: outfit.id.clone(),
                    archetype: outfit.archetype.clone(),
                    product_ids: outfit.products.iter().map(|p| p.id.clone()).collect(),
                    score: scored.score,
                    reasons: scored.reasons,
                    occasion,
                    title,
                    description,
                }
            })
            .collect();

        tracing::info!(
            products = product_matches.len(),
            outfits = outfits.len(),
            tone = %query.tone,
            "Built recommendations"
        );

        Recommendations {
            tone: query.tone,
            season: query.context.season,
            products: product_matches,
            outfits,
        }
    }
}

/// Best-matching product of an outfit, the first one when nothing matches
fn key_piece<'a>(products: &'a [Product], preferences: Option<&StylePreferences>) -> Option<&'a Product> {
    let mut best: Option<(&Product, f64)> = None;
    for product in products {
        let score = match_score(product, preferences).score;
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((product, score)),
        }
    }
    best.map(|(product, _)| product)
}
