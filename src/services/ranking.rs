//! Outfit ranking.
//!
//! Each outfit's score is a fixed weighted sum of three signals:
//!
//! ```text
//! score = w_archetype * archetype + w_season * season + w_recency * recency
//! ```
//!
//! Weights default to 0.6 / 0.3 / 0.1. The signals are pluggable so a real
//! seasonal or recency computation can replace the defaults without changing
//! the weights or the ranking contract. The defaults are a constant 1 for the
//! season and a constant 0 for recency.

use serde::{Deserialize, Serialize};

use crate::models::{Outfit, RankContext, Reason, ScoredOutfit};

/// Weights applied to the three ranking signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankWeights {
    pub archetype: f64,
    pub season: f64,
    pub recency: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            archetype: 0.6,
            season: 0.3,
            recency: 0.1,
        }
    }
}

impl RankWeights {
    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in [
            ("archetype", self.archetype),
            ("season", self.season),
            ("recency", self.recency),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("{} weight must be a non-negative number, got {}", name, weight));
            }
        }
        Ok(())
    }
}

/// Output of one signal for one outfit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalValue {
    /// Signal strength in 0..=1
    pub value: f64,
    pub reason: Option<Reason>,
}

impl SignalValue {
    pub fn new(value: f64, reason: Option<Reason>) -> Self {
        Self { value, reason }
    }
}

/// A single scoring dimension used by [`OutfitRanker`]
pub trait Signal: Send + Sync {
    fn evaluate(&self, outfit: &Outfit, context: &RankContext) -> SignalValue;

    /// Signal name for logging
    fn name(&self) -> &'static str;
}

/// 1 when the outfit's archetype is one the user favors
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchetypeMatch;

impl Signal for ArchetypeMatch {
    fn evaluate(&self, outfit: &Outfit, context: &RankContext) -> SignalValue {
        if context.favors(&outfit.archetype) {
            SignalValue::new(1.0, Some(Reason::MatchArchetype))
        } else {
            SignalValue::new(0.0, Some(Reason::MismatchArchetype))
        }
    }

    fn name(&self) -> &'static str {
        "archetype_match"
    }
}

/// Constant season signal: every outfit counts as in season
#[derive(Debug, Default, Clone, Copy)]
pub struct SeasonBaseline;

impl Signal for SeasonBaseline {
    fn evaluate(&self, _outfit: &Outfit, _context: &RankContext) -> SignalValue {
        SignalValue::new(1.0, Some(Reason::SeasonBaseline))
    }

    fn name(&self) -> &'static str {
        "season_baseline"
    }
}

/// Constant recency signal: no outfit is penalized or boosted
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRecency;

impl Signal for NoRecency {
    fn evaluate(&self, _outfit: &Outfit, _context: &RankContext) -> SignalValue {
        SignalValue::new(0.0, None)
    }

    fn name(&self) -> &'static str {
        "no_recency"
    }
}

/// Compares the outfit's season with the context season
///
/// 1.0 same season, 0.9 all-season outfits, 0.6 an adjacent compatible
/// season, 0.3 otherwise. An outfit that declares no season scores 0.8 when
/// every product can be worn in the context season and 0.3 when one cannot.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeasonalFit;

impl Signal for SeasonalFit {
    fn evaluate(&self, outfit: &Outfit, context: &RankContext) -> SignalValue {
        if outfit.is_all_season() {
            return SignalValue::new(0.9, Some(Reason::SeasonCompatible));
        }
        match outfit.season {
            None if outfit.products.iter().all(|p| p.is_in_season(context.season)) => {
                SignalValue::new(0.8, Some(Reason::SeasonBaseline))
            }
            None => SignalValue::new(0.3, Some(Reason::SeasonOff)),
            Some(season) if season == context.season => {
                SignalValue::new(1.0, Some(Reason::SeasonMatch))
            }
            Some(season) if context.season.compatible().contains(&season) => {
                SignalValue::new(0.6, Some(Reason::SeasonCompatible))
            }
            Some(_) => SignalValue::new(0.3, Some(Reason::SeasonOff)),
        }
    }

    fn name(&self) -> &'static str {
        "seasonal_fit"
    }
}

/// 1 for outfit types the user has not seen recently, 0 for repeats
#[derive(Debug, Default, Clone, Copy)]
pub struct Freshness;

impl Signal for Freshness {
    fn evaluate(&self, outfit: &Outfit, context: &RankContext) -> SignalValue {
        if context.recently_seen(&outfit.archetype) {
            SignalValue::new(0.0, Some(Reason::RecentRepeat))
        } else {
            SignalValue::new(1.0, Some(Reason::FreshType))
        }
    }

    fn name(&self) -> &'static str {
        "freshness"
    }
}

/// Which season and recency signals a ranker is built with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSet {
    /// [`SeasonBaseline`] and [`NoRecency`]
    #[default]
    Baseline,
    /// [`SeasonalFit`] and [`Freshness`]
    Contextual,
}

/// Weighted-sum outfit ranker
pub struct OutfitRanker {
    weights: RankWeights,
    archetype: Box<dyn Signal>,
    season: Box<dyn Signal>,
    recency: Box<dyn Signal>,
}

impl Default for OutfitRanker {
    fn default() -> Self {
        Self::new(RankWeights::default())
    }
}

impl std::fmt::Debug for OutfitRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutfitRanker")
            .field("weights", &self.weights)
            .field("archetype", &self.archetype.name())
            .field("season", &self.season.name())
            .field("recency", &self.recency.name())
            .finish()
    }
}

impl OutfitRanker {
    /// Ranker with the default signals and the given weights
    pub fn new(weights: RankWeights) -> Self {
        Self {
            weights,
            archetype: Box::new(ArchetypeMatch),
            season: Box::new(SeasonBaseline),
            recency: Box::new(NoRecency),
        }
    }

    pub fn with_signal_set(weights: RankWeights, signals: SignalSet) -> Self {
        let ranker = Self::new(weights);
        match signals {
            SignalSet::Baseline => ranker,
            SignalSet::Contextual => ranker
                .with_season_signal(SeasonalFit)
                .with_recency_signal(Freshness),
        }
    }

    pub fn with_season_signal(mut self, signal: impl Signal + 'static) -> Self {
        self.season = Box::new(signal);
        self
    }

    pub fn with_recency_signal(mut self, signal: impl Signal + 'static) -> Self {
        self.recency = Box::new(signal);
        self
    }

    pub fn weights(&self) -> RankWeights {
        self.weights
    }

    /// Scores a single outfit without sorting
    pub fn score(&self, outfit: &Outfit, context: &RankContext) -> (f64, Vec<Reason>) {
        let archetype = self.archetype.evaluate(outfit, context);
        let season = self.season.evaluate(outfit, context);
        let recency = self.recency.evaluate(outfit, context);

        let score = self.weights.archetype * archetype.value
            + self.weights.season * season.value
            + self.weights.recency * recency.value;

        let reasons = [archetype.reason, season.reason, recency.reason]
            .into_iter()
            .flatten()
            .collect();

        (score, reasons)
    }

    /// Scores and sorts outfits by descending score
    ///
    /// The sort is stable: outfits with equal scores keep their input order.
    pub fn rank(&self, outfits: Vec<Outfit>, context: &RankContext) -> Vec<ScoredOutfit> {
        let mut scored: Vec<ScoredOutfit> = outfits
            .into_iter()
            .map(|outfit| {
                let (score, reasons) = self.score(&outfit, context);
                ScoredOutfit {
                    outfit,
                    score,
                    reasons,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            count = scored.len(),
            season_signal = self.season.name(),
            recency_signal = self.recency.name(),
            "Ranked outfits"
        );

        scored
    }
}

/// Ranks outfits with the default weights and signals
pub fn rank_outfits(outfits: Vec<Outfit>, context: &RankContext) -> Vec<ScoredOutfit> {
    OutfitRanker::default().rank(outfits, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Season;

    const EPS: f64 = 1e-9;

    fn ids(scored: &[ScoredOutfit]) -> Vec<&str> {
        scored.iter().map(|s| s.outfit.id.as_str()).collect()
    }

    #[test]
    fn test_default_weights() {
        let weights = RankWeights::default();
        assert_eq!(weights.archetype, 0.6);
        assert_eq!(weights.season, 0.3);
        assert_eq!(weights.recency, 0.1);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = RankWeights {
            recency: f64::NAN,
            ..RankWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_matching_archetype_scores_higher() {
        let ctx = RankContext::new(["minimal"], Season::Winter);
        let ranked = rank_outfits(
            vec![Outfit::new("a", "streetwear"), Outfit::new("b", "minimal")],
            &ctx,
        );

        assert_eq!(ids(&ranked), vec!["b", "a"]);
        assert!((ranked[0].score - 0.9).abs() < EPS);
        assert!((ranked[1].score - 0.3).abs() < EPS);
    }

    #[test]
    fn test_reason_tags() {
        let ctx = RankContext::new(["minimal"], Season::Winter);
        let ranked = rank_outfits(
            vec![Outfit::new("a", "minimal"), Outfit::new("b", "classic")],
            &ctx,
        );

        assert_eq!(ranked[0].reasons, vec![Reason::MatchArchetype, Reason::SeasonBaseline]);
        assert_eq!(ranked[1].reasons, vec![Reason::MismatchArchetype, Reason::SeasonBaseline]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ctx = RankContext::new(["classic"], Season::Summer);
        let outfits = vec![
            Outfit::new("1", "boho"),
            Outfit::new("2", "classic"),
            Outfit::new("3", "street"),
            Outfit::new("4", "classic"),
            Outfit::new("5", "minimal"),
        ];

        let ranked = rank_outfits(outfits, &ctx);
        assert_eq!(ids(&ranked), vec!["2", "4", "1", "3", "5"]);
    }

    #[test]
    fn test_default_signals_ignore_season_and_recency() {
        let ctx = RankContext::new(["classic"], Season::Summer).with_recent_types(["classic"]);
        let winter = Outfit::new("w", "classic").with_season(Season::Winter);
        let summer = Outfit::new("s", "classic").with_season(Season::Summer);

        let ranked = rank_outfits(vec![winter, summer], &ctx);
        assert_eq!(ids(&ranked), vec!["w", "s"]);
        assert_eq!(ranked[0].score, ranked[1].score);
    }

    #[test]
    fn test_empty_input() {
        let ctx = RankContext::new(Vec::<String>::new(), Season::Spring);
        assert!(rank_outfits(Vec::new(), &ctx).is_empty());
    }

    #[test]
    fn test_seasonal_fit_signal() {
        let ctx = RankContext::new(Vec::<String>::new(), Season::Winter);
        let signal = SeasonalFit;

        let same = Outfit::new("a", "x").with_season(Season::Winter);
        let adjacent = Outfit::new("b", "x").with_season(Season::Autumn);
        let off = Outfit::new("c", "x").with_season(Season::Summer);
        let undeclared = Outfit::new("d", "x");
        let all_season = Outfit::new("e", "x").with_tags(["all-season"]);

        assert_eq!(signal.evaluate(&same, &ctx).value, 1.0);
        assert_eq!(signal.evaluate(&adjacent, &ctx).value, 0.6);
        assert_eq!(signal.evaluate(&off, &ctx).value, 0.3);
        assert_eq!(signal.evaluate(&undeclared, &ctx).value, 0.8);
        assert_eq!(signal.evaluate(&all_season, &ctx).value, 0.9);
        assert_eq!(signal.evaluate(&off, &ctx).reason, Some(Reason::SeasonOff));
    }

    #[test]
    fn test_seasonal_fit_checks_products_of_undeclared_outfits() {
        use crate::models::Product;

        let ctx = RankContext::new(Vec::<String>::new(), Season::Summer);
        let coat = Product::new("coat", "Wool Coat").with_seasons(vec![Season::Winter]);
        let tee = Product::new("tee", "Tee");

        let wearable = Outfit::new("a", "x").with_products(vec![tee.clone()]);
        let off = Outfit::new("b", "x").with_products(vec![tee, coat]);

        assert_eq!(SeasonalFit.evaluate(&wearable, &ctx).value, 0.8);
        assert_eq!(
            SeasonalFit.evaluate(&off, &ctx),
            SignalValue::new(0.3, Some(Reason::SeasonOff))
        );
    }

    #[test]
    fn test_pluggable_signals_change_order_not_contract() {
        let ctx = RankContext::new(["classic"], Season::Summer).with_recent_types(["boho"]);
        let ranker = OutfitRanker::default()
            .with_season_signal(SeasonalFit)
            .with_recency_signal(Freshness);

        let outfits = vec![
            Outfit::new("winter-classic", "classic").with_season(Season::Winter),
            Outfit::new("summer-classic", "classic").with_season(Season::Summer),
            Outfit::new("summer-boho", "boho").with_season(Season::Summer),
        ];

        let ranked = ranker.rank(outfits, &ctx);
        assert_eq!(ids(&ranked), vec!["summer-classic", "winter-classic", "summer-boho"]);
        // 0.6 + 0.3 * 1.0 + 0.1 * 1.0
        assert!((ranked[0].score - 1.0).abs() < EPS);
        assert_eq!(
            ranked[2].reasons,
            vec![Reason::MismatchArchetype, Reason::SeasonMatch, Reason::RecentRepeat]
        );
    }

    #[test]
    fn test_contextual_signal_set() {
        let ctx = RankContext::new(["classic"], Season::Summer).with_recent_types(["classic"]);
        let outfit = Outfit::new("a", "classic").with_season(Season::Summer);

        let baseline = OutfitRanker::with_signal_set(RankWeights::default(), SignalSet::Baseline);
        let contextual = OutfitRanker::with_signal_set(RankWeights::default(), SignalSet::Contextual);

        assert_eq!(
            baseline.score(&outfit, &ctx).1,
            vec![Reason::MatchArchetype, Reason::SeasonBaseline]
        );
        assert_eq!(
            contextual.score(&outfit, &ctx).1,
            vec![Reason::MatchArchetype, Reason::SeasonMatch, Reason::RecentRepeat]
        );
    }

    #[test]
    fn test_custom_weights() {
        let ctx = RankContext::new(["classic"], Season::Summer);
        let ranker = OutfitRanker::new(RankWeights {
            archetype: 1.0,
            season: 0.0,
            recency: 0.0,
        });
        let ranked = ranker.rank(vec![Outfit::new("a", "classic")], &ctx);
        assert_eq!(ranked[0].score, 1.0);
    }
}
