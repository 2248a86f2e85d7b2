use serde::Deserialize;

use crate::models::Tone;
use crate::services::persona_score::ColorRule;
use crate::services::ranking::{RankWeights, SignalSet};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL catalog connection URL; the in-memory catalog is used when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL; tones are kept in memory when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum ranked outfits sharing one archetype
    #[serde(default = "default_diversity_cap")]
    pub diversity_cap: usize,

    /// Denominator used when turning a match score into a percentage
    #[serde(default = "default_max_match_score")]
    pub max_match_score: f64,

    #[serde(default = "default_weight_archetype")]
    pub weight_archetype: f64,

    #[serde(default = "default_weight_season")]
    pub weight_season: f64,

    #[serde(default = "default_weight_recency")]
    pub weight_recency: f64,

    /// Season and recency signals: `baseline` or `contextual`
    #[serde(default)]
    pub rank_signals: SignalSet,

    /// Persona color bonus rule: `neutral` or `palette`
    #[serde(default)]
    pub color_rule: ColorRule,

    /// TTL for cached catalog reads, in seconds
    #[serde(default = "default_catalog_cache_ttl_secs")]
    pub catalog_cache_ttl_secs: u64,

    /// TTL for persisted tone settings, in seconds
    #[serde(default = "default_tone_ttl_secs")]
    pub tone_ttl_secs: u64,

    /// Tone used for users without a stored setting
    #[serde(default)]
    pub default_tone: Tone,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_diversity_cap() -> usize {
    3
}

fn default_max_match_score() -> f64 {
    10.0
}

fn default_weight_archetype() -> f64 {
    0.6
}

fn default_weight_season() -> f64 {
    0.3
}

fn default_weight_recency() -> f64 {
    0.1
}

fn default_catalog_cache_ttl_secs() -> u64 {
    300
}

fn default_tone_ttl_secs() -> u64 {
    60 * 60 * 24 * 30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            redis_url: None,
            host: default_host(),
            port: default_port(),
            diversity_cap: default_diversity_cap(),
            max_match_score: default_max_match_score(),
            weight_archetype: default_weight_archetype(),
            weight_season: default_weight_season(),
            weight_recency: default_weight_recency(),
            rank_signals: SignalSet::default(),
            color_rule: ColorRule::default(),
            catalog_cache_ttl_secs: default_catalog_cache_ttl_secs(),
            tone_ttl_secs: default_tone_ttl_secs(),
            default_tone: Tone::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the engine cannot rank with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.diversity_cap == 0 {
            anyhow::bail!("DIVERSITY_CAP must be at least 1");
        }
        if !self.max_match_score.is_finite() || self.max_match_score <= 0.0 {
            anyhow::bail!("MAX_MATCH_SCORE must be a positive number");
        }
        self.rank_weights()
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid ranking weights: {}", e))
    }

    pub fn rank_weights(&self) -> RankWeights {
        RankWeights {
            archetype: self.weight_archetype,
            season: self.weight_season,
            recency: self.weight_recency,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
