use serde::{Deserialize, Serialize};

use crate::models::{
    persona::{default_persona, find_persona},
    Persona, Product,
};

const KEYWORD_POINTS: u32 = 20;
const KEY_ITEM_POINTS: u32 = 15;
const COLOR_POINTS: u32 = 10;

/// Colors the neutral-color rule treats as matching every persona
pub const NEUTRAL_COLORS: [&str; 3] = ["navy", "black", "grey"];

/// How the one-off color bonus is decided
///
/// `Neutral` is the production rule: it checks a fixed set of neutral colors
/// and ignores the persona's declared palette. `Palette` compares against
/// `persona.palette` instead and is not used unless chosen explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRule {
    #[default]
    Neutral,
    Palette,
}

impl ColorRule {
    /// Whether the product color earns the color bonus for this persona
    pub fn matches(self, color: Option<&str>, persona: &Persona) -> bool {
        let Some(color) = color else {
            return false;
        };
        let color = color.to_lowercase();
        match self {
            ColorRule::Neutral => NEUTRAL_COLORS.iter().any(|c| color.contains(c)),
            ColorRule::Palette => persona.palette.iter().any(|c| color.contains(c)),
        }
    }
}

/// How the requested persona id was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonaResolution {
    Resolved,
    /// The id was unknown and the catalog's first persona was used
    FellBackToDefault { requested: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaScore {
    pub score: u8,
    pub persona_id: &'static str,
    pub resolution: PersonaResolution,
}

impl PersonaScore {
    pub fn fell_back(&self) -> bool {
        matches!(self.resolution, PersonaResolution::FellBackToDefault { .. })
    }
}

/// Scores a product's fit with a persona on a 0-100 scale
///
/// Unknown persona ids fall back to the first catalog persona; the fallback
/// is reported in the returned [`PersonaResolution`] and logged.
pub fn score_for_persona(product: &Product, persona_id: &str, color_rule: ColorRule) -> PersonaScore {
    let (persona, resolution) = match find_persona(persona_id) {
        Some(persona) => (persona, PersonaResolution::Resolved),
        None => {
            let fallback = default_persona();
            tracing::warn!(
                requested = persona_id,
                fallback = fallback.id,
                "Unknown persona id, scoring against default persona"
            );
            (
                fallback,
                PersonaResolution::FellBackToDefault {
                    requested: persona_id.to_string(),
                },
            )
        }
    };

    PersonaScore {
        score: persona_affinity(product, persona, color_rule),
        persona_id: persona.id,
        resolution,
    }
}

/// 0-100 affinity between a product and a persona, using the neutral-color rule
pub fn score_product_for_persona(product: &Product, persona_id: &str) -> u8 {
    score_for_persona(product, persona_id, ColorRule::Neutral).score
}

/// Additive persona rules, clamped to 100
pub fn persona_affinity(product: &Product, persona: &Persona, color_rule: ColorRule) -> u8 {
    let haystacks: Vec<String> = std::iter::once(product.name.to_lowercase())
        .chain(product.style_tags.iter().map(|t| t.to_lowercase()))
        .collect();
    let appears = |needle: &str| haystacks.iter().any(|h| h.contains(needle));

    let keyword_hits = persona.keywords.iter().filter(|k| appears(k)).count() as u32;
    let key_item_hits = persona.key_items.iter().filter(|k| appears(k)).count() as u32;

    let mut total = keyword_hits * KEYWORD_POINTS + key_item_hits * KEY_ITEM_POINTS;
    if color_rule.matches(product.color.as_deref(), persona) {
        total += COLOR_POINTS;
    }

    total.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::persona::PERSONAS;

    fn minimalist() -> &'static Persona {
        find_persona("minimalist").unwrap()
    }

    #[test]
    fn test_keyword_hits_in_name_and_tags() {
        // "minimal" in the name, "clean" in a tag
        let product = Product::new("p1", "Minimal Crew Tee").with_tags(["Clean"]);
        assert_eq!(score_product_for_persona(&product, "minimalist"), 40);
    }

    #[test]
    fn test_key_item_hits() {
        let product = Product::new("p1", "Double-Breasted Wool Coat");
        assert_eq!(persona_affinity(&product, minimalist(), ColorRule::Neutral), 15);
    }

    #[test]
    fn test_neutral_color_bonus_applies_once() {
        let product = Product::new("p1", "Plain Socks").with_color("Navy / Black / Grey");
        assert_eq!(score_product_for_persona(&product, "romantic"), 10);
    }

    #[test]
    fn test_neutral_rule_ignores_palette() {
        // Blush is on the romantic palette but is not a neutral
        let product = Product::new("p1", "Plain Socks").with_color("blush");
        let romantic = find_persona("romantic").unwrap();
        assert_eq!(persona_affinity(&product, romantic, ColorRule::Neutral), 0);
        assert_eq!(persona_affinity(&product, romantic, ColorRule::Palette), 10);
    }

    #[test]
    fn test_score_is_clamped_to_100() {
        let product = Product::new("p1", "Minimal clean essential monochrome white tee")
            .with_tags(["tailored trousers", "wool coat", "loafer"])
            .with_color("black");
        assert_eq!(score_product_for_persona(&product, "minimalist"), 100);
    }

    #[test]
    fn test_unknown_persona_matches_first_entry() {
        let products = vec![
            Product::new("p1", "Minimal Tee").with_color("grey"),
            Product::new("p2", "Graphic Hoodie").with_tags(["street"]),
            Product::new("p3", "Wool Coat").with_tags(["clean", "essential"]),
        ];

        for product in &products {
            assert_eq!(
                score_product_for_persona(product, "nonexistent-id"),
                score_product_for_persona(product, PERSONAS[0].id)
            );
        }
    }

    #[test]
    fn test_fallback_is_observable() {
        let product = Product::new("p1", "Minimal Tee");

        let fallback = score_for_persona(&product, "nonexistent-id", ColorRule::Neutral);
        assert!(fallback.fell_back());
        assert_eq!(fallback.persona_id, PERSONAS[0].id);
        assert_eq!(
            fallback.resolution,
            PersonaResolution::FellBackToDefault {
                requested: "nonexistent-id".to_string()
            }
        );

        let resolved = score_for_persona(&product, "streetwear", ColorRule::Neutral);
        assert!(!resolved.fell_back());
        assert_eq!(resolved.persona_id, "streetwear");
    }

    #[test]
    fn test_product_without_signals_scores_zero() {
        let product = Product::new("p1", "Umbrella");
        for persona in PERSONAS.iter() {
            assert_eq!(persona_affinity(&product, persona, ColorRule::Neutral), 0);
        }
    }
}
