//! Short titles and descriptions explaining why an outfit was suggested.
//!
//! Copy is chosen from three fixed templates per function, selected by
//! [`Tone`]. The tone is always passed in; looking up a user's stored tone
//! happens at the HTTP layer. Output is deterministic for the same inputs.

use serde::{Deserialize, Serialize};

use crate::models::{Product, Season, Tone};

/// Products named in a description before the rest are left out
const MAX_LISTED_PRODUCTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleInput<'a> {
    pub archetype: &'a str,
    /// Key piece the look is built around
    pub key: Option<&'a str>,
    pub season: Option<Season>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescInput<'a> {
    pub archetype: &'a str,
    pub products: &'a [Product],
    pub season: Option<Season>,
    pub occasion: Option<&'a str>,
    /// Secondary archetype mixed into the look
    pub secondary: Option<&'a str>,
}

pub fn title_for(input: &TitleInput<'_>, tone: Tone) -> String {
    let archetype = humanize(input.archetype);
    let key = input.key.map(str::trim).filter(|k| !k.is_empty());

    match tone {
        Tone::Minimal => {
            let mut title = format!("{} look", archetype);
            if let Some(key) = key {
                title.push_str(&format!(" with {}", key.to_lowercase()));
            }
            if let Some(season) = input.season {
                title.push_str(&format!(", {}", season));
            }
            title
        }
        Tone::Editorial => {
            let mut title = format!("The {} Edit", archetype);
            if let Some(key) = key {
                title.push_str(&format!(": {}", title_case(key)));
            }
            if let Some(season) = input.season {
                title.push_str(&format!(" for {}", title_case(season.as_str())));
            }
            title
        }
        Tone::Playful => {
            let mut title = format!("{} mood", archetype);
            if let Some(key) = key {
                title.push_str(&format!(" starring the {}", key.to_lowercase()));
            }
            match input.season {
                Some(season) => title.push_str(&format!(" this {}!", season)),
                None => title.push('!'),
            }
            title
        }
    }
}

pub fn desc_for(input: &DescInput<'_>, tone: Tone) -> String {
    let archetype = humanize(input.archetype).to_lowercase();
    let pieces = list_products(input.products);
    let secondary = input
        .secondary
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| humanize(s).to_lowercase());
    let occasion = input.occasion.map(str::trim).filter(|o| !o.is_empty());

    let mut desc = match tone {
        Tone::Minimal => {
            let mut s = format!("{}. A {} look", capitalize(&pieces), archetype);
            if let Some(secondary) = &secondary {
                s.push_str(&format!(" with a {} edge", secondary));
            }
            s.push('.');
            s
        }
        Tone::Editorial => {
            let mut s = format!("A considered {} composition built around {}", archetype, pieces);
            if let Some(secondary) = &secondary {
                s.push_str(&format!(", with a hint of {}", secondary));
            }
            s.push('.');
            s
        }
        Tone::Playful => {
            // "a curated selection" and a single label read as singular
            let verb = if input.products.len() > 1 { "walk" } else { "walks" };
            let mut s = format!("{} {} into a {} party", capitalize(&pieces), verb, archetype);
            if let Some(secondary) = &secondary {
                s.push_str(&format!(" and {} crashes it", secondary));
            }
            s.push('!');
            s
        }
    };

    if let Some(season) = input.season {
        let clause = match tone {
            Tone::Minimal => format!(" Made for {}.", season),
            Tone::Editorial => format!(" Cut for the {} season.", season),
            Tone::Playful => format!(" Perfect {} energy.", season),
        };
        desc.push_str(&clause);
    }

    if let Some(occasion) = occasion {
        let clause = match tone {
            Tone::Minimal => format!(" Suits {}.", occasion),
            Tone::Editorial => format!(" Styled for {}.", occasion),
            Tone::Playful => format!(" Ready for {}!", occasion),
        };
        desc.push_str(&clause);
    }

    desc
}

/// Joins the first three product labels as "a", "a and b" or "a, b and c"
fn list_products(products: &[Product]) -> String {
    let labels: Vec<&str> = products
        .iter()
        .take(MAX_LISTED_PRODUCTS)
        .map(Product::display_label)
        .collect();

    match labels.as_slice() {
        [] => "a curated selection".to_string(),
        [only] => only.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// "smart_casual" -> "Smart casual"
fn humanize(label: &str) -> String {
    let spaced = label.trim().replace(['_', '-'], " ");
    capitalize(&spaced)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Context an outfit is suggested for when the caller gives none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    DailyCasual,
    WorkOffice,
    EveningSmart,
    WeekendRelaxed,
    DateNight,
    SpecialEvent,
    SportActive,
    TravelComfortable,
}

impl Occasion {
    /// Phrase used inside generated copy
    pub fn phrase(self) -> &'static str {
        match self {
            Occasion::DailyCasual => "everyday wear",
            Occasion::WorkOffice => "the office",
            Occasion::EveningSmart => "an evening out",
            Occasion::WeekendRelaxed => "a relaxed weekend",
            Occasion::DateNight => "date night",
            Occasion::SpecialEvent => "a special event",
            Occasion::SportActive => "an active day",
            Occasion::TravelComfortable => "travel",
        }
    }
}

fn occasion_preferences(archetype: &str) -> &'static [Occasion] {
    use Occasion::*;

    let archetype = archetype.to_lowercase();
    if archetype.contains("minimal") {
        &[WorkOffice, DailyCasual, EveningSmart, WeekendRelaxed]
    } else if archetype.contains("classic") {
        &[WorkOffice, SpecialEvent, EveningSmart, DailyCasual]
    } else if archetype.contains("smart") || archetype.contains("casual") {
        &[WorkOffice, WeekendRelaxed, EveningSmart, DailyCasual]
    } else if archetype.contains("street") {
        &[DailyCasual, WeekendRelaxed, EveningSmart, DateNight]
    } else if archetype.contains("athletic") || archetype.contains("sport") {
        &[SportActive, DailyCasual, WeekendRelaxed, TravelComfortable]
    } else if archetype.contains("avant") {
        &[EveningSmart, SpecialEvent, DateNight, DailyCasual]
    } else if archetype.contains("romantic") || archetype.contains("boho") {
        &[WeekendRelaxed, EveningSmart, DateNight, DailyCasual]
    } else if archetype.contains("chic") {
        &[EveningSmart, WorkOffice, SpecialEvent, DateNight]
    } else {
        &[DailyCasual, WorkOffice, EveningSmart, WeekendRelaxed]
    }
}

/// Occasion for the `index`-th outfit of an archetype, cycling its preferences
pub fn occasion_for(archetype: &str, index: usize) -> Occasion {
    let prefs = occasion_preferences(archetype);
    prefs[index % prefs.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(names: &[&str]) -> Vec<Product> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Product::new(format!("p{}", i), *name))
            .collect()
    }

    #[test]
    fn test_title_minimal() {
        let input = TitleInput {
            archetype: "minimal",
            key: Some("Wool Coat"),
            season: Some(Season::Winter),
        };
        assert_eq!(title_for(&input, Tone::Minimal), "Minimal look with wool coat, winter");
    }

    #[test]
    fn test_title_editorial() {
        let input = TitleInput {
            archetype: "smart_casual",
            key: Some("oxford shirt"),
            season: Some(Season::Spring),
        };
        assert_eq!(
            title_for(&input, Tone::Editorial),
            "The Smart casual Edit: Oxford Shirt for Spring"
        );
    }

    #[test]
    fn test_title_playful_without_optionals() {
        let input = TitleInput {
            archetype: "streetwear",
            key: None,
            season: None,
        };
        assert_eq!(title_for(&input, Tone::Playful), "Streetwear mood!");
    }

    #[test]
    fn test_title_ignores_blank_key() {
        let input = TitleInput {
            archetype: "classic",
            key: Some("  "),
            season: None,
        };
        assert_eq!(title_for(&input, Tone::Minimal), "Classic look");
    }

    #[test]
    fn test_desc_lists_first_three_products() {
        let items = products(&["Blazer", "Chinos", "Loafers", "Belt"]);
        let input = DescInput {
            archetype: "classic",
            products: &items,
            season: None,
            occasion: None,
            secondary: None,
        };
        assert_eq!(desc_for(&input, Tone::Minimal), "Blazer, Chinos and Loafers. A classic look.");
    }

    #[test]
    fn test_desc_two_products_and_category_fallback() {
        let items = vec![
            Product::new("p1", "Hoodie"),
            Product::new("p2", "").with_category("cargo pants"),
        ];
        let input = DescInput {
            archetype: "streetwear",
            products: &items,
            season: None,
            occasion: None,
            secondary: None,
        };
        assert_eq!(
            desc_for(&input, Tone::Editorial),
            "A considered streetwear composition built around Hoodie and cargo pants."
        );
    }

    #[test]
    fn test_desc_clauses_only_when_supplied() {
        let items = products(&["Midi Dress"]);
        let with_clauses = DescInput {
            archetype: "romantic",
            products: &items,
            season: Some(Season::Summer),
            occasion: Some("date night"),
            secondary: Some("boho"),
        };
        assert_eq!(
            desc_for(&with_clauses, Tone::Playful),
            "Midi Dress walks into a romantic party and boho crashes it! Perfect summer energy. Ready for date night!"
        );

        let without = DescInput {
            season: None,
            occasion: Some(""),
            secondary: None,
            ..with_clauses
        };
        assert_eq!(desc_for(&without, Tone::Playful), "Midi Dress walks into a romantic party!");
    }

    #[test]
    fn test_playful_verb_agrees_with_listed_products() {
        let pair = products(&["Hoodie", "Sneakers"]);
        let input = DescInput {
            archetype: "streetwear",
            products: &pair,
            season: None,
            occasion: None,
            secondary: None,
        };
        assert_eq!(
            desc_for(&input, Tone::Playful),
            "Hoodie and Sneakers walk into a streetwear party!"
        );

        let empty = DescInput { products: &[], ..input };
        assert_eq!(
            desc_for(&empty, Tone::Playful),
            "A curated selection walks into a streetwear party!"
        );
    }

    #[test]
    fn test_desc_each_tone_differs() {
        let items = products(&["Tee"]);
        let input = DescInput {
            archetype: "minimal",
            products: &items,
            season: Some(Season::Autumn),
            occasion: Some("the office"),
            secondary: None,
        };
        let minimal = desc_for(&input, Tone::Minimal);
        let editorial = desc_for(&input, Tone::Editorial);
        let playful = desc_for(&input, Tone::Playful);

        assert_eq!(minimal, "Tee. A minimal look. Made for autumn. Suits the office.");
        assert_eq!(
            editorial,
            "A considered minimal composition built around Tee. Cut for the autumn season. Styled for the office."
        );
        assert_ne!(minimal, playful);
    }

    #[test]
    fn test_desc_without_products() {
        let input = DescInput {
            archetype: "classic",
            products: &[],
            season: None,
            occasion: None,
            secondary: None,
        };
        assert_eq!(desc_for(&input, Tone::Minimal), "A curated selection. A classic look.");
    }

    #[test]
    fn test_output_is_deterministic() {
        let items = products(&["Blazer", "Chinos"]);
        let input = DescInput {
            archetype: "classic",
            products: &items,
            season: Some(Season::Winter),
            occasion: None,
            secondary: None,
        };
        for tone in [Tone::Minimal, Tone::Editorial, Tone::Playful] {
            assert_eq!(desc_for(&input, tone), desc_for(&input, tone));
        }
    }

    #[test]
    fn test_occasion_cycles_per_archetype() {
        assert_eq!(occasion_for("minimal", 0), Occasion::WorkOffice);
        assert_eq!(occasion_for("minimal", 1), Occasion::DailyCasual);
        assert_eq!(occasion_for("minimal", 4), Occasion::WorkOffice);
        assert_eq!(occasion_for("Athletic", 0), Occasion::SportActive);
        assert_eq!(occasion_for("unknown", 2), Occasion::EveningSmart);
    }
}
