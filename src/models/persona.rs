use serde::Serialize;

/// A static, keyword-driven style persona
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub key_items: &'static [&'static str],
    pub palette: &'static [&'static str],
}

/// Process-wide persona table. The first entry is the fallback persona.
pub static PERSONAS: [Persona; 6] = [
    Persona {
        id: "minimalist",
        name: "The Minimalist",
        keywords: &["minimal", "clean", "essential", "monochrome"],
        key_items: &["white tee", "tailored trousers", "wool coat", "loafer"],
        palette: &["black", "white", "grey", "navy", "beige"],
    },
    Persona {
        id: "classic",
        name: "The Classic",
        keywords: &["classic", "timeless", "elegant", "tailored"],
        key_items: &["blazer", "oxford shirt", "trench coat", "chino"],
        palette: &["navy", "camel", "white", "burgundy"],
    },
    Persona {
        id: "smart-casual",
        name: "The Smart Casual",
        keywords: &["smart", "casual", "relaxed", "versatile"],
        key_items: &["polo", "dark jeans", "knit", "sneaker"],
        palette: &["navy", "olive", "stone", "white"],
    },
    Persona {
        id: "streetwear",
        name: "The Streetwear Fan",
        keywords: &["street", "urban", "oversized", "graphic"],
        key_items: &["hoodie", "cargo", "bomber", "high-top"],
        palette: &["black", "grey", "orange", "olive"],
    },
    Persona {
        id: "athletic",
        name: "The Athleisure Lover",
        keywords: &["sport", "athletic", "active", "technical"],
        key_items: &["jogger", "track jacket", "running shoe", "legging"],
        palette: &["black", "grey", "cobalt", "white"],
    },
    Persona {
        id: "romantic",
        name: "The Romantic",
        keywords: &["romantic", "feminine", "soft", "boho"],
        key_items: &["midi dress", "blouse", "cardigan", "ballet flat"],
        palette: &["blush", "cream", "lavender", "sage"],
    },
];

/// Looks a persona up by id (case-insensitive)
pub fn find_persona(id: &str) -> Option<&'static Persona> {
    let id = id.trim();
    PERSONAS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// The persona used when an id does not resolve
pub fn default_persona() -> &'static Persona {
    &PERSONAS[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_persona_ids_are_unique() {
        let ids: HashSet<&str> = PERSONAS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PERSONAS.len());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for persona in PERSONAS.iter() {
            for word in persona.keywords.iter().chain(persona.key_items) {
                assert_eq!(*word, word.to_lowercase(), "{} has mixed-case entry", persona.id);
            }
        }
    }

    #[test]
    fn test_find_persona() {
        assert_eq!(find_persona("Classic").map(|p| p.id), Some("classic"));
        assert!(find_persona("nonexistent-id").is_none());
        assert_eq!(default_persona().id, PERSONAS[0].id);
    }
}
