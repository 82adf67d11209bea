//! Place names mentioned in generated itineraries

use once_cell::sync::Lazy;
use regex::Regex;

/// A capitalised phrase after "visit", "explore", "see" or "go to". Short
/// lowercase connectors are allowed between capitalised words.
static PLACE_AFTER_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?i:visit|explore|see|go to)[ \t]+(\p{Lu}[\w'-]*(?:[ \t]+(?:(?:of|de|del|la|le|du|di)[ \t]+)?\p{Lu}[\w'-]*)*)",
    )
    .expect("valid place pattern")
});

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Extract candidate place names from itinerary text
///
/// Phrases whose first word is a stop word are dropped. Duplicates are
/// removed, keeping the first occurrence.
pub fn extract_locations(itinerary: &str) -> Vec<String> {
    let mut locations: Vec<String> = Vec::new();
    for caps in PLACE_AFTER_VERB.captures_iter(itinerary) {
        let phrase = caps[1].trim();
        let starts_with_stop_word = phrase
            .split_whitespace()
            .next()
            .is_some_and(|first| STOP_WORDS.contains(&first.to_lowercase().as_str()));
        if starts_with_stop_word || locations.iter().any(|l| l == phrase) {
            continue;
        }
        locations.push(phrase.to_string());
    }
    locations
}
