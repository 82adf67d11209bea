//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Single-review sentiment classification prompt
pub const SENTIMENT: &str = include_str!("../../prompts/sentiment.pmt");

/// Whole-corpus review insight prompt
pub const INSIGHTS: &str = include_str!("../../prompts/insights.pmt");

/// Day-by-day itinerary prompt
pub const ITINERARY: &str = include_str!("../../prompts/itinerary.pmt");

/// Restaurant recommendation prompt
pub const RESTAURANTS: &str = include_str!("../../prompts/restaurants.pmt");

/// Attraction recommendation prompt
pub const ATTRACTIONS: &str = include_str!("../../prompts/attractions.pmt");

/// Destination travel tips prompt
pub const TIPS: &str = include_str!("../../prompts/tips.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "sentiment" => Some(SENTIMENT),
        "insights" => Some(INSIGHTS),
        "itinerary" => Some(ITINERARY),
        "restaurants" => Some(RESTAURANTS),
        "attractions" => Some(ATTRACTIONS),
        "tips" => Some(TIPS),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
