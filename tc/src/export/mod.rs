//! Markdown export of itineraries and review analyses

mod markdown;

pub use markdown::{analysis_markdown, export_filename, itinerary_markdown};
