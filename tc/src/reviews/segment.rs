//! Review segmentation
//!
//! Splits pasted review text into individual reviews. Strategies are tried in
//! a fixed order and the first one producing at least two non-empty pieces
//! wins; they are never combined.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Two or more line breaks, allowing whitespace-only lines between them
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("valid blank-line pattern"));

/// `1.` / `12.` anywhere in the text, trailing whitespace included
static ENUMERATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s*").expect("valid enumeration pattern"));

/// `Review`, `review:`, `REVIEW :` ... anywhere, including inside words
static REVIEW_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)review\s*:?\s*").expect("valid review-label pattern"));

/// Which heuristic produced a segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStrategy {
    BlankLines,
    Enumeration,
    ReviewLabel,
    Whole,
}

/// Split raw text into trimmed, non-empty review candidates
///
/// Returns an empty vector only when the input is blank.
pub fn segment(text: &str) -> Vec<String> {
    segment_with_strategy(text).0
}

/// Like [`segment`], also reporting which strategy was used
pub fn segment_with_strategy(text: &str) -> (Vec<String>, SegmentStrategy) {
    debug!(text_len = text.len(), "segment: called");

    let strategies: [(SegmentStrategy, fn(&str) -> Vec<String>); 3] = [
        (SegmentStrategy::BlankLines, split_blank_lines),
        (SegmentStrategy::Enumeration, split_enumeration),
        (SegmentStrategy::ReviewLabel, split_review_label),
    ];

    for (strategy, split) in strategies {
        let pieces = split(text);
        if pieces.len() > 1 {
            debug!(?strategy, count = pieces.len(), "segment: strategy matched");
            return (pieces, strategy);
        }
    }

    let trimmed = text.trim();
    let whole = if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    };
    debug!(count = whole.len(), "segment: falling back to whole text");
    (whole, SegmentStrategy::Whole)
}

fn split_blank_lines(text: &str) -> Vec<String> {
    clean(BLANK_LINE.split(text))
}

/// Enumeration markers followed directly by a digit are decimals ("4.5 stars")
/// and do not start a new review.
fn split_enumeration(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in ENUMERATION.find_iter(text) {
        let dot_end = m.start() + m.as_str().trim_end().len();
        let followed_by_digit = text[dot_end..].chars().next().is_some_and(|c| c.is_ascii_digit());
        if followed_by_digit {
            continue;
        }
        pieces.push(&text[start..m.start()]);
        start = m.end();
    }
    pieces.push(&text[start..]);
    clean(pieces)
}

fn split_review_label(text: &str) -> Vec<String> {
    clean(REVIEW_LABEL.split(text))
}

fn clean<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
