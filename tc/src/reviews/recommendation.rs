//! Headline recommendation shown alongside an analysis

use serde::Serialize;

use super::types::SentimentPercentages;

/// Verdict derived from the rounded sentiment percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    HighlyRecommended,
    GenerallyGood,
    MixedReviews,
    BalancedFeedback,
}

impl Recommendation {
    pub fn from_percentages(pct: &SentimentPercentages) -> Self {
        if pct.positive > 70.0 {
            Self::HighlyRecommended
        } else if pct.positive > 50.0 {
            Self::GenerallyGood
        } else if pct.negative > 50.0 {
            Self::MixedReviews
        } else {
            Self::BalancedFeedback
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended!",
            Self::GenerallyGood => "Generally Good",
            Self::MixedReviews => "Mixed Reviews",
            Self::BalancedFeedback => "Balanced Feedback",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::HighlyRecommended => "This destination receives overwhelmingly positive reviews.",
            Self::GenerallyGood => "Most visitors have positive experiences.",
            Self::MixedReviews => "Consider reading detailed feedback before visiting.",
            Self::BalancedFeedback => "Reviews show varied experiences.",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighlyRecommended => write!(f, "{} {}", self.title(), self.message()),
            _ => write!(f, "{} - {}", self.title(), self.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(positive: f64, negative: f64) -> SentimentPercentages {
        SentimentPercentages {
            positive,
            neutral: 100.0 - positive - negative,
            negative,
        }
    }

    #[test]
    fn test_from_percentages() {
        assert_eq!(Recommendation::from_percentages(&pct(80.0, 10.0)), Recommendation::HighlyRecommended);
        assert_eq!(Recommendation::from_percentages(&pct(70.0, 10.0)), Recommendation::GenerallyGood);
        assert_eq!(Recommendation::from_percentages(&pct(20.0, 60.0)), Recommendation::MixedReviews);
        assert_eq!(Recommendation::from_percentages(&pct(40.0, 40.0)), Recommendation::BalancedFeedback);
        assert_eq!(
            Recommendation::from_percentages(&SentimentPercentages::default()),
            Recommendation::BalancedFeedback
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Recommendation::HighlyRecommended.to_string(),
            "Highly Recommended! This destination receives overwhelmingly positive reviews."
        );
        assert_eq!(
            Recommendation::MixedReviews.to_string(),
            "Mixed Reviews - Consider reading detailed feedback before visiting."
        );
    }
}
