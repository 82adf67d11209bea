//! Terminal rendering of analysis results

use colored::Colorize;

use crate::reviews::{AnalysisResult, Recommendation, ReviewReport, SentimentLabel};

/// Width of a 100% bar
const BAR_WIDTH: f64 = 40.0;

/// Render an analysis for the terminal
pub fn analysis_text(result: &AnalysisResult) -> String {
    match result {
        AnalysisResult::Error { error } => format!("{} {}\n", "Error:".red().bold(), error),
        AnalysisResult::Report(report) => report_text(report),
    }
}

fn report_text(report: &ReviewReport) -> String {
    let pct = &report.sentiment_percentages;
    let dist = &report.sentiment_distribution;
    let mut lines = vec![
        format!("{}", "Review Analysis".bright_cyan().bold()),
        format!("  Total reviews: {}", report.total_reviews),
        String::new(),
    ];

    for label in [SentimentLabel::Positive, SentimentLabel::Neutral, SentimentLabel::Negative] {
        let share = pct.get(label);
        let bar = "\u{2588}".repeat((share / 100.0 * BAR_WIDTH).round() as usize);
        let bar = match label {
            SentimentLabel::Positive => bar.green(),
            SentimentLabel::Neutral => bar.yellow(),
            SentimentLabel::Negative => bar.red(),
        };
        lines.push(format!(
            "  {:<9} {:>5.1}% ({:>3}) {}",
            format!("{}:", label),
            share,
            dist.get(label),
            bar
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Key Insights".bright_cyan().bold()));
    if report.insights.is_empty() {
        lines.push(format!("  {}", "No insights available.".dimmed()));
    }
    for (i, insight) in report.insights.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, insight));
    }

    let recommendation = Recommendation::from_percentages(pct);
    let title = match recommendation {
        Recommendation::HighlyRecommended | Recommendation::GenerallyGood => recommendation.title().green().bold(),
        Recommendation::MixedReviews => recommendation.title().red().bold(),
        Recommendation::BalancedFeedback => recommendation.title().yellow().bold(),
    };
    lines.push(String::new());
    lines.push(format!("{} {}", title, recommendation.message()));

    if report.fallback_calls > 0 {
        lines.push(format!(
            "{}",
            format!(
                "({} model call(s) failed; default values were used)",
                report.fallback_calls
            )
            .dimmed()
        ));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviews::{SentimentDistribution, SentimentPercentages};

    fn report(fallback_calls: usize) -> AnalysisResult {
        AnalysisResult::Report(ReviewReport {
            total_reviews: 2,
            sentiment_distribution: SentimentDistribution {
                positive: 1,
                neutral: 0,
                negative: 1,
            },
            sentiment_percentages: SentimentPercentages {
                positive: 50.0,
                neutral: 0.0,
                negative: 50.0,
            },
            insights: vec!["Mixed reviews with varied visitor experiences".to_string()],
            fallback_calls,
        })
    }

    #[test]
    fn test_report_text() {
        colored::control::set_override(false);
        let text = analysis_text(&report(0));

        assert!(text.starts_with("Review Analysis\n  Total reviews: 2\n"));
        assert!(text.contains(&format!("  Positive:  50.0% (  1) {}", "\u{2588}".repeat(20))));
        assert!(text.contains("  Neutral:    0.0% (  0) \n"));
        assert!(text.contains("  1. Mixed reviews with varied visitor experiences"));
        assert!(text.contains("Balanced Feedback Reviews show varied experiences."));
        assert!(!text.contains("model call"));
    }

    #[test]
    fn test_report_text_mentions_fallbacks() {
        colored::control::set_override(false);
        assert!(analysis_text(&report(3)).contains("(3 model call(s) failed; default values were used)"));
    }

    #[test]
    fn test_error_text() {
        colored::control::set_override(false);
        assert_eq!(
            analysis_text(&AnalysisResult::error("No valid reviews found")),
            "Error: No valid reviews found\n"
        );
    }
}
