//! Markdown rendering

use chrono::NaiveDateTime;

use crate::reviews::{AnalysisResult, Recommendation, ReviewReport, SentimentLabel};

const TIMESTAMP_FORMAT: &str = "%B %d, %Y at %I:%M %p";

const ITINERARY_FOOTER: &str = "*This itinerary is AI-generated. Always verify opening hours, prices, and availability before your trip.*";

/// File name for an exported document: `Buenos_Aires_itinerary.md`
pub fn export_filename(destination: &str, kind: &str) -> String {
    format!("{}_{}.md", destination.trim().replace(' ', "_"), kind)
}

pub fn itinerary_markdown(itinerary: &str, destination: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "# Travel Itinerary: {}\n\n*Generated on {}*\n\n---\n\n{}\n\n---\n\n{}\n",
        destination.trim(),
        generated_at.format(TIMESTAMP_FORMAT),
        itinerary.trim(),
        ITINERARY_FOOTER
    )
}

/// Render an analysis as a Markdown report
///
/// The error variant renders only the error message.
pub fn analysis_markdown(result: &AnalysisResult, generated_at: NaiveDateTime) -> String {
    let mut out = format!(
        "# Review Analysis\n\n*Generated on {}*\n\n",
        generated_at.format(TIMESTAMP_FORMAT)
    );

    match result {
        AnalysisResult::Error { error } => out.push_str(&format!("**Error:** {}\n", error)),
        AnalysisResult::Report(report) => out.push_str(&report_markdown(report)),
    }
    out
}

fn report_markdown(report: &ReviewReport) -> String {
    let pct = &report.sentiment_percentages;
    let dist = &report.sentiment_distribution;
    let labels = [SentimentLabel::Positive, SentimentLabel::Neutral, SentimentLabel::Negative];

    let mut out = String::from("## Summary\n\n| Metric | Value |\n|--------|-------|\n");
    out.push_str(&format!("| Total Reviews | {} |\n", report.total_reviews));
    for label in labels {
        out.push_str(&format!("| {} | {:.1}% |\n", label, pct.get(label)));
    }

    out.push_str("\n## Sentiment Distribution\n\n");
    for label in labels {
        out.push_str(&format!("- **{}**: {} ({:.1}%)\n", label, dist.get(label), pct.get(label)));
    }

    out.push_str("\n## Key Insights\n\n");
    if report.insights.is_empty() {
        out.push_str("_No insights available._\n");
    }
    for (i, insight) in report.insights.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, insight));
    }

    let recommendation = Recommendation::from_percentages(pct);
    out.push_str("\n## Recommendation\n\n");
    out.push_str(&format!("**{}** {}\n", recommendation.title(), recommendation.message()));
    out
}
