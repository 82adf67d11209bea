//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{LlmConfig, WeatherConfig};

/// Trip Companion - travel planning with LLM-backed review analytics
#[derive(Parser)]
#[command(
    name = "tc",
    about = "Travel planning assistant with LLM-backed review analytics",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze traveler reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommand,
    },

    /// Generate a day-by-day itinerary
    Itinerary {
        /// City or country to visit
        #[arg(short, long)]
        destination: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(short, long)]
        start: NaiveDate,

        /// Last day of the trip (YYYY-MM-DD)
        #[arg(short, long)]
        end: NaiveDate,

        /// Daily budget range (budget, mid-range, luxury)
        #[arg(short, long, default_value = "mid-range")]
        budget: BudgetRange,

        /// Who is travelling
        #[arg(short, long, default_value = "Solo Traveler")]
        traveler: String,

        /// Interests, repeat for more than one
        #[arg(short, long = "interest")]
        interests: Vec<String>,

        /// Include a weather forecast in the prompt
        #[arg(short, long)]
        weather: bool,

        /// Also write the itinerary as Markdown to this path (a directory gets a generated file name)
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// Recommend restaurants
    Restaurants {
        #[arg(short, long)]
        destination: String,

        /// Preferred cuisines, free text
        #[arg(short = 'k', long)]
        cuisine: Option<String>,
    },

    /// Recommend attractions matching interests
    Attractions {
        #[arg(short, long)]
        destination: String,

        /// Interests, repeat for more than one
        #[arg(short, long = "interest", required = true)]
        interests: Vec<String>,
    },

    /// Practical travel tips
    Tips {
        #[arg(short, long)]
        destination: String,
    },

    /// Show the weather forecast
    Weather {
        #[arg(short, long)]
        destination: String,

        /// Number of days (1-5, default from config)
        #[arg(short = 'n', long)]
        days: Option<u32>,
    },

    /// Look up coordinates for places
    Geocode {
        /// Place names
        #[arg(required = true)]
        locations: Vec<String>,

        /// Skip the geocoding service and use the built-in table only
        #[arg(long)]
        offline: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Review subcommands
#[derive(Debug, Subcommand)]
pub enum ReviewsCommand {
    /// Classify reviews and summarize sentiment
    Analyze {
        /// File with reviews, or - for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Also write a Markdown report to this path
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// Show how the input is split into reviews, without calling the model
    Split {
        /// File with reviews, or - for stdin
        #[arg(default_value = "-")]
        input: String,
    },
}

/// Daily budget bands offered to the itinerary prompt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BudgetRange {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl BudgetRange {
    /// Label used in the itinerary prompt
    pub fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget ($0-50/day)",
            Self::MidRange => "Mid-range ($50-150/day)",
            Self::Luxury => "Luxury ($150+/day)",
        }
    }
}

impl std::str::FromStr for BudgetRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "BudgetRange::from_str: called");
        match s.to_lowercase().as_str() {
            "budget" | "low" => Ok(Self::Budget),
            "mid-range" | "midrange" | "mid" => Ok(Self::MidRange),
            "luxury" | "high" => Ok(Self::Luxury),
            _ => Err(format!("Unknown budget: {}. Use: budget, mid-range, or luxury", s)),
        }
    }
}

/// Output format for analysis results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text, json, or markdown", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripcompanion")
        .join("logs")
        .join("tripcompanion.log")
}

/// Generate the after_help text with API key status and the log location
///
/// Only the default environment variables are checked; a config file may
/// point elsewhere.
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let icon = |ok: bool| if ok { "\u{2705}" } else { "\u{274C}" };

    let llm_key = LlmConfig::default().get_api_key().is_ok();
    let weather_key = WeatherConfig::default().api_key().is_some();

    let mut help = String::new();
    help.push_str("API Keys:\n");
    help.push_str(&format!("  {} {:<10} {}\n", icon(llm_key), "gemini", "GEMINI_API_KEY"));
    help.push_str(&format!(
        "  {} {:<10} {} (optional)\n",
        icon(weather_key),
        "weather",
        "OPENWEATHER_API_KEY"
    ));

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}
