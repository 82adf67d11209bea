//! Trip Companion - travel planning with LLM-backed review analytics
//!
//! CLI entry point.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::{debug, info, warn};

use tripcompanion::cli::{BudgetRange, Cli, Command, OutputFormat, ReviewsCommand, generate_after_help};
use tripcompanion::config::Config;
use tripcompanion::export::{analysis_markdown, export_filename, itinerary_markdown};
use tripcompanion::geo::{Geocoder, extract_locations, resolve_offline};
use tripcompanion::llm::{LlmClient, create_client};
use tripcompanion::planner::{Planner, TripRequest, split_days};
use tripcompanion::prompts::PromptLoader;
use tripcompanion::report::analysis_text;
use tripcompanion::reviews::{MIN_REVIEW_CHARS, ReviewAnalyzer, segment_with_strategy};
use tripcompanion::weather::WeatherService;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripcompanion")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("tripcompanion.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "Trip Companion loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Reviews { command } => match command {
            ReviewsCommand::Analyze { input, format, export } => {
                cmd_analyze(&config, &input, format, export.as_deref()).await
            }
            ReviewsCommand::Split { input } => cmd_split(&input),
        },
        Command::Itinerary {
            destination,
            start,
            end,
            budget,
            traveler,
            interests,
            weather,
            export,
        } => {
            let trip = TripArgs {
                destination,
                start,
                end,
                budget,
                traveler,
                interests,
                weather,
            };
            cmd_itinerary(&config, trip, export.as_deref()).await
        }
        Command::Restaurants { destination, cuisine } => {
            let planner = planner(&config)?;
            let text = planner.restaurants(&destination, cuisine.as_deref()).await?;
            print_section(&format!("Restaurants in {}", destination), &text);
            Ok(())
        }
        Command::Attractions { destination, interests } => {
            let planner = planner(&config)?;
            let text = planner.attractions(&destination, &interests).await?;
            print_section(&format!("Attractions in {}", destination), &text);
            Ok(())
        }
        Command::Tips { destination } => {
            let planner = planner(&config)?;
            let text = planner.tips(&destination).await?;
            print_section(&format!("Travel tips for {}", destination), &text);
            Ok(())
        }
        Command::Weather { destination, days } => cmd_weather(&config, &destination, days).await,
        Command::Geocode { locations, offline } => cmd_geocode(&config, &locations, offline).await,
        Command::Config => {
            print!("{}", serde_yaml::to_string(&config).context("Failed to serialize config")?);
            Ok(())
        }
    }
}

/// Itinerary arguments gathered from the command line
struct TripArgs {
    destination: String,
    start: NaiveDate,
    end: NaiveDate,
    budget: BudgetRange,
    traveler: String,
    interests: Vec<String>,
    weather: bool,
}

fn llm_client(config: &Config) -> Result<Arc<dyn LlmClient>> {
    config.validate()?;
    Ok(create_client(&config.llm)?)
}

fn prompt_loader(config: &Config) -> Arc<PromptLoader> {
    Arc::new(PromptLoader::new(&config.prompts.dir))
}

fn planner(config: &Config) -> Result<Planner> {
    Ok(Planner::new(llm_client(config)?, prompt_loader(config)))
}

/// Read review text from a file, or stdin for `-`
fn read_input(input: &str) -> Result<String> {
    debug!(%input, "read_input: called");
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read reviews from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(input).context(format!("Failed to read reviews from {}", input))
}

/// Write an export, choosing a file name when `path` is a directory
fn write_export(path: &Path, default_name: &str, content: &str) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(default_name)
    } else {
        path.to_path_buf()
    };
    fs::write(&target, content).context(format!("Failed to write {}", target.display()))?;
    info!(path = %target.display(), "Exported Markdown");
    Ok(target)
}

async fn cmd_analyze(config: &Config, input: &str, format: OutputFormat, export: Option<&Path>) -> Result<()> {
    debug!(%input, %format, "cmd_analyze: called");
    let text = read_input(input)?;
    let analyzer = ReviewAnalyzer::new(llm_client(config)?, prompt_loader(config));

    let result = analyzer.analyze_reviews(&text).await?;

    match format {
        // the error variant is reported once, on stderr, by the return below
        OutputFormat::Text if result.is_error() => {}
        OutputFormat::Text => print!("{}", analysis_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Markdown => print!("{}", analysis_markdown(&result, Local::now().naive_local())),
    }

    if let Some(path) = export {
        let markdown = analysis_markdown(&result, Local::now().naive_local());
        let written = write_export(path, &export_filename("review", "analysis"), &markdown)?;
        eprintln!("{} {}", "Exported:".green(), written.display());
    }

    if let Some(error) = result.error_message() {
        return Err(eyre!("{}", error));
    }
    Ok(())
}

fn cmd_split(input: &str) -> Result<()> {
    debug!(%input, "cmd_split: called");
    let text = read_input(input)?;
    let (segments, strategy) = segment_with_strategy(&text);

    if segments.is_empty() {
        println!("{}", "No reviews found".yellow());
        return Ok(());
    }

    println!("{} {} ({:?})", "Reviews:".bright_cyan().bold(), segments.len(), strategy);
    for (i, segment) in segments.iter().enumerate() {
        let chars = segment.chars().count();
        let note = if chars <= MIN_REVIEW_CHARS {
            " skipped, too short".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{} {} chars{}", format!("[{}]", i + 1).yellow(), chars, note);
        println!("  {}", segment.replace('\n', "\n  "));
    }
    Ok(())
}

async fn cmd_itinerary(config: &Config, trip: TripArgs, export: Option<&Path>) -> Result<()> {
    debug!(destination = %trip.destination, "cmd_itinerary: called");
    let planner = planner(config)?;

    let weather_info = if trip.weather {
        let service = WeatherService::from_config(&config.weather)?;
        match service.forecast(&trip.destination, config.weather.days).await {
            Ok(Some(forecast)) => Some(forecast.summary()),
            Ok(None) => {
                eprintln!("{}", "Weather information not available".dimmed());
                None
            }
            Err(e) => {
                warn!(error = %e, "Weather service error");
                eprintln!("{} {}", "Weather unavailable:".yellow(), e);
                None
            }
        }
    } else {
        None
    };

    let request = TripRequest {
        destination: trip.destination.clone(),
        start_date: trip.start,
        end_date: trip.end,
        budget: trip.budget.label().to_string(),
        traveler_type: trip.traveler,
        interests: trip.interests,
        weather_info,
    };
    if request.duration_days() > 30 {
        eprintln!("{}", "Long trips (>30 days) may take more time to generate.".yellow());
    }

    let itinerary = planner.itinerary(&request).await?;

    println!(
        "{} {} ({} days)",
        "Itinerary for".bright_cyan().bold(),
        request.destination.bold(),
        request.duration_days()
    );
    for day in split_days(&itinerary) {
        let (header, body) = day.split_once('\n').unwrap_or((day.as_str(), ""));
        println!("\n{}", header.yellow().bold());
        if !body.is_empty() {
            println!("{}", body);
        }
    }

    let places = extract_locations(&itinerary);
    if !places.is_empty() {
        println!("\n{} {}", "Places mentioned:".bright_cyan(), places.join(", "));
    }
    println!(
        "\n{}",
        "Tip: This itinerary is AI-generated. Always verify opening hours, prices, and availability before your trip!"
            .dimmed()
    );

    if let Some(path) = export {
        let markdown = itinerary_markdown(&itinerary, &request.destination, Local::now().naive_local());
        let written = write_export(path, &export_filename(&request.destination, "itinerary"), &markdown)?;
        eprintln!("{} {}", "Exported:".green(), written.display());
    }
    Ok(())
}

async fn cmd_weather(config: &Config, destination: &str, days: Option<u32>) -> Result<()> {
    debug!(%destination, ?days, "cmd_weather: called");
    let service = WeatherService::from_config(&config.weather)?;
    if !service.is_configured() {
        println!(
            "{} Set {} to enable forecasts.",
            "Weather information not available.".yellow(),
            config.weather.api_key_env
        );
        return Ok(());
    }

    let days = days.unwrap_or(config.weather.days);
    let Some(forecast) = service.forecast(destination, days).await? else {
        println!("{}", "Weather information not available".yellow());
        return Ok(());
    };

    let symbol = config.weather.units.temperature_symbol();
    println!("{} {}", "Forecast for".bright_cyan().bold(), forecast.location.bold());
    for day in &forecast.days {
        println!(
            "  {} {:<20} avg {:>5.1}{} high {:>5.1}{} low {:>5.1}{} humidity {:>3}% wind {:.1}",
            day.date.format("%a %Y-%m-%d").to_string().yellow(),
            day.condition,
            day.avg_temp,
            symbol,
            day.max_temp,
            symbol,
            day.min_temp,
            symbol,
            day.humidity,
            day.wind_speed
        );
    }
    Ok(())
}

async fn cmd_geocode(config: &Config, locations: &[String], offline: bool) -> Result<()> {
    debug!(count = locations.len(), offline, "cmd_geocode: called");
    let geocoder = Geocoder::new(&config.geocoding)?;

    for location in locations {
        let located = if offline {
            resolve_offline(location)
        } else {
            geocoder.coordinates(location).await
        };
        let source = format!("({:?})", located.source).to_lowercase();
        println!("{}: {} {}", location.bold(), located.coords, source.dimmed());
    }
    Ok(())
}

fn print_section(title: &str, body: &str) {
    println!("{}\n", title.bright_cyan().bold());
    println!("{}", body.trim());
}
