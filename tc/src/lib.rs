//! Trip Companion - travel planning with LLM-backed review analytics
//!
//! Trip Companion composes a generative language model, a geocoding service
//! and a weather service into a small travel-planning toolkit. Its core is the
//! review-analytics pipeline: pasted traveler reviews are split into individual
//! reviews, classified one by one, and summarized into a sentiment
//! distribution with insights and a recommendation.
//!
//! # Modules
//!
//! - [`reviews`] - Segmentation, classification, aggregation and orchestration
//! - [`llm`] - LLM client trait with Gemini and Anthropic implementations
//! - [`prompts`] - Handlebars prompt templates, embedded and overridable
//! - [`planner`] - Itineraries, restaurants, attractions and tips
//! - [`geo`] - Geocoding with an offline fallback, place-name extraction
//! - [`weather`] - OpenWeather forecasts summarized per day
//! - [`export`] - Markdown documents
//! - [`report`] - Terminal rendering
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod export;
pub mod geo;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod report;
pub mod reviews;
pub mod weather;

pub use config::Config;
pub use llm::{LlmClient, LlmError, create_client};
pub use reviews::{AnalysisResult, ReviewAnalyzer, ReviewReport, SentimentLabel};
