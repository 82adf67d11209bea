//! Daily forecast summaries from 3-hourly OpenWeather entries

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::Units;

/// Days included in [`Forecast::summary`]
const SUMMARY_DAYS: usize = 3;

/// `/forecast` response, reduced to the fields used here
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub list: Vec<RawEntry>,
    pub city: RawCity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    /// Unix timestamp, UTC
    pub dt: i64,
    pub main: RawMain,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub wind: RawWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}

/// One calendar day of forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    /// Most frequent condition of the day
    pub condition: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub location: String,
    pub units: Units,
    /// Ordered by date
    pub days: Vec<DayForecast>,
}

impl Forecast {
    /// Short human-readable outlook for the first few days
    pub fn summary(&self) -> String {
        if self.days.is_empty() {
            return "Weather forecast not available".to_string();
        }

        let symbol = self.units.temperature_symbol();
        let lines: Vec<String> = self
            .days
            .iter()
            .take(SUMMARY_DAYS)
            .map(|day| {
                format!(
                    "{}: {}, High {:.1}{}, Low {:.1}{}",
                    day.date.format("%A"),
                    day.condition,
                    day.max_temp,
                    symbol,
                    day.min_temp,
                    symbol
                )
            })
            .collect();

        format!("Weather Forecast:\n{}", lines.join("\n"))
    }
}

#[derive(Default)]
struct DayBucket {
    temps: Vec<f64>,
    conditions: Vec<String>,
    humidity: Vec<f64>,
    wind: Vec<f64>,
}

/// Bucket entries by UTC calendar date and reduce each day to one summary
///
/// Entries with an out-of-range timestamp are skipped.
pub fn summarize_forecast(raw: &RawForecast, units: Units) -> Forecast {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for entry in &raw.list {
        let Some(timestamp) = DateTime::from_timestamp(entry.dt, 0) else {
            continue;
        };
        let bucket = buckets.entry(timestamp.date_naive()).or_default();
        bucket.temps.push(entry.main.temp);
        bucket.humidity.push(entry.main.humidity);
        bucket.wind.push(entry.wind.speed);
        if let Some(condition) = entry.weather.first() {
            bucket.conditions.push(condition.description.clone());
        }
    }

    let days = buckets
        .into_iter()
        .map(|(date, bucket)| DayForecast {
            date,
            avg_temp: round1(mean(&bucket.temps)),
            max_temp: round1(bucket.temps.iter().copied().fold(f64::MIN, f64::max)),
            min_temp: round1(bucket.temps.iter().copied().fold(f64::MAX, f64::min)),
            condition: most_frequent(&bucket.conditions).unwrap_or_default(),
            humidity: mean(&bucket.humidity).round() as u32,
            wind_speed: round1(mean(&bucket.wind)),
        })
        .collect();

    Forecast {
        location: raw.city.name.clone(),
        units,
        days,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Ties go to the value seen first
fn most_frequent(values: &[String]) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;
    for value in values {
        let count = values.iter().filter(|v| *v == value).count();
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.clone())
}
