//! Trip request

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PlannerError;

/// Everything the itinerary prompt needs to know about a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Human-readable budget band, e.g. "Mid-range ($50-150/day)"
    pub budget: String,
    pub traveler_type: String,
    pub interests: Vec<String>,
    /// Weather summary to include in the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_info: Option<String>,
}

impl TripRequest {
    /// Trip length in days, counting both the first and the last day
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.destination.trim().is_empty() {
            return Err(PlannerError::InvalidRequest("destination is empty".to_string()));
        }
        if self.end_date < self.start_date {
            return Err(PlannerError::InvalidRequest(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}
