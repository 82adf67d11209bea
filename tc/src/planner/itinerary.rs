//! Itinerary and recommendation generation

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use super::{PlannerError, TripRequest};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::{PromptLoader, PromptTemplate};

const RESPONSE_MAX_TOKENS: u32 = 8192;

const HEADER_MARKS: [char; 6] = ['#', '*', ' ', '\t', '\n', '\r'];

/// `Day 3` at the start of a line, allowing Markdown heading or bold markers
static DAY_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[#*\s]*Day\s+\d+").expect("valid day-header pattern"));

#[derive(Serialize)]
struct ItineraryPrompt<'a> {
    duration: i64,
    destination: &'a str,
    start_date: String,
    end_date: String,
    budget: &'a str,
    traveler_type: &'a str,
    interests: String,
    weather_info: Option<&'a str>,
}

#[derive(Serialize)]
struct RestaurantsPrompt<'a> {
    destination: &'a str,
    cuisine: Option<&'a str>,
}

#[derive(Serialize)]
struct AttractionsPrompt<'a> {
    destination: &'a str,
    interests: String,
}

#[derive(Serialize)]
struct TipsPrompt<'a> {
    destination: &'a str,
}

/// Generates itineraries and destination recommendations
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>) -> Self {
        Self { llm, prompts }
    }

    /// Generate a day-by-day itinerary for a validated trip request
    pub async fn itinerary(&self, request: &TripRequest) -> Result<String, PlannerError> {
        debug!(destination = %request.destination, "itinerary: called");
        request.validate()?;

        let context = ItineraryPrompt {
            duration: request.duration_days(),
            destination: &request.destination,
            start_date: request.start_date.to_string(),
            end_date: request.end_date.to_string(),
            budget: &request.budget,
            traveler_type: &request.traveler_type,
            interests: request.interests.join(", "),
            weather_info: request.weather_info.as_deref(),
        };
        let prompt = self.render(PromptTemplate::Itinerary, &context)?;
        let itinerary = self.ask("generate itinerary", prompt).await?;
        info!(destination = %request.destination, days = request.duration_days(), "Itinerary generated");
        Ok(itinerary)
    }

    /// Top restaurants, optionally narrowed to the given cuisines
    pub async fn restaurants(&self, destination: &str, cuisine: Option<&str>) -> Result<String, PlannerError> {
        debug!(%destination, ?cuisine, "restaurants: called");
        let cuisine = cuisine.map(str::trim).filter(|c| !c.is_empty());
        let prompt = self.render(PromptTemplate::Restaurants, &RestaurantsPrompt { destination, cuisine })?;
        self.ask("get restaurant recommendations", prompt).await
    }

    pub async fn attractions(&self, destination: &str, interests: &[String]) -> Result<String, PlannerError> {
        debug!(%destination, interests = interests.len(), "attractions: called");
        let context = AttractionsPrompt {
            destination,
            interests: interests.join(", "),
        };
        let prompt = self.render(PromptTemplate::Attractions, &context)?;
        self.ask("get attraction recommendations", prompt).await
    }

    pub async fn tips(&self, destination: &str) -> Result<String, PlannerError> {
        debug!(%destination, "tips: called");
        let prompt = self.render(PromptTemplate::Tips, &TipsPrompt { destination })?;
        self.ask("get travel tips", prompt).await
    }

    fn render<T: Serialize>(&self, template: PromptTemplate, context: &T) -> Result<String, PlannerError> {
        self.prompts
            .render(template, context)
            .map_err(|e| PlannerError::Prompt(format!("{:#}", e)))
    }

    async fn ask(&self, action: &'static str, prompt: String) -> Result<String, PlannerError> {
        let response = self
            .llm
            .complete(CompletionRequest::prompt(prompt, RESPONSE_MAX_TOKENS))
            .await
            .map_err(|source| PlannerError::Llm { action, source })?;

        response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or(PlannerError::EmptyResponse { action })
    }
}

/// Split an itinerary into per-day sections on `Day N` headers
///
/// Text before the first header is dropped. Without any header the whole
/// trimmed itinerary is returned as a single section.
pub fn split_days(itinerary: &str) -> Vec<String> {
    // (where the match begins, where the header text begins)
    let headers: Vec<(usize, usize)> = DAY_HEADER
        .find_iter(itinerary)
        .map(|m| {
            let header = m.as_str();
            let text_start = m.start() + header.len() - header.trim_start_matches(HEADER_MARKS).len();
            (m.start(), text_start)
        })
        .collect();

    if headers.is_empty() {
        let trimmed = itinerary.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    headers
        .iter()
        .enumerate()
        .map(|(i, &(_, start))| {
            let end = headers.get(i + 1).map(|&(match_start, _)| match_start).unwrap_or(itinerary.len());
            itinerary[start..end].trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::llm::client::mock::MockLlmClient;
    use chrono::NaiveDate;

    fn planner(mock: Arc<MockLlmClient>) -> Planner {
        Planner::new(mock, Arc::new(PromptLoader::embedded_only()))
    }

    fn trip() -> TripRequest {
        TripRequest {
            destination: "Kyoto, Japan".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 3).unwrap(),
            budget: "Luxury ($150+/day)".to_string(),
            traveler_type: "Family with Kids".to_string(),
            interests: vec!["History & Culture".to_string(), "Nature & Parks".to_string()],
            weather_info: None,
        }
    }

    #[tokio::test]
    async fn test_itinerary_prompt_contents() {
        let mock = Arc::new(MockLlmClient::texts(&["Day 1: Temples"]));
        let text = planner(mock.clone()).itinerary(&trip()).await.unwrap();
        assert_eq!(text, "Day 1: Temples");

        let prompt = &mock.prompts()[0];
        assert!(prompt.contains("Create a detailed 3-day travel itinerary for Kyoto, Japan."));
        assert!(prompt.contains("- Dates: 2026-04-01 to 2026-04-03"));
        assert!(prompt.contains("- Budget: Luxury ($150+/day)"));
        assert!(prompt.contains("- Interests: History & Culture, Nature & Parks"));
        assert!(!prompt.contains("Weather Information"));
    }

    #[tokio::test]
    async fn test_itinerary_includes_weather() {
        let mock = Arc::new(MockLlmClient::texts(&["ok"]));
        let mut request = trip();
        request.weather_info = Some("Weather Forecast:\nWednesday: light rain".to_string());
        planner(mock.clone()).itinerary(&request).await.unwrap();
        assert!(mock.prompts()[0].contains("Weather Information: Weather Forecast:\nWednesday: light rain"));
    }

    #[tokio::test]
    async fn test_itinerary_rejects_invalid_request_without_calling_model() {
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let mut request = trip();
        request.end_date = NaiveDate::from_ymd_opt(2026, 3, 30).unwrap();
        let err = planner(mock.clone()).itinerary(&request).await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRequest(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_itinerary_failure_propagates() {
        let mock = Arc::new(MockLlmClient::new(vec![Err(LlmError::InvalidResponse("blocked".to_string()))]));
        let err = planner(mock).itinerary(&trip()).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to generate itinerary: "));
    }

    #[tokio::test]
    async fn test_restaurants_with_and_without_cuisine() {
        let mock = Arc::new(MockLlmClient::texts(&["list", "list"]));
        let planner = planner(mock.clone());
        planner.restaurants("Naples", Some("pizza, seafood")).await.unwrap();
        planner.restaurants("Naples", Some("  ")).await.unwrap();

        let prompts = mock.prompts();
        assert!(prompts[0].contains("Recommend the top 10 restaurants in Naples."));
        assert!(prompts[0].contains("Preferred cuisines: pizza, seafood"));
        assert!(prompts[1].contains("Include variety of local and international cuisines"));
    }

    #[tokio::test]
    async fn test_attractions_and_tips() {
        let mock = Arc::new(MockLlmClient::texts(&["sights", "tips"]));
        let planner = planner(mock.clone());
        let interests = vec!["Museums & Art".to_string(), "Nightlife".to_string()];
        assert_eq!(planner.attractions("Berlin", &interests).await.unwrap(), "sights");
        assert_eq!(planner.tips("Berlin").await.unwrap(), "tips");

        let prompts = mock.prompts();
        assert!(prompts[0].contains("Recommend top attractions in Berlin based on these interests: Museums & Art, Nightlife."));
        assert!(prompts[1].contains("Provide comprehensive travel tips for Berlin"));
    }

    #[tokio::test]
    async fn test_blank_answer_is_an_error() {
        let mock = Arc::new(MockLlmClient::texts(&["  \n"]));
        let err = planner(mock).tips("Oslo").await.unwrap_err();
        assert!(matches!(err, PlannerError::EmptyResponse { action: "get travel tips" }));
    }

    #[test]
    fn test_split_days() {
        let itinerary = "Here is your plan.\n\n## Day 1: Arrival\nCheck in.\n\n**Day 2: Museums**\nLouvre.\nDay 3\nDepart.\n";
        assert_eq!(
            split_days(itinerary),
            vec!["Day 1: Arrival\nCheck in.", "Day 2: Museums**\nLouvre.", "Day 3\nDepart."]
        );
    }

    #[test]
    fn test_split_days_leaves_no_markers_on_previous_day() {
        let itinerary = "### Day 1\nMarket.\n\n\n### Day 2\nBeach.\n\n**Day 3**\nFly home.";
        assert_eq!(
            split_days(itinerary),
            vec!["Day 1\nMarket.", "Day 2\nBeach.", "Day 3**\nFly home."]
        );
    }

    #[test]
    fn test_split_days_ignores_inline_mentions() {
        let itinerary = "Day 1\nRest, since on Day 2 you hike.\nDay 2\nHike.";
        assert_eq!(split_days(itinerary), vec!["Day 1\nRest, since on Day 2 you hike.", "Day 2\nHike."]);
    }

    #[test]
    fn test_split_days_without_headers() {
        assert_eq!(split_days("  Just wander around.  "), vec!["Just wander around."]);
        assert!(split_days("").is_empty());
    }
}
