//! Trip planning via the language model
//!
//! Unlike the review pipeline, planner calls have no fallback value: a
//! failed model call is returned to the caller as a [`PlannerError`].

mod error;
mod itinerary;
mod request;

pub use error::PlannerError;
pub use itinerary::{Planner, split_days};
pub use request::TripRequest;
