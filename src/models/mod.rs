//! Data models for WanderWise

pub mod itinerary;
pub mod trip;
pub mod weather;

// Re-export commonly used types
pub use itinerary::{BudgetSplit, DayItinerary, DaySource, PlanOutcome, TripPlan};
pub use trip::{PlanRequest, TripForm, TripRequest, TripStyle};
pub use weather::{SyntheticReason, WeatherCondition, WeatherDay, WeatherReport, WeatherSource};
