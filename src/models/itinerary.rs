//! Itinerary and plan models

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::trip::TripStyle;

/// Per-day budget and its fixed category shares
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct BudgetSplit {
    pub daily: f64,
    pub activities: f64,
    pub accommodation: f64,
    pub meals: f64,
    pub transport: f64,
}

impl BudgetSplit {
    pub fn category_total(&self) -> f64 {
        self.activities + self.accommodation + self.meals + self.transport
    }
}

/// Where a day's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DaySource {
    Model,
    Fallback,
}

/// One day of the itinerary; `text` always opens with "Day N:"
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayItinerary {
    /// 1-based day index
    pub day: u32,
    pub date: NaiveDate,
    pub text: String,
    pub source: DaySource,
}

/// A generated trip plan
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TripPlan {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// "YYYY-MM-DD - YYYY-MM-DD"
    pub dates: String,
    pub budget: f64,
    pub trip_style: TripStyle,
    /// Day blocks joined by newlines
    pub itinerary: String,
    pub days: Vec<DayItinerary>,
    /// Advisory when synthetic weather was used
    pub weather_warning: Option<String>,
    pub weather_data: String,
}

/// Result of one planning run, success or a single user-facing error
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Success(TripPlan),
    Failure {
        error: String,
        weather_data: Option<String>,
    },
}
