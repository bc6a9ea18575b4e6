//! Trip request model and validation

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Raw planner form fields, echoed back on every page render
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct TripForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Destination is required."))]
    pub destination: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub budget: String,
}

/// JSON plan request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlanRequest {
    /// Destination name, e.g. "Paris"
    pub destination: String,
    /// First day of the trip (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of the trip (YYYY-MM-DD)
    pub end_date: String,
    /// Total budget in USD
    pub budget: f64,
}

impl From<PlanRequest> for TripForm {
    fn from(request: PlanRequest) -> Self {
        Self {
            destination: request.destination,
            start_date: request.start_date,
            end_date: request.end_date,
            budget: request.budget.to_string(),
        }
    }
}

/// A validated trip request
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
}

impl TripRequest {
    /// Validate submitted form fields against `today`.
    ///
    /// Checks run in a fixed order so the first failing field decides the message.
    pub fn from_form(form: &TripForm, today: NaiveDate) -> AppResult<Self> {
        let budget: f64 = form
            .budget
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Budget must be a valid number.".to_string()))?;
        if !budget.is_finite() || budget <= 0.0 {
            return Err(AppError::Validation(
                "Budget must be a positive number.".to_string(),
            ));
        }

        let (start_date, end_date) = match (parse_date(&form.start_date), parse_date(&form.end_date)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AppError::Validation(
                    "Invalid date format. Please select valid start and end dates.".to_string(),
                ))
            }
        };

        if start_date <= today || end_date <= today {
            return Err(AppError::Validation("Dates must be in the future.".to_string()));
        }
        if end_date < start_date {
            return Err(AppError::Validation(
                "End date must be after start date.".to_string(),
            ));
        }

        let trimmed = TripForm {
            destination: form.destination.trim().to_string(),
            ..form.clone()
        };
        trimmed.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid trip request.".to_string());
            AppError::Validation(message)
        })?;

        Ok(Self {
            destination: trimmed.destination,
            start_date,
            end_date,
            budget,
        })
    }

    /// Every calendar day of the trip, inclusive
    pub fn days(&self) -> Vec<NaiveDate> {
        date_range(self.start_date, self.end_date)
    }

    /// "YYYY-MM-DD - YYYY-MM-DD"
    pub fn dates_label(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Inclusive range of days; empty when `end` precedes `start`
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let count = (end - start).num_days() + 1;
    (0..count.max(0)).map(|i| start + Duration::days(i)).collect()
}

/// Budget tier used to flavour the prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TripStyle {
    #[serde(rename = "Budget Cultural")]
    BudgetCultural,
    Cultural,
    Adventure,
    Luxury,
}

impl TripStyle {
    /// Lower bounds are inclusive: 500 is already "Cultural".
    pub fn from_budget(budget: f64) -> Self {
        if budget < 500.0 {
            TripStyle::BudgetCultural
        } else if budget < 1000.0 {
            TripStyle::Cultural
        } else if budget < 2000.0 {
            TripStyle::Adventure
        } else {
            TripStyle::Luxury
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripStyle::BudgetCultural => "Budget Cultural",
            TripStyle::Cultural => "Cultural",
            TripStyle::Adventure => "Adventure",
            TripStyle::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for TripStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
