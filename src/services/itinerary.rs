//! Per-day itinerary generation.
//!
//! Each trip day gets one model call. The trimmed response is validated as
//! returned; output that fails is thrown away whole and replaced by a templated
//! fallback day. Accepted output is stored without bold header lines and
//! always opens with its "Day N:" header.

use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::{BudgetSplit, DayItinerary, DaySource, TripRequest, TripStyle, WeatherReport},
    services::{
        budget::{self, usd},
        gemini::TextGenerator,
    },
};

/// Section labels a usable day must mention at least once
pub const SECTION_LABELS: [&str; 5] = [
    "Weather:",
    "Activities:",
    "Accommodation:",
    "Meals:",
    "Transportation:",
];

static BOLD_HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\*\*.*?\*\*\n").expect("valid bold header regex"));
static DAY_HEADER_AT_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Day \d+:").expect("valid day header regex"));

/// Everything needed to write one day's prompt
#[derive(Debug, Clone)]
pub struct DayContext<'a> {
    pub day: u32,
    pub total_days: usize,
    pub destination: &'a str,
    pub date: NaiveDate,
    pub style: TripStyle,
    pub weather_line: &'a str,
    pub budget: BudgetSplit,
}

/// Day records plus the weather text they were written against
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedItinerary {
    pub days: Vec<DayItinerary>,
    pub weather_data: String,
}

impl GeneratedItinerary {
    /// Day blocks joined by newlines
    pub fn text(&self) -> String {
        self.days
            .iter()
            .map(|day| day.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone)]
pub struct ItineraryGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl ItineraryGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate every day of the trip, one model call per day, in order
    pub async fn generate(
        &self,
        request: &TripRequest,
        style: TripStyle,
        weather: &WeatherReport,
    ) -> AppResult<GeneratedItinerary> {
        let dates = request.days();
        if dates.is_empty() {
            return Err(AppError::Generation("Trip has no days to plan".to_string()));
        }

        let split = budget::allocate(request.budget, dates.len());
        let mut days = Vec::with_capacity(dates.len());

        for (index, &date) in dates.iter().enumerate() {
            let weather_line = weather.line_for(index, date);
            let context = DayContext {
                day: index as u32 + 1,
                total_days: dates.len(),
                destination: &request.destination,
                date,
                style,
                weather_line: &weather_line,
                budget: split,
            };
            days.push(self.generate_day(&context).await);
        }

        Ok(GeneratedItinerary {
            days,
            weather_data: weather.text(),
        })
    }

    async fn generate_day(&self, context: &DayContext<'_>) -> DayItinerary {
        let prompt = build_prompt(context);

        let (text, source) = match self.generator.generate(&prompt).await {
            Ok(raw) => {
                let cleaned = strip_bold_headers(&raw);
                if is_usable(raw.trim()) && !cleaned.is_empty() {
                    (ensure_day_header(&cleaned, context.day, context.destination), DaySource::Model)
                } else {
                    tracing::warn!(
                        "Generating fallback for Day {} (incomplete response: {:?})",
                        context.day,
                        raw
                    );
                    (fallback_day(context), DaySource::Fallback)
                }
            }
            Err(e) => {
                tracing::warn!("Generating fallback for Day {} ({})", context.day, e);
                (fallback_day(context), DaySource::Fallback)
            }
        };

        tracing::debug!("Day {} itinerary ({:?}): {:?}", context.day, source, text);

        DayItinerary {
            day: context.day,
            date: context.date,
            text,
            source,
        }
    }
}

/// The generation request for one day
pub fn build_prompt(context: &DayContext<'_>) -> String {
    let day = context.day;
    let destination = context.destination;
    let budget = &context.budget;

    format!(
        "Generate a detailed itinerary for Day {day} of a {total}-day trip to {destination} on {date} with a daily budget of ${daily} USD.\n\
         Trip style: {style}.\n\
         Weather forecast: {weather}\n\
         \n\
         Include the following sections:\n\
         - Weather: Use the provided weather forecast (e.g., 'Sunny, 30°C').\n\
         - Activities: One or two specific places with descriptions and costs in USD (total ≤ ${activities}).\n\
         - Accommodation: Specific type and name with cost in USD (≤ ${accommodation}/night).\n\
         - Meals: Specific options with costs in USD (total ≤ ${meals}).\n\
         - Transportation: Specific options with costs in USD (total ≤ ${transport}).\n\
         \n\
         Format as plain text starting with 'Day {day}: {destination}', followed by the sections in the order: \
         Weather, Activities, Accommodation, Meals, Transportation. Ensure all sections are included and filled \
         with unique content for each day. Use USD for all costs. Do not use HTML tags or special formatting. \
         Do not skip any sections or days.",
        total = context.total_days,
        date = context.date.format("%Y-%m-%d"),
        daily = usd(budget.daily),
        style = context.style,
        weather = context.weather_line,
        activities = usd(budget.activities),
        accommodation = usd(budget.accommodation),
        meals = usd(budget.meals),
        transport = usd(budget.transport),
    )
}

/// Templated day used whenever the model output is unusable
pub fn fallback_day(context: &DayContext<'_>) -> String {
    let destination = context.destination;
    let condition = context
        .weather_line
        .split_once(": ")
        .map(|(_, condition)| condition)
        .unwrap_or(context.weather_line);

    format!(
        "Day {day}: {destination}\n\
         Weather: {condition}\n\
         Activities: Free day to explore {destination} (self-paced, $0)\n\
         Accommodation: Budget Hostel {destination} (${accommodation}/night)\n\
         Meals: Local street food ($10); Dinner at a local café ($10)\n\
         Transportation: Walking ($0)",
        day = context.day,
        accommodation = usd(context.budget.accommodation),
    )
}

/// Drop markdown bold header lines and surrounding whitespace
pub fn strip_bold_headers(text: &str) -> String {
    BOLD_HEADER_LINE.replace_all(text, "").trim().to_string()
}

/// Usable output has non-blank content past its first line and names at
/// least one section
pub fn is_usable(text: &str) -> bool {
    let lines: Vec<&str> = text.split('\n').collect();
    let has_content = lines.len() > 1 && lines[1..].iter().any(|line| !line.trim().is_empty());
    let has_section = SECTION_LABELS.iter().any(|label| text.contains(label));
    has_content && has_section
}

/// Prefix "Day N: destination" when the text does not already open with a day header
pub fn ensure_day_header(text: &str, day: u32, destination: &str) -> String {
    if DAY_HEADER_AT_START.is_match(text) {
        text.to_string()
    } else {
        format!("Day {}: {}\n{}", day, destination, text)
    }
}
