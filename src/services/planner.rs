//! Plan orchestration: trip style, weather, itinerary, packaged as one outcome

use chrono::NaiveDate;

use crate::{
    models::{PlanOutcome, TripPlan, TripRequest, TripStyle, WeatherReport},
    services::{
        itinerary::ItineraryGenerator,
        weather::{range_beyond_horizon, WeatherService},
    },
};

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate itinerary";

/// Advisory attached when the dates fall outside the forecast horizon
pub fn weather_advisory(horizon_days: i64) -> String {
    format!(
        "Note: Weather data is unavailable for the selected dates (beyond {}-day forecast). Using default sunny weather (30°C).",
        horizon_days
    )
}

#[derive(Clone)]
pub struct PlannerService {
    weather: WeatherService,
    itinerary: ItineraryGenerator,
}

impl PlannerService {
    pub fn new(weather: WeatherService, itinerary: ItineraryGenerator) -> Self {
        Self { weather, itinerary }
    }

    /// Run the whole pipeline. Every failure ends up as `PlanOutcome::Failure`.
    pub async fn plan(&self, request: &TripRequest, today: NaiveDate) -> PlanOutcome {
        tracing::info!(
            "Planning trip to {} for {} with budget ${}",
            request.destination,
            request.dates_label(),
            request.budget
        );

        let style = TripStyle::from_budget(request.budget);
        tracing::info!("Trip style: {}", style);

        let weather = self
            .weather
            .lookup(&request.destination, request.start_date, request.end_date, today)
            .await;
        tracing::debug!("Weather data retrieved: {:?}", weather.lines());

        match self.assemble(request, style, &weather, today).await {
            Some(plan) => PlanOutcome::Success(plan),
            None => {
                tracing::error!("No itinerary produced for {}", request.destination);
                PlanOutcome::Failure {
                    error: GENERATION_FAILED_MESSAGE.to_string(),
                    weather_data: Some(weather.text()),
                }
            }
        }
    }

    async fn assemble(
        &self,
        request: &TripRequest,
        style: TripStyle,
        weather: &WeatherReport,
        today: NaiveDate,
    ) -> Option<TripPlan> {
        let horizon = self.weather.horizon_days();
        let weather_warning = range_beyond_horizon(request.start_date, request.end_date, today, horizon)
            .then(|| weather_advisory(horizon));

        let generated = match self.itinerary.generate(request, style, weather).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!("Itinerary generation failed: {}", e);
                return None;
            }
        };

        let itinerary = generated.text();
        if itinerary.trim().is_empty() {
            return None;
        }

        Some(TripPlan {
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            dates: request.dates_label(),
            budget: request.budget,
            trip_style: style,
            itinerary,
            days: generated.days,
            weather_warning,
            weather_data: generated.weather_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        error::AppError,
        services::{
            gemini::MockTextGenerator,
            itinerary::SECTION_LABELS,
            weather::{Coordinates, DailyReading, MockForecastProvider, MockGeocoder},
        },
    };

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(1)
    }

    fn request(start: u32, end: u32, budget: f64) -> TripRequest {
        TripRequest {
            destination: "Paris".to_string(),
            start_date: date(start),
            end_date: date(end),
            budget,
        }
    }

    fn planner(
        geocoder: MockGeocoder,
        forecast: MockForecastProvider,
        generator: MockTextGenerator,
    ) -> PlannerService {
        PlannerService::new(
            WeatherService::new(Arc::new(geocoder), Arc::new(forecast), 7),
            ItineraryGenerator::new(Arc::new(generator)),
        )
    }

    fn live_weather() -> (MockGeocoder, MockForecastProvider) {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_locate().returning(|_| {
            Ok(Some(Coordinates {
                latitude: 48.85,
                longitude: 2.35,
            }))
        });
        let mut forecast = MockForecastProvider::new();
        forecast.expect_daily().returning(|_, start, end| {
            let days = (end - start).num_days() + 1;
            Ok((0..days)
                .map(|_| DailyReading {
                    max_temperature: Some(17.0),
                    weather_code: Some(3),
                })
                .collect())
        });
        (geocoder, forecast)
    }

    #[tokio::test]
    async fn test_plan_success_within_horizon() {
        let (geocoder, forecast) = live_weather();
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(3)
            .returning(|_| Err(AppError::Generation("Empty response from Gemini API".into())));

        let outcome = planner(geocoder, forecast, generator)
            .plan(&request(3, 5, 900.0), today())
            .await;

        let plan = match outcome {
            PlanOutcome::Success(plan) => plan,
            other => panic!("expected success, got {:?}", other),
        };
        assert_eq!(plan.trip_style, TripStyle::Cultural);
        assert_eq!(plan.dates, "2026-03-03 - 2026-03-05");
        assert_eq!(plan.weather_warning, None);
        assert_eq!(plan.weather_data.lines().count(), 3);
        assert!(plan.weather_data.starts_with("2026-03-03: Cloudy, 17°C"));
        assert_eq!(plan.days.len(), 3);
        for (i, day) in plan.days.iter().enumerate() {
            assert!(day.text.starts_with(&format!("Day {}:", i + 1)));
            for label in SECTION_LABELS {
                assert!(day.text.contains(label), "day {} lacks {}", i + 1, label);
            }
        }
        assert!(plan.itinerary.contains("Weather: Cloudy, 17°C"));
    }

    #[tokio::test]
    async fn test_plan_beyond_horizon_has_advisory() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_locate().times(0);
        let mut forecast = MockForecastProvider::new();
        forecast.expect_daily().times(0);
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_| {
            Ok("Day 1: Paris\nWeather: Sunny, 30°C\nActivities: Louvre ($20)".to_string())
        });

        let outcome = planner(geocoder, forecast, generator)
            .plan(&request(20, 20, 2500.0), today())
            .await;

        match outcome {
            PlanOutcome::Success(plan) => {
                assert_eq!(plan.trip_style, TripStyle::Luxury);
                assert_eq!(plan.weather_warning, Some(weather_advisory(7)));
                assert_eq!(plan.weather_data, "2026-03-20: Sunny, 30°C");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_range_straddling_horizon_has_advisory() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_locate().times(0);
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(AppError::Generation("down".into())));

        let outcome = planner(geocoder, MockForecastProvider::new(), generator)
            .plan(&request(7, 10, 400.0), today())
            .await;

        match outcome {
            PlanOutcome::Success(plan) => {
                assert!(plan.weather_warning.is_some());
                assert_eq!(plan.trip_style, TripStyle::BudgetCultural);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plan_failure_keeps_weather_text() {
        let (geocoder, forecast) = live_weather();
        let generator = MockTextGenerator::new();

        let mut backwards = request(5, 5, 900.0);
        backwards.end_date = date(4);

        let outcome = planner(geocoder, forecast, generator)
            .plan(&backwards, today())
            .await;

        match outcome {
            PlanOutcome::Failure {
                error,
                weather_data,
            } => {
                assert_eq!(error, GENERATION_FAILED_MESSAGE);
                assert_eq!(weather_data, Some(String::new()));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
