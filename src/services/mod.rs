//! Business logic services

pub mod budget;
pub mod gemini;
pub mod itinerary;
pub mod planner;
pub mod weather;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult};

use gemini::{GeminiClient, TextGenerator};
use itinerary::ItineraryGenerator;
use planner::PlannerService;
use weather::{ForecastProvider, Geocoder, OpenMeteoForecast, OpenWeatherGeocoder, WeatherService};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub weather: WeatherService,
    pub itinerary: ItineraryGenerator,
    pub planner: PlannerService,
}

impl Services {
    /// Create all services backed by the live providers
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = weather::build_http_client(&config.weather)?;
        let geocoder = Arc::new(OpenWeatherGeocoder::new(http.clone(), &config.weather));
        let forecast = Arc::new(OpenMeteoForecast::new(http, &config.weather));
        let generator = Arc::new(GeminiClient::new(&config.gemini)?);

        Ok(Self::with_providers(
            geocoder,
            forecast,
            generator,
            config.planner.forecast_horizon_days,
        ))
    }

    /// Wire the services around arbitrary providers
    pub fn with_providers(
        geocoder: Arc<dyn Geocoder>,
        forecast: Arc<dyn ForecastProvider>,
        generator: Arc<dyn TextGenerator>,
        horizon_days: i64,
    ) -> Self {
        let weather = WeatherService::new(geocoder, forecast, horizon_days);
        let itinerary = ItineraryGenerator::new(generator);
        let planner = PlannerService::new(weather.clone(), itinerary.clone());

        Self {
            weather,
            itinerary,
            planner,
        }
    }
}
