//! Weather lookup: geocoding plus a daily forecast, degrading to a synthetic
//! "Sunny, 30°C" forecast whenever live data cannot be had.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    config::WeatherConfig,
    error::{AppError, AppResult},
    models::{
        trip::date_range, SyntheticReason, WeatherCondition, WeatherDay, WeatherReport,
        WeatherSource,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw per-day values from the forecast provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyReading {
    pub max_temperature: Option<f64>,
    pub weather_code: Option<i64>,
}

/// Resolves a destination name to coordinates
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the provider knows no such place
    async fn locate(&self, destination: &str) -> AppResult<Option<Coordinates>>;
}

/// Serves daily forecasts for a coordinate and date range
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Readings in date order starting at `start`; may be shorter than the range
    async fn daily(
        &self,
        at: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyReading>>;
}

/// True when `date` lies past `today + horizon_days`
pub fn beyond_horizon(date: NaiveDate, today: NaiveDate, horizon_days: i64) -> bool {
    date > today + chrono::Duration::days(horizon_days)
}

/// True when either end of the range lies past the forecast horizon
pub fn range_beyond_horizon(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    horizon_days: i64,
) -> bool {
    beyond_horizon(start, today, horizon_days) || beyond_horizon(end, today, horizon_days)
}

// ---------------------------------------------------------------------------
// OpenWeather geocoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: f64,
    lon: f64,
}

#[derive(Clone)]
pub struct OpenWeatherGeocoder {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherGeocoder {
    pub fn new(http: reqwest::Client, config: &WeatherConfig) -> Self {
        Self {
            http,
            base_url: config.geocoding_url.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    async fn locate(&self, destination: &str) -> AppResult<Option<Coordinates>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("OPENWEATHER_API_KEY not configured".to_string())
        })?;

        let hits: Vec<GeocodeHit> = self
            .http
            .get(&self.base_url)
            .query(&[("q", destination), ("limit", "1"), ("appid", api_key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(hits.into_iter().next().map(|hit| Coordinates {
            latitude: hit.lat,
            longitude: hit.lon,
        }))
    }
}

// ---------------------------------------------------------------------------
// Open-Meteo daily forecast
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyData,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    weathercode: Vec<Option<i64>>,
}

impl DailyData {
    fn readings(self) -> Vec<DailyReading> {
        (0..self.time.len())
            .map(|i| DailyReading {
                max_temperature: self.temperature_2m_max.get(i).copied().flatten(),
                weather_code: self.weathercode.get(i).copied().flatten(),
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct OpenMeteoForecast {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(http: reqwest::Client, config: &WeatherConfig) -> Self {
        Self {
            http,
            base_url: config.forecast_url.clone(),
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoForecast {
    async fn daily(
        &self,
        at: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyReading>> {
        let response: ForecastResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("daily", "temperature_2m_max,weathercode".to_string()),
                ("timezone", "auto".to_string()),
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.daily.readings())
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn build_http_client(config: &WeatherConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}

#[derive(Clone)]
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastProvider>,
    horizon_days: i64,
}

impl WeatherService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecast: Arc<dyn ForecastProvider>,
        horizon_days: i64,
    ) -> Self {
        Self {
            geocoder,
            forecast,
            horizon_days,
        }
    }

    pub fn horizon_days(&self) -> i64 {
        self.horizon_days
    }

    /// Forecast for every day in `start..=end`. Never fails: any provider
    /// problem yields the synthetic forecast for the whole range.
    pub async fn lookup(
        &self,
        destination: &str,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> WeatherReport {
        let dates = date_range(start, end);

        if range_beyond_horizon(start, end, today, self.horizon_days) {
            tracing::warn!(
                "Requested dates ({} to {}) are beyond the {}-day forecast window, using default weather",
                start,
                end,
                self.horizon_days
            );
            return WeatherReport::synthetic(&dates, SyntheticReason::BeyondHorizon);
        }

        let coordinates = match self.geocoder.locate(destination).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => {
                tracing::warn!("Could not find coordinates for {}, using default weather", destination);
                return WeatherReport::synthetic(&dates, SyntheticReason::LocationNotFound);
            }
            Err(AppError::Configuration(msg)) => {
                tracing::warn!("{}, using default weather", msg);
                return WeatherReport::synthetic(&dates, SyntheticReason::MissingCredential);
            }
            Err(e) => {
                tracing::warn!("Geocoding failed for {}: {}", destination, e);
                return WeatherReport::synthetic(&dates, SyntheticReason::ProviderError);
            }
        };

        tracing::debug!(
            "Resolved {} to ({:.4}, {:.4})",
            destination,
            coordinates.latitude,
            coordinates.longitude
        );

        match self.forecast.daily(coordinates, start, end).await {
            Ok(readings) => {
                tracing::info!(
                    "Forecast for {} returned {} of {} days",
                    destination,
                    readings.len(),
                    dates.len()
                );
                WeatherReport {
                    days: merge_readings(&dates, &readings),
                    source: WeatherSource::Live,
                }
            }
            Err(e) => {
                tracing::warn!("Forecast request failed for {}: {}", destination, e);
                WeatherReport::synthetic(&dates, SyntheticReason::ProviderError)
            }
        }
    }
}

/// Pair readings with dates by position; missing or incomplete days are synthetic
fn merge_readings(dates: &[NaiveDate], readings: &[DailyReading]) -> Vec<WeatherDay> {
    dates
        .iter()
        .enumerate()
        .map(|(i, &date)| match readings.get(i) {
            Some(DailyReading {
                max_temperature: Some(temp),
                weather_code: Some(code),
            }) => WeatherDay {
                date,
                condition: WeatherCondition::from_code(*code),
                max_temp_c: temp.round() as i32,
            },
            _ => WeatherDay::synthetic(date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(1)
    }

    fn paris() -> Coordinates {
        Coordinates {
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }

    fn reading(temp: f64, code: i64) -> DailyReading {
        DailyReading {
            max_temperature: Some(temp),
            weather_code: Some(code),
        }
    }

    fn service(geocoder: MockGeocoder, forecast: MockForecastProvider) -> WeatherService {
        WeatherService::new(Arc::new(geocoder), Arc::new(forecast), 7)
    }

    fn all_synthetic(report: &WeatherReport, expected_days: usize) {
        assert_eq!(report.days.len(), expected_days);
        for line in report.lines() {
            assert!(line.ends_with(": Sunny, 30°C"), "unexpected line {}", line);
        }
    }

    #[test]
    fn test_horizon_boundaries() {
        assert!(!beyond_horizon(date(8), today(), 7));
        assert!(beyond_horizon(date(9), today(), 7));
        assert!(range_beyond_horizon(date(5), date(9), today(), 7));
        assert!(!range_beyond_horizon(date(2), date(8), today(), 7));
    }

    #[tokio::test]
    async fn test_live_forecast() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_locate()
            .withf(|destination| destination == "Paris")
            .times(1)
            .returning(|_| Ok(Some(paris())));

        let mut forecast = MockForecastProvider::new();
        forecast
            .expect_daily()
            .times(1)
            .returning(|_, _, _| Ok(vec![reading(21.6, 0), reading(18.4, 61), reading(12.0, 77)]));

        let report = service(geocoder, forecast)
            .lookup("Paris", date(3), date(5), today())
            .await;

        assert_eq!(report.source, WeatherSource::Live);
        assert_eq!(
            report.lines(),
            vec![
                "2026-03-03: Sunny, 22°C",
                "2026-03-04: Rainy, 18°C",
                "2026-03-05: Unknown, 12°C",
            ]
        );
    }

    #[tokio::test]
    async fn test_short_forecast_is_padded() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_locate().returning(|_| Ok(Some(paris())));
        let mut forecast = MockForecastProvider::new();
        forecast
            .expect_daily()
            .returning(|_, _, _| Ok(vec![reading(25.0, 2)]));

        let report = service(geocoder, forecast)
            .lookup("Paris", date(3), date(5), today())
            .await;

        assert_eq!(
            report.lines(),
            vec![
                "2026-03-03: Partly Cloudy, 25°C",
                "2026-03-04: Sunny, 30°C",
                "2026-03-05: Sunny, 30°C",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_locate()
            .returning(|_| Err(AppError::Configuration("OPENWEATHER_API_KEY not configured".into())));
        let mut forecast = MockForecastProvider::new();
        forecast.expect_daily().times(0);

        let report = service(geocoder, forecast)
            .lookup("Paris", date(2), date(5), today())
            .await;

        all_synthetic(&report, 4);
        assert_eq!(
            report.source,
            WeatherSource::Synthetic(SyntheticReason::MissingCredential)
        );
    }

    #[tokio::test]
    async fn test_unknown_location_falls_back() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_locate().returning(|_| Ok(None));
        let mut forecast = MockForecastProvider::new();
        forecast.expect_daily().times(0);

        let report = service(geocoder, forecast)
            .lookup("Atlantis", date(2), date(3), today())
            .await;

        all_synthetic(&report, 2);
        assert_eq!(report.text(), "2026-03-02: Sunny, 30°C\n2026-03-03: Sunny, 30°C");
    }

    #[tokio::test]
    async fn test_beyond_horizon_skips_forecast() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_locate().times(0);
        let mut forecast = MockForecastProvider::new();
        forecast.expect_daily().times(0);

        let report = service(geocoder, forecast)
            .lookup("Paris", date(20), date(22), today())
            .await;

        all_synthetic(&report, 3);
        assert_eq!(
            report.source,
            WeatherSource::Synthetic(SyntheticReason::BeyondHorizon)
        );
    }

    #[tokio::test]
    async fn test_forecast_error_falls_back() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_locate().returning(|_| Ok(Some(paris())));
        let mut forecast = MockForecastProvider::new();
        forecast
            .expect_daily()
            .returning(|_, _, _| Err(AppError::ExternalService("503".into())));

        let report = service(geocoder, forecast)
            .lookup("Paris", date(2), date(4), today())
            .await;

        all_synthetic(&report, 3);
        assert_eq!(
            report.source,
            WeatherSource::Synthetic(SyntheticReason::ProviderError)
        );
    }

    #[test]
    fn test_incomplete_reading_is_synthetic() {
        let days = merge_readings(
            &[date(2)],
            &[DailyReading {
                max_temperature: None,
                weather_code: Some(3),
            }],
        );
        assert_eq!(days[0], WeatherDay::synthetic(date(2)));
    }

    #[test]
    fn test_parse_open_meteo_payload() {
        let payload = r#"{
            "latitude": 48.86,
            "longitude": 2.35,
            "daily": {
                "time": ["2026-03-02", "2026-03-03"],
                "temperature_2m_max": [14.2, null],
                "weathercode": [3, 95]
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(payload).unwrap();
        let readings = response.daily.readings();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0], reading(14.2, 3));
        assert_eq!(readings[1].max_temperature, None);
    }
}
