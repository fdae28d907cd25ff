//! Client for the JSON location-forecast endpoint.
//!
//! Forecasts are keyed by geographic coordinate and served as a
//! GeoJSON-shaped document: a `Feature` whose `properties` carry forecast
//! metadata, unit labels, and the time series itself. The service rejects
//! requests without an identifying `user-agent` header.

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{DecodeError, Error},
};

const ENDPOINT_COMPACT: &str = "compact";

/// Client for the location-forecast endpoint.
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: Client,
    config: ClientConfig,
}

impl LocationClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(ClientConfig::default())
    }

    /// Compact location forecast for a coordinate pair.
    pub async fn compact(&self, lat: f64, lon: f64) -> Result<LocationForecast, Error> {
        let url = self.compact_url(lat, lon);
        debug!(url = %url, "fetching location forecast");

        let res = self.http.get(url.as_str()).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // Diagnostic only; the body of a rejected request is not decoded.
            warn!(status = %status, body = %body, "location forecast request rejected");
            return Err(Error::Remote(status.to_string()));
        }

        Ok(decode(&body)?)
    }

    /// Coordinates are formatted to two decimal places, which is all the
    /// resolution the service uses; out-of-range values are passed through
    /// for the server to reject.
    fn compact_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/{ENDPOINT_COMPACT}?lat={lat:.2}&lon={lon:.2}",
            self.config.location_base_url
        )
    }
}

fn decode(body: &str) -> Result<LocationForecast, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

/// Decoded reply from the location-forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationForecast {
    /// GeoJSON feature tag, "Feature".
    #[serde(rename = "type")]
    pub feature_type: String,

    pub geometry: PointGeometry,

    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    /// `[longitude, latitude, altitude]`, GeoJSON axis order.
    pub coordinates: Vec<f64>,

    #[serde(rename = "type")]
    pub geometry_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastProperties {
    pub meta: ForecastMeta,

    /// Time steps in ascending order as returned; the first entry is the
    /// current/nearest conditions.
    pub timeseries: Vec<ForecastTimeStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastMeta {
    /// When the service generated this forecast.
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub units: ForecastUnits,
}

/// Measurement unit labels, one per reported field. Labels the service does
/// not send decode as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastUnits {
    pub air_pressure_at_sea_level: String,
    pub air_temperature: String,
    pub air_temperature_max: String,
    pub air_temperature_min: String,
    pub cloud_area_fraction: String,
    pub cloud_area_fraction_high: String,
    pub cloud_area_fraction_low: String,
    pub cloud_area_fraction_medium: String,
    pub dew_point_temperature: String,
    pub fog_area_fraction: String,
    pub precipitation_amount: String,
    pub precipitation_amount_max: String,
    pub precipitation_amount_min: String,
    pub probability_of_precipitation: String,
    pub probability_of_thunder: String,
    pub relative_humidity: String,
    pub ultraviolet_index_clear_sky_max: String,
    pub wind_from_direction: String,
    pub wind_speed: String,
    pub wind_speed_of_gust: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastTimeStep {
    pub time: DateTime<Utc>,

    #[serde(default)]
    pub data: ForecastTimeStepData,
}

/// The three views bundled with each time step: point-in-time measurements
/// plus aggregated statistics for the next one and six hours. The lookahead
/// blocks thin out towards the tail of the series.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastTimeStepData {
    pub instant: InstantData,
    pub next_1_hours: Option<PeriodData>,
    pub next_6_hours: Option<PeriodData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstantData {
    pub details: InstantDetails,
}

/// Point-in-time measurements. Fields the service does not send decode as
/// 0.0.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstantDetails {
    pub air_pressure_at_sea_level: f64,
    pub air_temperature: f64,
    pub cloud_area_fraction: f64,
    pub cloud_area_fraction_high: f64,
    pub cloud_area_fraction_low: f64,
    pub cloud_area_fraction_medium: f64,
    pub dew_point_temperature: f64,
    pub fog_area_fraction: f64,
    pub relative_humidity: f64,
    pub wind_from_direction: f64,
    pub wind_speed: f64,
    pub wind_speed_of_gust: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeriodData {
    pub details: PeriodDetails,
    pub summary: ForecastSummary,
}

/// Aggregated statistics for a lookahead window.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeriodDetails {
    pub air_temperature_max: f64,
    pub air_temperature_min: f64,
    pub precipitation_amount: f64,
    pub precipitation_amount_max: f64,
    pub precipitation_amount_min: f64,
    pub probability_of_precipitation: f64,
    pub probability_of_thunder: f64,
    pub ultraviolet_index_clear_sky_max: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastSummary {
    pub symbol_code: WeatherSymbol,
}

/// A short token naming a pictorial weather condition, e.g. "clearsky_day".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct WeatherSymbol(pub String);

impl fmt::Display for WeatherSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
