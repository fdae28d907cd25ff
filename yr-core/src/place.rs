//! Client for the legacy XML place-forecast endpoint.
//!
//! Forecasts are keyed by administrative place name and served as a
//! `weatherdata` XML document. The interesting wrinkle is the timestamp
//! format: naive local time without a zone suffix, appearing both as
//! attribute values (`<time from=".." to="..">`) and as element content
//! (`<lastupdate>..</lastupdate>`).

use std::fmt;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{DecodeError, Error},
};

const FILE_FORECAST: &str = "forecast.xml";
const FILE_HOURLY_FORECAST: &str = "forecast_hour_by_hour.xml";

/// Client for the place-forecast endpoint.
#[derive(Debug, Clone)]
pub struct PlaceClient {
    http: Client,
    config: ClientConfig,
}

impl PlaceClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { http, config })
    }

    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(ClientConfig::default())
    }

    /// Forecast for a named place, one window per part of the day.
    pub async fn forecast(
        &self,
        country: &str,
        region: &str,
        city: &str,
    ) -> Result<PlaceForecast, Error> {
        let url = self.place_url(country, region, city, FILE_FORECAST);
        self.fetch(&url).await
    }

    /// Hour-by-hour forecast for a named place.
    pub async fn hourly_forecast(
        &self,
        country: &str,
        region: &str,
        city: &str,
    ) -> Result<PlaceForecast, Error> {
        let url = self.place_url(country, region, city, FILE_HOURLY_FORECAST);
        self.fetch(&url).await
    }

    /// Segments are interpolated as-is, no escaping or validation; a
    /// malformed segment just produces a URL the server answers with 404.
    fn place_url(&self, country: &str, region: &str, city: &str, filename: &str) -> String {
        format!(
            "{}/place/{country}/{region}/{city}/{filename}",
            self.config.place_base_url
        )
    }

    async fn fetch(&self, url: &str) -> Result<PlaceForecast, Error> {
        debug!(url = %url, "fetching place forecast");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(status = %status, body = %body, "place forecast request rejected");
            return Err(Error::Remote(status.to_string()));
        }

        Ok(decode(&body)?)
    }
}

fn decode(body: &str) -> Result<PlaceForecast, DecodeError> {
    let data: WeatherData = quick_xml::de::from_str(body)?;

    Ok(PlaceForecast {
        location: data.location,
        last_update: data.meta.map(|meta| meta.lastupdate),
        forecasts: data.forecast.tabular.times,
    })
}

/// Decoded reply from the place-forecast endpoint.
#[derive(Debug, Clone)]
pub struct PlaceForecast {
    pub location: Location,

    /// When the service last refreshed this forecast, if reported.
    pub last_update: Option<NaiveDateTime>,

    /// Forecast windows in the order the service returned them.
    pub forecasts: Vec<ForecastWindow>,
}

/// The location the forecast data is for.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    /// Name of the location.
    pub name: String,

    /// Type of the location, e.g. "city".
    #[serde(rename = "type")]
    pub place_type: String,

    /// Country of the location.
    pub country: String,
}

/// One forecast window from the tabular feed.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastWindow {
    /// Start of the window this forecast covers.
    #[serde(rename = "@from", deserialize_with = "timestamp::attribute")]
    pub from: NaiveDateTime,

    /// End of the window this forecast covers.
    #[serde(rename = "@to", deserialize_with = "timestamp::attribute")]
    pub to: NaiveDateTime,

    pub temperature: Temperature,

    /// Verbose weather-condition summary, e.g. "Partly cloudy".
    pub symbol: Symbol,

    #[serde(rename = "windSpeed")]
    pub wind_speed: WindSpeed,

    #[serde(rename = "windDirection")]
    pub wind_direction: WindDirection,

    pub precipitation: Precipitation,
}

impl fmt::Display for ForecastWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}:\n {}°C [{}] {:.0} m/s [{}], {:.0} mm",
            self.from,
            self.to,
            self.temperature.value,
            self.symbol.name,
            self.wind_speed.mps,
            self.wind_direction.code,
            self.precipitation.value
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Temperature {
    #[serde(rename = "@value")]
    pub value: i32,

    /// Unit label, e.g. "celsius".
    #[serde(rename = "@unit")]
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Symbol {
    #[serde(rename = "@name")]
    pub name: String,
}

/// Wind speed in m/s (meters per second).
#[derive(Debug, Clone, Deserialize)]
pub struct WindSpeed {
    #[serde(rename = "@mps")]
    pub mps: f32,
}

/// Wind direction with a short code and a more verbose name.
#[derive(Debug, Clone, Deserialize)]
pub struct WindDirection {
    #[serde(rename = "@deg")]
    pub deg: f32,

    #[serde(rename = "@code")]
    pub code: String,

    #[serde(rename = "@name")]
    pub name: String,
}

/// Precipitation in mm during the window.
#[derive(Debug, Clone, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "@value")]
    pub value: f32,
}

/// Wire shape of the `weatherdata` document. Flattened into [`PlaceForecast`]
/// after decoding so callers never see the `forecast > tabular > time`
/// nesting.
#[derive(Debug, Deserialize)]
struct WeatherData {
    location: Location,
    meta: Option<Meta>,
    forecast: ForecastSection,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(deserialize_with = "timestamp::element")]
    lastupdate: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
struct ForecastSection {
    tabular: Tabular,
}

#[derive(Debug, Deserialize)]
struct Tabular {
    #[serde(rename = "time", default)]
    times: Vec<ForecastWindow>,
}

/// The feed's fixed timestamp format: `YYYY-MM-DDTHH:MM:SS`, naive local
/// time, no zone suffix.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, de};

    use crate::error::DecodeError;

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    /// Parse the fixed format. No other formats are attempted.
    pub fn parse(value: &str) -> Result<NaiveDateTime, DecodeError> {
        NaiveDateTime::parse_from_str(value, FORMAT).map_err(DecodeError::Timestamp)
    }

    /// Adapter for timestamps in attribute position, e.g. `<time from="..">`.
    pub(super) fn attribute<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(de::Error::custom)
    }

    /// Adapter for timestamps in element-content position, e.g.
    /// `<lastupdate>..</lastupdate>`.
    pub(super) fn element<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const SAMPLE: &str = r#"<weatherdata>
        <location>
            <name>Oslo</name>
            <type>city</type>
            <country>Norway</country>
        </location>
        <meta>
            <lastupdate>2024-01-15T10:00:00</lastupdate>
        </meta>
        <forecast>
            <tabular>
                <time from="2024-01-15T10:00:00" to="2024-01-15T16:00:00" period="1">
                    <symbol number="3" name="Partly cloudy" var="03d"/>
                    <precipitation value="0.4"/>
                    <windDirection deg="225.7" code="SW" name="Southwest"/>
                    <windSpeed mps="5.7" name="Moderate breeze"/>
                    <temperature unit="celsius" value="3"/>
                    <pressure unit="hPa" value="1009.8"/>
                </time>
                <time from="2024-01-15T16:00:00" to="2024-01-15T22:00:00" period="2">
                    <symbol number="9" name="Rain" var="09"/>
                    <precipitation value="2.1"/>
                    <windDirection deg="180.0" code="S" name="South"/>
                    <windSpeed mps="8.2" name="Fresh breeze"/>
                    <temperature unit="celsius" value="5"/>
                </time>
            </tabular>
        </forecast>
    </weatherdata>"#;

    fn naive(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn parses_the_fixed_timestamp_format() {
        let ts = timestamp::parse("2024-01-15T10:00:00").expect("valid timestamp");
        assert_eq!(ts, naive(2024, 1, 15, 10));
    }

    #[test]
    fn rejects_everything_but_the_fixed_format() {
        for input in [
            "2024-01-15",
            "2024-01-15 10:00:00",
            "2024-01-15T10:00:00Z",
            "2024-01-15T10:00:00+01:00",
            "15/01/2024 10:00",
            "junk",
            "",
        ] {
            let err = timestamp::parse(input).expect_err("must not parse");
            assert!(matches!(err, DecodeError::Timestamp(_)), "input: {input:?}");
        }
    }

    #[test]
    fn attribute_and_element_positions_yield_the_same_instant() {
        let forecast = decode(SAMPLE).expect("sample must decode");

        // `lastupdate` (element content) and the first window's `from`
        // (attribute) carry the same text in the sample.
        assert_eq!(forecast.last_update, Some(forecast.forecasts[0].from));
        assert_eq!(forecast.last_update, Some(naive(2024, 1, 15, 10)));
    }

    #[test]
    fn decodes_all_fields_verbatim() {
        let forecast = decode(SAMPLE).expect("sample must decode");

        assert_eq!(forecast.location.name, "Oslo");
        assert_eq!(forecast.location.place_type, "city");
        assert_eq!(forecast.location.country, "Norway");

        assert_eq!(forecast.forecasts.len(), 2);
        let first = &forecast.forecasts[0];
        assert_eq!(first.from, naive(2024, 1, 15, 10));
        assert_eq!(first.to, naive(2024, 1, 15, 16));
        assert_eq!(first.temperature.value, 3);
        assert_eq!(first.temperature.unit, "celsius");
        assert_eq!(first.symbol.name, "Partly cloudy");
        assert_eq!(first.wind_speed.mps, 5.7);
        assert_eq!(first.wind_direction.deg, 225.7);
        assert_eq!(first.wind_direction.code, "SW");
        assert_eq!(first.wind_direction.name, "Southwest");
        assert_eq!(first.precipitation.value, 0.4);
    }

    #[test]
    fn preserves_window_order_as_received() {
        let forecast = decode(SAMPLE).expect("sample must decode");

        let froms: Vec<_> = forecast.forecasts.iter().map(|w| w.from).collect();
        assert_eq!(froms, vec![naive(2024, 1, 15, 10), naive(2024, 1, 15, 16)]);
        for window in &forecast.forecasts {
            assert!(window.from <= window.to);
        }
    }

    #[test]
    fn missing_meta_section_is_tolerated() {
        let xml = r#"<weatherdata>
            <location><name>Oslo</name><type>city</type><country>Norway</country></location>
            <forecast><tabular></tabular></forecast>
        </weatherdata>"#;

        let forecast = decode(xml).expect("meta-less document must decode");
        assert_eq!(forecast.last_update, None);
        assert!(forecast.forecasts.is_empty());
    }

    #[test]
    fn bad_timestamp_in_document_is_a_decode_error() {
        let xml = SAMPLE.replace("2024-01-15T10:00:00", "January 15th");
        let err = decode(&xml).expect_err("must not decode");
        assert!(matches!(err, DecodeError::Xml(_)));
    }

    #[test]
    fn malformed_documents_are_decode_errors() {
        for body in ["", "<wrongroot/>", &SAMPLE[..SAMPLE.len() / 2], "not xml"] {
            assert!(decode(body).is_err(), "body: {body:?}");
        }
    }

    #[test]
    fn builds_the_documented_place_urls() {
        let client = PlaceClient::with_defaults().expect("client");

        assert_eq!(
            client.place_url("no", "oslo", "oslo", FILE_FORECAST),
            "http://yr.no/place/no/oslo/oslo/forecast.xml"
        );
        assert_eq!(
            client.place_url("no", "oslo", "oslo", FILE_HOURLY_FORECAST),
            "http://yr.no/place/no/oslo/oslo/forecast_hour_by_hour.xml"
        );
    }

    #[test]
    fn place_url_passes_segments_through_verbatim() {
        let client = PlaceClient::with_defaults().expect("client");

        // No escaping: odd segments make an odd URL, which the server 404s.
        assert_eq!(
            client.place_url("norway", "møre og romsdal", "Ålesund", FILE_FORECAST),
            "http://yr.no/place/norway/møre og romsdal/Ålesund/forecast.xml"
        );
    }

    #[test]
    fn window_display_matches_the_summary_shape() {
        let forecast = decode(SAMPLE).expect("sample must decode");
        let rendered = forecast.forecasts[0].to_string();

        assert!(rendered.contains("3°C [Partly cloudy]"));
        assert!(rendered.contains("6 m/s [SW]"));
        assert!(rendered.contains("0 mm"));
    }
}
