use anyhow::Context;
use clap::Parser;
use yr_core::{ClientConfig, LocationClient, LocationForecast};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "yr", version, about = "Current conditions from the yr location forecast")]
pub struct Cli {
    /// Latitude in decimal degrees.
    pub lat: f64,

    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = ClientConfig::load()?;
        let client = LocationClient::new(config)?;
        let forecast = client.compact(self.lat, self.lon).await?;

        println!("{}", summary_line(&forecast)?);
        Ok(())
    }
}

/// One line: the current temperature, rounded, and the next-hour symbol code.
fn summary_line(forecast: &LocationForecast) -> anyhow::Result<String> {
    let step = forecast
        .properties
        .timeseries
        .first()
        .context("forecast contained no time steps")?;

    let symbol = step
        .data
        .next_1_hours
        .as_ref()
        .map(|period| &period.summary.symbol_code)
        .context("nearest time step has no next-hour summary")?;

    let temperature = step.data.instant.details.air_temperature;

    Ok(format!("{temperature:.0}:{symbol}"))
}
