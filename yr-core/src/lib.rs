//! Core library for the `yr` CLI.
//!
//! This crate defines:
//! - A client for the legacy XML place-forecast endpoint (forecasts keyed by
//!   country/region/city)
//! - A client for the JSON location-forecast endpoint (forecasts keyed by
//!   latitude/longitude)
//! - Transport configuration and typed errors shared by both
//!
//! It is used by `yr-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod place;
pub mod satellite;

pub use config::ClientConfig;
pub use error::{ConfigError, DecodeError, Error};
pub use location::{LocationClient, LocationForecast};
pub use place::{PlaceClient, PlaceForecast};
