use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the forecast clients.
///
/// Nothing is recovered internally: no retries, no fallbacks. Every failure
/// is returned to the immediate caller, and only the caller decides whether
/// to give up or try again.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a usable response (connection refused,
    /// DNS failure, transport-level timeout).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status. Carries the status
    /// text, e.g. "403 Forbidden"; the error body has already been drained
    /// and logged by the time this is returned.
    #[error("remote error: {0}")]
    Remote(String),

    /// The response body could not be mapped onto the expected shape.
    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),
}

/// What exactly failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid XML document: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Errors while loading configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine platform config directory")]
    NoConfigDir,

    #[error("failed to read config file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
