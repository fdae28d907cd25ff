//! Satellite-imagery capability surface.
//!
//! The geosatellite endpoint is not implemented: [`available`] reports the
//! capability without probing anything and [`image`] never yields data. The
//! enums describe the parameter space a real implementation would accept.

use crate::error::Error;

pub const URI: &str = "https://api.met.no/weatherapi/geosatellite/1.4/";

/// Coverage area of a satellite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Africa,
    Europe,
    AtlanticOcean,
    Mediterranean,
    Global,
}

impl Area {
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Africa => "africa",
            Area::Europe => "europe",
            Area::AtlanticOcean => "atlantic_ocean",
            Area::Mediterranean => "mediterranean",
            Area::Global => "global",
        }
    }

    pub const fn all() -> &'static [Area] {
        &[
            Area::Africa,
            Area::Europe,
            Area::AtlanticOcean,
            Area::Mediterranean,
            Area::Global,
        ]
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spectral channel of a satellite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Infrared,
    Visible,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Infrared => "infrared",
            ImageKind::Visible => "visible",
        }
    }

    pub const fn all() -> &'static [ImageKind] {
        &[ImageKind::Infrared, ImageKind::Visible]
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Small,
    Normal,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Normal => "normal",
        }
    }

    pub const fn all() -> &'static [ImageSize] {
        &[ImageSize::Small, ImageSize::Normal]
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether satellite imagery can be served at all. Always succeeds; there is
/// no remote probe behind it.
pub fn available() -> Result<(), Error> {
    Ok(())
}

/// Fetch a satellite image. Never yields data; retrieval is not implemented.
pub fn image(_area: Area, _kind: ImageKind, _size: ImageSize) -> Result<Option<Vec<u8>>, Error> {
    Ok(None)
}
