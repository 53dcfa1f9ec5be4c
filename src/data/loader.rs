use std::path::PathBuf;

use crate::{
    data::{geojson::GeoJson, track::Track},
    Result,
};

/// Where a track is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSource {
    File(PathBuf),
    Url(String),
}

impl TrackSource {
    /// `http://` and `https://` locations are URLs; anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            TrackSource::Url(location.to_string())
        } else {
            TrackSource::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for TrackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackSource::File(path) => write!(f, "{}", path.display()),
            TrackSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches the track once at startup
pub struct TrackLoader {
    client: reqwest::Client,
}

impl TrackLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub async fn load(&self, location: &str) -> Result<Track> {
        self.load_from(&TrackSource::parse(location)).await
    }

    pub async fn load_from(&self, source: &TrackSource) -> Result<Track> {
        log::debug!("loading track from {}", source);

        let text = match source {
            TrackSource::File(path) => read_file(path).await?,
            TrackSource::Url(url) => {
                self.client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
        };

        let track = Self::parse(&text)?;
        log::info!(
            "track loaded from {}: {} vertices, {:.2} km",
            source,
            track.len(),
            track.length_km()
        );
        Ok(track)
    }

    /// Parses GeoJSON text into a track
    pub fn parse(text: &str) -> Result<Track> {
        let geojson = GeoJson::parse(text)?;
        Track::from_geojson(&geojson)
    }
}

impl Default for TrackLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tokio-runtime")]
async fn read_file(path: &std::path::Path) -> Result<String> {
    Ok(tokio::fs::read_to_string(path).await?)
}

#[cfg(not(feature = "tokio-runtime"))]
async fn read_file(path: &std::path::Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
