//! Nominatim geocoding client.
//!
//! Reverse lookups shorten the full `display_name` to its first two comma
//! components, which is what the console renders next to a case. Lookup
//! failures are reported as `None`; the caller decides the fallback.

use async_trait::async_trait;
use casebook_protocol::GeoPoint;
use serde::Deserialize;
use std::time::Duration;

const NOMINATIM_BASE: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("casebook-console/", env!("CARGO_PKG_VERSION"));
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// A resolved place name, shortened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub label: String,
}

/// Reverse-geocoding seam for the enrichment layer.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolve coordinates to a short place label, `None` on any failure.
    async fn reverse(&self, lat: f64, lng: f64) -> Option<Place>;
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Client for the Nominatim API
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for GeoClient {
    fn default() -> Self {
        Self::new(NOMINATIM_BASE)
    }
}

impl GeoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve an address to coordinates, `None` when nothing matches.
    pub async fn forward(&self, address: &str) -> Option<GeoPoint> {
        let url = format!("{}/search", self.base_url);
        let result = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", address), ("limit", "1")])
            .send()
            .await;
        let resp = match result {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!("Forward geocoding failed: {err}");
                return None;
            }
        };
        let hits: Vec<SearchHit> = match resp.json().await {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!("Forward geocoding returned invalid body: {err}");
                return None;
            }
        };
        let hit = hits.into_iter().next()?;
        match (hit.lat.parse::<f64>(), hit.lon.parse::<f64>()) {
            (Ok(lat), Ok(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }
}

#[async_trait]
impl GeoLookup for GeoClient {
    async fn reverse(&self, lat: f64, lng: f64) -> Option<Place> {
        let url = format!("{}/reverse", self.base_url);
        let result = self
            .http
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await;
        let resp = match result {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!("Reverse geocoding failed: {err}");
                return None;
            }
        };
        let body: ReverseResponse = match resp.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("Reverse geocoding returned invalid body: {err}");
                return None;
            }
        };
        let display_name = body.display_name?;
        Some(Place {
            label: shorten_display_name(&display_name),
        })
    }
}

/// First two comma components of a Nominatim `display_name`, trimmed.
fn shorten_display_name(display_name: &str) -> String {
    let mut parts = display_name.split(',').map(str::trim);
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(second) if !second.is_empty() => format!("{first}, {second}"),
        _ => first.to_string(),
    }
}
