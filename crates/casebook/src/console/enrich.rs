//! Best-effort place-name enrichment.
//!
//! Reverse-geocoded labels are cached per normalized coordinate key for the
//! lifetime of the list view. Concurrent lookups for the same key share one
//! in-flight request; a failed lookup caches a deterministic coordinate
//! fallback, so no item is ever left unresolved.

use casebook_client::GeoLookup;
use casebook_protocol::GeoPoint;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Coordinates normalized to 1e-5 degrees, usable as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat_e5: i64,
    lng_e5: i64,
}

impl CoordKey {
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            lat_e5: (point.lat * 1e5).round() as i64,
            lng_e5: (point.lng * 1e5).round() as i64,
        }
    }
}

/// Deterministic label for coordinates that could not be resolved:
/// the raw values truncated (not rounded) to two decimals.
pub fn fallback_label(point: GeoPoint) -> String {
    let lat = (point.lat * 100.0).trunc() / 100.0;
    let lng = (point.lng * 100.0).trunc() / 100.0;
    format!("{lat:.2}, {lng:.2}")
}

type Entries = Mutex<HashMap<CoordKey, watch::Receiver<Option<String>>>>;

/// Session-scoped cache of resolved place names.
#[derive(Clone)]
pub struct PlaceCache {
    lookup: Arc<dyn GeoLookup>,
    entries: Arc<Entries>,
}

impl PlaceCache {
    pub fn new(lookup: Arc<dyn GeoLookup>) -> Self {
        Self {
            lookup,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Resolve `point` to a display label. Cached results return without a
    /// lookup; a lookup already in flight for the same key is shared, never
    /// duplicated.
    pub async fn resolve(&self, point: GeoPoint) -> String {
        let key = CoordKey::from_point(point);
        let mut rx = {
            let mut entries = match self.entries.lock() {
                Ok(entries) => entries,
                Err(_) => return fallback_label(point),
            };
            match entries.get(&key) {
                Some(rx) => rx.clone(),
                None => {
                    let (tx, rx) = watch::channel(None);
                    entries.insert(key, rx.clone());
                    let lookup = Arc::clone(&self.lookup);
                    tokio::spawn(async move {
                        let label = match lookup.reverse(point.lat, point.lng).await {
                            Some(place) => place.label,
                            None => fallback_label(point),
                        };
                        let _ = tx.send(Some(label));
                    });
                    rx
                }
            }
        };

        let label = match rx.wait_for(Option::is_some).await {
            Ok(value) => value.clone().unwrap_or_else(|| fallback_label(point)),
            // Resolver task dropped without sending (runtime shutdown).
            Err(_) => fallback_label(point),
        };
        label
    }
}
