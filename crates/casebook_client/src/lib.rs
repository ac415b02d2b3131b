//! HTTP clients for the Casebook console.
//!
//! [`ConsoleClient`] talks to the record-management backend (JSON over HTTP
//! with bearer auth); [`GeoClient`] talks to the Nominatim geocoding service
//! for location enrichment.

pub mod geocode;
pub mod http;

pub use geocode::{GeoClient, GeoLookup, Place};
pub use http::ConsoleClient;
