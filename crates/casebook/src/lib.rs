//! Casebook console core.
//!
//! The `console` module is the generic list controller: debounced query
//! building, race-safe paginated fetching, a reconciling page store, the
//! role-gated mutation gateway, and the place-name enrichment cache. The
//! `backends` module binds the controller to the backend API, one resource
//! per backend.

pub mod backends;
pub mod console;
pub mod profile;
