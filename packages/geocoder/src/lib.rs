#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding provider clients for the member map.
//!
//! Resolves coordinates to region names (reverse) and free-form queries
//! to coordinates (forward) using providers configured via TOML files in
//! `services/`:
//!
//! 1. **AMap** (priority 1) — best coverage inside China; returns empty
//!    arrays for missing fields, which is where most of the raw-field
//!    weirdness comes from.
//! 2. **Nominatim / OpenStreetMap** (priority 2) — global fallback,
//!    1 req/sec rate limit on the public instance.
//!
//! Providers return a [`RawRegion`] — the untyped scalar-or-array shape
//! — which callers push through `member_map_region::reconcile_region`
//! before storing anything. This crate performs no retries; a failure is
//! reported to the caller as a [`GeocodeError`].

pub mod amap;
pub mod nominatim;
pub mod service_registry;

use thiserror::Error;

pub use member_map_location_models::GeoPoint;
pub use member_map_region::RawRegion;

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}
