#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-way coordinate fuzzing for member location privacy.
//!
//! A raw geocoded coordinate is street-level accurate, which is more than
//! a public member directory should reveal. [`fuzz_coordinates`] adds a
//! bounded random offset and rounds to two decimal places, keeping
//! city-level accuracy while destroying street-level precision.
//!
//! The transform is lossy and non-reversible, and it compounds: running
//! it twice degrades precision further. Callers must apply it exactly
//! once, at the point a raw coordinate is first accepted (the directory
//! save path is the single choke point for this).

use rand::Rng;
use thiserror::Error;

use member_map_location_models::GeoPoint;

/// Maximum random offset applied to each axis, in degrees (~1.1 km of
/// latitude). Tunable; chosen to stay well inside typical city radii.
pub const FUZZ_RANGE_DEG: f64 = 0.01;

/// Decimal places kept after jittering (~1.1 km granularity).
pub const FUZZ_PRECISION: u32 = 2;

/// Worst-case displacement per axis: jitter plus rounding.
pub const MAX_DISPLACEMENT_DEG: f64 = FUZZ_RANGE_DEG + 0.005;

/// Errors from the privacy transform.
///
/// These are caller contract violations — a coordinate that reaches this
/// crate should already have been validated at the API boundary.
#[derive(Debug, Error, PartialEq)]
pub enum PrivacyError {
    /// Latitude or longitude was NaN or infinite.
    #[error("Coordinate is not finite: lat={lat}, lng={lng}")]
    NonFinite {
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lng: f64,
    },

    /// Coordinate was outside WGS84 bounds.
    #[error("Coordinate out of range: lat={lat}, lng={lng}")]
    OutOfRange {
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lng: f64,
    },
}

/// Rounds a value to [`FUZZ_PRECISION`] decimal places.
fn round_coord(value: f64) -> f64 {
    let factor = 10_f64.powi(FUZZ_PRECISION.cast_signed());
    (value * factor).round() / factor
}

/// Applies the privacy transform to a raw coordinate.
///
/// Each axis independently receives a uniform random offset in
/// `[-FUZZ_RANGE_DEG, +FUZZ_RANGE_DEG]` and is then rounded to
/// [`FUZZ_PRECISION`] decimals. Repeated calls with the same input
/// produce different outputs, so stored values cannot be intersected to
/// recover the original point. The result is clamped to WGS84 bounds for
/// inputs near the poles or the antimeridian.
///
/// # Errors
///
/// Returns [`PrivacyError`] if the input is non-finite or out of range.
/// There is no silent fallback: a corrupted coordinate must never reach
/// the map.
pub fn fuzz_coordinates(lat: f64, lng: f64) -> Result<GeoPoint, PrivacyError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(PrivacyError::NonFinite { lat, lng });
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(PrivacyError::OutOfRange { lat, lng });
    }

    let mut rng = rand::thread_rng();
    let jittered_lat = lat + rng.gen_range(-FUZZ_RANGE_DEG..=FUZZ_RANGE_DEG);
    let jittered_lng = lng + rng.gen_range(-FUZZ_RANGE_DEG..=FUZZ_RANGE_DEG);

    Ok(GeoPoint::new(
        round_coord(jittered_lat).clamp(-90.0, 90.0),
        round_coord(jittered_lng).clamp(-180.0, 180.0),
    ))
}
