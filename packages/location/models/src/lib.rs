#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Shared location and region types for the member map.
//!
//! These types are the common vocabulary between the region normalizer,
//! the privacy transform, the de-overlap engine, and the API server.
//! They carry no behavior beyond basic validation helpers.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both axes are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A member's publicly visible location.
///
/// The coordinate has already been through the privacy transform and the
/// region fields are canonical normalizer output — raw provider text never
/// reaches this type. If `province` is a recognized China province,
/// `country` is always `"中国"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    /// Privacy-transformed latitude.
    pub lat: f64,
    /// Privacy-transformed longitude.
    pub lng: f64,
    /// Canonical country name.
    pub country: String,
    /// Canonical province/state name, if known.
    pub province: Option<String>,
    /// Canonical city name, if known.
    pub city: Option<String>,
}

impl UserLocation {
    /// The coordinate portion of this location.
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A de-overlapped display position for one member.
///
/// Derived per render pass from [`UserLocation`] by the placement engine;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCoordinate {
    /// Member identifier.
    pub user_id: String,
    /// Display latitude.
    pub lat: f64,
    /// Display longitude.
    pub lng: f64,
}

/// Aggregated member count for one region, for the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStat {
    /// Canonical country name.
    pub country: String,
    /// Canonical province name, if the grouping is province-level.
    pub province: Option<String>,
    /// Number of members in this region.
    pub count: u64,
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Whether the box contains the given point (inclusive edges).
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}
