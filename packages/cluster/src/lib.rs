#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Marker clustering and selection lifecycle for the member map.
//!
//! Consumes the de-overlapped display coordinates and the current
//! viewport, and emits either individual markers or aggregated cluster
//! markers with a count badge. Clustering radius is constant in screen
//! pixels, so clusters form by on-screen proximity at every zoom, and
//! clustering switches off entirely at city-block zoom so every marker
//! resolves individually.
//!
//! All state lives in a [`scene::MarkerScene`] owned by the rendering
//! session — there are no module-level registries, so concurrent
//! sessions cannot leak into each other and the scene is testable
//! without any rendering surface.

pub mod mercator;
pub mod scene;
pub mod session;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use member_map_location_models::GeoPoint;

/// Minimum zoom level; the view cannot zoom out past country scale.
pub const MIN_ZOOM: f64 = 3.0;

/// Maximum zoom level supported by the map surface.
pub const MAX_ZOOM: f64 = 18.0;

/// Zoom level at or above which clustering is disabled and every marker
/// renders individually (the "city" zoom floor).
pub const CLUSTER_ZOOM_FLOOR: f64 = 13.0;

/// Clustering radius in screen pixels, constant across zoom levels.
pub const CLUSTER_RADIUS_PX: f64 = 60.0;

/// The current map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Viewport center.
    pub center: GeoPoint,
    /// Current zoom level.
    pub zoom: f64,
}

impl Viewport {
    /// Creates a viewport, clamping zoom to `[MIN_ZOOM, MAX_ZOOM]`.
    #[must_use]
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }
}

/// Visual weight tier for a cluster count badge.
///
/// Purely presentational, but deterministic given a count so the badge
/// never flickers between sizes for the same cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    /// Fewer than 10 members.
    Small,
    /// 10 to 99 members.
    Medium,
    /// 100 or more members.
    Large,
}

impl BadgeTier {
    /// Tier for a given member count.
    #[must_use]
    pub const fn for_count(count: usize) -> Self {
        match count {
            0..=9 => Self::Small,
            10..=99 => Self::Medium,
            _ => Self::Large,
        }
    }
}

/// One renderable map entity emitted by a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MapEntity {
    /// An individual member marker.
    Marker {
        /// Member id.
        id: String,
        /// Display latitude.
        lat: f64,
        /// Display longitude.
        lng: f64,
        /// Whether this marker is the current selection (rendered
        /// standalone, outside the clustering layer).
        selected: bool,
    },
    /// An aggregated cluster marker.
    Cluster {
        /// Centroid latitude of the member display coordinates.
        lat: f64,
        /// Centroid longitude of the member display coordinates.
        lng: f64,
        /// Number of members aggregated.
        count: usize,
        /// Badge size tier.
        tier: BadgeTier,
    },
}

/// A camera operation the rendering surface should perform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyTo {
    /// Target center.
    pub center: GeoPoint,
    /// Target zoom.
    pub zoom: f64,
}
