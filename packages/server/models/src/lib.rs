#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the member map server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the directory types to allow independent evolution of
//! the API contract.

use chrono::{DateTime, Utc};
use member_map_directory::Member;
use member_map_location_models::UserLocation;
use member_map_region::RawRegion;
use serde::{Deserialize, Serialize};

/// A member as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMember {
    /// Member identifier.
    pub id: String,
    /// Public display name.
    pub display_name: String,
    /// Public (privacy-transformed) location, if set.
    pub location: Option<UserLocation>,
    /// Last profile update (ISO 8601).
    pub updated_at: DateTime<Utc>,
}

impl From<Member> for ApiMember {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            display_name: member.display_name,
            location: member.location,
            updated_at: member.updated_at,
        }
    }
}

/// Query parameters for the members endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersQueryParams {
    /// Bounding box as `west,south,east,north`; members outside are
    /// excluded.
    pub bbox: Option<String>,
}

/// Request body for saving a member's location.
///
/// Carries the raw geocoder output: a precise coordinate plus region
/// fields in whatever shape the provider produced (scalar or array).
/// The server normalizes and privacy-fuzzes before storing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLocationRequest {
    /// Precise latitude from the geocoder or device.
    pub lat: f64,
    /// Precise longitude from the geocoder or device.
    pub lng: f64,
    /// Raw region fields.
    #[serde(flatten)]
    pub region: RawRegion,
}

/// Query parameters for the reverse geocode endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseQueryParams {
    /// Latitude to resolve.
    pub lat: f64,
    /// Longitude to resolve.
    pub lng: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
