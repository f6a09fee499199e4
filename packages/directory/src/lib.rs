#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Member directory service.
//!
//! Sits between the API server and the profile store. The store itself
//! is an external collaborator behind the [`ProfileStore`] trait; this
//! crate owns the pieces that must not be scattered:
//!
//! * the single save path where a raw geocoder result is normalized,
//!   reconciled, and privacy-fuzzed **exactly once** before storage;
//! * visible-set refresh merging, so a background poll tick never
//!   disturbs insertion order or an active selection;
//! * the request-generation guard that discards slow responses arriving
//!   after newer state.

pub mod store;
pub mod visible;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use member_map_location_models::{RegionStat, UserLocation};
use member_map_privacy::PrivacyError;
use member_map_region::{NormalizedRegion, RawRegion, reconcile_region, stats};

/// Errors from directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The requested member does not exist.
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// The missing member id.
        id: String,
    },

    /// The raw coordinate failed the privacy transform's contract.
    #[error("Invalid coordinate: {0}")]
    Privacy(#[from] PrivacyError),
}

/// A member as visible on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Stable member identifier.
    pub id: String,
    /// Public display name.
    pub display_name: String,
    /// Public (privacy-transformed) location, if the member set one.
    pub location: Option<UserLocation>,
    /// Last profile update.
    pub updated_at: DateTime<Utc>,
}

/// Read/write access to member profiles.
///
/// Implemented by the application's account database; the in-memory
/// [`store::InMemoryStore`] stands in for development and tests. The
/// core only needs location-shaped access — everything else about a
/// profile stays behind this seam.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All members visible on the map, in stable creation order.
    async fn visible_members(&self) -> Vec<Member>;

    /// A single member by id.
    async fn member(&self, id: &str) -> Option<Member>;

    /// Persists a member's location. Only the owning member's record
    /// may be written.
    async fn save_location(&self, id: &str, location: UserLocation)
    -> Result<(), DirectoryError>;
}

/// Saves a raw geocoder result as a member's public location.
///
/// This is the one place the privacy transform runs: the raw coordinate
/// is fuzzed here, once, and only the fuzzed value is handed to the
/// store. Re-invoking with the same raw input is safe (each attempt
/// fuzzes the raw value, never a stored one).
///
/// # Errors
///
/// Returns [`DirectoryError::Privacy`] for non-finite or out-of-range
/// coordinates, or [`DirectoryError::MemberNotFound`] from the store.
pub async fn save_raw_location(
    store: &dyn ProfileStore,
    id: &str,
    lat: f64,
    lng: f64,
    raw: &RawRegion,
) -> Result<UserLocation, DirectoryError> {
    let region = reconcile_region(raw);
    let fuzzed = member_map_privacy::fuzz_coordinates(lat, lng)?;

    let location = UserLocation {
        lat: fuzzed.lat,
        lng: fuzzed.lng,
        country: region.country.clone(),
        province: NormalizedRegion::known(&region.province),
        city: NormalizedRegion::known(&region.city),
    };

    log::debug!(
        "Saving location for {id}: {} / {}",
        location.country,
        location.province.as_deref().unwrap_or("-")
    );

    store.save_location(id, location.clone()).await?;
    Ok(location)
}

/// Aggregates visible members into merged region stats for the filter
/// sidebar. Recomputed on demand; never persisted.
pub async fn region_stats(store: &dyn ProfileStore) -> Vec<RegionStat> {
    let raw: Vec<RegionStat> = store
        .visible_members()
        .await
        .into_iter()
        .filter_map(|member| member.location)
        .map(|location| RegionStat {
            country: location.country,
            province: location.province,
            count: 1,
        })
        .collect();

    stats::merge_region_stats(&raw)
}
