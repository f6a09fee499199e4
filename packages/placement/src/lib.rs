#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deterministic spatial de-overlap for map markers.
//!
//! Privacy-fuzzed coordinates snap to a coarse grid, so members of the
//! same city routinely land on the exact same point and their markers
//! stack. This crate spreads coincident markers into a sunflower spiral:
//! members are bucketed by grid cell, and each member of a multi-member
//! cell gets an angular/radial offset derived from a stable hash of its
//! id plus the golden angle. The same visible set always produces the
//! same placement, so markers never jump between re-renders triggered by
//! unrelated state changes.
//!
//! Placement only affects display coordinates; stored locations are
//! never mutated.

pub mod hash;

use std::collections::{BTreeMap, HashMap};

use member_map_location_models::GeoPoint;

/// Grid cell size used to consider two coordinates "the same place",
/// in degrees (~3 km). Tunable: close in magnitude to the privacy fuzz
/// bound, so a dense city may resolve as one group or several depending
/// on where members land on the grid.
pub const GROUP_TOLERANCE_DEG: f64 = 0.03;

/// Base spread radius in degrees (~2 km), tuned for typical marker size.
pub const BASE_RADIUS_DEG: f64 = 0.02;

/// The golden angle (~137.5°) in radians. Incrementing by it per member
/// yields a visually even spiral without global optimization.
pub const GOLDEN_ANGLE_RAD: f64 = 2.399_963_229_728_653;

/// One member's input to placement: id plus privacy-transformed
/// coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInput {
    /// Member identifier; also the determinism anchor.
    pub id: String,
    /// Display-candidate latitude.
    pub lat: f64,
    /// Display-candidate longitude.
    pub lng: f64,
}

impl PlacementInput {
    /// Creates a new placement input.
    #[must_use]
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
        }
    }
}

/// The grid cell a coordinate falls into at [`GROUP_TOLERANCE_DEG`]
/// resolution.
#[allow(clippy::cast_possible_truncation)]
fn grid_cell(lat: f64, lng: f64) -> (i64, i64) {
    (
        (lat / GROUP_TOLERANCE_DEG).round() as i64,
        (lng / GROUP_TOLERANCE_DEG).round() as i64,
    )
}

/// Computes de-overlapped display coordinates for the visible set.
///
/// * Members whose grid cell is unique are placed at exactly their input
///   coordinate (bitwise — no drift for the common case).
/// * Members sharing a cell are spread around the first member's
///   coordinate: base angle from [`hash::base_angle`], incremented by
///   the golden angle per ordinal, radius growing with `sqrt(n)` and
///   with the ordinal so outer members sit farther out. Distinct radii
///   per ordinal guarantee pairwise-distinct positions.
/// * Duplicate ids are collapsed deterministically: the later entry's
///   coordinate wins, at the first occurrence's ordinal slot.
/// * Entries with non-finite or out-of-range coordinates are skipped
///   (never defaulted to the map origin).
///
/// Iteration order is the input order, so placement is exactly
/// reproducible for a fixed input. Safe to re-invoke with identical
/// input after a caller retry.
#[must_use]
pub fn place_users(users: &[PlacementInput]) -> BTreeMap<String, GeoPoint> {
    // Collapse duplicates, keeping first-occurrence order.
    let mut entries: Vec<(String, GeoPoint)> = Vec::with_capacity(users.len());
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(users.len());

    for user in users {
        let point = GeoPoint::new(user.lat, user.lng);
        if !point.is_valid() {
            log::debug!("Skipping member {} with invalid coordinate", user.id);
            continue;
        }
        if let Some(&slot) = slots.get(user.id.as_str()) {
            entries[slot].1 = point;
        } else {
            slots.insert(user.id.as_str(), entries.len());
            entries.push((user.id.clone(), point));
        }
    }

    // Bucket by grid cell, members in insertion order.
    let mut groups: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (index, (_, point)) in entries.iter().enumerate() {
        groups
            .entry(grid_cell(point.lat, point.lng))
            .or_default()
            .push(index);
    }

    let mut placed = BTreeMap::new();
    for members in groups.values() {
        if let [only] = members.as_slice() {
            let (id, point) = &entries[*only];
            placed.insert(id.clone(), *point);
            continue;
        }

        let anchor = entries[members[0]].1;
        // Longitude degrees shrink with latitude; rescale so the spiral
        // stays round on screen. Clamped away from zero near the poles.
        let lng_scale = anchor.lat.to_radians().cos().max(0.1);
        let count = members.len();

        for (ordinal, &index) in members.iter().enumerate() {
            let (id, _) = &entries[index];
            #[allow(clippy::cast_precision_loss)]
            let (i, n) = (ordinal as f64, count as f64);
            let angle = hash::base_angle(id) + GOLDEN_ANGLE_RAD * i;
            let radius = BASE_RADIUS_DEG * n.sqrt() * ((i + 1.0) / n);

            placed.insert(
                id.clone(),
                GeoPoint::new(
                    anchor.lat + radius * angle.cos(),
                    anchor.lng + radius * angle.sin() / lng_scale,
                ),
            );
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_coincident() -> Vec<PlacementInput> {
        (0..5)
            .map(|i| PlacementInput::new(format!("user-{i}"), 31.23, 121.47))
            .collect()
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(place_users(&[]).is_empty());
    }

    #[test]
    fn unique_member_placed_exactly() {
        let users = vec![
            PlacementInput::new("alone", 39.90, 116.40),
            PlacementInput::new("far-away", 22.54, 114.05),
        ];
        let placed = place_users(&users);
        let point = placed["alone"];
        assert_eq!(point.lat.to_bits(), 39.90_f64.to_bits());
        assert_eq!(point.lng.to_bits(), 116.40_f64.to_bits());
    }

    #[test]
    fn placement_is_deterministic() {
        let users = five_coincident();
        let first = place_users(&users);
        let second = place_users(&users);
        assert_eq!(first.len(), second.len());
        for (id, point) in &first {
            let other = second[id];
            assert_eq!(point.lat.to_bits(), other.lat.to_bits(), "{id} lat");
            assert_eq!(point.lng.to_bits(), other.lng.to_bits(), "{id} lng");
        }
    }

    #[test]
    fn coincident_members_separate() {
        let placed = place_users(&five_coincident());
        assert_eq!(placed.len(), 5);

        let points: Vec<GeoPoint> = placed.values().copied().collect();
        for (a, point_a) in points.iter().enumerate() {
            for point_b in &points[a + 1..] {
                assert!(
                    point_a != point_b,
                    "two members placed at the same point: {point_a:?}"
                );
            }
        }
    }

    #[test]
    fn spread_stays_within_expected_radius() {
        let placed = place_users(&five_coincident());
        let max_radius = BASE_RADIUS_DEG * 5.0_f64.sqrt();
        let lng_scale = 31.23_f64.to_radians().cos();

        for (id, point) in &placed {
            let dlat = point.lat - 31.23;
            let dlng = (point.lng - 121.47) * lng_scale;
            let distance = dlat.hypot(dlng);
            assert!(
                distance <= max_radius + 1e-9,
                "{id} placed {distance} degrees out (max {max_radius})"
            );
            assert!(distance > 0.0, "{id} not moved at all");
        }
    }

    #[test]
    fn near_duplicates_within_tolerance_group_together() {
        // Same grid cell, slightly different coordinates.
        let users = vec![
            PlacementInput::new("a", 31.230, 121.470),
            PlacementInput::new("b", 31.231, 121.469),
        ];
        let placed = place_users(&users);
        assert!(placed["a"] != placed["b"]);
        // Both moved off their input points (grouped, so spiraled).
        assert!(placed["a"] != GeoPoint::new(31.230, 121.470));
    }

    #[test]
    fn duplicate_id_later_entry_wins() {
        let users = vec![
            PlacementInput::new("dup", 39.90, 116.40),
            PlacementInput::new("other", 22.54, 114.05),
            PlacementInput::new("dup", 22.54, 114.05),
        ];
        let placed = place_users(&users);
        assert_eq!(placed.len(), 2);
        // "dup" is grouped with "other" at the later coordinate.
        let dlat = placed["dup"].lat - 22.54;
        assert!(dlat.abs() <= BASE_RADIUS_DEG * 2.0_f64.sqrt() + 1e-9);
    }

    #[test]
    fn invalid_coordinates_skipped() {
        let users = vec![
            PlacementInput::new("nan", f64::NAN, 116.40),
            PlacementInput::new("oob", 39.90, 700.0),
            PlacementInput::new("ok", 39.90, 116.40),
        ];
        let placed = place_users(&users);
        assert_eq!(placed.len(), 1);
        assert!(placed.contains_key("ok"));
    }

    #[test]
    fn same_member_same_offset_across_sets() {
        // The base angle depends only on the id, so a member keeps its
        // direction from the anchor even as unrelated members churn —
        // as long as its ordinal within the group is unchanged.
        let set_a = vec![
            PlacementInput::new("stable", 31.23, 121.47),
            PlacementInput::new("peer-1", 31.23, 121.47),
        ];
        let set_b = vec![
            PlacementInput::new("stable", 31.23, 121.47),
            PlacementInput::new("peer-2", 31.23, 121.47),
        ];
        let placed_a = place_users(&set_a);
        let placed_b = place_users(&set_b);
        assert_eq!(
            placed_a["stable"].lat.to_bits(),
            placed_b["stable"].lat.to_bits()
        );
        assert_eq!(
            placed_a["stable"].lng.to_bits(),
            placed_b["stable"].lng.to_bits()
        );
    }
}
