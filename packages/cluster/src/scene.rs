//! Rendering-session marker state and the clustering render pass.
//!
//! A [`MarkerScene`] owns everything a map session needs: the
//! insertion-ordered marker registry and the current selection. Marker
//! lifecycle: `Clustered → Standalone(selected) → Clustered` on
//! select/deselect, and `Clustered → Expanded` when a cluster is
//! clicked and the camera zooms toward the cluster floor.

use std::collections::HashMap;

use member_map_location_models::{DisplayCoordinate, GeoPoint};

use crate::{
    BadgeTier, CLUSTER_RADIUS_PX, CLUSTER_ZOOM_FLOOR, FlyTo, MapEntity, Viewport, mercator,
};

/// Zoom applied when flying to a selected member.
const SELECT_ZOOM: f64 = 14.0;

/// Zoom step applied when expanding a cluster.
const EXPAND_ZOOM_STEP: f64 = 2.0;

/// Marker state for one rendering session.
#[derive(Debug, Default)]
pub struct MarkerScene {
    /// Markers in insertion order; the clustering pass iterates this
    /// order, which keeps cluster composition stable across renders.
    markers: Vec<DisplayCoordinate>,
    /// id -> index into `markers`.
    index: HashMap<String, usize>,
    /// Currently selected member, if any.
    selected: Option<String>,
}

impl MarkerScene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the visible marker set.
    ///
    /// Entries without a coordinate are excluded entirely — a missing
    /// coordinate must not produce a phantom marker at the map origin.
    /// A selection pointing at a member that is no longer visible is
    /// cleared.
    pub fn set_markers<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Option<GeoPoint>)>,
    {
        self.markers.clear();
        self.index.clear();

        for (id, point) in entries {
            let Some(point) = point else {
                continue;
            };
            if !point.is_valid() {
                continue;
            }
            if let Some(&slot) = self.index.get(&id) {
                self.markers[slot].lat = point.lat;
                self.markers[slot].lng = point.lng;
                continue;
            }
            self.index.insert(id.clone(), self.markers.len());
            self.markers.push(DisplayCoordinate {
                user_id: id,
                lat: point.lat,
                lng: point.lng,
            });
        }

        if let Some(selected) = &self.selected {
            if !self.index.contains_key(selected) {
                self.selected = None;
            }
        }
    }

    /// Number of visible markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the scene has no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The currently selected member id, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The display coordinate for a member, if visible.
    #[must_use]
    pub fn display_coordinate(&self, id: &str) -> Option<GeoPoint> {
        self.index
            .get(id)
            .map(|&slot| GeoPoint::new(self.markers[slot].lat, self.markers[slot].lng))
    }

    /// Selects a member: its marker leaves the clustering layer and is
    /// rendered standalone so it can never hide inside a cluster.
    ///
    /// Returns the camera operation recentering on the member's display
    /// coordinate, or `None` if the member is not visible (selection is
    /// unchanged in that case).
    pub fn select(&mut self, id: &str) -> Option<FlyTo> {
        let point = self.display_coordinate(id)?;
        self.selected = Some(id.to_string());
        Some(FlyTo {
            center: point,
            zoom: SELECT_ZOOM,
        })
    }

    /// Clears the selection; the member returns to the clustering layer
    /// at the same display coordinate it had before selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Camera operation for a clicked cluster: zoom toward it, stepping
    /// until the cluster floor where clustering disables and the
    /// cluster fully resolves into de-overlapped markers.
    #[must_use]
    pub fn expand_cluster(viewport: &Viewport, cluster_center: GeoPoint) -> FlyTo {
        FlyTo {
            center: cluster_center,
            zoom: (viewport.zoom + EXPAND_ZOOM_STEP).min(CLUSTER_ZOOM_FLOOR),
        }
    }

    /// Runs one render pass over the current snapshot.
    ///
    /// Pure and synchronous: the same scene state and viewport always
    /// produce the same entities. The selected marker (if any) is
    /// emitted standalone; the rest cluster greedily by screen-pixel
    /// proximity unless the zoom is at or above [`CLUSTER_ZOOM_FLOOR`].
    #[must_use]
    pub fn render(&self, viewport: &Viewport) -> Vec<MapEntity> {
        let mut entities = Vec::new();

        if let Some(selected) = &self.selected {
            if let Some(point) = self.display_coordinate(selected) {
                entities.push(MapEntity::Marker {
                    id: selected.clone(),
                    lat: point.lat,
                    lng: point.lng,
                    selected: true,
                });
            }
        }

        let clusterable: Vec<&DisplayCoordinate> = self
            .markers
            .iter()
            .filter(|m| Some(m.user_id.as_str()) != self.selected.as_deref())
            .collect();

        if viewport.zoom >= CLUSTER_ZOOM_FLOOR {
            entities.extend(clusterable.into_iter().map(|m| MapEntity::Marker {
                id: m.user_id.clone(),
                lat: m.lat,
                lng: m.lng,
                selected: false,
            }));
            return entities;
        }

        entities.extend(cluster_pass(&clusterable, viewport.zoom));
        entities
    }
}

/// One forming cluster during the greedy pass.
struct ClusterSeed<'a> {
    seed_px: (f64, f64),
    members: Vec<&'a DisplayCoordinate>,
}

/// Greedy screen-space clustering: each marker joins the first existing
/// cluster whose seed is within [`CLUSTER_RADIUS_PX`], else starts a new
/// one. Deterministic for a fixed marker order.
fn cluster_pass(markers: &[&DisplayCoordinate], zoom: f64) -> Vec<MapEntity> {
    let mut seeds: Vec<ClusterSeed<'_>> = Vec::new();

    for marker in markers {
        let px = mercator::project(GeoPoint::new(marker.lat, marker.lng), zoom);
        match seeds
            .iter_mut()
            .find(|s| mercator::pixel_distance(s.seed_px, px) <= CLUSTER_RADIUS_PX)
        {
            Some(seed) => seed.members.push(marker),
            None => seeds.push(ClusterSeed {
                seed_px: px,
                members: vec![marker],
            }),
        }
    }

    seeds
        .into_iter()
        .map(|seed| {
            if let [only] = seed.members.as_slice() {
                return MapEntity::Marker {
                    id: only.user_id.clone(),
                    lat: only.lat,
                    lng: only.lng,
                    selected: false,
                };
            }

            #[allow(clippy::cast_precision_loss)]
            let n = seed.members.len() as f64;
            let lat = seed.members.iter().map(|m| m.lat).sum::<f64>() / n;
            let lng = seed.members.iter().map(|m| m.lng).sum::<f64>() / n;

            MapEntity::Cluster {
                lat,
                lng,
                count: seed.members.len(),
                tier: BadgeTier::for_count(seed.members.len()),
            }
        })
        .collect()
}
