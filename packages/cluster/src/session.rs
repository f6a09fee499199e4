//! Map rendering session: de-overlap placement plus clustering.
//!
//! A [`MapSession`] is the client-side composition of the placement
//! engine and the marker scene. It recomputes display coordinates
//! whenever the visible member set changes (filter, search, poll tick)
//! and leaves them untouched across selection changes, so a marker
//! never moves just because it was clicked.

use member_map_location_models::GeoPoint;
use member_map_placement::{PlacementInput, place_users};

use crate::{FlyTo, MapEntity, Viewport, scene::MarkerScene};

/// One map session's complete rendering state.
#[derive(Debug)]
pub struct MapSession {
    scene: MarkerScene,
    viewport: Viewport,
}

impl MapSession {
    /// Creates a session with the given initial viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scene: MarkerScene::new(),
            viewport,
        }
    }

    /// Replaces the visible member set and recomputes placement.
    ///
    /// Members without a coordinate are excluded. De-overlap runs over
    /// the full set, so group ordinals — and therefore spiral slots —
    /// are derived from the order given here.
    pub fn refresh(&mut self, members: &[(String, Option<GeoPoint>)]) {
        let inputs: Vec<PlacementInput> = members
            .iter()
            .filter_map(|(id, point)| {
                point.map(|p| PlacementInput::new(id.clone(), p.lat, p.lng))
            })
            .collect();

        let placed = place_users(&inputs);

        self.scene.set_markers(
            members
                .iter()
                .map(|(id, _)| (id.clone(), placed.get(id).copied())),
        );
    }

    /// Updates the viewport (pan/zoom).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Selects a member and moves the camera to its display coordinate.
    pub fn select(&mut self, id: &str) -> Option<FlyTo> {
        let fly = self.scene.select(id)?;
        self.viewport = Viewport::new(fly.center, fly.zoom);
        Some(fly)
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.scene.deselect();
    }

    /// The display coordinate currently assigned to a member.
    #[must_use]
    pub fn display_coordinate(&self, id: &str) -> Option<GeoPoint> {
        self.scene.display_coordinate(id)
    }

    /// Renders the current snapshot.
    #[must_use]
    pub fn render(&self) -> Vec<MapEntity> {
        self.scene.render(&self.viewport)
    }

    /// Camera operation for a clicked cluster.
    #[must_use]
    pub fn expand_cluster(&self, cluster_center: GeoPoint) -> FlyTo {
        MarkerScene::expand_cluster(&self.viewport, cluster_center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BadgeTier, CLUSTER_ZOOM_FLOOR};

    fn coincident_members(n: usize) -> Vec<(String, Option<GeoPoint>)> {
        (0..n)
            .map(|i| (format!("user-{i}"), Some(GeoPoint::new(31.23, 121.47))))
            .collect()
    }

    fn country_viewport() -> Viewport {
        Viewport::new(GeoPoint::new(35.0, 105.0), 4.0)
    }

    #[test]
    fn five_coincident_members_cluster_then_resolve() {
        let mut session = MapSession::new(country_viewport());
        session.refresh(&coincident_members(5));

        // Country zoom: one small cluster of five.
        let entities = session.render();
        assert_eq!(entities.len(), 1);
        assert!(matches!(
            entities[0],
            MapEntity::Cluster {
                count: 5,
                tier: BadgeTier::Small,
                ..
            }
        ));

        // At the cluster floor the five resolve into distinct markers.
        session.set_viewport(Viewport::new(
            GeoPoint::new(31.23, 121.47),
            CLUSTER_ZOOM_FLOOR,
        ));
        let entities = session.render();
        assert_eq!(entities.len(), 5);
        for (a, entity_a) in entities.iter().enumerate() {
            for entity_b in &entities[a + 1..] {
                assert_ne!(entity_a, entity_b, "markers must not coincide");
            }
        }
    }

    #[test]
    fn selection_does_not_move_markers() {
        let mut session = MapSession::new(country_viewport());
        session.refresh(&coincident_members(5));

        let before = session.display_coordinate("user-3").expect("visible");
        session.select("user-3").expect("selectable");
        session.deselect();
        assert_eq!(session.display_coordinate("user-3"), Some(before));
    }

    #[test]
    fn refresh_with_same_set_is_stable() {
        let mut session = MapSession::new(country_viewport());
        let members = coincident_members(5);
        session.refresh(&members);
        let before = session.display_coordinate("user-2").expect("visible");

        session.refresh(&members);
        let after = session.display_coordinate("user-2").expect("visible");
        assert_eq!(before.lat.to_bits(), after.lat.to_bits());
        assert_eq!(before.lng.to_bits(), after.lng.to_bits());
    }

    #[test]
    fn select_recenters_viewport() {
        let mut session = MapSession::new(country_viewport());
        session.refresh(&[("solo".to_string(), Some(GeoPoint::new(39.90, 116.40)))]);

        let fly = session.select("solo").expect("selectable");
        assert_eq!(fly.center, GeoPoint::new(39.90, 116.40));
        assert_eq!(session.viewport().center, fly.center);
    }

    #[test]
    fn members_without_coordinates_never_render() {
        let mut session = MapSession::new(country_viewport());
        session.refresh(&[
            ("located".to_string(), Some(GeoPoint::new(31.23, 121.47))),
            ("unlocated".to_string(), None),
        ]);
        assert_eq!(session.render().len(), 1);
        assert!(session.display_coordinate("unlocated").is_none());
    }

    #[test]
    fn expand_cluster_caps_at_floor() {
        let session = MapSession::new(Viewport::new(GeoPoint::new(31.23, 121.47), 12.0));
        let fly = session.expand_cluster(GeoPoint::new(31.23, 121.47));
        assert!((fly.zoom - CLUSTER_ZOOM_FLOOR).abs() < f64::EPSILON);
    }
}
