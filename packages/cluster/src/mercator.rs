//! Web Mercator screen projection.
//!
//! Clustering operates on on-screen pixel distance, not geographic
//! distance, so markers are projected into world pixel space at the
//! current zoom before grouping.

use member_map_location_models::GeoPoint;

/// Tile edge length in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude bound of the Web Mercator projection.
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Projects a coordinate to world pixel space at the given zoom.
///
/// Returns `(x, y)` with the origin at the top-left of the world tile.
/// Latitude is clamped to the Mercator bound.
#[must_use]
pub fn project(point: GeoPoint, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * 2_f64.powf(zoom);
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);

    let x = (point.lng + 180.0) / 360.0 * scale;
    let lat_rad = lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * scale;

    (x, y)
}

/// Pixel distance between two projected points.
#[must_use]
pub fn pixel_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_world_center() {
        let (x, y) = project(GeoPoint::new(0.0, 0.0), 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_doubles_coordinates() {
        let point = GeoPoint::new(39.9, 116.4);
        let (x0, y0) = project(point, 4.0);
        let (x1, y1) = project(point, 5.0);
        assert!((x1 - x0 * 2.0).abs() < 1e-6);
        assert!((y1 - y0 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn poles_are_clamped() {
        let (_, y) = project(GeoPoint::new(90.0, 0.0), 0.0);
        assert!(y.is_finite());
        assert!(y >= 0.0);
    }

    #[test]
    fn nearby_points_separate_with_zoom() {
        let a = GeoPoint::new(31.23, 121.47);
        let b = GeoPoint::new(31.24, 121.48);
        let low = pixel_distance(project(a, 4.0), project(b, 4.0));
        let high = pixel_distance(project(a, 14.0), project(b, 14.0));
        assert!(low < 1.0, "at country zoom the pair is sub-pixel: {low}");
        assert!(high > 100.0, "at city zoom the pair separates: {high}");
    }
}
