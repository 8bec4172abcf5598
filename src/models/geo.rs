use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Used for query rectangle corners and the
/// point under test; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Whether `point` lies inside the axis-aligned rectangle spanned by
/// `south_west` and `north_east`, inclusive on every edge.
///
/// Longitude is compared as a plain range: a box crossing the antimeridian
/// (south-west longitude greater than north-east) matches nothing.
pub fn in_bounds(point: GeoCoordinate, south_west: GeoCoordinate, north_east: GeoCoordinate) -> bool {
    south_west.latitude <= point.latitude
        && point.latitude <= north_east.latitude
        && south_west.longitude <= point.longitude
        && point.longitude <= north_east.longitude
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOUTH_WEST: GeoCoordinate = GeoCoordinate::new(53.118755, -1.448822);
    const NORTH_EAST: GeoCoordinate = GeoCoordinate::new(55.118755, 2.448822);

    #[test]
    fn point_inside_box_is_included() {
        assert!(in_bounds(
            GeoCoordinate::new(54.118755, 2.148822),
            SOUTH_WEST,
            NORTH_EAST
        ));
    }

    #[test]
    fn point_south_of_box_is_excluded() {
        assert!(!in_bounds(
            GeoCoordinate::new(52.918755, 1.948822),
            SOUTH_WEST,
            NORTH_EAST
        ));
    }

    #[test]
    fn point_west_of_box_is_excluded() {
        assert!(!in_bounds(
            GeoCoordinate::new(54.918755, -2.948822),
            SOUTH_WEST,
            NORTH_EAST
        ));
    }

    #[test]
    fn corners_are_inclusive() {
        assert!(in_bounds(SOUTH_WEST, SOUTH_WEST, NORTH_EAST));
        assert!(in_bounds(NORTH_EAST, SOUTH_WEST, NORTH_EAST));
        assert!(in_bounds(
            GeoCoordinate::new(SOUTH_WEST.latitude, NORTH_EAST.longitude),
            SOUTH_WEST,
            NORTH_EAST
        ));
    }

    #[test]
    fn antimeridian_box_matches_nothing() {
        let south_west = GeoCoordinate::new(-10.0, 170.0);
        let north_east = GeoCoordinate::new(10.0, -170.0);
        assert!(!in_bounds(GeoCoordinate::new(0.0, 175.0), south_west, north_east));
        assert!(!in_bounds(GeoCoordinate::new(0.0, -175.0), south_west, north_east));
    }

    #[test]
    fn validity_checks_ranges() {
        assert!(GeoCoordinate::new(90.0, -180.0).is_valid());
        assert!(!GeoCoordinate::new(90.5, 0.0).is_valid());
        assert!(!GeoCoordinate::new(0.0, 180.1).is_valid());
        assert!(!GeoCoordinate::new(f64::NAN, 0.0).is_valid());
    }
}
