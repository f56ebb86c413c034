use crate::core::coordinate::{Coordinate, GeoError, LatLon, Location};

/// Mean Earth radius in meters (IUGG)
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Calculate the Haversine distance between two GPS points in meters
///
/// Both points are `(latitude, longitude)` in degrees and are validated
/// before anything is computed.
///
/// # Errors
/// `GeoError::OutOfRange` naming the first or second point and the axis
/// that is out of bounds.
pub fn haversine_distance_m(p1: LatLon, p2: LatLon) -> Result<f64, GeoError> {
    let a = Coordinate::validate_at(p1, Location::First)?;
    let b = Coordinate::validate_at(p2, Location::Second)?;
    Ok(a.distance_to(&b))
}

impl Coordinate {
    /// Great-circle distance to `other` in meters on a spherical Earth
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine(self.lat(), self.lon(), other.lat(), other.lon())
    }
}

#[inline]
fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_M * central_angle(a)
}

/// Central angle in radians from the haversine term `a`
#[inline]
fn central_angle(a: f64) -> f64 {
    // rounding can push a just past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Axis;

    #[test]
    fn test_zero_distance() {
        let p = (40.7128, -74.0060);
        let distance = haversine_distance_m(p, p).unwrap();
        assert!(distance.abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_along_equator() {
        let expected = EARTH_RADIUS_M * 1.0_f64.to_radians();
        let got = haversine_distance_m((0.0, 0.0), (0.0, 1.0)).unwrap();
        assert!(
            ((got - expected) / expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            got
        );
    }

    #[test]
    fn test_symmetric() {
        let london = (51.5074, -0.1278);
        let paris = (48.8566, 2.3522);
        assert_eq!(
            haversine_distance_m(london, paris).unwrap(),
            haversine_distance_m(paris, london).unwrap()
        );
    }

    #[test]
    fn test_london_to_paris() {
        // Roughly 344 km
        let distance = haversine_distance_m((51.5074, -0.1278), (48.8566, 2.3522)).unwrap();
        assert!((distance - 344_000.0).abs() < 10_000.0, "got {}", distance);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let distance = haversine_distance_m((0.0, 0.0), (0.0, 180.0)).unwrap();
        let half = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((distance - half).abs() < 1e-6);
        assert!(!distance.is_nan());
    }

    #[test]
    fn test_central_angle_clamps_rounding_error() {
        let above = 1.0 + f64::EPSILON;
        let below = -f64::EPSILON;

        // unclamped, both produce NaN from the square roots
        assert!((1.0 - above).sqrt().is_nan());
        assert!(below.sqrt().is_nan());

        assert_eq!(central_angle(above), std::f64::consts::PI);
        assert_eq!(central_angle(below), 0.0);
        assert_eq!(central_angle(1.0), std::f64::consts::PI);
    }

    #[test]
    fn test_near_antipodal_never_nan() {
        let half = std::f64::consts::PI * EARTH_RADIUS_M;
        for (p1, p2) in [
            ((89.9999999, 0.0), (-89.9999999, 180.0)),
            ((45.0, -179.9999999), (-45.0, 0.0000001)),
            ((-33.123456789, 151.0), (33.123456789, -29.0)),
        ] {
            let distance = haversine_distance_m(p1, p2).unwrap();
            assert!(!distance.is_nan(), "{:?} -> {:?}", p1, p2);
            assert!(distance <= half);
            assert!((distance - half).abs() < 1.0, "got {}", distance);
        }
    }

    #[test]
    fn test_rejects_first_latitude() {
        let err = haversine_distance_m((91.0, 0.0), (0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            GeoError::OutOfRange {
                location: Location::First,
                axis: Axis::Latitude,
                value: 91.0,
            }
        );
    }

    #[test]
    fn test_rejects_first_longitude() {
        let err = haversine_distance_m((0.0, 181.0), (0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            GeoError::OutOfRange {
                location: Location::First,
                axis: Axis::Longitude,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_second_point() {
        let err = haversine_distance_m((0.0, 0.0), (-90.01, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            GeoError::OutOfRange {
                location: Location::Second,
                ..
            }
        ));
    }

    #[test]
    fn test_agrees_with_geo_crate() {
        use geo::HaversineDistance;

        let boston = Coordinate::new(42.3601, -71.0589).unwrap();
        let jfk = Coordinate::new(40.6413, -73.7781).unwrap();

        let ours = boston.distance_to(&jfk);
        let theirs = geo::Point::from(boston).haversine_distance(&geo::Point::from(jfk));
        assert!(((ours - theirs) / theirs).abs() < 1e-4, "{} vs {}", ours, theirs);
    }
}
