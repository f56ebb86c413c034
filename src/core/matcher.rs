use crate::core::coordinate::{Coordinate, GeoError, LatLon, Location};
use crate::models::MatchRecord;

/// Match each point in `source` to the closest point in `target`
///
/// Brute force: every source point is compared with every target point.
/// When several targets are equally close, the first one in target order
/// wins.
///
/// # Errors
/// * `GeoError::EmptyTargetSet` if `target` is empty, even when `source`
///   is empty too.
/// * `GeoError::OutOfRange` for the first invalid coordinate, checking all
///   of `source` and then all of `target` before any distance is computed.
pub fn match_closest(source: &[LatLon], target: &[LatLon]) -> Result<Vec<MatchRecord>, GeoError> {
    if target.is_empty() {
        return Err(GeoError::EmptyTargetSet);
    }

    let sources = validate_all(source, Location::Source)?;
    let matcher = Matcher::new(target)?;

    Ok(matcher.match_validated(&sources))
}

/// Nearest-neighbor matcher over a fixed, validated target set
///
/// Building a `Matcher` validates the targets once so repeated queries
/// (e.g. one GPS fix at a time against a loaded airport list) only have to
/// validate the query points.
#[derive(Debug, Clone)]
pub struct Matcher {
    targets: Vec<Coordinate>,
}

impl Matcher {
    /// Build a matcher over `targets`
    ///
    /// Fails with `EmptyTargetSet` before looking at any coordinate.
    pub fn new(targets: &[LatLon]) -> Result<Self, GeoError> {
        if targets.is_empty() {
            return Err(GeoError::EmptyTargetSet);
        }

        let targets = validate_all(targets, Location::Target)?;
        Ok(Self { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always false: construction rejects an empty target set
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn targets(&self) -> &[Coordinate] {
        &self.targets
    }

    /// Index of and distance to the target closest to `point`
    pub fn nearest(&self, point: LatLon) -> Result<(usize, f64), GeoError> {
        let point = Coordinate::validate_at(point, Location::Query)?;
        Ok(self.nearest_to(&point))
    }

    /// Match every point in `source`, validating all of them first
    pub fn match_all(&self, source: &[LatLon]) -> Result<Vec<MatchRecord>, GeoError> {
        let sources = validate_all(source, Location::Source)?;
        Ok(self.match_validated(&sources))
    }

    fn match_validated(&self, sources: &[Coordinate]) -> Vec<MatchRecord> {
        tracing::debug!(
            "Matching {} source points against {} targets",
            sources.len(),
            self.targets.len()
        );

        sources
            .iter()
            .enumerate()
            .map(|(source_index, point)| {
                let (target_index, distance_m) = self.nearest_to(point);
                MatchRecord {
                    source_index,
                    source: point.as_lat_lon(),
                    target_index,
                    target: self.targets[target_index].as_lat_lon(),
                    distance_m,
                }
            })
            .collect()
    }

    /// Same as [`Matcher::nearest`] for an already validated point
    pub fn nearest_to(&self, point: &Coordinate) -> (usize, f64) {
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;

        for (index, target) in self.targets.iter().enumerate() {
            let distance = point.distance_to(target);
            // strict comparison keeps the first of equal minima
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }

        (best_index, best_distance)
    }
}

fn validate_all(
    points: &[LatLon],
    location: fn(usize) -> Location,
) -> Result<Vec<Coordinate>, GeoError> {
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| Coordinate::validate_at(p, location(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Axis;
    use crate::core::distance::haversine_distance_m;

    #[test]
    fn test_match_closest_basic() {
        let a = [(0.0, 0.0), (0.0, 2.0)];
        let b = [(0.0, 1.0), (0.0, 3.0)];

        let result = match_closest(&a, &b).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].source_index, 0);
        assert_eq!(result[0].target_index, 0);
        assert_eq!(result[0].target, (0.0, 1.0));
        assert_eq!(
            result[0].distance_m,
            haversine_distance_m((0.0, 0.0), (0.0, 1.0)).unwrap()
        );

        // (0,2) is equidistant from (0,1) and (0,3); first wins
        assert_eq!(result[1].source_index, 1);
        assert_eq!(result[1].target_index, 0);
        assert!(result[1].distance_m > 0.0);
    }

    #[test]
    fn test_tie_breaks_on_first_target() {
        let result = match_closest(&[(0.0, 2.0)], &[(0.0, 1.0), (0.0, 3.0)]).unwrap();
        assert_eq!(result[0].target_index, 0);

        let dup = match_closest(&[(10.0, 10.0)], &[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]).unwrap();
        assert_eq!(dup[0].target_index, 0);
    }

    #[test]
    fn test_picks_later_target_when_strictly_closer() {
        let result = match_closest(&[(0.0, 0.0)], &[(0.0, 5.0), (0.0, 3.0), (0.0, -1.0)]).unwrap();
        assert_eq!(result[0].target_index, 2);
        assert_eq!(result[0].target, (0.0, -1.0));
    }

    #[test]
    fn test_empty_source() {
        let result = match_closest(&[], &[(0.0, 0.0)]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_target() {
        assert_eq!(
            match_closest(&[(0.0, 0.0)], &[]).unwrap_err(),
            GeoError::EmptyTargetSet
        );
        assert_eq!(match_closest(&[], &[]).unwrap_err(), GeoError::EmptyTargetSet);
    }

    #[test]
    fn test_empty_target_reported_before_bad_source() {
        let err = match_closest(&[(500.0, 0.0)], &[]).unwrap_err();
        assert_eq!(err, GeoError::EmptyTargetSet);
    }

    #[test]
    fn test_invalid_source_names_index() {
        let err = match_closest(&[(0.0, 0.0), (0.0, 190.0)], &[(0.0, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            GeoError::OutOfRange {
                location: Location::Source(1),
                axis: Axis::Longitude,
                value: 190.0,
            }
        );
    }

    #[test]
    fn test_invalid_target_aborts_even_with_empty_source() {
        let err = match_closest(&[], &[(0.0, 0.0), (-95.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            GeoError::OutOfRange {
                location: Location::Target(1),
                axis: Axis::Latitude,
                ..
            }
        ));
    }

    #[test]
    fn test_sources_validated_before_targets() {
        let err = match_closest(&[(0.0, 200.0)], &[(100.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            GeoError::OutOfRange {
                location: Location::Source(0),
                ..
            }
        ));
    }

    #[test]
    fn test_matcher_reuse() {
        let matcher = Matcher::new(&[(0.0, 1.0), (0.0, 3.0)]).unwrap();
        assert_eq!(matcher.len(), 2);
        assert!(!matcher.is_empty());

        let (index, distance) = matcher.nearest((0.0, 2.9)).unwrap();
        assert_eq!(index, 1);
        assert!(distance > 0.0);

        let records = matcher.match_all(&[(0.0, 0.0), (0.0, 4.0)]).unwrap();
        assert_eq!(records[0].target_index, 0);
        assert_eq!(records[1].target_index, 1);
    }

    #[test]
    fn test_matcher_nearest_rejects_invalid_point() {
        let matcher = Matcher::new(&[(0.0, 0.0)]).unwrap();
        let err = matcher.nearest((0.0, -181.0)).unwrap_err();
        assert!(matches!(
            err,
            GeoError::OutOfRange {
                location: Location::Query,
                axis: Axis::Longitude,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "longitude of query point must be in [-180, 180], got -181"
        );
    }

    #[test]
    fn test_matcher_new_rejects_empty() {
        assert_eq!(Matcher::new(&[]).unwrap_err(), GeoError::EmptyTargetSet);
    }
}
