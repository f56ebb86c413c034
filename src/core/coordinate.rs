use std::fmt;
use thiserror::Error;

/// Latitude/longitude pair in degrees, as supplied by callers
pub type LatLon = (f64, f64);

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Errors raised by distance computation and matching
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("{axis} of {location} must be in {}, got {value}", .axis.range())]
    OutOfRange {
        location: Location,
        axis: Axis,
        value: f64,
    },

    #[error("target set must not be empty (cannot match to an empty set)")]
    EmptyTargetSet,
}

/// Coordinate axis that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn range(&self) -> &'static str {
        match self {
            Axis::Latitude => "[-90, 90]",
            Axis::Longitude => "[-180, 180]",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Where an invalid coordinate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Constructed directly through `Coordinate::new`
    Standalone,
    /// First argument of a distance call
    First,
    /// Second argument of a distance call
    Second,
    /// Position in the source sequence of a match
    Source(usize),
    /// Position in the target sequence of a match
    Target(usize),
    /// Single point looked up against a prepared target set
    Query,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Standalone => write!(f, "coordinate"),
            Location::First => write!(f, "first coordinate"),
            Location::Second => write!(f, "second coordinate"),
            Location::Source(i) => write!(f, "source[{}]", i),
            Location::Target(j) => write!(f, "target[{}]", j),
            Location::Query => write!(f, "query point"),
        }
    }
}

/// A validated geographic coordinate in degrees
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
/// The only way to obtain one is through a validating constructor, so
/// downstream code never has to re-check the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        Self::validate_at((lat, lon), Location::Standalone)
    }

    /// Validate a plain pair, tagging any failure with `location`
    ///
    /// Latitude is checked before longitude. NaN fails both checks.
    pub fn validate_at(point: LatLon, location: Location) -> Result<Self, GeoError> {
        let (lat, lon) = point;
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
            return Err(GeoError::OutOfRange {
                location,
                axis: Axis::Latitude,
                value: lat,
            });
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lon) {
            return Err(GeoError::OutOfRange {
                location,
                axis: Axis::Longitude,
                value: lon,
            });
        }
        Ok(Self { lat, lon })
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[inline]
    pub fn as_lat_lon(&self) -> LatLon {
        (self.lat, self.lon)
    }
}

impl TryFrom<LatLon> for Coordinate {
    type Error = GeoError;

    fn try_from(point: LatLon) -> Result<Self, Self::Error> {
        Coordinate::new(point.0, point.1)
    }
}

impl From<Coordinate> for LatLon {
    fn from(c: Coordinate) -> Self {
        c.as_lat_lon()
    }
}

// geo uses x = longitude, y = latitude
impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}
