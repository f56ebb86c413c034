// Core algorithm exports
pub mod coordinate;
pub mod distance;
pub mod matcher;

pub use coordinate::{Axis, Coordinate, GeoError, LatLon, Location};
pub use distance::{haversine_distance_m, EARTH_RADIUS_M};
pub use matcher::{match_closest, Matcher};
