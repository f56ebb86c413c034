//! Geo Matcher - great-circle distances and nearest-neighbor matching
//!
//! This library computes haversine distances between latitude/longitude
//! coordinates and matches every point of one set to the closest point of
//! another, e.g. GPS fixes to the nearest known airport.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance_m, match_closest, Coordinate, GeoError, LatLon, Matcher, EARTH_RADIUS_M};
pub use models::{Airport, MatchRecord, MatchReport, NearestAirport};
pub use services::{closest_airport, load_airports_csv, load_points_csv, AirportError};
