use serde::{Deserialize, Serialize};

use crate::core::coordinate::LatLon;

/// A labeled airport location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    pub fn new(code: impl Into<String>, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            lat,
            lon,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> LatLon {
        (self.lat, self.lon)
    }
}

/// Nearest-neighbor match of one source point against the target set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "sourceIndex")]
    pub source_index: usize,
    #[serde(rename = "sourcePoint")]
    pub source: LatLon,
    #[serde(rename = "targetIndex")]
    pub target_index: usize,
    #[serde(rename = "targetPoint")]
    pub target: LatLon,
    #[serde(rename = "distanceM")]
    pub distance_m: f64,
}
