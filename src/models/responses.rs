use serde::{Deserialize, Serialize};
use crate::models::domain::{Airport, MatchRecord};

/// Result of a nearest-airport lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestAirport {
    pub airport: Airport,
    #[serde(rename = "distanceM")]
    pub distance_m: f64,
}

/// Result of matching one point set against another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub matches: Vec<MatchRecord>,
    #[serde(rename = "totalTargets")]
    pub total_targets: usize,
}
