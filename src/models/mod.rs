// Model exports
pub mod domain;
pub mod responses;

pub use domain::{Airport, MatchRecord};
pub use responses::{MatchReport, NearestAirport};
