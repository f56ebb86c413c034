// Service exports
pub mod airports;

pub use airports::{
    closest_airport, load_airports_csv, load_airports_from_reader, load_points_csv,
    load_points_from_reader, AirportError,
};
