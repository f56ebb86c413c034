use crate::core::{Coordinate, GeoError, LatLon, Location, Matcher};
use crate::models::{Airport, NearestAirport};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or querying labeled coordinates
#[derive(Debug, Error)]
pub enum AirportError {
    #[error("CSV not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("CSV is missing required column: {0}")]
    MissingColumn(String),

    #[error("No rows loaded from CSV")]
    EmptyDataset,

    #[error("Invalid number in column {column} on line {line}: {value:?}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Geo(#[from] GeoError),
}

const AIRPORT_COLUMNS: [&str; 4] = ["code", "name", "lat", "lon"];
const POINT_COLUMNS: [&str; 2] = ["lat", "lon"];

/// Load airports from a CSV file with header `code,name,lat,lon`
///
/// Header names are matched case-insensitively and may carry surrounding
/// whitespace; extra columns are ignored. Coordinate ranges are not checked
/// here, they are checked when the airports are matched against.
pub fn load_airports_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Airport>, AirportError> {
    let file = open(path.as_ref())?;
    let airports = load_airports_from_reader(file)?;

    tracing::debug!(
        "Loaded {} airports from {}",
        airports.len(),
        path.as_ref().display()
    );
    Ok(airports)
}

/// Load airports from any CSV source, see [`load_airports_csv`]
pub fn load_airports_from_reader<R: Read>(reader: R) -> Result<Vec<Airport>, AirportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = resolve_columns(rdr.headers()?, &AIRPORT_COLUMNS)?;
    let [code, name, lat, lon] = [columns[0], columns[1], columns[2], columns[3]];

    let mut airports = Vec::new();
    for result in rdr.records() {
        let record = result?;
        airports.push(Airport {
            code: field(&record, code).to_string(),
            name: field(&record, name).to_string(),
            lat: parse_number(&record, lat, "lat")?,
            lon: parse_number(&record, lon, "lon")?,
        });
    }

    if airports.is_empty() {
        return Err(AirportError::EmptyDataset);
    }
    Ok(airports)
}

/// Load plain `lat,lon` points from a CSV file
///
/// Same header and number rules as [`load_airports_csv`]. A header-only file
/// yields an empty list: an empty source set is valid for matching, and an
/// empty target set is rejected by the matcher itself.
pub fn load_points_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LatLon>, AirportError> {
    let file = open(path.as_ref())?;
    let points = load_points_from_reader(file)?;

    tracing::debug!("Loaded {} points from {}", points.len(), path.as_ref().display());
    Ok(points)
}

pub fn load_points_from_reader<R: Read>(reader: R) -> Result<Vec<LatLon>, AirportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = resolve_columns(rdr.headers()?, &POINT_COLUMNS)?;

    let mut points = Vec::new();
    for result in rdr.records() {
        let record = result?;
        points.push((
            parse_number(&record, columns[0], "lat")?,
            parse_number(&record, columns[1], "lon")?,
        ));
    }

    Ok(points)
}

/// Find the airport closest to `location`
///
/// # Errors
/// `AirportError::Geo` wrapping `OutOfRange` if the location is invalid
/// (checked first) or any airport is, or `EmptyTargetSet` for an empty slice.
pub fn closest_airport(
    location: LatLon,
    airports: &[Airport],
) -> Result<NearestAirport, AirportError> {
    let query = Coordinate::validate_at(location, Location::Query)?;

    let coordinates: Vec<LatLon> = airports.iter().map(Airport::coordinate).collect();
    let matcher = Matcher::new(&coordinates)?;
    let (index, distance_m) = matcher.nearest_to(&query);

    let airport = airports[index].clone();
    tracing::debug!("Closest airport to {:?} is {} ({:.1} m)", location, airport.code, distance_m);

    Ok(NearestAirport {
        airport,
        distance_m,
    })
}

fn open(path: &Path) -> Result<File, AirportError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AirportError::NotFound(path.to_path_buf()),
        _ => AirportError::Io(e),
    })
}

/// Map each required column name to its index in `headers`
fn resolve_columns(headers: &StringRecord, required: &[&str]) -> Result<Vec<usize>, AirportError> {
    required
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| AirportError::MissingColumn(name.to_string()))
        })
        .collect()
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn parse_number(record: &StringRecord, index: usize, column: &str) -> Result<f64, AirportError> {
    let value = field(record, index);
    value.parse::<f64>().map_err(|_| AirportError::InvalidNumber {
        line: record.position().map(|p| p.line()).unwrap_or(0),
        column: column.to_string(),
        value: value.to_string(),
    })
}
