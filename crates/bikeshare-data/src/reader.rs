//! CSV loading for the per-city trip files.
//!
//! Reads one city file into a [`TripDataset`], deriving month, weekday, hour
//! and route columns for every row and keeping the raw cells for display.

use std::io::Read;
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, TripDataset, TripRecord};
use bikeshare_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// One CSV row as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct CsvTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: Option<f64>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(
        rename = "Birth Year",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    birth_year: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Path of `city`'s file inside `data_dir`.
pub fn city_data_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Load the complete trip table for `city` from `data_dir`.
///
/// A missing or unreadable file is reported as [`BikeshareError::FileRead`].
pub fn load_city_data(data_dir: &Path, city: City) -> Result<TripDataset> {
    let path = city_data_path(data_dir, city);
    let file = std::fs::File::open(&path).map_err(|source| BikeshareError::FileRead {
        path: path.clone(),
        source,
    })?;

    let dataset = read_trips(city, std::io::BufReader::new(file))?;
    info!(
        "Loaded {} trips for {} from {}",
        dataset.len(),
        city,
        path.display()
    );
    Ok(dataset)
}

/// Parse trip rows for `city` from any CSV source.
///
/// Rows whose start time or duration cannot be interpreted are skipped with a
/// warning. Structural CSV failures and missing required columns are errors.
pub fn read_trips<R: Read>(city: City, source: R) -> Result<TripDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn(column.to_string()));
        }
    }
    let has_gender = headers.iter().any(|h| h == GENDER_COLUMN);
    let has_birth_year = headers.iter().any(|h| h == BIRTH_YEAR_COLUMN);

    let mut trips = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        rows_read += 1;

        // Header row is line 1.
        let line = rows_read + 1;

        let parsed: CsvTrip = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping line {}: {}", line, e);
                rows_skipped += 1;
                continue;
            }
        };

        let raw: Vec<String> = record.iter().map(str::to_string).collect();
        match into_trip(parsed, raw) {
            Ok(trip) => trips.push(trip.with_source_row(rows_read - 1)),
            Err(reason) => {
                warn!("Skipping line {}: {}", line, reason);
                rows_skipped += 1;
            }
        }
    }

    debug!(
        "{}: read {} rows, kept {}, skipped {}",
        city,
        rows_read,
        trips.len(),
        rows_skipped
    );

    Ok(TripDataset {
        city,
        headers: headers.iter().map(str::to_string).collect(),
        trips,
        has_gender,
        has_birth_year,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Validate a deserialized row and build the typed record.
fn into_trip(row: CsvTrip, raw: Vec<String>) -> std::result::Result<TripRecord, String> {
    let start_time = parse_timestamp(&row.start_time)
        .ok_or_else(|| format!("invalid start time \"{}\"", row.start_time))?;

    let duration = row
        .trip_duration
        .ok_or_else(|| "missing trip duration".to_string())?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(format!("invalid trip duration {}", duration));
    }

    let birth_year = row
        .birth_year
        .filter(|y| y.is_finite())
        .map(|y| y.trunc() as i32);

    Ok(
        TripRecord::new(start_time, row.start_station, row.end_station, duration.round() as u64)
            .with_user_type(non_empty(row.user_type))
            .with_gender(non_empty(row.gender))
            .with_birth_year(birth_year)
            .with_raw(raw),
    )
}

/// Treat blank cells the same as absent ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
