//! The four descriptive statistics computed for a filtered dataset.
//!
//! Each computation is independent and read-only. Time, station and duration
//! stats return `None` for an empty dataset; callers are expected to skip
//! reporting entirely in that case.

use bikeshare_core::models::TripDataset;

use crate::aggregator::{mode, value_counts, ValueCount};

// ── Time stats ────────────────────────────────────────────────────────────────

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Month number (1-12).
    pub month: ValueCount<u32>,
    /// Weekday number (1 = Monday).
    pub weekday: ValueCount<u32>,
    /// Hour of day (0-23).
    pub hour: ValueCount<u32>,
}

impl TimeStats {
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        let trips = &dataset.trips;
        Some(Self {
            month: mode(trips.iter().map(|t| t.derived.month))?,
            weekday: mode(trips.iter().map(|t| t.derived.weekday))?,
            hour: mode(trips.iter().map(|t| t.derived.hour))?,
        })
    }
}

// ── Station stats ─────────────────────────────────────────────────────────────

/// Most popular start station, end station and start/end pair.
///
/// Blank station cells are not counted, and a route is only counted when both
/// of its stations are present. A field is `None` when every candidate cell
/// was blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<ValueCount<String>>,
    pub end_station: Option<ValueCount<String>>,
    /// Route label in `"start -> end"` form.
    pub route: Option<ValueCount<String>>,
}

impl StationStats {
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }
        let trips = &dataset.trips;
        let start = mode(
            trips
                .iter()
                .map(|t| t.start_station.as_str())
                .filter(|s| !is_blank(s)),
        );
        let end = mode(
            trips
                .iter()
                .map(|t| t.end_station.as_str())
                .filter(|s| !is_blank(s)),
        );
        let route = mode(
            trips
                .iter()
                .filter(|t| !is_blank(&t.start_station) && !is_blank(&t.end_station))
                .map(|t| t.derived.route.as_str()),
        );
        Some(Self {
            start_station: start.map(|vc| vc.map(str::to_string)),
            end_station: end.map(|vc| vc.map(str::to_string)),
            route: route.map(|vc| vc.map(str::to_string)),
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ── Duration stats ────────────────────────────────────────────────────────────

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_seconds: u64,
    pub mean_seconds: f64,
}

impl DurationStats {
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }
        let total: u64 = dataset.trips.iter().map(|t| t.trip_duration).sum();
        Some(Self {
            total_seconds: total,
            mean_seconds: total as f64 / dataset.len() as f64,
        })
    }
}

// ── User stats ────────────────────────────────────────────────────────────────

/// Earliest, latest and most common year of birth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: ValueCount<i32>,
}

/// User demographics. Blank cells are not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<ValueCount<String>>,
    /// `None` when the city file has no gender column.
    pub genders: Option<Vec<ValueCount<String>>>,
    /// `None` when the city file has no birth-year column or every cell in
    /// the filtered rows was blank.
    pub birth_years: Option<BirthYearStats>,
}

impl UserStats {
    pub fn compute(dataset: &TripDataset) -> Self {
        let trips = &dataset.trips;

        let user_types = owned(value_counts(
            trips.iter().filter_map(|t| t.user_type.as_deref()),
        ));

        let genders = dataset
            .has_gender
            .then(|| owned(value_counts(trips.iter().filter_map(|t| t.gender.as_deref()))));

        let birth_years = if dataset.has_birth_year {
            birth_year_stats(trips.iter().filter_map(|t| t.birth_year))
        } else {
            None
        };

        Self {
            user_types,
            genders,
            birth_years,
        }
    }
}

fn birth_year_stats(years: impl Iterator<Item = i32> + Clone) -> Option<BirthYearStats> {
    let earliest = years.clone().min()?;
    let latest = years.clone().max()?;
    let most_common = mode(years)?;
    Some(BirthYearStats {
        earliest,
        latest,
        most_common,
    })
}

fn owned(counts: Vec<ValueCount<&str>>) -> Vec<ValueCount<String>> {
    counts.into_iter().map(|vc| vc.map(str::to_string)).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
