use std::fmt;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

use crate::formatting::title_case;

// ── Lookup tables ─────────────────────────────────────────────────────────────

/// Month codes accepted at the month prompt, in calendar order.
///
/// Position `i` in this table is month number `i + 1`.
pub const MONTH_CODES: [(&str, Month); 6] = [
    ("Jan", Month::January),
    ("Feb", Month::February),
    ("Mar", Month::March),
    ("Apr", Month::April),
    ("May", Month::May),
    ("Jun", Month::June),
];

/// Day codes accepted at the day prompt, Monday first.
///
/// Position `i` in this table is weekday number `i + 1`, matching
/// [`Weekday::number_from_monday`].
pub const DAY_CODES: [(&str, Weekday); 7] = [
    ("M", Weekday::Mon),
    ("Tu", Weekday::Tue),
    ("W", Weekday::Wed),
    ("Th", Weekday::Thu),
    ("F", Weekday::Fri),
    ("Sa", Weekday::Sat),
    ("Su", Weekday::Sun),
];

/// Sentinel accepted at the month and day prompts to disable that filter.
pub const ALL_KEYWORD: &str = "All";

/// Separator between start and end station in a route label.
pub const ROUTE_SEPARATOR: &str = " -> ";

// ── City ──────────────────────────────────────────────────────────────────────

/// A city with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    /// Every supported city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Lower-case key the user types at the prompt.
    pub fn key(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYork => "new york",
            City::Washington => "washington",
        }
    }

    /// File name of the city's CSV inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Match trimmed, case-folded user input against the city keys.
    pub fn from_input(input: &str) -> Option<City> {
        let normalised = input.trim().to_lowercase();
        City::ALL.into_iter().find(|c| c.key() == normalised)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        };
        f.write_str(label)
    }
}

// ── Month / day filters ───────────────────────────────────────────────────────

/// Month restriction chosen at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// Parse a month answer (`"jan"`, `" Feb "`, `"all"`, ...).
    ///
    /// Returns `None` for anything outside [`MONTH_CODES`] plus `All`.
    pub fn from_input(input: &str) -> Option<MonthFilter> {
        let normalised = title_case(input.trim());
        if normalised == ALL_KEYWORD {
            return Some(MonthFilter::All);
        }
        MONTH_CODES
            .iter()
            .find(|(code, _)| *code == normalised)
            .map(|(_, month)| MonthFilter::Only(*month))
    }

    /// 1-based month number, or `None` for [`MonthFilter::All`].
    pub fn number(&self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(m) => Some(m.number_from_month()),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all months"),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

/// Day-of-week restriction chosen at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Parse a day answer (`"m"`, `"TU"`, `"all"`, ...).
    pub fn from_input(input: &str) -> Option<DayFilter> {
        let normalised = title_case(input.trim());
        if normalised == ALL_KEYWORD {
            return Some(DayFilter::All);
        }
        DAY_CODES
            .iter()
            .find(|(code, _)| *code == normalised)
            .map(|(_, day)| DayFilter::Only(*day))
    }

    /// Weekday number (1 = Monday ... 7 = Sunday), or `None` for
    /// [`DayFilter::All`].
    pub fn number(&self) -> Option<u32> {
        match self {
            DayFilter::All => None,
            DayFilter::Only(d) => Some(d.number_from_monday()),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all days"),
            DayFilter::Only(d) => f.write_str(crate::time_utils::weekday_name(*d)),
        }
    }
}

/// Validated answers to the three filter prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCriteria {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterCriteria {
    /// Criteria that keep every trip for `city`.
    pub fn unfiltered(city: City) -> Self {
        Self {
            city,
            month: MonthFilter::All,
            day: DayFilter::All,
        }
    }

    /// `true` when `trip` passes both the month and the day restriction.
    pub fn matches(&self, trip: &TripRecord) -> bool {
        let month_ok = self
            .month
            .number()
            .map_or(true, |m| trip.derived.month == m);
        let day_ok = self
            .day
            .number()
            .map_or(true, |d| trip.derived.weekday == d);
        month_ok && day_ok
    }
}

// ── Trip records ──────────────────────────────────────────────────────────────

/// Helper columns computed from a trip's start time and stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumns {
    /// Calendar month of the start time (1-12).
    pub month: u32,
    /// Weekday of the start time (1 = Monday ... 7 = Sunday).
    pub weekday: u32,
    /// Hour of day of the start time (0-23).
    pub hour: u32,
    /// `"<start> -> <end>"` station pair label.
    pub route: String,
}

impl DerivedColumns {
    pub fn derive(start_time: &NaiveDateTime, start_station: &str, end_station: &str) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday().number_from_monday(),
            hour: start_time.hour(),
            route: format!("{start_station}{ROUTE_SEPARATOR}{end_station}"),
        }
    }
}

/// One row of a city's trip file.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Trip length in whole seconds.
    pub trip_duration: u64,
    /// `None` when the cell was empty.
    pub user_type: Option<String>,
    /// Only populated for cities whose file has a `Gender` column.
    pub gender: Option<String>,
    /// Only populated for cities whose file has a `Birth Year` column.
    pub birth_year: Option<i32>,
    /// Every cell of the source row, in header order.
    pub raw: Vec<String>,
    /// Zero-based position among the data rows of the source file. Survives
    /// filtering, so it labels the row when raw data is shown.
    pub source_row: usize,
    pub derived: DerivedColumns,
}

impl TripRecord {
    /// Build a record from the required fields; optional fields start empty.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: u64,
    ) -> Self {
        let start_station = start_station.into();
        let end_station = end_station.into();
        let derived = DerivedColumns::derive(&start_time, &start_station, &end_station);
        Self {
            start_time,
            start_station,
            end_station,
            trip_duration,
            user_type: None,
            gender: None,
            birth_year: None,
            raw: Vec::new(),
            source_row: 0,
            derived,
        }
    }

    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    pub fn with_raw(mut self, raw: Vec<String>) -> Self {
        self.raw = raw;
        self
    }

    pub fn with_source_row(mut self, source_row: usize) -> Self {
        self.source_row = source_row;
        self
    }
}

/// Trips for a single city together with the shape of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDataset {
    pub city: City,
    /// Header row of the source file, used when displaying raw rows.
    pub headers: Vec<String>,
    pub trips: Vec<TripRecord>,
    /// Whether the source file had a `Gender` column.
    pub has_gender: bool,
    /// Whether the source file had a `Birth Year` column.
    pub has_birth_year: bool,
}

impl TripDataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// A copy of this dataset keeping only the trips accepted by `keep`.
    pub fn retain_copy(&self, keep: impl Fn(&TripRecord) -> bool) -> TripDataset {
        TripDataset {
            city: self.city,
            headers: self.headers.clone(),
            trips: self.trips.iter().filter(|t| keep(t)).cloned().collect(),
            has_gender: self.has_gender,
            has_birth_year: self.has_birth_year,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
