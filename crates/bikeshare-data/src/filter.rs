//! Month / day-of-week filtering of a loaded city dataset.

use std::path::Path;

use bikeshare_core::error::Result;
use bikeshare_core::models::{FilterCriteria, TripDataset};
use tracing::debug;

use crate::reader::load_city_data;

/// Keep only the trips that match `criteria`'s month and day.
///
/// The source dataset is left untouched; the result is a fresh copy.
pub fn apply_filters(dataset: &TripDataset, criteria: &FilterCriteria) -> TripDataset {
    let filtered = dataset.retain_copy(|trip| criteria.matches(trip));
    debug!(
        "Filter {} / {}: kept {} of {} trips",
        criteria.month,
        criteria.day,
        filtered.len(),
        dataset.len()
    );
    filtered
}

/// Load the city named by `criteria` and apply its month and day filters.
pub fn load_data(data_dir: &Path, criteria: &FilterCriteria) -> Result<TripDataset> {
    let dataset = load_city_data(data_dir, criteria.city)?;
    Ok(apply_filters(&dataset, criteria))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{City, DayFilter, MonthFilter, TripRecord};
    use chrono::{Month, NaiveDate, Weekday};
    use tempfile::TempDir;

    fn trip(y: i32, m: u32, d: u32) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        TripRecord::new(start, "A", "B", 120)
    }

    /// Six months of trips: one on each of Jan 2 (Mon), Jan 3 (Tue),
    /// Feb 6 (Mon), Mar 5 (Sun), Jun 5 (Mon) and Jun 9 (Fri) 2017.
    fn sample_dataset() -> TripDataset {
        TripDataset {
            city: City::Chicago,
            headers: Vec::new(),
            trips: vec![
                trip(2017, 1, 2),
                trip(2017, 1, 3),
                trip(2017, 2, 6),
                trip(2017, 3, 5),
                trip(2017, 6, 5),
                trip(2017, 6, 9),
            ],
            has_gender: true,
            has_birth_year: true,
        }
    }

    fn criteria(month: MonthFilter, day: DayFilter) -> FilterCriteria {
        FilterCriteria {
            city: City::Chicago,
            month,
            day,
        }
    }

    #[test]
    fn test_all_all_keeps_every_row() {
        let dataset = sample_dataset();
        let filtered = apply_filters(&dataset, &criteria(MonthFilter::All, DayFilter::All));
        assert_eq!(filtered.len(), dataset.len());
    }

    #[test]
    fn test_month_filter_only() {
        let dataset = sample_dataset();
        let filtered = apply_filters(
            &dataset,
            &criteria(MonthFilter::Only(Month::January), DayFilter::All),
        );
        assert_eq!(filtered.len(), 2);
        assert!(filtered.trips.iter().all(|t| t.derived.month == 1));
    }

    #[test]
    fn test_day_filter_only() {
        let dataset = sample_dataset();
        let filtered = apply_filters(
            &dataset,
            &criteria(MonthFilter::All, DayFilter::Only(Weekday::Mon)),
        );
        assert_eq!(filtered.len(), 3);
        assert!(filtered.trips.iter().all(|t| t.derived.weekday == 1));
    }

    #[test]
    fn test_sunday_filter_matches_sunday_trips() {
        let dataset = sample_dataset();
        let filtered = apply_filters(
            &dataset,
            &criteria(MonthFilter::All, DayFilter::from_input("Su").unwrap()),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.trips[0].derived.month, 3);
    }

    #[test]
    fn test_month_and_day_combined() {
        let dataset = sample_dataset();
        let filtered = apply_filters(
            &dataset,
            &criteria(MonthFilter::Only(Month::June), DayFilter::Only(Weekday::Fri)),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.trips[0].derived.weekday, 5);
    }

    #[test]
    fn test_filter_keeps_source_row_positions() {
        let mut dataset = sample_dataset();
        for (i, t) in dataset.trips.iter_mut().enumerate() {
            t.source_row = i;
        }
        let filtered = apply_filters(
            &dataset,
            &criteria(MonthFilter::Only(Month::June), DayFilter::All),
        );
        let rows: Vec<usize> = filtered.trips.iter().map(|t| t.source_row).collect();
        assert_eq!(rows, vec![4, 5]);
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let dataset = sample_dataset();
        let filtered = apply_filters(
            &dataset,
            &criteria(MonthFilter::Only(Month::April), DayFilter::All),
        );
        assert!(filtered.is_empty());
        // Optional column flags carry over even when nothing matched.
        assert!(filtered.has_gender);
        assert_eq!(dataset.len(), 6);
    }

    #[test]
    fn test_load_data_reads_and_filters() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("washington.csv"),
            [
                ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type",
                "1,2017-01-02 08:00:00,2017-01-02 08:10:00,600,A,B,Subscriber",
                "2,2017-02-06 08:00:00,2017-02-06 08:10:00,600,A,B,Customer",
                "3,2017-02-07 08:00:00,2017-02-07 08:10:00,600,A,B,Customer",
            ]
            .join("\n"),
        )
        .unwrap();

        let filtered = load_data(
            dir.path(),
            &FilterCriteria {
                city: City::Washington,
                month: MonthFilter::Only(Month::February),
                day: DayFilter::Only(Weekday::Mon),
            },
        )
        .unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.trips[0].raw[0], "2");
    }
}
