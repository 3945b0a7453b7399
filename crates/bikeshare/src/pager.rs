//! Paged display of the raw rows behind a report.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::models::{TripDataset, TripRecord};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::prompt::Prompter;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

pub const RAW_DATA_PROMPT: &str = "\nWould you like to see raw data? Enter yes or no.\n";
pub const MORE_DATA_PROMPT: &str = "\nWould you like to see more? Enter yes or no.\n";
pub const END_OF_DATA: &str =
    "\nYou have reached the last row. There is no more raw data.\n";

/// One slice of rows handed out by [`RawDataPager`].
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Position of the first row within the dataset.
    pub start: usize,
    pub rows: &'a [TripRecord],
    /// `true` when this page reaches the end of the data.
    pub is_last: bool,
}

/// Walks a dataset in [`PAGE_SIZE`] steps.
///
/// A page is final when `offset + PAGE_SIZE` reaches or passes the row count;
/// no page is produced after it.
pub struct RawDataPager<'a> {
    trips: &'a [TripRecord],
    offset: usize,
    finished: bool,
}

impl<'a> RawDataPager<'a> {
    pub fn new(trips: &'a [TripRecord]) -> Self {
        Self {
            trips,
            offset: 0,
            finished: false,
        }
    }
}

impl<'a> Iterator for RawDataPager<'a> {
    type Item = Page<'a>;

    fn next(&mut self) -> Option<Page<'a>> {
        if self.finished {
            return None;
        }
        let len = self.trips.len();
        let start = self.offset;
        if start + PAGE_SIZE >= len {
            self.finished = true;
            self.offset = len;
            return Some(Page {
                start,
                rows: &self.trips[start.min(len)..len],
                is_last: true,
            });
        }
        self.offset += PAGE_SIZE;
        Some(Page {
            start,
            rows: &self.trips[start..start + PAGE_SIZE],
            is_last: false,
        })
    }
}

/// Render a page as an aligned text table.
///
/// The first column holds each row's position in the source file, which is
/// unchanged by filtering; the remaining columns are the source file's columns. Widths are measured in terminal
/// cells.
pub fn render_page(headers: &[String], page: &Page<'_>) -> String {
    let mut table: Vec<Vec<String>> = Vec::with_capacity(page.rows.len() + 1);

    let mut header_row = vec![String::new()];
    header_row.extend(headers.iter().cloned());
    table.push(header_row);

    for trip in page.rows {
        let mut row = vec![trip.source_row.to_string()];
        for col in 0..headers.len() {
            row.push(trip.raw.get(col).cloned().unwrap_or_default());
        }
        table.push(row);
    }

    let columns = headers.len() + 1;
    let widths: Vec<usize> = (0..columns)
        .map(|c| table.iter().map(|row| row[c].width()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &table {
        let mut line = String::new();
        for (c, cell) in row.iter().enumerate() {
            if c > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            line.push_str(&" ".repeat(widths[c] - cell.width()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Offer the raw rows of `dataset`, one page per confirmation.
pub fn show_raw_data<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    dataset: &TripDataset,
) -> Result<()> {
    let mut pager = RawDataPager::new(&dataset.trips);
    let mut wants_more = prompter.ask_yes_no(RAW_DATA_PROMPT)?;

    while wants_more {
        let Some(page) = pager.next() else { break };
        debug!("Showing rows {}..{}", page.start, page.start + page.rows.len());

        let out = prompter.output();
        writeln!(out, "{}", render_page(&dataset.headers, &page))?;
        if page.is_last {
            write!(out, "{}", END_OF_DATA)?;
            break;
        }
        wants_more = prompter.ask_yes_no(MORE_DATA_PROMPT)?;
    }

    writeln!(prompter.output(), "{}", "-".repeat(40))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::City;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn dataset(rows: usize) -> TripDataset {
        let start = NaiveDate::from_ymd_opt(2017, 1, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let trips = (0..rows)
            .map(|i| {
                TripRecord::new(start, "A", "B", 60)
                    .with_raw(vec![
                        format!("id{i}"),
                        "2017-01-02 08:00:00".to_string(),
                        "A".to_string(),
                    ])
                    .with_source_row(i)
            })
            .collect();
        TripDataset {
            city: City::Washington,
            headers: vec!["".into(), "Start Time".into(), "Start Station".into()],
            trips,
            has_gender: false,
            has_birth_year: false,
        }
    }

    fn run_pager(rows: usize, answers: &str) -> String {
        let ds = dataset(rows);
        let mut p = Prompter::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new());
        show_raw_data(&mut p, &ds).unwrap();
        String::from_utf8(p.into_output()).unwrap()
    }

    // ── RawDataPager ──────────────────────────────────────────────────────────

    #[test]
    fn test_pager_twelve_rows_boundaries() {
        let ds = dataset(12);
        let pages: Vec<(usize, usize, bool)> = RawDataPager::new(&ds.trips)
            .map(|p| (p.start, p.start + p.rows.len(), p.is_last))
            .collect();
        assert_eq!(pages, vec![(0, 5, false), (5, 10, false), (10, 12, true)]);
    }

    #[test]
    fn test_pager_exact_multiple_ends_on_full_page() {
        let ds = dataset(10);
        let pages: Vec<(usize, usize, bool)> = RawDataPager::new(&ds.trips)
            .map(|p| (p.start, p.start + p.rows.len(), p.is_last))
            .collect();
        assert_eq!(pages, vec![(0, 5, false), (5, 10, true)]);
    }

    #[test]
    fn test_pager_covers_every_row_once() {
        let ds = dataset(23);
        let ids: Vec<String> = RawDataPager::new(&ds.trips)
            .flat_map(|p| p.rows.iter().map(|t| t.raw[0].clone()))
            .collect();
        let expected: Vec<String> = (0..23).map(|i| format!("id{i}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_pager_small_dataset_single_last_page() {
        let ds = dataset(3);
        let mut pager = RawDataPager::new(&ds.trips);
        let page = pager.next().unwrap();
        assert_eq!(page.rows.len(), 3);
        assert!(page.is_last);
        assert!(pager.next().is_none());
        assert!(pager.next().is_none());
    }

    // ── render_page ───────────────────────────────────────────────────────────

    #[test]
    fn test_render_page_aligns_columns() {
        let ds = dataset(2);
        let page = RawDataPager::new(&ds.trips).next().unwrap();
        let text = render_page(&ds.headers, &page);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Start Time"));
        assert!(lines[1].starts_with("0  id0"));
        assert!(lines[2].starts_with("1  id1"));
        let col = lines[0].find("Start Time").unwrap();
        assert_eq!(&lines[1][col..col + 19], "2017-01-02 08:00:00");
    }

    #[test]
    fn test_render_page_labels_rows_by_source_position() {
        // Rows 3 and 17 of the file remain after filtering.
        let mut ds = dataset(2);
        ds.trips[0].source_row = 3;
        ds.trips[1].source_row = 17;
        let page = RawDataPager::new(&ds.trips).next().unwrap();
        let text = render_page(&ds.headers, &page);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[1].starts_with("3   id0"));
        assert!(lines[2].starts_with("17  id1"));
    }

    #[test]
    fn test_render_page_wide_characters() {
        let mut ds = dataset(1);
        ds.trips[0].raw[2] = "Café Ünter".to_string();
        let page = RawDataPager::new(&ds.trips).next().unwrap();
        let text = render_page(&ds.headers, &page);
        assert!(text.contains("Café Ünter"));
    }

    #[test]
    fn test_render_page_pads_short_rows() {
        let mut ds = dataset(1);
        ds.trips[0].raw.truncate(1);
        let page = RawDataPager::new(&ds.trips).next().unwrap();
        let text = render_page(&ds.headers, &page);
        assert_eq!(text.lines().count(), 2);
    }

    // ── show_raw_data ─────────────────────────────────────────────────────────

    #[test]
    fn test_show_raw_data_declined() {
        let out = run_pager(12, "no\n");
        assert!(!out.contains("id0"));
        assert!(!out.contains(END_OF_DATA));
    }

    #[test]
    fn test_show_raw_data_stop_after_first_page() {
        let out = run_pager(12, "yes\nno\n");
        for i in 0..5 {
            assert!(out.contains(&format!("id{i}")));
        }
        assert!(!out.contains("id5"));
        assert!(!out.contains(END_OF_DATA));
    }

    #[test]
    fn test_show_raw_data_until_exhausted() {
        let out = run_pager(12, "yes\nyes\nyes\n");
        for i in 0..12 {
            assert_eq!(out.matches(&format!("  id{i} ")).count(), 1, "row id{i}");
        }
        assert_eq!(out.matches(END_OF_DATA).count(), 1);
        // No "more?" question after the final page.
        assert_eq!(out.matches(MORE_DATA_PROMPT).count(), 2);
    }

    #[test]
    fn test_show_raw_data_yes_yes_no_stops_after_two_pages() {
        let out = run_pager(12, "yes\nyes\nno\n");
        assert!(out.contains("id9"));
        assert!(!out.contains("id10"));
        assert!(!out.contains(END_OF_DATA));
    }

    #[test]
    fn test_show_raw_data_invalid_answer_reprompts() {
        let out = run_pager(3, "sure\nyes\n");
        assert!(out.contains("id2"));
        assert!(out.contains(END_OF_DATA));
        assert!(out.contains(crate::prompt::YES_NO_RETRY));
    }
}
