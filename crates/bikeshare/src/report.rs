//! Text output for the four statistics sections.
//!
//! Every section prints a heading, its results, the time it took and a
//! separator rule.

use std::io::{self, Write};
use std::time::Instant;

use bikeshare_core::formatting::{format_count, format_hms, format_number};
use bikeshare_core::models::TripDataset;
use bikeshare_core::time_utils::{month_name, weekday_name_from_number};
use bikeshare_data::aggregator::ValueCount;
use bikeshare_data::stats::{DurationStats, StationStats, TimeStats, UserStats};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

fn rule() -> String {
    "-".repeat(40)
}

fn finish<W: Write>(out: &mut W, started: Instant) -> io::Result<()> {
    let elapsed = started.elapsed().as_secs_f64();
    writeln!(out, "\nThis took {} seconds.", format_number(elapsed, 4))?;
    writeln!(out, "{}", rule())
}

// ── Sections ──────────────────────────────────────────────────────────────────

pub fn time_stats<W: Write>(out: &mut W, dataset: &TripDataset) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    let started = Instant::now();

    if let Some(stats) = TimeStats::compute(dataset) {
        writeln!(
            out,
            "The Most Common Month is: {}, count: {}\n",
            month_name(stats.month.value),
            format_count(stats.month.count as u64)
        )?;
        writeln!(
            out,
            "The Most Common Day of Week is: {}, count: {}\n",
            weekday_name_from_number(stats.weekday.value),
            format_count(stats.weekday.count as u64)
        )?;
        writeln!(
            out,
            "The Most Common Start Hour is: {}, count: {}\n",
            stats.hour.value,
            format_count(stats.hour.count as u64)
        )?;
    } else {
        debug!("time stats skipped: no trips");
    }

    finish(out, started)
}

pub fn station_stats<W: Write>(out: &mut W, dataset: &TripDataset) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;
    let started = Instant::now();

    if let Some(stats) = StationStats::compute(dataset) {
        let lines = [
            ("The Most Common Start Station is", &stats.start_station),
            ("The Most Common End Station is", &stats.end_station),
            ("The Most Common Start To End Station is", &stats.route),
        ];
        for (label, mode) in lines {
            match mode {
                Some(mode) => write_mode(out, label, mode)?,
                None => debug!("{}: no station recorded", label),
            }
        }
    } else {
        debug!("station stats skipped: no trips");
    }

    finish(out, started)
}

pub fn trip_duration_stats<W: Write>(out: &mut W, dataset: &TripDataset) -> io::Result<()> {
    writeln!(out, "\nCalculating Trip Duration...\n")?;
    let started = Instant::now();

    if let Some(stats) = DurationStats::compute(dataset) {
        writeln!(
            out,
            "Total Travel Time is: {}\n",
            format_hms(stats.total_seconds as f64)
        )?;
        writeln!(
            out,
            "Average Travel Time is: {}\n",
            format_hms(stats.mean_seconds)
        )?;
    } else {
        debug!("duration stats skipped: no trips");
    }

    finish(out, started)
}

pub fn user_stats<W: Write>(out: &mut W, dataset: &TripDataset) -> io::Result<()> {
    writeln!(out, "\nCalculating User Stats...\n")?;
    let started = Instant::now();

    let stats = UserStats::compute(dataset);

    writeln!(out, "Total Users for Each Type is:")?;
    write!(out, "{}", render_counts(&stats.user_types))?;
    writeln!(out)?;

    if let Some(genders) = &stats.genders {
        writeln!(out, "Total Users for Each Gender is:")?;
        write!(out, "{}", render_counts(genders))?;
        writeln!(out)?;
    }

    if let Some(years) = &stats.birth_years {
        writeln!(out, "The Earliest Year of Birth is: {}\n", years.earliest)?;
        writeln!(out, "The Most Recent Year of Birth is: {}\n", years.latest)?;
        writeln!(
            out,
            "The Most Common Year of Birth is: {}\n",
            years.most_common.value
        )?;
    }

    finish(out, started)
}

/// Run all four sections in order.
pub fn all_stats<W: Write>(out: &mut W, dataset: &TripDataset) -> io::Result<()> {
    time_stats(out, dataset)?;
    station_stats(out, dataset)?;
    trip_duration_stats(out, dataset)?;
    user_stats(out, dataset)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_mode<W: Write>(out: &mut W, label: &str, mode: &ValueCount<String>) -> io::Result<()> {
    writeln!(
        out,
        "{}: {}, count: {}\n",
        label,
        mode.value,
        format_count(mode.count as u64)
    )
}

/// Two-column listing of category counts, labels left-aligned.
fn render_counts(counts: &[ValueCount<String>]) -> String {
    let width = counts.iter().map(|c| c.value.width()).max().unwrap_or(0);
    let mut out = String::new();
    for c in counts {
        let pad = " ".repeat(width - c.value.width());
        out.push_str(&format!("{}{}    {}\n", c.value, pad, format_count(c.count as u64)));
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
