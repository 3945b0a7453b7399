//! Data layer for the bikeshare explorer.
//!
//! Reads per-city trip CSV files, applies month / day filters, and computes
//! the time, station, duration and user statistics shown to the user.

pub mod aggregator;
pub mod filter;
pub mod reader;
pub mod stats;

pub use bikeshare_core as core;
