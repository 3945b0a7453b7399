//! Shared domain types for the bikeshare explorer.
//!
//! Holds the city / filter / trip model, the crate-wide error type, CLI
//! settings and the small formatting and timestamp helpers used by the data
//! and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
