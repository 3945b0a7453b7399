use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::{BikeshareError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when omitted)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Check that the data directory exists and is a directory.
    pub fn validate(&self) -> Result<()> {
        validate_data_dir(&self.data_dir)
    }
}

fn validate_data_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(BikeshareError::Config(format!(
            "data directory {} does not exist",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(BikeshareError::Config(format!(
            "data directory {} is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["bikeshare"]);

        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_data_dir() {
        let settings = Settings::parse_from(["bikeshare", "--data-dir", "/srv/bikeshare"]);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/bikeshare"));
    }

    #[test]
    fn test_settings_cli_log_file() {
        let settings = Settings::parse_from(["bikeshare", "--log-file", "/tmp/bikeshare.log"]);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/bikeshare.log")));
    }

    #[test]
    fn test_settings_rejects_unknown_log_level() {
        let result = Settings::try_parse_from(["bikeshare", "--log-level", "VERBOSE"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_args_debug_overrides_log_level() {
        let settings = Settings::from_args(["bikeshare", "--log-level", "ERROR", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_validate_missing_dir() {
        let settings =
            Settings::parse_from(["bikeshare", "--data-dir", "/tmp/does-not-exist-bikeshare-xyz"]);
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_existing_dir() {
        let settings = Settings::parse_from(["bikeshare", "--data-dir", "."]);
        assert!(settings.validate().is_ok());
    }
}
