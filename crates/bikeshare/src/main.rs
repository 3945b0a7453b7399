mod bootstrap;
mod pager;
mod prompt;
mod report;
mod session;

use anyhow::{Context, Result};
use bikeshare_core::error::BikeshareError;
use bikeshare_core::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", settings.data_dir.display());

    settings.validate()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    match session::run(&settings.data_dir, stdin.lock(), stdout.lock()) {
        Ok(()) => {}
        Err(BikeshareError::InputClosed) => {
            tracing::info!("Input closed; exiting");
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("bikeshare data in {}", settings.data_dir.display())
            });
        }
    }

    Ok(())
}
