//! The interactive explore-and-restart loop.

use std::io::{BufRead, Write};
use std::path::Path;

use bikeshare_core::error::Result;
use bikeshare_data::filter::load_data;
use tracing::info;

use crate::pager::show_raw_data;
use crate::prompt::Prompter;
use crate::report;

pub const GREETING: &str = "\nHello! Let's explore some US bikeshare data!";
pub const NO_DATA: &str = "\nNo Data Exists For the Chosen City Month and Day";
pub const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Done,
}

/// Run report cycles against the files in `data_dir` until the user declines
/// to restart.
pub fn run<R: BufRead, W: Write>(data_dir: &Path, input: R, output: W) -> Result<()> {
    let mut prompter = Prompter::new(input, output);
    writeln!(prompter.output(), "{}", GREETING)?;

    let mut state = SessionState::Active;
    let mut cycles = 0u32;
    while state == SessionState::Active {
        run_cycle(data_dir, &mut prompter)?;
        cycles += 1;

        state = if prompter.ask_yes_no(RESTART_PROMPT)? {
            SessionState::Active
        } else {
            SessionState::Done
        };
    }

    info!("Session finished after {} cycle(s)", cycles);
    Ok(())
}

/// One pass: ask filters, load, report, offer raw rows.
fn run_cycle<R: BufRead, W: Write>(data_dir: &Path, prompter: &mut Prompter<R, W>) -> Result<()> {
    let criteria = prompter.get_filters()?;
    let dataset = load_data(data_dir, &criteria)?;
    info!(
        "{} / {} / {}: {} trips",
        criteria.city,
        criteria.month,
        criteria.day,
        dataset.len()
    );

    if dataset.is_empty() {
        writeln!(prompter.output(), "{}", NO_DATA)?;
        return Ok(());
    }

    report::all_stats(prompter.output(), &dataset)?;
    show_raw_data(prompter, &dataset)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
