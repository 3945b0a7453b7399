//! Line-based prompts that repeat until the answer is valid.

use std::io::{BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, DayFilter, FilterCriteria, MonthFilter};
use tracing::debug;

pub const CITY_PROMPT: &str = "\nWould you like to see data for Chicago, New York, or Washington? Please type out the full city name.\n";
pub const CITY_RETRY: &str =
    "\nYour choice must be Chicago, New York, or Washington. Please try again.\n";
pub const MONTH_PROMPT: &str = "\nWhich month? Please type Jan, Feb, Mar, Apr, May, Jun, or All.\n";
pub const MONTH_RETRY: &str =
    "\nYour choice must be Jan, Feb, Mar, Apr, May, Jun, or All. Please try again.\n";
pub const DAY_PROMPT: &str = "\nWhich day? Please type M, Tu, W, Th, F, Sa, Su, or All.\n";
pub const DAY_RETRY: &str =
    "\nYour choice must be M, Tu, W, Th, F, Sa, Su, or All. Please try again.\n";
pub const YES_NO_RETRY: &str = "\nYour choice must be yes or no.\n";

/// Normalise a yes/no answer. Anything else is rejected.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Reads answers from `input` and writes prompts (and reports) to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The output sink, for components that print between prompts.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for a city until one of the supported names is typed.
    pub fn ask_city(&mut self) -> Result<City> {
        self.ask_until(CITY_PROMPT, CITY_RETRY, City::from_input)
    }

    /// Ask for a month code or `All`.
    pub fn ask_month(&mut self) -> Result<MonthFilter> {
        self.ask_until(MONTH_PROMPT, MONTH_RETRY, MonthFilter::from_input)
    }

    /// Ask for a day code or `All`.
    pub fn ask_day(&mut self) -> Result<DayFilter> {
        self.ask_until(DAY_PROMPT, DAY_RETRY, DayFilter::from_input)
    }

    /// Ask a yes/no question; `true` means yes.
    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        self.ask_until(prompt, YES_NO_RETRY, parse_yes_no)
    }

    /// Ask the three filter questions in order.
    pub fn get_filters(&mut self) -> Result<FilterCriteria> {
        let city = self.ask_city()?;
        let month = self.ask_month()?;
        let day = self.ask_day()?;
        writeln!(self.output, "{}", "-".repeat(40))?;
        debug!("Filters chosen: {} / {} / {}", city, month, day);
        Ok(FilterCriteria { city, month, day })
    }

    /// Show `prompt`, then `retry` after every rejected answer, until `parse`
    /// accepts a line.
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        let mut message = prompt;
        loop {
            let answer = self.read_answer(message)?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!("Rejected answer {:?}", answer.trim());
            message = retry;
        }
    }

    fn read_answer(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD and the answer is simply rejected.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
