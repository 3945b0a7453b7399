/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by half an ULP at the target precision so exact midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50".
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format an integer count with thousands separators.
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(7), "7");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Upper-case the first character and lower-case the rest.
///
/// This is how month and day answers are normalised (`"tu"` → `"Tu"`,
/// `"ALL"` → `"All"`).
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ── Hours / minutes / seconds ─────────────────────────────────────────────────

/// A duration in seconds split by successive division by 60.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    /// Remaining seconds, possibly fractional when derived from a mean.
    pub seconds: f64,
}

impl Hms {
    /// Split `total_seconds` into hours, minutes and seconds.
    ///
    /// Negative inputs are clamped to zero and the total is rounded to the
    /// hundredth of a second first.
    pub fn from_seconds(total_seconds: f64) -> Self {
        // Work in hundredths so a remainder never rounds up to 60 when printed.
        let centis = (total_seconds.max(0.0) * 100.0).round() as u64;
        let whole_minutes = centis / 6_000;
        Self {
            hours: whole_minutes / 60,
            minutes: whole_minutes % 60,
            seconds: (centis % 6_000) as f64 / 100.0,
        }
    }
}

/// Render a duration as `"<h> Hours <m> Minutes and <s> Seconds"`.
///
/// Whole seconds are printed without decimals, fractional ones with two.
///
/// ```
/// use bikeshare_core::formatting::format_hms;
///
/// assert_eq!(format_hms(3723.0), "1 Hours 2 Minutes and 3 Seconds");
/// assert_eq!(format_hms(90.5), "0 Hours 1 Minutes and 30.50 Seconds");
/// ```
pub fn format_hms(total_seconds: f64) -> String {
    let hms = Hms::from_seconds(total_seconds);
    let seconds = if hms.seconds.fract().abs() < 1e-9 {
        format!("{}", hms.seconds as u64)
    } else {
        format!("{:.2}", hms.seconds)
    };
    format!(
        "{} Hours {} Minutes and {} Seconds",
        format_count(hms.hours),
        hms.minutes,
        seconds
    )
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
