//! Centralized validation and helper functions.

/// Maximum number of records accepted from a single report (DOS protection)
pub const MAX_RECORDS: usize = 100_000;

/// Maximum number of values accepted from a single sample file
pub const MAX_SAMPLES: usize = 10_000;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(records.len()).is_some() {
///     return Err(...);
/// }
/// records.push(record); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Same as [`check_record_limit`], for sample file values.
#[must_use]
pub fn check_sample_limit(count: usize) -> Option<String> {
    if count >= MAX_SAMPLES {
        Some(format!(
            "Too many sample values: adding another would exceed maximum of {MAX_SAMPLES}"
        ))
    } else {
        None
    }
}

/// A percent deviation threshold must be finite and non-negative.
///
/// # Examples
///
/// ```
/// use calib_match::utils::validation::is_valid_percent;
///
/// assert!(is_valid_percent(30.0));
/// assert!(is_valid_percent(0.0));
/// assert!(!is_valid_percent(-1.0));
/// assert!(!is_valid_percent(f64::NAN));
/// ```
#[must_use]
pub fn is_valid_percent(percent: f64) -> bool {
    percent.is_finite() && percent >= 0.0
}

/// Clap value parser for percent thresholds
///
/// # Errors
///
/// Returns a message if the value is not a number or is negative.
pub fn parse_percent(s: &str) -> Result<f64, String> {
    let percent: f64 = s
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if is_valid_percent(percent) {
        Ok(percent)
    } else {
        Err(format!("percent must be a finite value >= 0, got {s}"))
    }
}
