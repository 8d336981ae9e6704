//! Date helper functions

use chrono::NaiveDate;
use std::fmt::Write;

/// Render an ISO `YYYY-MM-DD` date as "Month Day, Year".
///
/// # Examples
/// ```
/// assert_eq!(blog_rs::helpers::format_date("2020-06-05"), "June 5, 2020");
/// ```
///
/// A string that is not an ISO date is returned unchanged.
pub fn format_date(iso: &str) -> String {
    format_date_with(iso, "LL")
}

/// Render an ISO date with a Moment.js-compatible format string.
///
/// `LL` is the long form used by [`format_date`].
pub fn format_date_with(iso: &str, format: &str) -> String {
    let Ok(date) = NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") else {
        return iso.to_string();
    };

    let chrono_format = if format == "LL" {
        "%B %-d, %Y".to_string()
    } else {
        moment_to_chrono_format(format)
    };

    // chrono reports unknown specifiers as a formatting error
    let mut out = String::new();
    if write!(out, "{}", date.format(&chrono_format)).is_err() {
        return iso.to_string();
    }
    out
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each field
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
