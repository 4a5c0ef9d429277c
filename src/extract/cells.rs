//! Coercion of cell text into typed values.

use chrono::{Datelike, NaiveDate, NaiveTime};

const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M:%S %p", "%H:%M", "%H:%M:%S"];

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Texts the site shows in place of a missing value.
fn is_placeholder(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "--" | "-" | "n/a" | "na" | "null"
    )
}

/// Reads the leading number of a cell, ignoring any unit that follows it.
///
/// Returns `None` for placeholders such as `--` or `N/A` and for empty cells.
///
/// ```
/// use pws_history::parse_measurement;
///
/// assert_eq!(parse_measurement("45.3 °F"), Some(45.3));
/// assert_eq!(parse_measurement("-2.5°C"), Some(-2.5));
/// assert_eq!(parse_measurement("1,013.2 hPa"), Some(1013.2));
/// assert_eq!(parse_measurement("--"), None);
/// assert_eq!(parse_measurement("N/A"), None);
/// ```
pub fn parse_measurement(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?.replace(',', "");
    let numeric: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        .collect();
    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    numeric.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Reads a wind direction in degrees from either a number or a compass label.
pub fn parse_wind_direction(text: &str) -> Option<f64> {
    if let Some(degrees) = parse_measurement(text) {
        return Some(degrees.rem_euclid(360.0));
    }
    let label = text.split_whitespace().next()?.to_ascii_uppercase();
    let point = match label.as_str() {
        "NORTH" => 0,
        "EAST" => 4,
        "SOUTH" => 8,
        "WEST" => 12,
        other => COMPASS_POINTS.iter().position(|p| *p == other)?,
    };
    Some(point as f64 * 22.5)
}

/// Reads the time of day from a time cell such as `12:04 AM` or `00:04`.
///
/// The cell may also carry a date in front of the time; only the time is used.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut candidates = vec![tokens.join(" ")];
    if tokens.len() >= 2 {
        candidates.push(tokens[tokens.len() - 2..].join(" "));
    }
    if let Some(last) = tokens.last() {
        candidates.push(last.to_string());
    }

    candidates.iter().find_map(|candidate| {
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(candidate, format).ok())
    })
}

/// Reads the date of a daily summary row (`7/1/2021`, `2021-07-01`, or `7/1` in the
/// year of `requested`).
pub fn parse_summary_date(text: &str, requested: NaiveDate) -> Option<NaiveDate> {
    let token = text.split_whitespace().next()?;
    for format in ["%m/%d/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return Some(date);
        }
    }
    let (month, day) = token.split_once('/')?;
    NaiveDate::from_ymd_opt(requested.year(), month.parse().ok()?, day.parse().ok()?)
}

/// All values in a cell that may hold several of them (`84.0 °F 70.0 °F -- °F`).
/// Placeholders count as missing values; unit labels are skipped.
pub fn value_tokens(text: &str) -> Vec<Option<f64>> {
    text.split_whitespace()
        .filter_map(|token| match parse_measurement(token) {
            Some(value) => Some(Some(value)),
            None if is_placeholder(token) => Some(None),
            None => None,
        })
        .collect()
}
