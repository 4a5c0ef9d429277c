//! Turns rendered page markup into [`WeatherTable`]s.
//!
//! Extraction is a pure function of the markup and the requested date, so it can be
//! exercised with static fixture pages instead of a live browser.

pub mod cells;
pub mod error;
pub mod history_table;
pub(crate) mod observations;
pub(crate) mod summaries;

use crate::extract::error::ExtractError;
use crate::extract::history_table::HistoryTable;
use crate::types::daily_summary::DailySummary;
use crate::types::observation::ObservationRecord;
use crate::types::station::StationId;
use crate::types::table::{ObservationTable, SummaryTable, TableRecord, WeatherTable};
use chrono::NaiveDate;
use log::{debug, warn};

/// Extracts the rows of type `R` from the history table in `html`.
///
/// An empty table yields an empty [`WeatherTable`], not an error.
///
/// # Errors
///
/// Returns an [`ExtractError`] if the table cannot be located, its header lacks a
/// required column, or it has rows but none of them could be read.
pub fn extract_table<R: TableRecord>(
    html: &str,
    station: &StationId,
    date: NaiveDate,
) -> Result<WeatherTable<R>, ExtractError> {
    let table = HistoryTable::parse(html)?;
    let records = R::extract(&table, date)?;

    if records.is_empty() && !table.rows().is_empty() {
        return Err(ExtractError::MalformedRows {
            rows: table.rows().len(),
        });
    }
    if records.is_empty() {
        warn!("History table for {} on {} has no rows", station, date);
    } else if records.len() < table.rows().len() {
        debug!(
            "Kept {} of {} rows for {} on {}",
            records.len(),
            table.rows().len(),
            station,
            date
        );
    }
    Ok(WeatherTable::from_records(station.clone(), records))
}

/// Extracts 5-minute observations. See [`extract_table`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pws_history::{extract_observations, StationId};
///
/// let html = "<table>\
///     <thead><tr><th>Time</th><th>Temperature</th><th>Humidity</th></tr></thead>\
///     <tbody><tr><td>6:00 AM</td><td>55.4 °F</td><td>N/A</td></tr></tbody>\
/// </table>";
/// let station = StationId::new("KCAJAMES3").unwrap();
/// let date = NaiveDate::from_ymd_opt(2021, 7, 28).unwrap();
///
/// let table = extract_observations(html, &station, date).unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.records()[0].temperature, Some(55.4));
/// assert_eq!(table.records()[0].humidity, None);
/// ```
pub fn extract_observations(
    html: &str,
    station: &StationId,
    date: NaiveDate,
) -> Result<ObservationTable, ExtractError> {
    extract_table::<ObservationRecord>(html, station, date)
}

/// Extracts daily summaries. See [`extract_table`].
pub fn extract_daily_summaries(
    html: &str,
    station: &StationId,
    date: NaiveDate,
) -> Result<SummaryTable, ExtractError> {
    extract_table::<DailySummary>(html, station, date)
}
