//! Contains [`WeatherTable`], the ordered collection of rows scraped for one station,
//! and the [`TableRecord`] trait that ties a row type to its frequency, its
//! extraction logic and its data frame layout.

use crate::extract::error::ExtractError;
use crate::extract::history_table::HistoryTable;
use crate::extract::{observations, summaries};
use crate::types::daily_summary::DailySummary;
use crate::types::frequency::Frequency;
use crate::types::observation::ObservationRecord;
use crate::types::station::StationId;
use crate::types::traits::types::DateRange;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;

/// A row type that can be read from a history table and laid out as data frame columns.
pub trait TableRecord: Clone + PartialEq + Serialize + Sized {
    /// The table view this row type is read from.
    const FREQUENCY: Frequency;

    /// Reads all rows from a located history table. `date` is the day that was requested.
    fn extract(table: &HistoryTable, date: NaiveDate) -> Result<Vec<Self>, ExtractError>;

    /// The days whose pages together cover `range`, in chronological order.
    fn pages_for(range: &DateRange) -> Vec<NaiveDate>;

    /// Whether this row belongs to `range`. A page may hold rows outside of it.
    fn within(&self, range: &DateRange) -> bool;

    /// One column per field, named after [`Frequency::schema_column_names`].
    fn to_columns(records: &[Self]) -> Vec<Column>;
}

fn float_column<R>(name: &str, records: &[R], field: impl Fn(&R) -> Option<f64>) -> Column {
    let values: Vec<Option<f64>> = records.iter().map(field).collect();
    Column::new(name.into(), values)
}

impl TableRecord for ObservationRecord {
    const FREQUENCY: Frequency = Frequency::FiveMinute;

    fn extract(table: &HistoryTable, date: NaiveDate) -> Result<Vec<Self>, ExtractError> {
        observations::extract_rows(table, date)
    }

    fn pages_for(range: &DateRange) -> Vec<NaiveDate> {
        range.days().collect()
    }

    fn within(&self, range: &DateRange) -> bool {
        range.contains(self.local_timestamp.date())
    }

    fn to_columns(records: &[Self]) -> Vec<Column> {
        let timestamps: Vec<NaiveDateTime> = records.iter().map(|r| r.local_timestamp).collect();
        vec![
            Column::new("local_timestamp".into(), timestamps),
            float_column("temperature", records, |r| r.temperature),
            float_column("dew_point", records, |r| r.dew_point),
            float_column("humidity", records, |r| r.humidity),
            float_column("wind_speed", records, |r| r.wind_speed),
            float_column("wind_gust", records, |r| r.wind_gust),
            float_column("wind_direction", records, |r| r.wind_direction),
            float_column("pressure", records, |r| r.pressure),
            float_column("precipitation_rate", records, |r| r.precipitation_rate),
            float_column("precipitation_accumulated", records, |r| {
                r.precipitation_accumulated
            }),
        ]
    }
}

impl TableRecord for DailySummary {
    const FREQUENCY: Frequency = Frequency::Daily;

    fn extract(table: &HistoryTable, date: NaiveDate) -> Result<Vec<Self>, ExtractError> {
        summaries::extract_rows(table, date)
    }

    // The summary view shows the whole month around the requested day, so one page
    // per month is enough.
    fn pages_for(range: &DateRange) -> Vec<NaiveDate> {
        let mut pages: Vec<NaiveDate> = Vec::new();
        for day in range.days() {
            let same_month = pages
                .last()
                .is_some_and(|page| page.year() == day.year() && page.month() == day.month());
            if !same_month {
                pages.push(day);
            }
        }
        pages
    }

    fn within(&self, range: &DateRange) -> bool {
        range.contains(self.date)
    }

    fn to_columns(records: &[Self]) -> Vec<Column> {
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        vec![
            Column::new("date".into(), dates),
            float_column("temperature_high", records, |r| r.temperature_high),
            float_column("temperature_avg", records, |r| r.temperature_avg),
            float_column("temperature_low", records, |r| r.temperature_low),
            float_column("dew_point_high", records, |r| r.dew_point_high),
            float_column("dew_point_avg", records, |r| r.dew_point_avg),
            float_column("dew_point_low", records, |r| r.dew_point_low),
            float_column("humidity_high", records, |r| r.humidity_high),
            float_column("humidity_avg", records, |r| r.humidity_avg),
            float_column("humidity_low", records, |r| r.humidity_low),
            float_column("wind_speed_high", records, |r| r.wind_speed_high),
            float_column("wind_speed_avg", records, |r| r.wind_speed_avg),
            float_column("wind_speed_low", records, |r| r.wind_speed_low),
            float_column("pressure_high", records, |r| r.pressure_high),
            float_column("pressure_low", records, |r| r.pressure_low),
            float_column("precipitation_sum", records, |r| r.precipitation_sum),
        ]
    }
}

/// The rows scraped for one station, in the order the site produced them.
///
/// Rows from consecutive days are appended one after another, so for a date range
/// the table is in chronological order as long as the site's tables are. No
/// de-duplication or ordering check is performed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherTable<R> {
    station: StationId,
    records: Vec<R>,
}

/// 5-minute observations for a station.
pub type ObservationTable = WeatherTable<ObservationRecord>;

/// Daily summaries for a station.
pub type SummaryTable = WeatherTable<DailySummary>;

impl<R: TableRecord> WeatherTable<R> {
    pub fn new(station: StationId) -> Self {
        Self::from_records(station, Vec::new())
    }

    pub fn from_records(station: StationId, records: Vec<R>) -> Self {
        Self { station, records }
    }

    pub fn station(&self) -> &StationId {
        &self.station
    }

    pub fn frequency(&self) -> Frequency {
        R::FREQUENCY
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends the rows of `other` after the rows already in this table.
    pub fn append(&mut self, other: WeatherTable<R>) {
        self.records.extend(other.records);
    }

    /// Keeps only the rows for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&R) -> bool) {
        self.records.retain(keep);
    }

    /// Collects the table into a Polars `DataFrame` with one column per field.
    ///
    /// An empty table produces a frame with the full schema and zero rows.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(R::to_columns(&self.records))
    }

    /// The table as a `LazyFrame`, for filtering with Polars expressions or
    /// [`crate::PwsFrameFilterExt`].
    pub fn lazy(&self) -> PolarsResult<LazyFrame> {
        Ok(self.to_dataframe()?.lazy())
    }
}

impl<'a, R> IntoIterator for &'a WeatherTable<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> StationId {
        StationId::new("KCAJAMES3").unwrap()
    }

    fn record(hour: u32, minute: u32, temperature: Option<f64>) -> ObservationRecord {
        let timestamp = NaiveDate::from_ymd_opt(2021, 7, 28)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        ObservationRecord {
            temperature,
            ..ObservationRecord::empty(timestamp)
        }
    }

    #[test]
    fn test_dataframe_columns_follow_schema() -> Result<(), Box<dyn std::error::Error>> {
        let table = ObservationTable::from_records(
            station(),
            vec![record(0, 4, Some(61.2)), record(0, 9, None)],
        );
        let df = table.to_dataframe()?;

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, Frequency::FiveMinute.schema_column_names());
        assert_eq!(df.height(), 2);

        let temps = df.column("temperature")?.f64()?;
        assert_eq!(temps.get(0), Some(61.2));
        assert_eq!(temps.get(1), None);
        assert!(matches!(
            df.column("local_timestamp")?.dtype(),
            DataType::Datetime(_, None)
        ));
        Ok(())
    }

    #[test]
    fn test_empty_summary_table_keeps_schema() -> Result<(), Box<dyn std::error::Error>> {
        let table = SummaryTable::new(station());
        let df = table.to_dataframe()?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), Frequency::Daily.schema_column_names().len());
        assert_eq!(df.column("date")?.dtype(), &DataType::Date);
        Ok(())
    }

    #[test]
    fn test_append_keeps_order() {
        let mut table = ObservationTable::from_records(station(), vec![record(0, 4, Some(1.0))]);
        table.append(ObservationTable::from_records(
            station(),
            vec![record(0, 9, Some(2.0)), record(0, 14, Some(3.0))],
        ));
        let temps: Vec<Option<f64>> = table.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(table.frequency(), Frequency::FiveMinute);
    }

    #[test]
    fn test_summary_pages_one_per_month() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2021, 6, 28).unwrap(),
            NaiveDate::from_ymd_opt(2021, 8, 2).unwrap(),
        )
        .unwrap();
        let pages = DailySummary::pages_for(&range);
        let expected: Vec<NaiveDate> = [(6, 28), (7, 1), (8, 1)]
            .into_iter()
            .map(|(m, d)| NaiveDate::from_ymd_opt(2021, m, d).unwrap())
            .collect();
        assert_eq!(pages, expected);
        assert_eq!(ObservationRecord::pages_for(&range).len(), 36);
    }
}
