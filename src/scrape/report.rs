use crate::error::PwsError;
use crate::types::station::StationId;
use crate::types::table::{TableRecord, WeatherTable};
use crate::types::traits::types::DateRange;
use chrono::NaiveDate;

/// A page that could not be scraped, with the error of its last attempt.
#[derive(Debug)]
pub struct DayFailure {
    pub date: NaiveDate,
    pub attempts: u32,
    pub error: PwsError,
}

/// The outcome of scraping a date range: the rows of every page that succeeded and
/// the pages that did not.
#[derive(Debug)]
pub struct RangeReport<R> {
    pub range: DateRange,
    pub table: WeatherTable<R>,
    /// Page dates that were scraped successfully, in order.
    pub completed: Vec<NaiveDate>,
    pub failures: Vec<DayFailure>,
}

impl<R: TableRecord> RangeReport<R> {
    pub(crate) fn new(station: StationId, range: DateRange) -> Self {
        Self {
            range,
            table: WeatherTable::new(station),
            completed: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// True when no page failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_dates(&self) -> Vec<NaiveDate> {
        self.failures.iter().map(|failure| failure.date).collect()
    }

    pub fn into_table(self) -> WeatherTable<R> {
        self.table
    }
}
