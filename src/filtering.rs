use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use polars::prelude::{col, lit, DataType, LazyFrame, LiteralValue, TimeUnit};

pub trait PwsFrameFilterExt {
    /// Filters an observation LazyFrame by a local datetime range (inclusive).
    /// Assumes the 'local_timestamp' column is a timezone-naive datetime.
    ///
    /// # Arguments
    /// * `start`: The start NaiveDateTime (inclusive).
    /// * `end`: The end NaiveDateTime (inclusive).
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied.
    fn filter_observations(self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame;

    /// Filters an observation LazyFrame to the rows recorded between two times of day
    /// (inclusive), on any date.
    fn filter_time_of_day(self, start: NaiveTime, end: NaiveTime) -> LazyFrame;

    /// Filters a daily summary LazyFrame by a NaiveDate range (inclusive).
    /// Assumes the 'date' column is `DataType::Date`.
    fn filter_summaries(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame;
}

impl PwsFrameFilterExt for LazyFrame {
    fn filter_observations(self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame {
        let timestamp = || col("local_timestamp").cast(DataType::Datetime(TimeUnit::Milliseconds, None));
        self.filter(
            timestamp()
                .gt_eq(lit(start))
                .and(timestamp().lt_eq(lit(end))),
        )
    }

    fn filter_time_of_day(self, start: NaiveTime, end: NaiveTime) -> LazyFrame {
        let time = || col("local_timestamp").dt().time();
        // Polars has no `Literal` impl for `NaiveTime`; its Time dtype is nanoseconds since midnight.
        let time_lit = |t: NaiveTime| {
            lit(LiteralValue::Time(
                t.num_seconds_from_midnight() as i64 * 1_000_000_000 + t.nanosecond() as i64,
            ))
        };
        self.filter(time().gt_eq(time_lit(start)).and(time().lt_eq(time_lit(end))))
    }

    fn filter_summaries(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame {
        self.filter(
            col("date")
                .cast(DataType::Date)
                .gt_eq(lit(start_date))
                .and(col("date").cast(DataType::Date).lt_eq(lit(end_date))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DailySummary, ObservationRecord, ObservationTable, StationId, SummaryTable};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, 28)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn observations() -> ObservationTable {
        let records = [(0, 4), (6, 9), (12, 14), (18, 19), (23, 54)]
            .into_iter()
            .map(|(h, m)| ObservationRecord {
                temperature: Some(h as f64),
                ..ObservationRecord::empty(at(h, m))
            })
            .collect();
        ObservationTable::from_records(StationId::new("KCAJAMES3").unwrap(), records)
    }

    #[test]
    fn test_filter_observations_inclusive() -> Result<(), Box<dyn std::error::Error>> {
        let df = observations()
            .lazy()?
            .filter_observations(at(6, 9), at(18, 19))
            .collect()?;
        assert_eq!(df.height(), 3);
        let temps: Vec<Option<f64>> = df.column("temperature")?.f64()?.into_iter().collect();
        assert_eq!(temps, vec![Some(6.0), Some(12.0), Some(18.0)]);
        Ok(())
    }

    #[test]
    fn test_filter_time_of_day() -> Result<(), Box<dyn std::error::Error>> {
        let df = observations()
            .lazy()?
            .filter_time_of_day(
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            )
            .collect()?;
        assert_eq!(df.height(), 3);
        Ok(())
    }

    #[test]
    fn test_filter_summaries() -> Result<(), Box<dyn std::error::Error>> {
        let station = StationId::new("KCAJAMES3").unwrap();
        let records = (1..=5)
            .map(|day| {
                let date = NaiveDate::from_ymd_opt(2021, 7, day).unwrap();
                DailySummary::from_values(date, &[None; DailySummary::VALUE_COUNT]).unwrap()
            })
            .collect();
        let df = SummaryTable::from_records(station, records)
            .lazy()?
            .filter_summaries(
                NaiveDate::from_ymd_opt(2021, 7, 2).unwrap(),
                NaiveDate::from_ymd_opt(2021, 7, 3).unwrap(),
            )
            .collect()?;
        assert_eq!(df.height(), 2);
        Ok(())
    }
}
