use crate::types::frequency::Frequency;
use crate::types::station::StationId;
use chrono::NaiveDate;

pub const DEFAULT_BASE_URL: &str = "https://www.wunderground.com";

/// Builds the URL of the history table of `station` for a single day.
///
/// ```
/// use chrono::NaiveDate;
/// use pws_history::{history_url, Frequency, StationId, DEFAULT_BASE_URL};
///
/// let station = StationId::new("KCAJAMES3").unwrap();
/// let date = NaiveDate::from_ymd_opt(2021, 7, 28).unwrap();
/// assert_eq!(
///     history_url(DEFAULT_BASE_URL, &station, date, Frequency::FiveMinute),
///     "https://www.wunderground.com/dashboard/pws/KCAJAMES3/table/2021-07-28/2021-07-28/daily"
/// );
/// ```
pub fn history_url(
    base_url: &str,
    station: &StationId,
    date: NaiveDate,
    frequency: Frequency,
) -> String {
    let date = date.format("%Y-%m-%d").to_string();
    format!(
        "{}/dashboard/pws/{}/table/{}/{}/{}",
        base_url.trim_end_matches('/'),
        station,
        date,
        date,
        frequency.path_segment()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_summary_url_uses_monthly_view() {
        let station = StationId::new("ibrussel42").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            history_url("http://localhost:8080/", &station, date, Frequency::Daily),
            "http://localhost:8080/dashboard/pws/IBRUSSEL42/table/2024-02-29/2024-02-29/monthly"
        );
    }
}
