//! Defines the granularity of Weather Underground history tables.

use std::fmt;
use std::str::FromStr;

/// Represents the time frequency of the rows in a PWS history table.
///
/// Weather Underground names its table views after the span they cover rather than
/// the granularity of the rows, so the 5-minute observations live under the `daily`
/// view and the per-day summaries under the `monthly` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    /// Individual observations, usually one row every 5 minutes.
    #[default]
    FiveMinute,
    /// One row per day with high/average/low aggregates.
    Daily,
}

impl Frequency {
    /// The timespan segment used at the end of a history table URL.
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            Frequency::FiveMinute => "daily",
            Frequency::Daily => "monthly",
        }
    }

    /// Short label used on the command line and in file names.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::FiveMinute => "5min",
            Frequency::Daily => "daily",
        }
    }

    /// Column names of the table produced for this frequency, in output order.
    pub fn schema_column_names(&self) -> Vec<&'static str> {
        match self {
            Frequency::FiveMinute => vec![
                "local_timestamp",
                "temperature",
                "dew_point",
                "humidity",
                "wind_speed",
                "wind_gust",
                "wind_direction",
                "pressure",
                "precipitation_rate",
                "precipitation_accumulated",
            ],
            Frequency::Daily => vec![
                "date",
                "temperature_high",
                "temperature_avg",
                "temperature_low",
                "dew_point_high",
                "dew_point_avg",
                "dew_point_low",
                "humidity_high",
                "humidity_avg",
                "humidity_low",
                "wind_speed_high",
                "wind_speed_avg",
                "wind_speed_low",
                "pressure_high",
                "pressure_low",
                "precipitation_sum",
            ],
        }
    }
}

/// Formats a `Frequency` using its command line label.
///
/// # Examples
///
/// ```
/// use pws_history::Frequency;
///
/// assert_eq!(Frequency::FiveMinute.to_string(), "5min");
/// assert_eq!(format!("{}", Frequency::Daily), "daily");
/// ```
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5min" | "5-min" | "five-minute" | "observations" => Ok(Frequency::FiveMinute),
            "daily" | "day" | "summary" => Ok(Frequency::Daily),
            other => Err(format!(
                "unknown frequency '{other}', expected '5min' or 'daily'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_follow_site_naming() {
        assert_eq!(Frequency::FiveMinute.path_segment(), "daily");
        assert_eq!(Frequency::Daily.path_segment(), "monthly");
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("5min".parse::<Frequency>(), Ok(Frequency::FiveMinute));
        assert_eq!(" Daily ".parse::<Frequency>(), Ok(Frequency::Daily));
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_daily_schema_has_fifteen_value_columns() {
        // date + 15 aggregates
        assert_eq!(Frequency::Daily.schema_column_names().len(), 16);
    }
}
