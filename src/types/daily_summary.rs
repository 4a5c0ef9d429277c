use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a daily summary table (high, average and low per quantity).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temperature_high: Option<f64>,
    pub temperature_avg: Option<f64>,
    pub temperature_low: Option<f64>,
    pub dew_point_high: Option<f64>,
    pub dew_point_avg: Option<f64>,
    pub dew_point_low: Option<f64>,
    pub humidity_high: Option<f64>,
    pub humidity_avg: Option<f64>,
    pub humidity_low: Option<f64>,
    pub wind_speed_high: Option<f64>,
    pub wind_speed_avg: Option<f64>,
    pub wind_speed_low: Option<f64>,
    pub pressure_high: Option<f64>,
    pub pressure_low: Option<f64>,
    pub precipitation_sum: Option<f64>,
}

impl DailySummary {
    /// Number of measurement values in a summary row.
    pub const VALUE_COUNT: usize = 15;

    /// Builds a summary from values in table order. Returns `None` unless exactly
    /// [`Self::VALUE_COUNT`] values are given.
    pub fn from_values(date: NaiveDate, values: &[Option<f64>]) -> Option<Self> {
        let [th, ta, tl, dh, da, dl, hh, ha, hl, wh, wa, wl, ph, pl, ps] = values else {
            return None;
        };
        Some(Self {
            date,
            temperature_high: *th,
            temperature_avg: *ta,
            temperature_low: *tl,
            dew_point_high: *dh,
            dew_point_avg: *da,
            dew_point_low: *dl,
            humidity_high: *hh,
            humidity_avg: *ha,
            humidity_low: *hl,
            wind_speed_high: *wh,
            wind_speed_avg: *wa,
            wind_speed_low: *wl,
            pressure_high: *ph,
            pressure_low: *pl,
            precipitation_sum: *ps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_requires_exact_count() {
        let date = NaiveDate::from_ymd_opt(2021, 7, 1).unwrap();
        let mut values: Vec<Option<f64>> = (0..15).map(|v| Some(v as f64)).collect();
        let summary = DailySummary::from_values(date, &values).unwrap();
        assert_eq!(summary.temperature_high, Some(0.0));
        assert_eq!(summary.pressure_low, Some(13.0));
        assert_eq!(summary.precipitation_sum, Some(14.0));

        values.pop();
        assert!(DailySummary::from_values(date, &values).is_none());
    }
}
