use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of a 5-minute history table.
///
/// Values are kept in the units the page displays (the site defaults to imperial
/// units). Any cell that could not be read as a number is `None`.
///
/// `local_timestamp` is the station's local wall-clock time without an offset, so
/// it is ambiguous during the hour repeated by a daylight-saving fall-back.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub local_timestamp: NaiveDateTime,
    pub temperature: Option<f64>,
    pub dew_point: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    /// Degrees clockwise from north.
    pub wind_direction: Option<f64>,
    /// Sea-level pressure.
    pub pressure: Option<f64>,
    pub precipitation_rate: Option<f64>,
    pub precipitation_accumulated: Option<f64>,
}

impl ObservationRecord {
    /// A record at `local_timestamp` with every measurement missing.
    pub fn empty(local_timestamp: NaiveDateTime) -> Self {
        Self {
            local_timestamp,
            temperature: None,
            dew_point: None,
            humidity: None,
            wind_speed: None,
            wind_gust: None,
            wind_direction: None,
            pressure: None,
            precipitation_rate: None,
            precipitation_accumulated: None,
        }
    }

    /// Returns true when no measurement at all could be read for this row.
    pub fn is_blank(&self) -> bool {
        self.temperature.is_none()
            && self.dew_point.is_none()
            && self.humidity.is_none()
            && self.wind_speed.is_none()
            && self.wind_gust.is_none()
            && self.wind_direction.is_none()
            && self.pressure.is_none()
            && self.precipitation_rate.is_none()
            && self.precipitation_accumulated.is_none()
    }
}
