//! Maps the columns of a 5-minute history table onto [`ObservationRecord`] fields.

use crate::extract::cells::{parse_measurement, parse_time_of_day, parse_wind_direction};
use crate::extract::error::ExtractError;
use crate::extract::history_table::HistoryTable;
use crate::types::observation::ObservationRecord;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Time,
    Temperature,
    DewPoint,
    Humidity,
    WindDirection,
    WindSpeed,
    WindGust,
    Pressure,
    PrecipitationRate,
    PrecipitationAccumulated,
}

/// Lower-cases a header and reduces it to words, dropping units in parentheses
/// and punctuation (`Precip. Rate.` becomes `precip rate`).
fn normalize_header(header: &str) -> String {
    let without_units = header.split('(').next().unwrap_or_default();
    without_units
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn field_for_header(header: &str) -> Option<Field> {
    let field = match normalize_header(header).as_str() {
        "time" | "local time" | "date time" | "obs time" => Field::Time,
        "temperature" | "temp" => Field::Temperature,
        "dew point" | "dewpoint" => Field::DewPoint,
        "humidity" | "relative humidity" => Field::Humidity,
        // The site labels the direction column just "Wind".
        "wind" | "wind direction" | "wind dir" | "direction" => Field::WindDirection,
        "speed" | "wind speed" => Field::WindSpeed,
        "gust" | "wind gust" => Field::WindGust,
        "pressure" | "sea level pressure" | "sealevel pressure" => Field::Pressure,
        "precip rate" | "precipitation rate" => Field::PrecipitationRate,
        "precip accum" | "precip accumulated" | "precipitation accumulated"
        | "precipitation accumulation" => Field::PrecipitationAccumulated,
        _ => return None,
    };
    Some(field)
}

/// Column index to field mapping. Unknown and repeated columns map to `None`.
fn map_columns(headers: &[String]) -> Vec<Option<Field>> {
    let mut seen: Vec<Field> = Vec::new();
    headers
        .iter()
        .map(|header| match field_for_header(header) {
            Some(field) if !seen.contains(&field) => {
                seen.push(field);
                Some(field)
            }
            Some(_) => {
                debug!("Ignoring repeated history table column '{}'", header);
                None
            }
            None => {
                debug!("Ignoring unknown history table column '{}'", header);
                None
            }
        })
        .collect()
}

fn set_field(record: &mut ObservationRecord, field: Field, cell: &str) {
    match field {
        Field::Time => {}
        Field::Temperature => record.temperature = parse_measurement(cell),
        Field::DewPoint => record.dew_point = parse_measurement(cell),
        Field::Humidity => record.humidity = parse_measurement(cell),
        Field::WindDirection => record.wind_direction = parse_wind_direction(cell),
        Field::WindSpeed => record.wind_speed = parse_measurement(cell),
        Field::WindGust => record.wind_gust = parse_measurement(cell),
        Field::Pressure => record.pressure = parse_measurement(cell),
        Field::PrecipitationRate => record.precipitation_rate = parse_measurement(cell),
        Field::PrecipitationAccumulated => {
            record.precipitation_accumulated = parse_measurement(cell)
        }
    }
}

/// Reads every well-formed row of a 5-minute table. Times are combined with `date`.
///
/// Rows whose cell count differs from the header, or whose time cannot be read, are
/// skipped with a warning. Timestamps that do not increase are kept; they are
/// logged because they usually mark the repeated hour of a daylight-saving change.
pub(crate) fn extract_rows(
    table: &HistoryTable,
    date: NaiveDate,
) -> Result<Vec<ObservationRecord>, ExtractError> {
    if table.headers().is_empty() {
        return Err(ExtractError::MissingHeader);
    }
    let columns = map_columns(table.headers());
    let time_column = columns
        .iter()
        .position(|field| *field == Some(Field::Time))
        .ok_or_else(|| ExtractError::MissingColumn("Time".to_string()))?;

    let mut records = Vec::with_capacity(table.rows().len());
    let mut previous: Option<NaiveDateTime> = None;

    for (index, row) in table.rows().iter().enumerate() {
        if row.len() != columns.len() {
            warn!(
                "Skipping row {} on {}: {} cells for {} columns",
                index,
                date,
                row.len(),
                columns.len()
            );
            continue;
        }
        let Some(time) = parse_time_of_day(&row[time_column]) else {
            warn!(
                "Skipping row {} on {}: unreadable time '{}'",
                index, date, row[time_column]
            );
            continue;
        };
        let timestamp = date.and_time(time);
        if let Some(previous) = previous.filter(|previous| timestamp <= *previous) {
            warn!(
                "Timestamp {} does not follow {} (daylight-saving change?), keeping both rows",
                timestamp, previous
            );
        }
        previous = Some(timestamp);

        let mut record = ObservationRecord::empty(timestamp);
        for (field, cell) in columns.iter().zip(row) {
            if let Some(field) = field {
                set_field(&mut record, *field, cell);
            }
        }
        records.push(record);
    }

    Ok(records)
}
