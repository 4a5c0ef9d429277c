//! Writing a scraped [`WeatherTable`] to a file.

pub mod error;

use crate::output::error::OutputError;
use crate::types::table::{TableRecord, WeatherTable};
use log::info;
use polars::prelude::*;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::task;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File formats a table can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
            OutputFormat::Json => "jsonl",
        }
    }

    /// Infers the format from a file extension, if it is a known one.
    ///
    /// ```
    /// use pws_history::OutputFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(OutputFormat::from_path(Path::new("out.parquet")), Some(OutputFormat::Parquet));
    /// assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

/// Formats an `OutputFormat` as its file extension.
impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" | "pq" => Ok(OutputFormat::Parquet),
            "json" | "jsonl" | "ndjson" => Ok(OutputFormat::Json),
            _ => Err(OutputError::UnknownFormat(s.to_string())),
        }
    }
}

/// Writes `table` to `path` in the given format, replacing any existing file.
///
/// An empty table still produces a file: CSV and Parquet output carry the column
/// header, JSON output is an empty file. Encoding runs on a blocking task.
pub async fn write_table<R>(
    table: &WeatherTable<R>,
    path: &Path,
    format: OutputFormat,
) -> Result<(), OutputError>
where
    R: TableRecord + Send + 'static,
{
    let path_buf = path.to_path_buf();
    let rows = table.len();

    match format {
        OutputFormat::Csv | OutputFormat::Parquet => {
            let df = table.to_dataframe()?;
            task::spawn_blocking(move || write_frame(df, &path_buf, format)).await??;
        }
        OutputFormat::Json => {
            let records = table.records().to_vec();
            task::spawn_blocking(move || write_json_lines(&records, &path_buf)).await??;
        }
    }

    info!(
        "Wrote {} {} rows for {} to {} as {}",
        rows,
        table.frequency(),
        table.station(),
        path.display(),
        format
    );
    Ok(())
}

fn create(path: &PathBuf) -> Result<File, OutputError> {
    File::create(path).map_err(|e| OutputError::Create(path.clone(), e))
}

fn write_frame(mut df: DataFrame, path: &PathBuf, format: OutputFormat) -> Result<(), OutputError> {
    let file = create(path)?;
    match format {
        OutputFormat::Parquet => {
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| OutputError::Parquet(path.clone(), e))?;
        }
        _ => {
            CsvWriter::new(file)
                .include_header(true)
                .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
                .finish(&mut df)
                .map_err(|e| OutputError::Csv(path.clone(), e))?;
        }
    }
    Ok(())
}

fn write_json_lines<R: TableRecord>(records: &[R], path: &PathBuf) -> Result<(), OutputError> {
    let mut writer = BufWriter::new(create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)
            .map_err(|e| OutputError::Json(path.clone(), e))?;
        writer
            .write_all(b"\n")
            .map_err(|e| OutputError::Write(path.clone(), e))?;
    }
    writer
        .flush()
        .map_err(|e| OutputError::Write(path.clone(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::ObservationRecord;
    use crate::types::station::StationId;
    use crate::DailySummary;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn observations() -> WeatherTable<ObservationRecord> {
        let day = NaiveDate::from_ymd_opt(2021, 7, 28).unwrap();
        let records = vec![
            ObservationRecord {
                temperature: Some(61.2),
                humidity: Some(72.0),
                ..ObservationRecord::empty(day.and_hms_opt(0, 4, 0).unwrap())
            },
            ObservationRecord::empty(day.and_hms_opt(0, 9, 0).unwrap()),
        ];
        WeatherTable::from_records(StationId::new("KCAJAMES3").unwrap(), records)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xlsx".parse::<OutputFormat>(),
            Err(OutputError::UnknownFormat(_))
        ));
        assert_eq!(
            OutputFormat::from_path(Path::new("KCAJAMES3_2021-07-28.csv")),
            Some(OutputFormat::Csv)
        );
        assert_eq!(OutputFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_format_name_matches_extension() {
        for format in [OutputFormat::Csv, OutputFormat::Parquet, OutputFormat::Json] {
            assert_eq!(format.to_string(), format.extension());
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert_eq!(OutputFormat::Json.to_string(), "jsonl");
    }

    #[tokio::test]
    async fn test_write_csv() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        write_table(&observations(), &path, OutputFormat::Csv).await?;

        let content = std::fs::read_to_string(&path)?;
        let mut lines = content.lines();
        let header = lines.next().unwrap_or_default();
        assert!(header.starts_with("local_timestamp,temperature,dew_point,humidity"));
        let first = lines.next().unwrap_or_default();
        assert!(first.starts_with("2021-07-28 00:04:00,61.2,,72.0"));
        assert_eq!(lines.count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_parquet_reads_back() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("out.parquet");
        write_table(&observations(), &path, OutputFormat::Parquet).await?;

        let df = ParquetReader::new(File::open(&path)?).finish()?;
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("temperature")?.f64()?.get(0), Some(61.2));
        Ok(())
    }

    #[tokio::test]
    async fn test_write_json_lines() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("out.jsonl");
        write_table(&observations(), &path, OutputFormat::Json).await?;

        let content = std::fs::read_to_string(&path)?;
        let rows: Vec<serde_json::Value> = content
            .lines()
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["temperature"], 61.2);
        assert!(rows[1]["temperature"].is_null());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_table_writes_header() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        let table = WeatherTable::<DailySummary>::new(StationId::new("KCAJAMES3")?);
        write_table(&table, &path, OutputFormat::Csv).await?;

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("date,temperature_high"));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_directory_is_create_error() {
        let path = Path::new("/nonexistent/dir/out.csv");
        let result = write_table(&observations(), path, OutputFormat::Csv).await;
        assert!(matches!(result, Err(OutputError::Create(..))));
    }
}
