use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::Cli;
use log::{error, info};
use pws_history::{
    write_table, AnyDate, BrowserConfig, DateRange, Frequency, OutputFormat, PwsHistory,
    RangeReport, RetryPolicy, StationId, TableRecord,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

mod cli;

/// Some pages failed but the output was written.
const EXIT_PARTIAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_range(start: &str, end: Option<&str>) -> Result<DateRange> {
    let first = start
        .get_date_range()
        .ok_or_else(|| anyhow!("Could not parse start date '{}'", start))?;
    let last = match end {
        Some(end) => end
            .get_date_range()
            .ok_or_else(|| anyhow!("Could not parse end date '{}'", end))?,
        None => first,
    };
    Ok(DateRange::new(first.start, last.end)?)
}

fn default_output(station: &StationId, range: &DateRange, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{}_{}.{}", station, range, format.extension()))
}

async fn run(args: Cli) -> Result<ExitCode> {
    let station = StationId::new(&args.station)?;
    let range = resolve_range(&args.start, args.end.as_deref())?;

    let format = args
        .format
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or_default();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&station, &range, format));

    let browser = BrowserConfig::builder()
        .driver_path(args.driver)
        .port(args.port)
        .headless(!args.show_browser)
        .maybe_browser_binary(args.browser)
        .maybe_user_agent(args.user_agent)
        .settle_delay(Duration::from_secs(args.settle_secs))
        .table_timeout(Duration::from_secs(args.table_timeout_secs))
        .build();
    let client = PwsHistory::builder()
        .browser(browser)
        .retry(RetryPolicy::new(
            args.attempts,
            Duration::from_secs(args.retry_wait_secs),
        ))
        .maybe_base_url(args.base_url)
        .build();

    info!(
        "Scraping {} {} data for {} into {}",
        station,
        args.frequency,
        range,
        output.display()
    );

    match args.frequency {
        Frequency::FiveMinute => {
            let report = client
                .observations()
                .station(&station)
                .range(range)
                .call()
                .await
                .context("Failed to start the browser")?;
            finish(report, &output, format).await
        }
        Frequency::Daily => {
            let report = client
                .daily_summaries()
                .station(&station)
                .range(range)
                .call()
                .await
                .context("Failed to start the browser")?;
            finish(report, &output, format).await
        }
    }
}

async fn finish<R>(report: RangeReport<R>, output: &Path, format: OutputFormat) -> Result<ExitCode>
where
    R: TableRecord + Send + 'static,
{
    write_table(&report.table, output, format)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} rows to {}", report.table.len(), output.display());

    if report.is_complete() {
        return Ok(ExitCode::SUCCESS);
    }
    eprintln!("{} page(s) could not be scraped:", report.failures.len());
    for failure in &report.failures {
        eprintln!(
            "  {} ({} attempt(s)): {}",
            failure.date, failure.attempts, failure.error
        );
    }
    Ok(ExitCode::from(EXIT_PARTIAL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_range() {
        let single = resolve_range("2021-07-28", None).unwrap();
        assert_eq!(single, DateRange::single(date(2021, 7, 28)));

        let month = resolve_range("2021-07", None).unwrap();
        assert_eq!(month.end, date(2021, 7, 31));

        let span = resolve_range("2021-07-30", Some("2021-08")).unwrap();
        assert_eq!((span.start, span.end), (date(2021, 7, 30), date(2021, 8, 31)));

        assert!(resolve_range("2021-07-28", Some("2021-07-01")).is_err());
        assert!(resolve_range("yesterday", None).is_err());
    }

    #[test]
    fn test_default_output_name() {
        let station = StationId::new("kcajames3").unwrap();
        let single = DateRange::single(date(2021, 7, 28));
        assert_eq!(
            default_output(&station, &single, OutputFormat::Csv),
            PathBuf::from("KCAJAMES3_2021-07-28.csv")
        );
        let range = DateRange::new(date(2021, 7, 28), date(2021, 7, 30)).unwrap();
        assert_eq!(
            default_output(&station, &range, OutputFormat::Csv),
            PathBuf::from("KCAJAMES3_2021-07-28_2021-07-30.csv")
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "pws-history",
            "KCAJAMES3",
            "2021-07-28",
            "--freq",
            "daily",
            "--format",
            "parquet",
        ])
        .unwrap();
        assert_eq!(cli.frequency, Frequency::Daily);
        assert_eq!(cli.format, Some(OutputFormat::Parquet));
        assert_eq!(cli.attempts, 4);
        assert!(cli.end.is_none());
    }
}
