//! The main entry point: scrapes a station's history over a date range with a
//! freshly launched browser.

use crate::error::PwsError;
use crate::render::chrome::ChromeRenderer;
use crate::render::config::BrowserConfig;
use crate::render::url::DEFAULT_BASE_URL;
use crate::scrape::report::RangeReport;
use crate::scrape::retry::RetryPolicy;
use crate::scrape::Scraper;
use crate::types::daily_summary::DailySummary;
use crate::types::observation::ObservationRecord;
use crate::types::station::StationId;
use crate::types::table::TableRecord;
use crate::types::traits::types::DateRange;
use bon::bon;
use log::info;

/// Client for scraping Weather Underground PWS history tables.
///
/// Every call launches its own browser session, processes the whole date range one
/// page at a time and shuts the browser down again, whether pages failed or not.
///
/// # Examples
///
/// ```no_run
/// # use pws_history::{BrowserConfig, DateRange, PwsError, PwsHistory, StationId};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), PwsError> {
/// let client = PwsHistory::builder()
///     .browser(BrowserConfig::builder().driver_path("chromedriver").build())
///     .build();
///
/// let station = StationId::new("KCAJAMES3")?;
/// let day = NaiveDate::from_ymd_opt(2021, 7, 28).unwrap();
/// let report = client
///     .observations()
///     .station(&station)
///     .range(DateRange::single(day))
///     .call()
///     .await?;
///
/// println!("{}", report.table.to_dataframe().unwrap());
/// for failure in &report.failures {
///     eprintln!("{} failed: {}", failure.date, failure.error);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PwsHistory {
    browser: BrowserConfig,
    retry: RetryPolicy,
    base_url: String,
}

#[bon]
impl PwsHistory {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.browser(BrowserConfig)`: **Required.** How to launch the browser driver.
    /// * `.retry(RetryPolicy)`: Optional. Defaults to [`RetryPolicy::default`].
    /// * `.base_url(String)`: Optional. Defaults to [`DEFAULT_BASE_URL`].
    #[builder]
    pub fn new(browser: BrowserConfig, retry: Option<RetryPolicy>, base_url: Option<String>) -> Self {
        Self {
            browser,
            retry: retry.unwrap_or_default(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn browser(&self) -> &BrowserConfig {
        &self.browser
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Scrapes the 5-minute observations of `station` for every day of `range`.
    ///
    /// # Errors
    ///
    /// Only a browser that cannot be launched is returned as an error, as a
    /// [`PwsError::Render`]. Days that fail are listed in [`RangeReport::failures`].
    #[builder]
    pub async fn observations(
        &self,
        station: &StationId,
        range: DateRange,
    ) -> Result<RangeReport<ObservationRecord>, PwsError> {
        self.run(station, range).await
    }

    /// Scrapes the daily high/average/low summaries of `station` for `range`.
    ///
    /// The site shows summaries per month, so one page is loaded for each month the
    /// range touches.
    ///
    /// # Errors
    ///
    /// Same as [`PwsHistory::observations`].
    #[builder]
    pub async fn daily_summaries(
        &self,
        station: &StationId,
        range: DateRange,
    ) -> Result<RangeReport<DailySummary>, PwsError> {
        self.run(station, range).await
    }

    async fn run<R: TableRecord>(
        &self,
        station: &StationId,
        range: DateRange,
    ) -> Result<RangeReport<R>, PwsError> {
        let renderer = ChromeRenderer::launch(self.browser.clone()).await?;
        let mut scraper = Scraper::new(renderer)
            .with_retry(self.retry)
            .with_base_url(self.base_url.as_str());

        let report = scraper.scrape_range::<R>(station, range).await;
        scraper.into_renderer().shutdown().await;

        info!(
            "Finished {} for {}: {} rows, {} page(s) ok, {} failed",
            range,
            station,
            report.table.len(),
            report.completed.len(),
            report.failures.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::error::RenderError;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn client(driver_path: &str) -> PwsHistory {
        PwsHistory::builder()
            .browser(
                BrowserConfig::builder()
                    .driver_path(driver_path)
                    .startup_timeout(Duration::from_millis(200))
                    .build(),
            )
            .retry(RetryPolicy::none())
            .build()
    }

    #[test]
    fn test_builder_defaults() {
        let client = PwsHistory::builder()
            .browser(BrowserConfig::builder().driver_path("chromedriver").build())
            .build();
        assert_eq!(client.retry(), RetryPolicy::default());
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.browser().port, 9515);
    }

    #[tokio::test]
    async fn test_missing_driver_fails_before_scraping() {
        let client = client("/nonexistent/path/to/chromedriver");
        let station = StationId::new("KCAJAMES3").unwrap();
        let day = NaiveDate::from_ymd_opt(2021, 7, 28).unwrap();

        let result = client
            .observations()
            .station(&station)
            .range(DateRange::single(day))
            .call()
            .await;

        match result {
            Err(e) => {
                assert!(e.is_driver_failure());
                assert!(matches!(
                    e,
                    PwsError::Render(RenderError::DriverNotFound(..))
                ));
            }
            Ok(_) => panic!("expected the launch to fail"),
        }
    }
}
