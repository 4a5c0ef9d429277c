//! Drives a [`PageRenderer`] over a date range and collects the extracted rows.

pub mod report;
pub mod retry;

use crate::error::PwsError;
use crate::extract::extract_table;
use crate::render::url::DEFAULT_BASE_URL;
use crate::render::PageRenderer;
use crate::scrape::report::{DayFailure, RangeReport};
use crate::scrape::retry::RetryPolicy;
use crate::types::station::StationId;
use crate::types::table::{TableRecord, WeatherTable};
use crate::types::traits::types::DateRange;
use chrono::NaiveDate;
use log::{error, info, warn};
use tokio::time::sleep;

/// Scrapes history pages one at a time through a renderer.
///
/// Each page is rendered and extracted independently; a page that keeps failing
/// is reported in the [`RangeReport`] and the range carries on with the next one.
pub struct Scraper<P> {
    renderer: P,
    retry: RetryPolicy,
    base_url: String,
}

impl<P: PageRenderer> Scraper<P> {
    pub fn new(renderer: P) -> Self {
        Self {
            renderer,
            retry: RetryPolicy::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Points the scraper at another host serving the same page layout.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn renderer(&self) -> &P {
        &self.renderer
    }

    pub fn into_renderer(self) -> P {
        self.renderer
    }

    async fn fetch_once<R: TableRecord>(
        &mut self,
        station: &StationId,
        date: NaiveDate,
    ) -> Result<WeatherTable<R>, PwsError> {
        let html = self
            .renderer
            .render_day(&self.base_url, station, date, R::FREQUENCY)
            .await?;
        Ok(extract_table::<R>(&html, station, date)?)
    }

    /// Scrapes the page of a single day, retrying according to the retry policy.
    ///
    /// Driver failures are not retried, since the same browser cannot recover from them.
    pub async fn scrape_day<R: TableRecord>(
        &mut self,
        station: &StationId,
        date: NaiveDate,
    ) -> Result<WeatherTable<R>, DayFailure> {
        let mut attempt = 1;
        loop {
            match self.fetch_once::<R>(station, date).await {
                Ok(table) => return Ok(table),
                Err(e) if attempt < self.retry.attempts && !e.is_driver_failure() => {
                    warn!(
                        "Attempt {}/{} for {} on {} failed: {}. Retrying in {:?}",
                        attempt, self.retry.attempts, station, date, e, self.retry.wait
                    );
                    sleep(self.retry.wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(DayFailure {
                        date,
                        attempts: attempt,
                        error: e,
                    })
                }
            }
        }
    }

    /// Scrapes every page needed to cover `range`, in order, appending the rows that
    /// fall inside the range.
    ///
    /// A failing page does not stop the range, unless the browser driver itself
    /// failed: the remaining pages are then reported as not attempted.
    pub async fn scrape_range<R: TableRecord>(
        &mut self,
        station: &StationId,
        range: DateRange,
    ) -> RangeReport<R> {
        let mut report = RangeReport::new(station.clone(), range);
        let mut pages = R::pages_for(&range).into_iter();

        while let Some(date) = pages.next() {
            info!("Scraping {} data for {} on {}", R::FREQUENCY, station, date);
            match self.scrape_day::<R>(station, date).await {
                Ok(mut table) => {
                    table.retain(|record| record.within(&range));
                    info!("Got {} rows for {} on {}", table.len(), station, date);
                    report.table.append(table);
                    report.completed.push(date);
                }
                Err(failure) => {
                    error!(
                        "Giving up on {} for {} after {} attempt(s): {}",
                        date, station, failure.attempts, failure.error
                    );
                    let driver_failed = failure.error.is_driver_failure();
                    report.failures.push(failure);
                    if driver_failed {
                        let remaining: Vec<NaiveDate> = pages.by_ref().collect();
                        if !remaining.is_empty() {
                            error!(
                                "Browser driver failed on {}, not attempting the remaining {} page(s)",
                                date,
                                remaining.len()
                            );
                        }
                        report
                            .failures
                            .extend(remaining.into_iter().map(|skipped| DayFailure {
                                date: skipped,
                                attempts: 0,
                                error: PwsError::NotAttempted { failed_on: date },
                            }));
                    }
                }
            }
        }

        report
    }
}
