//! Retrieval of fully rendered history pages.
//!
//! The site only fills in its history tables for real browsers, so pages are loaded
//! through a WebDriver-controlled browser rather than a plain HTTP client. The
//! [`PageRenderer`] trait keeps the rest of the crate independent of the browser.

pub mod chrome;
pub mod config;
pub mod error;
pub mod url;

use crate::render::error::RenderError;
use crate::render::url::history_url;
use crate::types::frequency::Frequency;
use crate::types::station::StationId;
use chrono::NaiveDate;

/// Something that can turn a URL into rendered page markup.
///
/// Implementations do not retry; retries are the caller's decision.
#[allow(async_fn_in_trait)]
pub trait PageRenderer {
    /// Loads `url` and returns the page markup once its content has rendered.
    async fn render(&mut self, url: &str) -> Result<String, RenderError>;

    /// Loads the history table page of `station` for a single `date`.
    async fn render_day(
        &mut self,
        base_url: &str,
        station: &StationId,
        date: NaiveDate,
        frequency: Frequency,
    ) -> Result<String, RenderError> {
        let url = history_url(base_url, station, date, frequency);
        self.render(&url).await
    }
}
