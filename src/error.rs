use crate::extract::error::ExtractError;
use crate::output::error::OutputError;
use crate::render::error::RenderError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PwsError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Invalid station id '{0}', expected a non-empty alphanumeric id such as KCAJAMES3")]
    InvalidStation(String),

    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Could not parse '{0}' as a date, month or year")]
    DateParsing(String),

    #[error("Not attempted: the browser driver failed on {failed_on}")]
    NotAttempted { failed_on: NaiveDate },
}

impl PwsError {
    /// Whether the error comes from the browser driver itself rather than from a single page.
    ///
    /// Once the driver is gone, every later page in a range fails the same way.
    pub fn is_driver_failure(&self) -> bool {
        matches!(self, PwsError::Render(render) if render.is_driver_failure())
    }
}
