mod error;
mod extract;
mod filtering;
mod output;
mod pws_history;
mod render;
mod scrape;
mod types;

pub use error::PwsError;
pub use pws_history::*;

pub use extract::cells::{
    parse_measurement, parse_summary_date, parse_time_of_day, parse_wind_direction, value_tokens,
};
pub use extract::history_table::HistoryTable;
pub use extract::{extract_daily_summaries, extract_observations, extract_table};

pub use render::chrome::ChromeRenderer;
pub use render::config::BrowserConfig;
pub use render::url::{history_url, DEFAULT_BASE_URL};
pub use render::PageRenderer;

pub use scrape::report::{DayFailure, RangeReport};
pub use scrape::retry::RetryPolicy;
pub use scrape::Scraper;

pub use output::{write_table, OutputFormat};

pub use filtering::PwsFrameFilterExt;

pub use types::daily_summary::DailySummary;
pub use types::frequency::Frequency;
pub use types::observation::ObservationRecord;
pub use types::station::StationId;
pub use types::table::{ObservationTable, SummaryTable, TableRecord, WeatherTable};

pub use types::traits::any_date::AnyDate;
pub use types::traits::types::{DateRange, Month, Year};

pub use extract::error::ExtractError;
pub use output::error::OutputError;
pub use render::error::RenderError;
