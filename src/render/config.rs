use bon::Builder;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for launching the browser driver and rendering pages.
///
/// Everything the renderer needs is passed in here; nothing is read from globals.
///
/// # Examples
///
/// ```
/// use pws_history::BrowserConfig;
/// use std::time::Duration;
///
/// let config = BrowserConfig::builder()
///     .driver_path("/usr/bin/chromedriver")
///     .settle_delay(Duration::from_secs(1))
///     .build();
/// assert_eq!(config.port, 9515);
/// assert!(config.headless);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct BrowserConfig {
    /// Path to the WebDriver executable (e.g. `chromedriver`) matching the installed browser.
    #[builder(into)]
    pub driver_path: PathBuf,

    /// Local port the driver listens on.
    #[builder(default = 9515)]
    pub port: u16,

    #[builder(default = true)]
    pub headless: bool,

    /// Browser executable to use instead of the driver's default.
    #[builder(into)]
    pub browser_binary: Option<PathBuf>,

    #[builder(into)]
    pub user_agent: Option<String>,

    /// How long to wait for the driver to answer its status endpoint.
    #[builder(default = Duration::from_secs(10))]
    pub startup_timeout: Duration,

    #[builder(default = Duration::from_secs(60))]
    pub page_load_timeout: Duration,

    /// How long to wait for history table rows to appear after navigation.
    #[builder(default = Duration::from_secs(20))]
    pub table_timeout: Duration,

    /// Extra time given to the page after the table appeared, for late cells.
    #[builder(default = Duration::from_secs(3))]
    pub settle_delay: Duration,
}

impl BrowserConfig {
    pub(crate) fn driver_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}
