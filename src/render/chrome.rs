//! A [`PageRenderer`] backed by a real Chrome browser driven through `chromedriver`.

use crate::render::config::BrowserConfig;
use crate::render::error::RenderError;
use crate::render::PageRenderer;
use log::{debug, info, warn};
use serde::Deserialize;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thirtyfour::prelude::*;
use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities};
use tokio::process::{Child, Command};
use tokio::time::{sleep, Instant};

/// Rows of the history table, in either of the layouts the site uses.
const TABLE_ROW_SELECTOR: &str = "lib-history-table table tbody tr, table.history-table tbody tr";
const TABLE_POLL_INTERVAL: Duration = Duration::from_millis(250);
const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(100);
const STATUS_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
// The desktop table is only rendered for wide viewports.
const WINDOW_SIZE_ARG: &str = "--window-size=1920,1080";

#[derive(Debug, Deserialize)]
struct DriverStatus {
    value: DriverStatusValue,
}

#[derive(Debug, Deserialize)]
struct DriverStatusValue {
    #[serde(default)]
    ready: bool,
}

/// The driver executable running as a child process.
///
/// The child is killed when this is dropped, so an early return or a panic never
/// leaves a driver behind.
struct DriverProcess {
    child: Child,
    path: PathBuf,
    client: reqwest::Client,
}

impl DriverProcess {
    fn spawn(config: &BrowserConfig) -> Result<Self, RenderError> {
        let path = config.driver_path.clone();
        info!("Starting browser driver {} on port {}", path.display(), config.port);

        let child = Command::new(&path)
            .arg(format!("--port={}", config.port))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => RenderError::DriverNotFound(path.clone(), e),
                _ => RenderError::DriverSpawn(path.clone(), e),
            })?;

        Ok(Self {
            child,
            path,
            client: reqwest::Client::new(),
        })
    }

    /// Polls the driver's status endpoint until it reports ready.
    async fn wait_until_ready(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError> {
        let deadline = Instant::now() + timeout;

        loop {
            self.check_running()?;

            match self.probe(url).await {
                Ok(true) => {
                    debug!("Browser driver at {} is ready", url);
                    return Ok(());
                }
                Ok(false) => debug!("Browser driver at {} is not ready yet", url),
                Err(e) => debug!("Browser driver status request failed: {}", e),
            }

            if Instant::now() >= deadline {
                return Err(RenderError::DriverStartupTimeout {
                    url: url.to_string(),
                    waited: timeout,
                });
            }
            sleep(STATUS_POLL_INTERVAL).await;
        }
    }

    /// Fails with [`RenderError::DriverExited`] once the child process has exited.
    fn check_running(&mut self) -> Result<(), RenderError> {
        let exited = self
            .child
            .try_wait()
            .map_err(|e| RenderError::DriverSpawn(self.path.clone(), e))?;
        match exited {
            Some(status) => Err(RenderError::DriverExited {
                path: self.path.clone(),
                status,
            }),
            None => Ok(()),
        }
    }

    async fn probe(&self, url: &str) -> reqwest::Result<bool> {
        let status: DriverStatus = self
            .client
            .get(format!("{}/status", url))
            .timeout(STATUS_REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status.value.ready)
    }

    async fn stop(mut self) {
        match self.child.kill().await {
            Ok(()) => info!("Stopped browser driver {}", self.path.display()),
            Err(e) => warn!(
                "Failed to stop browser driver {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Renders pages in a Chrome session.
///
/// Create it with [`ChromeRenderer::launch`] and release it with
/// [`ChromeRenderer::shutdown`] once all pages are rendered. Dropping it without
/// shutting down still kills the driver process, but skips closing the session.
pub struct ChromeRenderer {
    config: BrowserConfig,
    driver: WebDriver,
    process: DriverProcess,
}

impl ChromeRenderer {
    /// Starts the driver executable, waits for it to accept connections and opens a
    /// browser session.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DriverNotFound`] if `config.driver_path` does not exist,
    /// and the other driver or session variants of [`RenderError`] if the driver does
    /// not come up. The driver process is stopped again on every error path.
    pub async fn launch(config: BrowserConfig) -> Result<Self, RenderError> {
        let mut process = DriverProcess::spawn(&config)?;

        if let Err(e) = process
            .wait_until_ready(&config.driver_url(), config.startup_timeout)
            .await
        {
            process.stop().await;
            return Err(e);
        }

        let driver = match Self::open_session(&config).await {
            Ok(driver) => driver,
            Err(e) => {
                process.stop().await;
                return Err(e);
            }
        };
        info!("Browser session opened (headless: {})", config.headless);

        Ok(Self {
            config,
            driver,
            process,
        })
    }

    fn capabilities(config: &BrowserConfig) -> WebDriverResult<ChromeCapabilities> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }
        caps.add_arg(WINDOW_SIZE_ARG)?;
        caps.add_arg("--disable-gpu")?;
        if let Some(user_agent) = &config.user_agent {
            caps.add_arg(&format!("--user-agent={}", user_agent))?;
        }
        if let Some(binary) = &config.browser_binary {
            caps.set_binary(&binary.to_string_lossy())?;
        }
        Ok(caps)
    }

    async fn open_session(config: &BrowserConfig) -> Result<WebDriver, RenderError> {
        let caps = Self::capabilities(config).map_err(RenderError::Session)?;
        let driver = WebDriver::new(config.driver_url(), caps)
            .await
            .map_err(RenderError::Session)?;

        if let Err(e) = driver.set_page_load_timeout(config.page_load_timeout).await {
            if let Err(quit_error) = driver.quit().await {
                warn!("Failed to close browser session: {}", quit_error);
            }
            return Err(RenderError::Session(e));
        }
        Ok(driver)
    }

    /// Replaces a page error with a driver failure when the driver process or its
    /// session is gone.
    async fn diagnose(&mut self, url: &str, error: RenderError) -> RenderError {
        if let Err(exited) = self.process.check_running() {
            warn!("Browser driver is gone after rendering {} failed", url);
            return exited;
        }
        let driver_url = self.config.driver_url();
        if let Err(e) = self.process.probe(&driver_url).await {
            warn!("Browser driver at {} does not answer: {}", driver_url, e);
            return RenderError::DriverUnresponsive { url: driver_url };
        }
        match self.driver.current_url().await {
            Ok(_) => error,
            Err(source) => RenderError::SessionLost {
                url: url.to_string(),
                source,
            },
        }
    }

    /// Closes the browser session and stops the driver process.
    ///
    /// Failures are logged rather than returned: at this point there is nothing left
    /// for the caller to recover.
    pub async fn shutdown(self) {
        let Self {
            driver, process, ..
        } = self;
        if let Err(e) = driver.quit().await {
            warn!("Failed to close browser session: {}", e);
        }
        process.stop().await;
    }
}

impl PageRenderer for ChromeRenderer {
    async fn render(&mut self, url: &str) -> Result<String, RenderError> {
        debug!("Navigating to {}", url);
        if let Err(source) = self.driver.goto(url).await {
            let error = RenderError::Navigation {
                url: url.to_string(),
                source,
            };
            return Err(self.diagnose(url, error).await);
        }

        // A table that never shows up is not an error: the page is returned as
        // rendered and extraction decides what it holds.
        let table_found = self
            .driver
            .query(By::Css(TABLE_ROW_SELECTOR))
            .wait(self.config.table_timeout, TABLE_POLL_INTERVAL)
            .exists()
            .await;
        match table_found {
            Ok(true) => debug!("History table rows present on {}", url),
            Ok(false) => warn!(
                "No history table rows appeared on {} within {:?}",
                url, self.config.table_timeout
            ),
            Err(e) => warn!("Failed to wait for the history table on {}: {}", url, e),
        }
        sleep(self.config.settle_delay).await;

        let source = match self.driver.source().await {
            Ok(source) => source,
            Err(source) => {
                let error = RenderError::PageSource {
                    url: url.to_string(),
                    source,
                };
                return Err(self.diagnose(url, error).await);
            }
        };
        if source.trim().is_empty() {
            return Err(RenderError::EmptyResult {
                url: url.to_string(),
            });
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_launch_with_missing_driver() {
        let config = BrowserConfig::builder()
            .driver_path("/nonexistent/path/to/chromedriver")
            .startup_timeout(Duration::from_millis(200))
            .build();
        let result = ChromeRenderer::launch(config).await;
        assert!(matches!(result, Err(RenderError::DriverNotFound(..))));
    }

    #[test]
    fn test_capabilities_include_window_size() -> WebDriverResult<()> {
        let config = BrowserConfig::builder()
            .driver_path("chromedriver")
            .user_agent("Mozilla/5.0 test")
            .build();
        let caps = ChromeRenderer::capabilities(&config)?;
        let args = caps.args();
        assert!(args.iter().any(|arg| arg == WINDOW_SIZE_ARG));
        assert!(args.iter().any(|arg| arg == "--user-agent=Mozilla/5.0 test"));
        Ok(())
    }
}
