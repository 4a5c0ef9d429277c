use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;
use thirtyfour::error::WebDriverError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Browser driver executable '{0}' not found")]
    DriverNotFound(PathBuf, #[source] std::io::Error),

    #[error("Failed to start browser driver '{0}'")]
    DriverSpawn(PathBuf, #[source] std::io::Error),

    #[error("Browser driver '{path}' exited with {status}")]
    DriverExited { path: PathBuf, status: ExitStatus },

    #[error("Browser driver at {url} did not become ready within {waited:?}")]
    DriverStartupTimeout { url: String, waited: Duration },

    #[error("Failed to open a browser session")]
    Session(#[source] WebDriverError),

    #[error("Browser driver at {url} stopped answering")]
    DriverUnresponsive { url: String },

    #[error("Browser session was lost while rendering {url}")]
    SessionLost {
        url: String,
        #[source]
        source: WebDriverError,
    },

    #[error("Navigation to {url} failed")]
    Navigation {
        url: String,
        #[source]
        source: WebDriverError,
    },

    #[error("Failed to read the page source of {url}")]
    PageSource {
        url: String,
        #[source]
        source: WebDriverError,
    },

    #[error("Rendered page for {url} is empty")]
    EmptyResult { url: String },
}

impl RenderError {
    /// Errors after which no further page can be rendered with the same browser.
    pub fn is_driver_failure(&self) -> bool {
        matches!(
            self,
            RenderError::DriverNotFound(..)
                | RenderError::DriverSpawn(..)
                | RenderError::DriverExited { .. }
                | RenderError::DriverStartupTimeout { .. }
                | RenderError::Session(_)
                | RenderError::DriverUnresponsive { .. }
                | RenderError::SessionLost { .. }
        )
    }
}
