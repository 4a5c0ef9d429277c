use clap::Parser;
use pws_history::{Frequency, OutputFormat};
use std::path::PathBuf;

/// Scrape the history table of a Weather Underground personal weather station.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Station id, e.g. KCAJAMES3
    pub station: String,

    /// First day to scrape: YYYY-MM-DD, or YYYY-MM / YYYY for a whole month or year
    pub start: String,

    /// Last day to scrape, in the same forms as START. Defaults to the end of START
    pub end: Option<String>,

    /// Table to scrape: 5min observations or daily summaries
    #[arg(long = "freq", default_value = "5min")]
    pub frequency: Frequency,

    /// Path to the chromedriver executable
    #[arg(long, env = "PWS_CHROMEDRIVER", default_value = "chromedriver")]
    pub driver: PathBuf,

    /// Port for chromedriver to listen on
    #[arg(long, default_value_t = 9515)]
    pub port: u16,

    /// Browser executable to use instead of the driver's default
    #[arg(long)]
    pub browser: Option<PathBuf>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Run the browser with a visible window
    #[arg(long)]
    pub show_browser: bool,

    /// Seconds to wait after the table appeared
    #[arg(long, default_value_t = 3)]
    pub settle_secs: u64,

    /// Seconds to wait for the table to appear
    #[arg(long, default_value_t = 20)]
    pub table_timeout_secs: u64,

    /// Attempts per page before giving up on it
    #[arg(long, default_value_t = 4)]
    pub attempts: u32,

    #[arg(long, default_value_t = 5)]
    pub retry_wait_secs: u64,

    /// Output file. Defaults to <STATION>_<START>[_<END>].<ext> in the working directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format; inferred from the output extension when omitted
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Site to scrape
    #[arg(long)]
    pub base_url: Option<String>,
}
