// ABOUTME: Command-line and environment configuration for the scraper API server.
// ABOUTME: Every flag has a SCRAPER_* environment variable; the profile picks the log level.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::observability::LogFormat;

/// Deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Production => "info",
            Environment::Testing => "warn",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Testing => "testing",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "scrape-server")]
#[command(about = "HTTP API that scrapes a single web page on request")]
pub struct ServerArgs {
    /// Interface to bind
    #[arg(long, env = "SCRAPER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "SCRAPER_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Environment profile
    #[arg(long = "env", env = "SCRAPER_ENV", value_enum, default_value = "development")]
    pub environment: Environment,

    /// Directory for app.log
    #[arg(long, env = "SCRAPER_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log encoding
    #[arg(long, env = "SCRAPER_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Seconds allowed for fetching a page
    #[arg(long = "timeout", env = "SCRAPER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Allow scraping loopback and private network addresses
    #[arg(long, env = "SCRAPER_ALLOW_PRIVATE_NETWORKS")]
    pub allow_private_networks: bool,
}

impl ServerArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
