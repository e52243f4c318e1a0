// ABOUTME: Library half of the scraper API server: state, router and supporting modules.
// ABOUTME: The binary in main.rs only parses settings, starts logging and serves create_app().

pub mod observability;
pub mod routes;
pub mod settings;
pub mod validators;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use digests_scrape::Client;

pub use crate::routes::create_app;
pub use crate::settings::{Environment, ServerArgs};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<Client>,
    /// Fetch bound, reported in timeout messages.
    pub timeout: Duration,
    pub environment: Environment,
    /// Log file read by the debug endpoint, if logging to a file.
    pub log_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(client: Client, environment: Environment, log_path: Option<PathBuf>) -> Self {
        let timeout = client.options().timeout;
        Self {
            client: Arc::new(client),
            timeout,
            environment,
            log_path,
        }
    }
}
