// ABOUTME: Main library entry point for the single-page web scraper.
// ABOUTME: Re-exports the public API: Client, extract, configs, extracted content and ScrapeError.

//! Fetch one web page and extract its title, body text, metadata and images.
//!
//! Extraction is driven by an [`ExtractionConfig`] of optional CSS selectors;
//! when a selector is absent, a fixed fallback chain is used instead.
//!
//! # Example
//!
//! ```no_run
//! use digests_scrape::{Client, ExtractionConfig, ScrapeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder().build()?;
//!     let config = ExtractionConfig::default().with_metadata(true);
//!     let output = client.scrape("https://example.com/article", &config).await?;
//!     println!("{}", output.content.format_text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod resource;
pub mod result;

pub use crate::client::{network_location, validate_url, Client};
pub use crate::config::ExtractionConfig;
pub use crate::dom::Document;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::extract;
pub use crate::options::{ClientBuilder, Options};
pub use crate::result::{ExtractedContent, ImageInfo, ScrapeOutput};
