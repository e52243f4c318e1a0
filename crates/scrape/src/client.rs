// ABOUTME: The main Client struct that fetches one page and runs the extraction rules on it.
// ABOUTME: Provides async scrape() for URLs and scrape_html() for HTML already in memory.

use url::Url;

use crate::config::ExtractionConfig;
use crate::dom::Document;
use crate::error::ScrapeError;
use crate::extractors::extract;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, redirect_policy, FetchOptions};
use crate::result::ScrapeOutput;

/// Check that `url` parses and carries both a scheme and a host.
pub fn validate_url(url: &str, op: &str) -> Result<Url, ScrapeError> {
    if url.trim().is_empty() {
        return Err(ScrapeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("URL is required")),
        ));
    }

    let parsed = Url::parse(url.trim()).map_err(|e| {
        ScrapeError::invalid_url(url, op, Some(anyhow::anyhow!("malformed URL: {}", e)))
    })?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(ScrapeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("URL has no host")),
        )),
    }
}

/// Network location of a URL: the host, plus the port when one is spelled out.
pub fn network_location(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    }
}

/// Parse, extract and package a page that is already in memory.
///
/// Kept synchronous so the parsed document never lives across an await point.
fn extract_page(
    body: &[u8],
    declared_encoding: Option<&str>,
    final_url: &Url,
    config: &ExtractionConfig,
    op: &str,
) -> Result<ScrapeOutput, ScrapeError> {
    let doc = Document::from_bytes(body, declared_encoding).map_err(|e| {
        ScrapeError::parse(final_url.as_str(), op, Some(anyhow::Error::new(e)))
    })?;

    let content = extract(&doc, config);
    if content.is_empty() {
        tracing::warn!(url = %final_url, "no title or text found");
    }

    Ok(ScrapeOutput {
        url: final_url.to_string(),
        domain: network_location(final_url),
        content,
    })
}

/// Fetches single pages and extracts their content.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => {
                reqwest::Client::builder()
                    .redirect(redirect_policy(opts.allow_private_networks))
                    .user_agent(&opts.user_agent)
                    .timeout(opts.timeout)
                    .cookie_store(true)
                    .gzip(true)
                    .brotli(true)
                    .deflate(true)
                    .build()
                    .map_err(|e| {
                        ScrapeError::fetch("", "NewClient", Some(anyhow::Error::new(e)))
                    })?
            }
        };

        Ok(Self { opts, http_client })
    }

    /// The options this client was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Fetch `url` and extract its content according to `config`.
    ///
    /// Validation failures are reported before any network access; fetch
    /// failures (including the timeout) are reported without running extraction.
    pub async fn scrape(
        &self,
        url: &str,
        config: &ExtractionConfig,
    ) -> Result<ScrapeOutput, ScrapeError> {
        let parsed = validate_url(url, "Scrape")?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScrapeError::invalid_url(
                url,
                "Scrape",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
            timeout: self.opts.timeout,
        };

        let fetched = fetch(&self.http_client, &parsed, &fetch_opts)
            .await
            .map_err(|e| ScrapeError::from_fetch(url, "Scrape", e))?;

        let output = extract_page(
            &fetched.body,
            fetched.declared_encoding.as_deref(),
            &fetched.final_url,
            config,
            "Scrape",
        )?;

        tracing::info!(
            url = %output.url,
            domain = %output.domain,
            title = ?output.content.title,
            "scraped page"
        );
        Ok(output)
    }

    /// Extract content from HTML the caller already has, using `url` for context.
    pub fn scrape_html(
        &self,
        html: &str,
        url: &str,
        config: &ExtractionConfig,
    ) -> Result<ScrapeOutput, ScrapeError> {
        let parsed = validate_url(url, "ScrapeHTML")?;
        extract_page(html.as_bytes(), Some("utf-8"), &parsed, config, "ScrapeHTML")
    }
}
