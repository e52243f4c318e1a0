// ABOUTME: Resource handling module for fetching a single web page.
// ABOUTME: HTTP fetching with a hard timeout, SSRF protection, size limits and charset hints.

use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};
use std::time::Duration;

use bytes::Bytes;
use ipnet::{Ipv4Net, Ipv6Net};
use once_cell::sync::Lazy;
use thiserror::Error;
use url::{Host, Url};

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Default wall-clock bound for one fetch, body read included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Error text of a redirect refused by [`redirect_policy`].
const REDIRECT_BLOCKED: &str = "redirect to private IP blocked";

static PRIVATE_V4: Lazy<Vec<Ipv4Net>> = Lazy::new(|| {
    [
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "127.0.0.0/8",
        "169.254.0.0/16",
        "0.0.0.0/8",
    ]
    .iter()
    .filter_map(|cidr| cidr.parse().ok())
    .collect()
});

static PRIVATE_V6: Lazy<Vec<Ipv6Net>> = Lazy::new(|| {
    ["fc00::/7", "fe80::/10"]
        .iter()
        .filter_map(|cidr| cidr.parse().ok())
        .collect()
});

/// Transport-level failures reported by [`fetch`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request or body read did not finish inside the timeout.
    #[error("timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    /// DNS, TCP, TLS or body-read failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server answered with a status outside 2xx.
    #[error("HTTP status {0}")]
    NonSuccessStatus(u16),

    /// The target (or a redirect hop) resolves to a private network address.
    #[error("private network address blocked: {0}")]
    Blocked(String),

    #[error("content too large")]
    TooLarge,
}

/// Options for fetching a resource.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            allow_private_networks: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL of the response after redirects.
    pub final_url: Url,
    pub declared_encoding: Option<String>,
    pub body: Bytes,
}

/// Check if an IP address is in a private/reserved range.
pub(crate) fn is_private_ip(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(ip) => PRIVATE_V4.iter().any(|net| net.contains(ip)),
        IpAddr::V6(ip) => {
            if ip.is_loopback() || ip.is_unspecified() {
                return true;
            }
            if let Some(mapped) = ip.to_ipv4_mapped() {
                return is_private_ip(&IpAddr::V4(mapped));
            }
            PRIVATE_V6.iter().any(|net| net.contains(ip))
        }
    }
}

/// Extract charset value from Content-Type header.
pub(crate) fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            if !charset.is_empty() {
                return Some(charset.to_string());
            }
        }
    }
    None
}

/// Reject URLs whose host is, or resolves to, a private address.
async fn ensure_public(url: &Url) -> Result<(), FetchError> {
    let port = url.port_or_known_default().unwrap_or(80);
    match url.host() {
        Some(Host::Ipv4(ip)) => {
            if is_private_ip(&IpAddr::V4(ip)) {
                return Err(FetchError::Blocked(ip.to_string()));
            }
        }
        Some(Host::Ipv6(ip)) => {
            if is_private_ip(&IpAddr::V6(ip)) {
                return Err(FetchError::Blocked(ip.to_string()));
            }
        }
        Some(Host::Domain(domain)) => {
            let addrs = tokio::net::lookup_host((domain, port))
                .await
                .map_err(|e| FetchError::Connection(format!("DNS lookup failed: {}", e)))?;
            for socket_addr in addrs {
                if is_private_ip(&socket_addr.ip()) {
                    return Err(FetchError::Blocked(domain.to_string()));
                }
            }
        }
        None => return Err(FetchError::Connection("URL has no host".to_string())),
    }
    Ok(())
}

/// Whether a redirect target is, or resolves to, a private address.
///
/// Runs inside the redirect policy, which cannot await, so name resolution is
/// synchronous.
pub(crate) fn redirect_target_is_private(url: &Url) -> std::io::Result<bool> {
    let port = url.port_or_known_default().unwrap_or(80);
    match url.host() {
        Some(Host::Ipv4(ip)) => Ok(is_private_ip(&IpAddr::V4(ip))),
        Some(Host::Ipv6(ip)) => Ok(is_private_ip(&IpAddr::V6(ip))),
        Some(Host::Domain(domain)) => {
            let mut addrs = (domain, port).to_socket_addrs()?;
            Ok(addrs.any(|sa| is_private_ip(&sa.ip())))
        }
        None => Ok(false),
    }
}

/// Redirect policy that stops before requesting a private-network hop.
pub fn redirect_policy(allow_private_networks: bool) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        if allow_private_networks {
            return attempt.follow();
        }
        match redirect_target_is_private(attempt.url()) {
            Ok(false) => attempt.follow(),
            Ok(true) => attempt.error(REDIRECT_BLOCKED),
            Err(_) => attempt.error("DNS lookup failed during redirect"),
        }
    })
}

fn error_chain_mentions(err: &(dyn std::error::Error + 'static), needle: &str) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.to_string().contains(needle) {
            return true;
        }
        current = e.source();
    }
    false
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else if err.is_redirect() && error_chain_mentions(&err, REDIRECT_BLOCKED) {
        let target = err
            .url()
            .map(Url::to_string)
            .unwrap_or_else(|| "redirect target".to_string());
        FetchError::Blocked(target)
    } else {
        FetchError::Connection(err.to_string())
    }
}

/// Fetch a resource from the given URL.
///
/// The whole exchange, including reading the body to the end, is raced against
/// `opts.timeout`; on expiry nothing read so far is returned.
pub async fn fetch(
    client: &reqwest::Client,
    url: &Url,
    opts: &FetchOptions,
) -> Result<FetchResult, FetchError> {
    match tokio::time::timeout(opts.timeout, fetch_inner(client, url, opts)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(opts.timeout)),
    }
}

async fn fetch_inner(
    client: &reqwest::Client,
    url: &Url,
    opts: &FetchOptions,
) -> Result<FetchResult, FetchError> {
    if !opts.allow_private_networks {
        ensure_public(url).await?;
    }

    let mut request = client.get(url.clone());
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| map_reqwest_error(e, opts.timeout))?;

    // Redirects may have landed somewhere else entirely.
    let final_url = response.url().clone();
    if !opts.allow_private_networks && final_url != *url {
        ensure_public(&final_url).await?;
    }

    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });
    if let Some(len) = content_length {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(FetchError::TooLarge);
        }
    }

    let status = response.status();
    let declared_encoding = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(extract_charset);

    if !status.is_success() {
        return Err(FetchError::NonSuccessStatus(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| map_reqwest_error(e, opts.timeout))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(FetchError::TooLarge);
    }

    tracing::debug!(
        url = %url,
        final_url = %final_url,
        status = status.as_u16(),
        bytes = body.len(),
        "fetched page"
    );

    Ok(FetchResult {
        final_url,
        declared_encoding,
        body,
    })
}
