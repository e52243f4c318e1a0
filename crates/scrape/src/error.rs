// ABOUTME: Error types for the scraper including the ErrorCode enum and ScrapeError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

use crate::resource::FetchError;

/// Error codes representing the categories of scrape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Ssrf,
    Parse,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Ssrf => "SSRF blocked",
            ErrorCode::Parse => "parse error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for scrape operations.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scrape: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ScrapeError {
    fn with_code(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Timeout, url, op, source)
    }

    /// Create an SSRF error.
    pub fn ssrf(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Ssrf, url, op, source)
    }

    /// Create a Parse error.
    pub fn parse(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Parse, url, op, source)
    }

    /// Wrap a fetch-layer failure, picking the code that matches its variant.
    pub fn from_fetch(url: impl Into<String>, op: impl Into<String>, err: FetchError) -> Self {
        let blocked = matches!(err, FetchError::Blocked(_));
        let timed_out = matches!(err, FetchError::Timeout(_));
        let source = Some(anyhow::Error::new(err));
        if timed_out {
            Self::timeout(url, op, source)
        } else if blocked {
            Self::ssrf(url, op, source)
        } else {
            Self::fetch(url, op, source)
        }
    }

    /// Human-readable message without the op/url prefix, for response envelopes.
    pub fn message(&self) -> String {
        match self.source {
            Some(ref src) => format!("{}: {}", self.code, src),
            None => self.code.to_string(),
        }
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is an SSRF error.
    pub fn is_ssrf(&self) -> bool {
        self.code == ErrorCode::Ssrf
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn display_includes_op_url_and_source() {
        let err = ScrapeError::fetch(
            "https://example.com",
            "Fetch",
            Some(anyhow::anyhow!("connection refused")),
        );
        assert_eq!(
            err.to_string(),
            "scrape: Fetch https://example.com: fetch error: connection refused"
        );
    }

    #[test]
    fn from_fetch_maps_codes() {
        let timeout =
            ScrapeError::from_fetch("u", "Scrape", FetchError::Timeout(Duration::from_secs(30)));
        assert!(timeout.is_timeout());
        assert!(timeout.message().contains("timed out"));

        let blocked =
            ScrapeError::from_fetch("u", "Scrape", FetchError::Blocked("127.0.0.1".into()));
        assert!(blocked.is_ssrf());

        let status = ScrapeError::from_fetch("u", "Scrape", FetchError::NonSuccessStatus(404));
        assert!(status.is_fetch());
        assert!(status.message().contains("404"));
    }

    #[test]
    fn constructors_set_their_code() {
        assert!(ScrapeError::invalid_url("", "Scrape", None).is_invalid_url());
        assert!(ScrapeError::parse("", "Scrape", None).is_parse());
        assert_eq!(ScrapeError::timeout("", "Scrape", None).message(), "timeout");
        assert_eq!(ScrapeError::ssrf("", "Scrape", None).code, ErrorCode::Ssrf);
    }
}
