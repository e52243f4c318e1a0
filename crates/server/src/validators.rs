// ABOUTME: Boundary validation for POST /api/scrape request bodies.
// ABOUTME: Produces a typed ScrapeRequest or a ValidationError whose message goes back with a 400.

use serde_json::Value;
use thiserror::Error;
use url::Url;

use digests_scrape::{validate_url, ExtractionConfig};

/// Why a request body was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    InvalidJson,

    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL")]
    UrlNotString,

    #[error("Invalid URL format")]
    InvalidUrlFormat,

    #[error("Config must be a JSON object")]
    ConfigNotObject,

    #[error("{0}")]
    InvalidConfig(String),
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    pub url: Url,
    pub config: ExtractionConfig,
}

/// Validate a decoded request body.
///
/// A present `config` must be an object (`null` included in the rejection);
/// an absent one means the default config.
pub fn validate_scrape_request(data: &Value) -> Result<ScrapeRequest, ValidationError> {
    let body = data.as_object().ok_or(ValidationError::MissingUrl)?;

    let url = match body.get("url") {
        None => return Err(ValidationError::MissingUrl),
        Some(Value::String(s)) => s,
        Some(_) => return Err(ValidationError::UrlNotString),
    };
    let url = validate_url(url, "Validate").map_err(|_| ValidationError::InvalidUrlFormat)?;

    let config = match body.get("config") {
        None => ExtractionConfig::default(),
        Some(value @ Value::Object(_)) => {
            ExtractionConfig::from_json(value).map_err(ValidationError::InvalidConfig)?
        }
        Some(_) => return Err(ValidationError::ConfigNotObject),
    };

    Ok(ScrapeRequest { url, config })
}
