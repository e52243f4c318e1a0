// ABOUTME: Axum handlers for the scrape, health, docs and debug endpoints.
// ABOUTME: Validation failures answer 400; fetch failures answer 200 with success=false.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Value};

use digests_scrape::{ScrapeError, ScrapeOutput};

use crate::observability::recent_log_lines;
use crate::validators::{validate_scrape_request, ValidationError};
use crate::AppState;

/// Log lines returned by the debug endpoint.
const DEBUG_LOG_LINES: usize = 50;

/// Envelope returned by `POST /api/scrape`.
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ScrapeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResponse {
    fn ok(data: ScrapeOutput) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

fn bad_request(err: ValidationError) -> Response {
    tracing::warn!(error = %err, "validation failed");
    (
        StatusCode::BAD_REQUEST,
        Json(ScrapeResponse::failed(err.to_string())),
    )
        .into_response()
}

fn failure_message(state: &AppState, err: &ScrapeError) -> String {
    if err.is_timeout() {
        format!("Scraping timed out after {} seconds", state.timeout.as_secs())
    } else {
        format!("Failed to scrape content: {}", err.message())
    }
}

pub async fn scrape_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            return bad_request(ValidationError::InvalidJson);
        }
    };

    let request = match validate_scrape_request(&body) {
        Ok(request) => request,
        Err(err) => return bad_request(err),
    };

    tracing::info!(url = %request.url, "processing scrape request");
    tracing::debug!(config = ?request.config, "using config");

    match state
        .client
        .scrape(request.url.as_str(), &request.config)
        .await
    {
        Ok(output) => {
            tracing::info!(url = %request.url, "scraped successfully");
            (StatusCode::OK, Json(ScrapeResponse::ok(output))).into_response()
        }
        Err(err) if err.is_invalid_url() => bad_request(ValidationError::InvalidUrlFormat),
        Err(err) => {
            tracing::error!(url = %request.url, error = %err, "scrape failed");
            let message = failure_message(&state, &err);
            (StatusCode::OK, Json(ScrapeResponse::failed(message))).into_response()
        }
    }
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn docs_handler() -> Json<Value> {
    Json(json!({
        "name": "Content Scraper API",
        "version": "1.0",
        "endpoints": [
            {
                "path": "/api/scrape",
                "method": "POST",
                "description": "Scrape clean content from a URL",
                "body": {
                    "url": "The URL to scrape",
                    "config": {
                        "title_selector": "CSS selector for the title element",
                        "content_selector": "CSS selector for the main content container",
                        "paragraph_selector": "CSS selector for paragraphs within the content",
                        "extract_metadata": "Boolean to extract metadata from meta tags",
                        "extract_images": "Boolean to extract images",
                        "image_selector": "CSS selector for images to extract"
                    }
                },
                "example": {
                    "url": "https://example.com/article",
                    "config": {
                        "title_selector": "h1.article-title",
                        "content_selector": "div.article-body",
                        "extract_metadata": true,
                        "extract_images": true
                    }
                }
            },
            {
                "path": "/api/health",
                "method": "GET",
                "description": "Liveness check"
            },
            {
                "path": "/api/debug",
                "method": "GET",
                "description": "Runtime information and recent log lines"
            }
        ]
    }))
}

pub async fn debug_handler(State(state): State<AppState>) -> Json<Value> {
    let recent_logs = match state.log_path.as_deref() {
        Some(path) => recent_log_lines(path, DEBUG_LOG_LINES).await,
        None => Vec::new(),
    };

    Json(json!({
        "system_info": {
            "version": env!("CARGO_PKG_VERSION"),
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "environment": state.environment.as_str(),
        },
        "recent_logs": recent_logs,
    }))
}
