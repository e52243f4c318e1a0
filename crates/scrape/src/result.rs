// ABOUTME: Result records produced by extraction and by a full scrape.
// ABOUTME: ExtractedContent holds title/text/metadata/images; ScrapeOutput adds URL and domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One image found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// Content extracted from a single document.
///
/// `title` and `text` serialize as `null` when nothing was found. `metadata`
/// and `images` are only present when the config asked for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageInfo>>,
}

impl ExtractedContent {
    /// Plain-text rendering: title, blank line, body text.
    pub fn format_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref title) = self.title {
            if !title.is_empty() {
                parts.push(title.as_str());
            }
        }
        if let Some(ref text) = self.text {
            if !text.is_empty() {
                parts.push(text.as_str());
            }
        }
        parts.join("\n\n")
    }

    /// Returns true if neither a title nor any body text was found.
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty)
            && self.text.as_deref().map_or(true, str::is_empty)
    }
}

/// A completed scrape: where the page ended up and what was extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeOutput {
    /// Final URL after redirects.
    pub url: String,
    /// Network location of the final URL (`host` or `host:port`).
    pub domain: String,
    pub content: ExtractedContent,
}
