// ABOUTME: Caller-supplied extraction configuration (selectors and feature flags).
// ABOUTME: Deserialized from the request's `config` object; every field is optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selector configuration for one extraction call.
///
/// A missing selector selects the matching fallback chain in the extraction
/// rules. Unknown fields are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    #[serde(alias = "titleSelector", skip_serializing_if = "Option::is_none")]
    pub title_selector: Option<String>,

    #[serde(alias = "contentSelector", skip_serializing_if = "Option::is_none")]
    pub content_selector: Option<String>,

    #[serde(alias = "paragraphSelector", skip_serializing_if = "Option::is_none")]
    pub paragraph_selector: Option<String>,

    #[serde(alias = "imageSelector", skip_serializing_if = "Option::is_none")]
    pub image_selector: Option<String>,

    #[serde(alias = "extractMetadata")]
    pub extract_metadata: bool,

    #[serde(alias = "extractImages")]
    pub extract_images: bool,
}

impl ExtractionConfig {
    /// Build a config from an arbitrary JSON value.
    ///
    /// `null` means "no config". Anything other than an object, or an object
    /// whose known fields have the wrong type, is rejected with a message fit
    /// for a 400 response.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|e| format!("Invalid config: {}", e)),
            _ => Err("Config must be a JSON object".to_string()),
        }
    }

    /// Set the title selector.
    pub fn with_title_selector(mut self, css: impl Into<String>) -> Self {
        self.title_selector = Some(css.into());
        self
    }

    /// Set the content container selector.
    pub fn with_content_selector(mut self, css: impl Into<String>) -> Self {
        self.content_selector = Some(css.into());
        self
    }

    /// Set the paragraph selector, applied inside the content container.
    pub fn with_paragraph_selector(mut self, css: impl Into<String>) -> Self {
        self.paragraph_selector = Some(css.into());
        self
    }

    /// Set the image selector, applied to the whole document.
    pub fn with_image_selector(mut self, css: impl Into<String>) -> Self {
        self.image_selector = Some(css.into());
        self
    }

    /// Request `meta` tag extraction.
    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.extract_metadata = enabled;
        self
    }

    /// Request image extraction.
    pub fn with_images(mut self, enabled: bool) -> Self {
        self.extract_images = enabled;
        self
    }
}
