// ABOUTME: Read-only document model and query helpers used by the extraction rules.
// ABOUTME: Wraps a parsed scraper::Html with first/all/scoped selection, text and attribute access.

//! Document query abstraction.
//!
//! Every extraction rule talks to the page through [`Document`] and the free
//! helpers in this module, never through `scraper` directly:
//! - `select_one` returns the first match or `None`.
//! - `select_all` / `select_within` return document-ordered vectors, empty when
//!   nothing matches (including when the selector itself is invalid).
//! - `element_text` concatenates descendant text nodes and normalizes whitespace.
//! - `attr_or_empty` never fails; a missing attribute reads as `""`.

pub mod cleaners;
pub mod compiled;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use thiserror::Error;

use crate::dom::cleaners::normalize_whitespace;
use crate::dom::compiled::get_or_compile;

/// Detects an explicit `<body>` start tag in the source.
static BODY_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<body[\s/>]").expect("static body pattern"));

/// Comments and raw-text blocks, whose contents are never tags. An unclosed
/// comment runs to the end of the input.
static NON_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--(?:.*?-->|.*$)|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("static comment/script pattern")
});

/// Whether the source has a real `<body>` start tag, ignoring comments and scripts.
fn has_body_tag(html: &str) -> bool {
    BODY_TAG_RE.is_match(&NON_TAG_RE.replace_all(html, ""))
}

/// Reasons raw bytes cannot become a [`Document`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document is empty after decoding")]
    Empty,

    #[error("document is binary, not text")]
    Binary,
}

/// A parsed, read-only HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse an HTML string. html5ever recovers from any malformed markup.
    ///
    /// Sources without a `<body>` tag are parsed as a fragment so that no
    /// `body` element is synthesized; the tree holds only what the page has.
    pub fn parse(html: &str) -> Self {
        let html = if has_body_tag(html) {
            Html::parse_document(html)
        } else {
            Html::parse_fragment(html)
        };
        Self { html }
    }

    /// Decode raw response bytes and parse them.
    ///
    /// The declared encoding is tried first; an unknown label or a lossy decode
    /// falls back to a detected encoding.
    pub fn from_bytes(
        body: &[u8],
        declared_encoding: Option<&str>,
    ) -> Result<Self, DocumentError> {
        let text = decode_body(body, declared_encoding)?;
        Ok(Self::parse(&text))
    }

    /// First element matching `css`, in document order.
    pub fn select_one(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = get_or_compile(css)?;
        self.html.select(&selector).next()
    }

    /// All elements matching `css`, in document order.
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match get_or_compile(css) {
            Some(selector) => self.html.select(&selector).collect(),
            None => Vec::new(),
        }
    }

    /// First element found by trying each selector of a fallback chain in turn.
    pub fn select_first_of(&self, chain: &[&str]) -> Option<ElementRef<'_>> {
        chain.iter().find_map(|css| {
            let found = self.select_one(css);
            if found.is_some() {
                tracing::debug!(selector = css, "fallback selector matched");
            }
            found
        })
    }
}

/// Descendants of `scope` (excluding `scope` itself) matching `css`.
pub fn select_within<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match get_or_compile(css) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Visible text of an element with markup stripped and whitespace normalized.
pub fn element_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    normalize_whitespace(&raw)
}

/// Attribute value, or the empty string when absent.
pub fn attr_or_empty<'a>(el: ElementRef<'a>, name: &str) -> &'a str {
    el.value().attr(name).unwrap_or("")
}

/// Decode body bytes to a String using the declared charset or detection.
pub fn decode_body(
    body: &[u8],
    declared_encoding: Option<&str>,
) -> Result<String, DocumentError> {
    let declared = declared_encoding.and_then(|label| {
        let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes());
        if encoding.is_none() {
            tracing::warn!(label, "unknown declared encoding, detecting instead");
        }
        encoding
    });

    let mut decoded = None;
    if let Some(encoding) = declared {
        let (text, _, had_errors) = encoding.decode(body);
        if had_errors {
            tracing::warn!(
                encoding = encoding.name(),
                "body does not decode cleanly with declared encoding, detecting instead"
            );
        } else {
            decoded = Some(text.into_owned());
        }
    }

    let text = match decoded {
        Some(text) => text,
        None => {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(body, true);
            let encoding = detector.guess(None, true);
            let (text, _, _) = encoding.decode(body);
            text.into_owned()
        }
    };

    if text.contains('\0') {
        return Err(DocumentError::Binary);
    }
    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(text)
}
