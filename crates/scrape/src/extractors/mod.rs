// ABOUTME: Extraction rule engine turning a Document plus ExtractionConfig into ExtractedContent.
// ABOUTME: Title, text, metadata and image rules each carry their own fallback chain.

//! Content extraction module.
//!
//! [`extract`] is a pure function over a read-only [`Document`]: calling it
//! twice with the same inputs yields identical results. Missing elements and
//! missing selectors degrade to `None`/empty fields, never to errors.
//!
//! Submodules:
//! - `title`: title selector or `h1` → `title` fallback.
//! - `text`: content-section resolution and paragraph joining.
//! - `metadata`: `meta` name/property → content mapping.
//! - `images`: image candidates and `{src, alt, title}` records.

pub mod images;
pub mod metadata;
pub mod text;
pub mod title;

use scraper::ElementRef;

use crate::config::ExtractionConfig;
use crate::dom::Document;
use crate::result::ExtractedContent;

/// Default content-section chain used by the text rule.
pub const CONTENT_FALLBACK_SELECTORS: &[&str] = &["article", ".content", "main", "#content"];

/// Default container chain used by the image rule. Unlike the text chain it
/// has no `#content` step.
pub const IMAGE_CONTAINER_SELECTORS: &[&str] = &["article", ".content", "main"];

/// Where the text rule found (or failed to find) its container.
#[derive(Debug, Clone, Copy)]
pub enum ContentSection<'a> {
    /// `content_selector` was set and matched.
    Selected(ElementRef<'a>),
    /// `content_selector` was set and matched nothing.
    Unresolved,
    /// No `content_selector`; the fallback chain found this element.
    Fallback(ElementRef<'a>),
    /// No `content_selector` and no fallback container exists.
    Missing,
}

/// Resolve the content section once for a document and config.
pub fn resolve_content_section<'a>(
    doc: &'a Document,
    config: &ExtractionConfig,
) -> ContentSection<'a> {
    match config.content_selector.as_deref() {
        Some(css) => match doc.select_one(css) {
            Some(el) => ContentSection::Selected(el),
            None => {
                tracing::debug!(selector = css, "content selector matched nothing");
                ContentSection::Unresolved
            }
        },
        None => match doc.select_first_of(CONTENT_FALLBACK_SELECTORS) {
            Some(el) => ContentSection::Fallback(el),
            None => ContentSection::Missing,
        },
    }
}

/// Extract title, text and, when requested, metadata and images.
pub fn extract(doc: &Document, config: &ExtractionConfig) -> ExtractedContent {
    let section = resolve_content_section(doc, config);

    let metadata = if config.extract_metadata {
        Some(metadata::extract_metadata(doc))
    } else {
        None
    };

    let images = if config.extract_images {
        Some(images::extract_images(doc, config))
    } else {
        None
    };

    ExtractedContent {
        title: title::extract_title(doc, config),
        text: text::extract_text(doc, config, section),
        metadata,
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html>
        <head>
            <title>Head Title</title>
            <meta name="description" content="About the page">
        </head>
        <body>
            <h1>Headline</h1>
            <article>
                <p>First paragraph.</p>
                <img src="/hero.png" alt="Hero">
                <p>Second paragraph.</p>
            </article>
        </body>
        </html>
    "#;

    #[test]
    fn default_config_extracts_title_and_text_only() {
        let doc = Document::parse(PAGE);
        let content = extract(&doc, &ExtractionConfig::default());

        assert_eq!(content.title.as_deref(), Some("Headline"));
        assert_eq!(
            content.text.as_deref(),
            Some("First paragraph.\n\nSecond paragraph.")
        );
        assert!(content.metadata.is_none());
        assert!(content.images.is_none());
    }

    #[test]
    fn flags_enable_metadata_and_images() {
        let doc = Document::parse(PAGE);
        let config = ExtractionConfig::default().with_metadata(true).with_images(true);
        let content = extract(&doc, &config);

        let metadata = content.metadata.expect("metadata requested");
        assert_eq!(metadata.get("description").map(String::as_str), Some("About the page"));
        let images = content.images.expect("images requested");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "/hero.png");
    }

    #[test]
    fn extract_is_idempotent() {
        let doc = Document::parse(PAGE);
        let config = ExtractionConfig::default().with_metadata(true).with_images(true);
        assert_eq!(extract(&doc, &config), extract(&doc, &config));
    }

    #[test]
    fn section_resolution_variants() {
        let doc = Document::parse(PAGE);

        let selected = ExtractionConfig::default().with_content_selector("article");
        assert!(matches!(
            resolve_content_section(&doc, &selected),
            ContentSection::Selected(_)
        ));

        let unresolved = ExtractionConfig::default().with_content_selector(".missing");
        assert!(matches!(
            resolve_content_section(&doc, &unresolved),
            ContentSection::Unresolved
        ));

        assert!(matches!(
            resolve_content_section(&doc, &ExtractionConfig::default()),
            ContentSection::Fallback(_)
        ));

        let bare = Document::parse("<html><body><p>x</p></body></html>");
        assert!(matches!(
            resolve_content_section(&bare, &ExtractionConfig::default()),
            ContentSection::Missing
        ));
    }
}
