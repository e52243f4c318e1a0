// ABOUTME: Image rule: picks candidate elements and emits {src, alt, title} for those with a src.
// ABOUTME: Without an image selector, images are scoped to the main container when one exists.

use scraper::ElementRef;

use crate::config::ExtractionConfig;
use crate::dom::{attr_or_empty, select_within, Document};
use crate::extractors::IMAGE_CONTAINER_SELECTORS;
use crate::result::ImageInfo;

/// Candidate elements in document order.
fn image_candidates<'a>(doc: &'a Document, config: &ExtractionConfig) -> Vec<ElementRef<'a>> {
    if let Some(css) = config.image_selector.as_deref() {
        return doc.select_all(css);
    }
    match doc.select_first_of(IMAGE_CONTAINER_SELECTORS) {
        Some(container) => select_within(container, "img"),
        None => doc.select_all("img"),
    }
}

/// Extract images. Candidates without a non-empty `src` are skipped.
pub fn extract_images(doc: &Document, config: &ExtractionConfig) -> Vec<ImageInfo> {
    image_candidates(doc, config)
        .into_iter()
        .filter_map(|el| {
            let src = attr_or_empty(el, "src");
            if src.is_empty() {
                return None;
            }
            Some(ImageInfo {
                src: src.to_string(),
                alt: attr_or_empty(el, "alt").to_string(),
                title: attr_or_empty(el, "title").to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn srcs(images: &[ImageInfo]) -> Vec<&str> {
        images.iter().map(|img| img.src.as_str()).collect()
    }

    #[test]
    fn missing_alt_and_title_default_to_empty() {
        let doc = Document::parse(r#"<html><body><img src="a.png"></body></html>"#);
        let images = extract_images(&doc, &ExtractionConfig::default());
        assert_eq!(
            images,
            vec![ImageInfo {
                src: "a.png".to_string(),
                alt: String::new(),
                title: String::new(),
            }]
        );
    }

    #[test]
    fn scoped_to_article_when_present() {
        let doc = Document::parse(
            r#"<html><body>
                <img src="/logo.png">
                <article><img src="/one.png" alt="One" title="First"><img src="/two.png"></article>
            </body></html>"#,
        );
        let images = extract_images(&doc, &ExtractionConfig::default());
        assert_eq!(srcs(&images), vec!["/one.png", "/two.png"]);
        assert_eq!(images[0].alt, "One");
        assert_eq!(images[0].title, "First");
    }

    #[test]
    fn container_without_images_yields_empty_list() {
        let doc = Document::parse(
            r#"<html><body><img src="/logo.png"><main><p>No pictures</p></main></body></html>"#,
        );
        assert!(extract_images(&doc, &ExtractionConfig::default()).is_empty());
    }

    #[test]
    fn content_id_does_not_scope_images() {
        let doc = Document::parse(
            r#"<html><body>
                <img src="/outside.png">
                <div id="content"><img src="/inside.png"></div>
            </body></html>"#,
        );
        let images = extract_images(&doc, &ExtractionConfig::default());
        assert_eq!(srcs(&images), vec!["/outside.png", "/inside.png"]);
    }

    #[test]
    fn images_without_src_are_skipped() {
        let doc = Document::parse(
            r#"<html><body><img alt="no src"><img src=""><img src="/ok.png"></body></html>"#,
        );
        let images = extract_images(&doc, &ExtractionConfig::default());
        assert_eq!(srcs(&images), vec!["/ok.png"]);
    }

    #[test]
    fn selector_searches_whole_document() {
        let doc = Document::parse(
            r#"<html><body>
                <article><img class="pic" src="/a.png"></article>
                <aside><img class="pic" src="/b.png"><img src="/c.png"></aside>
            </body></html>"#,
        );
        let config = ExtractionConfig::default().with_image_selector("img.pic");
        let images = extract_images(&doc, &config);
        assert_eq!(srcs(&images), vec!["/a.png", "/b.png"]);
    }
}
