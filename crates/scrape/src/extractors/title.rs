// ABOUTME: Title rule: caller selector, else first h1, else the document title element.

use crate::config::ExtractionConfig;
use crate::dom::{element_text, Document};

/// Fallback order when no title selector is configured.
const TITLE_FALLBACK_SELECTORS: &[&str] = &["h1", "title"];

/// Extract the page title.
///
/// With a `title_selector`, an unmatched selector or a match with no text
/// yields `None`. Without one, the first `h1` wins over `title`, and its text
/// is returned as found (possibly empty).
pub fn extract_title(doc: &Document, config: &ExtractionConfig) -> Option<String> {
    match config.title_selector.as_deref() {
        Some(css) => doc
            .select_one(css)
            .map(element_text)
            .filter(|text| !text.is_empty()),
        None => doc
            .select_first_of(TITLE_FALLBACK_SELECTORS)
            .map(element_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_of(html: &str, config: &ExtractionConfig) -> Option<String> {
        extract_title(&Document::parse(html), config)
    }

    #[test]
    fn h1_preferred_over_title_tag() {
        let html = concat!(
            "<html><head><title>Tab</title></head>",
            "<body><h1>  Big  </h1><h1>Second</h1></body></html>"
        );
        assert_eq!(title_of(html, &ExtractionConfig::default()).as_deref(), Some("Big"));
    }

    #[test]
    fn title_tag_used_without_h1() {
        let html = "<html><head><title> Tab Title </title></head><body><p>x</p></body></html>";
        assert_eq!(
            title_of(html, &ExtractionConfig::default()).as_deref(),
            Some("Tab Title")
        );
    }

    #[test]
    fn none_without_h1_or_title() {
        let html = "<html><body><h2>Not a title</h2></body></html>";
        assert_eq!(title_of(html, &ExtractionConfig::default()), None);
    }

    #[test]
    fn selector_match_used_verbatim() {
        let html = "<html><body><h1>Site</h1><h2 class='headline'>Story</h2></body></html>";
        let config = ExtractionConfig::default().with_title_selector(".headline");
        assert_eq!(title_of(html, &config).as_deref(), Some("Story"));
    }

    #[test]
    fn selector_without_match_does_not_fall_back() {
        let html = "<html><body><h1>Site</h1></body></html>";
        let config = ExtractionConfig::default().with_title_selector(".headline");
        assert_eq!(title_of(html, &config), None);
    }

    #[test]
    fn selector_match_with_blank_text_is_none() {
        let html = "<html><body><h2 class='headline'>   </h2></body></html>";
        let config = ExtractionConfig::default().with_title_selector(".headline");
        assert_eq!(title_of(html, &config), None);
    }
}
