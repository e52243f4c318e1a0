// ABOUTME: Text rule: joins cleaned paragraph text from the resolved content section.
// ABOUTME: Falls back to body paragraphs when no container is found; no body means no text.

use scraper::ElementRef;

use crate::config::ExtractionConfig;
use crate::dom::cleaners::clean_text;
use crate::dom::{element_text, select_within, Document};
use crate::extractors::ContentSection;

/// Separator placed between paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

const DEFAULT_PARAGRAPH_SELECTOR: &str = "p";

/// Join the cleaned text of every paragraph that has non-blank text.
///
/// An empty input (or only blank paragraphs) yields `""`, which callers keep
/// distinct from "no container" (`None`).
pub fn join_paragraphs<'a, I>(paragraphs: I) -> String
where
    I: IntoIterator<Item = ElementRef<'a>>,
{
    paragraphs
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .map(|text| clean_text(&text))
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

/// Extract the body text for an already-resolved content section.
pub fn extract_text(
    doc: &Document,
    config: &ExtractionConfig,
    section: ContentSection<'_>,
) -> Option<String> {
    match section {
        ContentSection::Selected(container) => {
            let css = config
                .paragraph_selector
                .as_deref()
                .unwrap_or(DEFAULT_PARAGRAPH_SELECTOR);
            Some(join_paragraphs(select_within(container, css)))
        }
        ContentSection::Unresolved => None,
        ContentSection::Fallback(container) => Some(join_paragraphs(select_within(
            container,
            DEFAULT_PARAGRAPH_SELECTOR,
        ))),
        ContentSection::Missing => {
            let body = doc.select_one("body")?;
            tracing::debug!("no content container found, using body paragraphs");
            Some(join_paragraphs(select_within(body, DEFAULT_PARAGRAPH_SELECTOR)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::resolve_content_section;
    use pretty_assertions::assert_eq;

    fn text_of(html: &str, config: &ExtractionConfig) -> Option<String> {
        let doc = Document::parse(html);
        let section = resolve_content_section(&doc, config);
        extract_text(&doc, config, section)
    }

    #[test]
    fn article_paragraphs_joined() {
        let html = "<html><body><article><p>Hello</p><p>World</p></article></body></html>";
        assert_eq!(
            text_of(html, &ExtractionConfig::default()).as_deref(),
            Some("Hello\n\nWorld")
        );
    }

    #[test]
    fn fallback_chain_order_article_before_content_class() {
        let html = r#"<html><body>
            <div class="content"><p>From div</p></div>
            <article><p>From article</p></article>
        </body></html>"#;
        assert_eq!(
            text_of(html, &ExtractionConfig::default()).as_deref(),
            Some("From article")
        );
    }

    #[test]
    fn content_class_before_main_and_id() {
        let html = r#"<html><body>
            <div id="content"><p>By id</p></div>
            <main><p>From main</p></main>
            <section class="content"><p>By class</p></section>
        </body></html>"#;
        assert_eq!(
            text_of(html, &ExtractionConfig::default()).as_deref(),
            Some("By class")
        );
    }

    #[test]
    fn content_id_is_last_resort_container() {
        let html = r#"<html><body>
            <p>Body level</p>
            <div id="content"><p>By id</p></div>
        </body></html>"#;
        assert_eq!(
            text_of(html, &ExtractionConfig::default()).as_deref(),
            Some("By id")
        );
    }

    #[test]
    fn whitespace_only_paragraph_yields_empty_string() {
        let html = r#"<html><body><div class="content"><p>  </p></div></body></html>"#;
        assert_eq!(text_of(html, &ExtractionConfig::default()).as_deref(), Some(""));
    }

    #[test]
    fn body_fallback_joins_all_paragraphs() {
        let html = "<html><body><div><p>One</p></div><p>\n Two \t words </p></body></html>";
        assert_eq!(
            text_of(html, &ExtractionConfig::default()).as_deref(),
            Some("One\n\nTwo words")
        );
    }

    #[test]
    fn body_without_paragraphs_is_empty_string() {
        let html = "<html><body><div>No paragraphs here</div></body></html>";
        assert_eq!(text_of(html, &ExtractionConfig::default()).as_deref(), Some(""));
    }

    #[test]
    fn missing_content_selector_target_is_none() {
        let html = "<html><body><article><p>Present</p></article></body></html>";
        let config = ExtractionConfig::default().with_content_selector(".missing");
        assert_eq!(text_of(html, &config), None);
    }

    #[test]
    fn paragraph_selector_scoped_to_container() {
        let html = r#"<html><body>
            <li class="para">Outside</li>
            <div class="story">
                <p>Plain p is ignored</p>
                <li class="para">Item one</li>
                <li class="para">Item two</li>
            </div>
        </body></html>"#;
        let config = ExtractionConfig::default()
            .with_content_selector(".story")
            .with_paragraph_selector(".para");
        assert_eq!(
            text_of(html, &config).as_deref(),
            Some("Item one\n\nItem two")
        );
    }

    #[test]
    fn selected_container_without_paragraphs_is_empty_string() {
        let html = r#"<html><body><div class="story">Just text</div></body></html>"#;
        let config = ExtractionConfig::default().with_content_selector(".story");
        assert_eq!(text_of(html, &config).as_deref(), Some(""));
    }

    #[test]
    fn nested_markup_is_flattened() {
        let html = concat!(
            "<html><body><article>",
            "<p>Read <a href='#'>this\nlink</a> now</p></article></body></html>"
        );
        assert_eq!(
            text_of(html, &ExtractionConfig::default()).as_deref(),
            Some("Read this link now")
        );
    }
}
