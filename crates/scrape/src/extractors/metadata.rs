// ABOUTME: Metadata rule: collects meta name/property → content pairs across the document.

use std::collections::BTreeMap;

use crate::dom::{attr_or_empty, Document};

/// Collect every `meta` tag that has a key and a non-empty `content`.
///
/// The key is `name`, or `property` when `name` is missing or empty (OpenGraph
/// style). When a key repeats, the last tag wins.
pub fn extract_metadata(doc: &Document) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    for meta in doc.select_all("meta") {
        let key = match attr_or_empty(meta, "name") {
            "" => attr_or_empty(meta, "property"),
            name => name,
        };
        let content = attr_or_empty(meta, "content");
        if key.is_empty() || content.is_empty() {
            continue;
        }
        metadata.insert(key.to_string(), content.to_string());
    }
    metadata
}
