// ABOUTME: Pre-compiled CSS selector cache for O(1) selector lookup.
// ABOUTME: Eliminates repeated parsing of caller-supplied and fallback selectors.

//! Selector caching for efficient repeated DOM queries.
//!
//! Callers tend to send the same selector configuration over and over, and
//! the fallback chains use a fixed handful of selectors. Parsing is done once
//! per distinct selector string; invalid selectors are cached as `None`.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

/// Thread-safe cache of compiled CSS selectors.
static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `Some(Selector)` if the selector is valid, `None` if invalid.
/// A poisoned lock only costs the cache, never the lookup.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    if let Ok(cache) = SELECTOR_CACHE.read() {
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(err) => {
            tracing::warn!(selector = css, error = %err, "invalid CSS selector");
            None
        }
    };

    if let Ok(mut cache) = SELECTOR_CACHE.write() {
        // Another thread may have inserted while we were parsing.
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
        cache.insert(css.to_string(), compiled.clone());
    }
    compiled
}
