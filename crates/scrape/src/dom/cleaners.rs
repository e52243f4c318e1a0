// ABOUTME: Text cleaning helpers applied to paragraph text before it is joined.
// ABOUTME: Strips leaked script/style markup and collapses whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `<script …>…</script>` and `<style …>…</style>` blocks, each closed by its own
/// tag.
static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("static script/style pattern")
});

/// Collapses runs of whitespace into single spaces and trims both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans raw paragraph text.
///
/// Any embedded script or style block is removed first, then whitespace runs
/// (spaces, tabs, newlines) collapse to one space and the result is trimmed.
pub fn clean_text(raw: &str) -> String {
    let stripped = SCRIPT_STYLE_RE.replace_all(raw, "");
    normalize_whitespace(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world  "), "hello world");
        assert_eq!(normalize_whitespace("no\textra\nspaces"), "no extra spaces");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello\n\n\t world  "), "Hello world");
    }

    #[test]
    fn test_clean_text_strips_script_and_style() {
        let raw = concat!(
            "Before <script type=\"text/javascript\">var x = 1;\nalert(x);</script>",
            " middle <STYLE>p { color: red }</STYLE> after"
        );
        assert_eq!(clean_text(raw), "Before middle after");
    }

    #[test]
    fn test_clean_text_keeps_unclosed_script_text() {
        // No matching close tag: nothing to strip.
        assert_eq!(clean_text("a <script> b"), "a <script> b");
    }

    #[test]
    fn test_clean_text_does_not_cross_tag_names() {
        // A script block must be closed by </script>, not </style>.
        assert_eq!(
            clean_text("x <script>one</style> two</script> y"),
            "x y"
        );
    }
}
