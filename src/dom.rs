//! DOM query facade.
//!
//! Thin adapter over the `dom_query` crate. Extraction algorithms are written
//! only against this module, never against the library API directly, so the
//! parsing backend can be swapped without touching any strategy code.

// Re-export core types for signatures throughout the crate.
pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

use crate::text::normalize_whitespace;

/// Parse an HTML string into a queryable document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// First element matching a CSS selector within a selection.
#[inline]
#[must_use]
pub fn query_first<'a>(sel: &Selection<'a>, selector: &str) -> Selection<'a> {
    sel.select_single(selector)
}

/// Whether a selection's nodes match a CSS selector.
#[inline]
#[must_use]
pub fn matches(sel: &Selection, selector: &str) -> bool {
    sel.is(selector)
}

/// Full text content of a selection (raw, un-normalized).
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Attribute value of the first node in a selection.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|value| value.to_string())
}

/// Parent element of a selection.
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Tag name (lowercase) of the first node in a selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|tag| tag.to_string())
}

/// Whitespace-normalized text of the first match for a selector, if any
/// non-empty text exists there.
#[must_use]
pub fn first_text(root: &Selection, selector: &str) -> Option<String> {
    if selector.trim().is_empty() {
        return None;
    }
    let found = query_first(root, selector);
    if !found.exists() {
        return None;
    }
    let text = normalize_whitespace(&text_content(&found));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Attribute of the first match for a selector, if present and non-empty.
#[must_use]
pub fn first_attr(root: &Selection, selector: &str, name: &str) -> Option<String> {
    if selector.trim().is_empty() {
        return None;
    }
    let found = query_first(root, selector);
    if !found.exists() {
        return None;
    }
    get_attribute(&found, name).filter(|value| !value.trim().is_empty())
}

/// Walk each node matched by `selector` under `root` as its own selection.
///
/// `dom_query` selections are flat node lists; this is the idiom for
/// per-element iteration used by every extractor strategy.
#[must_use]
pub fn each<'a>(root: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    if selector.trim().is_empty() {
        return Vec::new();
    }
    root.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_query() {
        let doc = parse(r#"<div class="a"><p>hello</p><p>world</p></div>"#);
        let root = doc.select("div.a");
        assert!(root.exists());
        assert_eq!(each(&root, "p").len(), 2);
    }

    #[test]
    fn matches_tests_the_selection_itself() {
        let doc = parse(r#"<div class="layout"><p>x</p></div>"#);
        let root = doc.select("div");
        assert!(matches(&root, "div.layout"));
        assert!(!matches(&root, "section"));
    }

    #[test]
    fn first_text_normalizes_and_skips_empty() {
        let doc = parse("<div><span class='t'>  a   b </span><span class='e'>  </span></div>");
        let root = doc.select("div");
        assert_eq!(first_text(&root, ".t").as_deref(), Some("a b"));
        assert_eq!(first_text(&root, ".e"), None);
        assert_eq!(first_text(&root, ".missing"), None);
    }

    #[test]
    fn first_attr_skips_blank_values() {
        let doc = parse(r#"<div><a href="https://x.example">x</a><a class="b" href="">y</a></div>"#);
        let root = doc.select("div");
        assert_eq!(first_attr(&root, "a", "href").as_deref(), Some("https://x.example"));
        assert_eq!(first_attr(&root, "a.b", "href"), None);
    }
}
