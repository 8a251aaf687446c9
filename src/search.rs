//! Blog search-result crawling.
//!
//! Parses the mobile blog search listing into [`BlogCrawlItem`] records.
//! Container and field selectors are each tried as ordered candidate lists
//! because Naver has shipped several listing skins that coexist across
//! regions and rollouts. When nothing matches, a generic anchor scan keeps
//! the crawl producing output on unknown markup.

use std::collections::HashSet;

use crate::dom::{self, Selection};
use crate::error::Result;
use crate::fetch::{FetchClient, HeaderProfile};
use crate::links;
use crate::options::ExtractOptions;
use crate::result::{BlogCrawlItem, SearchCrawl};
use crate::selectors::{SelectorRegistry, Variant, VariantSelectors};
use crate::text::normalize_whitespace;

const LISTING_ENDPOINT: &str = "https://m.search.naver.com/search.naver";

/// Alternate result-element selectors, tried after the registry's legacy
/// listing variant. First selector yielding at least one element wins.
const RESULT_CANDIDATES: &[&str] = &[
    "li.bx._svp_item",
    "div.view_wrap",
    "div.total_wrap",
];

const TITLE_CANDIDATES: &[&str] = &["a.title_link", "a.api_txt_lines.total_tit", "a.total_tit"];
const DESC_CANDIDATES: &[&str] = &["a.dsc_link", "a.api_txt_lines.dsc_txt", "div.dsc_wrap a"];
const NAME_CANDIDATES: &[&str] = &["a.sub_txt.sub_name", "span.sub_name", "div.user_info a.name"];
const DATE_CANDIDATES: &[&str] = &["span.sub_time", "span.sub_txt.sub_time", "span.date"];
const THUMB_CANDIDATES: &[&str] = &["img.thumb", "img.thumb_img", "a.thumb img"];

/// Minimum title length accepted by the generic anchor-scan fallback.
const FALLBACK_MIN_TITLE: usize = 10;

/// Build the mobile listing URL for a keyword, requesting a large page size.
#[must_use]
pub fn search_url(keyword: &str, display: usize) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
    format!("{LISTING_ENDPOINT}?where=m_blog&query={encoded}&display={display}")
}

/// Fetch the listing for a keyword and parse it.
pub async fn crawl_blog_search(
    client: &FetchClient,
    keyword: &str,
    registry: &SelectorRegistry,
    options: &ExtractOptions,
) -> Result<SearchCrawl> {
    let url = search_url(keyword, options.display);
    let html = client.fetch_html(&url, HeaderProfile::Mobile).await?;
    let items = parse_search_results(&html, registry, options);

    Ok(SearchCrawl {
        keyword: keyword.to_string(),
        total: items.len(),
        items,
        url,
    })
}

/// Parse a blog search listing page into crawl items.
///
/// Rejection rules: links through the ad-redirect host are never emitted, and
/// blog-hosted links must carry both a blog-ID and a post-ID path segment.
/// After dedup, consecutive results from the same blog are collapsed (when
/// `options.collapse_consecutive` is set) - Naver tends to stack several
/// posts from one blog back-to-back, which reads as noise for diversity
/// purposes. Non-adjacent repeats are kept.
#[must_use]
pub fn parse_search_results(
    html: &str,
    registry: &SelectorRegistry,
    options: &ExtractOptions,
) -> Vec<BlogCrawlItem> {
    let doc = dom::parse(html);
    let root = doc.select("html");
    let legacy = registry.get(Variant::LegacyBlogSearch);

    let registry_selector = format!("{} {}", legacy.container, legacy.item);
    let mut elements = dom::each(&root, &registry_selector);
    if elements.is_empty() {
        for candidate in RESULT_CANDIDATES {
            elements = dom::each(&root, candidate);
            if !elements.is_empty() {
                break;
            }
        }
    }

    let mut items = Vec::new();
    if elements.is_empty() {
        tracing::debug!("no listing selector matched, falling back to anchor scan");
        scan_anchors(&root, &mut items);
    } else {
        for element in &elements {
            if let Some(item) = parse_result_element(element, legacy) {
                items.push(item);
            }
        }
    }

    dedup_by_link(&mut items);
    if options.collapse_consecutive {
        collapse_consecutive(&mut items);
    }
    items
}

/// Extract one listing element. Fields beyond title/link are independently
/// defaulted to empty when their selectors match nothing.
fn parse_result_element(element: &Selection, legacy: &VariantSelectors) -> Option<BlogCrawlItem> {
    let anchor = first_existing(element, &legacy.title_link, TITLE_CANDIDATES)?;
    let title = normalize_whitespace(&dom::text_content(&anchor));
    let href = dom::get_attribute(&anchor, "href").unwrap_or_default();
    // Raw-href check: normalization unwraps redirect wrappers, which would
    // hide the ad host from the filter below.
    if links::is_ad_link(&href) {
        return None;
    }
    let redirect = dom::get_attribute(&anchor, "cru");
    let link = links::normalize_link(&href, redirect.as_deref());
    if title.is_empty() || !accept_result_link(&link) {
        return None;
    }

    Some(BlogCrawlItem {
        title,
        link,
        description: text_from(element, &legacy.preview, DESC_CANDIDATES),
        blog_name: text_from(element, &legacy.blog_info, NAME_CANDIDATES),
        date: text_from(element, &legacy.date, DATE_CANDIDATES),
        thumbnail: attr_from(element, &legacy.image, THUMB_CANDIDATES, "src"),
    })
}

/// Generic fallback: accept anchors whose href mentions blog/post and whose
/// text is long enough to be a title, deriving a description from the
/// anchor's nearest block ancestor.
fn scan_anchors(root: &Selection, out: &mut Vec<BlogCrawlItem>) {
    for anchor in dom::each(root, "a[href]") {
        let href = dom::get_attribute(&anchor, "href").unwrap_or_default();
        if !href.contains("blog") && !href.contains("post") {
            continue;
        }
        if links::is_ad_link(&href) {
            continue;
        }
        let link = links::normalize_link(&href, None);
        if !accept_result_link(&link) {
            continue;
        }
        let title = normalize_whitespace(&dom::text_content(&anchor));
        if title.chars().count() <= FALLBACK_MIN_TITLE {
            continue;
        }

        out.push(BlogCrawlItem {
            title: title.clone(),
            link,
            description: sibling_description(&anchor, &title),
            ..BlogCrawlItem::default()
        });
    }
}

/// Description for a scanned anchor: the text of its nearest block ancestor
/// with the title removed.
fn sibling_description(anchor: &Selection, title: &str) -> String {
    const BLOCK_TAGS: &[&str] = &["li", "div", "section", "article"];

    let mut current = dom::parent(anchor);
    for _ in 0..3 {
        if !current.exists() {
            return String::new();
        }
        if dom::tag_name(&current).is_some_and(|tag| BLOCK_TAGS.contains(&tag.as_str())) {
            let text = normalize_whitespace(&dom::text_content(&current));
            return normalize_whitespace(&text.replacen(title, "", 1));
        }
        current = dom::parent(&current);
    }
    String::new()
}

fn accept_result_link(link: &str) -> bool {
    if link.is_empty() || links::is_ad_link(link) {
        return false;
    }
    // Foreign hosts (tistory etc.) pass as-is; the path rule is about Naver's
    // own blog URL shape.
    if links::is_blog_link(link) && !links::has_blog_post_path(link) {
        return false;
    }
    true
}

fn first_existing<'a>(
    element: &Selection<'a>,
    registry_selector: &str,
    candidates: &[&str],
) -> Option<Selection<'a>> {
    if !registry_selector.trim().is_empty() {
        let found = dom::query_first(element, registry_selector);
        if found.exists() {
            return Some(found);
        }
    }
    for candidate in candidates {
        let found = dom::query_first(element, candidate);
        if found.exists() {
            return Some(found);
        }
    }
    None
}

fn text_from(element: &Selection, registry_selector: &str, candidates: &[&str]) -> String {
    first_existing(element, registry_selector, candidates)
        .map(|found| normalize_whitespace(&dom::text_content(&found)))
        .unwrap_or_default()
}

fn attr_from(
    element: &Selection,
    registry_selector: &str,
    candidates: &[&str],
    name: &str,
) -> String {
    first_existing(element, registry_selector, candidates)
        .and_then(|found| dom::get_attribute(&found, name))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Keep-first dedup on exact link equality.
fn dedup_by_link(items: &mut Vec<BlogCrawlItem>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.link.clone()));
}

/// Drop any item whose derived blog ID equals the immediately preceding kept
/// item's ID. Only adjacent repeats are collapsed; the same blog reappearing
/// later is kept.
fn collapse_consecutive(items: &mut Vec<BlogCrawlItem>) {
    let mut last_kept: Option<String> = None;
    items.retain(|item| {
        let id = links::blog_id_from_link(&item.link);
        match (&id, &last_kept) {
            (Some(current), Some(previous)) if current == previous => false,
            _ => {
                last_kept = id;
                true
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: &str) -> BlogCrawlItem {
        BlogCrawlItem {
            title: "title".to_string(),
            link: link.to_string(),
            ..BlogCrawlItem::default()
        }
    }

    #[test]
    fn collapse_drops_only_adjacent_repeats() {
        // Blog-ID sequence [A, A, B, A] keeps positions 1, 3, 4.
        let mut items = vec![
            item("https://blog.naver.com/aaa/1"),
            item("https://blog.naver.com/aaa/2"),
            item("https://blog.naver.com/bbb/3"),
            item("https://blog.naver.com/aaa/4"),
        ];
        collapse_consecutive(&mut items);
        let links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(
            links,
            [
                "https://blog.naver.com/aaa/1",
                "https://blog.naver.com/bbb/3",
                "https://blog.naver.com/aaa/4",
            ]
        );
    }

    #[test]
    fn collapse_ignores_items_without_derivable_id() {
        let mut items = vec![
            item("https://blog.naver.com/aaa/1"),
            item("https://example.tistory.com/55"),
            item("https://blog.naver.com/aaa/2"),
        ];
        collapse_consecutive(&mut items);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn ad_links_are_rejected() {
        assert!(!accept_result_link("https://ader.naver.com/v1/click?u=x"));
        assert!(accept_result_link("https://blog.naver.com/abc/100"));
    }

    #[test]
    fn blog_links_need_post_path() {
        assert!(!accept_result_link("https://blog.naver.com/abc"));
        assert!(accept_result_link("https://example.tistory.com/55"));
    }

    #[test]
    fn search_url_encodes_keyword() {
        let url = search_url("다이어트 식단", 50);
        assert!(url.starts_with("https://m.search.naver.com/search.naver?"));
        assert!(url.contains("display=50"));
        assert!(!url.contains(' '));
    }
}
