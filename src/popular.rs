//! Popular-item extraction.
//!
//! Multi-strategy parser for Naver's "popular post" search widgets. The two
//! modern layout variants (collection block-lists and single-intention card
//! lists) are tried independently - each can contribute disjoint sections
//! within one page - and the combined output is deduplicated by canonical
//! link. Pages predating the widget markup go through the legacy section
//! scanner instead.
//!
//! Items with an empty title, or whose link resolves to cafe/ad hosts, are
//! silently dropped; that is filtering, not an error.

use std::collections::HashSet;

use crate::dom::{self, Selection};
use crate::links;
use crate::options::ExtractOptions;
use crate::result::PopularItem;
use crate::selectors::{SelectorRegistry, Variant, VariantSelectors};
use crate::text::normalize_whitespace;

/// Extract popular items from a search result page using the modern widget
/// variants. Returns an empty vector when neither variant matches anything;
/// callers needing resilience chain [`extract_with_fallback`].
#[must_use]
pub fn extract_popular_items(
    html: &str,
    registry: &SelectorRegistry,
    options: &ExtractOptions,
) -> Vec<PopularItem> {
    let doc = dom::parse(html);
    let root = doc.select("html");

    let mut items = Vec::new();
    collect_collection_sections(&root, registry.get(Variant::Collection), options, &mut items);
    collect_single_intention_sections(
        &root,
        registry.get(Variant::SingleIntention),
        options,
        &mut items,
    );

    dedup_by_link(&mut items);
    items.truncate(options.max_items);
    items
}

/// Modern extraction with the legacy scanner as a fallback for pages that
/// lack widget markup entirely.
#[must_use]
pub fn extract_with_fallback(
    html: &str,
    registry: &SelectorRegistry,
    options: &ExtractOptions,
) -> Vec<PopularItem> {
    let items = extract_popular_items(html, registry, options);
    if !items.is_empty() {
        return items;
    }
    tracing::debug!("no widget markup matched, trying legacy section scanner");
    extract_legacy_sections(html, registry, options)
}

/// Block-list layout: each collection root carries its own heading and a flat
/// list of item blocks.
fn collect_collection_sections(
    root: &Selection,
    selectors: &VariantSelectors,
    options: &ExtractOptions,
    out: &mut Vec<PopularItem>,
) {
    for container in dom::each(root, &selectors.container) {
        let group = dom::first_text(&container, &selectors.headline)
            .unwrap_or_else(|| options.default_group.clone());

        for item in dom::each(&container, &selectors.item) {
            let Some((title, link)) = resolve_title_anchor(&item, selectors) else {
                continue;
            };
            if !accept_blog_link(&link) {
                continue;
            }

            let blog_name = dom::first_text(&item, &selectors.blog_info).unwrap_or_default();
            let blog_link = dom::first_attr(&item, &selectors.blog_info, "href")
                .map(|href| links::normalize_link(&href, None))
                .unwrap_or_default();

            out.push(PopularItem {
                title,
                link,
                snippet: dom::first_text(&item, &selectors.preview).unwrap_or_default(),
                image: dom::first_attr(&item, &selectors.image, "src")
                    .map(|src| absolutize_image(&src))
                    .unwrap_or_default(),
                badge: dom::first_text(&item, &selectors.badge).unwrap_or_default(),
                group: group.clone(),
                blog_name,
                blog_link,
            });
        }
    }
}

/// Card-list layout: the section heading lives outside the item subtree, so
/// the group is resolved by walking up from the list container.
fn collect_single_intention_sections(
    root: &Selection,
    selectors: &VariantSelectors,
    options: &ExtractOptions,
    out: &mut Vec<PopularItem>,
) {
    for container in dom::each(root, &selectors.container) {
        let group = ancestor_headline(&container, selectors)
            .unwrap_or_else(|| options.default_group.clone());

        for item in dom::each(&container, &selectors.item) {
            let anchor = dom::query_first(&item, &selectors.title_link);
            if !anchor.exists() {
                continue;
            }
            let title = normalize_whitespace(&dom::text_content(&anchor));
            let href = dom::get_attribute(&anchor, "href").unwrap_or_default();
            if links::is_ad_link(&href) {
                continue;
            }
            let redirect = dom::get_attribute(&anchor, "cru");
            let link = links::normalize_link(&href, redirect.as_deref());
            if title.is_empty() || !accept_blog_link(&link) {
                continue;
            }

            out.push(PopularItem {
                title,
                link,
                snippet: dom::first_text(&item, &selectors.preview).unwrap_or_default(),
                image: dom::first_attr(&item, &selectors.image, "src")
                    .map(|src| absolutize_image(&src))
                    .unwrap_or_default(),
                badge: String::new(),
                group: group.clone(),
                blog_name: dom::first_text(&item, &selectors.blog_info).unwrap_or_default(),
                blog_link: dom::first_attr(&item, &selectors.blog_info, "href")
                    .map(|href| links::normalize_link(&href, None))
                    .unwrap_or_default(),
            });
        }
    }
}

/// The older block/section scanner, retained for pages lacking the modern
/// widget markup. Driven by the legacy listing variant, with the snippet
/// variants supplying preview text and images where the legacy skin omits
/// them.
#[must_use]
pub fn extract_legacy_sections(
    html: &str,
    registry: &SelectorRegistry,
    options: &ExtractOptions,
) -> Vec<PopularItem> {
    let doc = dom::parse(html);
    let root = doc.select("html");
    let legacy = registry.get(Variant::LegacyBlogSearch);
    let snippet_text = registry.get(Variant::SnippetParagraph);
    let snippet_image = registry.get(Variant::SnippetImage);

    let mut items = Vec::new();
    for container in dom::each(&root, &legacy.container) {
        let group = dom::first_text(&container, &legacy.headline)
            .unwrap_or_else(|| options.default_group.clone());

        for item in dom::each(&container, &legacy.item) {
            let Some((title, link)) = resolve_title_anchor(&item, legacy) else {
                continue;
            };
            if !accept_blog_link(&link) {
                continue;
            }

            let snippet = dom::first_text(&item, &legacy.preview)
                .or_else(|| dom::first_text(&item, &snippet_text.item))
                .unwrap_or_default();
            let image = dom::first_attr(&item, &legacy.image, "src")
                .or_else(|| dom::first_attr(&item, &snippet_image.item, "src"))
                .map(|src| absolutize_image(&src))
                .unwrap_or_default();

            items.push(PopularItem {
                title,
                link,
                snippet,
                image,
                badge: String::new(),
                group: group.clone(),
                blog_name: dom::first_text(&item, &legacy.blog_info).unwrap_or_default(),
                blog_link: dom::first_attr(&item, &legacy.blog_info, "href")
                    .map(|href| links::normalize_link(&href, None))
                    .unwrap_or_default(),
            });
        }
    }

    dedup_by_link(&mut items);
    items.truncate(options.max_items);
    items
}

/// Title resolution: prefer the wrapping title-container anchor over the bare
/// title anchor when both exist (alternate markup pattern).
fn resolve_title_anchor(item: &Selection, selectors: &VariantSelectors) -> Option<(String, String)> {
    let anchor = if !selectors.title_wrap.is_empty()
        && dom::query_first(item, &selectors.title_wrap).exists()
    {
        dom::query_first(item, &selectors.title_wrap)
    } else {
        if selectors.title_link.is_empty() {
            return None;
        }
        dom::query_first(item, &selectors.title_link)
    };
    if !anchor.exists() {
        return None;
    }

    let title = normalize_whitespace(&dom::text_content(&anchor));
    let href = dom::get_attribute(&anchor, "href").unwrap_or_default();
    // The ad filter looks at the raw href: normalization would unwrap an
    // ad redirect's embedded destination and hide the ad host.
    if links::is_ad_link(&href) {
        return None;
    }
    let redirect = dom::get_attribute(&anchor, "cru");
    let link = links::normalize_link(&href, redirect.as_deref());
    if title.is_empty() || link.is_empty() {
        return None;
    }
    Some((title, link))
}

/// Accept only blog-hosted links; cafe and ad-redirect hosts are noise here.
fn accept_blog_link(link: &str) -> bool {
    !link.is_empty()
        && links::is_blog_link(link)
        && !links::is_cafe_link(link)
        && !links::is_ad_link(link)
}

/// Walk up from a list container to the nearest ancestor matching the
/// variant's `layout` selector and take the headline found inside it, if
/// any. A headline elsewhere on the page never applies; when the layout
/// container carries no headline the caller's sentinel group kicks in.
/// Without a configured `layout` selector the nearest headline under the
/// first few ancestors is used instead.
fn ancestor_headline(container: &Selection, selectors: &VariantSelectors) -> Option<String> {
    let layout = selectors.layout.trim();
    let mut current = dom::parent(container);
    for _ in 0..4 {
        if !current.exists() {
            return None;
        }
        if layout.is_empty() {
            if let Some(text) = dom::first_text(&current, &selectors.headline) {
                return Some(text);
            }
        } else if dom::matches(&current, layout) {
            return dom::first_text(&current, &selectors.headline);
        }
        current = dom::parent(&current);
    }
    None
}

/// Keep-first dedup on canonical link, preserving document order otherwise.
/// Running it twice is a no-op.
fn dedup_by_link(items: &mut Vec<PopularItem>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.link.clone()));
}

/// Image srcs on search pages come protocol-relative or absolute; anything
/// else is dropped.
fn absolutize_image(src: &str) -> String {
    let src = src.trim();
    if src.starts_with("//") {
        return format!("https:{src}");
    }
    if src.starts_with("http") {
        return src.to_string();
    }
    String::new()
}
