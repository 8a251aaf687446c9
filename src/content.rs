//! Blog-post content extraction.
//!
//! Naver blog posts are frequently served as an outer shell page whose real
//! content lives in a child iframe, so extraction is two-phase: resolve and
//! fetch the content frame (falling back to the outer page on failure), then
//! run a prioritized chain of content strategies over whichever HTML we
//! ended up with.
//!
//! Short output is a soft state: a post that yields fewer characters than the
//! configured minimum is returned as-is and flagged via
//! [`ExtractedContent::is_thin`], never raised as an error.

use std::collections::HashSet;

use url::Url;

use crate::dom::{self, Selection};
use crate::error::Result;
use crate::fetch::{FetchClient, HeaderProfile};
use crate::links;
use crate::options::ExtractOptions;
use crate::patterns::{CDN_SIZE_PARAM, DECORATIVE_IMAGE};
use crate::result::{ContentOutcome, ExtractedContent};
use crate::text::{is_meaningful_text, normalize_whitespace, signature};

/// Rich-text editor container used by current blog posts.
const RICH_TEXT_CONTAINER: &str = "div.se-main-container";

/// Rich-text editor title block.
const RICH_TITLE: &str = "div.se-title-text";

/// Older blog skin templates, tried in priority order after the rich-text
/// container: (content container, text nodes, image nodes).
const LEGACY_SKIN_TRIPLES: &[(&str, &str, &str)] = &[
    ("#postViewArea", "p, div", "img"),
    ("div.se_component_wrap", "p.se_textarea, div.se_paragraph", "img"),
    ("div.post-view", "p, div", "img"),
    ("#content-area", "p, div, td", "img"),
];

/// Author-name candidates across blog skins, tried in order.
const BLOG_NAME_CANDIDATES: &[&str] = &[
    "span.nick",
    "a.blog_author",
    "span.nickname",
    "strong.itemfont",
];

/// og:site_name values that identify the platform, not an author.
const PLATFORM_SITE_LABELS: &[&str] = &["네이버 블로그", "네이버블로그", "Naver Blog"];

/// Sentinel title when nothing on the page names the post.
const NO_TITLE: &str = "제목 없음";

/// Find the content frame URL inside an outer shell page.
///
/// Looks for the known main-frame iframe first, then any iframe, and resolves
/// its `src` against the outer page URL (protocol-relative, root-relative and
/// plain relative forms all appear in the wild).
#[must_use]
pub fn resolve_frame_src(outer_html: &str, outer_url: &str) -> Option<String> {
    let doc = dom::parse(outer_html);
    let root = doc.select("html");

    let frame = {
        let main = dom::query_first(&root, "iframe#mainFrame");
        if main.exists() {
            main
        } else {
            dom::query_first(&root, "iframe")
        }
    };
    if !frame.exists() {
        return None;
    }

    let src = dom::get_attribute(&frame, "src")?;
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    if src.starts_with("http") {
        return Some(src.to_string());
    }

    let base = Url::parse(outer_url).ok()?;
    base.join(src).ok().map(Into::into)
}

/// Fetch a blog post, follow its content iframe if present, and extract.
///
/// The frame fetch carries the outer URL as `Referer` and is bounded by
/// `options.frame_timeout`; on failure or timeout the outer page HTML is
/// extracted instead, so one slow frame host cannot sink the request.
pub async fn resolve_and_extract(
    client: &FetchClient,
    url: &str,
    options: &ExtractOptions,
) -> Result<ExtractedContent> {
    let mut html = client.fetch_html(url, HeaderProfile::Desktop).await?;
    let mut actual_url = url.to_string();

    if let Some(frame_url) = resolve_frame_src(&html, url) {
        let fetch = client.fetch_html_with_referer(&frame_url, HeaderProfile::Desktop, url);
        match tokio::time::timeout(options.frame_timeout, fetch).await {
            Ok(Ok(frame_html)) => {
                html = frame_html;
                actual_url = frame_url;
            }
            Ok(Err(err)) => {
                tracing::warn!(url, frame_url, %err, "frame fetch failed, using outer page");
            }
            Err(_) => {
                tracing::warn!(url, frame_url, "frame fetch timed out, using outer page");
            }
        }
    }

    Ok(extract_content(&html, &actual_url, options))
}

/// Fetch and extract several posts concurrently.
///
/// Each slot is independently failable: an error becomes that slot's
/// placeholder message and never aborts the batch.
pub async fn extract_many(
    client: &FetchClient,
    urls: &[String],
    options: &ExtractOptions,
) -> Vec<ContentOutcome> {
    let tasks = urls.iter().map(|url| async move {
        match resolve_and_extract(client, url, options).await {
            Ok(content) => ContentOutcome {
                url: url.clone(),
                content: Some(content),
                error: None,
            },
            Err(err) => ContentOutcome {
                url: url.clone(),
                content: None,
                error: Some(err.to_string()),
            },
        }
    });
    futures::future::join_all(tasks).await
}

/// Extract title, body text and images from a blog content page.
///
/// Strategy chain, first non-trivial match wins:
/// 1. the rich-text container, when its plain text clears the minimum length;
/// 2. older skin templates via [`LEGACY_SKIN_TRIPLES`], collecting meaningful
///    text nodes deduplicated by exact text and by signature prefix;
/// 3. a generic scan of `p`/`div`/`span`/`td` elements.
#[must_use]
pub fn extract_content(
    html: &str,
    actual_url: &str,
    options: &ExtractOptions,
) -> ExtractedContent {
    let doc = dom::parse(html);
    let root = doc.select("html");
    let origin =
        links::origin_of(actual_url).unwrap_or_else(|| "https://blog.naver.com".to_string());

    let mut content = String::new();
    let mut images = Vec::new();

    let rich = dom::query_first(&root, RICH_TEXT_CONTAINER);
    if rich.exists() {
        let text = normalize_whitespace(&dom::text_content(&rich));
        if text.chars().count() > options.min_content_len {
            content = text;
            images = collect_images(&rich, "img", &origin);
        }
    }

    if content.is_empty() {
        for (container_sel, text_sel, image_sel) in LEGACY_SKIN_TRIPLES {
            let container = dom::query_first(&root, container_sel);
            if !container.exists() {
                continue;
            }
            let parts = meaningful_parts(&container, text_sel, options);
            if parts.is_empty() {
                continue;
            }
            content = parts.join("\n");
            images = collect_images(&container, image_sel, &origin);
            break;
        }
    }

    if content.is_empty() {
        let parts = meaningful_parts(&root, "p, div, span, td", options);
        content = parts.join("\n");
        images = collect_images(&root, "img", &origin);
    }

    ExtractedContent {
        title: resolve_title(&root),
        content,
        images,
        blog_name: resolve_blog_name(&root),
        actual_url: actual_url.to_string(),
    }
}

/// Collect meaningful text nodes under a container, deduplicated by exact
/// text and by signature prefix to skip repeated skin boilerplate.
fn meaningful_parts(container: &Selection, text_sel: &str, options: &ExtractOptions) -> Vec<String> {
    let mut seen_exact = HashSet::new();
    let mut seen_signature = HashSet::new();
    let mut parts = Vec::new();

    for node in dom::each(container, text_sel) {
        let text = normalize_whitespace(&dom::text_content(&node));
        if !is_meaningful_text(&text, options.min_text_len, options.max_text_len) {
            continue;
        }
        if !seen_exact.insert(text.clone()) {
            continue;
        }
        if !seen_signature.insert(signature(&text)) {
            continue;
        }
        parts.push(text);
    }
    parts
}

/// Title priority: rich-text title, og:title, `<title>`, sentinel.
fn resolve_title(root: &Selection) -> String {
    if let Some(title) = dom::first_text(root, RICH_TITLE) {
        return title;
    }
    if let Some(title) = dom::first_attr(root, r#"meta[property="og:title"]"#, "content") {
        let title = normalize_whitespace(&title);
        if !title.is_empty() {
            return title;
        }
    }
    if let Some(title) = dom::first_text(root, "title") {
        return title;
    }
    NO_TITLE.to_string()
}

/// Author resolution: skin nickname candidates in order, then og:site_name
/// unless it is the generic platform label (that is not an author identity).
fn resolve_blog_name(root: &Selection) -> String {
    for candidate in BLOG_NAME_CANDIDATES {
        if let Some(name) = dom::first_text(root, candidate) {
            return name;
        }
    }
    if let Some(site) = dom::first_attr(root, r#"meta[property="og:site_name"]"#, "content") {
        let site = normalize_whitespace(&site);
        if !site.is_empty() && !PLATFORM_SITE_LABELS.contains(&site.as_str()) {
            return site;
        }
    }
    String::new()
}

/// Collect and normalize image URLs under a container, in document order,
/// deduplicated, decorative images dropped.
fn collect_images(container: &Selection, image_sel: &str, origin: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for node in dom::each(container, image_sel) {
        let src = dom::get_attribute(&node, "src")
            .or_else(|| dom::get_attribute(&node, "data-lazy-src"))
            .unwrap_or_default();
        let Some(normalized) = normalize_image_url(&src, origin) else {
            continue;
        };
        if seen.insert(normalized.clone()) {
            images.push(normalized);
        }
    }
    images
}

/// Normalize one image URL.
///
/// Protocol-relative srcs get `https:`, root-relative srcs get the blog
/// origin, and the pstatic CDN's thumbnail size parameter is rewritten to
/// `type=w2000` for the full-resolution rendition. Anything that does not end
/// up as http(s), or that is an icon/emoticon/profile asset, is dropped.
fn normalize_image_url(src: &str, origin: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    let mut url = if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{origin}{src}")
    } else {
        src.to_string()
    };

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return None;
    }
    if url.contains("pstatic.net") {
        url = CDN_SIZE_PARAM.replace(&url, "type=w2000").into_owned();
    }
    if DECORATIVE_IMAGE.is_match(&url) {
        return None;
    }
    Some(url)
}
