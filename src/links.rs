//! Link normalization and blog-identity primitives.
//!
//! The same logical link appears in at least three encodings across Naver's
//! markup variants: wrapped in a tracking redirect that embeds the true
//! destination, root-relative against the search host, or already absolute.
//! Callers must never assume one encoding; everything funnels through
//! [`normalize_link`].

use url::Url;

/// Origin prepended to root-relative hrefs found on search result pages.
pub const SEARCH_ORIGIN: &str = "https://search.naver.com";

/// Host marker of Naver's ad-redirect service. Links through it are ads.
pub const AD_HOST_MARKER: &str = "ader.naver";

/// Host marker for blog-hosted content.
pub const BLOG_HOST_MARKER: &str = "blog.naver";

/// Host marker for cafe-hosted content (excluded from blog extraction).
pub const CAFE_HOST_MARKER: &str = "cafe.naver";

/// Resolve an href into a canonical absolute URL, or `''` when it cannot be.
///
/// Resolution order:
/// 1. A redirect/canonical attribute value (`cru`) that is itself absolute.
/// 2. An absolute `u=` query parameter embedded in the href (tracking
///    redirect wrapper).
/// 3. Root-relative paths resolved against [`SEARCH_ORIGIN`].
/// 4. The href as-is when already absolute.
///
/// The output is always empty or starts with `http`.
#[must_use]
pub fn normalize_link(href: &str, redirect: Option<&str>) -> String {
    if let Some(target) = redirect {
        let target = target.trim();
        if target.starts_with("http") {
            return target.to_string();
        }
    }

    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    let candidate = if href.starts_with('/') {
        format!("{SEARCH_ORIGIN}{href}")
    } else {
        href.to_string()
    };

    if let Some(wrapped) = unwrap_redirect_param(&candidate) {
        return wrapped;
    }

    if candidate.starts_with("http") {
        candidate
    } else {
        String::new()
    }
}

/// Extract an absolute destination from a `u=` tracking-redirect parameter.
fn unwrap_redirect_param(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, value)| key == "u" && value.starts_with("http"))
        .map(|(_, value)| value.into_owned())
}

/// Derive the blog ID from a blog-hosted link.
///
/// Handles both the path form (`blog.naver.com/{blogId}/{postId}`) and the
/// query form (`blog.naver.com/PostView.naver?blogId=...&logNo=...`).
/// Returns the ID lowercased; `None` for non-blog hosts or unparseable links.
#[must_use]
pub fn blog_id_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    let host = url.host_str()?;
    if !host.contains(BLOG_HOST_MARKER) {
        return None;
    }

    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "blogId") {
        if !id.is_empty() {
            return Some(id.to_lowercase());
        }
    }

    let first = url.path_segments()?.find(|segment| !segment.is_empty())?;
    // Script endpoints like PostView.naver are not blog IDs.
    if first.contains('.') {
        return None;
    }
    Some(first.to_lowercase())
}

/// Whether a link routes through the ad-redirect host.
#[must_use]
pub fn is_ad_link(link: &str) -> bool {
    match Url::parse(link) {
        Ok(url) => url.host_str().is_some_and(|host| host.contains(AD_HOST_MARKER)),
        Err(_) => link.contains(AD_HOST_MARKER),
    }
}

/// Whether a link is hosted on the blog platform.
#[must_use]
pub fn is_blog_link(link: &str) -> bool {
    link.contains(BLOG_HOST_MARKER)
}

/// Whether a link is hosted on the cafe platform.
#[must_use]
pub fn is_cafe_link(link: &str) -> bool {
    link.contains(CAFE_HOST_MARKER)
}

/// Whether a blog-hosted link points at an actual post.
///
/// A real post link carries a blog-ID segment and a post-ID segment (two
/// non-empty path components), or the equivalent `blogId`/`logNo` query
/// parameters. Everything else (blog home, widget endpoints) is rejected.
#[must_use]
pub fn has_blog_post_path(link: &str) -> bool {
    let Ok(url) = Url::parse(link.trim()) else {
        return false;
    };

    let has_query_form = {
        let mut blog_id = false;
        let mut log_no = false;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "blogId" if !value.is_empty() => blog_id = true,
                "logNo" if !value.is_empty() => log_no = true,
                _ => {}
            }
        }
        blog_id && log_no
    };
    if has_query_form {
        return true;
    }

    url.path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).count())
        .is_some_and(|count| count >= 2)
}

/// Scheme + host origin of a URL, used to absolutize root-relative image srcs.
#[must_use]
pub fn origin_of(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    let host = url.host_str()?;
    Some(format!("{}://{}", url.scheme(), host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_attribute_wins_when_absolute() {
        let out = normalize_link("/link?foo=1", Some("https://blog.naver.com/abc/123"));
        assert_eq!(out, "https://blog.naver.com/abc/123");
    }

    #[test]
    fn relative_redirect_attribute_is_ignored() {
        let out = normalize_link("https://blog.naver.com/abc/123", Some("/relative"));
        assert_eq!(out, "https://blog.naver.com/abc/123");
    }

    #[test]
    fn tracking_wrapper_is_unwrapped() {
        let out = normalize_link(
            "https://search.naver.com/p/crd?u=https%3A%2F%2Fblog.naver.com%2Fabc%2F99",
            None,
        );
        assert_eq!(out, "https://blog.naver.com/abc/99");
    }

    #[test]
    fn root_relative_gets_search_origin() {
        let out = normalize_link("/search.naver?query=a", None);
        assert_eq!(out, "https://search.naver.com/search.naver?query=a");
    }

    #[test]
    fn output_is_empty_or_http() {
        for href in ["", "javascript:void(0)", "abc/def", "#anchor"] {
            let out = normalize_link(href, None);
            assert!(out.is_empty() || out.starts_with("http"), "href {href:?} -> {out:?}");
        }
    }

    #[test]
    fn blog_id_from_path_form() {
        assert_eq!(
            blog_id_from_link("https://blog.naver.com/FoodLover/223456789"),
            Some("foodlover".to_string())
        );
        assert_eq!(
            blog_id_from_link("https://m.blog.naver.com/abc/1"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn blog_id_from_query_form() {
        assert_eq!(
            blog_id_from_link("https://blog.naver.com/PostView.naver?blogId=Xyz&logNo=1"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn blog_id_rejects_foreign_hosts_and_endpoints() {
        assert_eq!(blog_id_from_link("https://cafe.naver.com/abc/1"), None);
        assert_eq!(blog_id_from_link("https://blog.naver.com/PostView.naver"), None);
        assert_eq!(blog_id_from_link("not a url"), None);
    }

    #[test]
    fn ad_host_is_detected() {
        assert!(is_ad_link("https://ader.naver.com/v1/click?x=1"));
        assert!(!is_ad_link("https://blog.naver.com/abc/1"));
    }

    #[test]
    fn post_path_needs_two_segments() {
        assert!(has_blog_post_path("https://blog.naver.com/abc/223000111"));
        assert!(!has_blog_post_path("https://blog.naver.com/abc"));
        assert!(!has_blog_post_path("https://blog.naver.com/"));
        assert!(has_blog_post_path(
            "https://blog.naver.com/PostView.naver?blogId=abc&logNo=1"
        ));
    }

    #[test]
    fn origin_strips_path_and_query() {
        assert_eq!(
            origin_of("https://blog.naver.com/abc/1?x=2").as_deref(),
            Some("https://blog.naver.com")
        );
    }
}
