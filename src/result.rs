//! Typed records produced by the extractors.
//!
//! These are the stable internal data model that the frequently-changing
//! Naver markup is normalized into. All types serialize with camelCase field
//! names, matching the JSON the route layer returns.

use serde::{Deserialize, Serialize};

/// One promoted/ranked post surfaced by a "popular post" widget.
///
/// Unique by `link` within a single extraction run; on duplicate links the
/// first occurrence in document order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularItem {
    /// Post title, HTML-tag-free, never empty.
    pub title: String,

    /// Canonical absolute URL (already passed through link normalization).
    pub link: String,

    /// Preview text, may be empty.
    #[serde(default)]
    pub snippet: String,

    /// Absolute image URL, or empty.
    #[serde(default)]
    pub image: String,

    /// Rank/label chip text, or empty.
    #[serde(default)]
    pub badge: String,

    /// Section/keyword heading this item was found under. A sentinel label is
    /// applied when the section carries no heading.
    pub group: String,

    /// Author blog name, or empty.
    #[serde(default)]
    pub blog_name: String,

    /// Author blog URL, or empty.
    #[serde(default)]
    pub blog_link: String,
}

/// One result from a live blog-search listing.
///
/// Distinct from [`PopularItem`]: different page type, different selector set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCrawlItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blog_name: String,
    /// Posting date as displayed on the page (display string, not parsed).
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// Resolved body of a single blog post.
///
/// Constructed per-request from fetched HTML; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub title: String,

    /// Whitespace-normalized prose, HTML-tag-free.
    pub content: String,

    /// Content image URLs, deduplicated in document order, with icons,
    /// emoticons and profile thumbnails filtered out.
    pub images: Vec<String>,

    #[serde(default)]
    pub blog_name: String,

    /// Final URL after following the content iframe, when one was present.
    pub actual_url: String,
}

impl ExtractedContent {
    /// Whether the extracted content is too short to be worth showing.
    ///
    /// Thin content is a soft state, not an error: the route layer swaps in
    /// its "content not extractable" message instead of failing the request.
    #[must_use]
    pub fn is_thin(&self, min_content_len: usize) -> bool {
        self.content.chars().count() < min_content_len
    }
}

/// Result of crawling the blog search listing for one keyword.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCrawl {
    pub keyword: String,
    pub items: Vec<BlogCrawlItem>,
    /// Item count after filtering and collapsing.
    pub total: usize,
    /// The listing URL that was fetched, for auditability.
    pub url: String,
}

/// Per-slot outcome of a batch content fetch.
///
/// One item's failure never aborts its siblings; it lands in that item's slot
/// as an error message placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOutcome {
    /// The URL this slot was asked to fetch.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ExtractedContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Positions at which one allowlisted blog was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogExposure {
    /// Lower-cased blog ID.
    pub blog_id: String,
    /// 1-based positions in extraction order.
    pub positions: Vec<usize>,
}

/// Which widget shape the matched item list most likely came from.
///
/// Best-effort classification inferred from data shape, not a declared field
/// from Naver: a group-homogeneous list reads as one popular-post widget, a
/// mixed list as snippet blocks. May misfire on mixed pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExposureType {
    PopularPost,
    SnippetBlock,
}

/// Outcome of matching extracted items against a blog-ID allowlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureReport {
    pub exposed: Vec<BlogExposure>,
    /// Allowlisted IDs never seen among the items, sorted for determinism.
    pub not_exposed: Vec<String>,
    pub exposure_type: ExposureType,
}
