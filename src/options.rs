//! Configuration options for extraction behavior.
//!
//! Thresholds and toggles shared by the extractors. All fields are public for
//! easy configuration; use `Default::default()` for standard settings.

use std::time::Duration;

/// Configuration options for extraction behavior.
///
/// # Example
///
/// ```rust
/// use naver_extract::ExtractOptions;
///
/// // Keep consecutive posts from the same blog (e.g. when searching
/// // within one blog on purpose).
/// let options = ExtractOptions {
///     collapse_consecutive: false,
///     ..ExtractOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Cap on popular items returned per page, to bound downstream work.
    ///
    /// Default: `30`
    pub max_items: usize,

    /// Group label applied when a widget section has no resolvable heading.
    ///
    /// Default: `"인기글"`
    pub default_group: String,

    /// Minimum character count for extracted post content. Shorter results
    /// are still returned, but flagged as thin so the caller can substitute
    /// its "content not extractable" message.
    ///
    /// Default: `50`
    pub min_content_len: usize,

    /// Minimum character count for a text node to count as prose.
    ///
    /// Default: `10`
    pub min_text_len: usize,

    /// Maximum character count for a text node to count as prose.
    ///
    /// Default: `500`
    pub max_text_len: usize,

    /// Collapse consecutive search results from the same blog.
    ///
    /// Naver tends to show several posts from one blog back-to-back; for
    /// diversity purposes that is noise, but a search deliberately scoped to
    /// one blog wants it off.
    ///
    /// Default: `true`
    pub collapse_consecutive: bool,

    /// Wall-clock limit for fetching a post's content iframe before falling
    /// back to the outer page HTML.
    ///
    /// Default: `5s`
    pub frame_timeout: Duration,

    /// Result page size requested from the blog search listing.
    ///
    /// Default: `50`
    pub display: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_items: 30,
            default_group: "인기글".to_string(),
            min_content_len: 50,
            min_text_len: 10,
            max_text_len: 500,
            collapse_consecutive: true,
            frame_timeout: Duration::from_secs(5),
            display: 50,
        }
    }
}
