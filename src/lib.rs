//! # naver-extract
//!
//! Content extraction for Naver's web search and blog platforms.
//!
//! Naver renders its result widgets and blog posts with obfuscated, versioned
//! and frequently-rotating DOM structures. This library converts those pages
//! into a stable typed data model through a multi-strategy, fallback-chained
//! extraction pipeline, and reconciles extracted items against a blog-ID
//! allowlist.
//!
//! ## Quick Start
//!
//! ```rust
//! use naver_extract::{extract_popular_items, ExtractOptions, SelectorRegistry};
//!
//! let html = r#"<div class="fds-collection-root">
//!   <span class="fds-comps-header-headline">다이어트</span>
//!   <div class="fds-ugc-block-mod">
//!     <a class="fds-comps-right-image-text-title"
//!        href="https://blog.naver.com/abc/223000111">후기</a>
//!   </div>
//! </div>"#;
//!
//! let registry = SelectorRegistry::default();
//! let items = extract_popular_items(html, &registry, &ExtractOptions::default());
//! assert_eq!(items[0].group, "다이어트");
//! ```
//!
//! ## Pipeline
//!
//! - **Fetch**: [`fetch::FetchClient`] issues GETs with browser-identity
//!   headers and optional session cookies, transcoding legacy encodings.
//! - **Parse**: extractors query the DOM through the [`dom`] facade, driven
//!   by the dependency-injected [`SelectorRegistry`].
//! - **Normalize**: every link funnels through [`links::normalize_link`];
//!   output records are deduplicated and order-preserving.
//! - **Match**: [`match_blogs`] classifies which allowlisted blogs appear
//!   among the extracted items, and where.

mod error;
mod options;
mod patterns;
mod result;

/// DOM query facade over dom_query.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// HTML fetch adapter (browser header profiles, session cookies).
pub mod fetch;

/// Link normalization and blog-identity primitives.
pub mod links;

/// Versioned selector tables per page-layout variant.
pub mod selectors;

/// Shared text primitives (whitespace, meaningfulness rule).
pub mod text;

/// Popular-item extraction (collection / single-intention / legacy variants).
pub mod popular;

/// Blog-post content extraction (iframe resolution + strategy chain).
pub mod content;

/// Blog search-result crawling.
pub mod search;

/// Blog-identity matching against an allowlist.
pub mod matcher;

// Public API - re-exports
pub use content::{extract_content, extract_many, resolve_and_extract, resolve_frame_src};
pub use error::{Error, Result};
pub use fetch::{FetchClient, FetchConfig, HeaderProfile, SessionCookies};
pub use matcher::{match_blogs, BlogRef};
pub use options::ExtractOptions;
pub use popular::{extract_popular_items, extract_with_fallback};
pub use result::{
    BlogCrawlItem, BlogExposure, ContentOutcome, ExposureReport, ExposureType, ExtractedContent,
    PopularItem, SearchCrawl,
};
pub use search::{crawl_blog_search, parse_search_results, search_url};
pub use selectors::{SelectorRegistry, Variant, VariantSelectors};
