//! Versioned selector tables for Naver's page-layout variants.
//!
//! Naver's generated class names are non-semantic hashes that rotate without
//! notice, and each widget variant rotates independently. This registry is the
//! single point of change when markup shifts: pure data, no behavior beyond
//! validation. It is dependency-injected into the extractors rather than held
//! as module state, so concurrent requests can run against different selector
//! versions during a rollout.
//!
//! Updates go through [`SelectorRegistry::replace`], which swaps a whole
//! variant entry atomically - there is no partial field mutation.

use crate::error::{Error, Result};

/// One named page-layout variant rendered by Naver's result widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Block-list "popular posts" widget.
    Collection,
    /// Card-list widget shown for single-intention queries.
    SingleIntention,
    /// Inline snippet paragraph blocks.
    SnippetParagraph,
    /// Inline snippet image blocks.
    SnippetImage,
    /// The pre-widget blog search listing markup.
    LegacyBlogSearch,
}

/// Named CSS selectors for one layout variant.
///
/// `container` and `item` are required; the remaining fields are left empty
/// when a variant has no use for them.
#[derive(Debug, Clone, Default)]
pub struct VariantSelectors {
    /// Root element of one widget/section instance.
    pub container: String,
    /// One result block inside a container.
    pub item: String,
    /// Section heading (group/keyword) text.
    pub headline: String,
    /// Bare title anchor inside an item.
    pub title_link: String,
    /// Wrapping title-container anchor; preferred over `title_link` when both
    /// exist (alternate markup pattern observed on some rollouts).
    pub title_wrap: String,
    /// Preview/snippet text.
    pub preview: String,
    /// Blog profile anchor (author name + link).
    pub blog_info: String,
    /// Representative item image.
    pub image: String,
    /// Rank/label chip.
    pub badge: String,
    /// Posting date text.
    pub date: String,
    /// Ancestor layout container used to resolve a section heading by walking
    /// up from an item (single-intention lists carry their headline outside
    /// the item subtree).
    pub layout: String,
}

impl VariantSelectors {
    fn validate(&self) -> Result<()> {
        if self.container.trim().is_empty() {
            return Err(Error::Selector("container selector is empty".to_string()));
        }
        if self.item.trim().is_empty() {
            return Err(Error::Selector("item selector is empty".to_string()));
        }
        Ok(())
    }
}

/// The active selector table, one entry per [`Variant`].
///
/// Read-only at request time; the offline selector-maintenance flow builds a
/// new table (or replaces single variants) and swaps it in between requests.
#[derive(Debug, Clone)]
pub struct SelectorRegistry {
    collection: VariantSelectors,
    single_intention: VariantSelectors,
    snippet_paragraph: VariantSelectors,
    snippet_image: VariantSelectors,
    legacy_blog_search: VariantSelectors,
}

impl Default for SelectorRegistry {
    fn default() -> Self {
        Self {
            collection: VariantSelectors {
                container: "div.fds-collection-root".to_string(),
                item: "div.fds-ugc-block-mod".to_string(),
                headline: "span.fds-comps-header-headline".to_string(),
                title_link: "a.fds-comps-right-image-text-title".to_string(),
                title_wrap: "a.fds-comps-right-image-text-title-wrap".to_string(),
                preview: "a.fds-comps-right-image-text-content".to_string(),
                blog_info: "a.fds-info-inner-text".to_string(),
                image: "img.fds-comps-right-image-content-image".to_string(),
                badge: "span.fds-comps-keyword-chip-text".to_string(),
                ..VariantSelectors::default()
            },
            single_intention: VariantSelectors {
                container: "div.fds-single-intention-collection".to_string(),
                item: "div.fds-single-intention-item".to_string(),
                headline: "span.sds-comps-text-type-headline1".to_string(),
                title_link: "a.fds-single-intention-title".to_string(),
                preview: "span.fds-single-intention-preview".to_string(),
                blog_info: "a.fds-single-intention-profile".to_string(),
                image: "img.fds-single-intention-thumbnail".to_string(),
                layout: "div.sds-comps-vertical-layout".to_string(),
                ..VariantSelectors::default()
            },
            snippet_paragraph: VariantSelectors {
                container: "div.sds-comps-base-layout".to_string(),
                item: "span.sds-comps-text-type-body1".to_string(),
                ..VariantSelectors::default()
            },
            snippet_image: VariantSelectors {
                container: "div.sds-comps-image".to_string(),
                item: "img.sds-comps-img".to_string(),
                image: "img.sds-comps-img".to_string(),
                ..VariantSelectors::default()
            },
            legacy_blog_search: VariantSelectors {
                container: "ul.lst_total".to_string(),
                item: "li.bx".to_string(),
                title_link: "a.api_txt_lines.total_tit".to_string(),
                preview: "a.api_txt_lines.dsc_txt".to_string(),
                blog_info: "a.sub_txt.sub_name".to_string(),
                image: "img.thumb".to_string(),
                date: "span.sub_time".to_string(),
                ..VariantSelectors::default()
            },
        }
    }
}

impl SelectorRegistry {
    /// Selector set for a variant.
    #[must_use]
    pub fn get(&self, variant: Variant) -> &VariantSelectors {
        match variant {
            Variant::Collection => &self.collection,
            Variant::SingleIntention => &self.single_intention,
            Variant::SnippetParagraph => &self.snippet_paragraph,
            Variant::SnippetImage => &self.snippet_image,
            Variant::LegacyBlogSearch => &self.legacy_blog_search,
        }
    }

    /// Replace a variant's entire selector set.
    ///
    /// Validates the required selectors and swaps the entry in one step; on
    /// error the active entry is left untouched.
    pub fn replace(&mut self, variant: Variant, selectors: VariantSelectors) -> Result<()> {
        selectors.validate()?;
        match variant {
            Variant::Collection => self.collection = selectors,
            Variant::SingleIntention => self.single_intention = selectors,
            Variant::SnippetParagraph => self.snippet_paragraph = selectors,
            Variant::SnippetImage => self.snippet_image = selectors,
            Variant::LegacyBlogSearch => self.legacy_blog_search = selectors,
        }
        Ok(())
    }
}
