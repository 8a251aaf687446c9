//! Blog-identity matching.
//!
//! Reconciles extracted items against an allowlist of blog IDs. The matcher
//! is selector- and format-agnostic: it only sees each item's links and group
//! through the [`BlogRef`] trait, so popular items and crawl items (and any
//! future record type) go through the same logic. The allowlist is an
//! explicit parameter, sourced from configuration at the boundary.

use std::collections::HashSet;

use crate::links;
use crate::result::{BlogCrawlItem, BlogExposure, ExposureReport, ExposureType, PopularItem};

/// The two fields the matcher needs from any extracted item.
pub trait BlogRef {
    /// Canonical post link.
    fn link(&self) -> &str;
    /// Author blog link, when the source markup carried one.
    fn blog_link(&self) -> Option<&str>;
    /// Section/keyword grouping, when the source page had one.
    fn group(&self) -> Option<&str>;
}

impl BlogRef for PopularItem {
    fn link(&self) -> &str {
        &self.link
    }

    fn blog_link(&self) -> Option<&str> {
        if self.blog_link.is_empty() {
            None
        } else {
            Some(&self.blog_link)
        }
    }

    fn group(&self) -> Option<&str> {
        Some(&self.group)
    }
}

impl BlogRef for BlogCrawlItem {
    fn link(&self) -> &str {
        &self.link
    }

    fn blog_link(&self) -> Option<&str> {
        None
    }

    fn group(&self) -> Option<&str> {
        None
    }
}

/// Match extracted items against an allowlist of blog IDs (case-insensitive).
///
/// Each item's blog ID is derived from its blog link when present, falling
/// back to the post link. Allowlisted IDs found among the items are reported
/// with their 1-based positions in extraction order; allowlisted IDs never
/// seen land in `not_exposed` (sorted, for deterministic output).
#[must_use]
pub fn match_blogs<T: BlogRef>(items: &[T], allowlist: &HashSet<String>) -> ExposureReport {
    let allow: HashSet<String> = allowlist.iter().map(|id| id.to_lowercase()).collect();

    let mut exposed: Vec<BlogExposure> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let id = item
            .blog_link()
            .and_then(links::blog_id_from_link)
            .or_else(|| links::blog_id_from_link(item.link()));
        let Some(id) = id else { continue };
        if !allow.contains(&id) {
            continue;
        }

        let position = index + 1;
        if let Some(entry) = exposed.iter_mut().find(|entry| entry.blog_id == id) {
            entry.positions.push(position);
        } else {
            exposed.push(BlogExposure {
                blog_id: id,
                positions: vec![position],
            });
        }
    }

    let mut not_exposed: Vec<String> = allow
        .iter()
        .filter(|id| !exposed.iter().any(|entry| &entry.blog_id == *id))
        .cloned()
        .collect();
    not_exposed.sort();

    ExposureReport {
        exposed,
        not_exposed,
        exposure_type: infer_exposure_type(items),
    }
}

/// Best-effort widget classification from data shape: a non-empty list where
/// every item shares one group reads as a single popular-post widget;
/// anything else as snippet blocks. Naver declares no such field, so mixed
/// pages can misclassify.
fn infer_exposure_type<T: BlogRef>(items: &[T]) -> ExposureType {
    let mut groups = items.iter().map(BlogRef::group);
    let Some(first) = groups.next() else {
        return ExposureType::SnippetBlock;
    };
    if first.is_some() && groups.all(|group| group == first) {
        ExposureType::PopularPost
    } else {
        ExposureType::SnippetBlock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popular(link: &str, group: &str) -> PopularItem {
        PopularItem {
            title: "t".to_string(),
            link: link.to_string(),
            group: group.to_string(),
            ..PopularItem::default()
        }
    }

    fn crawl(link: &str) -> BlogCrawlItem {
        BlogCrawlItem {
            title: "t".to_string(),
            link: link.to_string(),
            ..BlogCrawlItem::default()
        }
    }

    fn allow(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn reports_positions_and_missing_ids() {
        let items = vec![
            crawl("https://blog.naver.com/abc/1"),
            crawl("https://blog.naver.com/def/2"),
        ];
        let report = match_blogs(&items, &allow(&["abc", "xyz"]));

        assert_eq!(report.exposed.len(), 1);
        assert_eq!(report.exposed[0].blog_id, "abc");
        assert_eq!(report.exposed[0].positions, [1]);
        assert_eq!(report.not_exposed, ["xyz"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let items = vec![crawl("https://blog.naver.com/FoodLover/1")];
        let report = match_blogs(&items, &allow(&["FOODLOVER"]));
        assert_eq!(report.exposed[0].blog_id, "foodlover");
    }

    #[test]
    fn repeated_exposure_accumulates_positions() {
        let items = vec![
            crawl("https://blog.naver.com/abc/1"),
            crawl("https://blog.naver.com/other/2"),
            crawl("https://blog.naver.com/abc/3"),
        ];
        let report = match_blogs(&items, &allow(&["abc"]));
        assert_eq!(report.exposed[0].positions, [1, 3]);
    }

    #[test]
    fn blog_link_is_preferred_over_post_link() {
        let mut item = popular("https://blog.naver.com/wrong/1", "g");
        item.blog_link = "https://blog.naver.com/right".to_string();
        let report = match_blogs(&[item], &allow(&["right"]));
        assert_eq!(report.exposed[0].blog_id, "right");
    }

    #[test]
    fn homogeneous_groups_classify_as_popular_post() {
        let items = vec![
            popular("https://blog.naver.com/a/1", "다이어트"),
            popular("https://blog.naver.com/b/2", "다이어트"),
        ];
        let report = match_blogs(&items, &allow(&[]));
        assert_eq!(report.exposure_type, ExposureType::PopularPost);
    }

    #[test]
    fn mixed_groups_classify_as_snippet_block() {
        let items = vec![
            popular("https://blog.naver.com/a/1", "다이어트"),
            popular("https://blog.naver.com/b/2", "운동"),
        ];
        let report = match_blogs(&items, &allow(&[]));
        assert_eq!(report.exposure_type, ExposureType::SnippetBlock);
    }

    #[test]
    fn crawl_items_have_no_groups_and_classify_as_snippet_block() {
        let items = vec![crawl("https://blog.naver.com/a/1")];
        let report = match_blogs(&items, &allow(&[]));
        assert_eq!(report.exposure_type, ExposureType::SnippetBlock);
    }
}
