//! Compiled regex patterns for text filtering and URL rewriting.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Patterns are organized by their purpose in the extraction pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

// =============================================================================
// Text Meaningfulness Patterns
// =============================================================================

/// Matches social-action widget labels (comment/like/share/subscribe chrome),
/// optionally followed by a counter. These are button captions, not prose.
pub static SOCIAL_ACTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(댓글|공감|공유|구독|좋아요|이웃추가|서로이웃|스크랩|신고|인쇄|comment|like|share|subscribe|reply)\s*\d*$",
    )
    .expect("SOCIAL_ACTION_LABEL regex")
});

/// Matches pagination artifacts: a bare number followed by a period ("3.").
pub static PAGINATION_ARTIFACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.$").expect("PAGINATION_ARTIFACT regex"));

/// Matches at least one word character (Unicode-aware, so Hangul counts).
/// Text without any is a decorative glyph run.
pub static HAS_WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w").expect("HAS_WORD_CHAR regex"));

// =============================================================================
// Image URL Patterns
// =============================================================================

/// Matches the pstatic CDN thumbnail size parameter (`type=w80`, `type=w966`).
/// Rewritten to `type=w2000` to request the full-resolution rendition.
pub static CDN_SIZE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"type=w\d+").expect("CDN_SIZE_PARAM regex"));

/// Matches image URLs that are decoration rather than post content
/// (emoticons, service icons, profile thumbnails).
pub static DECORATIVE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(icon|emoticon|profile)").expect("DECORATIVE_IMAGE regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_action_label_matches_widget_chrome() {
        assert!(SOCIAL_ACTION_LABEL.is_match("댓글"));
        assert!(SOCIAL_ACTION_LABEL.is_match("공감 12"));
        assert!(SOCIAL_ACTION_LABEL.is_match("Share"));
        assert!(!SOCIAL_ACTION_LABEL.is_match("댓글로 남겨주신 질문에 답합니다"));
    }

    #[test]
    fn pagination_artifact_matches_bare_numbered_period() {
        assert!(PAGINATION_ARTIFACT.is_match("3."));
        assert!(PAGINATION_ARTIFACT.is_match("12."));
        assert!(!PAGINATION_ARTIFACT.is_match("3. 준비물"));
    }

    #[test]
    fn has_word_char_accepts_hangul() {
        assert!(HAS_WORD_CHAR.is_match("후기"));
        assert!(!HAS_WORD_CHAR.is_match("★☆♥ —"));
    }

    #[test]
    fn cdn_size_param_matches_thumbnail_sizes() {
        assert!(CDN_SIZE_PARAM.is_match("https://postfiles.pstatic.net/a.jpg?type=w80"));
        let rewritten = CDN_SIZE_PARAM
            .replace("https://postfiles.pstatic.net/a.jpg?type=w966", "type=w2000");
        assert!(rewritten.ends_with("type=w2000"));
    }
}
