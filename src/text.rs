//! Shared text primitives: whitespace normalization and the
//! text-meaningfulness rule used by every content scanner.

use crate::patterns::{
    HAS_WORD_CHAR, PAGINATION_ARTIFACT, SOCIAL_ACTION_LABEL, WHITESPACE_NORMALIZE,
};

/// Length of the prefix used as a dedup signature for near-identical
/// boilerplate lines (widget text repeated across blog skins).
pub const SIGNATURE_LEN: usize = 30;

/// Collapse all whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// Decide whether a candidate text node is post prose rather than page chrome.
///
/// A candidate is rejected when it is shorter than `min_len` or longer than
/// `max_len` characters (bounds inclusive, counted in chars so Hangul is not
/// penalized), when it is purely a social-action label, when it is a bare
/// pagination artifact ("3."), or when it contains no word characters at all.
#[must_use]
pub fn is_meaningful_text(text: &str, min_len: usize, max_len: usize) -> bool {
    let text = text.trim();
    let len = text.chars().count();

    if len < min_len || len > max_len {
        return false;
    }
    if SOCIAL_ACTION_LABEL.is_match(text) {
        return false;
    }
    if PAGINATION_ARTIFACT.is_match(text) {
        return false;
    }
    HAS_WORD_CHAR.is_match(text)
}

/// Prefix signature for boilerplate dedup: the first [`SIGNATURE_LEN`] chars.
///
/// Old blog skins repeat widget text with trailing variation (counters,
/// dates); comparing a fixed prefix catches those without full fuzzy matching.
#[must_use]
pub fn signature(text: &str) -> String {
    text.chars().take(SIGNATURE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("  다이어트   식단\n\t정리  "), "다이어트 식단 정리");
    }

    #[test]
    fn meaningfulness_boundaries_are_inclusive() {
        let nine = "a".repeat(9);
        let ten = "a".repeat(10);
        let five_hundred = "a".repeat(500);
        let five_oh_one = "a".repeat(501);

        assert!(!is_meaningful_text(&nine, 10, 500));
        assert!(is_meaningful_text(&ten, 10, 500));
        assert!(is_meaningful_text(&five_hundred, 10, 500));
        assert!(!is_meaningful_text(&five_oh_one, 10, 500));
    }

    #[test]
    fn boundaries_count_chars_not_bytes() {
        // 10 Hangul syllables are 30 bytes but must pass a min of 10.
        let hangul = "가".repeat(10);
        assert!(is_meaningful_text(&hangul, 10, 500));
    }

    #[test]
    fn social_labels_are_rejected() {
        assert!(!is_meaningful_text("댓글 12", 1, 500));
        assert!(!is_meaningful_text("공감", 1, 500));
    }

    #[test]
    fn pagination_artifacts_are_rejected() {
        assert!(!is_meaningful_text("7.", 1, 500));
    }

    #[test]
    fn glyph_runs_are_rejected() {
        assert!(!is_meaningful_text("★★★★★ ♥♥♥", 1, 500));
    }

    #[test]
    fn signature_is_char_prefix() {
        let long = "가".repeat(40);
        assert_eq!(signature(&long).chars().count(), 30);
        assert_eq!(signature("short"), "short");
    }
}
