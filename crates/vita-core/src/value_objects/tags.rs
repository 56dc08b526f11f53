//! Hashtag extraction and normalization

use regex::Regex;
use std::sync::OnceLock;

fn hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Unicode letters, digits, and underscores after a '#'
        Regex::new(r"#([\p{L}\p{N}_]+)").unwrap_or_else(|e| panic!("invalid hashtag regex: {e}"))
    })
}

/// Normalize a hashtag name: strip a leading '#' and lowercase.
pub fn normalize_hashtag(raw: &str) -> String {
    raw.trim().trim_start_matches('#').to_lowercase()
}

/// Extract normalized, deduplicated hashtags from free-form text.
///
/// Tags are lowercased so `#Fitness` and `#fitness` count as one tag.
/// Order of first appearance is preserved.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for capture in hashtag_pattern().captures_iter(content) {
        if let Some(m) = capture.get(1) {
            let tag = m.as_str().to_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}
