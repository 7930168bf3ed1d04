//! Pulling the JSON payload out of a model reply.
//!
//! Replies are not guaranteed to be bare JSON. The lookup order is fixed:
//! a fenced block that opens straight onto `{`, then everything from the first
//! `{` to the last `}`, otherwise failure. The brace fallback is greedy and can
//! span several objects or stray braces in surrounding prose; validation is
//! what rejects those.

use crate::error::{FetchError, Result};
use crate::models::RecommendationSet;

const FENCE_OPEN: &str = "```\n{";
const FENCE_CLOSE: &str = "\n```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    FencedBlock,
    OuterBraces,
}

/// A JSON candidate borrowed from the reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub json: &'a str,
    pub strategy: ExtractionStrategy,
}

pub fn extract_json(content: &str) -> Result<Extracted<'_>> {
    if let Some(json) = fenced_block(content) {
        return Ok(Extracted {
            json,
            strategy: ExtractionStrategy::FencedBlock,
        });
    }

    if let Some(json) = outer_braces(content) {
        return Ok(Extracted {
            json,
            strategy: ExtractionStrategy::OuterBraces,
        });
    }

    Err(FetchError::NoJsonFound)
}

fn fenced_block(content: &str) -> Option<&str> {
    let start = content.find(FENCE_OPEN)?;
    let len = content[start..].find(FENCE_CLOSE)?;
    // skip the backticks and the newline, keep the brace
    Some(&content[start + 4..start + len])
}

fn outer_braces(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Check that `candidate` is a `{"recommendations": [...]}` document with
/// correctly typed (or `null`) fields. Counts, ranges and formats are not checked.
pub fn validate(candidate: &str) -> Result<RecommendationSet> {
    serde_json::from_str(candidate).map_err(FetchError::InvalidStructure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block() {
        let reply = "Here is the result:\n```\n{\"recommendations\":[]}\n```\nThanks";
        let extracted = extract_json(reply).unwrap();
        assert_eq!(extracted.json, "{\"recommendations\":[]}");
        assert_eq!(extracted.strategy, ExtractionStrategy::FencedBlock);
    }

    #[test]
    fn test_outer_brace_fallback() {
        let reply = "blah {\"recommendations\":[{\"title\":\"X\"}]} blah";
        let extracted = extract_json(reply).unwrap();
        assert_eq!(extracted.json, "{\"recommendations\":[{\"title\":\"X\"}]}");
        assert_eq!(extracted.strategy, ExtractionStrategy::OuterBraces);
    }

    #[test]
    fn test_bare_json_is_returned_whole() {
        let reply = "{\"recommendations\":[]}";
        assert_eq!(extract_json(reply).unwrap().json, reply);
    }

    #[test]
    fn test_language_tagged_fence_uses_fallback() {
        let reply = "```json\n{\"recommendations\":[]}\n```";
        let extracted = extract_json(reply).unwrap();
        assert_eq!(extracted.json, "{\"recommendations\":[]}");
        assert_eq!(extracted.strategy, ExtractionStrategy::OuterBraces);
    }

    #[test]
    fn test_unterminated_fence_uses_fallback() {
        let reply = "```\n{\"recommendations\":[]} and no closing fence";
        let extracted = extract_json(reply).unwrap();
        assert_eq!(extracted.json, "{\"recommendations\":[]}");
        assert_eq!(extracted.strategy, ExtractionStrategy::OuterBraces);
    }

    #[test]
    fn test_fallback_is_greedy_across_objects() {
        let reply = "first {\"a\":1} then {\"b\":2} done";
        let extracted = extract_json(reply).unwrap();
        assert_eq!(extracted.json, "{\"a\":1} then {\"b\":2}");
        assert!(validate(extracted.json).is_err());
    }

    #[test]
    fn test_no_json_found() {
        assert!(matches!(
            extract_json("I cannot help with that."),
            Err(FetchError::NoJsonFound)
        ));
        // closing brace before the opening one
        assert!(matches!(
            extract_json("} nothing here {"),
            Err(FetchError::NoJsonFound)
        ));
        assert!(matches!(extract_json(""), Err(FetchError::NoJsonFound)));
    }

    #[test]
    fn test_non_ascii_surroundings() {
        let reply = "Voilà 🎬 {\"recommendations\":[{\"title\":\"Amélie\"}]} fin";
        let extracted = extract_json(reply).unwrap();
        let set = validate(extracted.json).unwrap();
        assert_eq!(set.recommendations[0].title, "Amélie");
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        assert!(matches!(
            validate("{\"movies\":[]}"),
            Err(FetchError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_validate_rejects_string_score() {
        let candidate = r#"{"recommendations":[{"title":"X","relevance_score":"0.9"}]}"#;
        assert!(matches!(
            validate(candidate),
            Err(FetchError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_validate_accepts_null_fields() {
        let candidate =
            r#"{"recommendations":[{"title":"X","poster_url":null,"release_date":null}]}"#;
        let set = validate(candidate).unwrap();
        assert_eq!(set.recommendations[0].title, "X");
        assert!(set.recommendations[0].poster_url.is_empty());
    }

    #[test]
    fn test_validate_rejects_malformed_json() {
        assert!(validate("{\"recommendations\": [").is_err());
    }

    #[test]
    fn test_validate_accepts_any_count() {
        let set = validate(r#"{"recommendations":[{"title":"A"},{"title":"B"}]}"#).unwrap();
        assert_eq!(set.len(), 2);
    }
}
