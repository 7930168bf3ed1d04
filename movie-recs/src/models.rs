use serde::{Deserialize, Deserializer, Serialize};

/// Number of recommendations the model is asked for. Not enforced.
pub const EXPECTED_RECOMMENDATIONS: usize = 9;

/// One suggested movie with its relevance metadata.
///
/// Every field may be absent or `null` in the model's reply, but any other
/// value must have the right JSON type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cast: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub directors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub producers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    /// Kept as text, never parsed as a date.
    #[serde(deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub poster_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub relevance_explanation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub relevance_score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_relevant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_suggestions: Option<Vec<String>>,
}

/// Models write `null` for values they don't know; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The shape the extracted JSON must have: `{"recommendations": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_optional_fields_default() {
        let set: RecommendationSet =
            serde_json::from_value(json!({ "recommendations": [{ "title": "X" }] })).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.recommendations[0].title, "X");
        assert!(set.recommendations[0].cast.is_empty());
        assert_eq!(set.recommendations[0].alternative_suggestions, None);
    }

    #[test]
    fn test_missing_recommendations_key_is_rejected() {
        let result = serde_json::from_value::<RecommendationSet>(json!({ "movies": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let result = serde_json::from_value::<RecommendationSet>(json!({
            "recommendations": [{ "title": "X", "relevance_score": "high" }]
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<RecommendationSet>(json!({
            "recommendations": [{ "cast": "Just One Actor" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let set: RecommendationSet = serde_json::from_value(json!({
            "recommendations": [{
                "title": "X",
                "poster_url": null,
                "release_date": null,
                "cast": null,
                "relevance_score": null,
                "is_relevant": null,
                "alternative_suggestions": null
            }]
        }))
        .unwrap();
        let rec = &set.recommendations[0];
        assert_eq!(rec.title, "X");
        assert_eq!(rec.poster_url, "");
        assert_eq!(rec.release_date, "");
        assert!(rec.cast.is_empty());
        assert_eq!(rec.relevance_score, 0.0);
        assert!(!rec.is_relevant);
        assert_eq!(rec.alternative_suggestions, None);
    }

    #[test]
    fn test_null_recommendations_list_is_rejected() {
        let result = serde_json::from_value::<RecommendationSet>(json!({ "recommendations": null }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let set: RecommendationSet = serde_json::from_value(json!({
            "recommendations": [{ "title": "X", "rating": "PG" }],
            "note": "extra"
        }))
        .unwrap();
        assert_eq!(set.recommendations[0].title, "X");
    }

    #[test]
    fn test_alternative_suggestions_omitted_when_absent() {
        let rec = Recommendation {
            title: "X".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert!(value.get("alternative_suggestions").is_none());
    }
}
