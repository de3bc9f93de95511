use serde::{Deserialize, Serialize};

/// Subject used when the student leaves the subject field blank.
pub const DEFAULT_TUTOR_SUBJECT: &str = "Academic Tutoring (Grade 8-12)";

/// Optional free-text narrowing for a tutor lookup. Empty fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorFilters {
    /// Minimum star rating, e.g. "4.5".
    pub rating: String,
    /// "Budget" | "Moderate"
    pub price: String,
    /// "Weekends" | "Weekdays"
    pub availability: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TutorSearchRequest {
    pub location: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub filters: Option<TutorFilters>,
}

impl TutorSearchRequest {
    /// Subject to search for, falling back to general academic tutoring.
    pub fn effective_subject(&self) -> &str {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TUTOR_SUBJECT)
    }
}

/// A citation the provider attached to a location-grounded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GroundingSource {
    Web { uri: String, title: String },
    Maps { uri: String, title: String },
}

impl GroundingSource {
    pub fn uri(&self) -> &str {
        match self {
            GroundingSource::Web { uri, .. } | GroundingSource::Maps { uri, .. } => uri,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            GroundingSource::Web { title, .. } | GroundingSource::Maps { title, .. } => title,
        }
    }
}

/// Narrative tutor summary plus the sources backing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTutorResponse {
    pub text: String,
    pub grounding_chunks: Vec<GroundingSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_subject_defaults_when_blank() {
        let request = TutorSearchRequest {
            location: "Princeton, NJ".to_string(),
            subject: Some("   ".to_string()),
            filters: None,
        };
        assert_eq!(request.effective_subject(), DEFAULT_TUTOR_SUBJECT);

        let request = TutorSearchRequest {
            subject: None,
            ..request
        };
        assert_eq!(request.effective_subject(), DEFAULT_TUTOR_SUBJECT);
    }

    #[test]
    fn test_effective_subject_trims_input() {
        let request = TutorSearchRequest {
            location: "Austin".to_string(),
            subject: Some("  Essay Writing ".to_string()),
            filters: None,
        };
        assert_eq!(request.effective_subject(), "Essay Writing");
    }

    #[test]
    fn test_grounding_source_serializes_with_kind_tag() {
        let source = GroundingSource::Maps {
            uri: "https://maps.google.com/?cid=1".to_string(),
            title: "Edison Learning Center".to_string(),
        };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["kind"], "Maps");
        assert_eq!(json["title"], "Edison Learning Center");
        assert_eq!(source.uri(), "https://maps.google.com/?cid=1");
    }

    #[test]
    fn test_tutor_filters_partial_json() {
        let filters: TutorFilters = serde_json::from_str(r#"{"rating": "4.5"}"#).unwrap();
        assert_eq!(filters.rating, "4.5");
        assert!(filters.price.is_empty());
        assert!(filters.availability.is_empty());
    }
}
