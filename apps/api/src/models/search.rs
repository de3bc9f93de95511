use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::course::{CourseCategory, CourseFormat};

const ANY_FORMAT: &str = "ANY";

/// A format preference: either a specific course format or `"ANY"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PreferredFormat {
    #[default]
    Any,
    Only(CourseFormat),
}

impl PreferredFormat {
    pub fn label(&self) -> &'static str {
        match self {
            PreferredFormat::Any => ANY_FORMAT,
            PreferredFormat::Only(format) => format.label(),
        }
    }
}

impl fmt::Display for PreferredFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for PreferredFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == ANY_FORMAT {
            return Ok(PreferredFormat::Any);
        }
        CourseFormat::from_label(&value)
            .map(PreferredFormat::Only)
            .ok_or_else(|| format!("unknown course format '{value}'"))
    }
}

impl From<PreferredFormat> for String {
    fn from(value: PreferredFormat) -> Self {
        value.label().to_string()
    }
}

/// User-chosen search constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub budget_max: u32,
    pub preferred_format: PreferredFormat,
    pub target_score_increase: u32,
    pub category: CourseCategory,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            budget_max: 1500,
            preferred_format: PreferredFormat::Any,
            target_score_increase: 150,
            category: CourseCategory::Overall,
        }
    }
}

/// A partial edit of the criteria, one field per filter-bar control.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaUpdate {
    pub budget_max: Option<u32>,
    pub preferred_format: Option<PreferredFormat>,
    pub target_score_increase: Option<u32>,
    pub category: Option<CourseCategory>,
}

impl SearchCriteria {
    /// Applies an update in place. Returns `true` when the category actually
    /// changed, which is the only edit that re-triggers a course search.
    pub fn apply(&mut self, update: &CriteriaUpdate) -> bool {
        if let Some(budget_max) = update.budget_max {
            self.budget_max = budget_max;
        }
        if let Some(preferred_format) = update.preferred_format {
            self.preferred_format = preferred_format;
        }
        if let Some(target) = update.target_score_increase {
            self.target_score_increase = target;
        }
        match update.category {
            Some(category) if category != self.category => {
                self.category = category;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria() {
        let criteria = SearchCriteria::default();
        assert_eq!(criteria.budget_max, 1500);
        assert_eq!(criteria.preferred_format, PreferredFormat::Any);
        assert_eq!(criteria.target_score_increase, 150);
        assert_eq!(criteria.category, CourseCategory::Overall);
    }

    #[test]
    fn test_preferred_format_any_serde() {
        let format: PreferredFormat = serde_json::from_str(r#""ANY""#).unwrap();
        assert_eq!(format, PreferredFormat::Any);
        assert_eq!(serde_json::to_string(&format).unwrap(), r#""ANY""#);
    }

    #[test]
    fn test_preferred_format_specific_serde() {
        let format: PreferredFormat = serde_json::from_str(r#""In-Person""#).unwrap();
        assert_eq!(format, PreferredFormat::Only(CourseFormat::InPerson));
    }

    #[test]
    fn test_preferred_format_rejects_unknown() {
        let result: Result<PreferredFormat, _> = serde_json::from_str(r#""Telepathy""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_criteria_deserializes_camel_case() {
        let json = r#"{
            "budgetMax": 1500,
            "preferredFormat": "ANY",
            "targetScoreIncrease": 150,
            "category": "Best for Math"
        }"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.category, CourseCategory::Math);
    }

    #[test]
    fn test_apply_category_change_reports_change() {
        let mut criteria = SearchCriteria::default();
        let changed = criteria.apply(&CriteriaUpdate {
            category: Some(CourseCategory::Verbal),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(criteria.category, CourseCategory::Verbal);
    }

    #[test]
    fn test_apply_same_category_is_not_a_change() {
        let mut criteria = SearchCriteria::default();
        let changed = criteria.apply(&CriteriaUpdate {
            category: Some(CourseCategory::Overall),
            ..Default::default()
        });
        assert!(!changed);
    }

    #[test]
    fn test_apply_other_fields_never_report_change() {
        let mut criteria = SearchCriteria::default();
        let changed = criteria.apply(&CriteriaUpdate {
            budget_max: Some(900),
            preferred_format: Some(PreferredFormat::Only(CourseFormat::Hybrid)),
            target_score_increase: Some(200),
            category: None,
        });
        assert!(!changed);
        assert_eq!(criteria.budget_max, 900);
        assert_eq!(
            criteria.preferred_format,
            PreferredFormat::Only(CourseFormat::Hybrid)
        );
        assert_eq!(criteria.target_score_increase, 200);
    }
}
