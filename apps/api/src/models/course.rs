use std::fmt;

use serde::{Deserialize, Serialize};

/// Delivery format of a prep course. Serialized as the label shown to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseFormat {
    #[serde(rename = "Online (Self-Paced)")]
    OnlineSelfPaced,
    #[serde(rename = "Online (Live Class)")]
    OnlineLive,
    #[serde(rename = "In-Person")]
    InPerson,
    #[serde(rename = "Hybrid")]
    Hybrid,
    #[serde(rename = "Private Tutoring")]
    Tutoring,
}

impl CourseFormat {
    pub const ALL: [CourseFormat; 5] = [
        CourseFormat::OnlineSelfPaced,
        CourseFormat::OnlineLive,
        CourseFormat::InPerson,
        CourseFormat::Hybrid,
        CourseFormat::Tutoring,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CourseFormat::OnlineSelfPaced => "Online (Self-Paced)",
            CourseFormat::OnlineLive => "Online (Live Class)",
            CourseFormat::InPerson => "In-Person",
            CourseFormat::Hybrid => "Hybrid",
            CourseFormat::Tutoring => "Private Tutoring",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for CourseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ranking category a course list is requested for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseCategory {
    #[default]
    #[serde(rename = "Best Overall")]
    Overall,
    #[serde(rename = "Best for Math")]
    Math,
    #[serde(rename = "Best for Verbal")]
    Verbal,
}

impl CourseCategory {
    pub const ALL: [CourseCategory; 3] = [
        CourseCategory::Overall,
        CourseCategory::Math,
        CourseCategory::Verbal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CourseCategory::Overall => "Best Overall",
            CourseCategory::Math => "Best for Math",
            CourseCategory::Verbal => "Best for Verbal",
        }
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub student_name: String,
    pub text: String,
    pub score_improvement: f64,
    pub accepted_college: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceStats {
    pub description: String,
    pub top_colleges: Vec<String>,
    pub average_acceptance_rate: String,
}

/// A prep course as returned by the provider. Constructed wholesale from
/// provider output and replaced on every search; `id` is not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub price: f64,
    /// e.g. "$200" or "$100/hr"
    pub price_display: String,
    pub format: CourseFormat,
    /// Declared in the response schema but not required, so providers may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<f64>,
    pub score_guarantee: String,
    /// Why this course helps admission.
    pub acceptance_impact: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Estimated points gained.
    pub average_score_increase: f64,
    pub primary_category: CourseCategory,
    pub testimonials: Vec<Testimonial>,
    pub acceptance_stats: AcceptanceStats,
    pub link: String,
}
