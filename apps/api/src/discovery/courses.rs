//! Course search: criteria in, provider-ranked `Course` list out.
//!
//! The provider's order is kept as-is. Nothing here sorts or re-ranks.

use tracing::{info, warn};

use crate::discovery::prompts::{fill_template, COURSES_PROMPT_TEMPLATE, STRUCTURED_MODEL};
use crate::errors::AppError;
use crate::llm_client::{generate_json, GenerationRequest, GenerativeProvider, Schema};
use crate::models::course::{Course, CourseCategory, CourseFormat};
use crate::models::search::SearchCriteria;

/// Fields every course object must carry. `durationWeeks` is declared but optional.
const COURSE_REQUIRED: &[&str] = &[
    "id",
    "name",
    "provider",
    "price",
    "priceDisplay",
    "format",
    "scoreGuarantee",
    "acceptanceImpact",
    "pros",
    "cons",
    "averageScoreIncrease",
    "primaryCategory",
    "testimonials",
    "acceptanceStats",
    "link",
];

/// Response schema: an array of `Course` objects.
pub fn course_list_schema() -> Schema {
    let testimonial = Schema::object([
        ("studentName", Schema::string()),
        ("text", Schema::string()),
        ("scoreImprovement", Schema::number()),
        ("acceptedCollege", Schema::string()),
        ("rating", Schema::number()),
    ])
    .require(&[
        "studentName",
        "text",
        "scoreImprovement",
        "acceptedCollege",
        "rating",
    ]);

    let acceptance_stats = Schema::object([
        ("description", Schema::string()),
        ("topColleges", Schema::array(Schema::string())),
        ("averageAcceptanceRate", Schema::string()),
    ])
    .require(&["description", "topColleges", "averageAcceptanceRate"]);

    let course = Schema::object([
        ("id", Schema::string()),
        ("name", Schema::string()),
        ("provider", Schema::string()),
        ("price", Schema::number()),
        ("priceDisplay", Schema::string()),
        (
            "format",
            Schema::string_enum(CourseFormat::ALL.iter().map(|f| f.label())),
        ),
        ("durationWeeks", Schema::number()),
        ("scoreGuarantee", Schema::string()),
        ("acceptanceImpact", Schema::string()),
        ("pros", Schema::array(Schema::string())),
        ("cons", Schema::array(Schema::string())),
        ("averageScoreIncrease", Schema::number()),
        (
            "primaryCategory",
            Schema::string_enum(CourseCategory::ALL.iter().map(|c| c.label())),
        ),
        ("link", Schema::string()),
        ("testimonials", Schema::array(testimonial)),
        ("acceptanceStats", acceptance_stats),
    ])
    .require(COURSE_REQUIRED);

    Schema::array(course)
}

pub fn build_courses_prompt(criteria: &SearchCriteria) -> String {
    let budget = criteria.budget_max.to_string();
    let target = criteria.target_score_increase.to_string();
    fill_template(
        COURSES_PROMPT_TEMPLATE,
        &[
            ("category", criteria.category.label()),
            ("budget", budget.as_str()),
            ("format", criteria.preferred_format.label()),
            ("target", target.as_str()),
        ],
    )
}

/// Asks the provider for the top courses matching `criteria`.
/// An empty provider answer is an empty list, not an error.
pub async fn fetch_top_courses(
    provider: &dyn GenerativeProvider,
    criteria: &SearchCriteria,
) -> Result<Vec<Course>, AppError> {
    let request = GenerationRequest::new(STRUCTURED_MODEL, build_courses_prompt(criteria))
        .with_schema(course_list_schema());

    let courses: Vec<Course> = generate_json(provider, request, Some("[]"))
        .await
        .map_err(|e| AppError::Llm(format!("Course search failed: {e}")))?;

    info!(
        "Course search returned {} courses for '{}'",
        courses.len(),
        criteria.category
    );
    Ok(courses)
}

/// Best-effort course search: any failure degrades to an empty list.
pub async fn top_courses_or_empty(
    provider: &dyn GenerativeProvider,
    criteria: &SearchCriteria,
) -> Vec<Course> {
    fetch_top_courses(provider, criteria)
        .await
        .unwrap_or_else(|e| {
            warn!("Course search degraded to empty list: {e}");
            Vec::new()
        })
}
