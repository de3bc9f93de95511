use serde::Serialize;

use crate::models::course::{Course, CourseCategory};
use crate::presentation::course_card::{render_course_cards, CourseCardView};

/// Placeholder cards shown while searching, whatever the expected count.
pub const LOADING_SKELETONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsBody {
    Loading { skeletons: usize },
    NoMatches { message: &'static str },
    Cards { cards: Vec<CourseCardView> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub heading: String,
    pub badge: &'static str,
    pub body: ResultsBody,
}

pub fn render_results(
    category: CourseCategory,
    courses: &[Course],
    busy: bool,
    error: Option<&str>,
) -> ResultsView {
    let body = if busy {
        ResultsBody::Loading {
            skeletons: LOADING_SKELETONS,
        }
    } else if courses.is_empty() && error.is_none() {
        ResultsBody::NoMatches {
            message: "No courses match these filters yet. Try widening your budget or format.",
        }
    } else {
        ResultsBody::Cards {
            cards: render_course_cards(courses),
        }
    };

    ResultsView {
        heading: format!("Top Recommendations: {category}"),
        badge: "Best Value Matches",
        body,
    }
}
