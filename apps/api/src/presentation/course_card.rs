use serde::Serialize;

use crate::models::course::Course;

/// Stars shown on every card. The provider supplies no course-level rating.
const CARD_STARS: u8 = 4;
const CARD_MAX_STARS: u8 = 5;
const TOP_COLLEGES_SHOWN: usize = 3;
const PROS_SHOWN: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialExcerpt {
    pub text: String,
    pub student_name: String,
    /// "Accepted to <college>"
    pub accepted_line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCardView {
    /// 1-based list position. Not a computed score.
    pub rank: usize,
    pub id: String,
    pub provider: String,
    pub name: String,
    pub stars_filled: u8,
    pub stars_total: u8,
    pub price_display: String,
    pub score_badge: String,
    pub acceptance_description: String,
    pub top_colleges: Vec<String>,
    pub testimonial: Option<TestimonialExcerpt>,
    pub pros: Vec<String>,
    pub score_guarantee: String,
    pub link: String,
}

pub fn render_course_card(position: usize, course: &Course) -> CourseCardView {
    CourseCardView {
        rank: position + 1,
        id: course.id.clone(),
        provider: course.provider.clone(),
        name: course.name.clone(),
        stars_filled: CARD_STARS,
        stars_total: CARD_MAX_STARS,
        price_display: course.price_display.clone(),
        score_badge: format!("Avg +{} pts", format_points(course.average_score_increase)),
        acceptance_description: course.acceptance_stats.description.clone(),
        top_colleges: course
            .acceptance_stats
            .top_colleges
            .iter()
            .take(TOP_COLLEGES_SHOWN)
            .cloned()
            .collect(),
        testimonial: course.testimonials.first().map(|t| TestimonialExcerpt {
            text: t.text.clone(),
            student_name: t.student_name.clone(),
            accepted_line: format!("Accepted to {}", t.accepted_college),
        }),
        pros: course.pros.iter().take(PROS_SHOWN).cloned().collect(),
        score_guarantee: course.score_guarantee.clone(),
        link: course.link.clone(),
    }
}

pub fn render_course_cards(courses: &[Course]) -> Vec<CourseCardView> {
    courses
        .iter()
        .enumerate()
        .map(|(position, course)| render_course_card(position, course))
        .collect()
}

/// Whole numbers print without a fractional part ("150", not "150.0").
pub(crate) fn format_points(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::courses::tests::course_json;

    fn course(id: &str) -> Course {
        serde_json::from_value(course_json(id, 650.0, 150.0)).unwrap()
    }

    #[test]
    fn test_card_truncates_list_fields() {
        let card = render_course_card(0, &course("c1"));

        assert_eq!(card.rank, 1);
        assert_eq!(card.top_colleges, vec!["Cornell", "Columbia", "Penn"]);
        assert_eq!(card.pros, vec!["Live instructors", "Adaptive drills"]);
        assert_eq!(card.score_badge, "Avg +150 pts");
        assert_eq!((card.stars_filled, card.stars_total), (4, 5));
    }

    #[test]
    fn test_card_uses_first_testimonial() {
        let card = render_course_card(2, &course("c3"));
        let testimonial = card.testimonial.unwrap();
        assert_eq!(testimonial.student_name, "Priya S.");
        assert_eq!(testimonial.accepted_line, "Accepted to Cornell");
        assert_eq!(card.rank, 3);
    }

    #[test]
    fn test_card_without_testimonials() {
        let mut c = course("c1");
        c.testimonials.clear();
        assert!(render_course_card(0, &c).testimonial.is_none());
    }

    #[test]
    fn test_cards_keep_list_order() {
        let cards = render_course_cards(&[course("b"), course("a")]);
        assert_eq!(cards[0].id, "b");
        assert_eq!(cards[1].rank, 2);
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(150.0), "150");
        assert_eq!(format_points(87.5), "87.5");
    }
}
