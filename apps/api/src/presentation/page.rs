//! The full page, composed from one session snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::search::SearchCriteria;
use crate::presentation::chart::{render_chart, ChartView};
use crate::presentation::filter_bar::{render_filter_bar, FilterBarView};
use crate::presentation::practice_hub::{render_practice_hub, PracticeHubView};
use crate::presentation::results::{render_results, ResultsView};
use crate::presentation::sponsored::{render_sponsored, SponsoredPlacement};
use crate::presentation::tutor_finder::{render_tutor_finder, TutorFinderView};
use crate::search::session::SearchSession;

const ADMISSION_TIP: &str = "Colleges look for \"score consistency\" across sections. If your \
Math is 750+ but Verbal is sub-600, focusing on Reading drills can exponentially increase your \
acceptance odds at liberal arts colleges.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub criteria: SearchCriteria,
    pub busy: bool,
    /// Hero insight; absent until the insight fetch completes.
    pub insight: Option<String>,
    pub admission_tip: &'static str,
    pub filter_bar: FilterBarView,
    pub error: Option<String>,
    pub chart: Option<ChartView>,
    pub results: ResultsView,
    pub practice_hub: PracticeHubView,
    pub tutor_finder: TutorFinderView,
    pub sponsored: Vec<SponsoredPlacement>,
    pub results_updated_at: Option<DateTime<Utc>>,
}

pub fn render_page(session: &SearchSession) -> PageView {
    PageView {
        session_id: session.id,
        started_at: session.created_at,
        criteria: session.criteria.clone(),
        busy: session.busy,
        insight: session.insight.clone().filter(|i| !i.is_empty()),
        admission_tip: ADMISSION_TIP,
        filter_bar: render_filter_bar(&session.criteria, session.busy),
        error: session.error.clone(),
        chart: if session.busy {
            None
        } else {
            render_chart(&session.courses)
        },
        results: render_results(
            session.criteria.category,
            &session.courses,
            session.busy,
            session.error.as_deref(),
        ),
        practice_hub: render_practice_hub(
            &session.location,
            &session.resources,
            session.resources_loading,
        ),
        tutor_finder: render_tutor_finder(
            &session.tutors,
            &session.location,
            &session.tutor_subject,
            &session.tutor_filters,
        ),
        sponsored: render_sponsored(),
        results_updated_at: session.courses_updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::courses::tests::course_json;
    use crate::models::tutor::TutorFilters;
    use crate::presentation::results::ResultsBody;

    fn session_with_courses(count: usize) -> SearchSession {
        let mut session = SearchSession::new(Uuid::new_v4(), "New Jersey");
        let ticket = session.begin_course_search();
        let courses = (0..count)
            .map(|i| serde_json::from_value(course_json(&i.to_string(), 400.0, 120.0)).unwrap())
            .collect();
        session.finish_course_search(ticket, courses);
        session
    }

    #[test]
    fn test_chart_hidden_while_busy() {
        let mut session = session_with_courses(3);
        assert!(render_page(&session).chart.is_some());

        session.begin_course_search();
        let page = render_page(&session);
        assert!(page.chart.is_none());
        assert!(page.busy);
        assert!(page.filter_bar.search_button.disabled);
        assert!(matches!(page.results.body, ResultsBody::Loading { .. }));
    }

    #[test]
    fn test_zero_results_render_no_matches_without_error() {
        let page = render_page(&session_with_courses(0));
        assert!(page.error.is_none());
        assert!(page.chart.is_none());
        assert!(matches!(page.results.body, ResultsBody::NoMatches { .. }));
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let json = serde_json::to_value(render_page(&session_with_courses(1))).unwrap();
        assert!(json.get("sessionId").is_some());
        assert!(json.get("filterBar").is_some());
        assert_eq!(json["practiceHub"]["title"], "Practice Hub: New Jersey");
        assert_eq!(json["tutorFinder"]["panel"]["state"], "prompt");
        assert_eq!(json["tutorFinder"]["form"]["location"]["value"], "New Jersey");
        assert_eq!(json["sponsored"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["sponsored"][0]["slot"], "top");
    }

    #[test]
    fn test_tutor_form_keeps_submitted_subject_and_filters() {
        let mut session = SearchSession::new(Uuid::new_v4(), "New Jersey");
        session.remember_tutor_form(
            "  Essay Writing ",
            TutorFilters {
                availability: "Weekends".to_string(),
                ..TutorFilters::default()
            },
        );
        session.begin_tutor_lookup();

        let form = render_page(&session).tutor_finder.form;
        assert_eq!(form.subject.value, "Essay Writing");
        assert!(form.filters_expanded);
        let availability = &form.filters[2];
        assert_eq!(availability.field, "availability");
        assert!(availability.options.iter().any(|o| o.selected && o.value == "Weekends"));
    }
}
