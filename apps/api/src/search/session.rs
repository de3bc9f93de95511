//! Per-session UI state: one slot per panel, each replaced wholesale.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::models::course::Course;
use crate::models::resource::PracticeResource;
use crate::models::search::{CriteriaUpdate, SearchCriteria};
use crate::models::tutor::{LocalTutorResponse, TutorFilters};
use crate::search::sequence::RequestSequence;

/// Banner text shown when a course search could not complete.
pub const SEARCH_BUSY_MESSAGE: &str = "Analysis system is busy. Please try again in a moment.";

/// Shown in the tutor panel when the lookup itself failed.
pub const TUTOR_FAILED_MESSAGE: &str = "Tutor search is unavailable right now. Please try again.";

/// State of the tutor panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TutorLookup {
    #[default]
    Idle,
    Loading,
    Ready {
        response: LocalTutorResponse,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub criteria: SearchCriteria,
    pub courses: Vec<Course>,
    pub busy: bool,
    pub error: Option<String>,
    pub courses_updated_at: Option<DateTime<Utc>>,
    pub insight: Option<String>,
    pub location: String,
    pub resources: Vec<PracticeResource>,
    pub resources_loading: bool,
    pub tutors: TutorLookup,
    /// Tutor form contents as last submitted; empty subject means the default.
    pub tutor_subject: String,
    pub tutor_filters: TutorFilters,
    course_seq: RequestSequence,
    resource_seq: RequestSequence,
    tutor_seq: RequestSequence,
    last_seen: Instant,
}

impl SearchSession {
    pub fn new(id: Uuid, location: impl Into<String>) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            criteria: SearchCriteria::default(),
            courses: Vec::new(),
            busy: false,
            error: None,
            courses_updated_at: None,
            insight: None,
            location: location.into(),
            resources: Vec::new(),
            resources_loading: false,
            tutors: TutorLookup::Idle,
            tutor_subject: String::new(),
            tutor_filters: TutorFilters::default(),
            course_seq: RequestSequence::default(),
            resource_seq: RequestSequence::default(),
            tutor_seq: RequestSequence::default(),
            last_seen: Instant::now(),
        }
    }

    /// Records client activity. Background fetch completions do not count.
    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }

    /// Applies a criteria edit; `true` means the category changed and a search is due.
    pub fn update_criteria(&mut self, update: &CriteriaUpdate) -> bool {
        self.criteria.apply(update)
    }

    // ── courses ────────────────────────────────────────────────────────────

    pub fn begin_course_search(&mut self) -> u64 {
        self.busy = true;
        self.error = None;
        self.course_seq.issue()
    }

    /// Stores results if `ticket` is still the latest search. Returns whether it was applied.
    pub fn finish_course_search(&mut self, ticket: u64, courses: Vec<Course>) -> bool {
        if !self.course_seq.is_current(ticket) {
            return false;
        }
        self.courses = courses;
        self.busy = false;
        self.courses_updated_at = Some(Utc::now());
        true
    }

    pub fn fail_course_search(&mut self, ticket: u64, message: impl Into<String>) -> bool {
        if !self.course_seq.is_current(ticket) {
            return false;
        }
        self.error = Some(message.into());
        self.busy = false;
        true
    }

    #[cfg(test)]
    pub fn course_searches_started(&self) -> u64 {
        self.course_seq.issued()
    }

    // ── insight ────────────────────────────────────────────────────────────

    pub fn set_insight(&mut self, insight: String) {
        self.insight = Some(insight);
    }

    // ── practice resources ─────────────────────────────────────────────────

    /// Moves the practice hub to `location`. Returns `true` if it changed.
    pub fn set_location(&mut self, location: &str) -> bool {
        if self.location == location {
            return false;
        }
        self.location = location.to_string();
        true
    }

    pub fn begin_resource_fetch(&mut self) -> u64 {
        self.resources_loading = true;
        self.resource_seq.issue()
    }

    pub fn finish_resource_fetch(&mut self, ticket: u64, resources: Vec<PracticeResource>) -> bool {
        if !self.resource_seq.is_current(ticket) {
            return false;
        }
        self.resources = resources;
        self.resources_loading = false;
        true
    }

    // ── tutors ─────────────────────────────────────────────────────────────

    /// Keeps what the student typed so the form re-renders with it.
    pub fn remember_tutor_form(&mut self, subject: &str, filters: TutorFilters) {
        self.tutor_subject = subject.trim().to_string();
        self.tutor_filters = filters;
    }

    pub fn begin_tutor_lookup(&mut self) -> u64 {
        self.tutors = TutorLookup::Loading;
        self.tutor_seq.issue()
    }

    pub fn finish_tutor_lookup(
        &mut self,
        ticket: u64,
        outcome: Result<LocalTutorResponse, String>,
    ) -> bool {
        if !self.tutor_seq.is_current(ticket) {
            return false;
        }
        self.tutors = match outcome {
            Ok(response) => TutorLookup::Ready { response },
            Err(message) => TutorLookup::Failed { message },
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::CourseCategory;

    fn session() -> SearchSession {
        SearchSession::new(Uuid::new_v4(), "New Jersey")
    }

    #[test]
    fn test_new_session_defaults() {
        let s = session();
        assert_eq!(s.criteria, SearchCriteria::default());
        assert!(!s.busy);
        assert!(s.courses.is_empty());
        assert_eq!(s.tutors, TutorLookup::Idle);
        assert_eq!(s.course_searches_started(), 0);
    }

    #[test]
    fn test_course_search_busy_transitions() {
        let mut s = session();
        let ticket = s.begin_course_search();
        assert!(s.busy);

        assert!(s.finish_course_search(ticket, Vec::new()));
        assert!(!s.busy);
        assert!(s.courses_updated_at.is_some());
        assert!(s.error.is_none());
    }

    #[test]
    fn test_superseded_search_is_discarded_and_keeps_busy() {
        let mut s = session();
        let stale = s.begin_course_search();
        let fresh = s.begin_course_search();

        assert!(!s.finish_course_search(stale, Vec::new()));
        assert!(s.busy, "a stale completion must not clear the newer search's busy flag");
        assert!(s.courses_updated_at.is_none());

        assert!(s.finish_course_search(fresh, Vec::new()));
        assert!(!s.busy);
    }

    #[test]
    fn test_failed_search_sets_error_and_next_search_clears_it() {
        let mut s = session();
        let ticket = s.begin_course_search();
        assert!(s.fail_course_search(ticket, SEARCH_BUSY_MESSAGE));
        assert_eq!(s.error.as_deref(), Some(SEARCH_BUSY_MESSAGE));
        assert!(!s.busy);

        s.begin_course_search();
        assert!(s.error.is_none());
    }

    #[test]
    fn test_update_criteria_only_category_triggers() {
        let mut s = session();
        assert!(!s.update_criteria(&CriteriaUpdate {
            budget_max: Some(2000),
            ..Default::default()
        }));
        assert!(s.update_criteria(&CriteriaUpdate {
            category: Some(CourseCategory::Verbal),
            ..Default::default()
        }));
    }

    #[test]
    fn test_set_location_reports_change() {
        let mut s = session();
        assert!(!s.set_location("New Jersey"));
        assert!(s.set_location("Ohio"));
        assert_eq!(s.location, "Ohio");
    }

    #[test]
    fn test_stale_resource_fetch_is_discarded() {
        let mut s = session();
        let stale = s.begin_resource_fetch();
        let fresh = s.begin_resource_fetch();
        assert!(!s.finish_resource_fetch(stale, Vec::new()));
        assert!(s.resources_loading);
        assert!(s.finish_resource_fetch(fresh, Vec::new()));
        assert!(!s.resources_loading);
    }

    #[test]
    fn test_tutor_lookup_failure_is_distinct_state() {
        let mut s = session();
        let ticket = s.begin_tutor_lookup();
        assert_eq!(s.tutors, TutorLookup::Loading);
        assert!(s.finish_tutor_lookup(ticket, Err("Tutor lookup failed".to_string())));
        assert!(matches!(s.tutors, TutorLookup::Failed { .. }));
    }
}
