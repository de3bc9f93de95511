//! Search controller: owns every session and orchestrates re-fetching.
//!
//! Rules:
//! - mounting a session fetches courses, the insight and practice resources once
//! - only a category change re-triggers a course search automatically
//! - fetches run as detached tasks; superseded results are dropped by ticket
//! - a session idle past its TTL is gone: lookups report it as not found

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::discovery::courses::top_courses_or_empty;
use crate::discovery::insight::admission_insight_or_default;
use crate::discovery::resources::state_resources_or_empty;
use crate::discovery::tutors::fetch_local_tutors;
use crate::errors::AppError;
use crate::llm_client::GenerativeProvider;
use crate::models::search::{CriteriaUpdate, SearchCriteria};
use crate::models::tutor::TutorSearchRequest;
use crate::search::session::{SearchSession, SEARCH_BUSY_MESSAGE, TUTOR_FAILED_MESSAGE};

type SessionMap = Arc<RwLock<HashMap<Uuid, SearchSession>>>;

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Background fetches started by a controller call.
/// Dropping it leaves the tasks running; `settle` waits for all of them.
#[must_use = "drop to detach, or call settle() to wait"]
#[derive(Debug, Default)]
pub struct PendingFetches(Vec<JoinHandle<()>>);

impl PendingFetches {
    fn push(&mut self, handle: JoinHandle<()>) {
        self.0.push(handle);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub async fn settle(self) {
        for handle in self.0 {
            if let Err(e) = handle.await {
                warn!("Background fetch task ended abnormally: {e}");
            }
        }
    }
}

#[derive(Clone)]
pub struct SearchController {
    provider: Arc<dyn GenerativeProvider>,
    sessions: SessionMap,
    default_location: String,
    session_ttl: Duration,
}

impl SearchController {
    pub fn new(provider: Arc<dyn GenerativeProvider>, default_location: impl Into<String>) -> Self {
        Self {
            provider,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            default_location: default_location.into(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Drops every session idle past the TTL. Returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() < self.session_ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Expired {removed} idle session(s), {} remaining", sessions.len());
        }
        removed
    }

    /// Sweeps expired sessions every `every` until the runtime shuts down.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                controller.sweep_expired().await;
            }
        })
    }

    /// Looks up a live session and marks it active. An expired session is
    /// removed on the spot and reported as not found.
    fn live_session<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, SearchSession>,
        id: Uuid,
    ) -> Result<&'a mut SearchSession, AppError> {
        let expired = sessions
            .get(&id)
            .map(|session| session.idle_for() >= self.session_ttl)
            .ok_or_else(|| session_not_found(id))?;
        if expired {
            sessions.remove(&id);
            info!("Session {id} expired after {:?} idle", self.session_ttl);
            return Err(session_not_found(id));
        }

        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        session.touch();
        Ok(session)
    }

    /// Opens a session and starts the initial course, insight and resource fetches.
    pub async fn mount(&self) -> (Uuid, PendingFetches) {
        let id = Uuid::new_v4();
        let mut session = SearchSession::new(id, self.default_location.clone());
        let course_ticket = session.begin_course_search();
        let resource_ticket = session.begin_resource_fetch();
        let criteria = session.criteria.clone();
        let location = session.location.clone();

        self.sweep_expired().await;
        self.sessions.write().await.insert(id, session);
        info!("Mounted session {id}");

        let mut pending = PendingFetches::default();
        pending.push(self.spawn_course_search(id, course_ticket, criteria));
        pending.push(self.spawn_insight(id));
        pending.push(self.spawn_resource_fetch(id, resource_ticket, location));
        (id, pending)
    }

    /// Copy of the session's current state.
    pub async fn snapshot(&self, id: Uuid) -> Result<SearchSession, AppError> {
        let mut sessions = self.sessions.write().await;
        self.live_session(&mut sessions, id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Closed session {id}"))
            .ok_or_else(|| session_not_found(id))
    }

    /// Applies a criteria edit. Returns whether a course search was triggered.
    pub async fn update_criteria(
        &self,
        id: Uuid,
        update: &CriteriaUpdate,
    ) -> Result<(bool, PendingFetches), AppError> {
        let job = {
            let mut sessions = self.sessions.write().await;
            let session = self.live_session(&mut sessions, id)?;
            if session.update_criteria(update) {
                Some((session.begin_course_search(), session.criteria.clone()))
            } else {
                None
            }
        };

        let mut pending = PendingFetches::default();
        let triggered = job.is_some();
        if let Some((ticket, criteria)) = job {
            debug!("Category changed for session {id}, re-running course search");
            pending.push(self.spawn_course_search(id, ticket, criteria));
        }
        Ok((triggered, pending))
    }

    /// Explicit search with the current criteria.
    pub async fn search(&self, id: Uuid) -> Result<PendingFetches, AppError> {
        let (ticket, criteria) = {
            let mut sessions = self.sessions.write().await;
            let session = self.live_session(&mut sessions, id)?;
            (session.begin_course_search(), session.criteria.clone())
        };

        let mut pending = PendingFetches::default();
        pending.push(self.spawn_course_search(id, ticket, criteria));
        Ok(pending)
    }

    /// Points the practice hub at `location`, refreshing resources if it changed.
    pub async fn set_location(&self, id: Uuid, location: &str) -> Result<PendingFetches, AppError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AppError::Validation("location cannot be empty".to_string()));
        }

        let job = {
            let mut sessions = self.sessions.write().await;
            let session = self.live_session(&mut sessions, id)?;
            session
                .set_location(location)
                .then(|| session.begin_resource_fetch())
        };

        let mut pending = PendingFetches::default();
        if let Some(ticket) = job {
            pending.push(self.spawn_resource_fetch(id, ticket, location.to_string()));
        }
        Ok(pending)
    }

    /// Runs a tutor lookup to completion and records the outcome in the session.
    /// The searched location also becomes the practice hub's location.
    pub async fn find_tutors(
        &self,
        id: Uuid,
        request: &TutorSearchRequest,
    ) -> Result<PendingFetches, AppError> {
        let location = request.location.trim();
        if location.is_empty() {
            return Err(AppError::Validation("location cannot be empty".to_string()));
        }

        let pending = self.set_location(id, location).await?;

        let ticket = {
            let mut sessions = self.sessions.write().await;
            let session = self.live_session(&mut sessions, id)?;
            session.remember_tutor_form(
                request.subject.as_deref().unwrap_or_default(),
                request.filters.clone().unwrap_or_default(),
            );
            session.begin_tutor_lookup()
        };

        let outcome = fetch_local_tutors(
            self.provider.as_ref(),
            location,
            request.effective_subject(),
            request.filters.as_ref(),
        )
        .await
        .map_err(|e| {
            warn!("Tutor lookup for session {id} failed: {e}");
            TUTOR_FAILED_MESSAGE.to_string()
        });

        let mut sessions = self.sessions.write().await;
        let session = self.live_session(&mut sessions, id)?;
        if !session.finish_tutor_lookup(ticket, outcome) {
            debug!("Discarding superseded tutor lookup #{ticket} for session {id}");
        }
        Ok(pending)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Background fetches
    // ────────────────────────────────────────────────────────────────────────

    fn spawn_course_search(
        &self,
        id: Uuid,
        ticket: u64,
        criteria: SearchCriteria,
    ) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let sessions = Arc::clone(&self.sessions);

        tokio::spawn(async move {
            // The inner task isolates a panicking fetch so the banner can be shown.
            let fetch =
                tokio::spawn(async move { top_courses_or_empty(provider.as_ref(), &criteria).await });
            let outcome = fetch.await;

            let mut sessions = sessions.write().await;
            let Some(session) = sessions.get_mut(&id) else {
                debug!("Session {id} closed before course search #{ticket} finished");
                return;
            };

            let applied = match outcome {
                Ok(courses) => session.finish_course_search(ticket, courses),
                Err(e) => {
                    warn!("Course search task for session {id} aborted: {e}");
                    session.fail_course_search(ticket, SEARCH_BUSY_MESSAGE)
                }
            };
            if !applied {
                debug!("Discarding superseded course search #{ticket} for session {id}");
            }
        })
    }

    fn spawn_insight(&self, id: Uuid) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let sessions = Arc::clone(&self.sessions);

        tokio::spawn(async move {
            let insight = admission_insight_or_default(provider.as_ref()).await;
            if let Some(session) = sessions.write().await.get_mut(&id) {
                session.set_insight(insight);
            }
        })
    }

    fn spawn_resource_fetch(&self, id: Uuid, ticket: u64, location: String) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let sessions = Arc::clone(&self.sessions);

        tokio::spawn(async move {
            let resources = state_resources_or_empty(provider.as_ref(), &location).await;
            let mut sessions = sessions.write().await;
            let Some(session) = sessions.get_mut(&id) else {
                return;
            };
            if !session.finish_resource_fetch(ticket, resources) {
                debug!("Discarding superseded resource fetch #{ticket} for session {id}");
            }
        })
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
