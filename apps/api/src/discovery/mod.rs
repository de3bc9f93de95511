// Discovery operations: the four provider-backed lookups.
// All provider calls go through llm_client; no direct HTTP calls here.

pub mod courses;
pub mod handlers;
pub mod insight;
pub mod prompts;
pub mod resources;
pub mod tutors;
