//! Local tutor lookup: maps-grounded narrative plus validated citations.
//!
//! Unlike the other discovery operations there is no best-effort companion:
//! callers must see the failure.

use tracing::{debug, info};

use crate::discovery::prompts::{
    fill_template, GROUNDED_MODEL, TUTORS_EMPTY_TEXT, TUTORS_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, GenerativeProvider, RawGroundingChunk, Tool};
use crate::models::tutor::{GroundingSource, LocalTutorResponse, TutorFilters};

/// Renders the non-empty filters as free-text prompt fragments.
fn filter_fragment(filters: Option<&TutorFilters>) -> String {
    let Some(filters) = filters else {
        return String::new();
    };

    let mut fragment = String::new();
    let rating = filters.rating.trim();
    if !rating.is_empty() {
        fragment.push_str(&format!(" with rating {rating}+"));
    }
    let price = filters.price.trim();
    if !price.is_empty() {
        fragment.push_str(&format!(" price {price}"));
    }
    let availability = filters.availability.trim();
    if !availability.is_empty() {
        fragment.push_str(&format!(" available {availability}"));
    }
    fragment
}

pub fn build_tutors_prompt(location: &str, subject: &str, filters: Option<&TutorFilters>) -> String {
    let filters = filter_fragment(filters);
    fill_template(
        TUTORS_PROMPT_TEMPLATE,
        &[
            ("subject", subject),
            ("location", location),
            ("filters", filters.as_str()),
        ],
    )
}

/// Validates raw citation records. A `web` source wins over `maps`; chunks
/// with neither, or without a uri, are dropped. Missing titles fall back to the uri.
pub fn parse_grounding_chunks(raw: Vec<RawGroundingChunk>) -> Vec<GroundingSource> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(idx, chunk)| {
            let (source, is_web) = match (chunk.web, chunk.maps) {
                (Some(web), _) => (web, true),
                (None, Some(maps)) => (maps, false),
                (None, None) => {
                    debug!("Skipping grounding chunk {idx}: no web or maps source");
                    return None;
                }
            };

            let Some(uri) = source.uri.filter(|u| !u.trim().is_empty()) else {
                debug!("Skipping grounding chunk {idx}: source has no uri");
                return None;
            };
            let title = source
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| uri.clone());

            Some(if is_web {
                GroundingSource::Web { uri, title }
            } else {
                GroundingSource::Maps { uri, title }
            })
        })
        .collect()
}

/// Finds tutors near `location` for `subject`. Provider failures propagate.
pub async fn fetch_local_tutors(
    provider: &dyn GenerativeProvider,
    location: &str,
    subject: &str,
    filters: Option<&TutorFilters>,
) -> Result<LocalTutorResponse, AppError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(AppError::Validation("location cannot be empty".to_string()));
    }

    let request = GenerationRequest::new(
        GROUNDED_MODEL,
        build_tutors_prompt(location, subject, filters),
    )
    .with_tool(Tool::MapsGrounding);

    let response = provider
        .generate(request)
        .await
        .map_err(|e| AppError::Llm(format!("Tutor lookup failed: {e}")))?;

    let text = response
        .non_empty_text()
        .unwrap_or(TUTORS_EMPTY_TEXT)
        .to_string();
    let grounding_chunks = parse_grounding_chunks(response.grounding_chunks);

    info!(
        "Tutor lookup for '{subject}' in {location}: {} verified listings",
        grounding_chunks.len()
    );

    Ok(LocalTutorResponse {
        text,
        grounding_chunks,
    })
}
